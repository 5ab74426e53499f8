pub mod cors;
pub mod notify;
