pub mod health;
pub mod interview_request;
pub mod recruiter;
