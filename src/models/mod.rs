pub mod appointment;
pub mod aspirant;
pub mod interview_request;
pub mod recruiter;
