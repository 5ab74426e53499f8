pub mod email;
pub mod interview_request_service;
pub mod notification_service;
pub mod recruiter_service;
pub mod templates;
