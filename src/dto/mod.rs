pub mod interview_request_dto;
