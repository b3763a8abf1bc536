pub mod health_checks;
pub mod jobs;
pub mod json_body;
pub mod json_error;
