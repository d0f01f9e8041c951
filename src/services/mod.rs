pub mod report_service;
pub mod upload;
