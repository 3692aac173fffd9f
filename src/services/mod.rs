pub mod application_form;
pub mod application_schema;
pub mod attachment_service;
pub mod email_service;
pub mod job_catalog;
