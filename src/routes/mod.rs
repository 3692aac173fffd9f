pub mod application;
pub mod docs;
pub mod health;
pub mod jobs;
