pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::Result;
use crate::middleware::{
    cors::public_cors,
    rate_limit::{throttle_middleware, SubmissionThrottle},
};
use crate::services::{
    attachment_service::{AttachmentPolicy, MAX_RESUME_BYTES},
    email_service::{ApplicationMailer, EmailJsMailer},
    job_catalog::{catalog, JobCatalog},
};

/// Room for the largest accepted resume plus the text fields around it.
pub const MAX_REQUEST_BYTES: usize = MAX_RESUME_BYTES + 3 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub catalog: &'static JobCatalog,
    pub mailer: Arc<dyn ApplicationMailer>,
    pub attachment_policy: AttachmentPolicy,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let mailer = EmailJsMailer::new(config.emailjs.clone())?;
        Ok(Self::with_mailer(Arc::new(mailer)))
    }

    pub fn with_mailer(mailer: Arc<dyn ApplicationMailer>) -> Self {
        Self {
            catalog: catalog(),
            mailer,
            attachment_policy: AttachmentPolicy::default(),
        }
    }
}

/// Builds the full HTTP surface. Only the two POST endpoints are throttled.
pub fn build_router(state: AppState, public_rps: u32, allowed_origin: Option<&str>) -> Router {
    let throttle = from_fn_with_state(SubmissionThrottle::new(public_rps), throttle_middleware);

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/", get(routes::jobs::list_jobs))
        .route("/jobs/:job_id", get(routes::jobs::get_job))
        .route(
            "/jobs/:job_id/apply",
            get(routes::application::get_application_form).merge(
                post(routes::application::submit_application).layer(throttle.clone()),
            ),
        )
        .route(
            "/jobs/:job_id/apply/validate",
            post(routes::application::validate_application).layer(throttle),
        )
        .route("/api-docs/openapi.json", get(routes::docs::openapi_json))
        .with_state(state)
        .layer(public_cors(allowed_origin))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
}
