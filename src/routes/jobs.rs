use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Redirect, Response},
};
use tracing::debug;

use crate::{
    dto::job_dto::{JobDetailResponse, JobListResponse, JobSummary},
    AppState,
};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Open positions, featured first", body = JobListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    Json(JobListResponse {
        featured: state.catalog.featured().map(JobSummary::from).collect(),
        regular: state.catalog.regular().map(JobSummary::from).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/jobs/{job_id}",
    params(
        ("job_id" = String, Path, description = "Job posting slug")
    ),
    responses(
        (status = 200, description = "Full job description", body = JobDetailResponse),
        (status = 303, description = "Unknown job, redirected to the listing")
    )
)]
#[axum::debug_handler]
pub async fn get_job(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    match state.catalog.get(&job_id) {
        Some(job) => Json(JobDetailResponse::from(job)).into_response(),
        None => {
            debug!(%job_id, "unknown job requested, redirecting to listing");
            Redirect::to("/").into_response()
        }
    }
}
