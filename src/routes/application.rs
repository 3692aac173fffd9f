use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use tracing::debug;

use crate::{
    dto::application_dto::{
        ApplicationDraftPayload, ApplicationFormResponse, DraftValidationResponse,
        SubmissionResponse,
    },
    error::{Error, Result},
    models::job::JobPosting,
    services::application_form::{ApplicationForm, FieldUpdate},
    AppState,
};

const RESUME_FIELD: &str = "resume";

fn find_job(state: &AppState, job_id: &str) -> Result<&'static JobPosting> {
    state
        .catalog
        .get(job_id)
        .ok_or_else(|| Error::NotFound(format!("Job '{}' not found", job_id)))
}

#[utoipa::path(
    get,
    path = "/jobs/{job_id}/apply",
    params(
        ("job_id" = String, Path, description = "Job posting slug")
    ),
    responses(
        (status = 200, description = "Form layout with per-job required fields", body = ApplicationFormResponse),
        (status = 303, description = "Unknown job, redirected to the listing")
    )
)]
#[axum::debug_handler]
pub async fn get_application_form(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Some(job) = state.catalog.get(&job_id) else {
        debug!(%job_id, "apply page for unknown job, redirecting to listing");
        return Redirect::to("/").into_response();
    };
    let form = ApplicationForm::new(job);
    Json(ApplicationFormResponse::describe(
        &form,
        &state.attachment_policy,
    ))
    .into_response()
}

#[utoipa::path(
    post,
    path = "/jobs/{job_id}/apply/validate",
    params(
        ("job_id" = String, Path, description = "Job posting slug")
    ),
    request_body = ApplicationDraftPayload,
    responses(
        (status = 200, description = "Field errors and completion for the draft", body = DraftValidationResponse),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn validate_application(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(payload): Json<ApplicationDraftPayload>,
) -> Result<Json<DraftValidationResponse>> {
    let job = find_job(&state, &job_id)?;
    let mut form = ApplicationForm::new(job);
    for update in payload.into_updates() {
        form.set_field(update);
    }
    Ok(Json(DraftValidationResponse::from(&form)))
}

#[utoipa::path(
    post,
    path = "/jobs/{job_id}/apply",
    params(
        ("job_id" = String, Path, description = "Job posting slug")
    ),
    request_body(content = String, content_type = "multipart/form-data", description = "Application fields plus an optional `resume` file"),
    responses(
        (status = 200, description = "Application delivered", body = SubmissionResponse),
        (status = 400, description = "Resume rejected or malformed upload"),
        (status = 404, description = "Job not found"),
        (status = 413, description = "Resume exceeds the size limit"),
        (status = 422, description = "Field validation failed"),
        (status = 429, description = "Too many submissions"),
        (status = 502, description = "Relay did not accept the application", body = SubmissionResponse)
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response> {
    let job = find_job(&state, &job_id)?;
    let mut form = ApplicationForm::new(job);

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == RESUME_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;
            // Browsers send an empty part when no file was chosen.
            if file_name.is_empty() && data.is_empty() {
                continue;
            }
            let attachment =
                state
                    .attachment_policy
                    .accept(&file_name, content_type.as_deref(), data)?;
            form.attach(attachment);
            continue;
        }

        let value = field.text().await?;
        if let Some(update) = FieldUpdate::from_form_field(&name, value) {
            form.set_field(update);
        }
    }

    let result = form.submit(state.mailer.as_ref()).await?;
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    Ok((status, Json(SubmissionResponse::from(result))).into_response())
}
