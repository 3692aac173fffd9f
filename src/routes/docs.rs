use axum::Json;
use utoipa::OpenApi;

use crate::dto::application_dto::{
    AcknowledgementResponse, ApplicationDraftPayload, ApplicationFormResponse,
    DraftValidationResponse, ExperienceOption, FormFieldDescriptor, ResumePolicyResponse,
    SubmissionResponse,
};
use crate::dto::job_dto::{JobDetailResponse, JobListResponse, JobSummary};
use crate::models::job::EmploymentType;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::jobs::list_jobs,
        crate::routes::jobs::get_job,
        crate::routes::application::get_application_form,
        crate::routes::application::validate_application,
        crate::routes::application::submit_application,
    ),
    components(schemas(
        EmploymentType,
        JobSummary,
        JobListResponse,
        JobDetailResponse,
        ApplicationDraftPayload,
        DraftValidationResponse,
        FormFieldDescriptor,
        ExperienceOption,
        ResumePolicyResponse,
        ApplicationFormResponse,
        AcknowledgementResponse,
        SubmissionResponse,
    )),
    tags(
        (name = "careers", description = "Job listings and applications")
    )
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
