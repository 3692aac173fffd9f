use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::models::application::ExperienceBand;
use crate::services::application_form::{ApplicationForm, FieldUpdate, SubmissionResult};
use crate::services::application_schema::ProfileField;
use crate::services::attachment_service::{format_file_size, AttachmentPolicy};
use crate::services::email_service::AcknowledgementStatus;

/// A client-side snapshot of the form. Absent fields keep their empty default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ApplicationDraftPayload {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub experience: Option<String>,
    pub cover_letter: Option<String>,
    pub terms_accepted: Option<bool>,
}

impl ApplicationDraftPayload {
    pub fn into_updates(self) -> Vec<FieldUpdate> {
        let mut updates = Vec::new();
        if let Some(v) = self.full_name {
            updates.push(FieldUpdate::FullName(v));
        }
        if let Some(v) = self.email {
            updates.push(FieldUpdate::Email(v));
        }
        if let Some(v) = self.phone {
            updates.push(FieldUpdate::Phone(v));
        }
        if let Some(v) = self.portfolio_url {
            updates.push(FieldUpdate::PortfolioUrl(v));
        }
        if let Some(v) = self.github_url {
            updates.push(FieldUpdate::GithubUrl(v));
        }
        if let Some(v) = self.linkedin_url {
            updates.push(FieldUpdate::LinkedinUrl(v));
        }
        if let Some(v) = self.experience {
            updates.push(FieldUpdate::Experience(v.parse().ok()));
        }
        if let Some(v) = self.cover_letter {
            updates.push(FieldUpdate::CoverLetter(v));
        }
        if let Some(v) = self.terms_accepted {
            updates.push(FieldUpdate::TermsAccepted(v));
        }
        updates
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DraftValidationResponse {
    pub job_id: String,
    pub valid: bool,
    pub can_submit: bool,
    pub completion_percentage: u8,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl From<&ApplicationForm> for DraftValidationResponse {
    fn from(form: &ApplicationForm) -> Self {
        Self {
            job_id: form.job_id().to_string(),
            valid: form.is_valid(),
            can_submit: form.can_submit(),
            completion_percentage: form.completion_percentage(),
            errors: form.field_messages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormFieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExperienceOption {
    pub value: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResumePolicyResponse {
    pub field: String,
    pub accepted_extensions: Vec<String>,
    pub accepted_mime_types: Vec<String>,
    pub max_bytes: usize,
    pub max_size_label: String,
    pub required: bool,
}

impl From<&AttachmentPolicy> for ResumePolicyResponse {
    fn from(policy: &AttachmentPolicy) -> Self {
        Self {
            field: "resume".to_string(),
            accepted_extensions: policy
                .accepted()
                .iter()
                .map(|t| format!(".{}", t.extension))
                .collect(),
            accepted_mime_types: policy.accepted().iter().map(|t| t.mime.to_string()).collect(),
            max_bytes: policy.max_bytes(),
            max_size_label: format_file_size(policy.max_bytes() as u64),
            required: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationFormResponse {
    pub job_id: String,
    pub job_title: String,
    pub fields: Vec<FormFieldDescriptor>,
    pub experience_options: Vec<ExperienceOption>,
    pub resume: ResumePolicyResponse,
    pub submit_path: String,
}

impl ApplicationFormResponse {
    pub fn describe(form: &ApplicationForm, policy: &AttachmentPolicy) -> Self {
        let schema = form.schema();
        let mut layout = vec![
            ("full_name", "Full Name", "text"),
            ("email", "Email Address", "email"),
            ("phone", "Phone Number", "tel"),
        ];
        layout.extend(
            ProfileField::ALL
                .into_iter()
                .map(|profile| (profile.field_name(), profile.label(), "url")),
        );
        layout.push(("experience", "Years of Experience", "choice"));
        layout.push(("cover_letter", "Cover Letter", "textarea"));
        layout.push(("terms_accepted", "Terms and Conditions", "checkbox"));

        let fields = layout
            .into_iter()
            .map(|(name, label, kind)| FormFieldDescriptor {
                name: name.to_string(),
                label: label.to_string(),
                kind: kind.to_string(),
                required: schema.is_required(name),
            })
            .collect();

        Self {
            job_id: form.job_id().to_string(),
            job_title: form.job_title().to_string(),
            fields,
            experience_options: ExperienceBand::ALL
                .into_iter()
                .map(|band| ExperienceOption {
                    value: band.as_str().to_string(),
                    label: band.label().to_string(),
                    description: band.description().to_string(),
                })
                .collect(),
            resume: ResumePolicyResponse::from(policy),
            submit_path: format!("/jobs/{}/apply", form.job_id()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AcknowledgementResponse {
    pub sent: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    pub reference: String,
    pub acknowledgement: Option<AcknowledgementResponse>,
}

impl From<SubmissionResult> for SubmissionResponse {
    fn from(value: SubmissionResult) -> Self {
        Self {
            success: value.success,
            message: value.message,
            reference: value.reference.to_string(),
            acknowledgement: value.acknowledgement.map(|status| match status {
                AcknowledgementStatus::Sent => AcknowledgementResponse {
                    sent: true,
                    reason: None,
                },
                AcknowledgementStatus::Failed { reason } => AcknowledgementResponse {
                    sent: false,
                    reason: Some(reason),
                },
            }),
        }
    }
}
