use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::error::{Error, Result};
use crate::models::application::{
    ApplicationDraft, ApplicationSubmission, Attachment, ExperienceBand,
};
use crate::models::job::JobPosting;
use crate::services::application_schema::ApplicationSchema;
use crate::services::email_service::{AcknowledgementStatus, ApplicationMailer};
use crate::utils::validation::field_messages;

pub const SUCCESS_MESSAGE: &str = "Application submitted successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to submit application. Please try again.";
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(6);

/// One user edit. Text for optional fields is trimmed to `None` when blank.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    FullName(String),
    Email(String),
    Phone(String),
    PortfolioUrl(String),
    GithubUrl(String),
    LinkedinUrl(String),
    Experience(Option<ExperienceBand>),
    CoverLetter(String),
    TermsAccepted(bool),
}

impl FieldUpdate {
    /// Maps a submitted form field onto an update. Unknown names are ignored.
    pub fn from_form_field(name: &str, value: String) -> Option<Self> {
        let update = match name {
            "full_name" => FieldUpdate::FullName(value),
            "email" => FieldUpdate::Email(value),
            "phone" => FieldUpdate::Phone(value),
            "portfolio_url" => FieldUpdate::PortfolioUrl(value),
            "github_url" => FieldUpdate::GithubUrl(value),
            "linkedin_url" => FieldUpdate::LinkedinUrl(value),
            "experience" => FieldUpdate::Experience(value.parse().ok()),
            "cover_letter" => FieldUpdate::CoverLetter(value),
            "terms_accepted" => FieldUpdate::TermsAccepted(matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "yes"
            )),
            _ => return None,
        };
        Some(update)
    }
}

fn optional_text(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Holds the in-flight flag for one delivery. Dropping the submit future
/// mid-delivery clears it too, so a cancelled attempt can be retried.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
}

impl Notification {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < NOTIFICATION_TTL
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    pub reference: Uuid,
    pub acknowledgement: Option<AcknowledgementStatus>,
}

/// Owns one application draft for a single posting and keeps its validation
/// state current after every edit.
#[derive(Debug)]
pub struct ApplicationForm {
    schema: ApplicationSchema,
    job_title: String,
    draft: ApplicationDraft,
    errors: ValidationErrors,
    submitting: bool,
    notification: Option<Notification>,
}

impl ApplicationForm {
    pub fn new(job: &JobPosting) -> Self {
        let mut form = Self {
            schema: ApplicationSchema::for_job(job.id),
            job_title: job.title.to_string(),
            draft: ApplicationDraft::default(),
            errors: ValidationErrors::new(),
            submitting: false,
            notification: None,
        };
        form.revalidate();
        form
    }

    pub fn job_id(&self) -> &str {
        self.schema.job_id()
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn schema(&self) -> &ApplicationSchema {
        &self.schema
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    /// Points the form at another posting. The draft is kept but the rules
    /// are re-derived, so errors never reflect the previous job.
    pub fn retarget(&mut self, job: &JobPosting) {
        if self.schema.job_id() != job.id {
            self.schema = ApplicationSchema::for_job(job.id);
            self.job_title = job.title.to_string();
            self.revalidate();
        }
    }

    pub fn set_field(&mut self, update: FieldUpdate) {
        let draft = &mut self.draft;
        match update {
            FieldUpdate::FullName(v) => draft.full_name = v,
            FieldUpdate::Email(v) => draft.email = v,
            FieldUpdate::Phone(v) => draft.phone = v,
            FieldUpdate::PortfolioUrl(v) => draft.portfolio_url = optional_text(v),
            FieldUpdate::GithubUrl(v) => draft.github_url = optional_text(v),
            FieldUpdate::LinkedinUrl(v) => draft.linkedin_url = optional_text(v),
            FieldUpdate::Experience(v) => draft.experience = v,
            FieldUpdate::CoverLetter(v) => draft.cover_letter = optional_text(v),
            FieldUpdate::TermsAccepted(v) => draft.terms_accepted = v,
        }
        self.revalidate();
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.draft.resume = Some(attachment);
    }

    pub fn detach(&mut self) -> Option<Attachment> {
        self.draft.resume.take()
    }

    fn revalidate(&mut self) {
        self.errors = match self.schema.validate(&self.draft) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        field_messages(&self.errors)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.submitting
    }

    /// Share of the five always-required fields that are filled in. The
    /// job-specific profile link is not counted.
    pub fn completion_percentage(&self) -> u8 {
        let draft = &self.draft;
        let filled = [
            !draft.full_name.trim().is_empty(),
            !draft.email.trim().is_empty(),
            !draft.phone.trim().is_empty(),
            draft.experience.is_some(),
            draft.terms_accepted,
        ]
        .iter()
        .filter(|done| **done)
        .count();
        ((filled as f64 / 5.0) * 100.0).round() as u8
    }

    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|notice| notice.is_visible_at(now))
    }

    pub fn dismiss_expired(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|notice| !notice.is_visible_at(now))
        {
            self.notification = None;
        }
    }

    fn raise(&mut self, kind: NotificationKind, message: &str) {
        self.notification = Some(Notification {
            kind,
            message: message.to_string(),
            raised_at: Instant::now(),
        });
    }

    /// Hands the draft to the relay. The draft is cleared only after the
    /// relay confirms delivery; on failure it is kept for a manual retry.
    pub async fn submit(&mut self, mailer: &dyn ApplicationMailer) -> Result<SubmissionResult> {
        if self.submitting {
            return Err(Error::Conflict(
                "A submission is already in progress".to_string(),
            ));
        }
        if !self.is_valid() {
            return Err(Error::Validation(self.errors.clone()));
        }

        let submission = ApplicationSubmission {
            reference: Uuid::new_v4(),
            job_id: self.job_id().to_string(),
            job_title: self.job_title.clone(),
            draft: self.draft.clone(),
        };
        let reference = submission.reference;
        info!(%reference, job_id = %submission.job_id, "submitting application");

        let outcome = {
            let _in_flight = InFlight::start(&mut self.submitting);
            mailer.deliver(submission).await
        };

        match outcome {
            Ok(receipt) => {
                self.draft = ApplicationDraft::default();
                self.revalidate();
                self.raise(NotificationKind::Success, SUCCESS_MESSAGE);
                Ok(SubmissionResult {
                    success: true,
                    message: SUCCESS_MESSAGE.to_string(),
                    reference: receipt.reference,
                    acknowledgement: Some(receipt.acknowledgement),
                })
            }
            Err(err) => {
                warn!(%reference, error = %err, "application submission failed");
                self.raise(NotificationKind::Failure, FAILURE_MESSAGE);
                Ok(SubmissionResult {
                    success: false,
                    message: FAILURE_MESSAGE.to_string(),
                    reference,
                    acknowledgement: None,
                })
            }
        }
    }
}
