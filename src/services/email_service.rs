use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::EmailJsConfig;
use crate::error::{Error, Result};
use crate::models::application::{ApplicationSubmission, Attachment};
use crate::utils::time::{now, to_rfc3339};

pub const NOT_PROVIDED: &str = "Not provided";

pub type MailFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay rejected template {template_id} with status {status}: {body}")]
    Rejected {
        template_id: String,
        status: u16,
        body: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AcknowledgementStatus {
    Sent,
    Failed { reason: String },
}

/// Outcome of a delivered application. The HR message always went out; the
/// applicant acknowledgement may not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub reference: Uuid,
    pub acknowledgement: AcknowledgementStatus,
}

#[cfg_attr(test, mockall::automock)]
pub trait ApplicationMailer: Send + Sync {
    /// Sends the application to the HR inbox, then the acknowledgement to the
    /// applicant. Fails only when the HR message was not accepted.
    fn deliver(
        &self,
        submission: ApplicationSubmission,
    ) -> MailFuture<std::result::Result<DeliveryReceipt, MailerError>>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationTemplateParams {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub portfolio_url: String,
    pub github_url: String,
    pub linkedin_url: String,
    pub experience: String,
    pub cover_letter: String,
    pub job_id: String,
    pub job_title: String,
    pub reference: String,
    pub submitted_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_attachment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_file_name: Option<String>,
    #[serde(rename = "to_email")]
    pub to_email: String,
}

impl ApplicationTemplateParams {
    pub fn build(submission: &ApplicationSubmission, recipient: &str, submitted_at: String) -> Self {
        let draft = &submission.draft;
        Self {
            full_name: draft.full_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            portfolio_url: or_not_provided(draft.portfolio_url.as_deref()),
            github_url: or_not_provided(draft.github_url.as_deref()),
            linkedin_url: or_not_provided(draft.linkedin_url.as_deref()),
            experience: draft
                .experience
                .map(|band| band.to_string())
                .unwrap_or_default(),
            cover_letter: or_not_provided(draft.cover_letter.as_deref()),
            job_id: submission.job_id.clone(),
            job_title: submission.job_title.clone(),
            reference: submission.reference.to_string(),
            submitted_at,
            resume_attachment: draft.resume.as_ref().map(encode_data_url),
            resume_file_name: draft.resume.as_ref().map(|file| file.file_name.clone()),
            to_email: recipient.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AutoReplyParams {
    pub to_email: String,
    pub applicant_name: String,
    pub job_title: String,
}

#[derive(Debug, Serialize)]
struct EmailJsRequest<'a, P: Serialize> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a P,
}

fn or_not_provided(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_PROVIDED.to_string(),
    }
}

pub fn encode_data_url(file: &Attachment) -> String {
    format!(
        "data:{};base64,{}",
        file.content_type,
        BASE64.encode(&file.data)
    )
}

/// Resolves the send URL below the configured root. A root with a path but
/// no trailing slash keeps its last segment.
pub fn send_endpoint(api_url: &Url) -> Result<Url> {
    let mut base = api_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("api/v1.0/email/send")
        .map_err(|e| Error::Config(format!("Invalid EmailJS endpoint: {}", e)))
}

#[derive(Clone)]
pub struct EmailJsMailer {
    client: Client,
    endpoint: Url,
    settings: Arc<EmailJsConfig>,
}

impl EmailJsMailer {
    pub fn new(settings: EmailJsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        let endpoint = send_endpoint(&settings.api_url)?;

        info!(endpoint = %endpoint, recipient = %settings.hr_recipient, "EmailJS relay configured");

        Ok(Self {
            client,
            endpoint,
            settings: Arc::new(settings),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send_application(
        &self,
        submission: ApplicationSubmission,
    ) -> std::result::Result<DeliveryReceipt, MailerError> {
        let params = ApplicationTemplateParams::build(
            &submission,
            &self.settings.hr_recipient,
            to_rfc3339(now()),
        );
        self.send(&self.settings.template_id, &params).await?;
        info!(
            reference = %submission.reference,
            job_id = %submission.job_id,
            with_resume = params.resume_attachment.is_some(),
            "application delivered to HR inbox"
        );

        let auto_reply = AutoReplyParams {
            to_email: submission.draft.email.clone(),
            applicant_name: submission.draft.full_name.clone(),
            job_title: submission.job_title.clone(),
        };
        let acknowledgement = match self
            .send(&self.settings.auto_reply_template_id, &auto_reply)
            .await
        {
            Ok(()) => AcknowledgementStatus::Sent,
            Err(err) => {
                warn!(reference = %submission.reference, error = %err, "applicant acknowledgement failed");
                AcknowledgementStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        Ok(DeliveryReceipt {
            reference: submission.reference,
            acknowledgement,
        })
    }

    async fn send<P: Serialize>(
        &self,
        template_id: &str,
        params: &P,
    ) -> std::result::Result<(), MailerError> {
        let body = EmailJsRequest {
            service_id: &self.settings.service_id,
            template_id,
            user_id: &self.settings.public_key,
            access_token: self.settings.private_key.as_deref(),
            template_params: params,
        };

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(MailerError::Rejected {
            template_id: template_id.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

impl ApplicationMailer for EmailJsMailer {
    fn deliver(
        &self,
        submission: ApplicationSubmission,
    ) -> MailFuture<std::result::Result<DeliveryReceipt, MailerError>> {
        let mailer = self.clone();
        Box::pin(async move { mailer.send_application(submission).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::{ApplicationDraft, ExperienceBand};
    use bytes::Bytes;

    fn submission() -> ApplicationSubmission {
        ApplicationSubmission {
            reference: Uuid::nil(),
            job_id: "web-developer".to_string(),
            job_title: "Web Developer".to_string(),
            draft: ApplicationDraft {
                full_name: "Ravi Das".to_string(),
                email: "ravi@example.com".to_string(),
                phone: "9876543210".to_string(),
                github_url: Some("https://github.com/ravi".to_string()),
                experience: Some(ExperienceBand::MidLevel),
                terms_accepted: true,
                ..ApplicationDraft::default()
            },
        }
    }

    #[test]
    fn params_default_missing_values_to_sentinel() {
        let params = ApplicationTemplateParams::build(
            &submission(),
            "hr@example.com",
            "2025-01-01T00:00:00Z".to_string(),
        );
        assert_eq!(params.github_url, "https://github.com/ravi");
        assert_eq!(params.portfolio_url, NOT_PROVIDED);
        assert_eq!(params.linkedin_url, NOT_PROVIDED);
        assert_eq!(params.cover_letter, NOT_PROVIDED);
        assert_eq!(params.experience, "3-5");
        assert!(params.resume_attachment.is_none());

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["fullName"], "Ravi Das");
        assert_eq!(json["jobTitle"], "Web Developer");
        assert_eq!(json["to_email"], "hr@example.com");
        assert!(json.get("resumeAttachment").is_none());
    }

    #[test]
    fn resume_is_sent_as_data_url() {
        let mut submission = submission();
        submission.draft.resume = Some(Attachment {
            file_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: Bytes::from_static(b"%PDF"),
        });
        let params = ApplicationTemplateParams::build(&submission, "hr@example.com", String::new());
        assert_eq!(
            params.resume_attachment.as_deref(),
            Some("data:application/pdf;base64,JVBERg==")
        );
        assert_eq!(params.resume_file_name.as_deref(), Some("cv.pdf"));
    }

    #[test]
    fn endpoint_is_joined_onto_api_root() {
        let mailer = EmailJsMailer::new(EmailJsConfig {
            api_url: Url::parse("https://api.emailjs.com").unwrap(),
            service_id: "service".to_string(),
            template_id: "template".to_string(),
            auto_reply_template_id: "auto".to_string(),
            public_key: "public".to_string(),
            private_key: None,
            hr_recipient: "hr@example.com".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            mailer.endpoint().as_str(),
            "https://api.emailjs.com/api/v1.0/email/send"
        );
    }

    #[test]
    fn endpoint_keeps_proxy_path_segment() {
        for root in ["https://proxy.example.com/emailjs", "https://proxy.example.com/emailjs/"] {
            let endpoint = send_endpoint(&Url::parse(root).unwrap()).unwrap();
            assert_eq!(
                endpoint.as_str(),
                "https://proxy.example.com/emailjs/api/v1.0/email/send",
                "{root}"
            );
        }
    }

    #[test]
    fn acknowledgement_status_is_tagged() {
        let json = serde_json::to_value(AcknowledgementStatus::Failed {
            reason: "timeout".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "timeout");
    }
}
