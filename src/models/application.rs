use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_full_name, validate_phone, validate_terms};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ExperienceBand {
    #[serde(rename = "0-1")]
    Entry,
    #[serde(rename = "1-3")]
    Junior,
    #[serde(rename = "3-5")]
    MidLevel,
    #[serde(rename = "5+")]
    Senior,
}

impl ExperienceBand {
    pub const ALL: [ExperienceBand; 4] = [
        ExperienceBand::Entry,
        ExperienceBand::Junior,
        ExperienceBand::MidLevel,
        ExperienceBand::Senior,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceBand::Entry => "0-1",
            ExperienceBand::Junior => "1-3",
            ExperienceBand::MidLevel => "3-5",
            ExperienceBand::Senior => "5+",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceBand::Entry => "0-1 years",
            ExperienceBand::Junior => "1-3 years",
            ExperienceBand::MidLevel => "3-5 years",
            ExperienceBand::Senior => "5+ years",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExperienceBand::Entry => "Fresh graduate or entry level",
            ExperienceBand::Junior => "Some professional experience",
            ExperienceBand::MidLevel => "Mid-level professional",
            ExperienceBand::Senior => "Senior professional",
        }
    }
}

impl fmt::Display for ExperienceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown experience band: {0}")]
pub struct UnknownExperienceBand(pub String);

impl FromStr for ExperienceBand {
    type Err = UnknownExperienceBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExperienceBand::ALL
            .into_iter()
            .find(|band| band.as_str() == s.trim())
            .ok_or_else(|| UnknownExperienceBand(s.to_string()))
    }
}

/// A resume that already passed the upload policy, held in memory until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl Attachment {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Base rules shared by every posting. Job specific overrides live in
/// `services::application_schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ApplicationDraft {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(url(message = "Please enter a valid URL"))]
    pub portfolio_url: Option<String>,

    #[validate(url(message = "Please enter a valid GitHub URL"))]
    pub github_url: Option<String>,

    #[validate(url(message = "Please enter a valid LinkedIn URL"))]
    pub linkedin_url: Option<String>,

    #[validate(required(message = "Please select your experience level"))]
    pub experience: Option<ExperienceBand>,

    #[validate(length(max = 1000, message = "Cover letter must be under 1000 characters"))]
    pub cover_letter: Option<String>,

    #[serde(skip)]
    pub resume: Option<Attachment>,

    #[validate(custom(function = "validate_terms"))]
    pub terms_accepted: bool,
}

/// Everything the relay needs for one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSubmission {
    pub reference: Uuid,
    pub job_id: String,
    pub job_title: String,
    pub draft: ApplicationDraft,
}
