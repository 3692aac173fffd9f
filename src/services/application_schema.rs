use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidateUrl, ValidationErrors};

use crate::models::application::ApplicationDraft;
use crate::services::job_catalog::catalog;
use crate::utils::validation::error_with_message;

/// Closed set of schema variants. Every job identifier maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCategory {
    GraphicDesign,
    WebDevelopment,
    SocialMedia,
    /// Listed posting without a profile link override.
    Standard,
    /// Identifier absent from the catalog. Validates with base rules.
    Unlisted,
}

impl JobCategory {
    pub fn classify(job_id: &str) -> Self {
        match job_id {
            "graphic-designer" => JobCategory::GraphicDesign,
            "web-developer" => JobCategory::WebDevelopment,
            "social-media-executive" => JobCategory::SocialMedia,
            other if catalog().contains(other) => JobCategory::Standard,
            _ => JobCategory::Unlisted,
        }
    }

    pub fn required_profile(self) -> Option<ProfileRequirement> {
        match self {
            JobCategory::GraphicDesign => Some(ProfileRequirement {
                field: ProfileField::Portfolio,
                missing_message: "Portfolio URL is required for this position",
                invalid_message: "Please enter a valid portfolio URL",
            }),
            JobCategory::WebDevelopment => Some(ProfileRequirement {
                field: ProfileField::Github,
                missing_message: "GitHub profile is required for this position",
                invalid_message: "Please enter a valid GitHub URL",
            }),
            JobCategory::SocialMedia => Some(ProfileRequirement {
                field: ProfileField::Linkedin,
                missing_message: "LinkedIn profile is required for this position",
                invalid_message: "Please enter a valid LinkedIn URL",
            }),
            JobCategory::Standard | JobCategory::Unlisted => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Portfolio,
    Github,
    Linkedin,
}

impl ProfileField {
    pub const ALL: [ProfileField; 3] = [
        ProfileField::Portfolio,
        ProfileField::Github,
        ProfileField::Linkedin,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            ProfileField::Portfolio => "portfolio_url",
            ProfileField::Github => "github_url",
            ProfileField::Linkedin => "linkedin_url",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Portfolio => "Portfolio URL",
            ProfileField::Github => "GitHub Profile",
            ProfileField::Linkedin => "LinkedIn Profile",
        }
    }

    pub fn value(self, draft: &ApplicationDraft) -> Option<&str> {
        let value = match self {
            ProfileField::Portfolio => &draft.portfolio_url,
            ProfileField::Github => &draft.github_url,
            ProfileField::Linkedin => &draft.linkedin_url,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileRequirement {
    pub field: ProfileField,
    pub missing_message: &'static str,
    pub invalid_message: &'static str,
}

/// Fields every schema treats as mandatory.
pub const BASE_REQUIRED_FIELDS: [&str; 5] = [
    "full_name",
    "email",
    "phone",
    "experience",
    "terms_accepted",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSchema {
    job_id: String,
    category: JobCategory,
}

impl ApplicationSchema {
    pub fn for_job(job_id: &str) -> Self {
        let category = JobCategory::classify(job_id);
        if category == JobCategory::Unlisted {
            tracing::warn!(job_id, "no posting registered for job id, using base application rules");
        }
        Self {
            job_id: job_id.to_string(),
            category,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn category(&self) -> JobCategory {
        self.category
    }

    pub fn required_profile(&self) -> Option<ProfileRequirement> {
        self.category.required_profile()
    }

    pub fn is_required(&self, field_name: &str) -> bool {
        BASE_REQUIRED_FIELDS.contains(&field_name)
            || self
                .required_profile()
                .is_some_and(|req| req.field.field_name() == field_name)
    }

    pub fn validate(&self, draft: &ApplicationDraft) -> Result<(), ValidationErrors> {
        let mut errors = match draft.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Some(requirement) = self.required_profile() {
            let field = requirement.field.field_name();
            errors.errors_mut().remove(field);
            match requirement.field.value(draft) {
                None => errors.add(
                    field,
                    error_with_message("required", requirement.missing_message),
                ),
                Some(url) if !url.validate_url() => {
                    errors.add(field, error_with_message("url", requirement.invalid_message))
                }
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ExperienceBand;
    use crate::utils::validation::field_messages;

    fn complete_draft() -> ApplicationDraft {
        ApplicationDraft {
            full_name: "Ananya Sen".to_string(),
            email: "ananya@example.com".to_string(),
            phone: "+919876543210".to_string(),
            experience: Some(ExperienceBand::Junior),
            terms_accepted: true,
            ..ApplicationDraft::default()
        }
    }

    fn messages_for(schema: &ApplicationSchema, draft: &ApplicationDraft, field: &str) -> Vec<String> {
        match schema.validate(draft) {
            Ok(()) => Vec::new(),
            Err(errors) => field_messages(&errors).remove(field).unwrap_or_default(),
        }
    }

    #[test]
    fn classification_is_exact_match() {
        assert_eq!(JobCategory::classify("graphic-designer"), JobCategory::GraphicDesign);
        assert_eq!(JobCategory::classify("web-developer"), JobCategory::WebDevelopment);
        assert_eq!(JobCategory::classify("social-media-executive"), JobCategory::SocialMedia);
        assert_eq!(JobCategory::classify("quality-analyst"), JobCategory::Standard);
        assert_eq!(JobCategory::classify("supply-chain-coordinator"), JobCategory::Standard);
        assert_eq!(JobCategory::classify("Graphic-Designer"), JobCategory::Unlisted);
        assert_eq!(JobCategory::classify(""), JobCategory::Unlisted);
    }

    #[test]
    fn override_jobs_require_their_profile_link() {
        let cases = [
            ("graphic-designer", ProfileField::Portfolio, "Portfolio URL is required for this position"),
            ("web-developer", ProfileField::Github, "GitHub profile is required for this position"),
            ("social-media-executive", ProfileField::Linkedin, "LinkedIn profile is required for this position"),
        ];

        for (job_id, field, message) in cases {
            let schema = ApplicationSchema::for_job(job_id);
            let draft = complete_draft();
            assert_eq!(
                messages_for(&schema, &draft, field.field_name()),
                vec![message.to_string()],
                "{job_id}"
            );

            let mut draft = complete_draft();
            let url = Some("https://example.com/me".to_string());
            match field {
                ProfileField::Portfolio => draft.portfolio_url = url,
                ProfileField::Github => draft.github_url = url,
                ProfileField::Linkedin => draft.linkedin_url = url,
            }
            assert!(schema.validate(&draft).is_ok(), "{job_id}");
        }
    }

    #[test]
    fn override_replaces_malformed_url_message() {
        let schema = ApplicationSchema::for_job("graphic-designer");
        let mut draft = complete_draft();
        draft.portfolio_url = Some("not a url".to_string());
        assert_eq!(
            messages_for(&schema, &draft, "portfolio_url"),
            vec!["Please enter a valid portfolio URL".to_string()]
        );
    }

    #[test]
    fn malformed_email_is_reported() {
        let schema = ApplicationSchema::for_job("quality-analyst");
        for email in ["arjun@", "arjun.example.com"] {
            let mut draft = complete_draft();
            draft.email = email.to_string();
            assert_eq!(
                messages_for(&schema, &draft, "email"),
                vec!["Please enter a valid email address".to_string()],
                "{email}"
            );
        }
    }

    #[test]
    fn standard_and_unlisted_jobs_leave_profiles_optional() {
        for job_id in ["quality-analyst", "supply-chain-coordinator", "no-such-job"] {
            let schema = ApplicationSchema::for_job(job_id);
            assert!(schema.required_profile().is_none());
            assert!(schema.validate(&complete_draft()).is_ok(), "{job_id}");
        }
    }

    #[test]
    fn optional_profile_links_must_still_be_urls() {
        let schema = ApplicationSchema::for_job("quality-analyst");
        let mut draft = complete_draft();
        draft.linkedin_url = Some("linkedin".to_string());
        assert_eq!(
            messages_for(&schema, &draft, "linkedin_url"),
            vec!["Please enter a valid LinkedIn URL".to_string()]
        );
    }

    #[test]
    fn cover_letter_limit_is_inclusive() {
        let schema = ApplicationSchema::for_job("quality-analyst");
        let mut draft = complete_draft();
        draft.cover_letter = Some("a".repeat(1000));
        assert!(schema.validate(&draft).is_ok());

        draft.cover_letter = Some("a".repeat(1001));
        assert_eq!(
            messages_for(&schema, &draft, "cover_letter"),
            vec!["Cover letter must be under 1000 characters".to_string()]
        );
    }

    #[test]
    fn missing_experience_and_terms_have_field_messages() {
        let schema = ApplicationSchema::for_job("quality-analyst");
        let mut draft = complete_draft();
        draft.experience = None;
        draft.terms_accepted = false;
        assert_eq!(
            messages_for(&schema, &draft, "experience"),
            vec!["Please select your experience level".to_string()]
        );
        assert_eq!(
            messages_for(&schema, &draft, "terms_accepted"),
            vec!["You must accept the terms and conditions".to_string()]
        );
    }

    #[test]
    fn required_flags_follow_the_variant() {
        let schema = ApplicationSchema::for_job("web-developer");
        assert!(schema.is_required("github_url"));
        assert!(!schema.is_required("portfolio_url"));
        assert!(schema.is_required("terms_accepted"));
        assert!(!schema.is_required("cover_letter"));
    }
}
