use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::job::{EmploymentType, JobPosting};

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub department: String,
    pub employment_type: EmploymentType,
    pub location: String,
    pub experience: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobListResponse {
    pub featured: Vec<JobSummary>,
    pub regular: Vec<JobSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobDetailResponse {
    pub id: String,
    pub title: String,
    pub department: String,
    pub employment_type: EmploymentType,
    pub location: String,
    pub experience: String,
    pub salary: String,
    pub overview: String,
    pub culture: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub apply_path: String,
}

impl From<&JobPosting> for JobSummary {
    fn from(value: &JobPosting) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title.to_string(),
            department: value.department.to_string(),
            employment_type: value.employment_type,
            location: value.location.to_string(),
            experience: value.experience.to_string(),
            salary: value.salary.to_string(),
            description: value.description.to_string(),
            requirements: owned(value.highlights),
            benefits: owned(value.perks),
            featured: value.featured,
        }
    }
}

impl From<&JobPosting> for JobDetailResponse {
    fn from(value: &JobPosting) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title.to_string(),
            department: value.department.to_string(),
            employment_type: value.employment_type,
            location: value.location.to_string(),
            experience: value.experience.to_string(),
            salary: value.salary.to_string(),
            overview: value.overview.to_string(),
            culture: value.culture.to_string(),
            responsibilities: owned(value.responsibilities),
            requirements: owned(value.requirements),
            benefits: owned(value.benefits),
            apply_path: format!("/jobs/{}/apply", value.id),
        }
    }
}
