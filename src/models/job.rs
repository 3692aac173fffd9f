use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
        };
        f.write_str(label)
    }
}

/// Annual compensation range in lakhs of rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryBand {
    pub min_lpa: Decimal,
    pub max_lpa: Decimal,
}

impl SalaryBand {
    pub fn new(min_lpa: Decimal, max_lpa: Decimal) -> Self {
        Self { min_lpa, max_lpa }
    }
}

impl fmt::Display for SalaryBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "₹{}-{} LPA",
            self.min_lpa.normalize(),
            self.max_lpa.normalize()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub id: &'static str,
    pub title: &'static str,
    pub department: &'static str,
    pub employment_type: EmploymentType,
    pub location: &'static str,
    pub experience: &'static str,
    pub salary: SalaryBand,
    pub description: &'static str,
    pub overview: &'static str,
    pub culture: &'static str,
    // Shortened requirement and benefit lines shown on the listing card.
    pub highlights: &'static [&'static str],
    pub perks: &'static [&'static str],
    pub responsibilities: &'static [&'static str],
    pub requirements: &'static [&'static str],
    pub benefits: &'static [&'static str],
    pub featured: bool,
}
