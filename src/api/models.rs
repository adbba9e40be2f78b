use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed enumeration of dispute classifications. The backend never returns
/// a category outside this set; an unknown value fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Money,
    Neighborhood,
    Divorce,
    Employment,
    Business,
    Consumer,
    Property,
    Family,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dispute category: {0}")]
pub struct UnknownCategory(pub String);

impl CategoryType {
    pub const ALL: [CategoryType; 8] = [
        CategoryType::Money,
        CategoryType::Neighborhood,
        CategoryType::Divorce,
        CategoryType::Employment,
        CategoryType::Business,
        CategoryType::Consumer,
        CategoryType::Property,
        CategoryType::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Money => "money",
            CategoryType::Neighborhood => "neighborhood",
            CategoryType::Divorce => "divorce",
            CategoryType::Employment => "employment",
            CategoryType::Business => "business",
            CategoryType::Consumer => "consumer",
            CategoryType::Property => "property",
            CategoryType::Family => "family",
        }
    }

    /// Display label used across the portal for this category.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryType::Money => "Financial Disputes",
            CategoryType::Neighborhood => "Neighbourhood Disputes",
            CategoryType::Divorce => "Family Mediation (Divorce)",
            CategoryType::Employment => "Workplace/Employment Mediation",
            CategoryType::Business => "Civil/Commercial Mediation",
            CategoryType::Consumer => "Consumer Disputes",
            CategoryType::Property => "Landlord-Tenant Mediation",
            CategoryType::Family => "Family Mediation",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Backend-owned reference data for one dispute classification. The client
/// never mutates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeCategory {
    pub category_type_enum: CategoryType,
    pub title: String,
    pub description: String,
    pub is_mediation_suitable: bool,
    pub mediation_reason: String,
    pub legal_advice: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoAndDont {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

/// Detailed recommendations for one category. `next_steps` order is
/// significant (numbered steps); `context_specific_examples` keeps display
/// order only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeSpecificGuidance {
    pub next_steps: Vec<String>,
    pub dos_and_donts: DoAndDont,
    pub legal_information: String,
    pub mediation_suitability_guidance: String,
    pub context_specific_examples: Vec<String>,
}

/// One category paired with its detailed guidance, as returned by both the
/// category lookup and the free-text lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceResult {
    pub category: DisputeCategory,
    pub full_dispute: DisputeSpecificGuidance,
}

/// Response of the free-text guidance lookup. `guidance` is present when the
/// backend found a full match; `best_match` suggests the closest category
/// when confidence is too low for one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionMatch {
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<GuidanceResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_match: Option<DisputeCategory>,
}

/// An admin-curated news item. `id` is assigned by the backend on creation
/// and never changes; `date` is unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentDevelopment {
    pub id: u64,
    pub title: String,
    pub date: i64,
    pub description: String,
    pub url: String,
}

/// Validated payload for add/edit, produced by
/// [`DevelopmentDraft::validate`](crate::developments::DevelopmentDraft::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentDevelopmentInput {
    pub title: String,
    pub date: i64,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

/// Caller role as derived by the backend. Read-only on this side; gating
/// remote mutations is the backend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}
