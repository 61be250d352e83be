pub mod catalogue;
pub mod engine;
pub mod logging;
pub mod matching;
pub mod text_index;

use serde::{Deserialize, Serialize};

pub use catalogue::{CatalogueError, CatalogueStore};
pub use engine::{RankedAssessment, RecommendationEngine, SimilarAssessment};

/// Category tag applied when the catalogue source omits one.
pub const DEFAULT_CATEGORY: &str = "individual_test_solution";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

// Core data models shared by the scorer and the text index.

/// One catalogue entry for a psychometric test product. Immutable once
/// loaded; `id` is the only stable external handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(rename = "type", default)]
    pub assessment_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    /// The literal entry "all" is a wildcard matching any requested role.
    #[serde(default)]
    pub target_roles: Vec<String>,
    #[serde(default)]
    pub competencies: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl Default for Assessment {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            url: String::new(),
            category: default_category(),
            assessment_type: None,
            description: None,
            duration_minutes: None,
            difficulty_level: None,
            target_roles: Vec::new(),
            competencies: Vec::new(),
            use_cases: Vec::new(),
            languages: Vec::new(),
        }
    }
}

/// Caller-specified desired attributes. Every field defaults to unset;
/// an unset field contributes zero weight to scoring — it is never
/// interpreted as "must be empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationCriteria {
    pub target_role: Option<String>,
    pub competencies: Option<Vec<String>>,
    pub use_case: Option<String>,
    pub assessment_type: Option<String>,
    pub max_duration_minutes: Option<u32>,
    pub difficulty_level: Option<String>,
    pub language: Option<String>,
    pub exclude_ids: Option<Vec<String>>,
}
