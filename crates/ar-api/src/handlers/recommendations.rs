use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use ar_engine::{RankedAssessment, RecommendationCriteria};

use crate::error::ApiError;
use crate::SharedState;

const DEFAULT_TOP_N: usize = 5;
const DEFAULT_TEXT_TOP_N: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(flatten)]
    pub criteria: RecommendationCriteria,
    pub top_n: Option<usize>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub count: usize,
    pub recommendations: Vec<RankedAssessment>,
    pub criteria: RecommendationCriteria,
}

pub async fn recommend(
    State(state): State<SharedState>,
    Json(request): Json<RecommendRequest>,
) -> Json<RecommendResponse> {
    let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);
    let recommendations = state.engine.recommend(&request.criteria, top_n);

    Json(RecommendResponse {
        count: recommendations.len(),
        recommendations,
        criteria: request.criteria,
    })
}

/// Query-parameter variant of `recommend`. List-valued fields
/// (`competencies`, `exclude_ids`) are comma-separated.
#[derive(Debug, Deserialize, Default)]
pub struct RecommendQuery {
    pub target_role: Option<String>,
    pub competencies: Option<String>,
    pub use_case: Option<String>,
    pub assessment_type: Option<String>,
    pub max_duration_minutes: Option<u32>,
    pub difficulty_level: Option<String>,
    pub language: Option<String>,
    pub exclude_ids: Option<String>,
    pub top_n: Option<usize>,
}

fn split_list(raw: Option<String>) -> Option<Vec<String>> {
    let raw = raw?;
    let items: Vec<String> = raw
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

pub async fn recommend_get(
    State(state): State<SharedState>,
    Query(query): Query<RecommendQuery>,
) -> Json<RecommendResponse> {
    let criteria = RecommendationCriteria {
        target_role: query.target_role,
        competencies: split_list(query.competencies),
        use_case: query.use_case,
        assessment_type: query.assessment_type,
        max_duration_minutes: query.max_duration_minutes,
        difficulty_level: query.difficulty_level,
        language: query.language,
        exclude_ids: split_list(query.exclude_ids),
    };

    let top_n = query.top_n.unwrap_or(DEFAULT_TOP_N);
    let recommendations = state.engine.recommend(&criteria, top_n);

    Json(RecommendResponse {
        count: recommendations.len(),
        recommendations,
        criteria,
    })
}

#[derive(Debug, Deserialize)]
pub struct TextRecommendRequest {
    #[serde(default)]
    pub query: String,
    pub top_n: Option<usize>,
}

/// Trimmed record shape for text recommendations, as the original API
/// returned: id, name, url and the similarity score only.
#[derive(Serialize)]
pub struct TextRecommendation {
    pub id: String,
    pub name: String,
    pub url: String,
    pub similarity: f64,
}

#[derive(Serialize)]
pub struct TextRecommendResponse {
    pub count: usize,
    pub recommendations: Vec<TextRecommendation>,
}

pub async fn text_recommendations(
    State(state): State<SharedState>,
    Json(request): Json<TextRecommendRequest>,
) -> Result<Json<TextRecommendResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "provide a non-empty \"query\" text".into(),
        ));
    }

    let top_n = request.top_n.unwrap_or(DEFAULT_TEXT_TOP_N);
    let recommendations: Vec<TextRecommendation> = state
        .engine
        .recommend_from_text(&request.query, top_n)
        .into_iter()
        .map(|r| TextRecommendation {
            id: r.assessment.id,
            name: r.assessment.name,
            url: r.assessment.url,
            similarity: r.similarity,
        })
        .collect();

    Ok(Json(TextRecommendResponse {
        count: recommendations.len(),
        recommendations,
    }))
}
