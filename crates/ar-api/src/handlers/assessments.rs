use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use ar_engine::Assessment;

use crate::error::ApiError;
use crate::SharedState;

#[derive(Serialize)]
pub struct AssessmentList {
    pub count: usize,
    pub assessments: Vec<Assessment>,
}

pub async fn list(State(state): State<SharedState>) -> Json<AssessmentList> {
    let assessments = state.engine.get_all().to_vec();
    Json(AssessmentList {
        count: assessments.len(),
        assessments,
    })
}

pub async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Assessment>, ApiError> {
    state
        .engine
        .get_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("assessment {id} not found")))
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<AssessmentList>, ApiError> {
    if query.q.trim().is_empty() {
        return Err(ApiError::BadRequest("query parameter \"q\" is required".into()));
    }

    let assessments: Vec<Assessment> = state
        .engine
        .search_by_name(&query.q)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(AssessmentList {
        count: assessments.len(),
        assessments,
    }))
}
