use axum::Json;
use serde_json::json;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
    }))
}

pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Assessment Recommendation Engine API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "API documentation (this endpoint)",
            "GET /health": "Health check",
            "GET /assessments": "List all assessments in the catalogue",
            "GET /assessments/:id": "Get a specific assessment by id",
            "GET /assessments/search?q=<term>": "Search assessments by name or description",
            "GET /recommendations": "Recommendations via query parameters",
            "POST /recommendations": "Recommendations via JSON criteria body",
            "POST /text_recommendations": "Recommendations from free text or a job description",
        },
    }))
}
