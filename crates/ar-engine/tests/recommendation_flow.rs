use std::io::Write;

use ar_engine::{CatalogueError, RecommendationCriteria, RecommendationEngine};

const CATALOGUE: &str = r#"{
  "assessments": [
    {
      "id": "VN1",
      "name": "Verify Numerical Reasoning",
      "url": "https://example.com/products/verify-numerical",
      "type": "cognitive",
      "description": "Timed numerical reasoning test for data-driven roles",
      "duration_minutes": 20,
      "difficulty_level": "intermediate",
      "target_roles": ["analyst", "finance"],
      "competencies": ["numerical reasoning", "attention to detail"],
      "use_cases": ["hiring"],
      "languages": ["en", "de"]
    },
    {
      "id": "OPQ32",
      "name": "Occupational Personality Questionnaire",
      "url": "https://example.com/products/opq32",
      "type": "personality",
      "description": "Workplace personality profile across 32 dimensions",
      "duration_minutes": 45,
      "difficulty_level": "intermediate",
      "target_roles": ["all"],
      "competencies": ["teamwork", "leadership", "resilience"],
      "use_cases": ["hiring", "development"],
      "languages": ["en", "fr", "de"]
    },
    {
      "id": "SJT1",
      "name": "Customer Service Situational Judgement",
      "type": "situational",
      "description": "Scenario-based judgement exercise for customer facing staff",
      "duration_minutes": 30,
      "target_roles": ["customer service", "sales"],
      "use_cases": ["hiring", "promotion"],
      "languages": ["en"]
    }
  ]
}"#;

fn write_catalogue(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_and_recommends_end_to_end() {
    let file = write_catalogue(CATALOGUE);
    let engine = RecommendationEngine::load(file.path()).unwrap();

    let criteria = RecommendationCriteria {
        target_role: Some("analyst".into()),
        use_case: Some("hiring".into()),
        max_duration_minutes: Some(30),
        ..RecommendationCriteria::default()
    };
    let results = engine.recommend(&criteria, 2);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].assessment.id, "VN1");
    assert_eq!(results[0].match_score, 100.0);
}

#[test]
fn identical_sources_produce_identical_engines() {
    let first = write_catalogue(CATALOGUE);
    let second = write_catalogue(CATALOGUE);

    let engine_a = RecommendationEngine::load(first.path()).unwrap();
    let engine_b = RecommendationEngine::load(second.path()).unwrap();

    let criteria = RecommendationCriteria {
        target_role: Some("sales".into()),
        language: Some("en".into()),
        ..RecommendationCriteria::default()
    };
    assert_eq!(
        engine_a.recommend(&criteria, 10),
        engine_b.recommend(&criteria, 10)
    );

    let query = "personality questionnaire for leadership development";
    assert_eq!(
        engine_a.recommend_from_text(query, 10),
        engine_b.recommend_from_text(query, 10)
    );
}

#[test]
fn text_query_matches_the_right_product() {
    let file = write_catalogue(CATALOGUE);
    let engine = RecommendationEngine::load(file.path()).unwrap();

    let results = engine.recommend_from_text("Customer Service Situational Judgement", 5);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].assessment.id, "SJT1");
    assert!(results[0].similarity > results[1].similarity);
    assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.similarity)));
}

#[test]
fn missing_source_fails_construction() {
    let err = RecommendationEngine::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CatalogueError::NotFound { .. }));
}

#[test]
fn ranked_results_serialise_as_flat_mappings() {
    let file = write_catalogue(CATALOGUE);
    let engine = RecommendationEngine::load(file.path()).unwrap();

    let criteria = RecommendationCriteria {
        target_role: Some("analyst".into()),
        ..RecommendationCriteria::default()
    };
    let results = engine.recommend(&criteria, 1);
    let json = serde_json::to_value(&results[0]).unwrap();

    assert_eq!(json["id"], "VN1");
    assert_eq!(json["type"], "cognitive");
    assert_eq!(json["match_score"], 100.0);
}
