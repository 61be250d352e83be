use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalogue::{CatalogueError, CatalogueStore};
use crate::matching::scoring::calculate_match_score;
use crate::text_index::{document, TextIndex};
use crate::{Assessment, RecommendationCriteria};

/// Text recommendations return between these many results whenever
/// enough candidates exist, regardless of the caller's top_n.
const TEXT_RESULT_MIN: usize = 5;
const TEXT_RESULT_MAX: usize = 10;

/// One structured recommendation: the original record plus its computed
/// score, serialised as a single flat mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAssessment {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub match_score: f64,
}

/// One text recommendation: the original record plus its cosine
/// similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarAssessment {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub similarity: f64,
}

/// Entry point for all callers. Owns the catalogue snapshot and the
/// text index fit on it; both are immutable for the engine's lifetime,
/// so shared read-only use needs no locking. Refreshing the catalogue
/// means constructing a new engine and swapping it in.
#[derive(Debug)]
pub struct RecommendationEngine {
    store: CatalogueStore,
    index: TextIndex,
}

impl RecommendationEngine {
    /// Load a catalogue source and fit the text index over it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        Ok(Self::from_store(CatalogueStore::load(path)?))
    }

    /// Build an engine from an in-memory catalogue.
    pub fn from_assessments(assessments: Vec<Assessment>) -> Self {
        Self::from_store(CatalogueStore::from_assessments(assessments))
    }

    fn from_store(store: CatalogueStore) -> Self {
        let documents: Vec<String> = store.get_all().iter().map(document).collect();
        let index = TextIndex::build(&documents);
        info!(
            assessments = store.len(),
            terms = index.vocabulary_len(),
            "recommendation engine ready"
        );
        Self { store, index }
    }

    /// Rank the catalogue against structured criteria and return the top
    /// `top_n` (all candidates when `top_n` exceeds the pool). Ids in
    /// `exclude_ids` are removed before scoring and never appear in the
    /// output. Stable sort keeps catalogue order among equal scores.
    pub fn recommend(
        &self,
        criteria: &RecommendationCriteria,
        top_n: usize,
    ) -> Vec<RankedAssessment> {
        let excluded: HashSet<&str> = criteria
            .exclude_ids
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();

        let mut ranked: Vec<RankedAssessment> = self
            .store
            .get_all()
            .iter()
            .filter(|a| !excluded.contains(a.id.as_str()))
            .map(|a| RankedAssessment {
                assessment: a.clone(),
                match_score: round2(calculate_match_score(a, criteria).total),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(top_n);
        ranked
    }

    /// Rank the catalogue against free text by vector similarity. Soft
    /// failures (empty query, empty catalogue, unbuilt index) return an
    /// empty list. The returned count is `top_n` clamped to [5, 10],
    /// bounded by the candidate count.
    pub fn recommend_from_text(&self, text: &str, top_n: usize) -> Vec<SimilarAssessment> {
        let similarities = self.index.similarities(text);
        if similarities.is_empty() {
            debug!("text query produced no candidates");
            return Vec::new();
        }

        let mut ranked: Vec<SimilarAssessment> = self
            .store
            .get_all()
            .iter()
            .zip(similarities)
            .map(|(a, similarity)| SimilarAssessment {
                assessment: a.clone(),
                similarity,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(top_n.clamp(TEXT_RESULT_MIN, TEXT_RESULT_MAX));
        ranked
    }

    pub fn get_all(&self) -> &[Assessment] {
        self.store.get_all()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Assessment> {
        self.store.get_by_id(id)
    }

    pub fn search_by_name(&self, term: &str) -> Vec<&Assessment> {
        self.store.search_by_name(term)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(id: &str, name: &str) -> Assessment {
        Assessment {
            id: id.into(),
            name: name.into(),
            ..Assessment::default()
        }
    }

    fn catalogue() -> Vec<Assessment> {
        vec![
            Assessment {
                duration_minutes: Some(20),
                target_roles: vec!["analyst".into()],
                use_cases: vec!["hiring".into()],
                ..assessment("A1", "Verify Numerical")
            },
            Assessment {
                duration_minutes: Some(45),
                target_roles: vec!["manager".into()],
                use_cases: vec!["development".into()],
                ..assessment("A2", "Occupational Personality Questionnaire")
            },
            Assessment {
                duration_minutes: Some(30),
                target_roles: vec!["all".into()],
                use_cases: vec!["hiring".into()],
                ..assessment("A3", "Situational Judgement Scenarios")
            },
        ]
    }

    #[test]
    fn recommend_sorts_by_score_descending() {
        let engine = RecommendationEngine::from_assessments(catalogue());
        let criteria = RecommendationCriteria {
            target_role: Some("analyst".into()),
            use_case: Some("hiring".into()),
            ..RecommendationCriteria::default()
        };

        let results = engine.recommend(&criteria, 10);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].assessment.id, "A1");
        assert_eq!(results[0].match_score, 100.0);
        assert_eq!(results[1].assessment.id, "A3");
        assert_eq!(results[1].match_score, 100.0);
        assert_eq!(results[2].assessment.id, "A2");
    }

    #[test]
    fn ties_preserve_catalogue_order() {
        let engine = RecommendationEngine::from_assessments(catalogue());
        let criteria = RecommendationCriteria {
            use_case: Some("hiring".into()),
            ..RecommendationCriteria::default()
        };

        let results = engine.recommend(&criteria, 10);

        // A1 and A3 both score 100; A1 comes first in the catalogue.
        assert_eq!(results[0].assessment.id, "A1");
        assert_eq!(results[1].assessment.id, "A3");
    }

    #[test]
    fn top_n_truncates_and_may_exceed_candidates() {
        let engine = RecommendationEngine::from_assessments(catalogue());
        let criteria = RecommendationCriteria {
            target_role: Some("manager".into()),
            ..RecommendationCriteria::default()
        };

        assert_eq!(engine.recommend(&criteria, 1).len(), 1);
        assert_eq!(engine.recommend(&criteria, 50).len(), 3);
        assert!(engine.recommend(&criteria, 0).is_empty());
    }

    #[test]
    fn excluded_ids_never_appear_regardless_of_score() {
        let engine = RecommendationEngine::from_assessments(catalogue());
        let criteria = RecommendationCriteria {
            target_role: Some("analyst".into()),
            exclude_ids: Some(vec!["A1".into()]),
            ..RecommendationCriteria::default()
        };

        let results = engine.recommend(&criteria, 10);

        assert!(results.iter().all(|r| r.assessment.id != "A1"));
    }

    #[test]
    fn excluding_the_only_candidate_yields_an_empty_list() {
        let engine = RecommendationEngine::from_assessments(vec![Assessment {
            target_roles: vec!["analyst".into()],
            ..assessment("A1", "Verify Numerical")
        }]);
        let criteria = RecommendationCriteria {
            target_role: Some("analyst".into()),
            exclude_ids: Some(vec!["A1".into()]),
            ..RecommendationCriteria::default()
        };

        assert!(engine.recommend(&criteria, 5).is_empty());
    }

    #[test]
    fn all_unset_criteria_rank_everything_at_zero() {
        let engine = RecommendationEngine::from_assessments(catalogue());

        let results = engine.recommend(&RecommendationCriteria::default(), 10);

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.match_score == 0.0));
        // Stable sort keeps catalogue order.
        let ids: Vec<&str> = results.iter().map(|r| r.assessment.id.as_str()).collect();
        assert_eq!(ids, ["A1", "A2", "A3"]);
    }

    #[test]
    fn scoring_does_not_mutate_the_stored_catalogue() {
        let engine = RecommendationEngine::from_assessments(catalogue());
        let before = engine.get_all().to_vec();

        let criteria = RecommendationCriteria {
            target_role: Some("analyst".into()),
            ..RecommendationCriteria::default()
        };
        let _ = engine.recommend(&criteria, 10);
        let _ = engine.recommend_from_text("numerical reasoning", 5);

        assert_eq!(engine.get_all(), before.as_slice());
    }

    #[test]
    fn text_recommendations_fail_softly() {
        let engine = RecommendationEngine::from_assessments(catalogue());
        assert!(engine.recommend_from_text("", 5).is_empty());
        assert!(engine.recommend_from_text("   ", 5).is_empty());

        let empty = RecommendationEngine::from_assessments(Vec::new());
        assert!(empty.recommend_from_text("numerical", 5).is_empty());
    }

    #[test]
    fn text_result_count_is_clamped_between_five_and_ten() {
        let assessments: Vec<Assessment> = (0..20)
            .map(|i| {
                Assessment {
                    description: Some(format!("assessment battery number {i}")),
                    ..assessment(&format!("A{i}"), &format!("Test {i}"))
                }
            })
            .collect();
        let engine = RecommendationEngine::from_assessments(assessments);

        assert_eq!(engine.recommend_from_text("battery", 3).len(), 5);
        assert_eq!(engine.recommend_from_text("battery", 7).len(), 7);
        assert_eq!(engine.recommend_from_text("battery", 50).len(), 10);
    }

    #[test]
    fn small_catalogues_return_every_candidate() {
        let engine = RecommendationEngine::from_assessments(catalogue());

        let results = engine.recommend_from_text("personality questionnaire", 3);

        assert_eq!(results.len(), 3);
    }

    #[test]
    fn verbatim_name_query_ranks_its_record_first() {
        let engine = RecommendationEngine::from_assessments(catalogue());

        let results = engine.recommend_from_text("Occupational Personality Questionnaire", 5);

        assert_eq!(results[0].assessment.id, "A2");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[test]
    fn accessors_pass_through_to_the_store() {
        let engine = RecommendationEngine::from_assessments(catalogue());

        assert_eq!(engine.get_all().len(), 3);
        assert_eq!(engine.get_by_id("A2").unwrap().id, "A2");
        assert!(engine.get_by_id("nope").is_none());
        assert_eq!(engine.search_by_name("verify").len(), 1);
    }
}
