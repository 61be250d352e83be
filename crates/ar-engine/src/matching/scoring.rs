use std::collections::HashSet;

use super::weights::{Weights, MATCH_WEIGHTS};
use crate::{Assessment, RecommendationCriteria};

/// Outcome of one activated scoring dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    pub awarded: f64,
    pub weight: f64,
    pub status: &'static str,
    pub details: String,
}

impl DimensionScore {
    fn full(weight: f64, details: impl Into<String>) -> Self {
        Self {
            awarded: weight,
            weight,
            status: "PERFECT_MATCH",
            details: details.into(),
        }
    }

    fn partial(awarded: f64, weight: f64, details: impl Into<String>) -> Self {
        Self {
            awarded,
            weight,
            status: "PARTIAL_MATCH",
            details: details.into(),
        }
    }

    fn miss(weight: f64, details: impl Into<String>) -> Self {
        Self {
            awarded: 0.0,
            weight,
            status: "MISS",
            details: details.into(),
        }
    }
}

/// Per-dimension breakdown of one assessment against one criteria
/// object. A `None` dimension means the criteria field was unset and the
/// dimension was excluded from judging entirely.
#[derive(Debug, Clone, Default)]
pub struct MatchScore {
    /// Normalised 0-100 score over the activated dimensions; 0.0 when no
    /// dimension activated at all.
    pub total: f64,
    pub target_role: Option<DimensionScore>,
    pub competencies: Option<DimensionScore>,
    pub use_case: Option<DimensionScore>,
    pub assessment_type: Option<DimensionScore>,
    pub duration: Option<DimensionScore>,
    pub difficulty: Option<DimensionScore>,
    pub language: Option<DimensionScore>,
}

impl MatchScore {
    pub fn dimensions(&self) -> impl Iterator<Item = (&'static str, &DimensionScore)> {
        [
            ("target_role", &self.target_role),
            ("competencies", &self.competencies),
            ("use_case", &self.use_case),
            ("assessment_type", &self.assessment_type),
            ("duration", &self.duration),
            ("difficulty", &self.difficulty),
            ("language", &self.language),
        ]
        .into_iter()
        .filter_map(|(name, dim)| dim.as_ref().map(|d| (name, d)))
    }
}

/// Score one assessment against one criteria object, deterministically,
/// in [0, 100]. Never fails: unmatched criteria produce low or zero
/// scores, not errors.
pub fn calculate_match_score(
    assessment: &Assessment,
    criteria: &RecommendationCriteria,
) -> MatchScore {
    let weights = MATCH_WEIGHTS;

    let mut result = MatchScore {
        total: 0.0,
        target_role: score_target_role(assessment, criteria, &weights),
        competencies: score_competencies(assessment, criteria, &weights),
        use_case: score_use_case(assessment, criteria, &weights),
        assessment_type: score_assessment_type(assessment, criteria, &weights),
        duration: score_duration(assessment, criteria, &weights),
        difficulty: score_difficulty(assessment, criteria, &weights),
        language: score_language(assessment, criteria, &weights),
    };

    let mut score = 0.0;
    let mut max_score = 0.0;
    for (_, dim) in result.dimensions() {
        score += dim.awarded;
        max_score += dim.weight;
    }

    // All-unset criteria rank every assessment at 0, not 100.
    result.total = if max_score > 0.0 {
        (score / max_score) * 100.0
    } else {
        0.0
    };
    result
}

fn score_target_role(
    assessment: &Assessment,
    criteria: &RecommendationCriteria,
    weights: &Weights,
) -> Option<DimensionScore> {
    let wanted = criteria.target_role.as_deref()?;
    let weight = weights.target_role;
    let wanted_lower = wanted.to_lowercase();

    // The literal "all" is a wildcard entry matching any requested role.
    if assessment.target_roles.iter().any(|r| r == "all") {
        return Some(DimensionScore::full(weight, "role wildcard"));
    }
    if assessment
        .target_roles
        .iter()
        .any(|r| r.to_lowercase() == wanted_lower)
    {
        return Some(DimensionScore::full(
            weight,
            format!("role {wanted} listed"),
        ));
    }

    // Half credit when either string contains the other.
    let related = assessment.target_roles.iter().any(|r| {
        let role = r.to_lowercase();
        role.contains(&wanted_lower) || wanted_lower.contains(&role)
    });
    if related {
        return Some(DimensionScore::partial(
            weight / 2.0,
            weight,
            format!("role related to {wanted}"),
        ));
    }

    Some(DimensionScore::miss(
        weight,
        format!("role {wanted} not targeted"),
    ))
}

fn score_competencies(
    assessment: &Assessment,
    criteria: &RecommendationCriteria,
    weights: &Weights,
) -> Option<DimensionScore> {
    let required = criteria.competencies.as_ref()?;
    if required.is_empty() {
        // An empty list carries no requirement and activates nothing.
        return None;
    }
    let weight = weights.competencies;

    let required_set: HashSet<String> = required.iter().map(|c| c.to_lowercase()).collect();
    let available: HashSet<String> = assessment
        .competencies
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let overlap = required_set.intersection(&available).count();
    let awarded = weight * overlap as f64 / required_set.len() as f64;
    let details = format!("{overlap} of {} required competencies", required_set.len());

    Some(if overlap == required_set.len() {
        DimensionScore::full(weight, details)
    } else if overlap > 0 {
        DimensionScore::partial(awarded, weight, details)
    } else {
        DimensionScore::miss(weight, details)
    })
}

fn score_use_case(
    assessment: &Assessment,
    criteria: &RecommendationCriteria,
    weights: &Weights,
) -> Option<DimensionScore> {
    let wanted = criteria.use_case.as_deref()?;
    let weight = weights.use_case;
    let wanted_lower = wanted.to_lowercase();

    Some(
        if assessment
            .use_cases
            .iter()
            .any(|uc| uc.to_lowercase() == wanted_lower)
        {
            DimensionScore::full(weight, format!("supports {wanted}"))
        } else {
            DimensionScore::miss(weight, format!("{wanted} not supported"))
        },
    )
}

fn score_assessment_type(
    assessment: &Assessment,
    criteria: &RecommendationCriteria,
    weights: &Weights,
) -> Option<DimensionScore> {
    let wanted = criteria.assessment_type.as_deref()?;
    let weight = weights.assessment_type;

    let actual = assessment.assessment_type.as_deref().unwrap_or("");
    Some(if actual.to_lowercase() == wanted.to_lowercase() {
        DimensionScore::full(weight, format!("type {wanted}"))
    } else {
        DimensionScore::miss(weight, format!("type {actual:?} != {wanted}"))
    })
}

fn score_duration(
    assessment: &Assessment,
    criteria: &RecommendationCriteria,
    weights: &Weights,
) -> Option<DimensionScore> {
    let max_minutes = criteria.max_duration_minutes?;
    let weight = weights.duration;

    // Missing duration behaves as zero, which always fits.
    let duration = f64::from(assessment.duration_minutes.unwrap_or(0));
    let limit = f64::from(max_minutes);

    Some(if duration <= limit {
        DimensionScore::full(weight, format!("{duration} min within {max_minutes}"))
    } else if duration <= limit * 1.5 {
        DimensionScore::partial(
            weight / 2.0,
            weight,
            format!("{duration} min within 1.5x {max_minutes}"),
        )
    } else {
        DimensionScore::miss(weight, format!("{duration} min over {max_minutes}"))
    })
}

fn score_difficulty(
    assessment: &Assessment,
    criteria: &RecommendationCriteria,
    weights: &Weights,
) -> Option<DimensionScore> {
    let wanted = criteria.difficulty_level.as_deref()?;
    let weight = weights.difficulty;

    let actual = assessment.difficulty_level.as_deref().unwrap_or("");
    Some(if actual.to_lowercase() == wanted.to_lowercase() {
        DimensionScore::full(weight, format!("difficulty {wanted}"))
    } else {
        DimensionScore::miss(weight, format!("difficulty {actual:?} != {wanted}"))
    })
}

fn score_language(
    assessment: &Assessment,
    criteria: &RecommendationCriteria,
    weights: &Weights,
) -> Option<DimensionScore> {
    let wanted = criteria.language.as_deref()?;
    let weight = weights.language;
    let wanted_lower = wanted.to_lowercase();

    Some(
        if assessment
            .languages
            .iter()
            .any(|lang| lang.to_lowercase() == wanted_lower)
        {
            DimensionScore::full(weight, format!("available in {wanted}"))
        } else {
            DimensionScore::miss(weight, format!("not available in {wanted}"))
        },
    )
}
