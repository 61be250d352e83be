pub mod scoring;
pub mod weights;

pub use scoring::{calculate_match_score, DimensionScore, MatchScore};
pub use weights::{Weights, MATCH_WEIGHTS};
