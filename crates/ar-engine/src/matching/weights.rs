/// Dimension weights for the structured criteria scorer.
///
/// A dimension enters both the numerator and the denominator only when
/// the corresponding criteria field is set, so the final score
/// self-normalises: specifying fewer criteria narrows what is judged
/// instead of penalising candidates.
pub const MATCH_WEIGHTS: Weights = Weights {
    target_role: 30.0,
    competencies: 25.0,
    use_case: 20.0,
    assessment_type: 10.0,
    duration: 5.0,
    difficulty: 5.0,
    language: 5.0,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub target_role: f64,
    pub competencies: f64,
    pub use_case: f64,
    pub assessment_type: f64,
    pub duration: f64,
    pub difficulty: f64,
    pub language: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.target_role
            + self.competencies
            + self.use_case
            + self.assessment_type
            + self.duration
            + self.difficulty
            + self.language
    }
}
