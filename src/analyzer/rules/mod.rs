//! Dimension rules for test quality

pub mod completeness;
pub mod correctness;
pub mod maintainability;
pub mod vocabulary;

pub use completeness::CompletenessRule;
pub use correctness::CorrectnessRule;
pub use maintainability::MaintainabilityRule;

use crate::{Invocation, SourceMethod};
use serde::{Deserialize, Serialize};

/// Upper bound of every dimension score
pub const MAX_SCORE: f64 = 10.0;

/// Quality dimensions, each scored 0-10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Completeness,
    Correctness,
    Maintainability,
}

impl Dimension {
    /// Contribution of the dimension to the overall score
    pub fn weight(&self) -> f64 {
        match self {
            Dimension::Completeness => 0.4,
            Dimension::Correctness => 0.4,
            Dimension::Maintainability => 0.2,
        }
    }

    pub fn all() -> [Dimension; 3] {
        [
            Dimension::Completeness,
            Dimension::Correctness,
            Dimension::Maintainability,
        ]
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Completeness => write!(f, "Completeness"),
            Dimension::Correctness => write!(f, "Correctness"),
            Dimension::Maintainability => write!(f, "Maintainability"),
        }
    }
}

/// Score of one dimension plus the problems that lowered it
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    pub score: f64,
    pub problems: Vec<String>,
}

impl DimensionScore {
    /// Starting point: full marks, no problems
    pub fn perfect() -> Self {
        Self {
            score: MAX_SCORE,
            problems: Vec::new(),
        }
    }

    pub fn deduct(&mut self, points: f64, problem: impl Into<String>) {
        self.score -= points;
        self.problems.push(problem.into());
    }

    pub fn reward(&mut self, points: f64) {
        self.score += points;
    }

    /// Clamp once, after every check has run
    pub fn clamped(mut self) -> Self {
        self.score = clamp_score(self.score);
        self
    }
}

pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, MAX_SCORE)
}

/// Trait for dimension rules
pub trait DimensionRule: Send + Sync {
    /// Dimension this rule scores
    fn dimension(&self) -> Dimension;

    /// Score one method, starting from full marks
    fn score(&self, method: &SourceMethod) -> DimensionScore;
}

/// Invocations whose callee names an assertion API
pub fn assertions(method: &SourceMethod) -> impl Iterator<Item = &Invocation> {
    method
        .invocations
        .iter()
        .filter(|inv| inv.callee.contains(vocabulary::ASSERT_MARKER))
}
