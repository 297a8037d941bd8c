//! Completeness: does the test exercise more than the nominal path?
//!
//! Looks for edge-case vocabulary, failure scenarios and enough assertions
//! to pin down the behavior under test.

use super::vocabulary::{ASSERT_MARKER, EDGE_CASE_TERMS, EXCEPTION_MARKERS};
use super::{assertions, Dimension, DimensionRule, DimensionScore};
use crate::{SourceMethod, StatementKind};

const HAPPY_PATH_DEDUCTION: f64 = 4.0;
const NO_EDGE_CASES_DEDUCTION: f64 = 3.0;
const EDGE_CASE_BONUS: f64 = 1.0;
const EDGE_CASE_BONUS_MIN_HITS: usize = 3;
const FEW_ASSERTIONS_DEDUCTION: f64 = 2.0;
const MIN_ASSERTIONS: usize = 2;
const NO_EXCEPTION_DEDUCTION: f64 = 1.0;

pub struct CompletenessRule;

impl CompletenessRule {
    pub fn new() -> Self {
        Self
    }

    /// At most one assertion statement: only the nominal outcome is checked
    fn covers_only_happy_path(method: &SourceMethod) -> bool {
        let assertion_statements = method
            .statements
            .iter()
            .filter(|s| s.kind == StatementKind::Expression && s.text.contains(ASSERT_MARKER))
            .count();
        assertion_statements <= 1
    }

    /// Distinct edge-case terms in the lower-cased method text
    pub fn edge_case_hits(method: &SourceMethod) -> usize {
        let text = method.text.to_lowercase();
        EDGE_CASE_TERMS
            .iter()
            .filter(|term| text.contains(*term))
            .count()
    }

    fn tests_exceptions(method: &SourceMethod) -> bool {
        EXCEPTION_MARKERS
            .iter()
            .any(|marker| method.text.contains(marker))
    }
}

impl Default for CompletenessRule {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionRule for CompletenessRule {
    fn dimension(&self) -> Dimension {
        Dimension::Completeness
    }

    fn score(&self, method: &SourceMethod) -> DimensionScore {
        let mut result = DimensionScore::perfect();

        if Self::covers_only_happy_path(method) {
            result.deduct(HAPPY_PATH_DEDUCTION, "Test only covers happy path");
        }

        match Self::edge_case_hits(method) {
            0 => result.deduct(NO_EDGE_CASES_DEDUCTION, "No edge cases detected"),
            hits if hits >= EDGE_CASE_BONUS_MIN_HITS => result.reward(EDGE_CASE_BONUS),
            _ => {}
        }

        if assertions(method).count() < MIN_ASSERTIONS {
            result.deduct(
                FEW_ASSERTIONS_DEDUCTION,
                "Too few assertions to validate completely",
            );
        }

        if !Self::tests_exceptions(method) {
            result.deduct(NO_EXCEPTION_DEDUCTION, "No exception cases tested");
        }

        result.clamped()
    }
}
