//! Maintainability: is the test easy to read and change?

use super::vocabulary::{
    object_construction, DECISION_OPERATORS, DESCRIPTIVE_NAME_MARKERS, GENERIC_NAME_PATTERNS,
    SETUP_MARKERS,
};
use super::{assertions, Dimension, DimensionRule, DimensionScore};
use crate::SourceMethod;
use std::collections::HashSet;

const DUPLICATION_DEDUCTION: f64 = 2.0;
const COMPLEXITY_LIMIT: usize = 10;
const COMPLEXITY_DEDUCTION: f64 = 3.0;
const MAX_ASSERTIONS: usize = 5;
const MULTIPLE_RESPONSIBILITIES_DEDUCTION: f64 = 2.0;
const SETUP_SHARE_LIMIT: f64 = 0.5;
const EXCESSIVE_SETUP_DEDUCTION: f64 = 1.0;
const NAMING_DEDUCTION: f64 = 1.0;
const DOCUMENTATION_DEDUCTION: f64 = 1.0;

pub struct MaintainabilityRule;

impl MaintainabilityRule {
    pub fn new() -> Self {
        Self
    }

    fn has_duplication(method: &SourceMethod) -> bool {
        let mut seen = HashSet::new();
        method
            .statements
            .iter()
            .any(|statement| !seen.insert(statement.text.trim()))
    }

    /// 1 + branching statements + decision operators in the text
    pub fn complexity(method: &SourceMethod) -> usize {
        let branches = method
            .statements
            .iter()
            .filter(|s| s.kind.is_branching())
            .count();
        let operators: usize = DECISION_OPERATORS
            .iter()
            .map(|op| method.text.matches(op).count())
            .sum();
        1 + branches + operators
    }

    fn has_excessive_setup(method: &SourceMethod) -> bool {
        let setup = method
            .statements
            .iter()
            .filter(|s| {
                object_construction().is_match(&s.text)
                    || SETUP_MARKERS.iter().any(|marker| s.text.contains(marker))
            })
            .count();
        setup as f64 > method.statements.len() as f64 * SETUP_SHARE_LIMIT
    }

    /// Names that say what behavior they check pass; placeholder names fail;
    /// anything else gets the benefit of the doubt
    pub fn has_descriptive_name(name: &str) -> bool {
        if DESCRIPTIVE_NAME_MARKERS
            .iter()
            .any(|marker| name.contains(marker))
        {
            return true;
        }
        !GENERIC_NAME_PATTERNS
            .iter()
            .any(|pattern| name.contains(pattern))
    }
}

impl Default for MaintainabilityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionRule for MaintainabilityRule {
    fn dimension(&self) -> Dimension {
        Dimension::Maintainability
    }

    fn score(&self, method: &SourceMethod) -> DimensionScore {
        let mut result = DimensionScore::perfect();

        if Self::has_duplication(method) {
            result.deduct(DUPLICATION_DEDUCTION, "Code duplication detected");
        }

        let complexity = Self::complexity(method);
        if complexity > COMPLEXITY_LIMIT {
            result.deduct(
                COMPLEXITY_DEDUCTION,
                format!("Test too complex (complexity: {})", complexity),
            );
        }

        if assertions(method).count() > MAX_ASSERTIONS {
            result.deduct(
                MULTIPLE_RESPONSIBILITIES_DEDUCTION,
                "Test with multiple responsibilities",
            );
        }

        if Self::has_excessive_setup(method) {
            result.deduct(EXCESSIVE_SETUP_DEDUCTION, "Excessive test setup");
        }

        if !Self::has_descriptive_name(&method.name) {
            result.deduct(NAMING_DEDUCTION, "Test name is not descriptive");
        }

        if !method.has_documentation {
            result.deduct(DOCUMENTATION_DEDUCTION, "Test without documentation");
        }

        result.clamped()
    }
}
