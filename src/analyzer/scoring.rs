//! Score calculation and project-level recommendations

use super::rules::{clamp_score, Dimension, DimensionScore};
use crate::{TestAnalysisResult, TestQualityMetrics};

/// Tests scoring below this overall value need attention
pub const LOW_SCORE_THRESHOLD: f64 = 5.0;

/// Mean dimension score below which a recommendation is emitted
const DIMENSION_RECOMMENDATION_THRESHOLD: f64 = 6.0;

pub const NO_TESTS_RECOMMENDATION: &str = "No test methods found in this project.";
pub const COMPLETENESS_RECOMMENDATION: &str = "Improve edge case coverage and error scenarios";
pub const CORRECTNESS_RECOMMENDATION: &str = "Review trivial assertions and reduce mock abuse";
pub const MAINTAINABILITY_RECOMMENDATION: &str =
    "Simplify complex tests and reduce code duplication";

/// Calculator for overall scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Weighted combination of the three dimension scores, clamped to 0-10
    pub fn overall(completeness: f64, correctness: f64, maintainability: f64) -> f64 {
        let weighted = Dimension::Completeness.weight() * completeness
            + Dimension::Correctness.weight() * correctness
            + Dimension::Maintainability.weight() * maintainability;
        clamp_score(weighted)
    }

    /// Combine dimension results; problems keep analyzer order
    pub fn metrics(
        completeness: DimensionScore,
        correctness: DimensionScore,
        maintainability: DimensionScore,
    ) -> TestQualityMetrics {
        let overall_score = Self::overall(
            completeness.score,
            correctness.score,
            maintainability.score,
        );
        let problems = completeness
            .problems
            .into_iter()
            .chain(correctness.problems)
            .chain(maintainability.problems)
            .collect();

        TestQualityMetrics {
            completeness: completeness.score,
            correctness: correctness.score,
            maintainability: maintainability.score,
            overall_score,
            problems,
        }
    }

    /// Mean overall score; 0 for an empty project
    pub fn average_score(results: &[TestAnalysisResult]) -> f64 {
        Self::mean(results, |m| m.overall_score)
    }

    fn mean(results: &[TestAnalysisResult], value: impl Fn(&TestQualityMetrics) -> f64) -> f64 {
        if results.is_empty() {
            return 0.0;
        }
        let total: f64 = results.iter().map(|r| value(&r.metrics)).sum();
        total / results.len() as f64
    }

    /// Project recommendations, in fixed order
    pub fn recommendations(results: &[TestAnalysisResult]) -> Vec<String> {
        if results.is_empty() {
            return vec![NO_TESTS_RECOMMENDATION.to_string()];
        }

        let mut recs = Vec::new();

        if Self::mean(results, |m| m.completeness) < DIMENSION_RECOMMENDATION_THRESHOLD {
            recs.push(COMPLETENESS_RECOMMENDATION.to_string());
        }

        if Self::mean(results, |m| m.correctness) < DIMENSION_RECOMMENDATION_THRESHOLD {
            recs.push(CORRECTNESS_RECOMMENDATION.to_string());
        }

        if Self::mean(results, |m| m.maintainability) < DIMENSION_RECOMMENDATION_THRESHOLD {
            recs.push(MAINTAINABILITY_RECOMMENDATION.to_string());
        }

        let low_scoring = results
            .iter()
            .filter(|r| r.metrics.overall_score < LOW_SCORE_THRESHOLD)
            .count();
        if low_scoring > 0 {
            recs.push(format!("Review {} tests with low scores", low_scoring));
        }

        recs
    }

    /// Human-readable status for a score
    pub fn status_label(score: f64) -> &'static str {
        if score >= 8.0 {
            "Excellent"
        } else if score >= 6.0 {
            "Good"
        } else if score >= 4.0 {
            "Fair"
        } else {
            "Needs improvement"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(completeness: f64, correctness: f64, maintainability: f64) -> TestAnalysisResult {
        TestAnalysisResult {
            class_name: "SampleTests".to_string(),
            method_name: "Should_Work".to_string(),
            file_path: None,
            line: 1,
            metrics: TestQualityMetrics {
                completeness,
                correctness,
                maintainability,
                overall_score: ScoreCalculator::overall(completeness, correctness, maintainability),
                problems: Vec::new(),
            },
        }
    }

    #[test]
    fn test_overall_weighting() {
        let overall = ScoreCalculator::overall(5.0, 10.0, 0.0);
        assert!((overall - 6.0).abs() < 1e-9);
        assert_eq!(ScoreCalculator::overall(10.0, 10.0, 10.0), 10.0);
        assert_eq!(ScoreCalculator::overall(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_metrics_problem_order() {
        let metrics = ScoreCalculator::metrics(
            DimensionScore { score: 6.0, problems: vec!["c".into()] },
            DimensionScore { score: 5.0, problems: vec!["co".into()] },
            DimensionScore { score: 9.0, problems: vec!["m1".into(), "m2".into()] },
        );
        assert_eq!(metrics.problems, vec!["c", "co", "m1", "m2"]);
        assert!((metrics.overall_score - 6.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_project() {
        assert_eq!(ScoreCalculator::average_score(&[]), 0.0);
        assert_eq!(
            ScoreCalculator::recommendations(&[]),
            vec![NO_TESTS_RECOMMENDATION.to_string()]
        );
    }

    #[test]
    fn test_healthy_project_has_no_recommendations() {
        let results = vec![result(8.0, 9.0, 7.0), result(7.0, 10.0, 9.0)];
        assert!(ScoreCalculator::recommendations(&results).is_empty());
    }

    #[test]
    fn test_low_score_count() {
        let results = vec![
            result(2.0, 1.0, 8.0),
            result(3.0, 4.0, 5.0),
            result(9.0, 9.0, 9.0),
        ];
        let recs = ScoreCalculator::recommendations(&results);
        assert_eq!(
            recs,
            vec![
                COMPLETENESS_RECOMMENDATION.to_string(),
                CORRECTNESS_RECOMMENDATION.to_string(),
                "Review 2 tests with low scores".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_low_score_recommendation_at_threshold() {
        // overall exactly 5.0 is not low
        let results = vec![result(5.0, 5.0, 5.0)];
        let recs = ScoreCalculator::recommendations(&results);
        assert!(!recs.iter().any(|r| r.ends_with("tests with low scores")));
        assert!(recs.contains(&CORRECTNESS_RECOMMENDATION.to_string()));
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_average_score() {
        let results = vec![result(10.0, 10.0, 10.0), result(0.0, 0.0, 0.0)];
        assert!((ScoreCalculator::average_score(&results) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(ScoreCalculator::status_label(9.1), "Excellent");
        assert_eq!(ScoreCalculator::status_label(8.0), "Excellent");
        assert_eq!(ScoreCalculator::status_label(6.5), "Good");
        assert_eq!(ScoreCalculator::status_label(4.0), "Fair");
        assert_eq!(ScoreCalculator::status_label(3.99), "Needs improvement");
    }
}
