//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::ProjectAnalysisResult;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single project result as JSON
    pub fn report(&self, result: &ProjectAnalysisResult) -> String {
        self.render(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Report multiple project results as JSON array
    pub fn report_many(&self, results: &[ProjectAnalysisResult]) -> String {
        self.render(&results).unwrap_or_else(|_| "[]".to_string())
    }

    /// Report with summary
    pub fn report_with_summary(
        &self,
        results: &[ProjectAnalysisResult],
        stats: &AggregateStats,
    ) -> String {
        let output = JsonOutput {
            results,
            summary: JsonSummary {
                projects_analyzed: stats.projects_analyzed,
                files_analyzed: stats.files_analyzed,
                total_tests: stats.total_tests,
                average_score: stats.average_score,
                low_scoring_tests: stats.low_scoring_tests,
                extraction_failures: stats.extraction_failures,
            },
        };
        self.render(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [ProjectAnalysisResult],
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    projects_analyzed: usize,
    files_analyzed: usize,
    total_tests: usize,
    average_score: f64,
    low_scoring_tests: usize,
    extraction_failures: usize,
}
