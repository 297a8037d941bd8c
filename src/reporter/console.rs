//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{ProjectAnalysisResult, TestAnalysisResult};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output (per-test problems)
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single project result
    pub fn report(&self, result: &ProjectAnalysisResult) {
        self.print_header(result);
        self.print_score(result);
        self.print_test_table(&result.test_results);
        self.print_failures(result);
        self.print_recommendations(result);
        self.print_attention(result);
        println!();
    }

    /// Report multiple projects with summary
    pub fn report_many(&self, results: &[ProjectAnalysisResult], stats: &AggregateStats) {
        for result in results {
            self.report(result);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, result: &ProjectAnalysisResult) {
        println!(
            "{}: {:.1} ({})",
            result.project_path.display(),
            result.average_score,
            self.colorize_status(result.average_score)
        );
    }

    fn print_header(&self, result: &ProjectAnalysisResult) {
        println!();
        println!(
            "{}",
            format!("📊 Test Quality Analysis: {}", result.project_path.display()).bold()
        );
        println!(
            "   Type: {} | Framework: {} | Files: {} | Tests: {}",
            result.project_kind,
            result.framework,
            result.files_analyzed,
            result.test_results.len()
        );
        println!();
    }

    fn print_score(&self, result: &ProjectAnalysisResult) {
        let bar = self.create_score_bar(result.average_score);
        println!(
            "   Score: {} {}",
            bar,
            self.colorize_status(result.average_score).bold()
        );
        println!();
    }

    /// Per-test table, best first
    fn print_test_table(&self, tests: &[TestAnalysisResult]) {
        if tests.is_empty() {
            return;
        }

        println!("   {}", "Tests:".bold());
        println!(
            "   {:<48} {:>7} {:>7} {:>7} {:>7}  {}",
            "Test".dimmed(),
            "Overall".dimmed(),
            "Compl.".dimmed(),
            "Corr.".dimmed(),
            "Maint.".dimmed(),
            "Status".dimmed()
        );

        let mut sorted: Vec<&TestAnalysisResult> = tests.iter().collect();
        sorted.sort_by(|a, b| {
            b.metrics
                .overall_score
                .total_cmp(&a.metrics.overall_score)
                .then_with(|| a.line.cmp(&b.line))
        });

        for test in sorted {
            let m = &test.metrics;
            println!(
                "   {:<48} {:>7.1} {:>7.1} {:>7.1} {:>7.1}  {}",
                truncate(&test.qualified_name(), 48),
                m.overall_score,
                m.completeness,
                m.correctness,
                m.maintainability,
                self.colorize_status(m.overall_score)
            );
            if self.verbose {
                for problem in &m.problems {
                    println!("       {} {}", "↳".dimmed(), problem.dimmed());
                }
            }
        }
        println!();
    }

    fn print_failures(&self, result: &ProjectAnalysisResult) {
        if result.extraction_failures.is_empty() {
            return;
        }

        println!("   {}", "Skipped files:".bold());
        for failure in &result.extraction_failures {
            println!(
                "   {} {} {}",
                "⚠".yellow(),
                failure.file_path.display(),
                failure.message.dimmed()
            );
        }
        println!();
    }

    fn print_recommendations(&self, result: &ProjectAnalysisResult) {
        if result.recommendations.is_empty() {
            return;
        }

        println!("   {}", "Recommendations:".bold());
        for rec in &result.recommendations {
            println!("   {} {}", "→".cyan(), rec);
        }
        println!();
    }

    /// Low-scoring tests with their problems
    fn print_attention(&self, result: &ProjectAnalysisResult) {
        let mut low: Vec<&TestAnalysisResult> = result.low_scoring_tests().collect();
        if low.is_empty() {
            return;
        }
        low.sort_by(|a, b| a.metrics.overall_score.total_cmp(&b.metrics.overall_score));

        println!("   {}", "Tests that need attention:".bold());
        for test in low {
            println!(
                "   {} {} ({:.1})",
                "✗".red(),
                test.qualified_name(),
                test.metrics.overall_score
            );
            for problem in &test.metrics.problems {
                println!("       {} {}", "→".dimmed(), problem);
            }
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Projects analyzed: {}",
            stats.projects_analyzed.to_string().bold()
        );
        println!("   Files analyzed:    {}", stats.files_analyzed);
        println!(
            "   Average score:     {} ({})",
            format!("{:.1}", stats.average_score).bold(),
            self.colorize_status(stats.average_score)
        );
        println!("   Total tests:       {}", stats.total_tests);
        println!("   Low-scoring tests: {}", stats.low_scoring_tests);
        if stats.extraction_failures > 0 {
            println!("   Skipped files:     {}", stats.extraction_failures);
        }
        println!();
    }

    fn colorize_status(&self, score: f64) -> colored::ColoredString {
        let label = ScoreCalculator::status_label(score);
        if !self.use_colors {
            return label.normal();
        }
        if score >= 8.0 {
            label.green().bold()
        } else if score >= 6.0 {
            label.green()
        } else if score >= 4.0 {
            label.yellow()
        } else {
            label.red()
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score * 2.0).round() as usize).min(20);
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>4.1}/10", "█".repeat(filled), "░".repeat(empty), score);

        if self.use_colors {
            if score >= 8.0 {
                bar.green().to_string()
            } else if score >= 6.0 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
