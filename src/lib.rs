//! Auditor: Test Quality Auditor for C#
//!
//! This library statically scores C# test methods along three dimensions
//! (completeness, correctness, maintainability) and aggregates the scores per
//! project into an overall score with actionable recommendations.

pub mod analyzer;
pub mod config;
pub mod detector;
pub mod error;
pub mod parser;
pub mod reporter;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Structural view of one method, as produced by the method extractor.
///
/// Analyzers only ever read these fields; they never see parser types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMethod {
    /// Name of the innermost enclosing type ("Unknown" at top level)
    pub class_name: String,
    /// Method identifier
    pub name: String,
    /// Attribute names as written, in declaration order
    pub attributes: Vec<String>,
    /// Every statement in the method, nested ones included, in source order
    pub statements: Vec<Statement>,
    /// Every invocation expression in the method, in source order
    pub invocations: Vec<Invocation>,
    /// Whether a comment directly precedes the declaration
    pub has_documentation: bool,
    /// Full literal text of the method declaration
    pub text: String,
    /// Line of the declaration (1-indexed)
    pub line: usize,
}

impl SourceMethod {
    pub fn new(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            line: 1,
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn with_statement(mut self, kind: StatementKind, text: impl Into<String>) -> Self {
        self.statements.push(Statement {
            kind,
            text: text.into(),
        });
        self
    }

    pub fn with_invocation(mut self, callee: impl Into<String>, text: impl Into<String>) -> Self {
        self.invocations.push(Invocation {
            callee: callee.into(),
            text: text.into(),
        });
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn documented(mut self) -> Self {
        self.has_documentation = true;
        self
    }
}

/// One statement of a method body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    /// Literal statement text, untrimmed
    pub text: String,
}

/// Statement kinds the analyzers distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Expression,
    Declaration,
    If,
    For,
    ForEach,
    While,
    Do,
    Switch,
    /// `try` with at least one `catch` clause
    Try,
    /// `try` with only a `finally` clause
    TryFinally,
    Block,
    Return,
    Throw,
    Using,
    Other,
}

impl StatementKind {
    /// Statements that add a decision point to the method.
    /// `foreach` and `do` loops are not counted.
    pub fn is_branching(self) -> bool {
        matches!(
            self,
            StatementKind::If
                | StatementKind::For
                | StatementKind::While
                | StatementKind::Switch
                | StatementKind::Try
                | StatementKind::TryFinally
        )
    }
}

/// A call expression inside a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Callee expression text, e.g. `Assert.AreEqual` or `mock.Setup`
    pub callee: String,
    /// Full invocation text including arguments
    pub text: String,
}

/// Scores of one test method (each 0-10)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQualityMetrics {
    pub completeness: f64,
    pub correctness: f64,
    pub maintainability: f64,
    /// Weighted combination of the three dimensions
    pub overall_score: f64,
    /// Problems in the order the analyzers reported them
    pub problems: Vec<String>,
}

/// Analysis of a single test method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAnalysisResult {
    pub class_name: String,
    pub method_name: String,
    /// File the method was extracted from (absent for in-memory methods)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Line of the declaration (1-indexed)
    pub line: usize,
    pub metrics: TestQualityMetrics,
}

impl TestAnalysisResult {
    /// `Class.Method` display name
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class_name, self.method_name)
    }
}

/// Project classification, derived from naming conventions only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectKind {
    #[default]
    Unit,
    Integration,
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectKind::Unit => write!(f, "Unit"),
            ProjectKind::Integration => write!(f, "Integration"),
        }
    }
}

/// Detected C# test framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    XUnit,
    NUnit,
    MsTest,
    #[default]
    Unknown,
}

impl std::fmt::Display for TestFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestFramework::XUnit => write!(f, "xUnit"),
            TestFramework::NUnit => write!(f, "NUnit"),
            TestFramework::MsTest => write!(f, "MSTest"),
            TestFramework::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A file that could not be read or parsed; its methods are absent from the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionFailure {
    pub file_path: PathBuf,
    pub message: String,
}

/// The result of analyzing one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysisResult {
    /// Project identifier as given by the caller (.csproj file or directory)
    pub project_path: PathBuf,
    pub project_kind: ProjectKind,
    pub framework: TestFramework,
    /// One entry per method the test classifier accepted
    pub test_results: Vec<TestAnalysisResult>,
    /// Mean overall score (0 when no tests were found)
    pub average_score: f64,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub extraction_failures: Vec<ExtractionFailure>,
    /// Number of source files read, failed ones included
    pub files_analyzed: usize,
    /// RFC 3339 timestamp
    pub analyzed_at: String,
}

impl ProjectAnalysisResult {
    /// Tests whose overall score is below the low-score threshold
    pub fn low_scoring_tests(&self) -> impl Iterator<Item = &TestAnalysisResult> {
        self.test_results
            .iter()
            .filter(|t| t.metrics.overall_score < analyzer::scoring::LOW_SCORE_THRESHOLD)
    }
}

/// Public API: analyze one project (a `.csproj` file or a directory).
///
/// * `project` - project identifier
/// * `config_path` - optional path to .auditorrc.json; if None, searches from the project directory
pub fn analyze_project(
    project: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<ProjectAnalysisResult> {
    let work_dir = if project.is_file() {
        project.parent().unwrap_or(Path::new("."))
    } else {
        project
    };
    let config = config::load_config(work_dir, config_path)?;
    let engine = analyzer::AnalysisEngine::new().with_config(&config)?;
    Ok(engine.analyze_project(project)?)
}
