//! Analysis engine - extracts, classifies and scores the tests of a project

use crate::config::Config;
use crate::detector::{FrameworkDetector, ProjectLocator};
use crate::error::{AnalysisError, ExtractionError};
use crate::parser::{parse_source, MethodExtractor};
use crate::{
    ExtractionFailure, ProjectAnalysisResult, SourceMethod, TestAnalysisResult, TestFramework,
};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::classifier::TestClassifier;
use super::rules::{CompletenessRule, CorrectnessRule, DimensionRule, MaintainabilityRule};
use super::ScoreCalculator;

/// Methods and framework of one successfully parsed file
struct FileExtraction {
    methods: Vec<SourceMethod>,
    framework: TestFramework,
}

/// Main analysis engine that orchestrates the dimension rules
pub struct AnalysisEngine {
    locator: ProjectLocator,
    completeness: CompletenessRule,
    correctness: CorrectnessRule,
    maintainability: MaintainabilityRule,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl AnalysisEngine {
    /// Create a new analysis engine with default project settings
    pub fn new() -> Self {
        Self {
            locator: ProjectLocator::new(),
            completeness: CompletenessRule::new(),
            correctness: CorrectnessRule::new(),
            maintainability: MaintainabilityRule::new(),
            cancel_flag: None,
        }
    }

    /// Apply excluded dirs, ignore globs and project patterns from config
    pub fn with_config(mut self, config: &Config) -> Result<Self, AnalysisError> {
        self.locator = ProjectLocator::with_config(config)?;
        Ok(self)
    }

    /// Abort between files and projects once the flag is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    pub fn locator(&self) -> &ProjectLocator {
        &self.locator
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn check_cancelled(&self) -> Result<(), AnalysisError> {
        if self.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        Ok(())
    }

    /// Analyze one project: a .csproj file or a directory of C# sources.
    ///
    /// A file that cannot be read or parsed is recorded in
    /// `extraction_failures` and the run continues.
    pub fn analyze_project(&self, project: &Path) -> Result<ProjectAnalysisResult, AnalysisError> {
        let files = self.locator.source_files(project)?;
        debug!(project = %project.display(), files = files.len(), "resolved project files");

        let outcomes = files
            .par_iter()
            .map(|path| {
                if self.is_cancelled() {
                    return Err(AnalysisError::Cancelled);
                }
                debug!(file = %path.display(), "extracting methods");
                Ok((path, Self::extract_file(path)))
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        let mut framework = TestFramework::Unknown;
        let mut failures = Vec::new();
        let mut tests = Vec::new();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(extraction) => {
                    if framework == TestFramework::Unknown {
                        framework = extraction.framework;
                    }
                    tests.extend(
                        extraction
                            .methods
                            .into_iter()
                            .filter(TestClassifier::is_test)
                            .map(|method| (path.clone(), method)),
                    );
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping file that failed extraction");
                    failures.push(ExtractionFailure {
                        file_path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let test_results: Vec<TestAnalysisResult> = tests
            .par_iter()
            .map(|(path, method)| {
                let mut result = self.analyze_method(method);
                result.file_path = Some(path.clone());
                result
            })
            .collect();

        let result = Self::build_result(
            project.to_path_buf(),
            framework,
            test_results,
            failures,
            files.len(),
        );
        info!(
            project = %project.display(),
            tests = result.test_results.len(),
            average = result.average_score,
            "project analyzed"
        );
        Ok(result)
    }

    /// Analyze in-memory C# source as a single-file project.
    /// `virtual_path` names the project for classification and reporting.
    pub fn analyze_source(
        &self,
        source: &str,
        virtual_path: &Path,
    ) -> Result<ProjectAnalysisResult, ExtractionError> {
        let extraction = Self::extract_source(source)?;
        let test_results: Vec<TestAnalysisResult> = extraction
            .methods
            .iter()
            .filter(|m| TestClassifier::is_test(m))
            .map(|m| self.analyze_method(m))
            .collect();

        Ok(Self::build_result(
            virtual_path.to_path_buf(),
            extraction.framework,
            test_results,
            Vec::new(),
            1,
        ))
    }

    /// Score a single method on all three dimensions
    pub fn analyze_method(&self, method: &SourceMethod) -> TestAnalysisResult {
        let metrics = ScoreCalculator::metrics(
            self.completeness.score(method),
            self.correctness.score(method),
            self.maintainability.score(method),
        );
        TestAnalysisResult {
            class_name: method.class_name.clone(),
            method_name: method.name.clone(),
            file_path: None,
            line: method.line,
            metrics,
        }
    }

    /// Discover every test project under `root` and analyze each.
    /// A project that fails is logged and skipped.
    pub fn analyze_all(&self, root: &Path) -> Result<Vec<ProjectAnalysisResult>, AnalysisError> {
        let projects = self.locator.discover_test_projects(root)?;
        info!(root = %root.display(), projects = projects.len(), "discovered test projects");

        let mut results = Vec::with_capacity(projects.len());
        for project in projects {
            self.check_cancelled()?;
            match self.analyze_project(&project) {
                Ok(result) => results.push(result),
                Err(AnalysisError::Cancelled) => return Err(AnalysisError::Cancelled),
                Err(e) => warn!(project = %project.display(), error = %e, "skipping project"),
            }
        }
        Ok(results)
    }

    /// Get aggregate stats from multiple project results
    pub fn aggregate_stats(results: &[ProjectAnalysisResult]) -> AggregateStats {
        let all_tests: Vec<TestAnalysisResult> = results
            .iter()
            .flat_map(|r| r.test_results.iter().cloned())
            .collect();

        AggregateStats {
            projects_analyzed: results.len(),
            files_analyzed: results.iter().map(|r| r.files_analyzed).sum(),
            total_tests: all_tests.len(),
            average_score: ScoreCalculator::average_score(&all_tests),
            low_scoring_tests: results.iter().map(|r| r.low_scoring_tests().count()).sum(),
            extraction_failures: results.iter().map(|r| r.extraction_failures.len()).sum(),
        }
    }

    fn extract_file(path: &Path) -> Result<FileExtraction, ExtractionError> {
        let source = fs::read_to_string(path)?;
        Self::extract_source(&source)
    }

    fn extract_source(source: &str) -> Result<FileExtraction, ExtractionError> {
        let (source, tree) = parse_source(source)?;
        Ok(FileExtraction {
            methods: MethodExtractor::new(source).extract(&tree),
            framework: FrameworkDetector::new(source).detect(&tree),
        })
    }

    fn build_result(
        project_path: PathBuf,
        framework: TestFramework,
        test_results: Vec<TestAnalysisResult>,
        extraction_failures: Vec<ExtractionFailure>,
        files_analyzed: usize,
    ) -> ProjectAnalysisResult {
        ProjectAnalysisResult {
            project_kind: ProjectLocator::classify(&project_path),
            project_path,
            framework,
            average_score: ScoreCalculator::average_score(&test_results),
            recommendations: ScoreCalculator::recommendations(&test_results),
            test_results,
            extraction_failures,
            files_analyzed,
            analyzed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics across projects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStats {
    pub projects_analyzed: usize,
    pub files_analyzed: usize,
    pub total_tests: usize,
    /// Mean overall score across every test of every project
    pub average_score: f64,
    pub low_scoring_tests: usize,
    pub extraction_failures: usize,
}
