//! Project resolution: source files of a project, project kind, and
//! discovery of test projects under a root directory.

use crate::config::{build_ignore_set, is_ignored, Config};
use crate::error::AnalysisError;
use crate::ProjectKind;
use globset::GlobSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Build output directories, never analyzed
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["bin", "obj"];

/// Project-name fragments that mark a test project
pub const TEST_PROJECT_PATTERNS: &[&str] =
    &["Test", "Tests", "Testing", "Spec", "Specs", "Specification"];

/// Package references that mark a test project
pub const TEST_PACKAGES: &[&str] = &[
    "Microsoft.NET.Test.Sdk",
    "NUnit",
    "xunit",
    "MSTest",
    "Moq",
    "FluentAssertions",
];

/// Project-name fragments (case-insensitive) of integration test projects
pub const INTEGRATION_MARKERS: &[&str] =
    &["Integration", "E2E", "EndToEnd", "Acceptance", "Functional"];

const SOURCE_EXTENSION: &str = "cs";
const PROJECT_EXTENSION: &str = "csproj";

/// Resolves project identifiers to files on disk
pub struct ProjectLocator {
    exclude_dirs: Vec<String>,
    test_project_patterns: Vec<String>,
    ignore_set: Option<GlobSet>,
}

impl ProjectLocator {
    pub fn new() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            test_project_patterns: TEST_PROJECT_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            ignore_set: None,
        }
    }

    /// Locator honoring the config's excluded dirs, ignore globs and project patterns
    pub fn with_config(config: &Config) -> Result<Self, AnalysisError> {
        let ignore_set = if config.ignore.is_empty() {
            None
        } else {
            Some(build_ignore_set(&config.ignore)?)
        };
        Ok(Self {
            exclude_dirs: config
                .get_exclude_dirs()
                .into_iter()
                .map(String::from)
                .collect(),
            test_project_patterns: config
                .get_test_project_patterns()
                .into_iter()
                .map(String::from)
                .collect(),
            ignore_set,
        })
    }

    /// Directory holding the project: the .csproj parent, or the directory itself
    pub fn project_dir(project: &Path) -> Result<PathBuf, AnalysisError> {
        if project.is_dir() {
            return Ok(project.to_path_buf());
        }
        if project.is_file() {
            let parent = match project.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            return Ok(parent);
        }
        Err(AnalysisError::project_not_found(project))
    }

    /// All C# source files of the project, sorted
    pub fn source_files(&self, project: &Path) -> Result<Vec<PathBuf>, AnalysisError> {
        let dir = Self::project_dir(project)?;

        let mut files: Vec<PathBuf> = WalkDir::new(&dir)
            .into_iter()
            .filter_entry(|e| !self.is_excluded_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| has_extension(p, SOURCE_EXTENSION))
            .filter(|p| !self.is_ignored(p))
            .collect();

        files.sort();
        Ok(files)
    }

    /// Every test project below `root`, sorted
    pub fn discover_test_projects(&self, root: &Path) -> Result<Vec<PathBuf>, AnalysisError> {
        if !root.is_dir() {
            return Err(AnalysisError::project_not_found(root));
        }

        let mut projects: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !self.is_excluded_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| has_extension(p, PROJECT_EXTENSION))
            .filter(|p| self.is_test_project(p))
            .collect();

        projects.sort();
        Ok(projects)
    }

    /// Name matches a test pattern, or the project references a test package
    pub fn is_test_project(&self, csproj: &Path) -> bool {
        let name = project_name(csproj);
        if self
            .test_project_patterns
            .iter()
            .any(|pattern| name.contains(pattern.as_str()))
        {
            return true;
        }

        match fs::read_to_string(csproj) {
            Ok(content) => TEST_PACKAGES.iter().any(|package| content.contains(package)),
            Err(e) => {
                tracing::debug!(project = %csproj.display(), error = %e, "unreadable project file");
                false
            }
        }
    }

    /// Integration when the project name carries an integration marker
    pub fn classify(project: &Path) -> ProjectKind {
        let name = project_name(project).to_lowercase();
        if INTEGRATION_MARKERS
            .iter()
            .any(|marker| name.contains(&marker.to_lowercase()))
        {
            ProjectKind::Integration
        } else {
            ProjectKind::Unit
        }
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude_dirs.iter().any(|d| d == name))
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_set
            .as_ref()
            .is_some_and(|set| is_ignored(path, set))
    }
}

impl Default for ProjectLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// File stem for a project file, directory name for a directory
fn project_name(project: &Path) -> String {
    let name = if has_extension(project, PROJECT_EXTENSION) {
        project.file_stem()
    } else {
        project.file_name()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
