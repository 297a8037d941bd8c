//! Configuration schema for .auditorrc.json

use crate::analyzer::rules::MAX_SCORE;
use crate::detector::project::{DEFAULT_EXCLUDED_DIRS, TEST_PROJECT_PATTERNS};
use serde::{Deserialize, Serialize};

/// Root config structure for .auditorrc.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Minimum average score (0-10); exit 1 if below
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Glob patterns for source files to skip
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Directory names never descended into (default: bin, obj)
    #[serde(default)]
    pub exclude_dirs: Vec<String>,

    /// Project-name fragments that mark a .csproj as a test project
    #[serde(default)]
    pub test_project_patterns: Vec<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<f64>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.exclude_dirs.is_empty() {
            self.exclude_dirs = base.exclude_dirs;
        }
        if self.test_project_patterns.is_empty() {
            self.test_project_patterns = base.test_project_patterns;
        }
    }

    /// Threshold must be a score
    pub fn validate(&self) -> Result<(), String> {
        match self.threshold {
            Some(t) if !(0.0..=MAX_SCORE).contains(&t) => Err(format!(
                "threshold must be between 0 and {}, got {}",
                MAX_SCORE, t
            )),
            _ => Ok(()),
        }
    }

    /// Excluded directory names: bin/obj always, plus any configured ones
    pub fn get_exclude_dirs(&self) -> Vec<&str> {
        let mut dirs = DEFAULT_EXCLUDED_DIRS.to_vec();
        for dir in &self.exclude_dirs {
            if !dirs.contains(&dir.as_str()) {
                dirs.push(dir.as_str());
            }
        }
        dirs
    }

    /// Test project name patterns, falling back to the built-in list
    pub fn get_test_project_patterns(&self) -> Vec<&str> {
        if self.test_project_patterns.is_empty() {
            TEST_PROJECT_PATTERNS.to_vec()
        } else {
            self.test_project_patterns
                .iter()
                .map(|s| s.as_str())
                .collect()
        }
    }
}
