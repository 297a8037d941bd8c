//! Error types for the auditor library.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn one source file into method records.
///
/// Never fatal for a project run: the file is recorded and skipped.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file could not be read (missing, unreadable, not UTF-8).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The C# grammar could not be loaded into the parser.
    #[error("Failed to set C# language: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// tree-sitter returned no tree.
    #[error("Parser produced no syntax tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("Syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// Failures that abort an analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The project identifier does not name an existing file or directory.
    #[error("Project not found: {}", path.display())]
    ProjectNotFound { path: PathBuf },

    /// An ignore pattern from the configuration is not a valid glob.
    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// The run was cancelled between two files or projects.
    #[error("Analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn project_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ProjectNotFound { path: path.into() }
    }
}
