//! Analyzer module - test quality analysis engine

pub mod classifier;
pub mod engine;
pub mod rules;
pub mod scoring;

pub use classifier::TestClassifier;
pub use engine::{AggregateStats, AnalysisEngine};
pub use scoring::ScoreCalculator;
