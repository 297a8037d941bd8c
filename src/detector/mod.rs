//! Detector module for test frameworks and test projects

pub mod framework;
pub mod project;

pub use framework::FrameworkDetector;
pub use project::ProjectLocator;
