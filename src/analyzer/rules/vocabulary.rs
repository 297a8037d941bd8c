//! Fixed vocabularies the dimension rules match against.
//!
//! All matching is substring matching; callers decide on case folding.

use regex::Regex;
use std::sync::OnceLock;

/// Marks an invocation or statement as an assertion
pub const ASSERT_MARKER: &str = "Assert";

/// Attribute substrings that mark a method as a test
pub const TEST_ATTRIBUTE_MARKERS: &[&str] = &["Test", "Fact", "Theory"];

/// Method-name prefixes that mark a method as a test
pub const TEST_NAME_PREFIXES: &[&str] = &["Test", "Should", "When", "Given"];

/// Lower-case edge-case terms, each counted at most once per method
pub const EDGE_CASE_TERMS: &[&str] = &[
    "null",
    "empty",
    "zero",
    "max",
    "min",
    "invalid",
    "negative",
    "boundary",
    "edge",
    "exception",
    "error",
];

/// Evidence that failure scenarios are exercised
pub const EXCEPTION_MARKERS: &[&str] = &["Throws", "Exception", "ShouldThrow", "ExpectedException"];

/// Assertions that hold regardless of the code under test (whitespace-free form)
pub const TRIVIAL_ASSERTIONS: &[&str] = &[
    "Assert.True(true)",
    "Assert.IsTrue(true)",
    "Assert.False(false)",
    "Assert.IsFalse(false)",
    "Assert.NotNull(null)",
    "Assert.IsNotNull(null)",
    "Assert.AreEqual(1,1)",
    "Assert.Equal(1,1)",
    "Assert.IsTrue(1==1)",
    "Assert.That(true,Is.True)",
];

/// The subset of trivial assertions that make a test unable to fail
pub const ALWAYS_TRUE_ASSERTIONS: &[&str] = &[
    "Assert.True(true)",
    "Assert.IsTrue(true)",
    "Assert.That(true,Is.True)",
];

/// Assertions that pass unless the code throws
pub const DOES_NOT_THROW_MARKERS: &[&str] = &["Assert.DoesNotThrow"];

/// Mocking-framework calls counted by the mock ratio
pub const MOCK_KEYWORDS: &[&str] = &["Mock", "Setup", "Verify", "It.IsAny", "Returns", "Callback"];

pub const MOCK_MARKER: &str = "Mock";

pub const VERIFY_MARKER: &str = "Verify";

/// Variable naming convention for observed results
pub const ACTUAL_MARKER: &str = "actual";

/// Member access operator, the denominator of the mock ratio
pub const MEMBER_ACCESS: char = '.';

/// Statement markers that count as test setup, besides object construction
pub const SETUP_MARKERS: &[&str] = &["Mock", "Setup"];

/// Operators that add a decision point
pub const DECISION_OPERATORS: &[&str] = &["&&", "||", "?"];

/// Name fragments that describe behavior
pub const DESCRIPTIVE_NAME_MARKERS: &[&str] = &["Should", "When", "Given", "If", "With"];

/// Name fragments typical of placeholder names
pub const GENERIC_NAME_PATTERNS: &[&str] = &["Test1", "Test", "Method1", "TestMethod"];

/// Matches the `new` keyword of an object construction (`new Foo()`, `new()`, `new[]`)
pub fn object_construction() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bnew\b").expect("valid object construction regex"))
}

/// Remove all whitespace so `Assert.True( true )` compares equal to `Assert.True(true)`
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
