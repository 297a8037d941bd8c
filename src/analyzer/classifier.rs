//! Test classifier - decides which extracted methods are test cases

use super::rules::vocabulary::{TEST_ATTRIBUTE_MARKERS, TEST_NAME_PREFIXES};
use crate::SourceMethod;

/// Recognizes xUnit, NUnit and MSTest test methods by attribute or naming convention
pub struct TestClassifier;

impl TestClassifier {
    /// A method is a test when any attribute mentions Test/Fact/Theory,
    /// or its name starts with a conventional test prefix
    pub fn is_test(method: &SourceMethod) -> bool {
        Self::has_test_attribute(method) || Self::has_test_name(method)
    }

    fn has_test_attribute(method: &SourceMethod) -> bool {
        method.attributes.iter().any(|attribute| {
            TEST_ATTRIBUTE_MARKERS
                .iter()
                .any(|marker| attribute.contains(marker))
        })
    }

    fn has_test_name(method: &SourceMethod) -> bool {
        TEST_NAME_PREFIXES
            .iter()
            .any(|prefix| method.name.starts_with(prefix))
    }
}
