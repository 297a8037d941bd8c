//! Test framework detection

use crate::parser::ast_helpers::{for_each_descendant, node_text};
use crate::TestFramework;
use tree_sitter::{Node, Tree};

/// Detects test frameworks from `using` directives and attributes
pub struct FrameworkDetector<'a> {
    source: &'a str,
}

impl<'a> FrameworkDetector<'a> {
    /// Create a new framework detector
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Detect the test framework used in the file
    pub fn detect(&self, tree: &Tree) -> TestFramework {
        if let Some(framework) = self.detect_from_usings(tree.root_node()) {
            return framework;
        }

        // Fall back to attribute names, e.g. global usings declared elsewhere
        self.detect_from_attributes(tree.root_node())
    }

    fn detect_from_usings(&self, root: Node) -> Option<TestFramework> {
        let mut found = None;
        for_each_descendant(root, &mut |node| {
            if found.is_some() || node.kind() != "using_directive" {
                return;
            }
            found = Self::framework_for_namespace(Self::imported_namespace(node_text(
                node,
                self.source,
            )));
        });
        found
    }

    /// `using static Xunit.Assert;` -> `Xunit.Assert`
    fn imported_namespace(directive: &str) -> &str {
        directive
            .split_whitespace()
            .last()
            .unwrap_or("")
            .trim_end_matches(';')
    }

    fn framework_for_namespace(namespace: &str) -> Option<TestFramework> {
        let in_namespace = |root: &str| {
            namespace == root
                || namespace
                    .strip_prefix(root)
                    .is_some_and(|rest| rest.starts_with('.'))
        };

        if in_namespace("Xunit") {
            Some(TestFramework::XUnit)
        } else if in_namespace("NUnit.Framework") {
            Some(TestFramework::NUnit)
        } else if in_namespace("Microsoft.VisualStudio.TestTools.UnitTesting") {
            Some(TestFramework::MsTest)
        } else {
            None
        }
    }

    fn detect_from_attributes(&self, root: Node) -> TestFramework {
        let mut found = TestFramework::Unknown;
        for_each_descendant(root, &mut |node| {
            if found != TestFramework::Unknown || node.kind() != "attribute" {
                return;
            }
            let Some(name) = node.child_by_field_name("name") else {
                return;
            };
            found = Self::framework_for_attribute(node_text(name, self.source));
        });
        found
    }

    fn framework_for_attribute(name: &str) -> TestFramework {
        let simple = name.rsplit('.').next().unwrap_or(name);
        let simple = simple.strip_suffix("Attribute").unwrap_or(simple);
        match simple {
            "Fact" | "Theory" => TestFramework::XUnit,
            "TestMethod" | "DataTestMethod" | "TestClass" => TestFramework::MsTest,
            "Test" | "TestCase" | "TestCaseSource" | "TestFixture" => TestFramework::NUnit,
            _ => TestFramework::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CSharpParser;

    fn detect(source: &str) -> TestFramework {
        let tree = CSharpParser::new().unwrap().parse(source).unwrap();
        FrameworkDetector::new(source).detect(&tree)
    }

    #[test]
    fn test_detect_xunit() {
        let source = "using System;\nusing Xunit;\n\npublic class A { [Fact] public void B() { } }";
        assert_eq!(detect(source), TestFramework::XUnit);
    }

    #[test]
    fn test_detect_nunit() {
        let source = "using NUnit.Framework;\n\n[TestFixture]\npublic class A { }";
        assert_eq!(detect(source), TestFramework::NUnit);
    }

    #[test]
    fn test_detect_mstest_in_namespace_block() {
        let source = r#"
namespace Shop.Tests
{
    using Microsoft.VisualStudio.TestTools.UnitTesting;

    [TestClass]
    public class CartTests { }
}
"#;
        assert_eq!(detect(source), TestFramework::MsTest);
    }

    #[test]
    fn test_detect_from_attributes_without_usings() {
        let source = "public class A { [Theory] public void B(int x) { } }";
        assert_eq!(detect(source), TestFramework::XUnit);

        let source = "public class A { [TestMethod] public void B() { } }";
        assert_eq!(detect(source), TestFramework::MsTest);

        let source = "public class A { [NUnit.Framework.Test] public void B() { } }";
        assert_eq!(detect(source), TestFramework::NUnit);
    }

    #[test]
    fn test_similar_namespace_is_not_a_match() {
        let source = "using XunitExtensions;\npublic class A { }";
        assert_eq!(detect(source), TestFramework::Unknown);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            detect("public class Calculator { public int Add(int a, int b) => a + b; }"),
            TestFramework::Unknown
        );
    }
}
