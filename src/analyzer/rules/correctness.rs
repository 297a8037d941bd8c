//! Correctness: can the test actually catch a regression?
//!
//! Flags tautological assertions, tests dominated by mock plumbing, tests that
//! only verify mocks, and tests that cannot fail.

use super::vocabulary::{
    normalize, object_construction, ACTUAL_MARKER, ALWAYS_TRUE_ASSERTIONS, ASSERT_MARKER,
    DOES_NOT_THROW_MARKERS, MEMBER_ACCESS, MOCK_KEYWORDS, MOCK_MARKER, TRIVIAL_ASSERTIONS,
    VERIFY_MARKER,
};
use super::{assertions, Dimension, DimensionRule, DimensionScore};
use crate::{SourceMethod, StatementKind};

const TRIVIAL_ASSERTION_DEDUCTION: f64 = 4.0;
const MOCK_ABUSE_DEDUCTION: f64 = 3.0;
const MOCK_RATIO_LIMIT: f64 = 0.7;
const NO_REAL_BEHAVIOR_DEDUCTION: f64 = 3.0;
const NEVER_FAILS_DEDUCTION: f64 = 5.0;

pub struct CorrectnessRule;

impl CorrectnessRule {
    pub fn new() -> Self {
        Self
    }

    fn has_trivial_assertions(method: &SourceMethod) -> bool {
        assertions(method).any(|assertion| {
            let normalized = normalize(&assertion.text);
            TRIVIAL_ASSERTIONS
                .iter()
                .any(|pattern| normalized.contains(pattern))
        })
    }

    /// Mock-framework calls relative to all member accesses; 0 without any access
    pub fn mock_ratio(method: &SourceMethod) -> f64 {
        let total_calls = method.text.matches(MEMBER_ACCESS).count();
        if total_calls == 0 {
            return 0.0;
        }
        let mock_calls: usize = MOCK_KEYWORDS
            .iter()
            .map(|keyword| method.text.matches(keyword).count())
            .sum();
        mock_calls as f64 / total_calls as f64
    }

    fn validates_real_behavior(method: &SourceMethod) -> bool {
        let text = &method.text;
        if text.contains(MOCK_MARKER)
            && !object_construction().is_match(text)
            && !text.contains(ACTUAL_MARKER)
        {
            return false;
        }
        assertions(method).any(|assertion| !assertion.text.contains(VERIFY_MARKER))
    }

    fn never_fails(method: &SourceMethod) -> bool {
        if DOES_NOT_THROW_MARKERS
            .iter()
            .any(|marker| method.text.contains(marker))
        {
            return true;
        }

        let normalized = normalize(&method.text);
        if ALWAYS_TRUE_ASSERTIONS
            .iter()
            .any(|pattern| normalized.contains(pattern))
        {
            return true;
        }

        // A try/catch that swallows failures without asserting anything
        method
            .statements
            .iter()
            .any(|s| s.kind == StatementKind::Try && !s.text.contains(ASSERT_MARKER))
    }
}

impl Default for CorrectnessRule {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionRule for CorrectnessRule {
    fn dimension(&self) -> Dimension {
        Dimension::Correctness
    }

    fn score(&self, method: &SourceMethod) -> DimensionScore {
        let mut result = DimensionScore::perfect();

        if Self::has_trivial_assertions(method) {
            result.deduct(TRIVIAL_ASSERTION_DEDUCTION, "Trivial assertions detected");
        }

        let ratio = Self::mock_ratio(method);
        if ratio > MOCK_RATIO_LIMIT {
            result.deduct(
                MOCK_ABUSE_DEDUCTION,
                format!("Mock abuse detected ({:.0}%)", ratio * 100.0),
            );
        }

        if !Self::validates_real_behavior(method) {
            result.deduct(
                NO_REAL_BEHAVIOR_DEDUCTION,
                "Test does not validate real code behavior",
            );
        }

        if Self::never_fails(method) {
            result.deduct(NEVER_FAILS_DEDUCTION, "Test designed to never fail");
        }

        result.clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(method: &SourceMethod) -> DimensionScore {
        CorrectnessRule::new().score(method)
    }

    #[test]
    fn test_assert_true_true_is_trivial_and_never_fails() {
        let method = SourceMethod::new("UserServiceTests", "Test1")
            .with_statement(StatementKind::Expression, "Assert.True(true);")
            .with_invocation("Assert.True", "Assert.True( true )")
            .with_text("[Fact]\npublic void Test1()\n{\n    Assert.True( true );\n}");

        let result = score(&method);

        assert!(result.score <= 6.0);
        assert!((result.score - 1.0).abs() < 1e-9);
        assert_eq!(
            result.problems,
            vec!["Trivial assertions detected", "Test designed to never fail"]
        );
    }

    #[test]
    fn test_try_without_assertion_never_fails() {
        let try_text = "try\n{\n    service.Run();\n}\ncatch (Exception)\n{\n}";
        let method = SourceMethod::new("RunnerTests", "TestSomething")
            .with_statement(StatementKind::Try, try_text)
            .with_statement(StatementKind::Block, "{\n    service.Run();\n}")
            .with_statement(StatementKind::Expression, "service.Run();")
            .with_statement(StatementKind::Block, "{\n}")
            .with_invocation("service.Run", "service.Run()")
            .with_text(format!("public void TestSomething()\n{{\n{}\n}}", try_text));

        let result = score(&method);

        assert!(result.score <= 5.0);
        assert!(result
            .problems
            .contains(&"Test designed to never fail".to_string()));
        // No assertions at all also fails the real-behavior check
        assert!(result
            .problems
            .contains(&"Test does not validate real code behavior".to_string()));
    }

    #[test]
    fn test_try_finally_cleanup_can_fail() {
        let try_text = "try { new Store(path).Save(\"x\"); } finally { File.Delete(path); }";
        let text = format!(
            "public void Save_ShouldPersist()\n{{\n{}\nAssert.True(File.Exists(path));\nAssert.Equal(\"x\", File.ReadAllText(path));\n}}",
            try_text
        );
        let method = SourceMethod::new("StoreTests", "Save_ShouldPersist")
            .documented()
            .with_statement(StatementKind::TryFinally, try_text)
            .with_statement(StatementKind::Expression, "File.Delete(path);")
            .with_statement(StatementKind::Expression, "Assert.True(File.Exists(path));")
            .with_invocation("Assert.True", "Assert.True(File.Exists(path))")
            .with_invocation("Assert.Equal", "Assert.Equal(\"x\", File.ReadAllText(path))")
            .with_text(text);

        assert!(!CorrectnessRule::never_fails(&method));
        let result = score(&method);
        assert!(!result
            .problems
            .contains(&"Test designed to never fail".to_string()));
    }

    #[test]
    fn test_try_with_assertion_can_fail() {
        let try_text = "try { sut.Run(); Assert.Fail(); } catch (InvalidOperationException) { }";
        let method = SourceMethod::new("A", "B")
            .with_statement(StatementKind::Try, try_text)
            .with_invocation("sut.Run", "sut.Run()")
            .with_invocation("Assert.Fail", "Assert.Fail()")
            .with_text(try_text);

        assert!(!CorrectnessRule::never_fails(&method));
    }

    #[test]
    fn test_does_not_throw_never_fails() {
        let method = SourceMethod::new("A", "B")
            .with_invocation("Assert.DoesNotThrow", "Assert.DoesNotThrow(() => sut.Run())")
            .with_text("Assert.DoesNotThrow(() => sut.Run());");
        assert!(CorrectnessRule::never_fails(&method));
    }

    #[test]
    fn test_mock_only_test() {
        let text = "var repo = Mock.Of<IRepo>();\nMock.Get(repo).Verify(r => r.Save(It.IsAny<User>()));";
        let method = SourceMethod::new("UserTests", "TestUser")
            .with_invocation("Mock.Of<IRepo>", "Mock.Of<IRepo>()")
            .with_invocation("Mock.Get(repo).Verify", "Mock.Get(repo).Verify(r => r.Save(It.IsAny<User>()))")
            .with_text(text);

        // Mock x2, Verify, It.IsAny over five member accesses
        assert!((CorrectnessRule::mock_ratio(&method) - 0.8).abs() < 1e-9);

        let result = score(&method);
        assert_eq!(
            result.problems,
            vec![
                "Mock abuse detected (80%)",
                "Test does not validate real code behavior"
            ]
        );
        assert!((result.score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_mock_with_construction_and_real_assertion_passes() {
        let text = "var repo = new Mock<IRepo>();\nvar sut = new UserService(repo.Object);\nvar user = sut.Create(\"ann\");\nAssert.Equal(\"ann\", user.Name);";
        let method = SourceMethod::new("UserServiceTests", "Create_ShouldReturnUser")
            .with_invocation("sut.Create", "sut.Create(\"ann\")")
            .with_invocation("Assert.Equal", "Assert.Equal(\"ann\", user.Name)")
            .with_text(text);

        let result = score(&method);
        assert_eq!(result.score, 10.0);
        assert!(result.problems.is_empty());
    }

    #[test]
    fn test_only_verify_assertions_fail_real_behavior() {
        let method = SourceMethod::new("A", "B")
            .with_invocation("Assert.That", "Assert.That(mock.Verify(), Is.True)")
            .with_text("var actual = Run(); Assert.That(mock.Verify(), Is.True);");
        assert!(!CorrectnessRule::validates_real_behavior(&method));
    }

    #[test]
    fn test_no_member_access_means_zero_ratio() {
        let method = SourceMethod::new("A", "B").with_text("Mock Setup Verify");
        assert_eq!(CorrectnessRule::mock_ratio(&method), 0.0);
    }
}
