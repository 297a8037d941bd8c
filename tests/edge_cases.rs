//! Edge case tests: degenerate inputs must not panic.

use auditor::analyzer::AnalysisEngine;
use auditor::error::ExtractionError;
use auditor::parser::extract_methods;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn analyze_source(source: &str) -> Result<auditor::ProjectAnalysisResult, ExtractionError> {
    AnalysisEngine::new().analyze_source(source, Path::new("Scratch.Tests"))
}

fn project_with(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("Scratch.Tests.csproj"),
        "<Project Sdk=\"Microsoft.NET.Sdk\" />",
    )
    .unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

#[test]
fn empty_source_no_panic() {
    let r = analyze_source("").unwrap();
    assert!(r.test_results.is_empty());
    assert!(r.average_score.abs() < 1e-9);
}

#[test]
fn only_comments_no_crash() {
    let r = analyze_source("// nothing here\n/* or here */").unwrap();
    assert!(r.test_results.is_empty());
}

#[test]
fn syntax_error_is_reported() {
    let result = analyze_source("public class { void {{{ broken");
    assert!(matches!(result, Err(ExtractionError::Syntax { .. })));
}

#[test]
fn unclosed_parameter_list_is_syntax_error() {
    let source = "public class A\n{\n    public void TestX(\n    {\n    }\n}\n";
    match extract_methods(source) {
        Err(ExtractionError::Syntax { line, .. }) => assert!(line >= 1),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn byte_order_mark_is_ignored() {
    let source = "\u{feff}public class CartTests\n{\n    [Fact]\n    public void Adds() { Assert.Equal(2, 1 + 1); }\n}\n";
    let r = analyze_source(source).unwrap();
    assert_eq!(r.test_results.len(), 1);
    // Line of the declaration, attributes included
    assert_eq!(r.test_results[0].line, 3);
}

#[test]
fn method_outside_any_class() {
    // Top-level statements may declare local functions, never methods
    let r = analyze_source("System.Console.WriteLine(\"hi\");\n").unwrap();
    assert!(r.test_results.is_empty());
}

#[test]
fn interface_methods_without_body() {
    let source = "public interface ITestRunner\n{\n    [Test]\n    void TestRun();\n}\n";
    let methods = extract_methods(source).unwrap();
    assert_eq!(methods.len(), 1);
    assert!(methods[0].statements.is_empty());

    let r = analyze_source(source).unwrap();
    assert_eq!(r.test_results.len(), 1);
    let m = &r.test_results[0].metrics;
    assert!((0.0..=10.0).contains(&m.overall_score));
}

#[test]
fn expression_bodied_test() {
    let source = "public class MathTests\n{\n    [Fact]\n    public void Adds_ShouldSum() => Assert.Equal(4, Calc.Add(2, 2));\n}\n";
    let r = analyze_source(source).unwrap();
    assert_eq!(r.test_results.len(), 1);
    assert!(r.test_results[0]
        .metrics
        .problems
        .contains(&"Test only covers happy path".to_string()));
}

#[test]
fn large_file_no_panic() {
    let mut source = String::from("using Xunit;\n\npublic class ManyTests\n{\n");
    for i in 0..500 {
        source.push_str(&format!(
            "    [Fact]\n    public void Case{}_ShouldHold()\n    {{\n        Assert.Equal({}, Value({}));\n        Assert.NotNull(Value({}));\n    }}\n\n",
            i, i, i, i
        ));
    }
    source.push_str("}\n");
    let r = analyze_source(&source).unwrap();
    assert_eq!(r.test_results.len(), 500);
}

#[test]
fn deeply_nested_types_use_innermost_class() {
    let source = "namespace A { public class Outer { public class Inner { [Test] public void TestNested() { Assert.Pass(); } } } }";
    let methods = extract_methods(source).unwrap();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].class_name, "Inner");
}

#[test]
fn non_utf8_file_becomes_extraction_failure() {
    let dir = project_with(&[(
        "Good.cs",
        "public class GoodTests { [Fact] public void Works_ShouldPass() { Assert.True(Run()); Assert.False(Fail()); } }",
    )]);
    fs::write(dir.path().join("Binary.cs"), [0xffu8, 0xfe, 0x00, 0xc3, 0x28]).unwrap();
    let r = AnalysisEngine::new().analyze_project(dir.path()).unwrap();
    assert_eq!(r.files_analyzed, 2);
    assert_eq!(r.extraction_failures.len(), 1);
    assert!(r.extraction_failures[0].file_path.ends_with("Binary.cs"));
    assert_eq!(r.test_results.len(), 1);
}

#[test]
fn project_file_without_sources() {
    let dir = project_with(&[]);
    let r = AnalysisEngine::new()
        .analyze_project(&dir.path().join("Scratch.Tests.csproj"))
        .unwrap();
    assert_eq!(r.files_analyzed, 0);
    assert!(r.test_results.is_empty());
    assert_eq!(r.recommendations, vec!["No test methods found in this project."]);
}

#[test]
fn cancelled_run_stops() {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    let dir = project_with(&[("A.cs", "public class A { }")]);
    let engine = AnalysisEngine::new().with_cancel_flag(Arc::new(AtomicBool::new(true)));
    let result = engine.analyze_project(dir.path());
    assert!(matches!(
        result,
        Err(auditor::error::AnalysisError::Cancelled)
    ));
}

#[test]
fn try_finally_cleanup_is_not_a_swallowed_failure() {
    let source = r#"
public class StoreTests
{
    // Saved values survive a reload
    [Fact]
    public void Save_ShouldPersist()
    {
        var path = Path.GetTempFileName();
        try
        {
            new Store(path).Save("x");
        }
        finally
        {
            File.Delete(path);
        }
        Assert.True(Loaded(path));
        Assert.Equal("x", Read(path));
    }
}
"#;
    let r = analyze_source(source).unwrap();
    let problems = &r.test_results[0].metrics.problems;
    assert!(!problems.contains(&"Test designed to never fail".to_string()));
}

#[test]
fn try_catch_without_assertion_still_never_fails() {
    let source = r#"
public class StoreTests
{
    [Fact]
    public void Save_ShouldPersist()
    {
        try
        {
            new Store("p").Save("x");
        }
        catch (IOException)
        {
        }
    }
}
"#;
    let r = analyze_source(source).unwrap();
    let problems = &r.test_results[0].metrics.problems;
    assert!(problems.contains(&"Test designed to never fail".to_string()));
}
