use pycoupling::core::error::AnalysisError;
use pycoupling::core::FunctionKey;
use pycoupling::parsers::python::PythonParser;
use pycoupling::parsers::{FileAnalysis, LanguageParser};
use std::collections::BTreeSet;
use std::fs;

fn analyze(code: &str) -> FileAnalysis {
    PythonParser::new().analyze_source(code, "pkg/sample.py").unwrap()
}

fn key(name: &str) -> FunctionKey {
    FunctionKey::new("pkg/sample.py", name)
}

fn calls(analysis: &FileAnalysis, caller: &str) -> BTreeSet<String> {
    analysis.raw_calls.get(&key(caller)).cloned().unwrap_or_default()
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn python_parser_collects_definitions_including_async_and_methods() {
    let analysis = analyze(
        r#"
import os

class A(Base):
    """Doc for A"""
    def m(self, x):
        return helper(x)

async def fetch():
    await helper(1)

def helper(v):
    return v
"#,
    );

    let defined: Vec<_> = analysis.definitions.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(defined, vec!["fetch", "helper", "m"]);
    assert_eq!(calls(&analysis, "m"), names(&["helper"]));
    assert_eq!(calls(&analysis, "fetch"), names(&["helper"]));
    assert!(!analysis.raw_calls.contains_key(&key("helper")));
}

#[test]
fn python_parser_applies_call_target_precedence() {
    let analysis = analyze(
        r#"
def run(items, table):
    plain()
    self.method()
    os.path.join("a", "b")
    super().setup()
    make()()
    table["k"]()
    return [item.strip() for item in items]
"#,
    );

    assert_eq!(
        calls(&analysis, "run"),
        names(&["plain", "method", "join", "super", "setup", "make", "strip"])
    );
}

#[test]
fn python_parser_ignores_module_level_and_class_body_calls() {
    let analysis = analyze(
        r#"
setup_logging()

class Config:
    value = compute_default()

def main():
    run()

if __name__ == "__main__":
    main()
"#,
    );

    assert_eq!(analysis.raw_calls.len(), 1);
    assert_eq!(calls(&analysis, "main"), names(&["run"]));
}

#[test]
fn python_parser_attributes_nested_calls_to_innermost_function() {
    let analysis = analyze(
        r#"
def outer():
    before()
    def inner():
        nested_call()
    after()
    return inner
"#,
    );

    assert!(analysis.definitions.contains(&key("inner")));
    assert_eq!(calls(&analysis, "outer"), names(&["before", "after"]));
    assert_eq!(calls(&analysis, "inner"), names(&["nested_call"]));
}

#[test]
fn python_parser_attributes_decorators_and_defaults_to_the_function() {
    let analysis = analyze(
        r#"
@app.route("/")
@cached
def index(limit=default_limit()):
    return render()
"#,
    );

    assert_eq!(
        calls(&analysis, "index"),
        names(&["route", "default_limit", "render"])
    );
}

#[test]
fn python_parser_records_recursion() {
    let analysis = analyze(
        r#"
def fact(n):
    return 1 if n == 0 else n * fact(n - 1)
"#,
    );

    assert_eq!(calls(&analysis, "fact"), names(&["fact"]));
}

#[test]
fn python_parser_rejects_invalid_syntax() {
    let err = PythonParser::new()
        .analyze_source("def broken(:\n    pass\n", "bad.py")
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Parse { .. }));
}

#[test]
fn python_parser_reports_undecodable_file_as_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("latin1.py");
    fs::write(&file, b"def f():\n    return '\xff\xfe'\n").unwrap();

    let err = PythonParser::new().analyze_file(&file, "latin1.py").unwrap_err();
    match err {
        AnalysisError::Parse { path, .. } => assert_eq!(path, file),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn python_parser_handles_deep_nesting_in_decorated_functions() {
    let depth = 5_000;
    let nested = format!("{}leaf(){}", "wrap(".repeat(depth), ")".repeat(depth));
    let analysis = analyze(&format!(
        "def outer():\n    @register\n    @trace(level=1)\n    def inner():\n        return {nested}\n    after()\n"
    ));

    assert_eq!(calls(&analysis, "outer"), names(&["after"]));
    assert_eq!(calls(&analysis, "inner"), names(&["trace", "wrap", "leaf"]));
}
