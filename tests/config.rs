use pycoupling::core::error::AnalysisError;
use pycoupling::core::AnalysisConfig;
use std::fs;

#[test]
fn config_exemptions_follow_defaults() {
    let config = AnalysisConfig::default();
    assert!(config.is_exempt_from_dead_code("main"));
    assert!(config.is_exempt_from_dead_code("__init__"));
    assert!(config.is_exempt_from_dead_code("_helper"));
    assert!(!config.is_exempt_from_dead_code("compute"));

    let custom = AnalysisConfig::from_json(r#"{"entry_points": ["run"], "private_prefix": ""}"#)
        .unwrap();
    assert!(custom.is_exempt_from_dead_code("run"));
    assert!(!custom.is_exempt_from_dead_code("_helper"));
    assert_eq!(custom.coupling_threshold, 5);
}

#[test]
fn config_directory_and_suffix_rules() {
    let config = AnalysisConfig::default();
    assert!(config.is_excluded_dir(".git"));
    assert!(config.is_excluded_dir("__pycache__"));
    assert!(config.is_excluded_dir("node_modules"));
    assert!(!config.is_excluded_dir("environment"));
    assert!(config.is_source_file("app.py"));
    assert!(!config.is_source_file("app.pyc"));
}

#[test]
fn config_from_file_overrides_only_given_keys() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("pycoupling.json");
    fs::write(
        &path,
        r#"{"coupling_threshold": 3, "excluded_dirs": ["build"], "parallel": false}"#,
    )
    .unwrap();

    let config = AnalysisConfig::from_file(&path).unwrap();
    assert_eq!(config.coupling_threshold, 3);
    assert_eq!(config.excluded_dirs, vec!["build".to_string()]);
    assert!(!config.parallel);
    assert_eq!(config.source_suffix, ".py");
    assert_eq!(config.entry_points, AnalysisConfig::default().entry_points);
}

#[test]
fn config_from_missing_file_is_a_configuration_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = AnalysisConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, AnalysisError::Configuration(_)));
    assert!(err.is_fatal());
}

#[test]
fn config_from_invalid_file_is_a_configuration_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"coupling_threshold\": \"many\" ").unwrap();

    match AnalysisConfig::from_file(&path) {
        Err(AnalysisError::Configuration(msg)) => assert!(msg.contains("broken.json")),
        other => panic!("unexpected result: {other:?}"),
    }
}
