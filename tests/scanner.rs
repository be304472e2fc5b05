use pycoupling::core::error::AnalysisError;
use pycoupling::core::{AnalysisConfig, FileScanner};
use std::fs;
use std::path::Path;

fn touch<P: AsRef<Path>>(p: P) {
    let p = p.as_ref();
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, "def f():\n    pass\n").unwrap();
}

#[test]
fn scanner_yields_only_source_suffix_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();

    touch(root.join("a/main.py"));
    touch(root.join("b/util.py"));
    touch(root.join("b/readme.txt"));
    touch(root.join("b/lib.rs"));

    let scanner = FileScanner::new(AnalysisConfig::default());
    let files = scanner.scan_directory(root).unwrap();

    let rel: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(rel, vec!["a/main.py", "b/util.py"]);
}

#[test]
fn scanner_prunes_hidden_and_denylisted_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();

    touch(root.join("app.py"));
    touch(root.join(".git/hooks/pre_commit.py"));
    touch(root.join("pkg/node_modules/dep.py"));
    touch(root.join("venv/lib/site.py"));
    touch(root.join("env/x.py"));
    touch(root.join("__pycache__/app.py"));
    touch(root.join("pkg/mod.py"));

    let scanner = FileScanner::new(AnalysisConfig::default());
    let files = scanner.scan_directory(root).unwrap();

    let rel: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(rel, vec!["app.py", "pkg/mod.py"]);
}

#[test]
fn scanner_exclusions_are_configurable() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();

    touch(root.join("build/gen.py"));
    touch(root.join("venv/kept.py"));

    let config = AnalysisConfig::default().with_excluded_dirs(vec!["build".to_string()]);
    let files = FileScanner::new(config).scan_directory(root).unwrap();

    let rel: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(rel, vec!["venv/kept.py"]);
}

#[test]
fn scanner_rejects_missing_root() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let scanner = FileScanner::new(AnalysisConfig::default());
    let err = scanner.scan_directory(&missing).unwrap_err();
    assert!(matches!(err, AnalysisError::Configuration(_)));
    assert!(err.is_fatal());
}

#[test]
fn scanner_rejects_file_as_root() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("single.py");
    touch(&file);

    let scanner = FileScanner::new(AnalysisConfig::default());
    assert!(matches!(
        scanner.scan_directory(&file),
        Err(AnalysisError::Configuration(_))
    ));
}

#[cfg(unix)]
#[test]
fn scanner_follows_file_symlinks_but_not_directory_symlinks() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::TempDir::new().unwrap();
    let outside = dir.path().join("outside");
    let root = dir.path().join("project");
    touch(outside.join("real.py"));
    touch(outside.join("lib/inner.py"));
    fs::create_dir_all(&root).unwrap();
    symlink(outside.join("real.py"), root.join("link.py")).unwrap();
    symlink(outside.join("lib"), root.join("linked_dir")).unwrap();

    let files = FileScanner::new(AnalysisConfig::default())
        .scan_directory(&root)
        .unwrap();

    let rel: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(rel, vec!["link.py"]);
}
