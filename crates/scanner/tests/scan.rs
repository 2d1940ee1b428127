use codegraph_scanner::{FileScanner, ScanError, ScanOptions};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn touch(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn relative(root: &Path, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn finds_go_files_in_sorted_order() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    touch(root, "main.go", "package main\n");
    touch(root, "b/b.go", "package b\n");
    touch(root, "a/z.go", "package a\n");
    touch(root, "a/a.go", "package a\n");
    touch(root, "a/a_test.go", "package a\n");
    touch(root, "vendor/dep/dep.go", "package dep\n");
    touch(root, "a/vendor/x.go", "package x\n");
    touch(root, "go.mod", "module example\n");

    let files = FileScanner::new(root).scan().unwrap();

    assert_eq!(
        relative(root, &files),
        vec!["a/a.go", "a/z.go", "b/b.go", "main.go"]
    );
}

#[test]
fn gitignore_is_opt_in() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    touch(root, ".gitignore", "gen/\n");
    touch(root, "gen/gen.go", "package gen\n");
    touch(root, "main.go", "package main\n");

    let all = FileScanner::new(root).scan().unwrap();
    assert_eq!(relative(root, &all), vec!["gen/gen.go", "main.go"]);

    let options = ScanOptions {
        respect_gitignore: true,
        ..Default::default()
    };
    let filtered = FileScanner::new(root).with_options(options).scan().unwrap();
    assert_eq!(relative(root, &filtered), vec!["main.go"]);
}

#[test]
fn hidden_directories_and_size_limit() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    touch(root, ".tools/tool.go", "package tools\n");
    touch(root, "big.go", &format!("package big\n{}", "// pad\n".repeat(100)));
    touch(root, "small.go", "package small\n");

    let all = FileScanner::new(root).scan().unwrap();
    assert_eq!(relative(root, &all), vec![".tools/tool.go", "big.go", "small.go"]);

    let options = ScanOptions {
        include_hidden: false,
        max_file_size_bytes: Some(64),
        ..Default::default()
    };
    let filtered = FileScanner::new(root).with_options(options).scan().unwrap();
    assert_eq!(relative(root, &filtered), vec!["small.go"]);
}

#[test]
fn missing_root_is_an_error() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nope");
    let err = FileScanner::new(&missing).scan().unwrap_err();
    assert!(matches!(err, ScanError::InvalidRoot(_)));

    let file = temp.path().join("file.go");
    fs::write(&file, "package x\n").unwrap();
    assert!(matches!(
        FileScanner::new(&file).scan(),
        Err(ScanError::InvalidRoot(_))
    ));
}
