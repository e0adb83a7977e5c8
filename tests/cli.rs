use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::TempDir;

fn fu() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fu"))
}

fn create_tree() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("src/bin")).unwrap();
    fs::write(root.join("Cargo.toml"), "[package]").unwrap();
    fs::write(root.join("src/lib.rs"), "").unwrap();
    fs::write(root.join("src/bin/main.rs"), "").unwrap();
    fs::write(root.join("notes.txt"), "").unwrap();
    let root = root.canonicalize().unwrap();
    (temp, root)
}

fn lines(output: &[u8]) -> Vec<String> {
    let mut lines: Vec<String> = String::from_utf8_lossy(output)
        .lines()
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}

#[test]
fn shows_help() {
    fu().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--suffix"))
        .stdout(predicate::str::contains("--parallel").not());
}

#[test]
fn shows_version() {
    fu().arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn suffix_search_prints_matches() {
    let (_temp, root) = create_tree();
    let output = fu().args(["-a", ".rs"]).arg(&root).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        lines(&output.stdout),
        vec![
            root.join("src/bin/main.rs").display().to_string(),
            root.join("src/lib.rs").display().to_string(),
        ]
    );
    // Not a terminal: no summary.
    assert!(output.stderr.is_empty());
}

#[test]
fn sequential_output_is_sorted_preorder() {
    let (_temp, root) = create_tree();
    let output = fu().args(["--seq", ""]).arg(&root).output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let got: Vec<&str> = stdout.lines().collect();
    let expected: Vec<String> = [
        root.clone(),
        root.join("Cargo.toml"),
        root.join("notes.txt"),
        root.join("src"),
        root.join("src/bin"),
        root.join("src/bin/main.rs"),
        root.join("src/lib.rs"),
    ]
    .iter()
    .map(|p| p.display().to_string())
    .collect();
    assert_eq!(got, expected);
}

#[test]
fn exclude_inverts_filters() {
    let (_temp, root) = create_tree();
    let output = fu().args(["-e", "-d", "-a", ".rs"]).arg(&root).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        lines(&output.stdout),
        vec![
            root.join("Cargo.toml").display().to_string(),
            root.join("notes.txt").display().to_string(),
        ]
    );
}

#[test]
fn fuzzy_search() {
    let (_temp, root) = create_tree();
    fu().args(["-f", "CGT"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cargo.toml"))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn overlapping_paths_are_searched_once() {
    let (_temp, root) = create_tree();
    let output = fu()
        .arg("lib.rs")
        .arg(root.join("src"))
        .arg(&root)
        .arg(root.join("src/bin"))
        .output()
        .unwrap();

    assert_eq!(lines(&output.stdout), vec![root.join("src/lib.rs").display().to_string()]);
}

#[test]
fn invalid_regex_fails() {
    let (_temp, root) = create_tree();
    let output = fu().args(["-r", "["]).arg(&root).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("fu: invalid regular expression"));
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn missing_path_fails() {
    let (_temp, root) = create_tree();
    fu().arg("x")
        .arg(root.join("does-not-exist"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot resolve path"));
}

#[test]
fn file_path_fails() {
    let (_temp, root) = create_tree();
    fu().arg("x")
        .arg(root.join("notes.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn invalid_duration_is_a_usage_error() {
    let (_temp, root) = create_tree();
    fu().args(["-o", "yesterday", "x"])
        .arg(&root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn closed_stdout_ends_quietly() {
    let temp = TempDir::new().unwrap();
    for d in 0..20 {
        let dir = temp.path().join(format!("d{d}"));
        fs::create_dir(&dir).unwrap();
        for f in 0..200 {
            fs::write(dir.join(format!("f{f}")), "").unwrap();
        }
    }

    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_fu"))
        .args(["--seq", ""])
        .arg(temp.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Read one line, then drop the reader to close the pipe.
    let mut first = String::new();
    let stdout = child.stdout.take().unwrap();
    BufReader::new(stdout).read_line(&mut first).unwrap();
    assert!(!first.is_empty());

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}
