//! Golden-file test harness for GenZLang.
//!
//! Discovers `.input.gz` files under `tests/fixtures/`, transpiles them, and
//! compares the output against the corresponding `.expected.js` file.
//!
//! Set `GZ_UPDATE_FIXTURES=1` to overwrite expected files with actual output.

use std::path::{Path, PathBuf};

use gz_lexer::scan;
use gz_syntax::{GzSyntax, SegmentKind};
use gz_transpile::{check_javascript, transpile, transpile_for_execution};

fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR is crates/gz_test/, so go up two levels to workspace root.
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
}

fn collect_input_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir(dir)
        .into_iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".input.gz"))
        })
        .collect();
    files.sort();
    files
}

fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut result = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                result.extend(walkdir(&path));
            } else {
                result.push(path);
            }
        }
    }
    result
}

fn test_name(fixtures: &Path, path: &Path) -> String {
    path.strip_prefix(fixtures)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[test]
fn golden_file_tests() {
    let fixtures = fixtures_dir();
    let input_files = collect_input_files(&fixtures);

    assert!(
        !input_files.is_empty(),
        "No test fixtures found in {}",
        fixtures.display()
    );

    let update_mode = std::env::var("GZ_UPDATE_FIXTURES").is_ok();
    let mut failures = Vec::new();

    for input_path in &input_files {
        let expected_path = PathBuf::from(
            input_path
                .to_str()
                .unwrap()
                .replace(".input.gz", ".expected.js"),
        );
        let name = test_name(&fixtures, input_path);

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{name}: failed to read input: {e}"));
                continue;
            }
        };

        let actual = transpile(&source);

        if update_mode {
            if let Err(e) = std::fs::write(&expected_path, &actual) {
                failures.push(format!("{name}: failed to write expected: {e}"));
            }
            continue;
        }

        let expected = match std::fs::read_to_string(&expected_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!(
                    "{name}: missing expected file {}: {e}",
                    expected_path.display()
                ));
                continue;
            }
        };
        if actual.trim() != expected.trim() {
            failures.push(format!(
                "{name}: output mismatch\n--- expected ---\n{}\n--- actual ---\n{}",
                expected.trim(),
                actual.trim()
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} golden test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

#[test]
fn roundtrip_tests() {
    let fixtures = fixtures_dir();
    let mut failures = Vec::new();

    for input_path in collect_input_files(&fixtures) {
        let name = test_name(&fixtures, &input_path);
        let source = std::fs::read_to_string(&input_path).unwrap();

        for (label, js) in [
            ("plain", transpile(&source)),
            ("guarded", transpile_for_execution(&source)),
        ] {
            if let Err(e) = check_javascript(&js, &format!("{name}.{label}.js")) {
                failures.push(format!(
                    "{name}: {label} output is not valid JavaScript: {e}\n--- output ---\n{}",
                    js.trim()
                ));
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} roundtrip test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

/// Strings and comments survive transpilation byte for byte.
#[test]
fn boundary_preservation_tests() {
    let fixtures = fixtures_dir();
    let syntax = GzSyntax::default();

    for input_path in collect_input_files(&fixtures) {
        let name = test_name(&fixtures, &input_path);
        let source = std::fs::read_to_string(&input_path).unwrap();
        let output = transpile(&source);

        let concatenated: String = scan(&source, &syntax).iter().map(|s| s.text).collect();
        assert_eq!(concatenated, source, "{name}: scan is not lossless");

        let kept = |src: &str| -> Vec<String> {
            scan(src, &syntax)
                .into_iter()
                .filter(|s| !s.kind.is_code())
                .map(|s| s.text.to_string())
                .collect()
        };
        assert_eq!(kept(&source), kept(&output), "{name}: string or comment changed");
        assert!(
            scan(&source, &syntax)
                .iter()
                .any(|s| matches!(s.kind, SegmentKind::String | SegmentKind::Comment)),
            "{name}: fixture has no strings or comments"
        );
    }
}

#[test]
fn slang_free_source_is_unchanged() {
    let fixtures = fixtures_dir();
    for expected_path in walkdir(&fixtures)
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "js"))
    {
        let js = std::fs::read_to_string(&expected_path).unwrap();
        assert_eq!(
            transpile(&js),
            js,
            "{}",
            test_name(&fixtures, &expected_path)
        );
    }
}
