//! Hygiene: source-level checks run as tests.
//!
//! Scans the crate's production sources for patterns that either crash the
//! host (panics) or drop errors silently. Every budget is zero; the engine
//! reports failure through its return values instead.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

struct Budget {
    pattern: &'static str,
    max: usize,
}

// Panics crash the host UI mid-gesture.
const PANICS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0 },
    Budget { pattern: ".expect(", max: 0 },
    Budget { pattern: "panic!(", max: 0 },
    Budget { pattern: "unreachable!(", max: 0 },
    Budget { pattern: "todo!(", max: 0 },
    Budget { pattern: "unimplemented!(", max: 0 },
];

// Silent loss: errors discarded without inspection.
const DISCARDS: &[Budget] = &[Budget { pattern: "let _ =", max: 0 }, Budget { pattern: ".ok()", max: 0 }];

/// Production `.rs` files under `src/`, skipping `*_test.rs` siblings.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check_budgets(budgets: &[Budget]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found under src/");
    let mut failures = Vec::new();
    for budget in budgets {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!("  `{}`: found {count}, max {}\n{}", budget.pattern, budget.max, detail.join("\n")));
        }
    }
    assert!(failures.is_empty(), "budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn panic_budgets() {
    check_budgets(PANICS);
}

#[test]
fn discard_budgets() {
    check_budgets(DISCARDS);
}

#[test]
fn no_allow_dead_code() {
    check_budgets(&[Budget { pattern: "#[allow(dead_code)]", max: 0 }]);
}

#[test]
fn library_does_not_print() {
    let files: Vec<SourceFile> = source_files().into_iter().filter(|f| !f.path.ends_with("main.rs")).collect();
    for pattern in ["println!(", "eprintln!(", "dbg!("] {
        let found = hits(&files, pattern);
        assert!(found.is_empty(), "`{pattern}` in library code, log with tracing instead: {found:?}");
    }
}

#[test]
fn declared_test_modules_exist() {
    let missing: Vec<String> = source_files()
        .iter()
        .filter(|f| !f.path.ends_with("lib.rs") && !f.path.ends_with("main.rs") && !f.path.ends_with("consts.rs"))
        .filter(|f| f.content.contains("#[cfg(test)]"))
        .filter_map(|f| {
            let sibling = f.path.trim_end_matches(".rs").to_owned() + "_test.rs";
            (!Path::new(&sibling).exists()).then_some(sibling)
        })
        .collect();
    assert!(missing.is_empty(), "test modules declared but missing: {missing:?}");
}
