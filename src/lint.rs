//! Lint runner over a repository tree.
//!
//! Expands the configured glob patterns, analyzes each matched file with
//! the rule engine (files in parallel, since per-file analysis shares no
//! mutable state), and merges per-file findings with the optional
//! project-level checks into a `LintResult`.

use crate::config::Effective;
use crate::models::review::ReviewStatus;
use crate::models::{Issue, LintResult, Summary};
use crate::rules::project::ProjectChecks;
use crate::rules::RuleEngine;
use crate::utils;
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Run lint across files matched by the effective patterns.
///
/// Unreadable files are logged to stderr and skipped entirely: they are
/// excluded from the files count rather than treated as zero findings.
/// Per-file results are concatenated in sorted target order, so a run is
/// reproducible regardless of scheduling.
pub fn run_lint(eff: &Effective, review: Option<&ReviewStatus>) -> LintResult {
    let engine = RuleEngine::new(eff.enabled_rules.clone());

    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in &eff.patterns {
        let abs = eff.repo_root.join(pat);
        let pattern = abs.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(paths) => {
                for p in paths.flatten() {
                    if p.is_file() {
                        targets.push(p);
                    }
                }
            }
            Err(err) => {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    format!("skipping bad pattern '{}': {}", pat, err)
                );
            }
        }
    }
    targets.sort();
    targets.dedup();

    let per_file: Vec<Option<Vec<Issue>>> = targets
        .par_iter()
        .map(|path| {
            let display = display_path(&eff.repo_root, path);
            let data = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(err) => {
                    eprintln!(
                        "{} {}",
                        utils::note_prefix(),
                        format!("skipping '{}': {}", display, err)
                    );
                    return None;
                }
            };
            let lines: Vec<String> = data.lines().map(|l| l.to_string()).collect();
            Some(engine.analyze_file(&display, &lines))
        })
        .collect();

    let files = per_file.iter().filter(|r| r.is_some()).count();
    let mut issues: Vec<Issue> = per_file.into_iter().flatten().flatten().collect();

    if let Some(review) = review {
        issues.extend(ProjectChecks::new().check(review));
    }

    let total = issues.len();
    LintResult {
        issues,
        summary: Summary {
            issues: total,
            files,
        },
    }
}

/// Render a target path relative to the repository root when possible.
fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve_effective;
    use tempfile::tempdir;

    fn write(root: &Path, name: &str, content: &str) {
        fs::write(root.join(name), content).unwrap();
    }

    #[test]
    fn test_run_lint_over_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "main.c",
            "int main(void) {\n    int x = 42;\n    goto done;\ndone:\n    return x;\n}\n",
        );
        write(root, "clean.h", "int okName;\n");
        write(root, "notes.txt", "goto everywhere\n");

        let eff = resolve_effective(root.to_str(), &[], None, &[], &[]);
        let result = run_lint(&eff, None);

        assert_eq!(result.summary.files, 2);
        assert!(result.issues.iter().any(|i| i.rule == 5));
        assert!(result.issues.iter().any(|i| i.rule == 26));
        // Non-matching extensions are never analyzed.
        assert!(result
            .issues
            .iter()
            .all(|i| i.file.as_deref() != Some("notes.txt")));
        assert_eq!(result.summary.issues, result.issues.len());
    }

    #[test]
    fn test_review_status_folded_in() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "empty.c", "\n");

        let eff = resolve_effective(root.to_str(), &[], None, &[], &[]);
        let review = ReviewStatus {
            title: Some("cool changes".to_string()),
            has_conflicts: true,
            unresolved_discussions: false,
        };
        let result = run_lint(&eff, Some(&review));
        let project: Vec<_> = result.issues.iter().filter(|i| i.file.is_none()).collect();
        assert_eq!(project.len(), 2);
        assert!(project.iter().all(|i| i.rule == 0 && i.line.is_none()));
    }

    #[test]
    fn test_runs_are_reproducible() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "a.c", "int x = 7;\n");
        write(root, "b.c", "void f(void) {\n    exit(2);\n}\n");

        let eff = resolve_effective(root.to_str(), &[], None, &[], &[]);
        let first = run_lint(&eff, None);
        let second = run_lint(&eff, None);
        assert_eq!(first.issues, second.issues);
        assert_eq!(first.summary.files, 2);
    }
}
