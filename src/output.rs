//! Output rendering for lint results and the rule catalog.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-issue fields and a top-level summary; colors honor `NO_COLOR`.

use crate::models::{Issue, LintResult};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn location(issue: &Issue) -> String {
    match (&issue.file, issue.line) {
        (Some(file), Some(line)) => format!("{}:{}", file, line),
        (Some(file), None) => file.clone(),
        _ => "(project)".to_string(),
    }
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_lint_json(res)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for issue in &res.issues {
                let icon = if color {
                    "✖".red().to_string()
                } else {
                    "✖".to_string()
                };
                let loc = if color {
                    location(issue).bold().to_string()
                } else {
                    location(issue)
                };
                println!("{} {} ❲rule {}❳ — {}", icon, loc, issue.rule, issue.message);
            }
            let summary = format!(
                "— Summary — issues={} files={}",
                res.summary.issues, res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print the rule catalog with enabled status.
pub fn print_rules(catalog: &[(u32, &'static str, bool)], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_rules_json(catalog)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for &(id, name, enabled) in catalog {
                let status = if enabled { "on" } else { "off" };
                let status = if color {
                    if enabled {
                        status.green().to_string()
                    } else {
                        status.bright_black().to_string()
                    }
                } else {
                    status.to_string()
                };
                println!("rule {:>2}  {:<26} {}", id, name, status);
            }
        }
    }
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    // Directly serialize LintResult as JSON, keeping stable shape
    serde_json::to_value(res).unwrap()
}

/// Compose rule-catalog JSON object (pure) for testing/snapshot purposes.
pub fn compose_rules_json(catalog: &[(u32, &'static str, bool)]) -> JsonVal {
    let items: Vec<_> = catalog
        .iter()
        .map(|&(id, name, enabled)| json!({"rule": id, "name": name, "enabled": enabled}))
        .collect();
    json!({"rules": items})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Summary;

    #[test]
    fn test_compose_lint_json_shape() {
        let res = LintResult {
            issues: vec![
                Issue::at("main.c", 3, 26, "goto is banned".into()),
                Issue::project(0, "no lab number".into()),
            ],
            summary: Summary { issues: 2, files: 1 },
        };
        let out = compose_lint_json(&res);
        assert_eq!(out["summary"]["issues"], 2);
        assert_eq!(out["summary"]["files"], 1);
        assert_eq!(out["issues"][0]["file"], "main.c");
        assert_eq!(out["issues"][0]["line"], 3);
        assert_eq!(out["issues"][0]["rule"], 26);
        // Project-level findings omit file/line entirely.
        assert!(out["issues"][1].get("file").is_none());
        assert!(out["issues"][1].get("line").is_none());
        assert_eq!(out["issues"][1]["rule"], 0);
    }

    #[test]
    fn test_compose_rules_json_shape() {
        let catalog = [(4u32, "function-length", true), (15u32, "alloc-unchecked", false)];
        let out = compose_rules_json(&catalog);
        assert_eq!(out["rules"][0]["rule"], 4);
        assert_eq!(out["rules"][1]["enabled"], false);
    }

    #[test]
    fn test_location_rendering() {
        assert_eq!(location(&Issue::at("a.c", 7, 5, "m".into())), "a.c:7");
        assert_eq!(location(&Issue::project(0, "m".into())), "(project)");
    }
}
