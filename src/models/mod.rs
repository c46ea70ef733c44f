//! Shared data models for lint output and review metadata.

pub mod review;

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A single reported violation with optional file/line attribution.
///
/// `file` is absent for project-level findings; `line` is absent when no
/// single line applies. Rule ids come from the external policy document
/// and are sparse; not every id in 0..=29 has a detector.
pub struct Issue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub rule: u32,
    pub message: String,
}

impl Issue {
    /// Finding attributed to a file and 1-based line.
    pub fn at(file: &str, line: usize, rule: u32, message: String) -> Self {
        Issue {
            file: Some(file.to_string()),
            line: Some(line),
            rule,
            message,
        }
    }

    /// Project-level finding with no file/line attribution.
    pub fn project(rule: u32, message: String) -> Self {
        Issue {
            file: None,
            line: None,
            rule,
            message,
        }
    }
}

#[derive(Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub issues: usize,
    pub files: usize,
}

#[derive(Serialize)]
/// Lint results container.
pub struct LintResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
