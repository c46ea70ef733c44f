//! Project-level findings folded into the issue stream as rule 0.
//!
//! These are the only findings derived from merge-request metadata rather
//! than source text, and they carry no file/line attribution. They are
//! kept outside the per-file registry: the caller decides whether review
//! metadata exists at all.

use crate::models::review::ReviewStatus;
use crate::models::Issue;
use regex::Regex;

pub struct ProjectChecks {
    lab_re: Regex,
}

impl ProjectChecks {
    pub fn new() -> Self {
        ProjectChecks {
            lab_re: Regex::new(r"(?i)\blab\s*\d+\b").unwrap(),
        }
    }

    /// Evaluate the caller-supplied review conditions.
    pub fn check(&self, status: &ReviewStatus) -> Vec<Issue> {
        let mut issues = Vec::new();
        if let Some(title) = status.title.as_deref() {
            if !self.lab_re.is_match(title) {
                issues.push(Issue::project(
                    0,
                    "Merge request title must mention the lab number (for example 'lab 1')"
                        .to_string(),
                ));
            }
        }
        if status.has_conflicts {
            issues.push(Issue::project(
                0,
                "Merge request has merge conflicts; resolve them before merging".to_string(),
            ));
        }
        if status.unresolved_discussions {
            issues.push(Issue::project(
                0,
                "Merge request has unresolved discussions; resolve them all before merging"
                    .to_string(),
            ));
        }
        issues
    }
}

impl Default for ProjectChecks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_lab_number_passes() {
        let checks = ProjectChecks::new();
        for title in ["lab 1", "Lab2 ready", "fixes for LAB 13"] {
            let status = ReviewStatus {
                title: Some(title.to_string()),
                ..Default::default()
            };
            assert!(checks.check(&status).is_empty(), "title: {}", title);
        }
    }

    #[test]
    fn test_title_without_lab_number_fires() {
        let status = ReviewStatus {
            title: Some("my changes".to_string()),
            ..Default::default()
        };
        let issues = ProjectChecks::new().check(&status);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, 0);
        assert_eq!(issues[0].file, None);
        assert_eq!(issues[0].line, None);
    }

    #[test]
    fn test_conflicts_and_discussions_fire() {
        let status = ReviewStatus {
            title: Some("lab 3".to_string()),
            has_conflicts: true,
            unresolved_discussions: true,
        };
        let issues = ProjectChecks::new().check(&status);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.rule == 0 && i.file.is_none()));
    }

    #[test]
    fn test_no_title_skips_title_check() {
        let issues = ProjectChecks::new().check(&ReviewStatus::default());
        assert!(issues.is_empty());
    }
}
