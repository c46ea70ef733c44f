//! Merge-request review metadata supplied by the caller.
//!
//! The engine itself is a pure text analyzer; these flags are the only
//! place project metadata enters the issue stream (as rule-0 findings).

#[derive(Debug, Default, Clone)]
/// Project-level conditions folded into the lint result.
pub struct ReviewStatus {
    /// Merge-request title, checked against the `lab <number>` pattern.
    pub title: Option<String>,
    /// The merge request has merge conflicts.
    pub has_conflicts: bool,
    /// The merge request has unresolved discussions.
    pub unresolved_discussions: bool,
}
