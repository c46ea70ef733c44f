//! Rule catalog and the engine that runs it.
//!
//! Every rule is an independent detector over shared derived structures
//! (stripped lines, located function spans). Detectors never fail:
//! malformed or unparsable constructs simply do not match and produce no
//! finding. Rule ids come from an external policy document; the numbering
//! is sparse and occasionally reused (rule 0 also covers merge-request
//! policy, see `project`), and is treated as opaque here.
//!
//! Rules organized by scope:
//! - `line`: single-line detectors (0, 2, 3, 5, 21)
//! - `function`: span detectors (4, 8, 10, 12, 14, 15, 18, 25, 26)
//! - `file`: file-prefix region detector (27)
//! - `project`: merge-request metadata findings (0), outside the registry

pub mod file;
pub mod function;
pub mod line;
pub mod project;

use crate::functions::{FunctionLocator, FunctionSpan};
use crate::models::Issue;
use crate::strip::strip_line;
use std::collections::BTreeSet;

/// Per-file analysis input shared by all rules.
pub struct FileContext<'a> {
    pub path: &'a str,
    /// Raw lines as read, 1-indexed for reporting.
    pub raw: &'a [String],
    /// Comment/literal-stripped view of `raw`, same indexing.
    pub stripped: &'a [String],
    /// Function spans located over the stripped view, in file order.
    pub spans: &'a [FunctionSpan],
}

/// A single numbered style/safety rule.
pub trait Rule: Send + Sync {
    /// Numeric id from the external policy document.
    fn id(&self) -> u32;
    /// Short kebab-case name for listings.
    fn name(&self) -> &'static str;
    /// Run the detector over one file, returning zero or more findings.
    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue>;
}

/// Registry of rule detectors plus the set of ids allowed to emit.
///
/// Every detector runs on every pass; findings from rules outside the
/// enabled set are computed and then discarded. That keeps suppressed
/// rules (15, 27 by default) exercised rather than dead.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
    enabled: BTreeSet<u32>,
    locator: FunctionLocator,
}

impl RuleEngine {
    /// Engine with the builtin catalog and an explicit enabled set.
    pub fn new(enabled: BTreeSet<u32>) -> Self {
        let mut engine = RuleEngine {
            rules: Vec::new(),
            enabled,
            locator: FunctionLocator::new(),
        };
        for rule in builtin_rules() {
            engine.register(rule);
        }
        engine
    }

    /// Engine with the builtin catalog and the default enabled set.
    pub fn with_defaults() -> Self {
        Self::new(default_enabled())
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn is_enabled(&self, id: u32) -> bool {
        self.enabled.contains(&id)
    }

    /// (id, name, enabled) triples in registry order, for listings.
    pub fn catalog(&self) -> Vec<(u32, &'static str, bool)> {
        self.rules
            .iter()
            .map(|r| (r.id(), r.name(), self.is_enabled(r.id())))
            .collect()
    }

    /// Analyze one file's lines, returning findings in registry order.
    ///
    /// The pass is pure: identical input yields identical findings, and
    /// nothing carries over between calls.
    pub fn analyze_file(&self, path: &str, lines: &[String]) -> Vec<Issue> {
        let stripped: Vec<String> = lines.iter().map(|l| strip_line(l)).collect();
        let spans = self.locator.locate(&stripped);
        let ctx = FileContext {
            path,
            raw: lines,
            stripped: &stripped,
            spans: &spans,
        };
        let mut issues = Vec::new();
        for rule in &self.rules {
            let found = rule.check(&ctx);
            if self.enabled.contains(&rule.id()) {
                issues.extend(found);
            }
        }
        issues
    }
}

/// The builtin catalog: line-scope rules first, then span-scope rules,
/// then the file-prefix rule. Emission order follows this order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(line::AddressOfIndexRule::new()),
        Box::new(line::NamingRule::new()),
        Box::new(line::TranslitRule::new()),
        Box::new(line::MagicNumberRule::new()),
        Box::new(line::SelfAssignRule::new()),
        Box::new(function::FunctionLengthRule::new()),
        Box::new(function::ScanfCheckedRule::new()),
        Box::new(function::ReturnCountRule::new()),
        Box::new(function::ComplexityRule::new()),
        Box::new(function::FloatCompareRule::new()),
        Box::new(function::UnusedParamRule::new()),
        Box::new(function::ExitCallRule::new()),
        Box::new(function::GotoRule::new()),
        Box::new(function::AllocCheckedRule::new()),
        Box::new(file::GlobalVarRule::new()),
    ]
}

/// Rule ids emitted by default. Rules 15 and 27 run but stay muted until
/// explicitly enabled.
pub fn default_enabled() -> BTreeSet<u32> {
    let mut set: BTreeSet<u32> = builtin_rules().iter().map(|r| r.id()).collect();
    set.remove(&15);
    set.remove(&27);
    set
}

/// Whole-word containment: `needle` occurs in `haystack` with no
/// identifier character (`[A-Za-z0-9_]`) adjacent on either side.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();
        let left_ok = start == 0 || !is_word(bytes[start - 1]);
        let right_ok = end >= bytes.len() || !is_word(bytes[end]);
        if left_ok && right_ok {
            return true;
        }
        from = start + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_contains_word_boundaries() {
        assert!(contains_word("if (scanf(x))", "scanf"));
        assert!(!contains_word("if (fscanf(x))", "scanf"));
        assert!(!contains_word("scanfx", "scanf"));
        assert!(contains_word("n", "n"));
        assert!(!contains_word("len", "n"));
        assert!(contains_word("a+n-b", "n"));
    }

    #[test]
    fn test_disabled_rule_runs_but_is_discarded() {
        let src = lines("void f(void) {\n    p = malloc(10);\n    use(p);\n}\n");
        let muted = RuleEngine::with_defaults().analyze_file("a.c", &src);
        assert!(muted.iter().all(|i| i.rule != 15));

        let mut enabled = default_enabled();
        enabled.insert(15);
        let loud = RuleEngine::new(enabled).analyze_file("a.c", &src);
        assert!(loud.iter().any(|i| i.rule == 15));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let src = lines(
            "int my_Var2 = 42;\n\nvoid f(void) {\n    goto out;\nout:\n    exit(1);\n}\n",
        );
        let engine = RuleEngine::with_defaults();
        let first = engine.analyze_file("a.c", &src);
        let second = engine.analyze_file("a.c", &src);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_per_file_results_are_order_independent() {
        let a = lines("int x = 42;\n");
        let b = lines("void f(void) {\n    goto end;\nend:\n    ;\n}\n");
        let engine = RuleEngine::with_defaults();

        let mut ab = engine.analyze_file("a.c", &a);
        ab.extend(engine.analyze_file("b.c", &b));
        let mut ba = engine.analyze_file("b.c", &b);
        ba.extend(engine.analyze_file("a.c", &a));

        let key = |i: &Issue| (i.file.clone(), i.line, i.rule, i.message.clone());
        let mut ab_sorted: Vec<_> = ab.iter().map(key).collect();
        let mut ba_sorted: Vec<_> = ba.iter().map(key).collect();
        ab_sorted.sort();
        ba_sorted.sort();
        assert_eq!(ab_sorted, ba_sorted);
    }

    #[test]
    fn test_catalog_lists_muted_rules() {
        let engine = RuleEngine::with_defaults();
        let catalog = engine.catalog();
        assert!(catalog.iter().any(|&(id, _, enabled)| id == 15 && !enabled));
        assert!(catalog.iter().any(|&(id, _, enabled)| id == 27 && !enabled));
        assert!(catalog.iter().any(|&(id, _, enabled)| id == 4 && enabled));
    }
}
