//! Line-scope rule detectors.
//!
//! Each detector consumes the stripped view of a single line, so matches
//! inside comments and string/char literals are impossible by
//! construction. Preprocessor lines are skipped where the policy says so.

use crate::functions::DEF_PATTERN;
use crate::models::Issue;
use crate::naming::{classify, ALLOWED_STYLES};
use crate::rules::{contains_word, FileContext, Rule};
use regex::Regex;

// ---------------------------------------------------------------------------
// Rule 0: address of an array element
// ---------------------------------------------------------------------------

/// Flags `&arr[i]` unless the address is immediately consumed by a call
/// (`)`) or dereference (`*`).
pub struct AddressOfIndexRule {
    amp_re: Regex,
}

impl AddressOfIndexRule {
    pub fn new() -> Self {
        AddressOfIndexRule {
            amp_re: Regex::new(r"(^|\s)&\s*[A-Za-z_][A-Za-z0-9_]*\s*\[[^\]]+\]").unwrap(),
        }
    }
}

impl Default for AddressOfIndexRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for AddressOfIndexRule {
    fn id(&self) -> u32 {
        0
    }

    fn name(&self) -> &'static str {
        "address-of-array-element"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (i, line) in ctx.stripped.iter().enumerate() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            for m in self.amp_re.find_iter(line) {
                let next = line[m.end()..].chars().next();
                if matches!(next, Some(')') | Some('*')) {
                    continue;
                }
                issues.push(Issue::at(
                    ctx.path,
                    i + 1,
                    self.id(),
                    "Taking the address of an array element (&arr[i]) is banned".to_string(),
                ));
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 2: naming styles
// ---------------------------------------------------------------------------

/// Flags declared function and variable names matching none of the
/// accepted naming styles.
pub struct NamingRule {
    def_re: Regex,
    var_re: Regex,
}

impl NamingRule {
    pub fn new() -> Self {
        NamingRule {
            def_re: Regex::new(DEF_PATTERN).unwrap(),
            var_re: Regex::new(
                r"\b(?:int|char|float|double|long|short|size_t|unsigned|struct)\s+([A-Za-z_][A-Za-z0-9_]*)",
            )
            .unwrap(),
        }
    }
}

impl Default for NamingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NamingRule {
    fn id(&self) -> u32 {
        2
    }

    fn name(&self) -> &'static str {
        "naming-style"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (i, line) in ctx.stripped.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(caps) = self.def_re.captures(trimmed) {
                let fname = caps.get(1).unwrap().as_str();
                if classify(fname).is_none() {
                    issues.push(Issue::at(
                        ctx.path,
                        i + 1,
                        self.id(),
                        format!(
                            "Function '{}' matches none of the accepted naming styles ({})",
                            fname, ALLOWED_STYLES
                        ),
                    ));
                }
            }
            if let Some(caps) = self.var_re.captures(line) {
                let vname = caps.get(1).unwrap().as_str();
                if classify(vname).is_none() {
                    issues.push(Issue::at(
                        ctx.path,
                        i + 1,
                        self.id(),
                        format!(
                            "Variable '{}' matches none of the accepted naming styles ({})",
                            vname, ALLOWED_STYLES
                        ),
                    ));
                }
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 3: transliterated identifiers
// ---------------------------------------------------------------------------

/// Known transliteration tokens, matched as whole words,
/// case-insensitively.
const TRANSLIT_TOKENS: [&str; 8] = [
    "vvod",
    "vivod",
    "chislo",
    "soobshchenie",
    "massiv",
    "stroka",
    "otvet",
    "perechislenie",
];

pub struct TranslitRule;

impl TranslitRule {
    pub fn new() -> Self {
        TranslitRule
    }
}

impl Default for TranslitRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for TranslitRule {
    fn id(&self) -> u32 {
        3
    }

    fn name(&self) -> &'static str {
        "transliteration"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (i, line) in ctx.stripped.iter().enumerate() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            let lowered = line.to_ascii_lowercase();
            for tok in TRANSLIT_TOKENS {
                if contains_word(&lowered, tok) {
                    issues.push(Issue::at(
                        ctx.path,
                        i + 1,
                        self.id(),
                        format!("Transliterated word '{}' found; use proper English naming", tok),
                    ));
                }
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 5: magic numbers
// ---------------------------------------------------------------------------

/// Flags decimal literals other than 0, 1 and -1 outside `#define`/`enum`
/// context.
pub struct MagicNumberRule;

impl MagicNumberRule {
    pub fn new() -> Self {
        MagicNumberRule
    }

    /// Decimal literals in a line: an optional leading minus and digits,
    /// optionally with a fractional part, with no identifier character on
    /// either side. Hex/octal-looking runs fail the boundary checks and
    /// are not reported.
    fn literals(line: &str) -> Vec<&str> {
        let bytes = line.as_bytes();
        let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
        let mut out = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            let neg = c == b'-' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit();
            if !(c.is_ascii_digit() || neg) {
                i += 1;
                continue;
            }
            if i > 0 && is_word(bytes[i - 1]) {
                // Inside an identifier; swallow the rest of the word.
                if neg {
                    i += 1;
                } else {
                    while i < bytes.len() && is_word(bytes[i]) {
                        i += 1;
                    }
                }
                continue;
            }
            let start = i;
            if neg {
                i += 1;
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            if i < bytes.len() && is_word(bytes[i]) {
                while i < bytes.len() && is_word(bytes[i]) {
                    i += 1;
                }
                continue;
            }
            out.push(&line[start..i]);
        }
        out
    }
}

impl Default for MagicNumberRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MagicNumberRule {
    fn id(&self) -> u32 {
        5
    }

    fn name(&self) -> &'static str {
        "magic-number"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (i, line) in ctx.stripped.iter().enumerate() {
            if line.trim_start().starts_with('#')
                || line.contains("enum")
                || line.to_ascii_lowercase().contains("define")
            {
                continue;
            }
            for lit in Self::literals(line) {
                if matches!(lit, "0" | "1" | "-1") {
                    continue;
                }
                issues.push(Issue::at(
                    ctx.path,
                    i + 1,
                    self.id(),
                    format!("Magic number {} (only 0, 1 and -1 are allowed)", lit),
                ));
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 21: redundant self-assignment
// ---------------------------------------------------------------------------

/// Flags trivial computations of the form `x = x + 0` or `x = x * 1`.
pub struct SelfAssignRule {
    assign_re: Regex,
}

impl SelfAssignRule {
    pub fn new() -> Self {
        SelfAssignRule {
            assign_re: Regex::new(
                r"\b([A-Za-z_][A-Za-z0-9_]*)\s*=\s*([A-Za-z_][A-Za-z0-9_]*)\s*([+*])\s*([01])\b",
            )
            .unwrap(),
        }
    }
}

impl Default for SelfAssignRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SelfAssignRule {
    fn id(&self) -> u32 {
        21
    }

    fn name(&self) -> &'static str {
        "self-assignment"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (i, line) in ctx.stripped.iter().enumerate() {
            let hit = self.assign_re.captures_iter(line).any(|caps| {
                caps[1] == caps[2]
                    && matches!(
                        (&caps[3], &caps[4]),
                        ("+", "0") | ("*", "1")
                    )
            });
            if hit {
                issues.push(Issue::at(
                    ctx.path,
                    i + 1,
                    self.id(),
                    "Redundant computation (x = x + 0 or x = x * 1)".to_string(),
                ));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleEngine;

    fn check(src: &str) -> Vec<Issue> {
        let lines: Vec<String> = src.lines().map(|l| l.to_string()).collect();
        RuleEngine::with_defaults().analyze_file("t.c", &lines)
    }

    fn rule_lines(issues: &[Issue], rule: u32) -> Vec<usize> {
        issues
            .iter()
            .filter(|i| i.rule == rule)
            .map(|i| i.line.unwrap())
            .collect()
    }

    #[test]
    fn test_rule0_fires_outside_call_argument() {
        let issues = check("int x = arr[5] + &y[2];\n");
        assert_eq!(rule_lines(&issues, 0), vec![1]);
    }

    #[test]
    fn test_rule0_exempts_call_argument_and_deref() {
        assert!(rule_lines(&check("foo(&y[2]);\n"), 0).is_empty());
        assert!(rule_lines(&check("v = &y[2]*p;\n"), 0).is_empty());
    }

    #[test]
    fn test_rule0_ignores_strings_and_comments() {
        assert!(rule_lines(&check("s = \"&y[2] banned\"; // &y[2]\n"), 0).is_empty());
    }

    #[test]
    fn test_rule2_variable_naming() {
        let issues = check("int my_Var2 = 0;\nint okName = 0;\nint also_ok = 0;\n");
        assert_eq!(rule_lines(&issues, 2), vec![1]);
    }

    #[test]
    fn test_rule2_function_naming() {
        let issues = check("void Bad_Name(void) {\n}\nvoid goodName(void) {\n}\n");
        // One finding for the function name; the var_re heuristic does not
        // match a `void` declarator.
        assert_eq!(rule_lines(&issues, 2), vec![1]);
    }

    #[test]
    fn test_rule3_translit_whole_word_case_insensitive() {
        let issues = check("int Vvod = 0;\nint vvodka = 0;\n");
        assert_eq!(rule_lines(&issues, 3), vec![1]);
    }

    #[test]
    fn test_rule3_multiple_tokens_one_line() {
        let issues = check("int massiv = 0; int stroka = 0; int otvet = stroka;\n");
        // One finding per denylist token present, not per occurrence.
        assert_eq!(rule_lines(&issues, 3).len(), 3);
    }

    #[test]
    fn test_rule5_magic_number_fires() {
        let issues = check("int x = 42;\n");
        assert_eq!(rule_lines(&issues, 5), vec![1]);
    }

    #[test]
    fn test_rule5_allowed_literals_never_fire() {
        let issues = check("int a = 0;\nint b = 1;\nint c = -1;\na = b - 1;\n");
        assert!(rule_lines(&issues, 5).is_empty());
    }

    #[test]
    fn test_rule5_define_and_enum_exempt() {
        let issues = check("#define LIMIT 42\nenum { SIZE = 42 };\nint x = 42;\n");
        assert_eq!(rule_lines(&issues, 5), vec![3]);
    }

    #[test]
    fn test_rule5_fractional_literal() {
        let issues = check("double pi = 3.14;\n");
        let msgs: Vec<_> = issues.iter().filter(|i| i.rule == 5).collect();
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].message.contains("3.14"));
    }

    #[test]
    fn test_rule5_skips_identifier_tails_and_hex() {
        assert!(rule_lines(&check("int x2y = mask0x1F;\n"), 5).is_empty());
        assert!(rule_lines(&check("int m = 0x1F;\n"), 5).is_empty());
    }

    #[test]
    fn test_rule21_self_assignment() {
        let issues = check("x = x + 0;\ny = y * 1;\nz = w + 0;\nx = x + 1;\n");
        assert_eq!(rule_lines(&issues, 21), vec![1, 2]);
    }
}
