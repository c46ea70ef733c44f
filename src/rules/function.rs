//! Span-scope rule detectors.
//!
//! These run over located function spans. A span's stripped lines are the
//! input; the raw lines are never consulted, so comments and literals
//! cannot trigger matches. Spans truncated by the fail-open policy
//! (unbalanced braces) are analyzed as-is.

use crate::functions::FunctionSpan;
use crate::models::Issue;
use crate::rules::{contains_word, FileContext, Rule};
use regex::Regex;

/// 0-based index range of a span's lines within the file.
fn span_range(span: &FunctionSpan) -> std::ops::Range<usize> {
    span.start - 1..span.end
}

// ---------------------------------------------------------------------------
// Rule 4: function length
// ---------------------------------------------------------------------------

/// Flags functions longer than 30 lines, braces included.
pub struct FunctionLengthRule;

impl FunctionLengthRule {
    pub fn new() -> Self {
        FunctionLengthRule
    }
}

impl Default for FunctionLengthRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for FunctionLengthRule {
    fn id(&self) -> u32 {
        4
    }

    fn name(&self) -> &'static str {
        "function-length"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            let len = span.line_count();
            if len > 30 {
                issues.push(Issue::at(
                    ctx.path,
                    span.start,
                    self.id(),
                    format!("Function '{}' is {} lines long (limit is 30)", span.name, len),
                ));
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 8: unchecked scanf
// ---------------------------------------------------------------------------

/// Flags `scanf` calls with no `if`, comparison, `return` or assignment
/// token within a 3-line window on either side.
pub struct ScanfCheckedRule {
    scanf_re: Regex,
}

impl ScanfCheckedRule {
    pub fn new() -> Self {
        ScanfCheckedRule {
            scanf_re: Regex::new(r"\bscanf\s*\(").unwrap(),
        }
    }
}

impl Default for ScanfCheckedRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ScanfCheckedRule {
    fn id(&self) -> u32 {
        8
    }

    fn name(&self) -> &'static str {
        "scanf-unchecked"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            for k in span_range(span) {
                if !self.scanf_re.is_match(&ctx.stripped[k]) {
                    continue;
                }
                // Window clipped to the function start but allowed to run
                // past its end.
                let lo = k.saturating_sub(3).max(span.start - 1);
                let hi = (k + 4).min(ctx.stripped.len());
                let window = ctx.stripped[lo..hi].join("\n");
                let guarded = window.contains("==")
                    || window.contains("!=")
                    || window.contains("if")
                    || window.contains("return")
                    || window.contains('=');
                if !guarded {
                    issues.push(Issue::at(
                        ctx.path,
                        k + 1,
                        self.id(),
                        "Return value of scanf() is not checked".to_string(),
                    ));
                }
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 10: return count
// ---------------------------------------------------------------------------

/// Flags functions with more than two `return` statements.
pub struct ReturnCountRule {
    return_re: Regex,
}

impl ReturnCountRule {
    pub fn new() -> Self {
        ReturnCountRule {
            return_re: Regex::new(r"\breturn\b").unwrap(),
        }
    }
}

impl Default for ReturnCountRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ReturnCountRule {
    fn id(&self) -> u32 {
        10
    }

    fn name(&self) -> &'static str {
        "return-count"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            let count = span_range(span)
                .filter(|&k| self.return_re.is_match(&ctx.stripped[k]))
                .count();
            if count > 2 {
                issues.push(Issue::at(
                    ctx.path,
                    span.start,
                    self.id(),
                    format!(
                        "Function '{}' contains {} return statements (limit is 2)",
                        span.name, count
                    ),
                ));
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 12: parameter count and nesting depth
// ---------------------------------------------------------------------------

/// Flags functions with more than 5 parameters or nesting deeper than 3.
pub struct ComplexityRule;

impl ComplexityRule {
    pub fn new() -> Self {
        ComplexityRule
    }
}

impl Default for ComplexityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ComplexityRule {
    fn id(&self) -> u32 {
        12
    }

    fn name(&self) -> &'static str {
        "complexity"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            let params = span.param_count();
            if params > 5 {
                issues.push(Issue::at(
                    ctx.path,
                    span.start,
                    self.id(),
                    format!(
                        "Function '{}' takes {} parameters (limit is 5)",
                        span.name, params
                    ),
                ));
            }
            let nesting = span.nesting();
            if nesting > 3 {
                issues.push(Issue::at(
                    ctx.path,
                    span.start,
                    self.id(),
                    format!(
                        "Nesting depth {} in function '{}' exceeds the limit of 3",
                        nesting, span.name
                    ),
                ));
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 14: floating-point comparison
// ---------------------------------------------------------------------------

/// Flags lines combining a fractional literal with `==`, `>=` or `<=`.
pub struct FloatCompareRule {
    float_re: Regex,
    cmp_re: Regex,
}

impl FloatCompareRule {
    pub fn new() -> Self {
        FloatCompareRule {
            float_re: Regex::new(r"\d+\.\d+").unwrap(),
            cmp_re: Regex::new(r"==|>=|<=").unwrap(),
        }
    }
}

impl Default for FloatCompareRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for FloatCompareRule {
    fn id(&self) -> u32 {
        14
    }

    fn name(&self) -> &'static str {
        "float-comparison"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            for k in span_range(span) {
                let line = &ctx.stripped[k];
                if self.float_re.is_match(line) && self.cmp_re.is_match(line) {
                    issues.push(Issue::at(
                        ctx.path,
                        k + 1,
                        self.id(),
                        "Floating-point value compared with ==, >= or <=".to_string(),
                    ));
                }
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 18: unused parameters
// ---------------------------------------------------------------------------

/// Flags parameters whose name never appears as a whole word in the
/// function body. The body text starts at the opening brace, so the
/// parameter list itself does not count as a use.
pub struct UnusedParamRule;

impl UnusedParamRule {
    pub fn new() -> Self {
        UnusedParamRule
    }
}

impl Default for UnusedParamRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for UnusedParamRule {
    fn id(&self) -> u32 {
        18
    }

    fn name(&self) -> &'static str {
        "unused-parameter"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            let names = span.param_names();
            if names.is_empty() {
                continue;
            }
            let def_line = &ctx.stripped[span.start - 1];
            let mut body = def_line
                .find('{')
                .map(|p| def_line[p..].to_string())
                .unwrap_or_default();
            for line in &ctx.stripped[span.start..span.end] {
                body.push('\n');
                body.push_str(line);
            }
            for name in names {
                if !contains_word(&body, &name) {
                    issues.push(Issue::at(
                        ctx.path,
                        span.start,
                        self.id(),
                        format!(
                            "Parameter '{}' is never used in function '{}'",
                            name, span.name
                        ),
                    ));
                }
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 25: exit() calls
// ---------------------------------------------------------------------------

/// Flags calls to the process-termination function inside a function body.
pub struct ExitCallRule {
    exit_re: Regex,
}

impl ExitCallRule {
    pub fn new() -> Self {
        ExitCallRule {
            exit_re: Regex::new(r"\bexit\s*\(").unwrap(),
        }
    }
}

impl Default for ExitCallRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ExitCallRule {
    fn id(&self) -> u32 {
        25
    }

    fn name(&self) -> &'static str {
        "exit-call"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            for k in span_range(span) {
                if self.exit_re.is_match(&ctx.stripped[k]) {
                    issues.push(Issue::at(
                        ctx.path,
                        k + 1,
                        self.id(),
                        "Call to exit() inside a function".to_string(),
                    ));
                }
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 26: goto
// ---------------------------------------------------------------------------

/// Flags the unconditional jump keyword inside a function body.
pub struct GotoRule {
    goto_re: Regex,
}

impl GotoRule {
    pub fn new() -> Self {
        GotoRule {
            goto_re: Regex::new(r"\bgoto\b").unwrap(),
        }
    }
}

impl Default for GotoRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for GotoRule {
    fn id(&self) -> u32 {
        26
    }

    fn name(&self) -> &'static str {
        "goto"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            for k in span_range(span) {
                if self.goto_re.is_match(&ctx.stripped[k]) {
                    issues.push(Issue::at(
                        ctx.path,
                        k + 1,
                        self.id(),
                        "goto is banned".to_string(),
                    ));
                }
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Rule 15: unchecked allocation (muted by default)
// ---------------------------------------------------------------------------

/// Flags malloc/realloc/calloc assignments whose result is not guarded
/// within the next 10 lines. Recognized guards: `if (!p)`, comparisons
/// against NULL/0, `assert(p != NULL)`, plain truthiness `if (p)`, and one
/// level of indirect checking through a wrapping call such as
/// `if (fill(p, n) == NULL)`.
///
/// The detector always runs; whether its findings are emitted is decided
/// by the engine's enabled set (off by default).
pub struct AllocCheckedRule {
    guard_assign_re: Regex,
    assign_re: Regex,
    bang_re: Regex,
    cmp_re: Regex,
    truth_re: Regex,
    assert_re: Regex,
    call_re: Regex,
    tail_cmp_re: Regex,
}

impl AllocCheckedRule {
    pub fn new() -> Self {
        AllocCheckedRule {
            guard_assign_re: Regex::new(
                r"\b(?:if|while)\s*\(\s*!\s*\(*\s*[A-Za-z_][A-Za-z0-9_]*\s*=\s*(?:malloc|realloc|calloc)\s*\(",
            )
            .unwrap(),
            assign_re: Regex::new(
                r"([A-Za-z_][A-Za-z0-9_]*)\s*=\s*.*\b(?:malloc|realloc|calloc)\s*\(",
            )
            .unwrap(),
            bang_re: Regex::new(r"\bif\s*\(\s*!\s*([A-Za-z_][A-Za-z0-9_]*)\s*\)").unwrap(),
            cmp_re: Regex::new(
                r"\bif\s*\(\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?:==|!=)\s*(?:NULL|0)\s*\)",
            )
            .unwrap(),
            truth_re: Regex::new(r"\bif\s*\(\s*([A-Za-z_][A-Za-z0-9_]*)\s*\)").unwrap(),
            assert_re: Regex::new(r"\bassert\s*\(\s*([A-Za-z_][A-Za-z0-9_]*)\s*!=\s*NULL\s*\)")
                .unwrap(),
            call_re: Regex::new(
                r"\bif\s*\(\s*[A-Za-z_][A-Za-z0-9_]*\s*\(\s*([A-Za-z_][A-Za-z0-9_]*)\s*[,)]",
            )
            .unwrap(),
            tail_cmp_re: Regex::new(r"(?:==|!=)\s*(?:NULL|0)").unwrap(),
        }
    }

    fn line_checks(&self, line: &str, var: &str) -> bool {
        for re in [&self.bang_re, &self.cmp_re, &self.truth_re, &self.assert_re] {
            if re.captures_iter(line).any(|c| &c[1] == var) {
                return true;
            }
        }
        // Indirect check through a wrapping call: the call result must be
        // compared against NULL/0 later on the same line.
        for caps in self.call_re.captures_iter(line) {
            if &caps[1] == var {
                let after = &line[caps.get(0).unwrap().end() - 1..];
                if self.tail_cmp_re.is_match(after) {
                    return true;
                }
            }
        }
        false
    }
}

impl Default for AllocCheckedRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for AllocCheckedRule {
    fn id(&self) -> u32 {
        15
    }

    fn name(&self) -> &'static str {
        "alloc-unchecked"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for span in ctx.spans {
            for k in span_range(span) {
                let line = &ctx.stripped[k];
                // `if (!(p = malloc(...)))` guards inline.
                if self.guard_assign_re.is_match(line) {
                    continue;
                }
                let Some(caps) = self.assign_re.captures(line) else {
                    continue;
                };
                let var = caps.get(1).unwrap().as_str();
                let lookahead_end = (k + 11).min(span.end);
                let checked = (k + 1..lookahead_end)
                    .any(|t| self.line_checks(&ctx.stripped[t], var));
                if !checked {
                    issues.push(Issue::at(
                        ctx.path,
                        k + 1,
                        self.id(),
                        "Result of malloc/realloc/calloc is not checked".to_string(),
                    ));
                }
            }
        }
        issues
    }
}
