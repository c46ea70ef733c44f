//! File-prefix region detector.

use crate::functions::DEF_PATTERN;
use crate::models::Issue;
use crate::rules::{FileContext, Rule};
use regex::Regex;

/// Upper bound on the scanned prefix when a file has no functions at all.
const SCAN_CAP: usize = 300;

/// Rule 27: flags probable global-variable declarations at file scope.
///
/// Scans the region before the first function definition (capped at 300
/// lines), grouping lines into logical declarations ending with `;`.
/// Typedefs, pure `struct`/`enum`/`union` declarations, prototypes (any
/// block containing a parenthesized part), `extern` and `static` blocks
/// are excluded.
///
/// The detector always runs; emission is gated by the engine's enabled
/// set (off by default).
pub struct GlobalVarRule {
    def_re: Regex,
    type_decl_re: Regex,
    var_re: Regex,
}

impl GlobalVarRule {
    pub fn new() -> Self {
        GlobalVarRule {
            def_re: Regex::new(DEF_PATTERN).unwrap(),
            type_decl_re: Regex::new(r"^\s*(?:struct|enum|union)\b[^{;]*;\s*$").unwrap(),
            var_re: Regex::new(
                r"(?s)^\s*(?:const|volatile|unsigned|signed|register)?\s*(?:struct|enum|union|[A-Za-z_][A-Za-z0-9_\s*]+?)\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:\[.*\]|=.+)?\s*;\s*$",
            )
            .unwrap(),
        }
    }
}

impl Default for GlobalVarRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for GlobalVarRule {
    fn id(&self) -> u32 {
        27
    }

    fn name(&self) -> &'static str {
        "global-variable"
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Issue> {
        let first_func = ctx
            .stripped
            .iter()
            .position(|l| self.def_re.is_match(l.trim()));
        let limit = first_func.unwrap_or_else(|| ctx.stripped.len().min(SCAN_CAP));
        let region = &ctx.stripped[..limit];

        let mut issues = Vec::new();
        let mut i = 0;
        while i < region.len() {
            let head = region[i].trim();
            if head.is_empty() || head.starts_with('#') {
                i += 1;
                continue;
            }
            // Group lines into one logical declaration ending with ';'.
            let start_line = i + 1;
            let mut block = String::new();
            let mut j = i;
            let mut found_semicolon = false;
            while j < region.len() {
                if !block.is_empty() {
                    block.push('\n');
                }
                block.push_str(&region[j]);
                let done = region[j].contains(';');
                j += 1;
                if done {
                    found_semicolon = true;
                    break;
                }
            }
            if !found_semicolon {
                i = j;
                continue;
            }
            let tok = block.trim();
            let excluded = tok.is_empty()
                || tok == ";"
                || tok.starts_with("typedef")
                || tok.starts_with("extern")
                || tok.starts_with("static")
                || self.type_decl_re.is_match(tok)
                || (tok.contains('(') && tok.contains(')'));
            if !excluded {
                if let Some(caps) = self.var_re.captures(tok) {
                    issues.push(Issue::at(
                        ctx.path,
                        start_line,
                        self.id(),
                        format!(
                            "Probable global variable '{}' at file scope",
                            &caps[1]
                        ),
                    ));
                }
            }
            i = j;
        }
        issues
    }
}
