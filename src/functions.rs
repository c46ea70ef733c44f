//! Heuristic function-boundary location.
//!
//! There is no parser here. A candidate function definition is a stripped
//! line that looks like `<modifiers/type> name(<params>) {` with no
//! semicolon inside the parameter list and the opening brace on the same
//! logical line. The body extent is then found by counting braces over the
//! stripped lines. Unbalanced braces extend the span to end of file so
//! analysis keeps going on partial input.

use regex::Regex;

/// Heuristic function-definition pattern, applied to a trimmed stripped
/// line. Shared with the naming and global-variable rules.
pub const DEF_PATTERN: &str = r"^[\w*\s]+?\b([A-Za-z_][A-Za-z0-9_]*)\s*\(([^;]*)\)\s*\{";

/// A located function body, definition line and closing brace included.
#[derive(Debug, Clone)]
pub struct FunctionSpan {
    pub name: String,
    /// Raw parameter-list text between the parentheses.
    pub params: String,
    /// 1-based line of the definition.
    pub start: usize,
    /// 1-based line of the closing brace, or the last line of the file
    /// when braces are unbalanced.
    pub end: usize,
    /// Deepest brace nesting observed inside the span; the function's own
    /// braces count as depth 1.
    pub max_depth: usize,
}

impl FunctionSpan {
    /// Span length in lines, definition and closing brace included.
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Nesting level below the function's own braces.
    pub fn nesting(&self) -> usize {
        self.max_depth.saturating_sub(1)
    }

    /// Number of declared parameters; `void` and empty lists count as 0.
    pub fn param_count(&self) -> usize {
        let p = self.params.trim();
        if p.is_empty() || p == "void" {
            0
        } else {
            p.matches(',').count() + 1
        }
    }

    /// Parameter names, taken as the last whitespace token of each
    /// comma-separated declarator with `*`, brackets and dots removed.
    pub fn param_names(&self) -> Vec<String> {
        let p = self.params.trim();
        if p.is_empty() || p == "void" {
            return Vec::new();
        }
        p.split(',')
            .filter_map(|part| {
                let last = part.split_whitespace().last()?;
                let name: String = last
                    .chars()
                    .filter(|c| !matches!(c, '*' | '[' | ']' | '.'))
                    .collect();
                if name.is_empty() {
                    None
                } else {
                    Some(name)
                }
            })
            .collect()
    }
}

/// Locates sibling function spans in a file's stripped lines.
pub struct FunctionLocator {
    def_re: Regex,
}

impl Default for FunctionLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionLocator {
    pub fn new() -> Self {
        FunctionLocator {
            def_re: Regex::new(DEF_PATTERN).unwrap(),
        }
    }

    /// Match a single trimmed line against the definition heuristic,
    /// returning the function name and raw parameter text.
    pub fn match_definition<'a>(&self, trimmed: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.def_re.captures(trimmed)?;
        Some((
            caps.get(1).unwrap().as_str(),
            caps.get(2).unwrap().as_str(),
        ))
    }

    /// Scan stripped lines and locate function spans in file order.
    ///
    /// Once a span is consumed, scanning resumes right after its end line:
    /// function-like patterns inside a span are never re-entered as new
    /// top-level candidates. Preprocessor lines are skipped.
    pub fn locate(&self, stripped: &[String]) -> Vec<FunctionSpan> {
        let mut spans = Vec::new();
        let mut idx = 0;
        while idx < stripped.len() {
            let trimmed = stripped[idx].trim();
            if trimmed.starts_with('#') {
                idx += 1;
                continue;
            }
            let Some((name, params)) = self.match_definition(trimmed) else {
                idx += 1;
                continue;
            };

            let mut depth: i32 = 0;
            let mut max_depth: i32 = 0;
            let mut started = false;
            let mut end = stripped.len() - 1;
            let mut j = idx;
            while j < stripped.len() {
                for ch in stripped[j].chars() {
                    match ch {
                        '{' => {
                            depth += 1;
                            started = true;
                            if depth > max_depth {
                                max_depth = depth;
                            }
                        }
                        '}' => depth -= 1,
                        _ => {}
                    }
                }
                if started && depth <= 0 {
                    end = j;
                    break;
                }
                j += 1;
            }

            spans.push(FunctionSpan {
                name: name.to_string(),
                params: params.trim().to_string(),
                start: idx + 1,
                end: end + 1,
                max_depth: max_depth.max(0) as usize,
            });
            idx = end + 1;
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_locates_simple_function() {
        let src = lines("int main(void) {\n    return 0;\n}\n");
        let spans = FunctionLocator::new().locate(&src);
        assert_eq!(spans.len(), 1);
        let f = &spans[0];
        assert_eq!(f.name, "main");
        assert_eq!(f.params, "void");
        assert_eq!((f.start, f.end), (1, 3));
        assert_eq!(f.line_count(), 3);
        assert_eq!(f.max_depth, 1);
        assert_eq!(f.nesting(), 0);
        assert_eq!(f.param_count(), 0);
    }

    #[test]
    fn test_prototype_is_not_a_candidate() {
        let src = lines("int sum(int a, int b);\nint sum(int a, int b) {\n    return a + b;\n}\n");
        let spans = FunctionLocator::new().locate(&src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 2);
        assert_eq!(spans[0].param_count(), 2);
        assert_eq!(spans[0].param_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_sibling_functions_in_order() {
        let src = lines(
            "static int first(int x) {\n    return x;\n}\n\nvoid second(void) {\n}\n",
        );
        let spans = FunctionLocator::new().locate(&src);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].name, "first");
        assert_eq!((spans[0].start, spans[0].end), (1, 3));
        assert_eq!(spans[1].name, "second");
        assert_eq!((spans[1].start, spans[1].end), (5, 6));
    }

    #[test]
    fn test_unbalanced_braces_extend_to_eof() {
        let src = lines("void broken(void) {\n    if (x) {\n        y();\n");
        let spans = FunctionLocator::new().locate(&src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end, 3);
        assert_eq!(spans[0].max_depth, 2);
    }

    #[test]
    fn test_max_depth_counts_one_line_blocks() {
        let src = lines("void f(void) {\n    if (x) { y(); }\n}\n");
        let spans = FunctionLocator::new().locate(&src);
        assert_eq!(spans[0].max_depth, 2);
        assert_eq!(spans[0].nesting(), 1);
    }

    #[test]
    fn test_param_names_strip_pointers_and_arrays() {
        let src = lines("int process(char *buf, int len, double vals[]) {\n    return 0;\n}\n");
        let spans = FunctionLocator::new().locate(&src);
        assert_eq!(spans[0].param_names(), vec!["buf", "len", "vals"]);
        assert_eq!(spans[0].param_count(), 3);
    }

    #[test]
    fn test_preprocessor_lines_skipped() {
        let src = lines("#define CALL(f) f() {\nint ok(void) {\n    return 0;\n}\n");
        let spans = FunctionLocator::new().locate(&src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "ok");
    }

    #[test]
    fn test_nested_braces_not_reentered() {
        let src = lines(
            "void outer(void) {\n    int inner_like(int x) {\n    }\n}\nvoid after(void) {\n}\n",
        );
        let spans = FunctionLocator::new().locate(&src);
        let names: Vec<_> = spans.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["outer", "after"]);
    }
}
