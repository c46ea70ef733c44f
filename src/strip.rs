//! Comment and literal stripping for single lines.
//!
//! Rule detectors must never match inside comments or string/character
//! literals, so every raw line passes through [`strip_line`] before
//! pattern matching. Stripping is line-at-a-time: block-comment state is
//! not tracked across lines, so a block comment spanning several lines may
//! under- or over-strip at its boundaries. That is an accepted heuristic
//! limitation of the engine.

/// Strip comments and literal contents from one raw line.
///
/// Removes block-comment spans, line-comment suffixes, and the contents of
/// string/character literals. Literal delimiters are kept so the
/// surrounding structure (parentheses, brackets, braces) stays matchable.
/// Always returns a string, possibly empty.
pub fn strip_line(raw: &str) -> String {
    enum State {
        Code,
        Block,
        Str,
        Chr,
    }

    let mut out = String::with_capacity(raw.len());
    let mut state = State::Code;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::Block;
                }
                // Line comment: the rest of the line is dropped.
                '/' if chars.peek() == Some(&'/') => break,
                '"' => {
                    out.push('"');
                    state = State::Str;
                }
                '\'' => {
                    out.push('\'');
                    state = State::Chr;
                }
                _ => out.push(c),
            },
            State::Block => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Str => match c {
                '\\' => {
                    chars.next();
                }
                '"' => {
                    out.push('"');
                    state = State::Code;
                }
                _ => {}
            },
            State::Chr => match c {
                '\\' => {
                    chars.next();
                }
                '\'' => {
                    out.push('\'');
                    state = State::Code;
                }
                _ => {}
            },
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comment_suffix_removed() {
        assert_eq!(strip_line("int x = 0; // counter"), "int x = 0; ");
        assert_eq!(strip_line("// whole line"), "");
    }

    #[test]
    fn test_block_comment_span_removed() {
        assert_eq!(strip_line("a /* no goto here */ b"), "a  b");
        assert_eq!(strip_line("/* one *//* two */x"), "x");
    }

    #[test]
    fn test_unterminated_block_comment_drops_rest() {
        assert_eq!(strip_line("code(); /* trailing"), "code(); ");
    }

    #[test]
    fn test_string_contents_removed_delimiters_kept() {
        assert_eq!(strip_line("printf(\"vvod 42 {\");"), "printf(\"\");");
        assert_eq!(strip_line("s = \"a \\\" b\";"), "s = \"\";");
    }

    #[test]
    fn test_char_contents_removed() {
        assert_eq!(strip_line("c = '{'; d = '\\n';"), "c = ''; d = '';");
    }

    #[test]
    fn test_comment_markers_inside_string_ignored() {
        assert_eq!(strip_line("p = \"// not a comment\"; q();"), "p = \"\"; q();");
    }

    #[test]
    fn test_plain_code_unchanged() {
        assert_eq!(strip_line("for (i = 0; i < n; i++)"), "for (i = 0; i < n; i++)");
        assert_eq!(strip_line(""), "");
    }
}
