//! Identifier naming-style classification.

/// Accepted identifier styles, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStyle {
    Camel,
    Snake,
    Pascal,
}

impl NamingStyle {
    pub fn label(self) -> &'static str {
        match self {
            NamingStyle::Camel => "camelCase",
            NamingStyle::Snake => "snake_case",
            NamingStyle::Pascal => "PascalCase",
        }
    }
}

/// Rendered list of accepted styles, used in rule-2 messages.
pub const ALLOWED_STYLES: &str = "camelCase, snake_case, PascalCase";

/// Classify an identifier against the accepted styles.
///
/// Matching is whole-string. Styles are checked in a fixed priority order
/// (camelCase, then snake_case, then PascalCase) and the first satisfied
/// one wins, so an identifier matching several patterns is reported under
/// the first only. Returns `None` for identifiers matching no style.
pub fn classify(ident: &str) -> Option<NamingStyle> {
    let mut chars = ident.chars();
    let first = chars.next()?;
    let rest = &ident[first.len_utf8()..];

    // camelCase: ^[a-z][A-Za-z0-9]*$
    if first.is_ascii_lowercase() && rest.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(NamingStyle::Camel);
    }
    // snake_case: ^[a-z][a-z0-9_]*$
    if first.is_ascii_lowercase()
        && rest
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Some(NamingStyle::Snake);
    }
    // PascalCase: ^[A-Z][A-Za-z0-9]*$
    if first.is_ascii_uppercase() && rest.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(NamingStyle::Pascal);
    }
    None
}
