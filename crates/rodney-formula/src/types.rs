//! Formula token types.

/// Raw-name prefix reserved for date directives.
pub const DATE_DIRECTIVE_PREFIX: &str = "Date|format:";

/// A brace-delimited token, classified by what it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// `{Title}` -- a field looked up by title.
    Field(String),
    /// `{Date|format:<pattern>}` -- the current date rendered with `pattern`.
    Date(String),
    /// `{Date|format:}` -- reserved prefix with no pattern; always literal.
    EmptyDate,
}

impl Placeholder {
    /// Classify the text between the braces.
    pub fn classify(name: &str) -> Self {
        match name.strip_prefix(DATE_DIRECTIVE_PREFIX) {
            Some("") => Self::EmptyDate,
            Some(pattern) => Self::Date(pattern.to_string()),
            None => Self::Field(name.to_string()),
        }
    }
}
