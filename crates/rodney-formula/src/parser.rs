//! Split a formula into literal text and brace tokens.

/// One piece of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output as-is.
    Literal(&'a str),
    /// A `{...}` token: `raw` includes the braces, `name` is what's between.
    Token { raw: &'a str, name: &'a str },
}

/// Scan `formula` left to right for tokens of the shape `{` + one or more
/// characters other than `}` + `}`.
///
/// A token runs from an opening brace to the nearest closing brace, so
/// `{a{b}` is one token named `a{b`. `{}` is not a token, and an opening brace
/// with no closing brace after it is literal text.
pub fn segments(formula: &str) -> Vec<Segment<'_>> {
    let bytes = formula.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < len {
        if bytes[i] == b'{' {
            let start = i + 1;
            match formula[start..].find('}') {
                Some(0) => {
                    // `{}` -- the closing brace may still end a later token.
                    i += 1;
                    continue;
                }
                Some(offset) => {
                    let end = start + offset;
                    if literal_start < i {
                        out.push(Segment::Literal(&formula[literal_start..i]));
                    }
                    out.push(Segment::Token {
                        raw: &formula[i..=end],
                        name: &formula[start..end],
                    });
                    i = end + 1;
                    literal_start = i;
                    continue;
                }
                None => break,
            }
        }
        i += 1;
    }

    if literal_start < len {
        out.push(Segment::Literal(&formula[literal_start..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(formula: &str) -> Vec<&str> {
        segments(formula)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Token { name, .. } => Some(name),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(segments("no braces"), vec![Segment::Literal("no braces")]);
        assert!(segments("").is_empty());
    }

    #[test]
    fn tokens_and_literals_interleave() {
        assert_eq!(
            segments("{Status} - {Name}!"),
            vec![
                Segment::Token { raw: "{Status}", name: "Status" },
                Segment::Literal(" - "),
                Segment::Token { raw: "{Name}", name: "Name" },
                Segment::Literal("!"),
            ]
        );
    }

    #[test]
    fn nested_open_brace_belongs_to_name() {
        assert_eq!(names("{a{b}c}"), vec!["a{b"]);
        assert_eq!(names("{{Name}}"), vec!["{Name"]);
    }

    #[test]
    fn empty_braces_are_not_tokens() {
        assert_eq!(names("{}{X}"), vec!["X"]);
        assert_eq!(segments("{}"), vec![Segment::Literal("{}")]);
    }

    #[test]
    fn unclosed_brace_is_literal() {
        assert_eq!(
            segments("{A} and {open"),
            vec![
                Segment::Token { raw: "{A}", name: "A" },
                Segment::Literal(" and {open"),
            ]
        );
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(names("→ {Größe} ←"), vec!["Größe"]);
        let joined: String = segments("é{x}ü")
            .into_iter()
            .map(|s| match s {
                Segment::Literal(t) => t,
                Segment::Token { raw, .. } => raw,
            })
            .collect();
        assert_eq!(joined, "é{x}ü");
    }
}
