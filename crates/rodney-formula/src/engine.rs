//! Evaluate formulas against a field catalog.

use chrono::Datelike;

use rodney_core::FieldCatalog;

use crate::date::format_date;
use crate::parser::{Segment, segments};
use crate::types::Placeholder;

/// Evaluate `formula` against `catalog`, rendering dates with `now`.
///
/// Field placeholders are replaced with the matching field's display value
/// (title compared case-insensitively, first match wins). Unknown names stay
/// in the output verbatim. Date directives render `now` with their pattern.
/// The formula is scanned once: substituted values are never re-scanned, so a
/// value containing brace syntax is emitted as plain text. The result is
/// trimmed.
///
/// Pure: identical inputs give identical output.
pub fn evaluate<D: Datelike>(formula: &str, catalog: &FieldCatalog, now: &D) -> String {
    let mut out = String::with_capacity(formula.len());
    for segment in segments(formula) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Token { raw, name } => match Placeholder::classify(name) {
                Placeholder::Date(pattern) => out.push_str(&format_date(now, &pattern)),
                Placeholder::EmptyDate => out.push_str(raw),
                Placeholder::Field(title) => match catalog.find_by_title(&title) {
                    Some(field) => out.push_str(field.display_value()),
                    None => out.push_str(raw),
                },
            },
        }
    }
    out.trim().to_string()
}

/// Live preview of a formula.
///
/// Before any record data is loaded the formula is shown exactly as typed.
pub fn preview<D: Datelike>(formula: &str, catalog: Option<&FieldCatalog>, now: &D) -> String {
    match catalog {
        Some(catalog) => evaluate(formula, catalog, now),
        None => formula.to_string(),
    }
}

/// All placeholders in `formula`, in order of appearance.
pub fn placeholders(formula: &str) -> Vec<Placeholder> {
    segments(formula)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Token { name, .. } => Some(Placeholder::classify(name)),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Field names in `formula` that no field in `catalog` matches, deduplicated
/// in first-seen order.
pub fn unresolved(formula: &str, catalog: &FieldCatalog) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for placeholder in placeholders(formula) {
        if let Placeholder::Field(name) = placeholder {
            if catalog.find_by_title(&name).is_none() && !missing.contains(&name) {
                missing.push(name);
            }
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rodney_core::Field;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    fn catalog() -> FieldCatalog {
        FieldCatalog::from_fields(vec![
            Field::new("name", "Name", "Kickoff"),
            Field::new("status", "Status", "Working on it"),
            Field {
                id: "budget".into(),
                title: "Budget".into(),
                text: None,
                raw_value: Some("1200".into()),
            },
            Field {
                id: "owner".into(),
                title: "Owner".into(),
                text: None,
                raw_value: None,
            },
            Field::new("text9", "Template", "{Status}"),
        ])
    }

    // -- evaluate ----------------------------------------------------------

    #[test]
    fn plain_formula_is_trimmed_only() {
        assert_eq!(evaluate("  plain text \n", &catalog(), &today()), "plain text");
    }

    #[test]
    fn substitutes_fields() {
        assert_eq!(
            evaluate("{Status} - {Name}", &catalog(), &today()),
            "Working on it - Kickoff"
        );
    }

    #[test]
    fn title_lookup_ignores_case() {
        assert_eq!(evaluate("{sTaTuS}", &catalog(), &today()), "Working on it");
    }

    #[test]
    fn falls_back_to_raw_value_then_empty() {
        assert_eq!(evaluate("[{Budget}]", &catalog(), &today()), "[1200]");
        assert_eq!(evaluate("[{Owner}]", &catalog(), &today()), "[]");
    }

    #[test]
    fn unknown_placeholder_left_literal() {
        let out = evaluate("{Nope} / {Name}", &catalog(), &today());
        assert_eq!(out, "{Nope} / Kickoff");
        assert!(out.contains("{Nope}"));
    }

    #[test]
    fn repeated_placeholder_substituted_everywhere() {
        assert_eq!(evaluate("{Name}/{name}", &catalog(), &today()), "Kickoff/Kickoff");
    }

    #[test]
    fn field_values_are_not_rescanned() {
        assert_eq!(evaluate("{Template}", &catalog(), &today()), "{Status}");
    }

    #[test]
    fn date_value_in_field_is_not_rendered() {
        let cat = FieldCatalog::from_fields(vec![Field::new("t", "T", "{Date|format:YYYY}")]);
        assert_eq!(evaluate("{T}", &cat, &today()), "{Date|format:YYYY}");
    }

    #[test]
    fn renders_date_directives() {
        assert_eq!(
            evaluate("{Name} {Date|format:YYYY-MM-DD}", &catalog(), &today()),
            "Kickoff 2024-03-07"
        );
    }

    #[test]
    fn multiple_date_formats() {
        assert_eq!(
            evaluate("{Date|format:DD/MM} ({Date|format:YYYY})", &catalog(), &today()),
            "07/03 (2024)"
        );
    }

    #[test]
    fn date_directive_never_looked_up_as_field() {
        let cat = FieldCatalog::from_fields(vec![Field::new("d", "Date|format:YYYY", "field")]);
        assert_eq!(evaluate("{Date|format:YYYY}", &cat, &today()), "2024");
    }

    #[test]
    fn empty_date_pattern_stays_literal() {
        assert_eq!(evaluate("{Date|format:}", &catalog(), &today()), "{Date|format:}");
    }

    #[test]
    fn nested_braces_match_nearest_close() {
        assert_eq!(evaluate("{x{Name}}", &catalog(), &today()), "{x{Name}}");
    }

    #[test]
    fn empty_catalog_leaves_placeholders() {
        let empty = FieldCatalog::default();
        assert_eq!(evaluate(" {Status} ", &empty, &today()), "{Status}");
    }

    #[test]
    fn evaluation_is_deterministic() {
        let cat = catalog();
        let f = "{Status} {Date|format:YYYY-MM-DD} {Nope}";
        assert_eq!(evaluate(f, &cat, &today()), evaluate(f, &cat, &today()));
    }

    // -- preview -----------------------------------------------------------

    #[test]
    fn preview_without_catalog_is_verbatim() {
        let f = " {Status} {Date|format:YYYY} ";
        assert_eq!(preview(f, None, &today()), f);
        assert_eq!(preview(f, Some(&catalog()), &today()), "Working on it 2024");
    }

    // -- placeholders / unresolved -----------------------------------------

    #[test]
    fn lists_placeholders_in_order() {
        assert_eq!(
            placeholders("{A} {Date|format:MM} {B}"),
            vec![
                Placeholder::Field("A".into()),
                Placeholder::Date("MM".into()),
                Placeholder::Field("B".into()),
            ]
        );
    }

    #[test]
    fn unresolved_names_deduplicated() {
        assert_eq!(
            unresolved("{Nope} {Name} {Gone} {Nope} {Date|format:YYYY}", &catalog()),
            vec!["Nope", "Gone"]
        );
    }
}
