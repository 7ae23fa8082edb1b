//! The `{Date|format:...}` mini-language.

use chrono::Datelike;

/// Render `date` with `pattern`.
///
/// Recognized tokens: `YYYY` (4-digit year), `MM` (2-digit month) and `DD`
/// (2-digit day). Only the FIRST occurrence of each token is replaced, in the
/// order year, month, day, each on the output of the previous step; every
/// other character passes through. `MM/MM` therefore renders as `03/MM`.
pub fn format_date<D: Datelike>(date: &D, pattern: &str) -> String {
    pattern
        .replacen("YYYY", &format!("{:04}", date.year()), 1)
        .replacen("MM", &format!("{:02}", date.month()), 1)
        .replacen("DD", &format!("{:02}", date.day()), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn march_7() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn iso_pattern() {
        assert_eq!(format_date(&march_7(), "YYYY-MM-DD"), "2024-03-07");
    }

    #[test]
    fn other_characters_pass_through() {
        assert_eq!(format_date(&march_7(), "DD.MM.YYYY (week)"), "07.03.2024 (week)");
        assert_eq!(format_date(&march_7(), "no tokens"), "no tokens");
    }

    // Known oddity kept for compatibility: a repeated token is only
    // substituted once.
    #[test]
    fn repeated_token_replaced_once() {
        assert_eq!(format_date(&march_7(), "MM/MM"), "03/MM");
        assert_eq!(format_date(&march_7(), "YYYY YYYY"), "2024 YYYY");
    }

    #[test]
    fn small_years_are_zero_padded() {
        let d = NaiveDate::from_ymd_opt(987, 12, 31).unwrap();
        assert_eq!(format_date(&d, "YYYY-MM-DD"), "0987-12-31");
    }

    #[test]
    fn works_with_datetimes() {
        let dt = march_7().and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(format_date(&dt, "YYYYMMDD"), "20240307");
    }
}
