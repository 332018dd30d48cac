//! Amount normalization.
//!
//! Resolves locale-ambiguous digit grouping into a canonical number. When both
//! `.` and `,` appear, whichever comes last is the decimal point. A lone `,` is
//! a decimal point only when it leaves exactly two trailing digits, so `"1,234"`
//! stays one thousand two hundred thirty-four. That rule is a heuristic and is
//! wrong for currencies with three fractional digits.

use thiserror::Error;

use crate::domain::NormalizedAmount;

const THIN_SPACE: char = '\u{202F}';
const NO_BREAK_SPACE: char = '\u{00A0}';

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParseFailure {
    #[error("amount has no parseable digits")]
    NotANumber,
    #[error("amount {0} is not positive")]
    NonPositive(f64),
}

/// Multiplier for a magnitude suffix. Unknown or absent suffixes are 1.
pub fn suffix_multiplier(suffix: Option<&str>) -> f64 {
    let Some(suffix) = suffix else {
        return 1.0;
    };
    match suffix.to_ascii_lowercase().as_str() {
        "k" => 1e3,
        "m" | "mm" | "mn" => 1e6,
        "b" | "bn" => 1e9,
        _ => 1.0,
    }
}

/// Convert a raw amount string (plus optional suffix) into a positive value.
pub fn normalize(raw_amount: &str, suffix: Option<&str>) -> Result<NormalizedAmount, ParseFailure> {
    let stripped: String = raw_amount
        .chars()
        .filter(|&c| c != THIN_SPACE && c != NO_BREAK_SPACE)
        .collect();
    let negative = stripped.trim_start().starts_with('-');

    let canonical = resolve_separators(&stripped);
    let digits: String = canonical
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let magnitude = parse_leading_float(&digits).ok_or(ParseFailure::NotANumber)?;
    let signed = if negative { -magnitude } else { magnitude };
    let value = signed * suffix_multiplier(suffix);

    NormalizedAmount::new(value).ok_or(ParseFailure::NonPositive(value))
}

fn resolve_separators(s: &str) -> String {
    let last_dot = s.rfind('.');
    let last_comma = s.rfind(',');

    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if dot > comma => s.replace(',', ""),
        (Some(_), Some(_)) => s.replace('.', "").replacen(',', ".", 1),
        (None, Some(_)) => {
            let parts: Vec<&str> = s.split(',').collect();
            if parts.len() == 2 && parts[1].chars().count() == 2 {
                format!("{}.{}", parts[0], parts[1])
            } else {
                s.replace(',', "")
            }
        }
        _ => s.to_string(),
    }
}

// Longest `digits[.digits]` prefix; extra dots end the number.
fn parse_leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    let value: f64 = s[..end].trim_end_matches('.').parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn value(raw: &str, suffix: Option<&str>) -> f64 {
        normalize(raw, suffix).unwrap().value()
    }

    #[test]
    fn grouping_conventions_agree() {
        for raw in ["1,234.56", "1.234,56", "1234.56", "1234,56", "1\u{202F}234,56"] {
            assert!(approx_eq(value(raw, None), 1234.56), "{raw}");
        }
    }

    #[test]
    fn lone_comma_heuristic() {
        assert!(approx_eq(value("1,234", None), 1234.0));
        assert!(approx_eq(value("12,50", None), 12.5));
        assert!(approx_eq(value("1,234,567", None), 1_234_567.0));
        assert!(approx_eq(value("1\u{00A0}234", None), 1234.0));
    }

    #[test]
    fn several_group_separators_with_decimal() {
        assert!(approx_eq(value("1.234.567,89", None), 1_234_567.89));
        assert!(approx_eq(value("1,234,567.89", None), 1_234_567.89));
    }

    #[test]
    fn suffixes_multiply() {
        assert!(approx_eq(value("2.5", Some("k")), 2500.0));
        assert!(approx_eq(value("3", Some("bn")), 3e9));
        assert!(approx_eq(value("3", Some("B")), 3e9));
        assert!(approx_eq(value("4", Some("MM")), 4e6));
        assert!(approx_eq(value("4", Some("mn")), 4e6));
        assert!(approx_eq(value("4", Some("x")), 4.0));
    }

    #[test]
    fn invalid_amounts_are_rejected() {
        assert_eq!(normalize("abc", None), Err(ParseFailure::NotANumber));
        assert_eq!(normalize("", None), Err(ParseFailure::NotANumber));
        assert_eq!(normalize(".", None), Err(ParseFailure::NotANumber));
        assert!(matches!(normalize("-5", None), Err(ParseFailure::NonPositive(_))));
        assert!(matches!(normalize("0", None), Err(ParseFailure::NonPositive(_))));
        assert!(matches!(normalize("0,00", Some("k")), Err(ParseFailure::NonPositive(_))));
    }

    #[test]
    fn multiple_dots_parse_leading_number() {
        assert!(approx_eq(value("1.2.3", None), 1.2));
    }
}
