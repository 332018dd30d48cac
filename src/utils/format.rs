//! Display formatting for prices and wage figures (en-US conventions).

/// Formats a price the way the tooltip header shows it:
/// dollar sign, thousands grouping, 0 to 2 fraction digits.
/// - 49990.0  -> "$49,990"
/// - 49.99    -> "$49.99"
/// - 49.5     -> "$49.5"
pub fn format_price(price: f64) -> String {
    format!("${}", format_amount(price, 2))
}

/// Whole-dollar figure with grouping, e.g. "$29,120".
pub fn format_whole_dollars(value: f64) -> String {
    format!("${}", format_amount(value, 0))
}

/// Fixed number of fraction digits, grouped integer part.
pub fn format_fixed(value: f64, fraction_digits: usize) -> String {
    let (negative, int_part, frac_part) = split_fixed(value, fraction_digits);
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Up to `max_fraction_digits`, trailing zeros dropped.
pub fn format_amount(value: f64, max_fraction_digits: usize) -> String {
    let (negative, int_part, frac_part) = split_fixed(value, max_fraction_digits);
    let frac_part = frac_part.trim_end_matches('0');
    let mut out = String::new();
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn split_fixed(value: f64, fraction_digits: usize) -> (bool, String, String) {
    if !value.is_finite() {
        return (false, "0".to_string(), String::new());
    }
    let fixed = format!("{:.*}", fraction_digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (fixed, String::new()),
    };
    (value < 0.0, int_part, frac_part)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
