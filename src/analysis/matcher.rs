//! Currency token matching.
//!
//! `find_candidates` yields every currency-prefixed amount in a block of text,
//! left to right, without overlaps. `looks_like_price` is the cheap gate run on
//! a short sample of large containers before paying for the full search.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::PriceCandidate;

// Groups: 1 = currency marker, 2 = amount, 3 = magnitude suffix
static CURRENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[\s(])(USD|EUR|GBP|CAD|AUD|JPY|INR|[$€£¥₹])\s*([0-9]{1,3}(?:[.,\x{202F}\x{00A0}][0-9]{2,3})*(?:[.,][0-9]{2})?|[0-9]+(?:[.,][0-9]{2})?)(?:\s?(k|m|b|bn|mm|mn))?\b",
    )
    .unwrap()
});

// Marker immediately followed by a digit; codes are matched case-sensitively here
static QUICK_SCAN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\$|£|€|¥|₹|USD|EUR|GBP|CAD|AUD|JPY|INR)\s*[0-9]").unwrap());

/// True when `sample` contains a currency marker directly followed by a digit.
pub fn looks_like_price(sample: &str) -> bool {
    QUICK_SCAN_PATTERN.is_match(sample)
}

/// The first `max_chars` characters of `text` (whole text if shorter).
pub fn sample_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Lazily find price candidates in `text`.
pub fn find_candidates(text: &str) -> Candidates<'_> {
    Candidates { text, pos: 0 }
}

/// Iterator returned by [`find_candidates`].
///
/// Each search resumes right after the previous amount substring rather than
/// after the whole match, so a suffix or separator never swallows the marker
/// of an adjacent price.
pub struct Candidates<'t> {
    text: &'t str,
    pos: usize,
}

impl Iterator for Candidates<'_> {
    type Item = PriceCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.text.len() {
            return None;
        }
        let caps = CURRENCY_PATTERN.captures_at(self.text, self.pos)?;
        let (currency, amount) = (caps.get(1)?, caps.get(2)?);

        // amount always holds at least one digit, so this strictly advances
        self.pos = amount.end();

        Some(PriceCandidate {
            currency: currency.as_str().to_string(),
            raw_amount: amount.as_str().to_string(),
            suffix: caps.get(3).map(|m| m.as_str().to_string()),
            start_offset: amount.start(),
            end_offset: amount.end(),
        })
    }
}
