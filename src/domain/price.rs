use serde::Serialize;

/// A provisional currency match inside a block of text.
///
/// `start_offset..end_offset` are byte offsets of `raw_amount` within the exact
/// text that was scanned. Nothing about visibility or geometry is known yet.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PriceCandidate {
    pub currency: String,
    pub raw_amount: String,
    pub suffix: Option<String>,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl PriceCandidate {
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start_offset..self.end_offset
    }
}

/// Canonical value of a price: always finite and strictly positive.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct NormalizedAmount(f64);

impl NormalizedAmount {
    /// Returns `None` for NaN, infinities, zero and negatives.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for NormalizedAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", crate::utils::format::format_price(self.0))
    }
}
