use serde::{Deserialize, Serialize};

/// Screen-space rectangle in CSS pixels, origin top-left.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Zero-size (or NaN) rects come from collapsed or hidden content.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Inclusive containment test against the rect grown by `tolerance` on every side.
    pub fn contains_point(&self, x: f64, y: f64, tolerance: f64) -> bool {
        x >= self.left - tolerance
            && x <= self.right() + tolerance
            && y >= self.top - tolerance
            && y <= self.bottom() + tolerance
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_band_is_inclusive() {
        let rect = Rect::new(100.0, 50.0, 40.0, 16.0);

        // exactly `tolerance` outside each edge
        assert!(rect.contains_point(98.0, 58.0, 2.0));
        assert!(rect.contains_point(142.0, 58.0, 2.0));
        assert!(rect.contains_point(120.0, 48.0, 2.0));
        assert!(rect.contains_point(120.0, 68.0, 2.0));

        // one pixel further
        assert!(!rect.contains_point(97.0, 58.0, 2.0));
        assert!(!rect.contains_point(143.0, 58.0, 2.0));
        assert!(!rect.contains_point(120.0, 47.0, 2.0));
        assert!(!rect.contains_point(120.0, 69.0, 2.0));
    }

    #[test]
    fn degenerate_rects() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }
}
