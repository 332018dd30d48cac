//! Substring geometry.

use crate::domain::Rect;
use crate::page::Page;

/// Screen rect of `[start_offset, end_offset)` within `node`.
///
/// `None` when the range cannot be built (offsets invalidated by a concurrent
/// mutation) or when it measures as zero-size.
pub fn rect_for<P: Page>(
    page: &P,
    node: &P::Text,
    start_offset: usize,
    end_offset: usize,
) -> Option<Rect> {
    if start_offset >= end_offset {
        return None;
    }
    page.range_rect(node, start_offset, end_offset)
        .filter(|rect| !rect.is_degenerate())
}

/// Pointer containment with the configured edge tolerance.
pub fn contains_point(rect: &Rect, x: f64, y: f64) -> bool {
    rect.contains_point(x, y, crate::config::DEFAULT_TOLERANCE_PX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::find_candidates;
    use crate::page::StaticPage;

    #[test]
    fn rect_covers_only_the_amount() {
        let page = StaticPage::from_text("pay $120 now");
        let node = page.texts().next().unwrap();
        let c = find_candidates("pay $120 now").next().unwrap();

        let rect = rect_for(&page, &node, c.start_offset, c.end_offset).unwrap();
        assert_eq!(rect, Rect::new(40.0, 0.0, 24.0, 16.0));
        assert!(contains_point(&rect, 38.0, 8.0));
        assert!(!contains_point(&rect, 37.0, 8.0));
    }

    #[test]
    fn stale_offsets_are_skipped() {
        let mut page = StaticPage::from_text("pay $120 now");
        let node = page.texts().next().unwrap();
        page.set_text(node, "$1");

        assert!(rect_for(&page, &node, 5, 8).is_none());
        assert!(rect_for(&page, &node, 1, 1).is_none());
    }
}
