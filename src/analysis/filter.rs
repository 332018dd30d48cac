//! Visibility and strike-out checks.
//!
//! Both are cheap stand-ins for a full style computation: a text node counts as
//! rendered when its first character has a non-empty box, and a price counts as
//! superseded when one of its nearest ancestors draws a line through it.

use crate::config::STRIKE_OUT_DEPTH;
use crate::page::Page;

/// True only if the node's first character measures as a non-degenerate rect.
pub fn is_rendered_text_node<P: Page>(page: &P, node: &P::Text) -> bool {
    let text = page.node_text(node);
    let Some(first) = text.chars().next() else {
        return false;
    };
    page.range_rect(node, 0, first.len_utf8())
        .is_some_and(|rect| !rect.is_degenerate())
}

/// Walks from `anchor` through at most `STRIKE_OUT_DEPTH` elements (anchor included)
/// looking for a `line-through` decoration.
pub fn is_struck_through<P: Page>(page: &P, anchor: &P::Element) -> bool {
    let mut current = Some(anchor.clone());
    for _ in 0..STRIKE_OUT_DEPTH {
        let Some(element) = current else {
            return false;
        };
        if page.has_line_through(&element) {
            return true;
        }
        current = page.element_parent(&element);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementStyle, StaticPage};

    #[test]
    fn empty_and_hidden_nodes_are_not_rendered() {
        let mut page = StaticPage::default();
        let root = page.root();
        let visible = page.append_text(root, "$5");
        let empty = page.append_text(root, "");
        let hidden = page.append_element(root, ElementStyle::hidden());
        let inside_hidden = page.append_text(hidden, "$5");

        assert!(is_rendered_text_node(&page, &visible));
        assert!(!is_rendered_text_node(&page, &empty));
        assert!(!is_rendered_text_node(&page, &inside_hidden));
    }

    #[test]
    fn line_through_within_four_levels() {
        let mut page = StaticPage::default();
        let root = page.root();
        let del = page.append_element(root, ElementStyle::line_through());
        let mut el = del;
        let mut chain = Vec::new();
        for _ in 0..4 {
            el = page.append_element(el, ElementStyle::default());
            chain.push(el);
        }

        // anchor itself struck
        assert!(is_struck_through(&page, &del));
        // three levels below the <del>: del is the 4th element inspected
        assert!(is_struck_through(&page, &chain[2]));
        // four levels below: out of reach
        assert!(!is_struck_through(&page, &chain[3]));
        assert!(!is_struck_through(&page, &root));
    }
}
