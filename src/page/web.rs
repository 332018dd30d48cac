//! Live DOM backend.
//!
//! Offsets crossing the `Page` boundary are byte offsets into the Rust string;
//! the DOM indexes text in UTF-16 code units, so they are converted right
//! before a `Range` is built.

use std::borrow::Cow;

use web_sys::{Document, Element, Node, Window};

use super::Page;
use crate::domain::Rect;

// NodeFilter.SHOW_TEXT
const SHOW_TEXT: u32 = 0x4;

pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// `None` outside a browsing context.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// UTF-16 index of `byte_offset` in `text`, or `None` if it splits a character.
fn utf16_offset(text: &str, byte_offset: usize) -> Option<u32> {
    if !text.is_char_boundary(byte_offset) {
        return None;
    }
    u32::try_from(text[..byte_offset].encode_utf16().count()).ok()
}

impl Page for WebPage {
    type Element = Element;
    type Text = Node;

    fn text_content(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn text_nodes(&self, root: &Element) -> Box<dyn Iterator<Item = Node> + '_> {
        match self
            .document
            .create_tree_walker_with_what_to_show(root, SHOW_TEXT)
        {
            Ok(walker) => Box::new(std::iter::from_fn(move || {
                walker.next_node().ok().flatten()
            })),
            Err(e) => {
                log::warn!("TreeWalker unavailable: {e:?}");
                Box::new(std::iter::empty())
            }
        }
    }

    fn node_text(&self, node: &Node) -> Cow<'_, str> {
        Cow::Owned(node.text_content().unwrap_or_default())
    }

    fn range_rect(&self, node: &Node, start: usize, end: usize) -> Option<Rect> {
        let text = node.text_content().unwrap_or_default();
        let (start, end) = (utf16_offset(&text, start)?, utf16_offset(&text, end)?);
        if start > end {
            return None;
        }

        // setStart/setEnd throw IndexSizeError when the node shrank underneath us
        let range = self.document.create_range().ok()?;
        range.set_start(node, start).ok()?;
        range.set_end(node, end).ok()?;

        let r = range.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }

    fn parent_element(&self, node: &Node) -> Option<Element> {
        node.parent_element()
    }

    fn element_parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn has_line_through(&self, element: &Element) -> bool {
        let Ok(Some(style)) = self.window.get_computed_style(element) else {
            return false;
        };
        ["text-decoration-line", "text-decoration"]
            .iter()
            .filter_map(|property| style.get_property_value(property).ok())
            .any(|value| value.contains("line-through"))
    }
}
