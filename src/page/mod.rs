//! Read-only view of a rendered document.
//!
//! The engine only needs a handful of queries: walk text nodes, read their
//! text, measure a substring, climb to ancestors and check one computed style.
//! `StaticPage` answers them from an in-memory tree laid out on a monospace
//! grid; `web::WebPage` answers them from the live DOM on wasm builds.

use std::borrow::Cow;

use crate::domain::Rect;

pub mod static_page;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use static_page::{ElementId, ElementStyle, GridMetrics, StaticPage, TextId};

pub trait Page {
    /// Handle to an element (something that can carry style and children).
    type Element: Clone;
    /// Handle to a text node.
    type Text;

    /// Concatenated text of every text node under `element`, rendered or not.
    fn text_content(&self, element: &Self::Element) -> String;

    /// Depth-first walk over the text nodes under `root`.
    /// Lazy and single-use: callers cap it with `take`.
    fn text_nodes(&self, root: &Self::Element) -> Box<dyn Iterator<Item = Self::Text> + '_>;

    fn node_text(&self, node: &Self::Text) -> Cow<'_, str>;

    /// Bounding rect of the byte range `[start, end)` of the node's text.
    /// `None` when the range cannot be built (stale or invalid offsets).
    /// A built range over hidden content yields a zero-size rect.
    fn range_rect(&self, node: &Self::Text, start: usize, end: usize) -> Option<Rect>;

    fn parent_element(&self, node: &Self::Text) -> Option<Self::Element>;

    fn element_parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Computed text decoration of `element` includes `line-through`.
    fn has_line_through(&self, element: &Self::Element) -> bool;
}
