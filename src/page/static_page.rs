//! In-memory page with deterministic geometry.
//!
//! Every rendered text node gets its own line; characters sit on a fixed grid
//! (`GridMetrics`). Content under a hidden element still exists for
//! `text_content` but measures as a zero-size rect, like `display: none`.

use std::borrow::Cow;

use super::Page;
use crate::domain::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextId(usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementStyle {
    pub hidden: bool,
    pub line_through: bool,
}

impl ElementStyle {
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Default::default()
        }
    }

    pub fn line_through() -> Self {
        Self {
            line_through: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 16.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Child {
    Element(ElementId),
    Text(TextId),
}

#[derive(Debug)]
struct ElementData {
    parent: Option<ElementId>,
    style: ElementStyle,
    children: Vec<Child>,
}

#[derive(Debug)]
struct TextData {
    parent: ElementId,
    content: String,
    // Line index; None for text under a hidden ancestor
    row: Option<usize>,
}

#[derive(Debug)]
pub struct StaticPage {
    elements: Vec<ElementData>,
    texts: Vec<TextData>,
    metrics: GridMetrics,
    next_row: usize,
}

impl Default for StaticPage {
    fn default() -> Self {
        Self::new(GridMetrics::default())
    }
}

impl StaticPage {
    /// Empty page holding only the root element.
    pub fn new(metrics: GridMetrics) -> Self {
        Self {
            elements: vec![ElementData {
                parent: None,
                style: ElementStyle::default(),
                children: Vec::new(),
            }],
            texts: Vec::new(),
            metrics,
            next_row: 0,
        }
    }

    /// One paragraph element per line of `text`, each holding a single text node.
    pub fn from_text(text: &str) -> Self {
        let mut page = Self::default();
        let root = page.root();
        for line in text.lines() {
            let paragraph = page.append_element(root, ElementStyle::default());
            page.append_text(paragraph, line);
        }
        page
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn append_element(&mut self, parent: ElementId, style: ElementStyle) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(ElementData {
            parent: Some(parent),
            style,
            children: Vec::new(),
        });
        self.elements[parent.0].children.push(Child::Element(id));
        id
    }

    pub fn append_text(&mut self, parent: ElementId, content: impl Into<String>) -> TextId {
        let row = if self.is_displayed(parent) {
            self.next_row += 1;
            Some(self.next_row - 1)
        } else {
            None
        };
        let id = TextId(self.texts.len());
        self.texts.push(TextData {
            parent,
            content: content.into(),
            row,
        });
        self.elements[parent.0].children.push(Child::Text(id));
        id
    }

    /// Replace a text node's content in place, keeping its line.
    /// Offsets computed against the old content become stale.
    pub fn set_text(&mut self, node: TextId, content: impl Into<String>) {
        self.texts[node.0].content = content.into();
    }

    fn is_displayed(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            let data = &self.elements[id.0];
            if data.style.hidden {
                return false;
            }
            current = data.parent;
        }
        true
    }

    /// All text nodes in document order.
    pub fn texts(&self) -> impl Iterator<Item = TextId> + '_ {
        (0..self.texts.len()).map(TextId)
    }

    /// Center of the character starting at `byte_offset`, if it is rendered.
    pub fn char_center(&self, node: TextId, byte_offset: usize) -> Option<(f64, f64)> {
        let text = &self.texts.get(node.0)?.content;
        let ch = text.get(byte_offset..)?.chars().next()?;
        let rect = self.range_rect(&node, byte_offset, byte_offset + ch.len_utf8())?;
        (!rect.is_degenerate()).then(|| rect.center())
    }

    /// Composed event path for a pointer at `(x, y)`, innermost element first.
    /// Falls back to the root when no rendered text sits under the point.
    pub fn path_at(&self, x: f64, y: f64) -> Vec<ElementId> {
        let target = self
            .texts()
            .find(|id| {
                let data = &self.texts[id.0];
                self.range_rect(id, 0, data.content.len())
                    .is_some_and(|rect| !rect.is_degenerate() && rect.contains_point(x, y, 0.0))
            })
            .map(|id| self.texts[id.0].parent)
            .unwrap_or_else(|| self.root());
        self.path_from(target)
    }

    /// `element` followed by its ancestors up to the root.
    pub fn path_from(&self, element: ElementId) -> Vec<ElementId> {
        let mut path = vec![element];
        let mut current = self.elements[element.0].parent;
        while let Some(id) = current {
            path.push(id);
            current = self.elements[id.0].parent;
        }
        path
    }
}

impl Page for StaticPage {
    type Element = ElementId;
    type Text = TextId;

    fn text_content(&self, element: &ElementId) -> String {
        self.text_nodes(element)
            .map(|id| self.texts[id.0].content.as_str())
            .collect()
    }

    fn text_nodes(&self, root: &ElementId) -> Box<dyn Iterator<Item = TextId> + '_> {
        let mut stack = vec![Child::Element(*root)];
        Box::new(std::iter::from_fn(move || {
            while let Some(child) = stack.pop() {
                match child {
                    Child::Text(id) => return Some(id),
                    Child::Element(id) => {
                        stack.extend(self.elements[id.0].children.iter().rev().copied());
                    }
                }
            }
            None
        }))
    }

    fn node_text(&self, node: &TextId) -> Cow<'_, str> {
        Cow::Borrowed(self.texts[node.0].content.as_str())
    }

    fn range_rect(&self, node: &TextId, start: usize, end: usize) -> Option<Rect> {
        let data = self.texts.get(node.0)?;
        let content = &data.content;
        if start > end || !content.is_char_boundary(start) || !content.is_char_boundary(end) {
            return None;
        }
        let Some(row) = data.row else {
            return Some(Rect::default());
        };

        let start_col = content[..start].chars().count() as f64;
        let len = content[start..end].chars().count() as f64;
        let m = &self.metrics;
        Some(Rect::new(
            m.origin_x + start_col * m.char_width,
            m.origin_y + row as f64 * m.line_height,
            len * m.char_width,
            m.line_height,
        ))
    }

    fn parent_element(&self, node: &TextId) -> Option<ElementId> {
        self.texts.get(node.0).map(|data| data.parent)
    }

    fn element_parent(&self, element: &ElementId) -> Option<ElementId> {
        self.elements.get(element.0).and_then(|data| data.parent)
    }

    fn has_line_through(&self, element: &ElementId) -> bool {
        self.elements
            .get(element.0)
            .is_some_and(|data| data.style.line_through)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_is_depth_first_in_document_order() {
        let mut page = StaticPage::default();
        let root = page.root();
        let a = page.append_element(root, ElementStyle::default());
        let t1 = page.append_text(a, "one");
        let b = page.append_element(a, ElementStyle::default());
        let t2 = page.append_text(b, "two");
        let t3 = page.append_text(root, "three");

        let order: Vec<_> = page.text_nodes(&root).collect();
        assert_eq!(order, vec![t1, t2, t3]);
        assert_eq!(page.text_content(&root), "onetwothree");
        assert_eq!(page.text_content(&b), "two");
    }

    #[test]
    fn geometry_follows_the_grid() {
        let page = StaticPage::from_text("first\nan $8 item");
        let second = page.texts().nth(1).unwrap();

        let rect = page.range_rect(&second, 4, 5).unwrap();
        assert_eq!(rect, Rect::new(32.0, 16.0, 8.0, 16.0));
        assert_eq!(page.char_center(second, 4), Some((36.0, 24.0)));
    }

    #[test]
    fn hidden_content_measures_zero() {
        let mut page = StaticPage::default();
        let root = page.root();
        let hidden = page.append_element(root, ElementStyle::hidden());
        let inner = page.append_element(hidden, ElementStyle::default());
        let t = page.append_text(inner, "$10");

        assert_eq!(page.range_rect(&t, 0, 1), Some(Rect::default()));
        assert_eq!(page.char_center(t, 0), None);
        assert_eq!(page.text_content(&root), "$10");
    }

    #[test]
    fn invalid_ranges_fail_to_build() {
        let page = StaticPage::from_text("€5");
        let t = page.texts().next().unwrap();
        assert!(page.range_rect(&t, 1, 2).is_none()); // inside the € bytes
        assert!(page.range_rect(&t, 3, 2).is_none());
        assert!(page.range_rect(&t, 0, 10).is_none());
        assert!(page.range_rect(&t, 3, 4).is_some());
    }

    #[test]
    fn path_at_point() {
        let page = StaticPage::from_text("abc\ndef");
        let path = page.path_at(4.0, 20.0);
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(&page.root()));
        assert_eq!(page.path_at(500.0, 500.0), vec![page.root()]);
    }
}
