//! The scrolling document.
//!
//! The page is composed into a [`Document`]: a list of styled [`Line`]s plus the
//! line range of every rendered section. Composition is pure; the UI layer only
//! slices the document by scroll offset and prints it.
//!
//! ```text
//! Content + dynamic state + width ──compose──▶ Document { lines, bounds }
//!                                                   │
//!                          scroll offset + rows ────┴──▶ visible window
//! ```
//!
//! Section heights depend only on the content and the pane width, never on the
//! rotator text or the form state, so the observer's results depend only on the
//! scroll position.

pub mod builder;
pub mod navbar;
pub mod sections;

pub use builder::{wrap, DocumentBuilder};
pub use navbar::{NavbarLayout, NavbarSlot, TrailingHit};
pub use sections::{compose, PageState, FORM_HEIGHT};

use crate::features::SectionBounds;

/// Semantic style of a span; the active palette maps it to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Dim,
    Accent,
    Heading,
    Badge,
    Tag,
    Link,
    Success,
    Error,
    Input,
    InputFocused,
    Button,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            bold: true,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// One document line: a left indent followed by styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub indent: usize,
    pub spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(indent: usize, spans: Vec<Span>) -> Self {
        Self { indent, spans }
    }

    /// Display width excluding the indent.
    #[must_use]
    pub fn content_width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Concatenated text without the indent.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A composed page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    lines: Vec<Line>,
    bounds: Vec<SectionBounds>,
}

impl Document {
    /// Pairs rendered lines with the section ranges they were built from.
    #[must_use]
    pub fn new(lines: Vec<Line>, bounds: Vec<SectionBounds>) -> Self {
        Self { lines, bounds }
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line ranges of the rendered sections, in document order.
    #[must_use]
    pub fn bounds(&self) -> &[SectionBounds] {
        &self.bounds
    }

    /// The lines visible from `offset` in a viewport of `height` lines.
    #[must_use]
    pub fn window(&self, offset: usize, height: usize) -> &[Line] {
        let start = offset.min(self.lines.len());
        let end = (start + height).min(self.lines.len());
        &self.lines[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SectionId;

    fn doc(len: usize) -> Document {
        let lines = (0..len).map(|i| Line::new(0, vec![Span::new(i.to_string(), Tone::Normal)])).collect();
        let bounds = vec![SectionBounds { section: SectionId::About, start: 3, end: 7 }];
        Document::new(lines, bounds)
    }

    #[test]
    fn window_is_clamped_to_document() {
        let d = doc(10);
        assert_eq!(d.window(8, 5).len(), 2);
        assert!(d.window(20, 5).is_empty());
        assert_eq!(d.bounds()[0].section, SectionId::About);
    }
}
