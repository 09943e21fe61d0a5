//! Line-oriented document assembly with word wrapping.

use super::{Document, Line, Span, Tone};
use crate::domain::SectionId;
use crate::features::SectionBounds;

/// Widest text column used for prose, regardless of pane width.
pub const MAX_TEXT_WIDTH: usize = 76;

/// Splits `text` into lines of at most `width` characters, breaking on
/// whitespace. Words longer than `width` are split hard.
///
/// # Examples
///
/// ```
/// use termfolio::page::wrap;
///
/// assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
/// assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
/// assert!(wrap("", 10).is_empty());
/// ```
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Truncates to `width` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Accumulates lines and section ranges for a pane of a given width.
#[derive(Debug)]
pub struct DocumentBuilder {
    width: usize,
    lines: Vec<Line>,
    bounds: Vec<SectionBounds>,
    open: Option<(SectionId, usize)>,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            lines: Vec::new(),
            bounds: Vec::new(),
            open: None,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Width of the prose column.
    #[must_use]
    pub fn text_width(&self) -> usize {
        self.width.saturating_sub(4).clamp(1, MAX_TEXT_WIDTH)
    }

    /// Left indent of the prose column.
    #[must_use]
    pub fn margin(&self) -> usize {
        (self.width.saturating_sub(self.text_width())) / 2
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::blank());
    }

    pub fn blanks(&mut self, count: usize) {
        for _ in 0..count {
            self.blank();
        }
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Spans placed at the prose margin plus `indent`.
    pub fn left(&mut self, indent: usize, spans: Vec<Span>) {
        let margin = self.margin() + indent;
        self.lines.push(Line::new(margin, spans));
    }

    /// Spans centered in the pane.
    pub fn centered(&mut self, spans: Vec<Span>) {
        let width: usize = spans.iter().map(Span::width).sum();
        let indent = self.width.saturating_sub(width) / 2;
        self.lines.push(Line::new(indent, spans));
    }

    /// Word-wrapped prose at the margin.
    pub fn paragraph(&mut self, text: &str, tone: Tone) {
        self.paragraph_indented(text, tone, 0);
    }

    pub fn paragraph_indented(&mut self, text: &str, tone: Tone, indent: usize) {
        let width = self.text_width().saturating_sub(indent);
        for line in wrap(text, width) {
            self.left(indent, vec![Span::new(line, tone)]);
        }
    }

    /// Word-wrapped prose, each line centered.
    pub fn centered_paragraph(&mut self, text: &str, tone: Tone) {
        for line in wrap(text, self.text_width()) {
            self.centered(vec![Span::new(line, tone)]);
        }
    }

    /// Packs chips onto lines, wrapping between chips.
    pub fn chips(&mut self, labels: &[String], tone: Tone) {
        let width = self.text_width();
        let mut row: Vec<Span> = Vec::new();
        let mut row_width = 0;
        for label in labels {
            let chip = format!("[{}]", truncate(label, width.saturating_sub(2)));
            let chip_width = chip.chars().count();
            let needed = if row.is_empty() { chip_width } else { row_width + 1 + chip_width };
            if needed > width && !row.is_empty() {
                self.centered(std::mem::take(&mut row));
                row_width = 0;
            }
            if !row.is_empty() {
                row.push(Span::new(" ", Tone::Normal));
                row_width += 1;
            }
            row_width += chip_width;
            row.push(Span::new(chip, tone));
        }
        if !row.is_empty() {
            self.centered(row);
        }
    }

    /// A horizontal rule across the prose column.
    pub fn rule(&mut self) {
        let width = self.text_width();
        self.left(0, vec![Span::new("─".repeat(width), Tone::Rule)]);
    }

    /// Starts a section; its range runs until [`Self::end_section`].
    pub fn begin_section(&mut self, section: SectionId) {
        self.end_section();
        self.open = Some((section, self.lines.len()));
    }

    pub fn end_section(&mut self) {
        if let Some((section, start)) = self.open.take() {
            self.bounds.push(SectionBounds {
                section,
                start,
                end: self.lines.len(),
            });
        }
    }

    /// Appends `block` padded or cut to exactly `height` lines.
    pub fn fixed_block(&mut self, mut block: Vec<Line>, height: usize) {
        block.resize_with(height, Line::blank);
        self.lines.extend(block);
    }

    /// The raw lines, discarding section ranges.
    #[must_use]
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    #[must_use]
    pub fn finish(mut self) -> Document {
        self.end_section();
        Document::new(self.lines, self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let text = "As a web developer, I focus on creating intuitive and engaging user experiences.";
        for width in [10, 20, 33] {
            for line in wrap(text, width) {
                assert!(line.chars().count() <= width, "{line:?} wider than {width}");
            }
        }
    }

    #[test]
    fn wrap_keeps_every_word() {
        let text = "Hi, I'm Alex and I build things";
        let joined = wrap(text, 8).join(" ");
        assert_eq!(joined, text);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Software Developer", 8), "Softwar…");
        assert_eq!(truncate("short", 8), "short");
    }

    #[test]
    fn sections_record_line_ranges() {
        let mut b = DocumentBuilder::new(80);
        b.begin_section(SectionId::Home);
        b.blanks(3);
        b.begin_section(SectionId::About);
        b.blanks(2);
        b.end_section();
        b.blank();
        let doc = b.finish();
        assert_eq!(doc.bounds()[0], SectionBounds { section: SectionId::Home, start: 0, end: 3 });
        assert_eq!(doc.bounds()[1], SectionBounds { section: SectionId::About, start: 3, end: 5 });
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn chips_wrap_to_text_width() {
        let mut b = DocumentBuilder::new(24);
        let labels: Vec<String> = ["JavaScript", "TypeScript", "React", "Git"].iter().map(|s| (*s).to_string()).collect();
        b.chips(&labels, Tone::Tag);
        let doc = b.finish();
        assert!(doc.len() > 1);
        assert!(doc.lines().iter().all(|l| l.content_width() <= 20));
    }
}
