//! Shared rendering utilities.
//!
//! Every row of the pane is painted edge to edge over the palette background so
//! the light and dark palettes look right regardless of the terminal's own
//! colors. The helpers here build those rows as strings; components position
//! the cursor and print them.

use crate::page::{Line, Tone};
use crate::ui::theme::{Theme, ThemeColors};

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Takes at most `width` characters of `text`.
#[must_use]
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Accumulates a single styled row, tracking its visible width.
#[derive(Debug)]
pub struct RowWriter<'a> {
    out: String,
    width: usize,
    limit: usize,
    bg: &'a str,
}

impl<'a> RowWriter<'a> {
    /// Starts a row `limit` columns wide over the `bg` color.
    #[must_use]
    pub fn new(limit: usize, bg: &'a str) -> Self {
        Self {
            out: Theme::bg(bg),
            width: 0,
            limit,
            bg,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.width)
    }

    /// Writes `text` in `fg` (and `bg`, if given), clipped to the row.
    pub fn push(&mut self, text: &str, fg: &str, bg: Option<&str>, bold: bool) {
        let text = clip(text, self.remaining());
        if text.is_empty() {
            return;
        }
        self.out.push_str(&Theme::fg(fg));
        if let Some(bg) = bg {
            self.out.push_str(&Theme::bg(bg));
        }
        if bold {
            self.out.push_str(Theme::bold());
        }
        self.width += text.chars().count();
        self.out.push_str(&text);
        self.out.push_str(Theme::reset());
        self.out.push_str(&Theme::bg(self.bg));
    }

    /// Pads with background spaces up to column `col` (0-based).
    pub fn pad_to(&mut self, col: usize) {
        let target = col.min(self.limit);
        if target > self.width {
            self.out.push_str(&" ".repeat(target - self.width));
            self.width = target;
        }
    }

    /// Writes `text` with match ranges highlighted.
    ///
    /// `ranges` are byte ranges into `text`; ranges that do not fall on char
    /// boundaries are ignored.
    pub fn push_highlighted(&mut self, text: &str, ranges: &[(usize, usize)], fg: &str, bg: Option<&str>, colors: &ThemeColors) {
        let mut cursor = 0;
        for &(start, end) in ranges {
            let (Some(before), Some(matched)) = (text.get(cursor..start), text.get(start..end)) else {
                continue;
            };
            self.push(before, fg, bg, false);
            self.push(matched, &colors.match_highlight_fg, Some(&colors.match_highlight_bg), true);
            cursor = end;
        }
        if let Some(rest) = text.get(cursor..) {
            self.push(rest, fg, bg, false);
        }
    }

    /// Fills the rest of the row and returns the finished escape string.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.pad_to(self.limit);
        self.out.push_str(Theme::reset());
        self.out
    }
}

/// Renders one document line across a row `width` columns wide.
#[must_use]
pub fn styled_line(line: &Line, colors: &ThemeColors, width: usize) -> String {
    let mut row = RowWriter::new(width, &colors.background);
    row.pad_to(line.indent);
    for span in &line.spans {
        let (fg, bg) = colors.tone(span.tone);
        let bold = span.bold || matches!(span.tone, Tone::Heading | Tone::Button);
        row.push(&span.text, fg, bg, bold);
    }
    row.finish()
}

/// Removes ANSI escape sequences, leaving the visible text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
