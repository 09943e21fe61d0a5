//! The scrolling document viewport.

use crate::page::Line;
use crate::ui::helpers::{position_cursor, styled_line, RowWriter};
use crate::ui::theme::Theme;

/// Prints `height` rows starting at `row`, blank-filling past the document end.
pub fn render_document(row: usize, lines: &[Line], theme: &Theme, cols: usize, height: usize) -> usize {
    for offset in 0..height {
        position_cursor(row + offset, 1);
        match lines.get(offset) {
            Some(line) => print!("{}", styled_line(line, &theme.colors, cols)),
            None => print!("{}", RowWriter::new(cols, &theme.colors.background).finish()),
        }
    }
    row + height
}
