//! UI components.
//!
//! Each component prints its rows at an explicit position and returns the
//! next free row:
//!
//! - [`navbar`]: brand, nav items, profile link, theme glyph, underline
//! - [`document`]: the visible window of the page
//! - [`palette`]: command palette overlay
//! - [`footer`]: key-hint bar

pub mod document;
pub mod footer;
pub mod navbar;
pub mod palette;

use crate::app::state::NAVBAR_ROWS;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use document::render_document;
use footer::render_footer;
use navbar::render_navbar;
use palette::render_palette;

/// Draws a full frame: navbar, document viewport, optional overlay, hint bar.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if rows == 0 || cols == 0 {
        return;
    }

    let mut current_row = 1;
    current_row = render_navbar(current_row, &vm.navbar, theme, cols);

    let viewport_rows = rows.saturating_sub(NAVBAR_ROWS + 1);
    let footer_row = render_document(current_row, &vm.lines, theme, cols, viewport_rows);

    if let Some(palette) = &vm.palette {
        render_palette(current_row + 1, palette, theme, cols);
    }

    render_footer(footer_row.min(rows), &vm.footer, theme, cols);
}
