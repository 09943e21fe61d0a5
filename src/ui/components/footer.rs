//! Key-hint bar at the bottom of the pane.

use crate::ui::helpers::{position_cursor, RowWriter};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Builds the hint bar: mode badge, hints, and the scroll position right-aligned.
///
/// Hints are cut before they would overlap the position indicator.
#[must_use]
pub fn footer_row(footer: &FooterInfo, theme: &Theme, cols: usize) -> String {
    let colors = &theme.colors;
    let mut row = RowWriter::new(cols, colors.navbar_bg());

    row.push(&format!(" {} ", footer.mode_label), &colors.badge_fg, Some(&colors.badge_bg), true);
    row.pad_to(row.width() + 1);

    let position_width = footer.position.chars().count() + 1;
    let hint_room = cols.saturating_sub(row.width() + position_width + 1);
    let hints: String = footer.keybindings.chars().take(hint_room).collect();
    row.push(&hints, &colors.text_dim, None, false);

    row.pad_to(cols.saturating_sub(position_width));
    row.push(&footer.position, &colors.text_dim, None, false);
    row.finish()
}

/// Prints the hint bar at `row` and returns the next row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", footer_row(footer, theme, cols));
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn position_stays_visible_on_narrow_panes() {
        let footer = FooterInfo {
            mode_label: "NORMAL",
            keybindings: "j/k scroll  1-4 jump  / search  t theme  c contact  o GitHub  q hide".to_string(),
            position: "42%".to_string(),
        };
        let visible = strip_ansi(&footer_row(&footer, &Theme::default(), 40));
        assert_eq!(visible.chars().count(), 40);
        assert!(visible.trim_end().ends_with("42%"));
        assert!(visible.starts_with(" NORMAL "));
    }
}
