//! Fixed navigation bar.
//!
//! Row one holds the brand, the nav items and the trailing profile link and
//! theme glyph. Row two is the underline rule, drawn only once the page has
//! been scrolled.

use crate::ui::helpers::{position_cursor, RowWriter};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NavbarInfo;

/// Builds the navbar row and its underline row.
#[must_use]
pub fn navbar_rows(info: &NavbarInfo, theme: &Theme, cols: usize) -> [String; 2] {
    let colors = &theme.colors;
    let layout = &info.layout;
    let bar_bg = colors.navbar_bg();

    let mut row = RowWriter::new(cols, bar_bg);
    row.pad_to(1);
    row.push(&layout.brand, &colors.accent, None, true);

    for slot in &layout.slots {
        row.pad_to(slot.start);
        if info.active == Some(slot.section) {
            row.push(&slot.text, &colors.nav_active_fg, Some(&colors.nav_active_bg), true);
        } else {
            row.push(&slot.text, &colors.text_normal, None, false);
        }
    }

    let trailing_start = layout.trailing_start(cols);
    if trailing_start >= row.width() {
        row.pad_to(trailing_start);
        row.push(&layout.trailing, &colors.link, None, false);
    }

    let mut underline = RowWriter::new(cols, &colors.background);
    if info.scrolled {
        underline.push(&"─".repeat(cols), &colors.border, None, false);
    }

    [row.finish(), underline.finish()]
}

/// Prints the navbar at `row` (1-indexed) and returns the next free row.
pub fn render_navbar(row: usize, info: &NavbarInfo, theme: &Theme, cols: usize) -> usize {
    let [bar, underline] = navbar_rows(info, theme, cols);
    position_cursor(row, 1);
    print!("{bar}");
    position_cursor(row + 1, 1);
    print!("{underline}");
    row + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{nav_items, SectionId};
    use crate::page::NavbarLayout;
    use crate::ui::helpers::strip_ansi;

    fn info(scrolled: bool) -> NavbarInfo {
        NavbarInfo {
            layout: NavbarLayout::compute("Brand", &nav_items(&SectionId::ALL), 100, "☾"),
            active: Some(SectionId::About),
            scrolled,
        }
    }

    #[test]
    fn items_land_on_their_hit_columns() {
        let info = info(false);
        let [bar, _] = navbar_rows(&info, &Theme::default(), 100);
        let visible: Vec<char> = strip_ansi(&bar).chars().collect();
        assert_eq!(visible.len(), 100);
        for slot in &info.layout.slots {
            let drawn: String = visible[slot.start..slot.end].iter().collect();
            assert_eq!(drawn, slot.text);
        }
        assert_eq!(visible[98], '☾');
    }

    #[test]
    fn underline_only_when_scrolled() {
        let theme = Theme::default();
        let [_, flat] = navbar_rows(&info(false), &theme, 100);
        let [_, ruled] = navbar_rows(&info(true), &theme, 100);
        assert!(!strip_ansi(&flat).contains('─'));
        assert!(strip_ansi(&ruled).starts_with('─'));
    }
}
