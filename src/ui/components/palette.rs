//! Command palette overlay.
//!
//! A bordered box centered horizontally near the top of the viewport:
//!
//! ```text
//! ╭─ Search ───────────────────────────╮
//! │ › git▏                           … │
//! ├────────────────────────────────────┤
//! │ GitHub Profile  Check out my…  [1] │
//! ╰──────────────────────── 1 result ──╯
//! ```

use crate::ui::helpers::{clip, position_cursor, RowWriter};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PaletteInfo, PaletteItem};

/// Builds the overlay rows, each exactly `palette.width` columns wide.
#[must_use]
pub fn palette_rows(palette: &PaletteInfo, theme: &Theme) -> Vec<String> {
    let colors = &theme.colors;
    let border = colors.search_bar_border.as_str();
    let width = palette.width.max(4);
    let inner = width - 2;

    let mut rows = Vec::with_capacity(palette.items.len() + 4);

    let title = " Search ";
    let mut top = RowWriter::new(width, &colors.background);
    top.push("╭─", border, None, false);
    top.push(title, &colors.accent, None, true);
    top.push(&"─".repeat(inner.saturating_sub(1 + title.chars().count())), border, None, false);
    top.push("╮", border, None, false);
    rows.push(top.finish());

    let mut query = RowWriter::new(width, &colors.background);
    query.push("│", border, None, false);
    query.push(" › ", &colors.accent, None, true);
    let pending = if palette.pending { " …" } else { "" };
    let room = inner.saturating_sub(3 + 1 + pending.chars().count());
    let shown: String = {
        let count = palette.query.chars().count();
        palette.query.chars().skip(count.saturating_sub(room)).collect()
    };
    query.push(&shown, &colors.text_normal, None, false);
    query.push("▏", &colors.accent, None, false);
    query.pad_to(width - 1 - pending.chars().count());
    query.push(pending, &colors.text_dim, None, false);
    query.push("│", border, None, false);
    rows.push(query.finish());

    let mut separator = RowWriter::new(width, &colors.background);
    separator.push(&format!("├{}┤", "─".repeat(inner)), border, None, false);
    rows.push(separator.finish());

    if palette.items.is_empty() {
        let mut empty = RowWriter::new(width, &colors.background);
        empty.push("│", border, None, false);
        let message = format!(" No results for \"{}\"", palette.query.trim());
        empty.push(&clip(&message, inner), &colors.empty_state_fg, None, false);
        empty.pad_to(width - 1);
        empty.push("│", border, None, false);
        rows.push(empty.finish());
    }
    for item in &palette.items {
        rows.push(item_row(item, theme, width));
    }

    let count = match palette.total {
        1 => " 1 result ".to_string(),
        n => format!(" {n} results "),
    };
    let count = clip(&count, inner.saturating_sub(2));
    let mut bottom = RowWriter::new(width, &colors.background);
    bottom.push("╰", border, None, false);
    bottom.push(&"─".repeat(inner.saturating_sub(count.chars().count() + 2)), border, None, false);
    bottom.push(&count, &colors.text_dim, None, false);
    bottom.push("──╯", border, None, false);
    rows.push(bottom.finish());

    rows
}

fn item_row(item: &PaletteItem, theme: &Theme, width: usize) -> String {
    let colors = &theme.colors;
    let border = colors.search_bar_border.as_str();
    let (fg, bg) = if item.is_selected {
        (colors.selection_fg.as_str(), Some(colors.selection_bg.as_str()))
    } else {
        (colors.text_normal.as_str(), None)
    };

    let tail = match &item.shortcut {
        Some(key) => format!("{}  [{key}] ", item.category),
        None => format!("{} ", item.category),
    };
    let tail_width = tail.chars().count();

    let mut row = RowWriter::new(width, &colors.background);
    row.push("│", border, None, false);
    let fill_bg = bg.unwrap_or(colors.background.as_str());
    row.push(if item.is_selected { "▶" } else { " " }, &colors.accent, Some(fill_bg), false);

    let label_room = width.saturating_sub(row.width() + 1 + tail_width + 1);
    let label = clip(&item.label, label_room);
    let ranges: Vec<(usize, usize)> = item
        .highlight_ranges
        .iter()
        .copied()
        .filter(|&(_, end)| end <= label.len())
        .collect();
    row.push_highlighted(&label, &ranges, fg, Some(fill_bg), colors);

    let description_room = width.saturating_sub(row.width() + 2 + tail_width + 1);
    if description_room > 3 {
        row.push("  ", fg, Some(fill_bg), false);
        let description = crate::page::builder::truncate(&item.description, description_room);
        row.push(&description, &colors.text_dim, Some(fill_bg), false);
    }

    let tail_start = width.saturating_sub(1 + tail_width);
    while row.width() < tail_start {
        row.push(" ", fg, Some(fill_bg), false);
    }
    row.push(&tail, &colors.text_dim, Some(fill_bg), false);
    row.push("│", border, None, false);
    row.finish()
}

/// Prints the overlay starting at `row`, centered in a pane `cols` wide.
pub fn render_palette(row: usize, palette: &PaletteInfo, theme: &Theme, cols: usize) -> usize {
    let left = cols.saturating_sub(palette.width) / 2 + 1;
    let rows = palette_rows(palette, theme);
    for (offset, line) in rows.iter().enumerate() {
        position_cursor(row + offset, left);
        print!("{line}");
    }
    row + rows.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn item(label: &str, selected: bool) -> PaletteItem {
        PaletteItem {
            label: label.to_string(),
            description: "Open-source work and experiments".to_string(),
            category: "Social",
            shortcut: None,
            is_selected: selected,
            highlight_ranges: vec![(0, 3)],
        }
    }

    fn palette(items: Vec<PaletteItem>) -> PaletteInfo {
        PaletteInfo {
            query: "git".to_string(),
            total: items.len(),
            items,
            pending: false,
            width: 48,
        }
    }

    #[test]
    fn every_row_has_the_box_width() {
        let rows = palette_rows(&palette(vec![item("GitHub Profile", true), item("Gitea", false)]), &Theme::default());
        assert_eq!(rows.len(), 6);
        for row in &rows {
            assert_eq!(strip_ansi(row).chars().count(), 48, "{:?}", strip_ansi(row));
        }
        assert!(strip_ansi(&rows[3]).contains("GitHub Profile"));
        assert!(strip_ansi(&rows[5]).contains("2 results"));
    }

    #[test]
    fn empty_results_show_a_message() {
        let rows = palette_rows(&palette(vec![]), &Theme::default());
        assert!(strip_ansi(&rows[3]).contains("No results for \"git\""));
        assert!(strip_ansi(&rows[4]).contains("0 results"));
    }

    #[test]
    fn pending_debounce_is_indicated() {
        let mut info = palette(vec![]);
        info.pending = true;
        let rows = palette_rows(&info, &Theme::default());
        assert!(strip_ansi(&rows[1]).trim_end_matches('│').trim_end().ends_with('…'));
    }

    #[test]
    fn narrow_overlay_keeps_its_width() {
        let mut info = palette(vec![item("A very long action label that cannot fit", true)]);
        info.width = 20;
        for row in palette_rows(&info, &Theme::default()) {
            assert_eq!(strip_ansi(&row).chars().count(), 20);
        }
    }
}
