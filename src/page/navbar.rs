//! Column layout of the fixed navigation bar.
//!
//! The same layout drives rendering and mouse hit-testing, so a click lands on
//! exactly the item that was drawn under it.

use super::builder::truncate;
use crate::domain::{NavItem, SectionId};

/// Panes narrower than this get the compact (icon-only) bar.
pub const COMPACT_WIDTH: usize = 80;

const ITEM_GAP: usize = 2;
const PROFILE_LABEL: &str = "GitHub";

/// Clickable targets in the trailing area of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingHit {
    Profile,
    Theme,
}

/// One clickable nav item, occupying columns `[start, end)` (0-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarSlot {
    pub section: SectionId,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarLayout {
    pub brand: String,
    pub slots: Vec<NavbarSlot>,
    pub compact: bool,
    /// Text drawn at the right edge (profile link and theme glyph).
    pub trailing: String,
}

impl NavbarLayout {
    /// Lays out the bar for a pane `width` columns wide.
    ///
    /// `theme_glyph` is the one-character light/dark indicator.
    #[must_use]
    pub fn compute(brand: &str, items: &[NavItem], width: usize, theme_glyph: &str) -> Self {
        let compact = width < COMPACT_WIDTH;
        let trailing = if compact {
            theme_glyph.to_string()
        } else {
            format!("{PROFILE_LABEL}  {theme_glyph}")
        };

        let labels: Vec<String> = items
            .iter()
            .map(|item| match (compact, item.icon) {
                (true, Some(icon)) => icon.to_string(),
                (true, None) => item.label.chars().take(1).collect(),
                (false, Some(icon)) => format!("{icon} {}", item.label),
                (false, None) => item.label.to_string(),
            })
            .collect();
        let items_width: usize = labels.iter().map(|l| l.chars().count()).sum::<usize>()
            + ITEM_GAP * labels.len().saturating_sub(1);

        let reserved = items_width + trailing.chars().count() + 6;
        let brand = truncate(brand, width.saturating_sub(reserved));

        let mut col = 1 + brand.chars().count() + 3;
        let slots = items
            .iter()
            .zip(labels)
            .map(|(item, text)| {
                let start = col;
                let end = start + text.chars().count();
                col = end + ITEM_GAP;
                NavbarSlot {
                    section: item.target,
                    text,
                    start,
                    end,
                }
            })
            .collect();

        Self {
            brand,
            slots,
            compact,
            trailing,
        }
    }

    /// The nav item under column `col` (0-based), if any.
    #[must_use]
    pub fn hit_test(&self, col: usize) -> Option<SectionId> {
        self.slots
            .iter()
            .find(|slot| col >= slot.start && col < slot.end)
            .map(|slot| slot.section)
    }

    /// First column of the trailing text in a bar `width` columns wide.
    ///
    /// The trailing text is right-aligned with one column of padding.
    #[must_use]
    pub fn trailing_start(&self, width: usize) -> usize {
        width.saturating_sub(self.trailing.chars().count() + 1)
    }

    /// The trailing target under column `col`, if any.
    #[must_use]
    pub fn hit_trailing(&self, col: usize, width: usize) -> Option<TrailingHit> {
        let start = self.trailing_start(width);
        let glyph = start + self.trailing.chars().count().saturating_sub(1);
        if col == glyph {
            return Some(TrailingHit::Theme);
        }
        let profile_end = start + PROFILE_LABEL.len();
        (!self.compact && col >= start && col < profile_end).then_some(TrailingHit::Profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nav_items;

    #[test]
    fn wide_bar_shows_labels() {
        let items = nav_items(&SectionId::ALL);
        let layout = NavbarLayout::compute("Calder's Portfolio", &items, 120, "☾");
        assert!(!layout.compact);
        assert!(layout.slots[1].text.ends_with("About"));
        assert_eq!(layout.brand, "Calder's Portfolio");
    }

    #[test]
    fn narrow_bar_is_compact() {
        let items = nav_items(&SectionId::ALL);
        let layout = NavbarLayout::compute("Calder's Portfolio", &items, 40, "☀");
        assert!(layout.compact);
        assert!(layout.slots.iter().all(|s| s.text.chars().count() == 1));
    }

    #[test]
    fn hit_test_maps_columns_to_items() {
        let items = nav_items(&SectionId::ALL);
        let layout = NavbarLayout::compute("Brand", &items, 120, "☾");
        let projects = &layout.slots[2];
        assert_eq!(layout.hit_test(projects.start), Some(SectionId::Projects));
        assert_eq!(layout.hit_test(projects.end - 1), Some(SectionId::Projects));
        assert_eq!(layout.hit_test(projects.end), None);
        assert_eq!(layout.hit_test(0), None);
    }

    #[test]
    fn trailing_area_hits_profile_and_theme() {
        let items = nav_items(&SectionId::ALL);
        let wide = NavbarLayout::compute("Brand", &items, 100, "☾");
        let start = wide.trailing_start(100);
        assert_eq!(wide.hit_trailing(start, 100), Some(TrailingHit::Profile));
        assert_eq!(wide.hit_trailing(98, 100), Some(TrailingHit::Theme));
        assert_eq!(wide.hit_trailing(start + 6, 100), None);

        let narrow = NavbarLayout::compute("Brand", &items, 40, "☾");
        assert_eq!(narrow.hit_trailing(38, 40), Some(TrailingHit::Theme));
        assert_eq!(narrow.hit_trailing(37, 40), None);
    }
}
