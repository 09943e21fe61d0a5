//! Renderable snapshot of the application state.
//!
//! [`UIViewModel`] is computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. Every string in here is already laid out and
//! truncated for the pane; the components only pick colors and print.

use crate::domain::SectionId;
use crate::page::{Line, NavbarLayout};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub navbar: NavbarInfo,
    /// The visible slice of the document, at most the viewport height.
    pub lines: Vec<Line>,
    /// Present while the command palette is open.
    pub palette: Option<PaletteInfo>,
    pub footer: FooterInfo,
}

/// Fixed navigation bar at the top of the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarInfo {
    pub layout: NavbarLayout,
    pub active: Option<SectionId>,
    /// Draws the underline rule once the page is scrolled away from the top.
    pub scrolled: bool,
}

/// Command palette overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteInfo {
    pub query: String,
    /// Visible window of the results.
    pub items: Vec<PaletteItem>,
    /// A keystroke is waiting for the debounce to elapse.
    pub pending: bool,
    /// Number of results for the applied query.
    pub total: usize,
    /// Overlay width in columns, borders included.
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteItem {
    pub label: String,
    pub description: String,
    pub category: &'static str,
    pub shortcut: Option<String>,
    pub is_selected: bool,
    /// Byte ranges of the label to highlight.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Key-hint bar at the bottom of the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub mode_label: &'static str,
    pub keybindings: String,
    /// Scroll position, e.g. `42%`.
    pub position: String,
}
