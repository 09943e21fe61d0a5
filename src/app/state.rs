//! Application state and view model computation.
//!
//! [`AppState`] owns every feature state machine (theme, observer, palette,
//! rotator, form) plus the pane geometry and the scroll position. It is the
//! single source of truth the event handler mutates and the renderer reads.
//!
//! # Layout
//!
//! ```text
//! row 0            navbar
//! row 1            navbar underline (drawn once scrolled)
//! rows 2..rows-1   document viewport
//! last row         key-hint bar
//! ```
//!
//! Section line ranges are cached on every relayout. They depend only on the
//! content and the pane width, so scrolling never has to recompose the page.

use super::modes::InputMode;
use crate::content::Content;
use crate::domain::{build_actions, nav_items, NavItem, PortfolioError, Result, SectionId, ThemeMode};
use crate::features::contact::{DEFAULT_CONFIRMATION_MS, DEFAULT_SUBMIT_DELAY_MS};
use crate::features::rotator::{DEFAULT_INTERVAL_MS, DEFAULT_TRANSITION_MS};
use crate::features::search::DEFAULT_DEBOUNCE_MS;
use crate::features::{
    CommandSearch, ContactForm, Millis, NavigationObserver, ObserverOptions, SectionBounds, TextRotator, ThemeState, Viewport,
};
use crate::page::{compose, Document, NavbarLayout, PageState};
use crate::ui::theme::{Palettes, Theme};
use crate::ui::viewmodel::{FooterInfo, NavbarInfo, PaletteInfo, PaletteItem, UIViewModel};

/// Rows taken by the navbar and its underline.
pub const NAVBAR_ROWS: usize = 2;
/// Rows taken by the key-hint bar.
pub const FOOTER_ROWS: usize = 1;

const DEFAULT_ROWS: usize = 24;
const DEFAULT_COLS: usize = 80;

const PALETTE_MAX_WIDTH: usize = 64;
const PALETTE_MIN_WIDTH: usize = 20;
/// Top border, query row, separator and bottom border.
const PALETTE_CHROME_ROWS: usize = 4;

/// Durations of every timed behavior, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub rotator_interval: Millis,
    pub rotator_transition: Millis,
    pub search_debounce: Millis,
    pub submit_delay: Millis,
    pub confirmation: Millis,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            rotator_interval: DEFAULT_INTERVAL_MS,
            rotator_transition: DEFAULT_TRANSITION_MS,
            search_debounce: DEFAULT_DEBOUNCE_MS,
            submit_delay: DEFAULT_SUBMIT_DELAY_MS,
            confirmation: DEFAULT_CONFIRMATION_MS,
        }
    }
}

/// Whether the plugin is still accepting events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Lifecycle {
    #[default]
    Running,
    /// Every deadline is cancelled; events are ignored from here on.
    TornDown,
}

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub content: Content,
    /// Rendered sections in document order.
    pub sections: Vec<SectionId>,
    pub nav_items: Vec<NavItem>,
    pub theme: ThemeState,
    pub palettes: Palettes,
    pub observer: NavigationObserver,
    pub search: CommandSearch,
    pub rotator: TextRotator,
    pub form: ContactForm,
    pub input_mode: InputMode,
    /// First document line shown in the viewport.
    pub scroll_offset: usize,
    pub rows: usize,
    pub cols: usize,
    /// Logical clock; only moves forward.
    pub now: Millis,
    /// Year printed in the footer.
    pub year: i32,
    lifecycle: Lifecycle,
    bounds: Vec<SectionBounds>,
    doc_len: usize,
}

impl AppState {
    /// Builds the state and starts the rotator at time zero.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] if `sections` is empty, or the
    /// rotator's error if the content has no rotating titles or the interval
    /// is zero.
    pub fn new(
        content: Content,
        sections: Vec<SectionId>,
        theme: ThemeState,
        palettes: Palettes,
        timings: Timings,
        year: i32,
    ) -> Result<Self> {
        if sections.is_empty() {
            return Err(PortfolioError::Config("at least one section must be rendered".to_string()));
        }

        let mut rotator = TextRotator::new(
            content.rotating_titles.clone(),
            timings.rotator_interval,
            timings.rotator_transition,
        )?;
        rotator.start(0);

        let actions = build_actions(&sections, content.link_actions());
        let observer = NavigationObserver::new(&sections, ObserverOptions::default());

        let mut state = Self {
            nav_items: nav_items(&sections),
            search: CommandSearch::new(actions, timings.search_debounce),
            form: ContactForm::new(timings.submit_delay, timings.confirmation),
            content,
            sections,
            theme,
            palettes,
            observer,
            rotator,
            input_mode: InputMode::Normal,
            scroll_offset: 0,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            now: 0,
            year,
            lifecycle: Lifecycle::Running,
            bounds: Vec::new(),
            doc_len: 0,
        };
        state.relayout();
        Ok(state)
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }

    /// Cached section line ranges for the current width.
    #[must_use]
    pub fn bounds(&self) -> &[SectionBounds] {
        &self.bounds
    }

    /// Moves the logical clock forward; earlier timestamps are ignored.
    pub fn advance_clock(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    #[must_use]
    pub fn page_state(&self) -> PageState<'_> {
        PageState {
            content: &self.content,
            sections: &self.sections,
            rotator_text: self.rotator.current(),
            rotator_transitioning: self.rotator.is_transitioning(self.now),
            form: &self.form,
            form_focus: self.input_mode.form_field(),
            year: self.year,
        }
    }

    /// Composes the full page for the current width and dynamic state.
    #[must_use]
    pub fn document(&self) -> Document {
        compose(&self.page_state(), self.cols)
    }

    /// Rows available to the document.
    #[must_use]
    pub const fn viewport_height(&self) -> usize {
        let height = self.rows.saturating_sub(NAVBAR_ROWS + FOOTER_ROWS);
        if height == 0 {
            1
        } else {
            height
        }
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport {
            top: self.scroll_offset,
            height: self.viewport_height(),
        }
    }

    #[must_use]
    pub const fn max_scroll(&self) -> usize {
        self.doc_len.saturating_sub(self.viewport_height())
    }

    /// Half a viewport, at least one line.
    #[must_use]
    pub const fn half_page(&self) -> usize {
        let half = self.viewport_height() / 2;
        if half == 0 {
            1
        } else {
            half
        }
    }

    /// Recomputes section ranges after a size change and re-observes.
    ///
    /// Returns `true` if the active section changed.
    pub fn relayout(&mut self) -> bool {
        let _span = tracing::debug_span!("relayout", rows = self.rows, cols = self.cols).entered();

        let doc = self.document();
        self.bounds = doc.bounds().to_vec();
        self.doc_len = doc.len();
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());

        tracing::debug!(lines = self.doc_len, sections = self.bounds.len(), "page laid out");
        self.observer.on_scroll(&self.bounds, self.viewport())
    }

    /// Applies a new pane size. Returns `true` if anything changed.
    pub fn resize(&mut self, rows: usize, cols: usize) -> bool {
        if rows == self.rows && cols == self.cols {
            return false;
        }
        self.rows = rows;
        self.cols = cols;
        self.relayout();
        true
    }

    /// Scrolls to `offset` (clamped) and lets the observer react.
    ///
    /// Returns `true` if the offset moved.
    pub fn scroll_to(&mut self, offset: usize) -> bool {
        let offset = offset.min(self.max_scroll());
        if offset == self.scroll_offset {
            return false;
        }
        self.scroll_offset = offset;
        self.observer.on_scroll(&self.bounds, self.viewport());
        true
    }

    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let target = self.scroll_offset.saturating_add_signed(delta);
        self.scroll_to(target)
    }

    /// Scrolls a section's first line to the top and highlights it at once.
    ///
    /// Returns `false` (and changes nothing) when the section is not rendered.
    pub fn navigate_to(&mut self, section: SectionId) -> bool {
        let _span = tracing::debug_span!("navigate_to", section = section.anchor()).entered();

        let Some(line) = self.bounds.iter().find(|b| b.section == section).map(|b| b.start) else {
            tracing::debug!("anchor not rendered, ignoring");
            return false;
        };
        if !self.observer.navigate_to(section) {
            return false;
        }
        self.scroll_offset = line.min(self.max_scroll());
        self.observer.resync(&self.bounds, self.viewport());
        true
    }

    /// Navigates to the `index`-th nav item (0-based).
    pub fn navigate_index(&mut self, index: usize) -> bool {
        match self.nav_items.get(index).map(|item| item.target) {
            Some(section) => self.navigate_to(section),
            None => false,
        }
    }

    /// Glyph of the mode a toggle would switch to.
    #[must_use]
    pub const fn theme_glyph(&self) -> &'static str {
        if self.theme.mode().is_dark() {
            "☀"
        } else {
            "☾"
        }
    }

    #[must_use]
    pub fn navbar_layout(&self) -> NavbarLayout {
        NavbarLayout::compute(&self.content.brand, &self.nav_items, self.cols, self.theme_glyph())
    }

    /// Flips the mode; the returned mode is what must be persisted.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle()
    }

    /// Palette for the current mode.
    #[must_use]
    pub const fn active_palette(&self) -> &Theme {
        self.palettes.for_mode(self.theme.mode())
    }

    /// Advances every timed machine to `now`, in a fixed order.
    ///
    /// Returns `true` if anything visible changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let was_transitioning = self.rotator.is_transitioning(self.now);
        self.advance_clock(now);
        let now = self.now;

        let mut changed = self.search.tick(now);
        changed |= self.rotator.tick(now);
        changed |= self.form.tick(now);
        changed || was_transitioning != self.rotator.is_transitioning(now)
    }

    /// Cancels every pending deadline and stops observing.
    pub fn teardown(&mut self) {
        let _span = tracing::debug_span!("teardown").entered();
        self.lifecycle = Lifecycle::TornDown;
        self.search.cancel_pending();
        self.rotator.stop();
        self.form.cancel();
        self.observer.disconnect();
        tracing::info!("plugin torn down");
    }

    /// Builds the frame for the current pane size.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let doc = self.document();
        let lines = doc.window(self.scroll_offset, self.viewport_height()).to_vec();

        UIViewModel {
            navbar: NavbarInfo {
                layout: self.navbar_layout(),
                active: self.observer.active(),
                scrolled: self.scroll_offset > 0,
            },
            lines,
            palette: self.compute_palette(),
            footer: self.compute_footer(),
        }
    }

    fn compute_palette(&self) -> Option<PaletteInfo> {
        if !self.search.is_open() {
            return None;
        }

        let width = self
            .cols
            .saturating_sub(4)
            .min(PALETTE_MAX_WIDTH)
            .max(self.cols.min(PALETTE_MIN_WIDTH));
        let capacity = self.viewport_height().saturating_sub(PALETTE_CHROME_ROWS).max(1);
        let total = self.search.result_count();
        let selected = self.search.selected_index();

        let mut start = selected.saturating_sub(capacity / 2);
        if start + capacity > total {
            start = total.saturating_sub(capacity);
        }

        let needle = self.search.applied_query().to_lowercase();
        let items = self
            .search
            .results()
            .enumerate()
            .skip(start)
            .take(capacity)
            .map(|(index, action)| PaletteItem {
                label: action.label.clone(),
                description: action.description.clone(),
                category: action.category.as_str(),
                shortcut: action.shortcut.clone(),
                is_selected: index == selected,
                highlight_ranges: action.label_match_ranges(&needle),
            })
            .collect();

        Some(PaletteInfo {
            query: self.search.query().to_string(),
            items,
            pending: self.search.is_debouncing(),
            total,
            width,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => {
                let jump = match self.nav_items.len() {
                    1 => "1 jump".to_string(),
                    n => format!("1-{n} jump"),
                };
                format!("j/k scroll  {jump}  / search  t theme  c contact  o GitHub  q hide")
            }
            InputMode::Palette => "type to filter  ↑/↓ select  Enter open  Esc close".to_string(),
            InputMode::Form(_) => "Tab next field  Shift+Tab previous  Enter send  Esc leave form".to_string(),
        };

        let max = self.max_scroll();
        let position = if max == 0 {
            "All".to_string()
        } else if self.scroll_offset == 0 {
            "Top".to_string()
        } else if self.scroll_offset >= max {
            "Bot".to_string()
        } else {
            format!("{}%", self.scroll_offset * 100 / max)
        };

        FooterInfo {
            mode_label: self.input_mode.label(),
            keybindings,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(
            Content::default(),
            SectionId::ALL.to_vec(),
            ThemeState::new(None, None),
            Palettes::default(),
            Timings::default(),
            2024,
        )
        .unwrap()
    }

    #[test]
    fn starts_at_home() {
        let s = state();
        assert_eq!(s.observer.active(), Some(SectionId::Home));
        assert_eq!(s.scroll_offset, 0);
        assert_eq!(s.bounds().len(), 4);
        assert!(s.rotator.is_running());
    }

    #[test]
    fn empty_sections_are_rejected() {
        let result = AppState::new(
            Content::default(),
            vec![],
            ThemeState::new(None, None),
            Palettes::default(),
            Timings::default(),
            2024,
        );
        assert!(matches!(result, Err(PortfolioError::Config(_))));
    }

    #[test]
    fn scroll_is_clamped() {
        let mut s = state();
        assert!(!s.scroll_by(-5));
        s.scroll_to(usize::MAX);
        assert_eq!(s.scroll_offset, s.max_scroll());
    }

    #[test]
    fn navigate_highlights_immediately() {
        let mut s = state();
        assert!(s.navigate_to(SectionId::Projects));
        assert_eq!(s.observer.active(), Some(SectionId::Projects));
        let start = s.bounds().iter().find(|b| b.section == SectionId::Projects).unwrap().start;
        assert_eq!(s.scroll_offset, start.min(s.max_scroll()));
    }

    #[test]
    fn unrendered_section_is_a_no_op() {
        let mut s = AppState::new(
            Content::default(),
            vec![SectionId::Home, SectionId::About],
            ThemeState::new(None, None),
            Palettes::default(),
            Timings::default(),
            2024,
        )
        .unwrap();
        assert!(!s.navigate_to(SectionId::Contact));
        assert_eq!(s.scroll_offset, 0);
        assert_eq!(s.observer.active(), Some(SectionId::Home));
    }

    #[test]
    fn resize_keeps_scroll_in_range() {
        let mut s = state();
        s.scroll_to(usize::MAX);
        assert!(s.resize(60, 200));
        assert!(s.scroll_offset <= s.max_scroll());
        assert!(!s.resize(60, 200));
    }

    #[test]
    fn viewmodel_window_fits_viewport() {
        let mut s = state();
        s.resize(20, 90);
        let vm = s.compute_viewmodel();
        assert_eq!(vm.lines.len(), s.viewport_height());
        assert!(vm.palette.is_none());
        assert!(!vm.navbar.scrolled);
        assert_eq!(vm.footer.position, "Top");
    }

    #[test]
    fn palette_window_tracks_selection() {
        let mut s = state();
        s.resize(10, 80);
        s.search.open();
        for _ in 0..s.search.result_count() {
            s.search.select_next();
        }
        let palette = s.compute_viewmodel().palette.unwrap();
        assert!(palette.items.iter().any(|item| item.is_selected));
        assert!(palette.items.len() <= s.viewport_height());
    }

    #[test]
    fn theme_palette_swaps_with_mode() {
        let mut s = state();
        let before = s.active_palette().name.clone();
        s.toggle_theme();
        assert_ne!(s.active_palette().name, before);
    }
}
