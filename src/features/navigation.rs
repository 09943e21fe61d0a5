//! Scroll-position tracking for the navigation bar highlight.
//!
//! [`NavigationObserver`] plays the role of an intersection observer over the
//! rendered document. Each observed section reports an [`IntersectionEntry`] when
//! its visible ratio crosses the threshold, and the active nav item becomes the
//! section of the last intersecting entry in the batch.
//!
//! # Visibility model
//!
//! The viewport is the window of document lines currently on screen, shrunk by a
//! root margin at the top and bottom. A section's ratio is the number of its lines
//! inside that window divided by `min(section height, window height)`, so a
//! section taller than the pane counts as fully visible once it fills the window.

use crate::domain::SectionId;

/// Default visibility threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default number of lines trimmed from each edge of the viewport.
pub const DEFAULT_ROOT_MARGIN: usize = 2;

/// Line range `[start, end)` a section occupies in the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBounds {
    pub section: SectionId,
    pub start: usize,
    pub end: usize,
}

impl SectionBounds {
    /// Number of document lines the section spans.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// The window of document lines on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top: usize,
    pub height: usize,
}

/// Observer tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub margin_top: usize,
    pub margin_bottom: usize,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            margin_top: DEFAULT_ROOT_MARGIN,
            margin_bottom: DEFAULT_ROOT_MARGIN,
        }
    }
}

/// A threshold crossing reported for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub section: SectionId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Tracks which section is in view and which nav item is highlighted.
#[derive(Debug, Clone)]
pub struct NavigationObserver {
    options: ObserverOptions,
    /// Observed sections with their last known intersecting state, in nav order.
    targets: Vec<(SectionId, bool)>,
    active: Option<SectionId>,
    connected: bool,
}

impl NavigationObserver {
    /// Creates an observer over the nav item targets. The first target starts
    /// active.
    #[must_use]
    pub fn new(targets: &[SectionId], options: ObserverOptions) -> Self {
        Self {
            options,
            targets: targets.iter().map(|&s| (s, false)).collect(),
            active: targets.first().copied(),
            connected: true,
        }
    }

    /// The highlighted nav target.
    #[must_use]
    pub const fn active(&self) -> Option<SectionId> {
        self.active
    }

    /// Whether `section` is one of the observed targets.
    #[must_use]
    pub fn observes(&self, section: SectionId) -> bool {
        self.targets.iter().any(|&(s, _)| s == section)
    }

    /// Visible ratio of a section within the margin-adjusted viewport.
    #[must_use]
    pub fn visible_ratio(&self, bounds: &SectionBounds, viewport: Viewport) -> f64 {
        let window_start = viewport.top + self.options.margin_top;
        let window_end = (viewport.top + viewport.height).saturating_sub(self.options.margin_bottom);
        if window_end <= window_start || bounds.height() == 0 {
            return 0.0;
        }

        let overlap_start = bounds.start.max(window_start);
        let overlap_end = bounds.end.min(window_end);
        let overlap = overlap_end.saturating_sub(overlap_start);
        let denominator = bounds.height().min(window_end - window_start);

        #[allow(clippy::cast_precision_loss)]
        let ratio = overlap as f64 / denominator as f64;
        ratio
    }

    /// Computes threshold crossings since the previous observation.
    ///
    /// Targets without bounds (sections that are not rendered) are skipped.
    /// Entries are returned in nav order.
    pub fn observe(&mut self, bounds: &[SectionBounds], viewport: Viewport) -> Vec<IntersectionEntry> {
        if !self.connected {
            return vec![];
        }

        let mut entries = Vec::new();
        for index in 0..self.targets.len() {
            let (section, was_intersecting) = self.targets[index];
            let Some(b) = bounds.iter().find(|b| b.section == section) else {
                continue;
            };
            let ratio = self.visible_ratio(b, viewport);
            let is_intersecting = ratio > 0.0 && ratio >= self.options.threshold;
            if is_intersecting != was_intersecting {
                self.targets[index].1 = is_intersecting;
                entries.push(IntersectionEntry {
                    section,
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }

    /// Applies a batch of entries. The last intersecting entry wins.
    ///
    /// Returns `true` when the active section changed.
    pub fn apply(&mut self, entries: &[IntersectionEntry]) -> bool {
        let Some(winner) = entries.iter().rev().find(|e| e.is_intersecting) else {
            return false;
        };
        let changed = self.active != Some(winner.section);
        if changed {
            tracing::debug!(section = %winner.section, ratio = winner.ratio, "active section changed");
        }
        self.active = Some(winner.section);
        changed
    }

    /// Observes and applies in one step.
    pub fn on_scroll(&mut self, bounds: &[SectionBounds], viewport: Viewport) -> bool {
        let entries = self.observe(bounds, viewport);
        self.apply(&entries)
    }

    /// Optimistically activates a section after manual navigation.
    ///
    /// Returns `false` (and changes nothing) if the section is not observed.
    pub fn navigate_to(&mut self, section: SectionId) -> bool {
        if !self.observes(section) {
            return false;
        }
        self.active = Some(section);
        true
    }

    /// Records the current intersection states without emitting entries, so an
    /// optimistic highlight survives until the next real scroll.
    pub fn resync(&mut self, bounds: &[SectionBounds], viewport: Viewport) {
        let _ = self.observe(bounds, viewport);
    }

    /// Stops observing; later observations report nothing.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Vec<SectionBounds> {
        vec![
            SectionBounds { section: SectionId::Home, start: 0, end: 10 },
            SectionBounds { section: SectionId::About, start: 10, end: 40 },
            SectionBounds { section: SectionId::Projects, start: 40, end: 50 },
        ]
    }

    fn observer() -> NavigationObserver {
        NavigationObserver::new(
            &[SectionId::Home, SectionId::About, SectionId::Projects],
            ObserverOptions::default(),
        )
    }

    #[test]
    fn first_target_starts_active() {
        assert_eq!(observer().active(), Some(SectionId::Home));
    }

    #[test]
    fn scrolling_activates_visible_section() {
        let mut obs = observer();
        let bounds = bounds();
        obs.on_scroll(&bounds, Viewport { top: 0, height: 14 });
        assert_eq!(obs.active(), Some(SectionId::Home));

        assert!(obs.on_scroll(&bounds, Viewport { top: 12, height: 14 }));
        assert_eq!(obs.active(), Some(SectionId::About));
    }

    #[test]
    fn tall_section_counts_as_visible_when_it_fills_the_window() {
        let obs = observer();
        let about = bounds()[1];
        let ratio = obs.visible_ratio(&about, Viewport { top: 15, height: 10 });
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn entries_only_report_crossings() {
        let mut obs = observer();
        let bounds = bounds();
        let viewport = Viewport { top: 0, height: 14 };
        assert!(!obs.observe(&bounds, viewport).is_empty());
        assert!(obs.observe(&bounds, viewport).is_empty());
    }

    #[test]
    fn last_intersecting_entry_wins() {
        let mut obs = observer();
        let entries = [
            IntersectionEntry { section: SectionId::Home, ratio: 0.9, is_intersecting: true },
            IntersectionEntry { section: SectionId::Projects, ratio: 0.6, is_intersecting: true },
            IntersectionEntry { section: SectionId::About, ratio: 0.1, is_intersecting: false },
        ];
        assert!(obs.apply(&entries));
        assert_eq!(obs.active(), Some(SectionId::Projects));
    }

    #[test]
    fn manual_navigation_is_immediate_and_survives_resync() {
        let mut obs = observer();
        let bounds = bounds();
        obs.on_scroll(&bounds, Viewport { top: 0, height: 14 });

        assert!(obs.navigate_to(SectionId::Projects));
        obs.resync(&bounds, Viewport { top: 36, height: 14 });
        assert_eq!(obs.active(), Some(SectionId::Projects));
    }

    #[test]
    fn navigating_to_unobserved_section_is_a_no_op() {
        let mut obs = NavigationObserver::new(&[SectionId::Home], ObserverOptions::default());
        assert!(!obs.navigate_to(SectionId::Contact));
        assert_eq!(obs.active(), Some(SectionId::Home));
    }

    #[test]
    fn disconnected_observer_reports_nothing() {
        let mut obs = observer();
        obs.disconnect();
        assert!(obs.observe(&bounds(), Viewport { top: 0, height: 14 }).is_empty());
    }
}
