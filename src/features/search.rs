//! The command palette's debounced search.
//!
//! [`CommandSearch`] keeps two queries: the raw text as typed (shown in the input
//! line immediately) and the applied query the result list is filtered by. Every
//! edit re-schedules a debounce deadline; when a tick reaches it, the raw text is
//! applied and the filtered list recomputed.
//!
//! The selected index always stays within the filtered list and resets to the top
//! whenever the list changes.

use super::timing::{Millis, TimerPhase};
use crate::domain::SearchAction;

/// Default delay between the last keystroke and filtering.
pub const DEFAULT_DEBOUNCE_MS: Millis = 300;

/// Indices of the actions matching `query`, in list order.
///
/// Matching is a case-insensitive substring test over label, description and
/// category. An empty query keeps every action; whitespace is matched
/// literally.
///
/// # Examples
///
/// ```
/// use termfolio::domain::{build_actions, SectionId};
/// use termfolio::features::search::filter_actions;
///
/// let actions = build_actions(&SectionId::ALL, vec![]);
/// assert_eq!(filter_actions(&actions, "").len(), 4);
/// assert_eq!(filter_actions(&actions, "PROJ"), vec![2]);
/// ```
#[must_use]
pub fn filter_actions(actions: &[SearchAction], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    actions
        .iter()
        .enumerate()
        .filter(|(_, action)| action.matches(&needle))
        .map(|(index, _)| index)
        .collect()
}

/// Palette state: open flag, queries, filtered results and selection.
#[derive(Debug, Clone)]
pub struct CommandSearch {
    actions: Vec<SearchAction>,
    open: bool,
    query: String,
    applied: String,
    filtered: Vec<usize>,
    selected: usize,
    debounce: TimerPhase,
    debounce_ms: Millis,
}

impl CommandSearch {
    /// Creates a closed palette over `actions`.
    ///
    /// # Parameters
    ///
    /// * `actions` - Every palette entry, in display order
    /// * `debounce_ms` - Delay between the last edit and refiltering
    ///
    /// # Examples
    ///
    /// ```
    /// use termfolio::domain::{build_actions, SectionId};
    /// use termfolio::features::CommandSearch;
    ///
    /// let search = CommandSearch::new(build_actions(&SectionId::ALL, vec![]), 300);
    /// assert!(!search.is_open());
    /// assert_eq!(search.result_count(), 4);
    /// ```
    #[must_use]
    pub fn new(actions: Vec<SearchAction>, debounce_ms: Millis) -> Self {
        let filtered = (0..actions.len()).collect();
        Self {
            actions,
            open: false,
            query: String::new(),
            applied: String::new(),
            filtered,
            selected: 0,
            debounce: TimerPhase::Idle,
            debounce_ms,
        }
    }

    /// Whether the overlay is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The text in the input line.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query the result list currently reflects.
    #[must_use]
    pub fn applied_query(&self) -> &str {
        &self.applied
    }

    /// Whether typed text is still waiting to be applied.
    #[must_use]
    pub const fn is_debouncing(&self) -> bool {
        self.debounce.is_pending()
    }

    /// The full catalog, regardless of the query.
    #[must_use]
    pub fn actions(&self) -> &[SearchAction] {
        &self.actions
    }

    /// The filtered actions, in list order.
    pub fn results(&self) -> impl Iterator<Item = &SearchAction> + '_ {
        self.filtered.iter().map(|&index| &self.actions[index])
    }

    /// Number of actions matching the applied query.
    ///
    /// # Returns
    ///
    /// The catalog size while the query is empty or still debouncing from one.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.filtered.len()
    }

    /// Index of the highlighted row within the results.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// The highlighted result, `None` when nothing matches.
    #[must_use]
    pub fn selected(&self) -> Option<&SearchAction> {
        self.filtered.get(self.selected).map(|&index| &self.actions[index])
    }

    /// Opens the overlay with an empty query and the full list.
    pub fn open(&mut self) {
        self.open = true;
        self.reset_query();
    }

    /// Closes the overlay, clearing the query and any pending debounce.
    pub fn close(&mut self) {
        self.open = false;
        self.reset_query();
    }

    /// Ctrl+K behaviour: open when closed, close when open.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Appends `c` to the typed query and restarts the debounce at `now`.
    ///
    /// The result list keeps showing the previous query until a tick reaches
    /// the deadline.
    pub fn push_char(&mut self, c: char, now: Millis) {
        self.query.push(c);
        self.debounce.schedule(now.saturating_add(self.debounce_ms));
    }

    /// Deletes the last typed character; restarts the debounce only if
    /// something was deleted.
    pub fn backspace(&mut self, now: Millis) {
        if self.query.pop().is_some() {
            self.debounce.schedule(now.saturating_add(self.debounce_ms));
        }
    }

    /// Resolves the debounce deadline. Returns `true` if the results were
    /// refiltered.
    pub fn tick(&mut self, now: Millis) -> bool {
        if self.debounce.fire_if_due(now) {
            self.apply_query();
            return true;
        }
        false
    }

    /// Applies the typed query immediately, dropping the pending deadline.
    pub fn flush(&mut self) {
        if self.debounce.is_pending() {
            self.debounce.cancel();
            self.apply_query();
        }
    }

    /// Moves the selection down one entry, stopping at the last.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    /// Moves the selection up one entry, stopping at the first.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Commits the selected action and closes the overlay.
    ///
    /// Any pending debounce is flushed first so the commit reflects what was
    /// typed. Returns `None` when the filtered list is empty (the overlay stays
    /// open showing "No results").
    pub fn commit(&mut self) -> Option<SearchAction> {
        self.flush();
        let action = self.selected().cloned()?;
        tracing::debug!(action = %action.id, "palette action committed");
        self.close();
        Some(action)
    }

    /// Drops the pending debounce without applying it.
    pub fn cancel_pending(&mut self) {
        self.debounce.cancel();
    }

    fn reset_query(&mut self) {
        self.query.clear();
        self.debounce.cancel();
        self.apply_query();
    }

    fn apply_query(&mut self) {
        let _span = tracing::debug_span!("filter_actions", query = %self.query).entered();
        let filtered = filter_actions(&self.actions, &self.query);
        if filtered != self.filtered {
            self.selected = 0;
        }
        self.filtered = filtered;
        self.applied.clone_from(&self.query);
        if self.selected >= self.filtered.len() {
            self.selected = 0;
        }
    }
}
