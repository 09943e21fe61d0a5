//! Cyclic text rotation for the hero banner.
//!
//! The rotator fires at a fixed rate (`start + k * interval`). Each firing
//! advances the index unless the previous transition is still running, in which
//! case that firing is skipped. A single tick that spans several intervals
//! processes every missed deadline in order.

use super::timing::{Millis, TimerPhase};
use crate::domain::{PortfolioError, Result};

/// Time between two advances.
pub const DEFAULT_INTERVAL_MS: Millis = 3_000;
/// How long an advance blocks the next one.
pub const DEFAULT_TRANSITION_MS: Millis = 2_000;

/// Rotating list of strings with a re-entrancy guard.
#[derive(Debug, Clone)]
pub struct TextRotator {
    texts: Vec<String>,
    index: usize,
    interval: Millis,
    transition: Millis,
    guard: TimerPhase,
    next_deadline: Option<Millis>,
}

impl TextRotator {
    /// Creates a stopped rotator showing the first text.
    ///
    /// # Parameters
    ///
    /// * `texts` - Strings to cycle through, at least one
    /// * `interval` - Time between firings, non-zero
    /// * `transition` - Guard duration after each advance
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] when `texts` is empty or `interval` is
    /// zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use termfolio::features::rotator::TextRotator;
    ///
    /// assert!(TextRotator::new(Vec::new(), 3_000, 2_000).is_err());
    /// let rotator = TextRotator::new(vec!["A".into(), "B".into()], 3_000, 2_000).unwrap();
    /// assert_eq!(rotator.current(), "A");
    /// ```
    pub fn new(texts: Vec<String>, interval: Millis, transition: Millis) -> Result<Self> {
        if texts.is_empty() {
            return Err(PortfolioError::Config("rotator needs at least one text".to_string()));
        }
        if interval == 0 {
            return Err(PortfolioError::Config("rotator interval must be positive".to_string()));
        }
        Ok(Self {
            texts,
            index: 0,
            interval,
            transition,
            guard: TimerPhase::Idle,
            next_deadline: None,
        })
    }

    /// The text on display.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.texts[self.index]
    }

    /// Position of [`current`](Self::current) in [`texts`](Self::texts).
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Every title, in display order.
    #[must_use]
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Whether a transition started by the last advance is still running.
    #[must_use]
    pub fn is_transitioning(&self, now: Millis) -> bool {
        self.guard.is_cooling_down(now)
    }

    /// Whether an interval is armed; `false` before `start` and after `stop`.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Arms the interval; the first firing is at `now + interval`.
    pub fn start(&mut self, now: Millis) {
        self.next_deadline = Some(now.saturating_add(self.interval));
    }

    /// Cancels the interval and the guard.
    pub fn stop(&mut self) {
        self.next_deadline = None;
        self.guard.cancel();
    }

    /// One interval firing at `now`. Returns `true` if the index advanced.
    fn fire(&mut self, now: Millis) -> bool {
        self.guard.fire_if_due(now);
        if self.guard.is_cooling_down(now) {
            tracing::trace!(index = self.index, "rotator firing skipped, transition running");
            return false;
        }
        self.index = (self.index + 1) % self.texts.len();
        self.guard.cool_down(now.saturating_add(self.transition));
        true
    }

    /// Processes every interval deadline up to `now`. Returns `true` if the
    /// displayed text changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut changed = false;
        while let Some(deadline) = self.next_deadline {
            if deadline > now {
                break;
            }
            changed |= self.fire(deadline);
            // A deadline that cannot move forward any more ends the rotation.
            self.next_deadline = deadline.checked_add(self.interval);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotator(texts: &[&str]) -> TextRotator {
        let texts = texts.iter().map(|t| (*t).to_string()).collect();
        TextRotator::new(texts, DEFAULT_INTERVAL_MS, DEFAULT_TRANSITION_MS).unwrap()
    }

    #[test]
    fn three_firings_cycle_back_to_start() {
        let mut r = rotator(&["A", "B", "C"]);
        r.start(0);
        let mut seen = vec![r.current().to_string()];
        for k in 1..=3 {
            r.tick(k * DEFAULT_INTERVAL_MS);
            seen.push(r.current().to_string());
        }
        assert_eq!(seen, vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn index_stays_in_range() {
        let mut r = rotator(&["A", "B"]);
        r.start(0);
        for k in 1..50 {
            r.tick(k * 1_000);
            assert!(r.index() < r.texts().len());
        }
    }

    #[test]
    fn late_tick_processes_each_missed_deadline() {
        let mut r = rotator(&["A", "B", "C", "D"]);
        r.start(0);
        assert!(r.tick(9_050));
        assert_eq!(r.current(), "D");
    }

    #[test]
    fn firing_during_transition_is_skipped() {
        let texts = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut r = TextRotator::new(texts, 1_000, 1_500).unwrap();
        r.start(0);
        assert!(r.tick(1_000));
        assert!(!r.tick(2_000));
        assert_eq!(r.current(), "B");
        assert!(r.tick(3_000));
        assert_eq!(r.current(), "C");
    }

    #[test]
    fn stopped_rotator_never_advances() {
        let mut r = rotator(&["A", "B"]);
        r.start(0);
        r.stop();
        assert!(!r.tick(60_000));
        assert_eq!(r.current(), "A");
        assert!(!r.is_running());
    }

    #[test]
    fn huge_durations_do_not_overflow() {
        let mut r = TextRotator::new(vec!["A".into(), "B".into()], Millis::MAX, Millis::MAX).unwrap();
        r.start(1_000);
        assert!(!r.tick(1_000_000));
        assert!(r.tick(Millis::MAX));
        assert_eq!(r.current(), "B");
        assert!(r.is_transitioning(Millis::MAX - 1));
        assert!(!r.is_running());
        assert!(!r.tick(Millis::MAX));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(TextRotator::new(vec!["A".into()], 0, 0).is_err());
    }
}
