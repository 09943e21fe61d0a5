//! Light/dark mode resolution and toggling.
//!
//! [`ThemeState`] owns the page-wide [`ThemeMode`]. It is resolved once at startup
//! from the stored preference and the OS preference, and afterwards changes only
//! through [`ThemeState::toggle`] or, while the user has not expressed a
//! preference, through [`ThemeState::on_system_change`].
//!
//! Persisting the mode is not done here: `toggle` returns the mode that must be
//! written, and the application layer turns that into an action. That keeps this
//! type a pure state machine.

use crate::domain::ThemeMode;

/// Page-wide theme state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeState {
    mode: ThemeMode,
    /// Set when a stored preference existed at startup or the user toggled.
    explicit: bool,
    /// Last OS preference seen, if any.
    system: Option<ThemeMode>,
}

impl ThemeState {
    /// Resolves the startup mode: stored preference, then OS preference, then light.
    ///
    /// # Examples
    ///
    /// ```
    /// use termfolio::features::theme::ThemeState;
    /// use termfolio::ThemeMode;
    ///
    /// assert_eq!(ThemeState::initial_mode(Some(ThemeMode::Dark), Some(ThemeMode::Light)), ThemeMode::Dark);
    /// assert_eq!(ThemeState::initial_mode(None, Some(ThemeMode::Dark)), ThemeMode::Dark);
    /// assert_eq!(ThemeState::initial_mode(None, None), ThemeMode::Light);
    /// ```
    #[must_use]
    pub fn initial_mode(stored: Option<ThemeMode>, system: Option<ThemeMode>) -> ThemeMode {
        stored.or(system).unwrap_or_default()
    }

    /// Builds the state from the stored and OS preferences.
    ///
    /// A stored preference counts as explicit, so later OS changes are ignored.
    #[must_use]
    pub fn new(stored: Option<ThemeMode>, system: Option<ThemeMode>) -> Self {
        Self {
            mode: Self::initial_mode(stored, system),
            explicit: stored.is_some(),
            system,
        }
    }

    /// The mode currently applied to the page.
    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Whether OS preference changes are being ignored.
    #[must_use]
    pub const fn has_explicit_preference(&self) -> bool {
        self.explicit
    }

    /// Last OS preference reported, whether or not it was applied.
    #[must_use]
    pub const fn system_preference(&self) -> Option<ThemeMode> {
        self.system
    }

    /// Flips the mode and pins it as the user's explicit preference.
    ///
    /// Returns the new mode, which the caller must persist.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.flipped();
        self.explicit = true;
        tracing::debug!(mode = %self.mode, "theme toggled");
        self.mode
    }

    /// Applies an OS preference change unless the user has an explicit preference.
    ///
    /// Returns `true` when the applied mode changed.
    pub fn on_system_change(&mut self, system: ThemeMode) -> bool {
        self.system = Some(system);
        if self.explicit {
            tracing::debug!(system = %system, "ignoring OS color scheme change, explicit preference set");
            return false;
        }
        let changed = self.mode != system;
        self.mode = system;
        changed
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_follow_parity() {
        for initial in [ThemeMode::Light, ThemeMode::Dark] {
            for toggles in 0..6 {
                let mut state = ThemeState::new(Some(initial), None);
                for _ in 0..toggles {
                    state.toggle();
                }
                let expected = if toggles % 2 == 0 { initial } else { initial.flipped() };
                assert_eq!(state.mode(), expected);
            }
        }
    }

    #[test]
    fn system_changes_propagate_until_first_toggle() {
        let mut state = ThemeState::new(None, Some(ThemeMode::Light));
        assert!(state.on_system_change(ThemeMode::Dark));
        assert_eq!(state.mode(), ThemeMode::Dark);

        assert_eq!(state.toggle(), ThemeMode::Light);
        assert!(!state.on_system_change(ThemeMode::Dark));
        assert_eq!(state.mode(), ThemeMode::Light);
        assert_eq!(state.system_preference(), Some(ThemeMode::Dark));
    }

    #[test]
    fn stored_preference_ignores_system_changes() {
        let mut state = ThemeState::new(Some(ThemeMode::Light), Some(ThemeMode::Dark));
        assert_eq!(state.mode(), ThemeMode::Light);
        assert!(state.has_explicit_preference());
        assert!(!state.on_system_change(ThemeMode::Dark));
        assert_eq!(state.mode(), ThemeMode::Light);
    }

    #[test]
    fn unchanged_system_value_reports_no_change() {
        let mut state = ThemeState::new(None, Some(ThemeMode::Dark));
        assert!(!state.on_system_change(ThemeMode::Dark));
    }
}
