//! Side effects requested by the event handler.
//!
//! The handler never touches the host or the disk. It returns a list of
//! [`Action`]s which the plugin runtime executes in order after the state
//! change has been applied.

use crate::domain::ThemeMode;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Opens a URL outside the pane with the configured open command.
    ///
    /// Never rendered inside the plugin; the host system handles it.
    OpenUrl(String),

    /// Writes the theme preference to the preference store.
    ///
    /// Emitted once per toggle with the mode that is now applied. A failed
    /// write does not roll back the in-memory mode.
    PersistTheme(ThemeMode),
}
