//! Preference storage abstraction.
//!
//! The plugin persists exactly one value, the user's theme choice. The
//! [`PreferenceStore`] trait keeps the application layer independent of where that
//! value lives, so tests and the in-memory fallback plug in the same way as the
//! JSON file.

use crate::domain::{Result, ThemeMode};

/// Abstraction over persistent preference backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
/// - [`MemoryStorage`](crate::storage::MemoryStorage): process-local fallback
///
/// # Examples
///
/// ```
/// use termfolio::storage::{MemoryStorage, PreferenceStore};
/// use termfolio::ThemeMode;
///
/// let mut store = MemoryStorage::default();
/// assert_eq!(store.load_theme()?, None);
/// store.save_theme(ThemeMode::Dark)?;
/// assert_eq!(store.load_theme()?, Some(ThemeMode::Dark));
/// # Ok::<(), termfolio::PortfolioError>(())
/// ```
pub trait PreferenceStore {
    /// Returns the stored theme, or `None` when the user never chose one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load_theme(&self) -> Result<Option<ThemeMode>>;

    /// Stores the theme choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Callers treat this as non-fatal.
    fn save_theme(&mut self, mode: ThemeMode) -> Result<()>;
}
