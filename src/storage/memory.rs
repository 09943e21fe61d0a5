//! In-memory preference storage.
//!
//! Used when the data directory is unavailable, and by tests. Values live only as
//! long as the plugin instance.

use crate::domain::{Result, ThemeMode};
use crate::storage::backend::PreferenceStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    theme: Option<ThemeMode>,
}

impl MemoryStorage {
    #[must_use]
    pub const fn with_theme(theme: ThemeMode) -> Self {
        Self { theme: Some(theme) }
    }
}

impl PreferenceStore for MemoryStorage {
    fn load_theme(&self) -> Result<Option<ThemeMode>> {
        Ok(self.theme)
    }

    fn save_theme(&mut self, mode: ThemeMode) -> Result<()> {
        self.theme = Some(mode);
        Ok(())
    }
}
