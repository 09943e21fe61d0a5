//! Storage layer for the persisted theme preference.
//!
//! # Modules
//!
//! - `backend`: [`PreferenceStore`] trait
//! - `json`: JSON file backend with atomic writes
//! - `memory`: in-memory fallback backend

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::PreferenceStore;
pub use json::JsonStorage;
pub use memory::MemoryStorage;

use crate::domain::ThemeMode;
use std::path::PathBuf;

/// Opens the JSON store at `path`, falling back to memory if it is unusable.
///
/// Only I/O failures (no writable directory, unreadable file) select the memory
/// fallback; the theme then still works for the lifetime of the instance, it just
/// is not remembered. A file with corrupt contents is reused and rewritten on the
/// next save.
#[must_use]
pub fn open_store(path: PathBuf) -> Box<dyn PreferenceStore> {
    match JsonStorage::new(path) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(error = %e, "preference storage unavailable, using memory");
            Box::new(MemoryStorage::default())
        }
    }
}

/// Reads the stored theme, treating read failures as "unset".
pub fn stored_theme(store: &dyn PreferenceStore) -> Option<ThemeMode> {
    store.load_theme().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read theme preference");
        None
    })
}

/// Writes the theme, logging and swallowing failures.
pub fn persist_theme(store: &mut dyn PreferenceStore, mode: ThemeMode) {
    if let Err(e) = store.save_theme(mode) {
        tracing::warn!(error = %e, mode = %mode, "failed to persist theme preference");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PortfolioError, Result};

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn load_theme(&self) -> Result<Option<ThemeMode>> {
            Err(PortfolioError::Storage("unreadable".into()))
        }

        fn save_theme(&mut self, _mode: ThemeMode) -> Result<()> {
            Err(PortfolioError::Storage("read-only".into()))
        }
    }

    #[test]
    fn failures_are_swallowed() {
        let mut store = FailingStore;
        assert_eq!(stored_theme(&store), None);
        persist_theme(&mut store, ThemeMode::Dark);
    }

    #[test]
    fn corrupt_file_is_rewritten_by_the_next_toggle() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = open_store(path.clone());
        assert_eq!(stored_theme(store.as_ref()), None);
        persist_theme(store.as_mut(), ThemeMode::Dark);
        drop(store);

        let reopened = open_store(path);
        assert_eq!(stored_theme(reopened.as_ref()), Some(ThemeMode::Dark));
    }

    #[test]
    fn unusable_path_falls_back_to_memory() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let mut store = open_store(blocker.join("preferences.json"));
        persist_theme(store.as_mut(), ThemeMode::Dark);
        assert_eq!(stored_theme(store.as_ref()), Some(ThemeMode::Dark));
    }
}
