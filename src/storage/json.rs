//! JSON file-based preference storage.
//!
//! The whole file is loaded on open and rewritten on every change using an atomic
//! write (write to a temporary file, then rename), so a crash never leaves a
//! half-written preference file behind.

use crate::domain::{PortfolioError, Result, ThemeMode};
use crate::storage::backend::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// On-disk document.
///
/// ```json
/// {
///   "version": 1,
///   "theme": "dark"
/// }
/// ```
///
/// A missing `theme` key means the user never chose; it never means light.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PreferenceData {
    version: u32,

    /// Kept as a raw string so an unknown value reads as unset instead of
    /// failing the whole file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,

    /// Set whenever the preference was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<i64>,
}

impl Default for PreferenceData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            theme: None,
            updated_at: None,
        }
    }
}

/// JSON file preference backend.
pub struct JsonStorage {
    file_path: PathBuf,
    data: PreferenceData,
    dirty: bool,
}

impl JsonStorage {
    /// Opens (or prepares to create) the preference file.
    ///
    /// Parent directories are created eagerly; the file itself is only written
    /// on the first change.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but cannot be read. Contents that do not parse are not an error:
    /// they read as "no preference" and are replaced by the next save.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use termfolio::storage::{JsonStorage, PreferenceStore};
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/data/termfolio/preferences.json"))?;
    /// let theme = storage.load_theme()?;
    /// # Ok::<(), termfolio::PortfolioError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        let _span = tracing::debug_span!("json_storage_open", path = ?file_path).entered();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no preference file yet");
            PreferenceData::default()
        };

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<PreferenceData> {
        let contents = std::fs::read_to_string(path)?;
        let data: PreferenceData = match serde_json::from_str(&contents) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "preference file is not valid JSON, starting fresh");
                return Ok(PreferenceData::default());
            }
        };

        if data.version > FORMAT_VERSION {
            tracing::warn!(version = data.version, "preference file written by a newer version");
        }
        tracing::debug!(theme = ?data.theme, "loaded preferences");
        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| PortfolioError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl PreferenceStore for JsonStorage {
    fn load_theme(&self) -> Result<Option<ThemeMode>> {
        let Some(raw) = self.data.theme.as_deref() else {
            return Ok(None);
        };
        match raw.parse::<ThemeMode>() {
            Ok(mode) => Ok(Some(mode)),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "ignoring unknown stored theme");
                Ok(None)
            }
        }
    }

    fn save_theme(&mut self, mode: ThemeMode) -> Result<()> {
        let _span = tracing::debug_span!("json_save_theme", mode = %mode).entered();

        self.data.theme = Some(mode.as_str().to_string());
        self.data.updated_at = Some(chrono::Utc::now().timestamp());
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save preferences on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_means_unset() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path().join("preferences.json")).unwrap();
        assert_eq!(storage.load_theme().unwrap(), None);
    }

    #[test]
    fn save_then_reopen_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.save_theme(ThemeMode::Dark).unwrap();
        }
        let storage = JsonStorage::new(path.clone()).unwrap();
        assert_eq!(storage.load_theme().unwrap(), Some(ThemeMode::Dark));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"theme\": \"dark\""));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn absent_theme_key_is_unset_not_light() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"version": 1}"#).unwrap();
        let storage = JsonStorage::new(path).unwrap();
        assert_eq!(storage.load_theme().unwrap(), None);
    }

    #[test]
    fn unknown_theme_value_is_unset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"version": 1, "theme": "sepia"}"#).unwrap();
        let storage = JsonStorage::new(path).unwrap();
        assert_eq!(storage.load_theme().unwrap(), None);
    }

    #[test]
    fn corrupt_file_reads_as_unset_and_is_repaired_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();

        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            assert_eq!(storage.load_theme().unwrap(), None);
            storage.save_theme(ThemeMode::Dark).unwrap();
        }

        let reopened = JsonStorage::new(path).unwrap();
        assert_eq!(reopened.load_theme().unwrap(), Some(ThemeMode::Dark));
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::create_dir(&path).unwrap();
        assert!(matches!(JsonStorage::new(path), Err(PortfolioError::Io(_))));
    }
}
