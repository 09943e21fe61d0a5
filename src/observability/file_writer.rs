//! Append-only trace file with size-based rotation.
//!
//! When the live file grows past the policy's limit it is shifted to `.1`,
//! the previous `.1` to `.2` and so on; the backup beyond the retention count
//! is deleted.
//!
//! ```text
//! termfolio-otlp.json      (live)
//! termfolio-otlp.json.1    (newest backup)
//! termfolio-otlp.json.2
//! termfolio-otlp.json.3    (oldest kept)
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When to rotate and how many backups to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            backups: 3,
        }
    }
}

/// A line-oriented writer that rotates its file by size.
///
/// The file is opened lazily on the first write.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, or an error if
    /// the internal lock was poisoned.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("trace file lock poisoned: {e}")))?;

        let size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if size >= self.policy.max_bytes {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::other("trace file unavailable"));
        };
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.backups == 0 {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        let oldest = self.backup_path(self.policy.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.policy.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn small(dir: &TempDir) -> RotatingFile {
        let policy = RotationPolicy { max_bytes: 8, backups: 2 };
        RotatingFile::new(dir.path().join("trace.json"), policy)
    }

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::new(dir.path().join("trace.json"), RotationPolicy::default());
        file.append_line("{}").unwrap();
        file.append_line("[]").unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "{}\n[]\n");
    }

    #[test]
    fn rotates_and_keeps_only_the_newest_backups() {
        let dir = TempDir::new().unwrap();
        let file = small(&dir);
        for line in ["first-line", "second-line", "third-line", "fourth-line"] {
            file.append_line(line).unwrap();
        }
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "fourth-line\n");
        assert_eq!(fs::read_to_string(file.backup_path(1)).unwrap(), "third-line\n");
        assert_eq!(fs::read_to_string(file.backup_path(2)).unwrap(), "second-line\n");
        assert!(!file.backup_path(3).exists());
    }
}
