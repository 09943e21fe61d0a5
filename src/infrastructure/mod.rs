//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the plugin's private data directory is mounted at `/data`
//! and the host filesystem (rooted at the directory Zellij was started from) at
//! `/host`. Everything that knows about those mount points lives here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, preferences_path, PREFERENCES_FILE};
