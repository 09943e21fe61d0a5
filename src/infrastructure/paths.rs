//! Sandbox path helpers.

use std::path::PathBuf;

/// File name of the persisted preferences inside [`get_data_dir`].
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Returns the plugin's data directory.
///
/// `/data` is the per-plugin writable directory Zellij provides without any
/// permission grant, so preferences can be read synchronously during load.
///
/// # Examples
///
/// ```
/// use termfolio::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/data/termfolio"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data").join("termfolio")
}

/// Full path of the preference file.
#[must_use]
pub fn preferences_path() -> PathBuf {
    get_data_dir().join(PREFERENCES_FILE)
}

/// Maps `~`-prefixed paths from the plugin configuration onto the `/host` mount.
///
/// # Examples
///
/// ```
/// use termfolio::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/portfolio.toml"), "/host/portfolio.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
