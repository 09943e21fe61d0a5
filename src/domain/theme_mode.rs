//! Light/dark display mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The page-wide color scheme.
///
/// Serialized as `"light"` / `"dark"`, which is also the format of the persisted
/// preference and of `color-scheme` pipe messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Returns the opposite mode.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown color scheme: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipping_twice_is_identity() {
        assert_eq!(ThemeMode::Light.flipped().flipped(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.flipped(), ThemeMode::Light);
    }

    #[test]
    fn parses_pipe_payloads() {
        assert_eq!(" Dark\n".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}
