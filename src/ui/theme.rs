//! Color palettes and ANSI escape generation.
//!
//! The page has two palettes, one per [`ThemeMode`]. Switching the mode swaps
//! which palette the renderer reads; nothing is recomputed, so the very next
//! frame is drawn entirely in the new colors.
//!
//! # Built-in palettes
//!
//! - `catppuccin-latte`: light (default light palette)
//! - `catppuccin-mocha`: dark (default dark palette)
//! - `catppuccin-frappe`: dark, cool
//! - `catppuccin-macchiato`: dark, warm
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! background = "#1e1e2e"
//! text_normal = "#cdd6f4"
//! text_dim = "#a6adc8"
//! accent = "#cba6f7"
//! # ... one entry per field of `ThemeColors`
//! ```

use crate::domain::{PortfolioError, Result, ThemeMode};
use crate::page::Tone;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_LIGHT: &str = "catppuccin-latte";
pub const DEFAULT_DARK: &str = "catppuccin-mocha";

/// A named color palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every element the renderer draws.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Painted behind every row of the pane.
    pub background: String,
    pub text_normal: String,
    pub text_dim: String,
    pub accent: String,
    pub heading: String,

    pub badge_fg: String,
    pub badge_bg: String,
    pub tag_fg: String,
    pub tag_bg: String,
    pub link: String,
    pub success: String,
    pub error: String,
    pub border: String,

    /// Navbar row background; falls back to `background`.
    #[serde(default)]
    pub navbar_bg: Option<String>,
    pub nav_active_fg: String,
    pub nav_active_bg: String,

    pub input_fg: String,
    pub input_bg: String,
    pub input_focused_bg: String,
    pub button_fg: String,
    pub button_bg: String,

    pub selection_fg: String,
    pub selection_bg: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,
    pub search_bar_border: String,
    pub empty_state_fg: String,
}

impl ThemeColors {
    /// Foreground and optional background for a document tone.
    #[must_use]
    pub fn tone(&self, tone: Tone) -> (&str, Option<&str>) {
        match tone {
            Tone::Normal => (&self.text_normal, None),
            Tone::Dim => (&self.text_dim, None),
            Tone::Accent => (&self.accent, None),
            Tone::Heading => (&self.heading, None),
            Tone::Badge => (&self.badge_fg, Some(&self.badge_bg)),
            Tone::Tag => (&self.tag_fg, Some(&self.tag_bg)),
            Tone::Link => (&self.link, None),
            Tone::Success => (&self.success, None),
            Tone::Error => (&self.error, None),
            Tone::Input => (&self.input_fg, Some(&self.input_bg)),
            Tone::InputFocused => (&self.input_fg, Some(&self.input_focused_bg)),
            Tone::Button => (&self.button_fg, Some(&self.button_bg)),
            Tone::Rule => (&self.border, None),
        }
    }

    #[must_use]
    pub fn navbar_bg(&self) -> &str {
        self.navbar_bg.as_deref().unwrap_or(&self.background)
    }
}

impl Theme {
    /// Loads a built-in palette by name, or `None` for an unknown name.
    ///
    /// # Examples
    ///
    /// ```
    /// use termfolio::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.colors.background, "#eff1f5");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };
        toml::from_str(source).ok()
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Theme`] if the file cannot be read or does not
    /// describe a complete palette.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| PortfolioError::Theme(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&contents).map_err(|e| PortfolioError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Resolves a palette from an optional file and an optional built-in name.
    ///
    /// The file wins over the name; anything unusable falls back to `fallback`.
    #[must_use]
    pub fn resolve(file: Option<&str>, name: Option<&str>, fallback: &str) -> Self {
        if let Some(path) = file {
            match Self::from_file(crate::infrastructure::paths::expand_tilde(path)) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(path, error = %e, "theme file unusable, falling back"),
            }
        }
        if let Some(name) = name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(name, "unknown theme name, falling back");
        }
        Self::named_or_default(fallback)
    }

    fn named_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    ///
    /// ```
    /// use termfolio::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#1e66f5"), "\u{1b}[38;2;30;102;245m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The default dark palette.
    ///
    /// # Panics
    ///
    /// Panics if the embedded palette fails to parse, which would be a build defect.
    fn default() -> Self {
        toml::from_str(include_str!("../../themes/catppuccin-mocha.toml"))
            .expect("embedded catppuccin-mocha palette should always parse")
    }
}

/// The light and dark palettes; the theme mode picks one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palettes {
    pub light: Theme,
    pub dark: Theme,
}

impl Palettes {
    #[must_use]
    pub const fn new(light: Theme, dark: Theme) -> Self {
        Self { light, dark }
    }

    #[must_use]
    pub const fn for_mode(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self {
            light: Theme::named_or_default(DEFAULT_LIGHT),
            dark: Theme::default(),
        }
    }
}
