//! termfolio: a personal portfolio rendered as a Zellij plugin.
//!
//! The portfolio is a single scrolling page with a fixed navigation bar, an
//! animated hero banner, an about/skills section, a projects gallery, a
//! contact form and a footer. On top of the page sit:
//!
//! - a command palette (`Ctrl+K` or `/`) with debounced search over the
//!   sections and external links
//! - a light/dark theme toggle, persisted across sessions and reconciled
//!   with the OS color scheme
//! - a scroll-spy that highlights the nav item of the section in view
//! - a rotating job title in the hero
//! - a contact form with simulated submission
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host events, timer, actions
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event → state → Action
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Page (page/)  │   │ Storage       │
//! │ - view model  │   │ - composition │   │ - JSON prefs  │
//! │ - palettes    │   │ - navbar      │   │ - memory      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Features (features/)                               │  ← pure state machines over Millis
//! │  theme · navigation · search · rotator · contact    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) · Content (content/)              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Every timed behavior (palette debounce, rotator interval and guard, form
//! submission delays) is a deadline in logical milliseconds. The shim feeds
//! the clock from a 100 ms host timer; the state machines never block.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/termfolio.wasm" {
//!         dark_theme "catppuccin-macchiato"
//!         system_color_scheme "dark"
//!         content_file "~/.config/termfolio/portfolio.toml"
//!         sections "home,about,projects,contact"
//!         open_command "xdg-open"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use termfolio::{handle_event, initialize, Config, Event, SectionId};
//!
//! let mut state = initialize(&Config::default(), None)?;
//! handle_event(&mut state, &Event::NavigateTo(SectionId::Projects))?;
//! assert_eq!(state.observer.active(), Some(SectionId::Projects));
//! # Ok::<(), termfolio::PortfolioError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod content;
pub mod domain;
pub mod features;
pub mod infrastructure;
pub mod page;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Timings};
pub use content::Content;
pub use domain::{PortfolioError, Result, SectionId, ThemeMode};
pub use ui::Theme;

use chrono::Datelike;
use features::ThemeState;
use std::collections::BTreeMap;
use std::str::FromStr;
use ui::theme::{Palettes, DEFAULT_DARK, DEFAULT_LIGHT};

/// Default command used to open external links.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration, parsed from the layout's plugin block.
///
/// Every key is optional; unparseable values fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Built-in palette for light mode.
    pub light_theme: Option<String>,
    /// Built-in palette for dark mode.
    pub dark_theme: Option<String>,
    /// TOML palette for light mode; wins over `light_theme`.
    pub light_theme_file: Option<String>,
    /// TOML palette for dark mode; wins over `dark_theme`.
    pub dark_theme_file: Option<String>,

    /// OS color scheme at startup, if the host can tell.
    pub system_color_scheme: Option<ThemeMode>,

    /// TOML file replacing the embedded portfolio copy.
    pub content_file: Option<String>,

    /// Rendered sections, deduplicated, in document order.
    pub sections: Vec<SectionId>,

    pub timings: Timings,

    /// Program that receives external URLs as its single argument.
    pub open_command: String,

    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            light_theme: None,
            dark_theme: None,
            light_theme_file: None,
            dark_theme_file: None,
            system_color_scheme: None,
            content_file: None,
            sections: SectionId::ALL.to_vec(),
            timings: Timings::default(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use termfolio::{Config, SectionId, ThemeMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("sections".to_string(), "about, #home".to_string());
    /// map.insert("system_color_scheme".to_string(), "dark".to_string());
    /// map.insert("search_debounce_ms".to_string(), "150".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.sections, vec![SectionId::Home, SectionId::About]);
    /// assert_eq!(config.system_color_scheme, Some(ThemeMode::Dark));
    /// assert_eq!(config.timings.search_debounce, 150);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| config.get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let system_color_scheme = text("system_color_scheme").and_then(|raw| {
            ThemeMode::from_str(&raw)
                .map_err(|e| tracing::debug!(error = %e, "ignoring system_color_scheme"))
                .ok()
        });

        let sections = text("sections")
            .map(|raw| parse_sections(&raw))
            .filter(|sections| !sections.is_empty())
            .unwrap_or(defaults.sections);

        let d = defaults.timings;
        let timings = Timings {
            rotator_interval: millis(config, "rotator_interval_ms", d.rotator_interval, false),
            rotator_transition: millis(config, "rotator_transition_ms", d.rotator_transition, true),
            search_debounce: millis(config, "search_debounce_ms", d.search_debounce, true),
            submit_delay: millis(config, "submit_delay_ms", d.submit_delay, true),
            confirmation: millis(config, "confirmation_ms", d.confirmation, true),
        };

        Self {
            light_theme: text("light_theme"),
            dark_theme: text("dark_theme"),
            light_theme_file: text("light_theme_file"),
            dark_theme_file: text("dark_theme_file"),
            system_color_scheme,
            content_file: text("content_file"),
            sections,
            timings,
            open_command: text("open_command").unwrap_or(defaults.open_command),
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Light and dark palettes for this configuration.
    #[must_use]
    pub fn palettes(&self) -> Palettes {
        Palettes::new(
            Theme::resolve(self.light_theme_file.as_deref(), self.light_theme.as_deref(), DEFAULT_LIGHT),
            Theme::resolve(self.dark_theme_file.as_deref(), self.dark_theme.as_deref(), DEFAULT_DARK),
        )
    }
}

fn parse_sections(raw: &str) -> Vec<SectionId> {
    let mut sections: Vec<SectionId> = raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .filter_map(|part| {
            SectionId::from_str(part)
                .map_err(|e| tracing::debug!(error = %e, "ignoring section"))
                .ok()
        })
        .collect();
    sections.sort_unstable();
    sections.dedup();
    sections
}

fn millis(config: &BTreeMap<String, String>, key: &str, default: u64, allow_zero: bool) -> u64 {
    let Some(raw) = config.get(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(0) if !allow_zero => {
            tracing::debug!(key, "zero not allowed, using default");
            default
        }
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(key, value = %raw, error = %e, "invalid duration, using default");
            default
        }
    }
}

/// Builds the application state for `config`.
///
/// `stored` is the theme preference read from the preference store. Content
/// that cannot be loaded falls back to the embedded copy; content without
/// rotating titles borrows the embedded titles.
///
/// # Errors
///
/// Only if the state cannot be built even from the fallbacks, which
/// [`Config::from_zellij`] rules out.
pub fn initialize(config: &Config, stored: Option<ThemeMode>) -> Result<AppState> {
    let _span = tracing::debug_span!("initialize", sections = config.sections.len()).entered();

    let mut content = Content::load_or_default(config.content_file.as_deref());
    if content.rotating_titles.is_empty() {
        tracing::warn!("content has no rotating titles, using the embedded ones");
        content.rotating_titles = Content::default().rotating_titles;
    }

    let theme = ThemeState::new(stored, config.system_color_scheme);
    tracing::info!(
        mode = %theme.mode(),
        explicit = theme.has_explicit_preference(),
        system = ?theme.system_preference(),
        "theme resolved"
    );

    let year = chrono::Local::now().year();
    AppState::new(content, config.sections.clone(), theme, config.palettes(), config.timings, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("sections", "blog, ,"),
            ("rotator_interval_ms", "0"),
            ("submit_delay_ms", "soon"),
            ("system_color_scheme", "sepia"),
            ("trace_level", "  "),
        ]));
        assert_eq!(config.sections, SectionId::ALL.to_vec());
        assert_eq!(config.timings, Timings::default());
        assert_eq!(config.system_color_scheme, None);
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn sections_are_ordered_and_deduplicated() {
        let config = Config::from_zellij(&map(&[("sections", "contact,home,contact")]));
        assert_eq!(config.sections, vec![SectionId::Home, SectionId::Contact]);
    }

    #[test]
    fn initialize_applies_stored_then_system_preference() {
        let mut config = Config::default();
        config.system_color_scheme = Some(ThemeMode::Dark);
        assert_eq!(initialize(&config, None).unwrap().theme.mode(), ThemeMode::Dark);
        assert_eq!(initialize(&config, Some(ThemeMode::Light)).unwrap().theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn maximal_durations_are_safe_end_to_end() {
        let max = u64::MAX.to_string();
        let config = Config::from_zellij(&map(&[
            ("rotator_interval_ms", &max),
            ("rotator_transition_ms", &max),
            ("search_debounce_ms", &max),
            ("submit_delay_ms", &max),
            ("confirmation_ms", &max),
        ]));
        assert_eq!(config.timings.search_debounce, u64::MAX);

        let mut state = initialize(&config, None).unwrap();
        handle_event(&mut state, &Event::Tick { now: 100 }).unwrap();
        handle_event(&mut state, &Event::TogglePalette).unwrap();
        handle_event(&mut state, &Event::Char('g')).unwrap();
        assert!(state.search.is_debouncing());

        handle_event(&mut state, &Event::Tick { now: 1_000_000 }).unwrap();
        assert!(state.search.is_debouncing());
        assert_eq!(state.rotator.index(), 0);
    }

    #[test]
    fn missing_content_file_uses_embedded_copy() {
        let config = Config {
            content_file: Some("/nonexistent/portfolio.toml".to_string()),
            ..Config::default()
        };
        let state = initialize(&config, None).unwrap();
        assert_eq!(state.content, Content::default());
    }
}
