//! Domain layer for the termfolio plugin.
//!
//! Core value types shared by every other layer, independent of Zellij APIs:
//!
//! - [`error`]: Error types and result aliases
//! - [`section`]: Page sections (anchors) and navigation items
//! - [`action`]: Command palette actions and their targets
//! - [`theme_mode`]: The light/dark display mode

pub mod action;
pub mod error;
pub mod section;
pub mod theme_mode;

pub use action::{build_actions, ActionCategory, ActionTarget, SearchAction};
pub use error::{PortfolioError, Result};
pub use section::{nav_items, NavItem, SectionId};
pub use theme_mode::ThemeMode;
