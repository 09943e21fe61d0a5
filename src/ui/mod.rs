//! Terminal rendering.
//!
//! - [`viewmodel`]: renderable snapshot types
//! - [`renderer`]: frame entry point
//! - [`components`]: navbar, document, palette overlay, hint bar
//! - [`helpers`]: row building and ANSI utilities
//! - [`theme`]: palettes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Palettes, Theme};
pub use viewmodel::{FooterInfo, NavbarInfo, PaletteInfo, PaletteItem, UIViewModel};
