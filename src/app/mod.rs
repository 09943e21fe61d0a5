//! Application layer: state, events and actions.
//!
//! Data flows one way:
//!
//! ```text
//! host input ─▶ Event ─▶ handle_event ─▶ AppState mutation ─▶ Vec<Action> ─▶ shim
//!                                              │
//!                                              └─▶ compute_viewmodel ─▶ renderer
//! ```
//!
//! - [`actions`]: side effects the shim executes
//! - [`handler`]: event processing
//! - [`modes`]: input modes
//! - [`state`]: the state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, Timings};
