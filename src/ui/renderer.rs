//! Top-level rendering entry point.
//!
//! ```text
//! AppState ─compute_viewmodel─▶ UIViewModel ─render_frame─▶ ANSI on stdout
//! ```
//!
//! The palette is chosen from the theme mode at draw time, so a toggle takes
//! effect on the very next frame.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin pane to stdout at the state's current size.
pub fn render(state: &AppState) {
    let _span = tracing::trace_span!("render", rows = state.rows, cols = state.cols).entered();

    let viewmodel = state.compute_viewmodel();
    components::render_frame(&viewmodel, state.active_palette(), state.rows, state.cols);
}
