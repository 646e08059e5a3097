//! Top-level rendering coordinator.
//!
//! ```text
//! AppState -> compute_viewmodel -> UIViewModel -> components -> stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
///
/// Does not clear the screen; Zellij hands the plugin a fresh frame on every
/// render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_frame(&viewmodel, &state.theme, cols, rows);
}
