//! Composable UI component renderers.
//!
//! - [`header`]: title and summary line
//! - [`search`]: three-input search panel
//! - [`table`]: TITLE / AUTHOR / YEAR rows
//! - [`cards`]: card grid
//! - [`status`]: loading, error, and no-results messages
//! - [`footer`]: keybinding hints
//!
//! Layout, top to bottom:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search panel, 3 lines, while searching]
//! [Table, cards, or status message]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod footer;
mod header;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Content, UIViewModel};

/// Renders a horizontal border line and returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = header::render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(panel) = &vm.search_panel {
        current_row = search::render_search_panel(current_row, panel, theme, cols);
    }

    let _current_row = match &vm.content {
        Content::Status(status) => status::render_status(current_row, status, theme, cols),
        Content::Table(table_view) => table::render_table(current_row, table_view, theme, cols),
        Content::Cards(grid) => cards::render_cards(current_row, grid, theme),
    };

    let footer_row = rows.saturating_sub(1);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    footer::render_footer(footer_row, &vm.footer, theme, cols);
}
