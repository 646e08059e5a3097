//! Table component renderer.
//!
//! TITLE / AUTHOR / YEAR columns. The column the sequence is ordered by
//! carries a direction arrow; filter matches are highlighted in each cell.

use crate::ui::helpers::{self, position_cursor, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, DisplayItem, TableView};

/// Renders column headers and visible rows. Returns the next free row.
pub fn render_table(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_table_headers(row, &table.columns, theme);
    for item in &table.rows {
        current_row = render_table_row(current_row, item, &table.columns, theme, cols);
    }
    current_row
}

fn render_table_headers(row: usize, columns: &[ColumnHeader], theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    for column in columns {
        print!("{}", Theme::fg(&theme.colors.header_fg));
        print!("{}", column.label);
        let mut used = column.label.len();
        if let Some(direction) = column.sort {
            print!("{}", Theme::fg(&theme.colors.sort_indicator_fg));
            print!(" {}", direction.arrow());
            used += 2;
        }
        print!("{}", " ".repeat(column.width.saturating_sub(used)));
    }
    print!("{}", Theme::reset());
    row + 1
}

/// One row, padded to the full width so the selection background is solid.
fn render_table_row(
    row: usize,
    item: &DisplayItem,
    columns: &[ColumnHeader],
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let cells = [
        (&item.title, &item.title_highlight),
        (&item.author, &item.author_highlight),
        (&item.year, &item.year_highlight),
    ];

    let mut line_len = 0;
    for ((text, ranges), column) in cells.into_iter().zip(columns) {
        helpers::render_highlighted_text(text, ranges, theme, item.is_selected);
        let text_len = visual_len(text);
        print!("{}", " ".repeat(column.width.saturating_sub(text_len)));
        line_len += column.width.max(text_len);
    }

    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}
