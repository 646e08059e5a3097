//! Search panel component renderer.
//!
//! Three bordered inputs side by side (title, year, author). The focused
//! input gets the accent border and a cursor block; empty inputs show their
//! placeholder dimmed.
//!
//! ```text
//!  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//!  │ zo█          │ │ Search by... │ │ Search by... │
//!  └──────────────┘ └──────────────┘ └──────────────┘
//! ```

use crate::ui::helpers::{position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchInputInfo, SearchPanelInfo};

/// Columns left blank on each side of the panel and between inputs.
const SEARCH_PANEL_MARGIN: usize = 1;

/// Renders the panel starting at `row`. Always uses three rows.
pub fn render_search_panel(
    row: usize,
    panel: &SearchPanelInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let count = panel.inputs.len().max(1);
    let usable = cols.saturating_sub(SEARCH_PANEL_MARGIN * (count + 1));
    let box_width = (usable / count).max(4);

    for line in 0..3 {
        position_cursor(row + line, 1);
        for input in &panel.inputs {
            print!("{}", " ".repeat(SEARCH_PANEL_MARGIN));
            render_input_line(line, input, theme, box_width);
        }
    }

    row + 3
}

fn render_input_line(line: usize, input: &SearchInputInfo, theme: &Theme, box_width: usize) {
    let inner_width = box_width.saturating_sub(2);
    let border = if input.is_focused {
        &theme.colors.search_focus_border
    } else {
        &theme.colors.search_bar_border
    };

    print!("{}", Theme::fg(border));
    match line {
        0 => print!("┌{}┐", "─".repeat(inner_width)),
        2 => print!("└{}┘", "─".repeat(inner_width)),
        _ => {
            print!("│");
            let (text, color) = if input.value.is_empty() && !input.is_focused {
                (input.placeholder.to_string(), &theme.colors.text_dim)
            } else if input.is_focused {
                (format!("{}█", input.value), &theme.colors.text_normal)
            } else {
                (input.value.clone(), &theme.colors.text_normal)
            };
            let text = truncate(&format!(" {text}"), inner_width);
            print!("{}", Theme::fg(color));
            print!("{text}");
            print!("{}", " ".repeat(inner_width.saturating_sub(visual_len(&text))));
            print!("{}", Theme::fg(border));
            print!("│");
        }
    }
    print!("{}", Theme::reset());
}
