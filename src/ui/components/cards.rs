//! Card grid component renderer.
//!
//! Each card is four rows tall and [`CARD_WIDTH`] columns wide:
//!
//! ```text
//! ╭────────────────────────────╮
//! │ Title                      │
//! │ Author · 2001              │
//! ╰────────────────────────────╯
//! ```

use crate::app::state::{CARD_GAP, CARD_HEIGHT, CARD_WIDTH};
use crate::ui::helpers::{self, position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardGrid, DisplayItem};

/// Renders the visible cards row by row. Returns the next free row.
pub fn render_cards(row: usize, grid: &CardGrid, theme: &Theme) -> usize {
    let mut current_row = row;
    for card_row in grid.cards.chunks(grid.per_row.max(1)) {
        for line in 0..CARD_HEIGHT {
            position_cursor(current_row + line, 1);
            for card in card_row {
                render_card_line(line, card, theme);
                print!("{}", " ".repeat(CARD_GAP));
            }
        }
        current_row += CARD_HEIGHT;
    }
    current_row
}

fn render_card_line(line: usize, card: &DisplayItem, theme: &Theme) {
    let inner_width = CARD_WIDTH - 2;
    let border = if card.is_selected {
        &theme.colors.selection_bg
    } else {
        &theme.colors.card_border
    };

    print!("{}", Theme::fg(border));
    match line {
        0 => print!("╭{}╮", "─".repeat(inner_width)),
        1 => {
            print!("│ ");
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.text_normal));
            helpers::render_highlighted_text(&card.title, &card.title_highlight, theme, false);
            print!("{}", Theme::reset());
            print!("{}", " ".repeat(inner_width.saturating_sub(visual_len(&card.title) + 1)));
            print!("{}", Theme::fg(border));
            print!("│");
        }
        2 => {
            print!("│ ");
            let author = truncate(&card.author, inner_width.saturating_sub(card.year.len() + 4));
            print!("{}", Theme::fg(&theme.colors.text_normal));
            helpers::render_highlighted_text(&author, &card.author_highlight, theme, false);
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!(" · ");
            helpers::render_highlighted_text(&card.year, &card.year_highlight, theme, false);
            let used = visual_len(&author) + 3 + card.year.len() + 1;
            print!("{}", " ".repeat(inner_width.saturating_sub(used)));
            print!("{}", Theme::fg(border));
            print!("│");
        }
        _ => print!("╰{}╯", "─".repeat(inner_width)),
    }
    print!("{}", Theme::reset());
}
