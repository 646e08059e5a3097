//! Status message component renderer.
//!
//! Loading, error, and no-results each render as a centered message with a
//! dimmed hint underneath. The color tells them apart.

use crate::ui::helpers::{position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusMessage};

/// Renders the message two rows below `row`.
pub fn render_status(row: usize, status: &StatusMessage, theme: &Theme, cols: usize) -> usize {
    let color = match status.kind {
        StatusKind::Loading | StatusKind::Empty => &theme.colors.status_fg,
        StatusKind::Error => &theme.colors.error_fg,
    };

    render_centered(row + 2, &status.message, &Theme::fg(color), cols);
    let hint_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    render_centered(row + 3, &status.subtitle, &hint_style, cols);
    row + 4
}

fn render_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = visual_len(&text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
