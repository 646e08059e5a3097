//! Header component renderer.
//!
//! One line: the bold title on the left, the dimmed summary (count, sort
//! order, view mode, load age) right-aligned.

use crate::ui::helpers::{position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
///
/// The summary is dropped or cut before the title is.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = visual_len(&title);
    let summary = truncate(&header.summary, cols.saturating_sub(title_len + 2));
    let summary_len = visual_len(&summary);

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());

    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(cols.saturating_sub(title_len + summary_len + 1)));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{summary} ");
    print!("{}", Theme::reset());
    row + 1
}
