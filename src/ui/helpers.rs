//! Shared rendering utilities.
//!
//! Everything here works in character indices, never byte indices, so
//! titles and author names with multi-byte characters highlight and truncate
//! correctly.

use crate::ui::theme::Theme;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders `text` with the given character ranges highlighted.
///
/// Ranges past the end of `text` are ignored, so ranges computed against the
/// untruncated text can be applied to its truncated form. On a selected item
/// the selection colors are restored after each highlight.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        if start > current_pos {
            print!("{}", chars[current_pos..start].iter().collect::<String>());
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        print!("{}", chars[start..end].iter().collect::<String>());
        print!("{}", Theme::reset());

        if is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        current_pos = end;
    }

    if current_pos < chars.len() {
        print!("{}", chars[current_pos..].iter().collect::<String>());
    }
}

/// Character range of the first case-insensitive occurrence of `fragment`.
///
/// Empty fragments and misses produce no ranges.
#[must_use]
pub fn match_range(text: &str, fragment: &str) -> Vec<(usize, usize)> {
    if fragment.is_empty() {
        return vec![];
    }

    let haystack: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    let needle: Vec<char> = fragment.chars().flat_map(char::to_lowercase).collect();

    // Lowercasing can change the char count (e.g. 'İ'); only trust indices
    // when it doesn't.
    if haystack.len() != text.chars().count() || needle.len() > haystack.len() {
        return vec![];
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| vec![(start, start + needle.len())])
        .unwrap_or_default()
}

/// Cuts `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Number of terminal cells `text` occupies, counting one per character.
#[must_use]
pub fn visual_len(text: &str) -> usize {
    text.chars().count()
}

/// Human-readable age such as "just now", "5m ago", or "3d ago".
#[must_use]
pub fn format_age(seconds: i64) -> String {
    if seconds < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if seconds < SECONDS_PER_HOUR {
        format!("{}m ago", seconds / SECONDS_PER_MINUTE)
    } else if seconds < SECONDS_PER_DAY {
        format!("{}h ago", seconds / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", seconds / SECONDS_PER_DAY)
    }
}
