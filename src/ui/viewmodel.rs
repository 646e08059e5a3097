//! View model types representing renderable UI state.
//!
//! View models are created by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They hold display-ready data only: truncated
//! text, highlight ranges, selection flags, and layout numbers.

use crate::domain::SortDirection;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while the search panel is open.
    pub search_panel: Option<SearchPanelInfo>,

    /// What fills the body of the pane.
    pub content: Content,

    pub footer: FooterInfo,
}

/// Body of the pane. Exactly one of the three status views or one of the two
/// presentation widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Status(StatusMessage),
    Table(TableView),
    Cards(CardGrid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
    /// Loaded, but nothing matches (or the catalog is empty).
    Empty,
}

/// A centered two-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<ColumnHeader>,
    /// Only the rows inside the visible window.
    pub rows: Vec<DisplayItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub label: &'static str,
    pub width: usize,
    /// Set on the column the sequence is currently ordered by.
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGrid {
    /// Only the cards inside the visible window, in reading order.
    pub cards: Vec<DisplayItem>,
    pub per_row: usize,
}

/// Display information for a single book, shared by rows and cards.
///
/// Highlight ranges are `(start, end)` character indices of the filter
/// fragment inside the full, untruncated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub author: String,
    pub year: String,
    pub is_selected: bool,
    pub title_highlight: Vec<(usize, usize)>,
    pub author_highlight: Vec<(usize, usize)>,
    pub year_highlight: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Count, sort order, view mode, and load age joined with separators.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPanelInfo {
    /// Title, Year, Author in that order.
    pub inputs: Vec<SearchInputInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInputInfo {
    pub placeholder: &'static str,
    pub value: String,
    pub is_focused: bool,
}
