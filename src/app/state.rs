//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin shows: the fetch
//! controller (raw records and view state), the filter and sort criteria, the
//! memoized display sequence, and purely presentational state (view mode,
//! input mode, selection, theme).
//!
//! Every mutator that touches one of the three derivation inputs calls
//! `sync_display`, which asks the [`DisplayCache`] for the sequence. The cache
//! only re-derives when an input actually changed, so presentation-only
//! changes (view mode, selection, search focus) cost nothing.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{AppState, ViewMode};
//! use bookshelf::domain::{BookRecord, FilterField};
//! use bookshelf::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), ViewMode::Table);
//! let ticket = state.load();
//! state.complete_fetch(ticket.generation, Ok(vec![BookRecord::new("1", "Zoo", "A", 2001)]));
//! state.set_filter_fragment(FilterField::Title, "zo");
//! assert_eq!(state.display_sequence().len(), 1);
//! ```

use super::modes::{InputMode, ViewMode};
use crate::catalog::{Completion, DisplayCache, FetchController, FetchTicket, ViewState};
use crate::domain::{
    BookRecord, FetchFailure, FilterCriteria, FilterField, SortCriteria, SortField,
};
use crate::ui::helpers::{format_age, match_range, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardGrid, ColumnHeader, Content, DisplayItem, FooterInfo, HeaderInfo, SearchInputInfo,
    SearchPanelInfo, StatusKind, StatusMessage, TableView, UIViewModel,
};

/// Rows used by the blank line, header, and top border.
const TOP_CHROME_ROWS: usize = 3;
/// Rows used by the bottom border and footer.
const BOTTOM_CHROME_ROWS: usize = 2;
/// Rows used by the bordered search panel.
const SEARCH_PANEL_ROWS: usize = 3;
/// Rows used by one card: top border, title, author/year, bottom border.
pub const CARD_HEIGHT: usize = 4;
/// Card width including borders.
pub const CARD_WIDTH: usize = 30;
/// Blank columns between cards.
pub const CARD_GAP: usize = 1;
/// Width of the YEAR column.
const YEAR_COLUMN_WIDTH: usize = 6;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    fetch: FetchController,
    filter: FilterCriteria,
    sort: SortCriteria,
    cache: DisplayCache,

    /// Presentation widget for the display sequence.
    pub view_mode: ViewMode,

    /// Whether keys are commands or edit a filter fragment.
    pub input_mode: InputMode,

    /// Zero-based index into the display sequence. Clamped whenever the
    /// sequence changes.
    pub selected_index: usize,

    pub theme: Theme,
}

impl AppState {
    /// A fresh state: `Loading`, no filters, sorted by title ascending.
    #[must_use]
    pub fn new(theme: Theme, view_mode: ViewMode) -> Self {
        Self {
            fetch: FetchController::new(),
            filter: FilterCriteria::default(),
            sort: SortCriteria::default(),
            cache: DisplayCache::new(),
            view_mode,
            input_mode: InputMode::Normal,
            selected_index: 0,
            theme,
        }
    }

    #[must_use]
    pub const fn view_state(&self) -> &ViewState {
        self.fetch.state()
    }

    /// The filtered, sorted books to present. Empty unless `Ready`.
    #[must_use]
    pub fn display_sequence(&self) -> &[BookRecord] {
        self.cache.sequence()
    }

    #[must_use]
    pub const fn filter_criteria(&self) -> &FilterCriteria {
        &self.filter
    }

    #[must_use]
    pub const fn sort_criteria(&self) -> SortCriteria {
        self.sort
    }

    #[must_use]
    pub const fn refresh_key(&self) -> u64 {
        self.fetch.refresh_key()
    }

    /// Number of times the display sequence has been derived.
    #[must_use]
    pub const fn recompute_count(&self) -> u64 {
        self.cache.recompute_count()
    }

    /// (Re)issues the read for the current generation.
    pub fn load(&mut self) -> FetchTicket {
        let ticket = self.fetch.load();
        self.sync_display();
        ticket
    }

    /// Starts a new generation; any in-flight read becomes stale.
    pub fn refresh(&mut self) -> FetchTicket {
        let ticket = self.fetch.refresh();
        self.sync_display();
        ticket
    }

    /// Feeds the outcome of a read back into the fetch controller.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        outcome: std::result::Result<Vec<BookRecord>, FetchFailure>,
    ) -> Completion {
        let completion = self.fetch.complete(generation, outcome);
        if completion == Completion::Applied {
            self.sync_display();
        }
        completion
    }

    pub fn set_filter_fragment(&mut self, field: FilterField, value: impl Into<String>) {
        *self.filter.fragment_mut(field) = value.into();
        self.sync_display();
    }

    pub fn push_filter_char(&mut self, field: FilterField, c: char) {
        self.filter.fragment_mut(field).push(c);
        self.sync_display();
    }

    /// Removes the last character of a fragment. Returns `false` if it was
    /// already empty.
    pub fn pop_filter_char(&mut self, field: FilterField) -> bool {
        let popped = self.filter.fragment_mut(field).pop().is_some();
        if popped {
            self.sync_display();
        }
        popped
    }

    /// Applies the sort toggle rule for a request to sort by `field`.
    pub fn set_sort_criteria(&mut self, field: SortField) {
        self.sort = crate::catalog::toggle_sort(self.sort, field);
        tracing::debug!(sort = %self.sort, "sort criteria changed");
        self.sync_display();
    }

    /// Resets all three fragments.
    pub fn clear_filters(&mut self) {
        self.filter = FilterCriteria::default();
        self.sync_display();
    }

    /// Switches the presentation widget. Never re-derives.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Moves the selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.display_sequence().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.display_sequence().len();
        if len == 0 {
            return;
        }
        self.selected_index = self.selected_index.checked_sub(1).unwrap_or(len - 1);
    }

    /// Brings the memoized sequence in line with the current inputs.
    ///
    /// Derivation only runs from `Ready`; Loading and Error expose an empty
    /// sequence.
    fn sync_display(&mut self) {
        match self.fetch.state() {
            ViewState::Ready(records) => {
                self.cache.get_or_derive(
                    self.fetch.records_revision(),
                    records,
                    &self.filter,
                    self.sort,
                );
            }
            ViewState::Loading | ViewState::Error(_) => self.cache.clear(),
        }

        let len = self.cache.sequence().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// Loading, error, and zero matches each produce their own
    /// [`StatusMessage`]; only a non-empty `Ready` sequence produces a table
    /// or card grid.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            search_panel: self.compute_search_panel(),
            content: self.compute_content(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_content(&self, rows: usize, cols: usize) -> Content {
        match self.view_state() {
            ViewState::Loading => Content::Status(StatusMessage {
                kind: StatusKind::Loading,
                message: "Loading books...".to_string(),
                subtitle: "Press r to restart the request".to_string(),
            }),
            ViewState::Error(message) => Content::Status(StatusMessage {
                kind: StatusKind::Error,
                message: message.clone(),
                subtitle: "Press r to try again".to_string(),
            }),
            ViewState::Ready(_) if self.display_sequence().is_empty() => {
                let subtitle = if self.filter.is_empty() {
                    "The catalog is empty. Press r to refresh"
                } else {
                    "Press c to clear all filters"
                };
                Content::Status(StatusMessage {
                    kind: StatusKind::Empty,
                    message: "No books found matching your criteria".to_string(),
                    subtitle: subtitle.to_string(),
                })
            }
            ViewState::Ready(_) => match self.view_mode {
                ViewMode::Table => Content::Table(self.compute_table(rows, cols)),
                ViewMode::Cards => Content::Cards(self.compute_cards(rows, cols)),
            },
        }
    }

    fn compute_table(&self, rows: usize, cols: usize) -> TableView {
        let capacity = self.available_rows(rows).saturating_sub(1).max(1);
        let len = self.display_sequence().len();
        let (start, end) = visible_window(self.selected_index, len, capacity);

        let text_width = cols.saturating_sub(YEAR_COLUMN_WIDTH + 2);
        let title_width = (text_width * 11 / 20).max(8);
        let author_width = text_width.saturating_sub(title_width).max(8);

        let columns = [
            ("TITLE", SortField::Title, title_width),
            ("AUTHOR", SortField::Author, author_width),
            ("YEAR", SortField::PublishYear, YEAR_COLUMN_WIDTH),
        ]
        .into_iter()
        .map(|(label, field, width)| ColumnHeader {
            label,
            width,
            sort: (self.sort.field == field).then_some(self.sort.direction),
        })
        .collect();

        let rows = self.display_sequence()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, book)| {
                self.compute_display_item(book, start + offset, title_width - 1, author_width - 1)
            })
            .collect();

        TableView { columns, rows }
    }

    fn compute_cards(&self, rows: usize, cols: usize) -> CardGrid {
        let per_row = ((cols + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1);
        let card_rows = (self.available_rows(rows) / CARD_HEIGHT).max(1);
        let len = self.display_sequence().len();
        let total_card_rows = len.div_ceil(per_row);

        let (first_row, last_row) =
            visible_window(self.selected_index / per_row, total_card_rows, card_rows);
        let start = first_row * per_row;
        let end = (last_row * per_row).min(len);

        let inner = CARD_WIDTH - 4;
        let cards = self.display_sequence()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, book)| self.compute_display_item(book, start + offset, inner, inner))
            .collect();

        CardGrid { cards, per_row }
    }

    fn compute_display_item(
        &self,
        book: &BookRecord,
        absolute_idx: usize,
        title_width: usize,
        author_width: usize,
    ) -> DisplayItem {
        let year = book.year_text();
        DisplayItem {
            title: truncate(&book.title, title_width),
            author: truncate(&book.author, author_width),
            title_highlight: match_range(&book.title, &self.filter.title_fragment),
            author_highlight: match_range(&book.author, &self.filter.author_fragment),
            year_highlight: match_range(&year, &self.filter.year_fragment),
            year,
            is_selected: absolute_idx == self.selected_index,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = match self.view_state() {
            ViewState::Loading => "loading".to_string(),
            ViewState::Error(_) => "unavailable".to_string(),
            ViewState::Ready(_) => format!("{} books found", self.display_sequence().len()),
        };

        let mut summary = vec![status, self.sort.to_string(), self.view_mode.label().to_string()];
        let loaded_at = self.fetch.loaded_at();
        if let (ViewState::Ready(_), Some(loaded_at)) = (self.view_state(), loaded_at) {
            let age = chrono::Utc::now().timestamp() - loaded_at;
            summary.push(format!("updated {}", format_age(age)));
        }

        HeaderInfo {
            title: " Books Library ".to_string(),
            summary: summary.join("  ·  "),
        }
    }

    fn compute_search_panel(&self) -> Option<SearchPanelInfo> {
        let InputMode::Search(focused) = self.input_mode else {
            return None;
        };
        let inputs = FilterField::ALL
            .iter()
            .map(|&field| SearchInputInfo {
                placeholder: field.placeholder(),
                value: self.filter.fragment(field).to_string(),
                is_focused: field == focused,
            })
            .collect();
        Some(SearchPanelInfo { inputs })
    }

    fn compute_footer(&self) -> FooterInfo {
        let clear_hint = if self.filter.is_empty() { "" } else { "  c: clear filters" };

        let keybindings = match (self.input_mode, self.view_state()) {
            (InputMode::Search(_), _) => concat!(
                "Tab: next field  Enter/Esc: close search  ",
                "Ctrl+n/p: navigate  Ctrl+x: clear all"
            )
            .to_string(),
            (InputMode::Normal, ViewState::Loading) => "r: refresh  q: quit".to_string(),
            (InputMode::Normal, ViewState::Error(_)) => "r: try again  q: quit".to_string(),
            (InputMode::Normal, ViewState::Ready(_)) => format!(
                "j/k: navigate  /: search  1/2/3: sort title/author/year  \
                 Tab: table/cards  r: refresh{clear_hint}  q: quit"
            ),
        };

        FooterInfo { keybindings }
    }

    /// Rows left for the table or card grid after the surrounding chrome.
    const fn available_rows(&self, total_rows: usize) -> usize {
        let chrome = match self.input_mode {
            InputMode::Normal => TOP_CHROME_ROWS + BOTTOM_CHROME_ROWS,
            InputMode::Search(_) => TOP_CHROME_ROWS + SEARCH_PANEL_ROWS + BOTTOM_CHROME_ROWS,
        };
        total_rows.saturating_sub(chrome)
    }
}

/// `[start, end)` of a window of `capacity` items around `selected`.
///
/// The selection sits in the middle of the window where possible; near the
/// end the window is pulled back so it stays full.
fn visible_window(selected: usize, len: usize, capacity: usize) -> (usize, usize) {
    let mut start = selected.saturating_sub(capacity / 2);
    let end = (start + capacity).min(len);
    if end - start.min(end) < capacity && len >= capacity {
        start = end.saturating_sub(capacity);
    }
    (start.min(end), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_state(books: Vec<BookRecord>) -> AppState {
        let mut state = AppState::new(Theme::default(), ViewMode::Table);
        let ticket = state.load();
        state.complete_fetch(ticket.generation, Ok(books));
        state
    }

    fn sample() -> Vec<BookRecord> {
        vec![
            BookRecord::new("1", "Zoo", "A", 2001),
            BookRecord::new("2", "Apple", "B", 1999),
            BookRecord::new("3", "ZOOM", "C", 2019),
        ]
    }

    fn titles(state: &AppState) -> Vec<&str> {
        state.display_sequence().iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn loading_exposes_empty_sequence() {
        let state = AppState::new(Theme::default(), ViewMode::Table);
        assert_eq!(state.view_state(), &ViewState::Loading);
        assert!(state.display_sequence().is_empty());
        assert_eq!(state.recompute_count(), 0);
    }

    #[test]
    fn ready_state_derives_sorted_sequence() {
        let state = ready_state(sample());
        assert_eq!(titles(&state), ["Apple", "Zoo", "ZOOM"]);
    }

    #[test]
    fn view_mode_and_selection_do_not_rederive() {
        let mut state = ready_state(sample());
        let before = state.recompute_count();

        state.set_view_mode(ViewMode::Cards);
        state.set_view_mode(ViewMode::Table);
        state.move_selection_down();
        state.input_mode = InputMode::Search(FilterField::Author);
        let _ = state.compute_viewmodel(24, 80);

        assert_eq!(state.recompute_count(), before);
    }

    #[test]
    fn unchanged_fragment_does_not_rederive() {
        let mut state = ready_state(sample());
        state.set_filter_fragment(FilterField::Title, "zo");
        let after_first = state.recompute_count();

        state.set_filter_fragment(FilterField::Title, "zo");
        assert_eq!(state.recompute_count(), after_first);
    }

    #[test]
    fn clear_filters_matches_sorted_raw_records() {
        let mut state = ready_state(sample());
        state.set_filter_fragment(FilterField::Title, "zo");
        state.set_filter_fragment(FilterField::Year, "20");
        state.set_sort_criteria(SortField::Title);

        state.clear_filters();

        let expected = crate::catalog::sort(sample(), state.sort_criteria());
        assert_eq!(state.display_sequence(), expected.as_slice());
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = ready_state(sample());
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);

        state.selected_index = 2;
        state.set_filter_fragment(FilterField::Title, "apple");
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.display_sequence()[state.selected_index].id, "2");
    }

    #[test]
    fn sort_requests_follow_the_toggle_rule() {
        let mut state = ready_state(sample());
        let requests = [
            SortField::Title,
            SortField::Title,
            SortField::PublishYear,
            SortField::Author,
            SortField::Author,
        ];

        for field in requests {
            let expected = crate::catalog::toggle_sort(state.sort_criteria(), field);
            state.set_sort_criteria(field);
            assert_eq!(state.sort_criteria(), expected);
        }

        let expected = crate::catalog::sort(sample(), state.sort_criteria());
        assert_eq!(state.display_sequence(), expected.as_slice());
    }

    #[test]
    fn backspace_on_empty_fragment_is_a_no_op() {
        let mut state = ready_state(sample());
        assert!(!state.pop_filter_char(FilterField::Author));
        state.push_filter_char(FilterField::Author, 'b');
        assert!(state.pop_filter_char(FilterField::Author));
        assert!(state.filter_criteria().is_empty());
    }

    #[test]
    fn three_distinct_status_views() {
        let loading = AppState::new(Theme::default(), ViewMode::Table);
        let Content::Status(status) = loading.compute_viewmodel(24, 80).content else {
            panic!("expected status while loading");
        };
        assert_eq!(status.kind, StatusKind::Loading);

        let mut failed = AppState::new(Theme::default(), ViewMode::Table);
        let ticket = failed.load();
        failed.complete_fetch(ticket.generation, Err(FetchFailure::Unavailable("offline".into())));
        let Content::Status(status) = failed.compute_viewmodel(24, 80).content else {
            panic!("expected status after failure");
        };
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, crate::catalog::FETCH_FAILED_MESSAGE);
        assert_eq!(status.subtitle, "Press r to try again");

        let mut empty = ready_state(sample());
        empty.set_filter_fragment(FilterField::Author, "nobody");
        let Content::Status(status) = empty.compute_viewmodel(24, 80).content else {
            panic!("expected status for zero matches");
        };
        assert_eq!(status.kind, StatusKind::Empty);
        assert_eq!(status.subtitle, "Press c to clear all filters");
    }

    #[test]
    fn table_marks_active_sort_column() {
        let mut state = ready_state(sample());
        state.set_sort_criteria(SortField::PublishYear);

        let Content::Table(table) = state.compute_viewmodel(24, 80).content else {
            panic!("expected table");
        };
        let active: Vec<_> = table
            .columns
            .iter()
            .filter(|c| c.sort.is_some())
            .map(|c| c.label)
            .collect();
        assert_eq!(active, ["YEAR"]);
        let years: Vec<_> = table.rows.iter().map(|r| r.year.as_str()).collect();
        assert_eq!(years, ["1999", "2001", "2019"]);
    }

    #[test]
    fn cards_lay_out_per_row_by_width() {
        let mut state = ready_state(sample());
        state.set_view_mode(ViewMode::Cards);

        let Content::Cards(grid) = state.compute_viewmodel(24, 100).content else {
            panic!("expected cards");
        };
        assert_eq!(grid.per_row, 3);
        assert_eq!(grid.cards.len(), 3);
        assert!(grid.cards[0].is_selected);
    }

    #[test]
    fn header_counts_visible_books() {
        let mut state = ready_state(sample());
        state.set_filter_fragment(FilterField::Title, "zo");
        let header = state.compute_viewmodel(24, 80).header;
        assert!(header.summary.starts_with("2 books found  ·  Sort by title (asc)  ·  Table View"));
    }

    #[test]
    fn search_panel_only_in_search_mode() {
        let mut state = ready_state(sample());
        assert!(state.compute_viewmodel(24, 80).search_panel.is_none());

        state.input_mode = InputMode::Search(FilterField::Year);
        let panel = state.compute_viewmodel(24, 80).search_panel.unwrap();
        let focused: Vec<_> = panel
            .inputs
            .iter()
            .filter(|i| i.is_focused)
            .map(|i| i.placeholder)
            .collect();
        assert_eq!(focused, ["Search by Publish Year"]);
    }

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(0, 100, 10), (0, 10));
        assert_eq!(visible_window(50, 100, 10), (45, 55));
        assert_eq!(visible_window(99, 100, 10), (90, 100));
        assert_eq!(visible_window(2, 3, 10), (0, 3));
        assert_eq!(visible_window(0, 0, 10), (0, 0));
    }
}
