//! Event handling and state transition logic.
//!
//! The shim in `main.rs` translates Zellij key presses, permission results,
//! and web request results into [`Event`]s. [`handle_event`] applies each one
//! to [`AppState`] and returns whether a re-render is needed plus any
//! [`Action`]s the shim must carry out.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `CloseFocus`
//! - **Search panel**: `OpenSearch`, `CloseSearch`, `NextSearchField`, `Char`,
//!   `Backspace`, `ClearFilters`
//! - **Ordering and presentation**: `SortBy`, `ToggleView`, `ShowTable`, `ShowCards`
//! - **Fetch lifecycle**: `Refresh`, `PermissionsResult`, `FetchCompleted`
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{handle_event, Action, AppState, Event, ViewMode};
//! use bookshelf::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), ViewMode::Table);
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(matches!(actions.as_slice(), [Action::FetchBooks(_)]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::{InputMode, ViewMode};
use crate::app::{Action, AppState};
use crate::catalog::{Completion, FetchTicket, ViewState};
use crate::domain::{BookRecord, FetchFailure, FilterField, Result, SortField};
use crate::observability::TraceContext;

/// Events triggered by user input or by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down by one (wraps to top).
    KeyDown,
    /// Moves the selection up by one (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Opens the search panel focused on the title input. Existing filters
    /// are kept.
    OpenSearch,
    /// Closes the search panel. Filters stay applied.
    CloseSearch,
    /// Moves focus to the next search input (Title, Year, Author, Title...).
    NextSearchField,
    /// Appends a character to the focused filter fragment.
    Char(char),
    /// Removes the last character of the focused filter fragment.
    Backspace,
    /// Resets all three filter fragments.
    ClearFilters,

    /// Requests sorting by a field, toggling direction if already active.
    SortBy(SortField),
    /// Switches between table and card presentation.
    ToggleView,
    ShowTable,
    ShowCards,

    /// Starts a new fetch generation. Also serves as "retry" from Error.
    Refresh,

    /// Result of the web access permission request.
    PermissionsResult {
        granted: bool,
    },

    /// A catalog read finished.
    ///
    /// `ticket` is decoded from the request context; `outcome` is the
    /// decoded payload or the reason the read failed.
    FetchCompleted {
        ticket: FetchTicket,
        outcome: std::result::Result<Vec<BookRecord>, FetchFailure>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag is `true` when something visible changed.
///
/// # Errors
///
/// Currently never returns an error; failures inside a handler are
/// reflected in state (for example `ViewState::Error`).
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    if let Event::FetchCompleted { ticket, outcome } = event {
        return Ok(apply_fetch_result(state, ticket, outcome.clone()));
    }

    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((!state.display_sequence().is_empty(), vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((!state.display_sequence().is_empty(), vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::OpenSearch => {
            if matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            tracing::debug!("opening search panel");
            state.input_mode = InputMode::Search(FilterField::Title);
            Ok((true, vec![]))
        }
        Event::CloseSearch => {
            if state.input_mode == InputMode::Normal {
                return Ok((false, vec![]));
            }
            tracing::debug!(filter = ?state.filter_criteria(), "closing search panel");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::NextSearchField => {
            let InputMode::Search(field) = state.input_mode else {
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::Search(field.next());
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            let InputMode::Search(field) = state.input_mode else {
                return Ok((false, vec![]));
            };
            state.push_filter_char(field, *c);
            tracing::trace!(
                field = ?field,
                fragment = %state.filter_criteria().fragment(field),
                "filter fragment updated"
            );
            Ok((true, vec![]))
        }
        Event::Backspace => {
            let InputMode::Search(field) = state.input_mode else {
                return Ok((false, vec![]));
            };
            Ok((state.pop_filter_char(field), vec![]))
        }
        Event::ClearFilters => {
            if state.filter_criteria().is_empty() {
                return Ok((false, vec![]));
            }
            tracing::debug!("clearing filters");
            state.clear_filters();
            Ok((true, vec![]))
        }
        Event::SortBy(field) => {
            state.set_sort_criteria(*field);
            Ok((true, vec![]))
        }
        Event::ToggleView => {
            state.set_view_mode(state.view_mode.toggled());
            Ok((true, vec![]))
        }
        Event::ShowTable => switch_view(state, ViewMode::Table),
        Event::ShowCards => switch_view(state, ViewMode::Cards),
        Event::Refresh => {
            let ticket = state.refresh();
            tracing::info!(generation = ticket.generation, "catalog refresh requested");
            Ok((true, vec![Action::FetchBooks(ticket)]))
        }
        Event::PermissionsResult { granted: true } => {
            if *state.view_state() != ViewState::Loading {
                return Ok((false, vec![]));
            }
            let ticket = state.load();
            tracing::debug!(generation = ticket.generation, "web access granted, fetching catalog");
            Ok((true, vec![Action::FetchBooks(ticket)]))
        }
        Event::PermissionsResult { granted: false } => {
            tracing::warn!("web access permission denied");
            let generation = state.refresh_key();
            let completion = state.complete_fetch(
                generation,
                Err(FetchFailure::Unavailable("web access permission denied".to_string())),
            );
            Ok((completion == Completion::Applied, vec![]))
        }
        Event::FetchCompleted { .. } => Ok((false, vec![])),
    }
}

fn switch_view(state: &mut AppState, view_mode: ViewMode) -> Result<(bool, Vec<Action>)> {
    if state.view_mode == view_mode {
        return Ok((false, vec![]));
    }
    state.set_view_mode(view_mode);
    Ok((true, vec![]))
}

/// Applies a catalog read outcome inside a span parented to the span that
/// issued the read, not to whichever span delivered the response.
fn apply_fetch_result(
    state: &mut AppState,
    ticket: &FetchTicket,
    outcome: std::result::Result<Vec<BookRecord>, FetchFailure>,
) -> (bool, Vec<Action>) {
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    let span = tracing::debug_span!(
        "apply_fetch_result",
        generation = ticket.generation,
        current = state.refresh_key(),
    );
    if let Some(parent) = ticket.trace_context.as_ref().and_then(TraceContext::remote_parent) {
        span.set_parent(parent);
    }
    let _span = span.entered();

    match state.complete_fetch(ticket.generation, outcome) {
        Completion::Applied => {
            tracing::info!(
                state = state.view_state().tag(),
                visible = state.display_sequence().len(),
                "catalog read applied"
            );
            (true, vec![])
        }
        Completion::Stale => {
            tracing::debug!("dropping stale catalog read");
            (false, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Theme;

    fn started() -> (AppState, FetchTicket) {
        let mut state = AppState::new(Theme::default(), ViewMode::Table);
        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        let [Action::FetchBooks(ticket)] = actions.as_slice() else {
            panic!("expected a fetch action, got {actions:?}");
        };
        (state, ticket.clone())
    }

    fn books() -> Vec<BookRecord> {
        vec![
            BookRecord::new("1", "Zoo", "A", 2001),
            BookRecord::new("2", "Apple", "B", 1999),
        ]
    }

    #[test]
    fn permission_grant_starts_first_read() {
        let (state, ticket) = started();
        assert_eq!(ticket.generation, 0);
        assert_eq!(state.view_state(), &ViewState::Loading);
    }

    #[test]
    fn permission_denied_shows_error() {
        let mut state = AppState::new(Theme::default(), ViewMode::Table);
        let (render, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(matches!(state.view_state(), ViewState::Error(_)));
    }

    #[test]
    fn stale_result_is_not_rendered() {
        let (mut state, first) = started();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let [Action::FetchBooks(second)] = actions.as_slice() else {
            panic!("expected a fetch action");
        };
        let second = second.clone();

        let (render, _) = handle_event(
            &mut state,
            &Event::FetchCompleted { ticket: second, outcome: Ok(books()) },
        )
        .unwrap();
        assert!(render);

        let (render, _) = handle_event(
            &mut state,
            &Event::FetchCompleted { ticket: first, outcome: Ok(vec![]) },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.display_sequence().len(), 2);
    }

    #[test]
    fn typing_only_edits_in_search_mode() {
        let (mut state, ticket) = started();
        handle_event(&mut state, &Event::FetchCompleted { ticket, outcome: Ok(books()) }).unwrap();

        let (render, _) = handle_event(&mut state, &Event::Char('z')).unwrap();
        assert!(!render);
        assert!(state.filter_criteria().is_empty());

        handle_event(&mut state, &Event::OpenSearch).unwrap();
        handle_event(&mut state, &Event::NextSearchField).unwrap();
        handle_event(&mut state, &Event::NextSearchField).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        assert_eq!(state.filter_criteria().author_fragment, "b");
        assert_eq!(state.display_sequence().len(), 1);

        handle_event(&mut state, &Event::CloseSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filter_criteria().author_fragment, "b");
    }

    #[test]
    fn sort_by_same_field_twice_flips_direction() {
        let (mut state, ticket) = started();
        handle_event(&mut state, &Event::FetchCompleted { ticket, outcome: Ok(books()) }).unwrap();

        handle_event(&mut state, &Event::SortBy(SortField::Title)).unwrap();
        let titles: Vec<_> = state.display_sequence().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Zoo", "Apple"]);
    }

    #[test]
    fn view_switch_skips_rederive() {
        let (mut state, ticket) = started();
        handle_event(&mut state, &Event::FetchCompleted { ticket, outcome: Ok(books()) }).unwrap();
        let before = state.recompute_count();

        handle_event(&mut state, &Event::ToggleView).unwrap();
        let (render, _) = handle_event(&mut state, &Event::ShowCards).unwrap();
        assert!(!render);
        handle_event(&mut state, &Event::ShowTable).unwrap();

        assert_eq!(state.recompute_count(), before);
    }

    /// Reads every exported span from an OTLP JSON trace file.
    fn exported_spans(path: &std::path::Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .flat_map(|batch| {
                batch["resourceSpans"][0]["scopeSpans"][0]["spans"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }

    #[test]
    fn fetch_result_span_is_parented_to_the_issuing_span() {
        use opentelemetry::trace::TracerProvider as _;
        use opentelemetry_sdk::resource::Resource;
        use tracing_opentelemetry::OpenTelemetryLayer;
        use tracing_subscriber::layer::SubscriberExt;

        let dir = tempfile::tempdir().unwrap();
        let trace_file = dir.path().join("spans.json");
        let provider = crate::observability::create_tracer_provider(
            trace_file.clone(),
            Resource::empty(),
        );
        let subscriber = tracing_subscriber::registry()
            .with(OpenTelemetryLayer::new(provider.tracer("bookshelf-test")));

        let ticket = tracing::subscriber::with_default(subscriber, || {
            let mut state = AppState::new(Theme::default(), ViewMode::Table);

            let issued = tracing::debug_span!("plugin_update_event").in_scope(|| {
                let (_, actions) =
                    handle_event(&mut state, &Event::PermissionsResult { granted: true })
                        .unwrap();
                let [Action::FetchBooks(ticket)] = actions.as_slice() else {
                    panic!("expected a fetch action, got {actions:?}");
                };
                ticket.clone()
            });

            let delivered = FetchTicket::from_context(&issued.to_context()).unwrap();
            tracing::debug_span!("plugin_update_event").in_scope(|| {
                let event = Event::FetchCompleted { ticket: delivered, outcome: Ok(books()) };
                handle_event(&mut state, &event).unwrap();
            });
            issued
        });

        let trace = ticket.trace_context.expect("ticket should carry the issuing span");
        let spans = exported_spans(&trace_file);
        let applied = spans
            .iter()
            .find(|span| span["name"] == "apply_fetch_result")
            .expect("apply_fetch_result span was exported");

        assert_eq!(applied["parentSpanId"], trace.parent_span_id.as_str());
        assert_eq!(applied["traceId"], trace.trace_id.as_str());
    }
}
