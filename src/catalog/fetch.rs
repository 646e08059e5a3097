//! Fetch controller: the lifecycle of the remote catalog read.
//!
//! The controller never performs I/O. It hands out [`FetchTicket`]s describing
//! which read to issue and accepts outcomes tagged with the ticket's
//! generation. Only the outcome of the most recently started read is applied
//! ("last started wins"); anything older is dropped on arrival.
//!
//! # State Machine
//!
//! ```text
//! [new]   -> Loading
//! Loading --(success)---> Ready(records)
//! Loading --(failure)---> Error(message)
//! Ready   --(refresh)---> Loading
//! Error   --(refresh)---> Loading
//! ```

use crate::domain::{BookRecord, FetchFailure};
use crate::observability::TraceContext;
use std::collections::BTreeMap;

/// The only text a failed load ever shows to the user.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch books. Please try again later.";

/// Request context key carrying the generation of a catalog read.
const GENERATION_KEY: &str = "bookshelf_generation";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// What the presentation layer is allowed to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready(Vec<BookRecord>),
}

impl ViewState {
    /// Short tag used in logs.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Ready(_) => "ready",
        }
    }
}

/// A read the controller wants issued.
///
/// Carries the generation the read belongs to and, when tracing is active,
/// the span that started it. Round-trips through the web request's context
/// map so the response can be matched back up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub trace_context: Option<TraceContext>,
}

impl FetchTicket {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the ticket as a web request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(GENERATION_KEY.to_string(), self.generation.to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            context.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        context
    }

    /// Recovers a ticket from a web request result's context map.
    ///
    /// Returns `None` for responses that were not issued by this controller.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let generation = context.get(GENERATION_KEY)?.parse().ok()?;
        let trace_context = match (context.get(TRACE_ID_KEY), context.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };
        Some(Self {
            generation,
            trace_context,
        })
    }
}

/// Result of handing an outcome to [`FetchController::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome belonged to the latest read and changed the view state.
    Applied,
    /// The outcome was for an outdated generation, or the read had already
    /// resolved, and was dropped.
    Stale,
}

/// Owns the view state and the refresh generation counter.
#[derive(Debug, Clone)]
pub struct FetchController {
    state: ViewState,
    /// Bumped by every `refresh()`; the generation of the latest read.
    refresh_key: u64,
    /// Bumped every time a new record set is stored.
    records_revision: u64,
    /// Unix timestamp of the last successful load.
    loaded_at: Option<i64>,
}

impl Default for FetchController {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchController {
    /// A controller in the `Loading` state at generation 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ViewState::Loading,
            refresh_key: 0,
            records_revision: 0,
            loaded_at: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn refresh_key(&self) -> u64 {
        self.refresh_key
    }

    #[must_use]
    pub const fn records_revision(&self) -> u64 {
        self.records_revision
    }

    #[must_use]
    pub const fn loaded_at(&self) -> Option<i64> {
        self.loaded_at
    }

    /// Raw records, or an empty slice unless the state is `Ready`.
    #[must_use]
    pub fn records(&self) -> &[BookRecord] {
        match &self.state {
            ViewState::Ready(records) => records,
            ViewState::Loading | ViewState::Error(_) => &[],
        }
    }

    /// Enters `Loading` and returns the ticket for the current generation.
    pub fn load(&mut self) -> FetchTicket {
        self.state = ViewState::Loading;
        tracing::debug!(generation = self.refresh_key, "catalog load started");
        FetchTicket::new(self.refresh_key)
    }

    /// Starts a new generation and loads it.
    ///
    /// Any read still in flight becomes stale.
    pub fn refresh(&mut self) -> FetchTicket {
        self.refresh_key += 1;
        tracing::debug!(refresh_key = self.refresh_key, "catalog refresh requested");
        self.load()
    }

    /// Applies the outcome of the read tagged with `generation`.
    ///
    /// Failures are reduced to [`FETCH_FAILED_MESSAGE`]; the full failure is
    /// logged.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: std::result::Result<Vec<BookRecord>, FetchFailure>,
    ) -> Completion {
        if generation != self.refresh_key {
            tracing::debug!(
                generation,
                latest = self.refresh_key,
                "dropping response for outdated generation"
            );
            return Completion::Stale;
        }
        if self.state != ViewState::Loading {
            tracing::debug!(generation, state = self.state.tag(), "read already resolved");
            return Completion::Stale;
        }

        match outcome {
            Ok(records) => {
                tracing::debug!(generation, record_count = records.len(), "catalog loaded");
                self.records_revision += 1;
                self.loaded_at = Some(chrono::Utc::now().timestamp());
                self.state = ViewState::Ready(records);
            }
            Err(failure) => {
                tracing::error!(
                    generation,
                    error = %failure,
                    diagnostic = ?failure,
                    "error fetching books"
                );
                self.state = ViewState::Error(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        Completion::Applied
    }
}
