//! The list state engine.
//!
//! Two strictly layered components turn a remote catalog into the exact
//! sequence of books on screen:
//!
//! ```text
//!  web request ──▶ payload ──▶ FetchController ──▶ raw records
//!                                   │ (ViewState, generation)
//!                                   ▼
//!        FilterCriteria ──▶ derive::DisplayCache ◀── SortCriteria
//!                                   │
//!                                   ▼
//!                           display sequence
//! ```
//!
//! - [`fetch`]: owns the read lifecycle (Loading / Error / Ready) and tags
//!   every read with the generation it belongs to, so a slow stale response
//!   can never overwrite a newer one.
//! - [`derive`]: pure filter/sort functions and a memo keyed on
//!   (records revision, filter, sort).
//! - [`payload`]: decodes a response into book records.
//!
//! Everything here is synchronous and Zellij-agnostic; the plugin shim issues
//! the actual HTTP request and feeds the result back in.

pub mod derive;
pub mod fetch;
pub mod payload;

pub use derive::{filter, sort, toggle_sort, DisplayCache};
pub use fetch::{Completion, FetchController, FetchTicket, ViewState, FETCH_FAILED_MESSAGE};
pub use payload::{decode_books, response_outcome};
