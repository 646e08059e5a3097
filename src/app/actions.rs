//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) only mutates [`AppState`](crate::app::AppState);
//! anything that talks to Zellij is returned as an [`Action`] for the plugin
//! shim to execute.

use crate::catalog::FetchTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues the catalog read described by the ticket.
    ///
    /// The shim sends a GET to the configured endpoint and passes
    /// [`FetchTicket::to_context`] as the request context, so the result can
    /// be matched to its generation.
    FetchBooks(FetchTicket),
}
