//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the catalog/domain layers.
//!
//! ```text
//! Zellij event -> Event -> handle_event -> AppState mutation -> Actions -> shim
//!                    ^                                                     |
//!                    +-------------- WebRequestResult ---------------------+
//! ```
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`handler`]: event processing
//! - [`modes`]: input and view mode types
//! - [`state`]: application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ViewMode};
pub use state::AppState;
