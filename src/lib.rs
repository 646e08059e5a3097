//! Bookshelf: a Zellij plugin for browsing a remote book catalog.
//!
//! Bookshelf reads the catalog from a "list books" HTTP endpoint once per
//! refresh and lets the user:
//! - filter by title, publish year, and author (case-insensitive substring)
//! - sort by title, author, or publish year, toggling direction
//! - switch between a table and a card grid
//! - recover from failed loads with a retry
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← web_request, keys
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                              │
//! ┌────────────────────────┐   ┌────────────────────────┐
//! │ Catalog (catalog/)     │   │ UI Layer (ui/)         │
//! │ - Fetch controller     │   │ - Table and cards      │
//! │ - Derivation engine    │   │ - Theming              │
//! │ - Payload decoding     │   │ - Search panel         │
//! └────────────────────────┘   └────────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - BookRecord, criteria, errors (domain/)           │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything except `main.rs` runs on the host, so the whole engine is
//! covered by ordinary `cargo test`.
//!
//! # Configuration
//!
//! ```kdl
//! bookshelf {
//!     endpoint "http://localhost:5000/books"
//!     view "cards"
//!     theme "catppuccin-latte"
//!     trace_level "debug"
//! }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, ViewMode};
pub use domain::{BookRecord, BookshelfError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::Path;

/// Catalog endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/books";

/// Plugin configuration parsed from the Zellij layout or config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL of the "list books" endpoint. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Initial presentation. Default: table.
    pub view_mode: ViewMode,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme, with `~` already mapped to `/host`.
    pub theme_file: Option<String>,

    /// `trace`, `debug`, `info`, `warn`, or `error`. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            view_mode: ViewMode::default(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown or unparsable values fall back to their defaults with a
    /// warning; a bad `view` never prevents the plugin from loading.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookshelf::{Config, ViewMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "http://books.local/books".to_string());
    /// map.insert("view".to_string(), "cards".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoint, "http://books.local/books");
    /// assert_eq!(config.view_mode, ViewMode::Cards);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let endpoint = config
            .get("endpoint")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_ENDPOINT.to_string(), String::from);

        let view_mode = config
            .get("view")
            .map(|s| {
                s.parse::<ViewMode>().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "ignoring view setting");
                    ViewMode::default()
                })
            })
            .unwrap_or_default();

        Self {
            endpoint,
            view_mode,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").map(|p| infrastructure::expand_tilde(p)),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Builds the initial application state: `Loading`, no filters, title
/// ascending, theme and view mode from `config`.
///
/// The first read is issued once web access is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing bookshelf plugin");

    let theme = Theme::resolve(
        config.theme_file.as_deref().map(Path::new),
        config.theme_name.as_deref(),
    );

    AppState::new(theme, config.view_mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", " http://books.local/api/books "),
            ("view", "table"),
            ("theme", "catppuccin-frappe"),
            ("theme_file", "~/.config/bookshelf/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.endpoint, "http://books.local/api/books");
        assert_eq!(config.view_mode, ViewMode::Table);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-frappe"));
        assert_eq!(
            config.theme_file.as_deref(),
            Some("/host/.config/bookshelf/theme.toml")
        );
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&map(&[("endpoint", "  "), ("view", "grid")]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.view_mode, ViewMode::Table);
    }

    #[test]
    fn initialize_starts_loading_in_configured_view() {
        let config = Config {
            view_mode: ViewMode::Cards,
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.view_state(), &catalog::ViewState::Loading);
        assert_eq!(state.view_mode, ViewMode::Cards);
        assert_eq!(state.theme.name, "catppuccin-latte");
    }
}
