//! Zellij plugin wrapper and entry point.
//!
//! The only module that calls into `zellij_tile`. It maps Zellij events to
//! [`bookshelf::Event`]s, runs them through [`handle_event`], and carries out
//! the returned [`Action`]s: hiding the pane and issuing catalog reads with
//! `web_request`.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookshelf::catalog::{response_outcome, FetchTicket};
use bookshelf::domain::SortField;
use bookshelf::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

struct State {
    app: bookshelf::AppState,

    endpoint: String,

    /// Set once the user has granted `WebAccess`.
    web_access: bool,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: bookshelf::initialize(&default_config),
            endpoint: default_config.endpoint,
            web_access: false,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        if let Err(e) = bookshelf::observability::init_tracing(&config) {
            eprintln!("bookshelf: tracing disabled: {e}");
        }

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            endpoint = %config.endpoint,
            view = ?config.view_mode,
            "parsed configuration"
        );
        self.app = bookshelf::initialize(&config);
        self.endpoint.clone_from(&config.endpoint);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                self.web_access = matches!(status, PermissionStatus::Granted);
                Event::PermissionsResult { granted: self.web_access }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookshelf::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('x') => Some(Event::ClearFilters),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Search(_) => Self::map_search_key(key.bare_key),
            InputMode::Normal => Self::map_normal_key(key.bare_key),
        }
    }

    fn map_normal_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('/') => Event::OpenSearch,
            BareKey::Char('1') => Event::SortBy(SortField::Title),
            BareKey::Char('2') => Event::SortBy(SortField::Author),
            BareKey::Char('3') => Event::SortBy(SortField::PublishYear),
            BareKey::Char('t') => Event::ShowTable,
            BareKey::Char('v') => Event::ShowCards,
            BareKey::Tab => Event::ToggleView,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('c') => Event::ClearFilters,
            _ => return None,
        })
    }

    fn map_search_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Enter | BareKey::Esc => Event::CloseSearch,
            BareKey::Tab => Event::NextSearchField,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Turns a finished web request into a `FetchCompleted` event.
    ///
    /// Requests without a generation in their context were not issued by
    /// this plugin and are ignored.
    fn map_web_request_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(ticket) = FetchTicket::from_context(context) else {
            tracing::debug!(status, "ignoring web request result without a fetch ticket");
            return None;
        };

        tracing::debug!(
            status,
            generation = ticket.generation,
            body_len = body.len(),
            "catalog response"
        );
        Some(Event::FetchCompleted {
            ticket,
            outcome: response_outcome(status, body),
        })
    }

    fn execute_action(&self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchBooks(ticket) => {
                if !self.web_access {
                    tracing::debug!(
                        generation = ticket.generation,
                        "web access missing, asking again"
                    );
                    request_permission(&[PermissionType::WebAccess]);
                    return;
                }

                tracing::debug!(
                    endpoint = %self.endpoint,
                    generation = ticket.generation,
                    "issuing catalog read"
                );
                let mut headers = BTreeMap::new();
                headers.insert("Accept".to_string(), "application/json".to_string());
                web_request(
                    &self.endpoint,
                    HttpVerb::Get,
                    headers,
                    vec![],
                    ticket.to_context(),
                );
            }
        }
    }
}
