//! Input and presentation mode types.
//!
//! - [`InputMode`] decides how keys are interpreted: commands in `Normal`,
//!   text entry into one filter fragment in `Search`.
//! - [`ViewMode`] picks the presentation widget (table or cards). It never
//!   affects which books are shown or their order.

use crate::domain::{BookshelfError, FilterField};
use std::str::FromStr;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command keys.
    Normal,

    /// The search panel is open; typed characters edit the focused fragment.
    Search(FilterField),
}

/// Presentation widget for the display sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One row per book with TITLE / AUTHOR / YEAR columns.
    #[default]
    Table,

    /// A grid of small cards.
    Cards,
}

impl ViewMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Table => Self::Cards,
            Self::Cards => Self::Table,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Table => "Table View",
            Self::Cards => "Card View",
        }
    }
}

impl FromStr for ViewMode {
    type Err = BookshelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "card" | "cards" => Ok(Self::Cards),
            other => Err(BookshelfError::Config(format!(
                "unknown view `{other}`, expected `table` or `cards`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_names() {
        assert_eq!("table".parse::<ViewMode>().unwrap(), ViewMode::Table);
        assert_eq!(" Cards ".parse::<ViewMode>().unwrap(), ViewMode::Cards);
        assert_eq!("card".parse::<ViewMode>().unwrap(), ViewMode::Cards);
    }

    #[test]
    fn rejects_unknown_view() {
        let err = "grid".parse::<ViewMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown view `grid`, expected `table` or `cards`"
        );
    }

    #[test]
    fn toggle_alternates() {
        assert_eq!(ViewMode::Table.toggled(), ViewMode::Cards);
        assert_eq!(ViewMode::Cards.toggled(), ViewMode::Table);
    }
}
