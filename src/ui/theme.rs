//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are the four Catppuccin flavors, compiled in from
//! `themes/*.toml`. Custom themes use the same TOML shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#45475a"
//! search_focus_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! status_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! sort_indicator_fg = "#fab387"
//! card_border = "#b4befe"
//! ```

use crate::domain::{BookshelfError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, subtitles, header summary.
    pub text_dim: String,

    pub border: String,

    /// Border of unfocused search inputs.
    pub search_bar_border: String,
    /// Border of the focused search input.
    pub search_focus_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Loading and no-results messages.
    pub status_fg: String,
    pub error_fg: String,

    /// Arrow next to the active sort column.
    pub sort_indicator_fg: String,
    pub card_border: String,
}

impl Theme {
    /// Loads a built-in theme by name. `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| BookshelfError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| BookshelfError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Picks the theme for a configuration: a theme file wins over a theme
    /// name, and anything that fails to load falls back to the default.
    #[must_use]
    pub fn resolve(theme_file: Option<&Path>, theme_name: Option<&str>) -> Self {
        if let Some(path) = theme_file {
            match Self::from_file(path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(error = %e, "falling back from custom theme"),
            }
        }

        if let Some(name) = theme_name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(theme = name, "unknown theme name, using {DEFAULT_THEME}");
        }

        Self::default()
    }

    /// `(255, 255, 255)` for anything that isn't six hex digits.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn all_builtin_themes_parse() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::fg("#1e1e2e"), "\u{1b}[38;2;30;30;46m");
        assert_eq!(Theme::bg("f5c2e7"), "\u{1b}[48;2;245;194;231m");
        assert_eq!(Theme::fg("#zz"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn loads_custom_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn resolve_falls_back_on_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = ").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, BookshelfError::Theme(_)));

        let theme = Theme::resolve(Some(file.path()), Some("catppuccin-latte"));
        assert_eq!(theme.name, "catppuccin-latte");
        assert_eq!(Theme::resolve(None, Some("nope")).name, DEFAULT_THEME);
    }
}
