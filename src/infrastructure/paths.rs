//! Sandbox path handling.

use std::path::PathBuf;

/// Directory for the plugin's own files (trace output).
///
/// Resolves to `/host/.local/share/zellij/bookshelf`, which is
/// `~/.local/share/zellij/bookshelf` when Zellij was started from the home
/// directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookshelf")
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use bookshelf::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
