//! Terminal UI: view models, theming, and ANSI component renderers.
//!
//! ```text
//! AppState -> compute_viewmodel -> UIViewModel -> render -> ANSI output
//! ```
//!
//! - [`viewmodel`]: display-ready types
//! - [`renderer`]: entry point
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor positioning, highlighting, truncation
//! - [`theme`]: color schemes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    Content, DisplayItem, FooterInfo, HeaderInfo, StatusKind, StatusMessage, UIViewModel,
};
