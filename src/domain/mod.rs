//! Domain layer for the Bookshelf plugin.
//!
//! Core value types shared by the catalog engine, the application layer and
//! the renderer. Nothing in here knows about Zellij.
//!
//! # Organization
//!
//! - [`book`]: the [`BookRecord`] value type
//! - [`criteria`]: filter and sort criteria with the sort toggle rule
//! - [`error`]: error types and result aliases
//!
//! # Examples
//!
//! ```
//! use bookshelf::domain::{BookRecord, SortCriteria, SortField};
//!
//! let book = BookRecord::new("b1", "Dune", "Frank Herbert", 1965);
//! let sort = SortCriteria::default().toggled(SortField::PublishYear);
//! assert_eq!(book.year_text(), "1965");
//! assert_eq!(sort.field, SortField::PublishYear);
//! ```

pub mod book;
pub mod criteria;
pub mod error;

pub use book::BookRecord;
pub use criteria::{FilterCriteria, FilterField, SortCriteria, SortDirection, SortField};
pub use error::{BookshelfError, FetchFailure, Result};
