//! Filter and sort criteria.
//!
//! [`FilterCriteria`] holds the three text fragments typed into the search
//! panel. [`SortCriteria`] holds the single active sort field and direction.
//! Both are plain values: the application state owns one of each and hands
//! them to the derivation engine by reference.

use std::fmt;

/// Field addressed by one of the three search inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Title,
    Year,
    Author,
}

impl FilterField {
    /// Search inputs in panel order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Year, Self::Author];

    /// Next input when cycling focus with `Tab`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Year,
            Self::Year => Self::Author,
            Self::Author => Self::Title,
        }
    }

    /// Placeholder shown in an empty search input.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Title => "Search by Title",
            Self::Year => "Search by Publish Year",
            Self::Author => "Search by Author",
        }
    }
}

/// Text fragments the catalog is filtered by.
///
/// An empty fragment is the identity filter for its field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub title_fragment: String,
    pub year_fragment: String,
    pub author_fragment: String,
}

impl FilterCriteria {
    /// Returns the fragment for `field`.
    #[must_use]
    pub fn fragment(&self, field: FilterField) -> &str {
        match field {
            FilterField::Title => &self.title_fragment,
            FilterField::Year => &self.year_fragment,
            FilterField::Author => &self.author_fragment,
        }
    }

    /// Mutable access to the fragment for `field`.
    pub fn fragment_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Title => &mut self.title_fragment,
            FilterField::Year => &mut self.year_fragment,
            FilterField::Author => &mut self.author_fragment,
        }
    }

    /// Whether every fragment is empty, i.e. the criteria filter nothing out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|&f| self.fragment(f).is_empty())
    }
}

/// Field the display sequence is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Author,
    PublishYear,
}

impl SortField {
    /// Column label as shown in headers and the sort indicator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::PublishYear => "publishYear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Arrow glyph marking the active column in the table header.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// The single active sort: one field, one direction, no tie-break key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortCriteria {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortCriteria {
    fn default() -> Self {
        Self {
            field: SortField::Title,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortCriteria {
    /// Applies a sort request to the current criteria.
    ///
    /// Requesting the active field flips its direction; requesting another
    /// field switches to it in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::{SortCriteria, SortDirection, SortField};
    ///
    /// let asc = SortCriteria::default();
    /// assert_eq!(asc.toggled(SortField::Title).direction, SortDirection::Descending);
    /// assert_eq!(asc.toggled(SortField::Author).field, SortField::Author);
    /// ```
    #[must_use]
    pub fn toggled(self, requested: SortField) -> Self {
        if self.field == requested {
            Self {
                field: self.field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field: requested,
                direction: SortDirection::Ascending,
            }
        }
    }
}

impl fmt::Display for SortCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sort by {} ({})", self.field.label(), self.direction.short_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_are_addressed_by_field() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.is_empty());

        criteria.fragment_mut(FilterField::Year).push_str("19");
        assert_eq!(criteria.fragment(FilterField::Year), "19");
        assert_eq!(criteria.year_fragment, "19");
        assert!(!criteria.is_empty());
    }

    #[test]
    fn focus_cycles_through_all_inputs() {
        assert_eq!(FilterField::Title.next(), FilterField::Year);
        assert_eq!(FilterField::Year.next(), FilterField::Author);
        assert_eq!(FilterField::Author.next(), FilterField::Title);
    }

    #[test]
    fn toggling_descending_field_goes_back_to_ascending() {
        let desc = SortCriteria {
            field: SortField::PublishYear,
            direction: SortDirection::Descending,
        };
        assert_eq!(
            desc.toggled(SortField::PublishYear),
            SortCriteria {
                field: SortField::PublishYear,
                direction: SortDirection::Ascending,
            }
        );
    }

    #[test]
    fn switching_field_resets_direction() {
        let desc = SortCriteria {
            field: SortField::Title,
            direction: SortDirection::Descending,
        };
        assert_eq!(desc.toggled(SortField::Author).direction, SortDirection::Ascending);
    }

    #[test]
    fn display_matches_sort_button_label() {
        let criteria = SortCriteria::default().toggled(SortField::Title);
        assert_eq!(criteria.to_string(), "Sort by title (desc)");
    }
}
