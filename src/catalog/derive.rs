//! Derivation engine: raw records + criteria → display sequence.
//!
//! [`filter`], [`sort`] and [`toggle_sort`] are pure. [`DisplayCache`]
//! memoizes their composition on the three true inputs so that unrelated
//! state changes (view mode, selection, search focus) never re-derive.

use crate::domain::{BookRecord, FilterCriteria, SortCriteria, SortDirection, SortField};
use std::cmp::Reverse;

/// Keeps the records matching every non-empty fragment, in input order.
///
/// - title: case-insensitive substring
/// - year: substring of the decimal year text (`"19"` matches 1987 and 2019)
/// - author: case-insensitive substring
///
/// # Examples
///
/// ```
/// use bookshelf::catalog::filter;
/// use bookshelf::domain::{BookRecord, FilterCriteria};
///
/// let books = vec![
///     BookRecord::new("1", "Zoo", "A", 2001),
///     BookRecord::new("2", "Apple", "B", 1999),
/// ];
/// let criteria = FilterCriteria { title_fragment: "zo".into(), ..Default::default() };
/// assert_eq!(filter(&books, &criteria), vec![books[0].clone()]);
/// ```
#[must_use]
pub fn filter(records: &[BookRecord], criteria: &FilterCriteria) -> Vec<BookRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }

    let title = criteria.title_fragment.to_lowercase();
    let author = criteria.author_fragment.to_lowercase();
    let year = criteria.year_fragment.as_str();

    records
        .iter()
        .filter(|book| {
            (title.is_empty() || book.title.to_lowercase().contains(&title))
                && (year.is_empty() || book.year_text().contains(year))
                && (author.is_empty() || book.author.to_lowercase().contains(&author))
        })
        .cloned()
        .collect()
}

/// Comparison key for one record under one sort field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Year(i32),
}

fn sort_key(book: &BookRecord, field: SortField) -> SortKey {
    match field {
        SortField::Title => SortKey::Text(book.title.to_lowercase()),
        SortField::Author => SortKey::Text(book.author.to_lowercase()),
        SortField::PublishYear => SortKey::Year(book.publish_year),
    }
}

/// Orders a sequence by the active sort criteria.
///
/// Text fields compare case-insensitively, the year numerically. The sort is
/// stable in both directions: records with equal keys keep their input order.
#[must_use]
pub fn sort(mut sequence: Vec<BookRecord>, criteria: SortCriteria) -> Vec<BookRecord> {
    let field = criteria.field;
    match criteria.direction {
        SortDirection::Ascending => sequence.sort_by_cached_key(|book| sort_key(book, field)),
        SortDirection::Descending => {
            sequence.sort_by_cached_key(|book| Reverse(sort_key(book, field)));
        }
    }
    sequence
}

/// New sort criteria after the user asks to sort by `requested`.
#[must_use]
pub fn toggle_sort(current: SortCriteria, requested: SortField) -> SortCriteria {
    current.toggled(requested)
}

/// Inputs the display sequence was last derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DerivationKey {
    records_revision: u64,
    filter: FilterCriteria,
    sort: SortCriteria,
}

/// Memoized display sequence.
///
/// Holds the last derived sequence and the inputs it came from. Asking for a
/// sequence with unchanged inputs returns the stored one without touching the
/// records.
#[derive(Debug, Clone, Default)]
pub struct DisplayCache {
    key: Option<DerivationKey>,
    sequence: Vec<BookRecord>,
    recomputes: u64,
}

impl DisplayCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the display sequence for the given inputs, deriving it only if
    /// any input differs from the previous call.
    pub fn get_or_derive(
        &mut self,
        records_revision: u64,
        records: &[BookRecord],
        filter_criteria: &FilterCriteria,
        sort_criteria: SortCriteria,
    ) -> &[BookRecord] {
        let unchanged = self.key.as_ref().is_some_and(|key| {
            key.records_revision == records_revision
                && key.sort == sort_criteria
                && &key.filter == filter_criteria
        });

        if !unchanged {
            let _span = tracing::debug_span!(
                "derive_display_sequence",
                records_revision,
                record_count = records.len(),
                sort_field = sort_criteria.field.label(),
                sort_direction = sort_criteria.direction.short_label()
            )
            .entered();

            self.sequence = sort(filter(records, filter_criteria), sort_criteria);
            self.key = Some(DerivationKey {
                records_revision,
                filter: filter_criteria.clone(),
                sort: sort_criteria,
            });
            self.recomputes += 1;

            tracing::debug!(visible = self.sequence.len(), "display sequence derived");
        }

        &self.sequence
    }

    /// Drops the stored sequence; used while there is no `Ready` data.
    pub fn clear(&mut self) {
        self.key = None;
        self.sequence.clear();
    }

    /// The last derived sequence (empty after [`clear`](Self::clear)).
    #[must_use]
    pub fn sequence(&self) -> &[BookRecord] {
        &self.sequence
    }

    /// How many times the sequence has actually been derived.
    #[must_use]
    pub const fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterField;

    fn book(id: &str, title: &str, author: &str, year: i32) -> BookRecord {
        BookRecord::new(id, title, author, year)
    }

    fn catalog() -> Vec<BookRecord> {
        vec![
            book("1", "Zoo", "A", 2001),
            book("2", "Apple", "B", 1999),
            book("3", "ZOOM", "Carla Reyes", 1987),
            book("4", "the zone", "b. smith", 2019),
            book("5", "Orchard", "Zora Neale", 1937),
        ]
    }

    fn ids(sequence: &[BookRecord]) -> Vec<&str> {
        sequence.iter().map(|b| b.id.as_str()).collect()
    }

    fn only(field: FilterField, value: &str) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        *criteria.fragment_mut(field) = value.to_string();
        criteria
    }

    #[test]
    fn empty_criteria_is_identity() {
        let records = catalog();
        assert_eq!(filter(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn title_fragment_splits_included_and_excluded() {
        let records = catalog();
        for fragment in ["zo", "ZO", "o", "apple", "e", "xyz", " "] {
            let kept = filter(&records, &only(FilterField::Title, fragment));
            let needle = fragment.to_lowercase();
            for record in &records {
                let matches = record.title.to_lowercase().contains(&needle);
                assert_eq!(
                    kept.contains(record),
                    matches,
                    "fragment {fragment:?} on {}",
                    record.title
                );
            }
        }
    }

    #[test]
    fn title_match_is_case_insensitive() {
        let kept = filter(&catalog(), &only(FilterField::Title, "zo"));
        assert_eq!(ids(&kept), ["1", "3", "4"]);
    }

    #[test]
    fn year_fragment_is_a_text_substring() {
        let kept = filter(&catalog(), &only(FilterField::Year, "19"));
        // 1999, 1987, 2019 and 1937 all contain "19"; 2001 does not.
        assert_eq!(ids(&kept), ["2", "3", "4", "5"]);

        let kept = filter(&catalog(), &only(FilterField::Year, "01"));
        assert_eq!(ids(&kept), ["1", "4"]);
    }

    #[test]
    fn author_match_is_case_insensitive() {
        let kept = filter(&catalog(), &only(FilterField::Author, "B"));
        assert_eq!(ids(&kept), ["2", "4"]);
    }

    #[test]
    fn all_clauses_must_hold() {
        let criteria = FilterCriteria {
            title_fragment: "zo".into(),
            year_fragment: "19".into(),
            author_fragment: "smith".into(),
        };
        assert_eq!(ids(&filter(&catalog(), &criteria)), ["4"]);
    }

    #[test]
    fn sorts_text_case_insensitively() {
        let sorted = sort(catalog(), SortCriteria::default());
        assert_eq!(ids(&sorted), ["2", "5", "4", "1", "3"]);
    }

    #[test]
    fn sorts_year_numerically_in_both_directions() {
        let asc = SortCriteria {
            field: SortField::PublishYear,
            direction: SortDirection::Ascending,
        };
        assert_eq!(ids(&sort(catalog(), asc)), ["5", "3", "2", "1", "4"]);
        let by_year = sort(catalog(), asc.toggled(SortField::PublishYear));
        assert_eq!(ids(&by_year), ["4", "1", "2", "3", "5"]);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let records = vec![
            book("a", "Same", "x", 2000),
            book("b", "other", "x", 1990),
            book("c", "SAME", "x", 2010),
            book("d", "same", "x", 1980),
        ];

        let asc = sort(records.clone(), SortCriteria::default());
        assert_eq!(ids(&asc), ["b", "a", "c", "d"]);

        let desc = sort(records.clone(), SortCriteria::default().toggled(SortField::Title));
        assert_eq!(ids(&desc), ["a", "c", "d", "b"]);

        let by_author = SortCriteria {
            field: SortField::Author,
            direction: SortDirection::Descending,
        };
        assert_eq!(ids(&sort(records, by_author)), ["a", "b", "c", "d"]);
    }

    #[test]
    fn toggle_sort_examples() {
        let title_asc = SortCriteria {
            field: SortField::Title,
            direction: SortDirection::Ascending,
        };
        assert_eq!(
            toggle_sort(title_asc, SortField::Title),
            SortCriteria {
                field: SortField::Title,
                direction: SortDirection::Descending,
            }
        );
        assert_eq!(
            toggle_sort(title_asc, SortField::Author),
            SortCriteria {
                field: SortField::Author,
                direction: SortDirection::Ascending,
            }
        );
    }

    #[test]
    fn cache_derives_once_per_distinct_input() {
        let records = catalog();
        let mut cache = DisplayCache::new();
        let criteria = FilterCriteria::default();

        cache.get_or_derive(1, &records, &criteria, SortCriteria::default());
        cache.get_or_derive(1, &records, &criteria, SortCriteria::default());
        assert_eq!(cache.recompute_count(), 1);

        let narrowed = only(FilterField::Title, "zo");
        let sequence = cache.get_or_derive(1, &records, &narrowed, SortCriteria::default());
        assert_eq!(ids(sequence), ["4", "1", "3"]);
        assert_eq!(cache.recompute_count(), 2);

        let title_desc = SortCriteria::default().toggled(SortField::Title);
        cache.get_or_derive(1, &records, &narrowed, title_desc);
        assert_eq!(cache.recompute_count(), 3);

        cache.get_or_derive(2, &records, &narrowed, title_desc);
        assert_eq!(cache.recompute_count(), 4);
    }

    #[test]
    fn cleared_cache_is_empty_and_rederives() {
        let records = catalog();
        let mut cache = DisplayCache::new();
        cache.get_or_derive(1, &records, &FilterCriteria::default(), SortCriteria::default());

        cache.clear();
        assert!(cache.sequence().is_empty());

        cache.get_or_derive(1, &records, &FilterCriteria::default(), SortCriteria::default());
        assert_eq!(cache.recompute_count(), 2);
        assert_eq!(cache.sequence().len(), records.len());
    }
}
