//! Per-field record predicates.
//!
//! Both functions here return borrowed views into the source slice and never reorder: the output
//! is the input with non-matching records removed.

use crate::facet::{Facet, Filter, HasFacet};

/// A record that can be matched against a free-text search term.
pub trait Searchable {
    /// Stable identity of the record within its collection.
    fn id(&self) -> &str;

    /// The fields a search term is tested against. Which fields are included is a per-type
    /// decision.
    fn searchable_text(&self) -> Vec<&str>;
}

/// A normalised free-text search term.
///
/// Matching is plain case-insensitive substring containment: no tokenisation, no fuzzy matching
/// and no ranking. An empty term matches every record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns true when the term is contained in `haystack`, ignoring case.
    pub fn matches_text(&self, haystack: &str) -> bool {
        self.is_empty() || haystack.to_lowercase().contains(&self.needle)
    }

    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        self.is_empty()
            || record
                .searchable_text()
                .into_iter()
                .any(|field| self.matches_text(field))
    }
}

/// Records whose searchable text contains `term`, in source order.
pub fn search<'a, R: Searchable>(records: &'a [R], term: &str) -> Vec<&'a R> {
    let term = SearchTerm::new(term);
    records.iter().filter(|record| term.matches(*record)).collect()
}

/// Records passing a selection on facet `F`, in source order.
///
/// Several categorical filters compose by chaining: filter the output of one call with the
/// next selection, or use [`crate::query::query`] which applies them together.
pub fn filter_by<'a, F, R>(records: &'a [R], filter: Filter<F>) -> Vec<&'a R>
where
    F: Facet,
    R: HasFacet<F>,
{
    records
        .iter()
        .filter(|record| filter.accepts(record.facet()))
        .collect()
}
