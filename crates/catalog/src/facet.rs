//! Categorical facets: closed enums that records can be filtered and counted by.
//!
//! A facet is a field with a fixed set of values (severity, category, effectiveness). Each facet
//! enum implements [`Facet`], and every record type that carries the field implements
//! [`HasFacet`]. The field selector is therefore a type parameter, so asking for a field a record
//! does not have is a compile error rather than a runtime miss.
//!
//! User-facing selections are expressed as [`Filter`], which adds the `all` selector on top of
//! the facet's own values.

use crate::constants::ALL_FILTER;
use crate::{CatalogError, CatalogResult};
use std::fmt;
use std::str::FromStr;

/// A closed set of values a record field can take.
pub trait Facet: Copy + Eq + fmt::Debug + 'static {
    /// Field name, used in error messages and API output (for example `severity`).
    const NAME: &'static str;

    /// Label for the `all` selector of this facet.
    const ALL_LABEL: &'static str;

    /// Every value of the facet, in display order.
    const VALUES: &'static [Self];

    /// Wire/identifier form of the value (for example `essential-oils`).
    fn as_str(self) -> &'static str;

    /// Human label for the value (for example `Essential Oils`).
    fn label(self) -> &'static str;

    /// Parses the wire form of a value.
    ///
    /// Matching is exact: `Critical` is not `critical`. An unknown value is a caller bug and is
    /// reported instead of silently matching nothing.
    fn parse(value: &str) -> CatalogResult<Self> {
        Self::VALUES
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| CatalogError::InvalidFilterValue {
                facet: Self::NAME,
                value: value.to_owned(),
            })
    }
}

/// Implemented by records that hold exactly one value of facet `F`.
pub trait HasFacet<F: Facet> {
    fn facet(&self) -> F;
}

/// A selection on one facet: either every record, or only records holding one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Filter<F> {
    All,
    Only(F),
}

impl<F> Default for Filter<F> {
    fn default() -> Self {
        Filter::All
    }
}

impl<F: Facet> Filter<F> {
    /// Returns true when `value` passes this selection.
    pub fn accepts(self, value: F) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(self) -> bool {
        matches!(self, Filter::All)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => ALL_FILTER,
            Filter::Only(value) => value.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => F::ALL_LABEL,
            Filter::Only(value) => value.label(),
        }
    }

    /// Parses an optional selection, treating a missing or blank value as `all`.
    ///
    /// This is the entry point for outer surfaces where the parameter may simply be absent.
    pub fn parse_optional(value: Option<&str>) -> CatalogResult<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(Filter::All),
            Some(value) => value.parse(),
        }
    }
}

impl<F: Facet> FromStr for Filter<F> {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_FILTER {
            return Ok(Filter::All);
        }
        F::parse(s).map(Filter::Only)
    }
}

impl<F: Facet> fmt::Display for Filter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<F: Facet> From<F> for Filter<F> {
    fn from(value: F) -> Self {
        Filter::Only(value)
    }
}

/// One row of a facet breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacetCount<F> {
    pub value: Filter<F>,
    pub count: usize,
}

/// Per-value record counts for one facet over a whole collection.
///
/// The first entry is always `all`, followed by every facet value in display order (including
/// values no record holds, which count zero).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetCounts<F> {
    entries: Vec<FacetCount<F>>,
}

impl<F: Facet> FacetCounts<F> {
    pub fn entries(&self) -> &[FacetCount<F>] {
        &self.entries
    }

    /// Count for a selection; `Filter::All` yields the collection size.
    pub fn get(&self, value: Filter<F>) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map_or(0, |entry| entry.count)
    }

    pub fn total(&self) -> usize {
        self.get(Filter::All)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacetCount<F>> {
        self.entries.iter()
    }
}

/// Counts how many records hold each value of facet `F`.
///
/// Counts are taken over the full collection passed in. Callers hand this the unfiltered
/// catalog, so the numbers do not shrink as a query narrows.
pub fn facet_counts<F, R>(records: &[R]) -> FacetCounts<F>
where
    F: Facet,
    R: HasFacet<F>,
{
    let mut entries = Vec::with_capacity(F::VALUES.len() + 1);
    entries.push(FacetCount {
        value: Filter::All,
        count: records.len(),
    });
    for &value in F::VALUES {
        let count = records
            .iter()
            .filter(|record| record.facet() == value)
            .count();
        entries.push(FacetCount {
            value: Filter::Only(value),
            count,
        });
    }
    FacetCounts { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Colour {
        Red,
        Blue,
        Green,
    }

    impl Facet for Colour {
        const NAME: &'static str = "colour";
        const ALL_LABEL: &'static str = "All Colours";
        const VALUES: &'static [Self] = &[Colour::Red, Colour::Blue, Colour::Green];

        fn as_str(self) -> &'static str {
            match self {
                Colour::Red => "red",
                Colour::Blue => "blue",
                Colour::Green => "green",
            }
        }

        fn label(self) -> &'static str {
            match self {
                Colour::Red => "Red",
                Colour::Blue => "Blue",
                Colour::Green => "Green",
            }
        }
    }

    struct Marble(Colour);

    impl HasFacet<Colour> for Marble {
        fn facet(&self) -> Colour {
            self.0
        }
    }

    #[test]
    fn filter_all_accepts_every_value() {
        for &colour in Colour::VALUES {
            assert!(Filter::<Colour>::All.accepts(colour));
        }
        assert!(Filter::Only(Colour::Red).accepts(Colour::Red));
        assert!(!Filter::Only(Colour::Red).accepts(Colour::Blue));
    }

    #[test]
    fn filter_parses_all_and_values() {
        assert_eq!("all".parse::<Filter<Colour>>().unwrap(), Filter::All);
        assert_eq!(
            "green".parse::<Filter<Colour>>().unwrap(),
            Filter::Only(Colour::Green)
        );
        assert_eq!(Filter::<Colour>::parse_optional(None).unwrap(), Filter::All);
        assert_eq!(
            Filter::<Colour>::parse_optional(Some("  ")).unwrap(),
            Filter::All
        );
    }

    #[test]
    fn filter_rejects_unknown_value() {
        let err = "Red".parse::<Filter<Colour>>().expect_err("case must match");
        assert!(matches!(
            err,
            CatalogError::InvalidFilterValue { facet: "colour", ref value } if value == "Red"
        ));
    }

    #[test]
    fn counts_cover_every_value_and_sum_to_total() {
        let marbles = vec![Marble(Colour::Red), Marble(Colour::Blue), Marble(Colour::Red)];
        let counts = facet_counts::<Colour, _>(&marbles);

        assert_eq!(counts.entries().len(), 4);
        assert_eq!(counts.entries()[0].value, Filter::All);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get(Filter::Only(Colour::Red)), 2);
        assert_eq!(counts.get(Filter::Only(Colour::Blue)), 1);
        assert_eq!(counts.get(Filter::Only(Colour::Green)), 0);

        let sum: usize = counts
            .iter()
            .filter(|entry| !entry.value.is_all())
            .map(|entry| entry.count)
            .sum();
        assert_eq!(sum, counts.total());
    }

    #[test]
    fn counts_over_empty_collection_are_zero() {
        let counts = facet_counts::<Colour, Marble>(&[]);
        assert!(counts.iter().all(|entry| entry.count == 0));
    }

    #[test]
    fn labels_include_all_selector() {
        assert_eq!(Filter::<Colour>::All.label(), "All Colours");
        assert_eq!(Filter::Only(Colour::Blue).label(), "Blue");
        assert_eq!(Filter::Only(Colour::Blue).to_string(), "blue");
    }
}
