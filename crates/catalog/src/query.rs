//! Query engine: free-text search combined with categorical filters.
//!
//! The engine is stateless. The caller owns the current term and filter selections and passes
//! them in on every call, so two calls with equal queries always return the same records in the
//! same order.

use crate::facet::{Facet, Filter};
use crate::filter::{SearchTerm, Searchable};
use crate::model::{Category, Disease, Effectiveness, Remedy, Severity};
use std::fmt;

/// A set of criteria over records of type `R`.
pub trait CatalogQuery<R> {
    /// Free-text term; empty means no text constraint.
    fn term(&self) -> &str;

    /// Returns true when `record` passes every categorical filter of the query.
    fn accepts(&self, record: &R) -> bool;

    /// True when any criterion would exclude records.
    fn is_active(&self) -> bool;
}

/// Criteria for browsing the disease catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiseaseQuery {
    pub term: String,
    pub severity: Filter<Severity>,
}

impl DiseaseQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            severity: Filter::All,
        }
    }

    pub fn with_severity(mut self, severity: impl Into<Filter<Severity>>) -> Self {
        self.severity = severity.into();
        self
    }
}

impl CatalogQuery<Disease> for DiseaseQuery {
    fn term(&self) -> &str {
        &self.term
    }

    fn accepts(&self, record: &Disease) -> bool {
        self.severity.accepts(record.severity)
    }

    fn is_active(&self) -> bool {
        !self.term.is_empty() || !self.severity.is_all()
    }
}

/// Criteria for browsing the remedy catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemedyQuery {
    pub term: String,
    pub category: Filter<Category>,
    pub effectiveness: Filter<Effectiveness>,
}

impl RemedyQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<Filter<Category>>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_effectiveness(mut self, effectiveness: impl Into<Filter<Effectiveness>>) -> Self {
        self.effectiveness = effectiveness.into();
        self
    }
}

impl CatalogQuery<Remedy> for RemedyQuery {
    fn term(&self) -> &str {
        &self.term
    }

    fn accepts(&self, record: &Remedy) -> bool {
        self.category.accepts(record.category) && self.effectiveness.accepts(record.effectiveness)
    }

    fn is_active(&self) -> bool {
        !self.term.is_empty() || !self.category.is_all() || !self.effectiveness.is_all()
    }
}

/// Records satisfying every criterion of `query`, in source order.
///
/// Equivalent to intersecting the search result with each filter result. An empty result is a
/// normal outcome, not an error.
pub fn query<'a, R, Q>(records: &'a [R], query: &Q) -> Vec<&'a R>
where
    R: Searchable,
    Q: CatalogQuery<R>,
{
    let term = SearchTerm::new(query.term());
    let matches: Vec<&R> = records
        .iter()
        .filter(|record| query.accepts(record) && term.matches(*record))
        .collect();

    tracing::debug!(
        term = query.term(),
        matched = matches.len(),
        total = records.len(),
        "catalog query evaluated"
    );
    matches
}

/// The "Showing N of M" line rendered above a result list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultSummary {
    pub shown: usize,
    pub total: usize,
    noun: &'static str,
    term: Option<String>,
    scope: Option<&'static str>,
}

impl ResultSummary {
    pub fn for_diseases(query: &DiseaseQuery, shown: usize, total: usize) -> Self {
        Self {
            shown,
            total,
            noun: "diseases",
            term: non_empty(&query.term),
            scope: match query.severity {
                Filter::All => None,
                Filter::Only(severity) => Some(severity.as_str()),
            },
        }
    }

    pub fn for_remedies(query: &RemedyQuery, shown: usize, total: usize) -> Self {
        Self {
            shown,
            total,
            noun: "remedies",
            term: non_empty(&query.term),
            scope: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shown == 0
    }
}

fn non_empty(term: &str) -> Option<String> {
    (!term.is_empty()).then(|| term.to_owned())
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} {}", self.shown, self.total, self.noun)?;
        if let Some(term) = &self.term {
            write!(f, " matching \"{term}\"")?;
        }
        if let Some(scope) = self.scope {
            write!(f, " in {scope} category")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::facet_counts;
    use crate::Catalog;

    fn disease_ids<'a>(records: &[&'a Disease]) -> Vec<&'a str> {
        records.iter().map(|d| d.id.as_str()).collect()
    }

    fn remedy_names<'a>(records: &[&'a Remedy]) -> Vec<&'a str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn blank_disease_query_returns_everything_in_order() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let result = query(catalog.diseases(), &DiseaseQuery::default());
        assert_eq!(
            disease_ids(&result),
            vec![
                "healthy",
                "viral-pneumonia",
                "bacterial-pneumonia",
                "tuberculosis",
                "covid-19"
            ]
        );
    }

    #[test]
    fn pneumonia_term_includes_covid() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let result = query(catalog.diseases(), &DiseaseQuery::new("pneumonia"));
        assert_eq!(
            disease_ids(&result),
            vec!["viral-pneumonia", "bacterial-pneumonia", "covid-19"]
        );
    }

    #[test]
    fn critical_filter_returns_three_records() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let q = DiseaseQuery::default().with_severity(Severity::Critical);
        let result = query(catalog.diseases(), &q);
        assert_eq!(
            disease_ids(&result),
            vec!["bacterial-pneumonia", "tuberculosis", "covid-19"]
        );
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let result = query(catalog.diseases(), &DiseaseQuery::new("xyz-no-match"));
        assert!(result.is_empty());
    }

    #[test]
    fn term_and_severity_are_conjunctive() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let q = DiseaseQuery::new("pneumonia").with_severity(Severity::Warning);
        let result = query(catalog.diseases(), &q);
        assert_eq!(disease_ids(&result), vec!["viral-pneumonia"]);
    }

    #[test]
    fn herbs_with_high_effectiveness_only() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let q = RemedyQuery::default()
            .with_category(Category::Herbs)
            .with_effectiveness(Effectiveness::High);
        let result = query(catalog.remedies(), &q);
        assert_eq!(remedy_names(&result), vec!["Ginger Tea"]);
        assert!(!remedy_names(&result).contains(&"Turmeric Golden Milk"));
    }

    #[test]
    fn high_effectiveness_spans_categories() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let q = RemedyQuery::default().with_effectiveness(Effectiveness::High);
        let result = query(catalog.remedies(), &q);
        assert_eq!(
            remedy_names(&result),
            vec![
                "Ginger Tea",
                "Eucalyptus Essential Oil",
                "Deep Breathing Exercises",
                "Garlic and Honey",
                "Yoga for Lung Health"
            ]
        );
    }

    #[test]
    fn conjunctive_filtering_matches_definition_for_every_combination() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let remedies = catalog.remedies();

        let categories = std::iter::once(Filter::All)
            .chain(Category::VALUES.iter().map(|&c| Filter::Only(c)));
        for category in categories {
            for effectiveness in std::iter::once(Filter::All).chain(
                Effectiveness::VALUES
                    .iter()
                    .map(|&e| Filter::Only(e)),
            ) {
                for term in ["", "immun", "BREATH"] {
                    let q = RemedyQuery {
                        term: term.to_owned(),
                        category,
                        effectiveness,
                    };
                    let result = query(remedies, &q);
                    let searched = crate::filter::search(remedies, term);

                    for remedy in remedies {
                        let expected = searched.iter().any(|r| r.id == remedy.id)
                            && category.accepts(remedy.category)
                            && effectiveness.accepts(remedy.effectiveness);
                        let actual = result.iter().any(|r| r.id == remedy.id);
                        assert_eq!(expected, actual, "{q:?} on {}", remedy.name);
                    }
                }
            }
        }
    }

    #[test]
    fn results_preserve_source_order() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let remedies = catalog.remedies();
        let result = query(remedies, &RemedyQuery::new("reduces"));

        let positions: Vec<usize> = result
            .iter()
            .map(|r| {
                remedies
                    .iter()
                    .position(|candidate| candidate.id == r.id)
                    .expect("result comes from source")
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!positions.is_empty());
    }

    #[test]
    fn repeated_queries_are_identical() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let q = RemedyQuery::new("honey").with_category(Category::Diet);
        let first = query(catalog.remedies(), &q);
        let second = query(catalog.remedies(), &q);
        assert_eq!(first, second);
    }

    #[test]
    fn facet_counts_ignore_active_query() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let before = facet_counts::<Severity, _>(catalog.diseases());

        let narrowed = query(
            catalog.diseases(),
            &DiseaseQuery::new("tuberculosis").with_severity(Severity::Critical),
        );
        assert_eq!(narrowed.len(), 1);

        let after = catalog.severity_facets();
        assert_eq!(before, after);
        assert_eq!(after.get(Filter::Only(Severity::Healthy)), 1);
        assert_eq!(after.get(Filter::Only(Severity::Warning)), 1);
        assert_eq!(after.get(Filter::Only(Severity::Critical)), 3);
        assert_eq!(after.total(), 5);
    }

    #[test]
    fn is_active_tracks_any_criterion() {
        assert!(!DiseaseQuery::default().is_active());
        assert!(DiseaseQuery::new("tb").is_active());
        assert!(DiseaseQuery::default()
            .with_severity(Severity::Healthy)
            .is_active());

        assert!(!RemedyQuery::default().is_active());
        assert!(RemedyQuery::default()
            .with_effectiveness(Effectiveness::Low)
            .is_active());
    }

    #[test]
    fn summary_describes_term_and_scope() {
        let q = DiseaseQuery::new("pneumonia").with_severity(Severity::Critical);
        let summary = ResultSummary::for_diseases(&q, 2, 5);
        assert_eq!(
            summary.to_string(),
            "Showing 2 of 5 diseases matching \"pneumonia\" in critical category"
        );

        let summary = ResultSummary::for_remedies(&RemedyQuery::default(), 10, 10);
        assert_eq!(summary.to_string(), "Showing 10 of 10 remedies");
        assert!(!summary.is_empty());
    }
}
