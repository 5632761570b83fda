//! JSON response bodies.
//!
//! Enum-valued fields are sent twice: the wire value used in query strings (`severity`) and the
//! human label shown in listings (`severity_label`).

use lung_catalog::{
    CatalogQuery, Disease, DiseaseQuery, Facet, FacetCounts, Remedy, RemedyQuery, ResultSummary,
};
use lung_inference::{AnalysisReport, AnalysisStep, XrayImage};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiseaseRes {
    pub id: String,
    pub name: String,
    pub description: String,
    pub causes: Vec<String>,
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
    pub prevention: Vec<String>,
    pub severity: String,
    pub severity_label: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_notice: Option<String>,
}

impl From<&Disease> for DiseaseRes {
    fn from(disease: &Disease) -> Self {
        Self {
            id: disease.id.to_string(),
            name: disease.name.to_string(),
            description: disease.description.clone(),
            causes: disease.causes.clone(),
            symptoms: disease.symptoms.clone(),
            treatments: disease.treatments.clone(),
            prevention: disease.prevention.clone(),
            severity: disease.severity.as_str().into(),
            severity_label: disease.severity.label().into(),
            color: disease.color.clone(),
            emergency_notice: disease.emergency_notice(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RemedyRes {
    pub id: String,
    pub name: String,
    pub category: String,
    pub category_label: String,
    pub effectiveness: String,
    pub effectiveness_label: String,
    pub preparation: String,
    pub duration: String,
    pub benefits: Vec<String>,
    pub precautions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    pub instructions: Vec<String>,
}

impl From<&Remedy> for RemedyRes {
    fn from(remedy: &Remedy) -> Self {
        Self {
            id: remedy.id.to_string(),
            name: remedy.name.to_string(),
            category: remedy.category.as_str().into(),
            category_label: remedy.category.label().into(),
            effectiveness: remedy.effectiveness.as_str().into(),
            effectiveness_label: remedy.effectiveness.label().into(),
            preparation: remedy.preparation.clone(),
            duration: remedy.duration.clone(),
            benefits: remedy.benefits.clone(),
            precautions: remedy.precautions.clone(),
            ingredients: remedy.ingredients.clone(),
            instructions: remedy.instructions.clone(),
        }
    }
}

/// A disease query result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiseaseListRes {
    /// e.g. `Showing 1 of 5 diseases matching "tb"`.
    pub summary: String,
    pub shown: usize,
    pub total: usize,
    /// True when a term or filter narrows the result.
    pub filtered: bool,
    pub diseases: Vec<DiseaseRes>,
}

impl DiseaseListRes {
    pub fn new(query: &DiseaseQuery, matches: &[&Disease], total: usize) -> Self {
        let summary = ResultSummary::for_diseases(query, matches.len(), total);
        Self {
            summary: summary.to_string(),
            shown: summary.shown,
            total,
            filtered: query.is_active(),
            diseases: matches.iter().map(|d| DiseaseRes::from(*d)).collect(),
        }
    }
}

/// A remedy query result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RemedyListRes {
    pub summary: String,
    pub shown: usize,
    pub total: usize,
    pub filtered: bool,
    pub remedies: Vec<RemedyRes>,
}

impl RemedyListRes {
    pub fn new(query: &RemedyQuery, matches: &[&Remedy], total: usize) -> Self {
        let summary = ResultSummary::for_remedies(query, matches.len(), total);
        Self {
            summary: summary.to_string(),
            shown: summary.shown,
            total,
            filtered: query.is_active(),
            remedies: matches.iter().map(|r| RemedyRes::from(*r)).collect(),
        }
    }
}

/// One selectable filter option and how many records it would match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacetCountRes {
    /// Query-string value, `all` for the unfiltered option.
    pub value: String,
    pub label: String,
    pub count: usize,
}

/// Rows for every option of one facet, `all` first.
pub fn facet_rows<F: Facet>(counts: &FacetCounts<F>) -> Vec<FacetCountRes> {
    counts
        .iter()
        .map(|entry| FacetCountRes {
            value: entry.value.as_str().into(),
            label: entry.value.label().into(),
            count: entry.count,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiseaseFacetsRes {
    pub severity: Vec<FacetCountRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RemedyFacetsRes {
    pub category: Vec<FacetCountRes>,
    pub effectiveness: Vec<FacetCountRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisStepRes {
    pub progress: u8,
    pub message: String,
}

impl From<&AnalysisStep> for AnalysisStepRes {
    fn from(step: &AnalysisStep) -> Self {
        Self {
            progress: step.progress,
            message: step.message.into(),
        }
    }
}

/// Outcome of a mock X-ray analysis.
///
/// The prediction is a random placeholder and carries no diagnostic meaning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRes {
    pub image_name: String,
    pub media_type: String,
    pub disease: String,
    pub confidence: f32,
    pub severity: String,
    pub severity_label: String,
    pub recommendations: Vec<String>,
    /// Progress steps in the order they were reported.
    pub steps: Vec<AnalysisStepRes>,
    /// RFC 3339 timestamp.
    pub generated_at: String,
    /// Plain-text report, as written by the CLI.
    pub report: String,
}

impl AnalysisRes {
    pub fn new(image: &XrayImage, steps: &[AnalysisStep], report: &AnalysisReport) -> Self {
        let prediction = &report.prediction;
        Self {
            image_name: image.file_name().into(),
            media_type: image.media_type().into(),
            disease: prediction.disease.clone(),
            confidence: prediction.confidence,
            severity: prediction.severity.as_str().into(),
            severity_label: prediction.severity.label().into(),
            recommendations: prediction.recommendations.clone(),
            steps: steps.iter().map(AnalysisStepRes::from).collect(),
            generated_at: report.generated_at.to_rfc3339(),
            report: report.render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lung_catalog::{Catalog, Category, Filter, Severity};

    #[test]
    fn disease_res_carries_wire_value_and_label() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let disease = catalog.disease("viral-pneumonia").expect("exists");

        let res = DiseaseRes::from(disease);
        assert_eq!(res.severity, "warning");
        assert_eq!(res.severity_label, "Moderate");
        assert_eq!(res.symptoms, disease.symptoms);
    }

    #[test]
    fn only_critical_diseases_carry_emergency_notice() {
        let catalog = Catalog::embedded().expect("embedded catalog");

        let tb = DiseaseRes::from(catalog.disease("tuberculosis").expect("exists"));
        let notice = tb.emergency_notice.as_deref().expect("critical disease has a notice");
        assert!(notice.starts_with("Emergency Medical Attention Required"));
        assert!(notice.contains("someone else has tuberculosis (tb), seek emergency"));

        let viral = DiseaseRes::from(catalog.disease("viral-pneumonia").expect("exists"));
        assert_eq!(viral.emergency_notice, None);
        let json = serde_json::to_value(&viral).expect("serialise");
        assert!(json.get("emergency_notice").is_none());
    }

    #[test]
    fn remedy_res_omits_missing_ingredients() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let without = catalog
            .remedies()
            .iter()
            .find(|r| r.ingredients.is_none())
            .expect("a remedy without ingredients");

        let json = serde_json::to_value(RemedyRes::from(without)).expect("serialise");
        assert!(json.get("ingredients").is_none());
        assert!(json.get("category_label").is_some());
    }

    #[test]
    fn list_res_summarises_query() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let query = DiseaseQuery::new("pneumonia").with_severity(Severity::Critical);
        let matches = catalog.query_diseases(&query);

        let res = DiseaseListRes::new(&query, &matches, catalog.diseases().len());
        assert_eq!(res.shown, 2);
        assert_eq!(res.total, 5);
        assert!(res.filtered);
        assert_eq!(
            res.summary,
            "Showing 2 of 5 diseases matching \"pneumonia\" in critical category"
        );
        let ids: Vec<&str> = res.diseases.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["bacterial-pneumonia", "covid-19"]);

        let query = RemedyQuery::default();
        let matches = catalog.query_remedies(&query);
        let res = RemedyListRes::new(&query, &matches, catalog.remedies().len());
        assert!(!res.filtered);
        assert_eq!(res.summary, "Showing 10 of 10 remedies");
    }

    #[test]
    fn facet_rows_start_with_all() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let rows = facet_rows(&catalog.category_facets());

        assert_eq!(rows.len(), Category::VALUES.len() + 1);
        assert_eq!(rows[0].value, Filter::<Category>::All.as_str());
        assert_eq!(rows[0].label, "All Categories");
        assert_eq!(rows[0].count, 10);
        assert_eq!(rows[1].value, "herbs");
        assert_eq!(rows[1].label, "Herbs");
        assert_eq!(rows[1].count, 3);
    }
}
