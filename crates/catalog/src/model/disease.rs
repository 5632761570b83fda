use crate::facet::{Facet, HasFacet};
use crate::filter::Searchable;
use lung_types::{NonEmptyText, Slug};
use serde::{Deserialize, Serialize};

/// How serious a condition is, as presented to the reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Healthy,
    Warning,
    Critical,
}

impl Facet for Severity {
    const NAME: &'static str = "severity";
    const ALL_LABEL: &'static str = "All Types";
    const VALUES: &'static [Self] = &[Severity::Healthy, Severity::Warning, Severity::Critical];

    fn as_str(self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Severity::Healthy => "Healthy",
            Severity::Warning => "Moderate",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lung condition in the reference catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Disease {
    pub id: Slug,
    pub name: NonEmptyText,
    pub description: String,
    pub causes: Vec<String>,
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
    pub prevention: Vec<String>,
    pub severity: Severity,
    /// Display colour token. Not used when querying.
    pub color: String,
}

impl Disease {
    /// Urgent-care notice shown with critical conditions.
    pub fn emergency_notice(&self) -> Option<String> {
        if self.severity != Severity::Critical {
            return None;
        }
        Some(format!(
            "Emergency Medical Attention Required: This is a serious medical condition that \
             requires immediate professional medical attention. If you suspect you or someone \
             else has {}, seek emergency medical care immediately.",
            self.name.as_str().to_lowercase()
        ))
    }

    /// Every free-text list on the record, with its field name.
    pub(crate) fn text_lists(&self) -> [(&'static str, &[String]); 4] {
        [
            ("causes", self.causes.as_slice()),
            ("symptoms", self.symptoms.as_slice()),
            ("treatments", self.treatments.as_slice()),
            ("prevention", self.prevention.as_slice()),
        ]
    }
}

impl HasFacet<Severity> for Disease {
    fn facet(&self) -> Severity {
        self.severity
    }
}

// Diseases match on name and description only; list fields are not scanned.
impl Searchable for Disease {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}
