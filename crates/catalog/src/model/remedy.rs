use crate::facet::{Facet, HasFacet};
use crate::filter::Searchable;
use lung_types::NonEmptyText;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Herbs,
    EssentialOils,
    Lifestyle,
    Diet,
    Breathing,
}

impl Facet for Category {
    const NAME: &'static str = "category";
    const ALL_LABEL: &'static str = "All Categories";
    const VALUES: &'static [Self] = &[
        Category::Herbs,
        Category::EssentialOils,
        Category::Lifestyle,
        Category::Diet,
        Category::Breathing,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Category::Herbs => "herbs",
            Category::EssentialOils => "essential-oils",
            Category::Lifestyle => "lifestyle",
            Category::Diet => "diet",
            Category::Breathing => "breathing",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Category::Herbs => "Herbs",
            Category::EssentialOils => "Essential Oils",
            Category::Lifestyle => "Lifestyle",
            Category::Diet => "Diet",
            Category::Breathing => "Breathing",
        }
    }
}

/// Reported effectiveness of a remedy. Used for filtering only, never for ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effectiveness {
    High,
    Medium,
    Low,
}

impl Facet for Effectiveness {
    const NAME: &'static str = "effectiveness";
    const ALL_LABEL: &'static str = "All Levels";
    const VALUES: &'static [Self] = &[
        Effectiveness::High,
        Effectiveness::Medium,
        Effectiveness::Low,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Effectiveness::High => "high",
            Effectiveness::Medium => "medium",
            Effectiveness::Low => "low",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Effectiveness::High => "High Effectiveness",
            Effectiveness::Medium => "Medium Effectiveness",
            Effectiveness::Low => "Low Effectiveness",
        }
    }
}

/// A natural remedy in the reference catalog.
///
/// `preparation` and `duration` are free text ("5-10 minutes", "2-3 times daily"), not
/// structured time values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Remedy {
    pub id: NonEmptyText,
    pub name: NonEmptyText,
    pub category: Category,
    pub effectiveness: Effectiveness,
    pub preparation: String,
    pub duration: String,
    pub benefits: Vec<String>,
    pub precautions: Vec<String>,
    /// Absent for remedies that are not prepared from ingredients (for example breathing
    /// exercises).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    pub instructions: Vec<String>,
}

impl Remedy {
    pub(crate) fn text_lists(&self) -> Vec<(&'static str, &[String])> {
        let mut lists: Vec<(&'static str, &[String])> = vec![
            ("benefits", self.benefits.as_slice()),
            ("precautions", self.precautions.as_slice()),
            ("instructions", self.instructions.as_slice()),
        ];
        if let Some(ingredients) = &self.ingredients {
            lists.push(("ingredients", ingredients.as_slice()));
        }
        lists
    }
}

impl HasFacet<Category> for Remedy {
    fn facet(&self) -> Category {
        self.category
    }
}

impl HasFacet<Effectiveness> for Remedy {
    fn facet(&self) -> Effectiveness {
        self.effectiveness
    }
}

// Remedies match on name and any benefit; ingredients and instructions are not scanned.
impl Searchable for Remedy {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn searchable_text(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.benefits.iter().map(String::as_str))
            .collect()
    }
}
