//! Plain-text rendering of API response types.

use api_shared::{DiseaseListRes, DiseaseRes, FacetCountRes, RemedyListRes, RemedyRes};

pub fn disease_list(res: &DiseaseListRes) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", res.summary));
    if res.diseases.is_empty() {
        output.push_str("No diseases found matching your criteria.\n");
    }
    for disease in &res.diseases {
        output.push_str(&format!(
            "\n{} [{}] ({})\n  {}\n",
            disease.name, disease.severity_label, disease.id, disease.description
        ));
    }
    output
}

pub fn disease(res: &DiseaseRes) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} [{}]\n", res.name, res.severity_label));
    output.push_str(&format!("{}\n", res.description));
    if let Some(notice) = &res.emergency_notice {
        output.push_str(&format!("\n!! {notice}\n"));
    }
    bullets(&mut output, "Causes", &res.causes);
    bullets(&mut output, "Symptoms", &res.symptoms);
    bullets(&mut output, "Treatments", &res.treatments);
    bullets(&mut output, "Prevention", &res.prevention);
    output
}

pub fn remedy_list(res: &RemedyListRes) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", res.summary));
    if res.remedies.is_empty() {
        output.push_str("No remedies found matching your criteria.\n");
    }
    for remedy in &res.remedies {
        output.push_str(&format!(
            "\n{}. {} [{} | {}]\n  {} ({})\n",
            remedy.id,
            remedy.name,
            remedy.category_label,
            remedy.effectiveness_label,
            remedy.preparation,
            remedy.duration
        ));
    }
    output
}

pub fn remedy(res: &RemedyRes) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} [{} | {}]\n",
        res.name, res.category_label, res.effectiveness_label
    ));
    output.push_str(&format!("Preparation: {}\n", res.preparation));
    output.push_str(&format!("Duration: {}\n", res.duration));
    bullets(&mut output, "Benefits", &res.benefits);
    if let Some(ingredients) = &res.ingredients {
        bullets(&mut output, "Ingredients", ingredients);
    }
    output.push_str("\nInstructions:\n");
    for (i, step) in res.instructions.iter().enumerate() {
        output.push_str(&format!("  {}. {step}\n", i + 1));
    }
    bullets(&mut output, "Precautions", &res.precautions);
    output
}

/// One facet as `Title:` followed by `label (count)` rows.
pub fn facet(title: &str, rows: &[FacetCountRes]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{title}:\n"));
    for row in rows {
        output.push_str(&format!("  {} ({}) [{}]\n", row.label, row.count, row.value));
    }
    output
}

fn bullets(output: &mut String, heading: &str, items: &[String]) {
    output.push_str(&format!("\n{heading}:\n"));
    for item in items {
        output.push_str(&format!("  - {item}\n"));
    }
}
