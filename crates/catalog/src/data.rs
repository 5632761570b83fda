//! Reference data loading.
//!
//! The catalog ships as two YAML documents compiled into the binary. Parsing is strict: unknown
//! keys are rejected and the failing field path is reported, so a typo in the data fails at
//! startup rather than producing a record with a silently missing field.

use crate::constants::{DISEASES_FILE_NAME, REMEDIES_FILE_NAME};
use crate::filter::Searchable;
use crate::model::{Disease, Remedy};
use crate::{CatalogError, CatalogResult};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;

pub(crate) const EMBEDDED_DISEASES: &str = include_str!("../data/diseases.yaml");
pub(crate) const EMBEDDED_REMEDIES: &str = include_str!("../data/remedies.yaml");

/// Strictly parse a YAML document, reporting the path of the first mismatching field.
fn parse_yaml<T: DeserializeOwned>(yaml_text: &str, what: &str) -> CatalogResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    match serde_path_to_error::deserialize(deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() {
                "<root>"
            } else {
                path.as_str()
            };
            Err(CatalogError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}

/// Parse and validate the disease collection.
///
/// # Errors
///
/// Returns [`CatalogError`] if the YAML does not match the disease schema, an id repeats, or a
/// record contains a blank list entry.
pub fn parse_diseases(yaml_text: &str) -> CatalogResult<Vec<Disease>> {
    let diseases: Vec<Disease> = parse_yaml(yaml_text, "disease catalog")?;
    ensure_unique_ids("disease", &diseases)?;
    for disease in &diseases {
        ensure_no_blank_entries("disease", disease.id.as_str(), disease.text_lists())?;
    }
    Ok(diseases)
}

/// Parse and validate the remedy collection.
///
/// # Errors
///
/// Same conditions as [`parse_diseases`]. Additionally every remedy must list at least one
/// instruction.
pub fn parse_remedies(yaml_text: &str) -> CatalogResult<Vec<Remedy>> {
    let remedies: Vec<Remedy> = parse_yaml(yaml_text, "remedy catalog")?;
    ensure_unique_ids("remedy", &remedies)?;
    for remedy in &remedies {
        if remedy.instructions.is_empty() {
            return Err(CatalogError::InvalidRecord {
                kind: "remedy",
                id: remedy.id.to_string(),
                reason: "instructions cannot be empty".into(),
            });
        }
        ensure_no_blank_entries("remedy", remedy.id.as_str(), remedy.text_lists())?;
    }
    Ok(remedies)
}

/// Read both collections from a catalog directory.
pub(crate) fn read_dir(dir: &Path) -> CatalogResult<(Vec<Disease>, Vec<Remedy>)> {
    let read = |name: &str| {
        let path = dir.join(name);
        std::fs::read_to_string(&path).map_err(|source| CatalogError::FileRead { path, source })
    };

    let diseases = parse_diseases(&read(DISEASES_FILE_NAME)?)?;
    let remedies = parse_remedies(&read(REMEDIES_FILE_NAME)?)?;
    Ok((diseases, remedies))
}

pub(crate) fn ensure_unique_ids<R: Searchable>(
    kind: &'static str,
    records: &[R],
) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: record.id().to_owned(),
            });
        }
    }
    Ok(())
}

fn ensure_no_blank_entries<'a>(
    kind: &'static str,
    id: &str,
    lists: impl IntoIterator<Item = (&'static str, &'a [String])>,
) -> CatalogResult<()> {
    for (field, entries) in lists {
        if entries.iter().any(|entry| entry.trim().is_empty()) {
            return Err(CatalogError::InvalidRecord {
                kind,
                id: id.to_owned(),
                reason: format!("{field} contains a blank entry"),
            });
        }
    }
    Ok(())
}
