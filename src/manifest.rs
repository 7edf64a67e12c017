//! Manifest parsing
//!
//! The manifest is a JSON array of note image filenames, e.g.
//! `["C4.png", "Fs3-1.png", "Db5.png"]`.

use log::{info, warn};
use serde_json::Value;

use crate::catalog::Catalog;
use crate::error::DrillError;

/// Read the filename list from manifest JSON.
///
/// Text that is not JSON, or JSON that is not an array, is `ManifestUnavailable`.
/// Array items that are not strings are dropped.
pub fn parse_manifest(json: &str) -> Result<Vec<String>, DrillError> {
    let value: Value = serde_json::from_str(json).map_err(|e| DrillError::ManifestUnavailable {
        reason: e.to_string(),
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(DrillError::ManifestUnavailable {
                reason: format!("expected a JSON array, found {}", json_kind(&other)),
            })
        }
    };

    let total = items.len();
    let names: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name),
            _ => None,
        })
        .collect();

    if names.len() < total {
        warn!(
            "Manifest: ignored {} non-string entries",
            total - names.len()
        );
    }
    Ok(names)
}

/// Parse the manifest and build the catalog.
///
/// A manifest with no usable note filenames is `EmptyCatalog`.
///
/// ```
/// use notedrill::load_catalog;
///
/// let catalog = load_catalog(r#"["G4.png", "C4.png", "notes.txt"]"#, "png").unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.entries()[0].label, "C4");
/// ```
pub fn load_catalog(json: &str, extension: &str) -> Result<Catalog, DrillError> {
    let names = parse_manifest(json)?;
    let catalog = Catalog::build_with_extension(&names, extension);

    if catalog.is_empty() {
        return Err(DrillError::EmptyCatalog);
    }

    info!(
        "Catalog: {} of {} manifest entries usable, {} distinct pitches",
        catalog.len(),
        names.len(),
        catalog.distinct_pitch_numbers().len()
    );
    Ok(catalog)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let names = parse_manifest(r#"["C4.png", 3, null, "Db5.png"]"#).unwrap();
        assert_eq!(names, vec!["C4.png", "Db5.png"]);
    }

    #[test]
    fn test_malformed_manifest() {
        for json in ["", "not json", r#"{"files": ["C4.png"]}"#, "\"C4.png\""] {
            assert!(
                matches!(
                    parse_manifest(json),
                    Err(DrillError::ManifestUnavailable { .. })
                ),
                "{:?}",
                json
            );
        }
    }

    #[test]
    fn test_empty_catalog_is_distinct() {
        assert_eq!(load_catalog("[]", "png").unwrap_err(), DrillError::EmptyCatalog);
        assert_eq!(
            load_catalog(r#"["H4.png", "C.png", "notanote.png"]"#, "png").unwrap_err(),
            DrillError::EmptyCatalog
        );
    }
}
