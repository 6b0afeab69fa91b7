use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::features::locations::models::{Level, LocationCounts};

pub type Villages = Vec<String>;
pub type Cells = BTreeMap<String, Villages>;
pub type Sectors = BTreeMap<String, Cells>;
pub type Districts = BTreeMap<String, Sectors>;

/// Input document: `{province: {district: {sector: {cell: [village, ...]}}}}`
///
/// Maps are ordered, so iteration visits keys in byte-wise lexicographic
/// order. The resume cursor relies on that order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LocationTree(BTreeMap<String, Districts>);

impl LocationTree {
    /// Read and parse a JSON document from disk
    pub async fn from_path(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::io(path, e))?;

        Self::from_json_str(&raw).map_err(|e| match e {
            AppError::InvalidInput(msg) => {
                AppError::InvalidInput(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| AppError::InvalidInput(e.to_string()))
    }

    pub fn provinces(&self) -> impl Iterator<Item = (&String, &Districts)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries per level as they will be written
    pub fn counts(&self) -> LocationCounts {
        let mut counts = LocationCounts::default();
        for districts in self.0.values() {
            counts.increment(Level::Province);
            for sectors in districts.values() {
                counts.increment(Level::District);
                for cells in sectors.values() {
                    counts.increment(Level::Sector);
                    for villages in cells.values() {
                        counts.increment(Level::Cell);
                        for _ in ordered_villages(villages) {
                            counts.increment(Level::Village);
                        }
                    }
                }
            }
        }
        counts
    }
}

/// Village names in traversal order, duplicates dropped
pub fn ordered_villages(villages: &[String]) -> Vec<&str> {
    let mut names: Vec<&str> = villages.iter().map(String::as_str).collect();
    names.sort_unstable();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let tree = LocationTree::from_json_str(
            r#"{"Kigali": {"Nyarugenge": {"Muhima": {"A": ["V1", "V2"]}}}}"#,
        )
        .unwrap();

        let counts = tree.counts();
        assert_eq!(counts.provinces, 1);
        assert_eq!(counts.districts, 1);
        assert_eq!(counts.sectors, 1);
        assert_eq!(counts.cells, 1);
        assert_eq!(counts.villages, 2);
    }

    #[test]
    fn test_provinces_iterate_in_lexicographic_order() {
        let tree = LocationTree::from_json_str(
            r#"{"West": {}, "East": {}, "Kigali": {}, "North": {}, "South": {}}"#,
        )
        .unwrap();

        let names: Vec<&str> = tree.provinces().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["East", "Kigali", "North", "South", "West"]);
    }

    #[test]
    fn test_ordered_villages_sorts_and_drops_duplicates() {
        let villages = vec![
            "Rugando".to_string(),
            "Amahoro".to_string(),
            "Rugando".to_string(),
        ];
        assert_eq!(ordered_villages(&villages), vec!["Amahoro", "Rugando"]);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = LocationTree::from_json_str(r#"{"Kigali": ["not", "a", "map"]}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = LocationTree::from_json_str("{\"Kigali\": ").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::now_v7()));
        let err = LocationTree::from_path(&path).await.unwrap_err();

        assert!(matches!(err, AppError::Io { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
