use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::islands::IslandCode;

const BUNDLED_CATALOG: &str = include_str!("../../data/careers.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerKind {
    Job,
    Startup,
}

impl CareerKind {
    pub const fn label(self) -> &'static str {
        match self {
            CareerKind::Job => "job",
            CareerKind::Startup => "startup",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub zh: String,
    pub en: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedList {
    #[serde(default)]
    pub zh: Vec<String>,
    #[serde(default)]
    pub en: Vec<String>,
}

/// A career or startup direction attached to one island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecord {
    #[serde(rename = "type")]
    pub kind: CareerKind,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LocalizedText>,
    /// External demand weight; the ranker substitutes its default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_trend: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<LocalizedList>,
}

/// Read-only island → career records lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<CareerRecord>>")]
pub struct CareerCatalog {
    entries: BTreeMap<IslandCode, Vec<CareerRecord>>,
}

impl CareerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_CATALOG.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn with_records(mut self, island: IslandCode, records: Vec<CareerRecord>) -> Self {
        self.entries.entry(island).or_default().extend(records);
        self
    }

    /// Records attached to an island; islands without an entry yield an empty slice.
    pub fn records_for(&self, island: IslandCode) -> &[CareerRecord] {
        self.entries
            .get(&island)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<BTreeMap<String, Vec<CareerRecord>>> for CareerCatalog {
    fn from(raw: BTreeMap<String, Vec<CareerRecord>>) -> Self {
        let mut catalog = Self::new();
        for (code, records) in raw {
            match IslandCode::from_code(&code) {
                Some(island) => catalog = catalog.with_records(island, records),
                None => {
                    let records = records.len();
                    warn!(%code, records, "skipping unknown island in career catalog");
                }
            }
        }
        catalog
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read career catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid career catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_covers_every_island() {
        let catalog = CareerCatalog::bundled().expect("bundled catalog parses");

        for island in IslandCode::ordered() {
            assert!(
                !catalog.records_for(island).is_empty(),
                "{} has no careers",
                island.code()
            );
        }
    }

    #[test]
    fn reads_camel_case_records_and_skips_unknown_islands() {
        let raw = r#"{
            "cc": [{
                "type": "startup",
                "title": {"zh": "独立游戏工作室", "en": "Indie game studio"},
                "trendScore": 82,
                "skills": {"zh": ["叙事"], "en": ["Narrative"]}
            }],
            "ZZ": [{"type": "job", "title": {"zh": "未知", "en": "Unknown"}}]
        }"#;

        let catalog = CareerCatalog::from_reader(raw.as_bytes()).expect("catalog parses");

        assert_eq!(catalog.len(), 1);
        let record = &catalog.records_for(IslandCode::CreativeCulture)[0];
        assert_eq!(record.kind, CareerKind::Startup);
        assert_eq!(record.trend_score, Some(82.0));
        assert!(record.category.is_none());
        assert!(catalog.records_for(IslandCode::PublicGovernance).is_empty());
    }

    #[test]
    fn reports_missing_files_with_their_path() {
        let error = CareerCatalog::from_path("/nonexistent/careers.json").expect_err("missing");
        assert!(error.to_string().contains("/nonexistent/careers.json"));
    }
}
