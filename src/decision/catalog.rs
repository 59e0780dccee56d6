use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Index → human-readable label for the classifier's output positions.
///
/// Loaded once at startup and shared read-only. Gaps are allowed; lookups
/// for a missing index return `None` and the decision builder substitutes a
/// placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassCatalog {
    labels: BTreeMap<usize, String>,
}

/// On-disk catalog: either a plain label list or an `{"index": "label"}` map.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl ClassCatalog {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassCatalog {
            labels: labels.into_iter().map(Into::into).enumerate().collect(),
        }
    }

    /// The five rice leaf diseases the deployed model was trained on.
    pub fn rice_diseases() -> Self {
        ClassCatalog::from_labels([
            "โรคใบจุดสีน้ำตาล (Brown Spot)",
            "โรคใบวงสีน้ำตาล (Leaf Scald)",
            "โรคไหม้ (Rice Blast)",
            "โรคใบสีส้ม (Rice Tungro)",
            "โรคกาบใบแห้ง (Sheath Blight)",
        ])
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }

    /// Number of labelled indices.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Indices in `0..class_count` that have no label.
    pub fn missing(&self, class_count: usize) -> Vec<usize> {
        (0..class_count).filter(|i| !self.labels.contains_key(i)).collect()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| Error::Catalog(e.to_string()))?;
        match file {
            CatalogFile::List(labels) => Ok(ClassCatalog::from_labels(labels)),
            CatalogFile::Map(map) => {
                let labels = map
                    .into_iter()
                    .map(|(key, label)| {
                        key.trim()
                            .parse::<usize>()
                            .map(|index| (index, label))
                            .map_err(|_| Error::Catalog(format!("'{}' is not a class index", key)))
                    })
                    .collect::<Result<BTreeMap<_, _>>>()?;
                Ok(ClassCatalog { labels })
            }
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?;
        ClassCatalog::from_json_str(&json)
    }
}
