use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag vocabularies the admin curates ("parameters").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataCategory {
    Vendors,
    Notes,
    Occasions,
    Personalities,
}

impl MetadataCategory {
    pub const ALL: [MetadataCategory; 4] = [
        MetadataCategory::Vendors,
        MetadataCategory::Notes,
        MetadataCategory::Occasions,
        MetadataCategory::Personalities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataCategory::Vendors => "vendors",
            MetadataCategory::Notes => "notes",
            MetadataCategory::Occasions => "occasions",
            MetadataCategory::Personalities => "personalities",
        }
    }
}

impl fmt::Display for MetadataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetadataCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown metadata category: {}", s))
    }
}

/// One stored vocabulary: `{ _id: "<category>", values: [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub vendors: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub personalities: Vec<String>,
}

impl Metadata {
    pub fn values(&self, category: MetadataCategory) -> &[String] {
        match category {
            MetadataCategory::Vendors => &self.vendors,
            MetadataCategory::Notes => &self.notes,
            MetadataCategory::Occasions => &self.occasions,
            MetadataCategory::Personalities => &self.personalities,
        }
    }

    pub fn set_values(&mut self, category: MetadataCategory, values: Vec<String>) {
        match category {
            MetadataCategory::Vendors => self.vendors = values,
            MetadataCategory::Notes => self.notes = values,
            MetadataCategory::Occasions => self.occasions = values,
            MetadataCategory::Personalities => self.personalities = values,
        }
    }
}

/// Adds `item` keeping the list sorted and free of duplicates.
/// Returns false when the item was already present.
pub fn insert_sorted(values: &mut Vec<String>, item: &str) -> bool {
    if values.iter().any(|v| v == item) {
        return false;
    }
    values.push(item.to_string());
    values.sort();
    values.dedup();
    true
}
