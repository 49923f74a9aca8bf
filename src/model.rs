use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::status::Status;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Baseline,
    Validation,
    Predictions,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [Self::Baseline, Self::Validation, Self::Predictions];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Validation => "validation",
            Self::Predictions => "predictions",
        }
    }

    pub fn section_id(self) -> &'static str {
        self.as_str()
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Baseline => "Baseline Adjustment",
            Self::Validation => "Validación Óptica",
            Self::Predictions => "Predicciones con Muestras Reales",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Baseline => "📐",
            Self::Validation => "✅",
            Self::Predictions => "🔬",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered label → value table as read from a report.
///
/// Re-inserting an existing label replaces its value in place, so the
/// first-seen order of labels is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// First value whose label matches any of `keys`, tried in order.
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestInput {
    pub kind: ReportKind,
    pub path: String,
    pub bytes: usize,
    pub sha256: String,
    pub verdict: Option<Status>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsolidationManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub output_path: String,
    pub embed_strategy: String,
    pub global_status: Status,
    pub inputs: Vec<ManifestInput>,
    pub warnings: Vec<String>,
}
