// crates/icetruth-core/src/core/fields.rs
// ============================================================================
// Module: Field Maps
// Description: Flat, ordered output records produced by extractors.
// Purpose: Provide the per-event output shape shared by all extractors.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! A [`FieldMap`] is an insertion-ordered mapping from field names to numeric
//! or text values. Replacing an existing field keeps its position, so a map
//! seeded with a fixed schema keeps that schema's order no matter which fields
//! are later overwritten. Maps serialize as JSON objects in field order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::core::identifiers::ExtractorName;

// ============================================================================
// SECTION: Truth Schema
// ============================================================================

/// Field names of the truth record, in output order.
pub const TRUTH_FIELDS: [&str; 29] = [
    "energy",
    "position_x",
    "position_y",
    "position_z",
    "azimuth",
    "zenith",
    "pid",
    "event_time",
    "sim_type",
    "interaction_type",
    "elasticity",
    "RunID",
    "SubrunID",
    "EventID",
    "SubEventID",
    "dbang_decay_length",
    "track_length",
    "stopped_muon",
    "energy_track",
    "inelasticity",
    "DeepCoreFilter_13",
    "CascadeFilter_13",
    "MuonFilter_13",
    "OnlineL2Filter_17",
    "L3_oscNext_bool",
    "L4_oscNext_bool",
    "L5_oscNext_bool",
    "L6_oscNext_bool",
    "L7_oscNext_bool",
];

/// Default padding value for absent or inapplicable fields.
pub const DEFAULT_PADDING_VALUE: f64 = -1.0;

// ============================================================================
// SECTION: Field Values
// ============================================================================

/// Value of a single output field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer value (identifiers, codes, flags).
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl FieldValue {
    /// Returns the value as `f64` when numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "Field integers are small codes and ids.")]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Returns the value as text when textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Int(_) | Self::Float(_) => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// ============================================================================
// SECTION: Field Map
// ============================================================================

/// Insertion-ordered flat mapping from field names to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap {
    /// Entries in insertion order.
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a map with every name set to `value`, in the given order.
    #[must_use]
    pub fn padded<'a>(names: impl IntoIterator<Item = &'a str>, value: &FieldValue) -> Self {
        let mut map = Self::new();
        for name in names {
            map.set(name, value.clone());
        }
        map
    }

    /// Sets a field, keeping its position when it already exists.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| key == name) {
            entry.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    /// Looks up a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the map has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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

/// Field map tagged with the extractor that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedFieldMap {
    /// Producing extractor.
    pub name: ExtractorName,
    /// Extracted fields.
    pub fields: FieldMap,
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_original_position() {
        let mut map = FieldMap::padded(["a", "b", "c"], &FieldValue::Float(-1.0));
        map.set("a", 5_i64);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(map.get("a"), Some(&FieldValue::Int(5)));
    }

    #[test]
    fn truth_fields_are_unique() {
        let mut sorted = TRUTH_FIELDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), TRUTH_FIELDS.len());
    }
}
