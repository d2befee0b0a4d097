// crates/icetruth-core/src/core/identifiers.rs
// ============================================================================
// Module: IceTruth Identifiers
// Description: Opaque identifiers for extractors and optical modules.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers used to namespace extractor output and to key detector
//! geometry. Extractor names are validated at construction; optical module
//! keys are plain `(string, om)` pairs as found in detector descriptions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Extractor Name
// ============================================================================

/// Stable name of an extractor, used to namespace output fields.
///
/// # Invariants
/// - Non-empty after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExtractorName(String);

impl ExtractorName {
    /// Creates an extractor name (returns `None` when blank).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        Some(Self(name))
    }

    /// Creates a name from a literal known to be non-blank.
    #[must_use]
    pub fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.trim().is_empty(), "extractor names must be non-blank");
        Self(name.to_string())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtractorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExtractorName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "extractor name must be non-empty".to_string())
    }
}

impl From<ExtractorName> for String {
    fn from(value: ExtractorName) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Optical Module Key
// ============================================================================

/// Optical module key: string number plus module number on that string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OmKey {
    /// Detector string number.
    pub string: i32,
    /// Module number along the string.
    pub om: u32,
}

impl OmKey {
    /// Creates an optical module key.
    #[must_use]
    pub const fn new(string: i32, om: u32) -> Self {
        Self {
            string,
            om,
        }
    }
}

impl fmt::Display for OmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OMKey({},{})", self.string, self.om)
    }
}
