// crates/icetruth-core/src/core/detector.rs
// ============================================================================
// Module: Detector Context
// Description: Geometry and calibration context loaded per file pair.
// Purpose: Hold immutable detector description data for extraction.
// Dependencies: serde, crate::core::{identifiers, particle}
// ============================================================================

//! ## Overview
//! Detector context is loaded once per (event file, GCD file) pair by a
//! [`crate::GcdSource`] and is immutable afterwards. A new file pair replaces
//! the context; it is never merged or mutated in place.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::OmKey;
use crate::core::particle::Position;

// ============================================================================
// SECTION: File Pair
// ============================================================================

/// Event file paired with the GCD file that describes its detector state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePair {
    /// Event file the frames originate from.
    pub event_file: PathBuf,
    /// Geometry/calibration/detector-status description file.
    pub gcd_file: PathBuf,
}

impl FilePair {
    /// Creates a file pair.
    #[must_use]
    pub fn new(event_file: impl Into<PathBuf>, gcd_file: impl Into<PathBuf>) -> Self {
        Self {
            event_file: event_file.into(),
            gcd_file: gcd_file.into(),
        }
    }

    /// Event file path.
    #[must_use]
    pub fn event_file(&self) -> &Path {
        &self.event_file
    }

    /// Event file path rendered for substring heuristics.
    #[must_use]
    pub fn event_file_text(&self) -> String {
        self.event_file.to_string_lossy().into_owned()
    }
}

// ============================================================================
// SECTION: Geometry and Calibration
// ============================================================================

/// Geometry entry for a single optical module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OmGeometry {
    /// Module key.
    pub key: OmKey,
    /// Module position.
    pub position: Position,
}

/// Calibration entry for a single optical module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomCalibration {
    /// Module key.
    pub key: OmKey,
    /// Relative optical efficiency.
    pub relative_dom_eff: f64,
}

/// Geometry and calibration content of a GCD description.
///
/// # Invariants
/// - At most one entry per module key in each table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GcdContext {
    /// Module positions keyed by module.
    geometry: BTreeMap<OmKey, Position>,
    /// Relative efficiencies keyed by module.
    calibration: BTreeMap<OmKey, f64>,
}

impl GcdContext {
    /// Builds a context from geometry and calibration entries; later duplicates win.
    #[must_use]
    pub fn new(
        geometry: impl IntoIterator<Item = OmGeometry>,
        calibration: impl IntoIterator<Item = DomCalibration>,
    ) -> Self {
        Self {
            geometry: geometry.into_iter().map(|entry| (entry.key, entry.position)).collect(),
            calibration: calibration
                .into_iter()
                .map(|entry| (entry.key, entry.relative_dom_eff))
                .collect(),
        }
    }

    /// Position of a module.
    #[must_use]
    pub fn position(&self, key: OmKey) -> Option<Position> {
        self.geometry.get(&key).copied()
    }

    /// Relative efficiency of a module.
    #[must_use]
    pub fn relative_dom_eff(&self, key: OmKey) -> Option<f64> {
        self.calibration.get(&key).copied()
    }

    /// Number of modules with geometry.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.geometry.len()
    }
}
