// crates/icetruth-core/src/core/sim_type.rs
// ============================================================================
// Module: Simulation Type Classification
// Description: Path-convention classifier for the campaign that produced an event.
// Purpose: Tag events with a stable simulation-type label.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The classifier starts from `data` or `NuGen` depending on the Monte-Carlo
//! flag and then applies substring rules to the event-file path in a fixed
//! order. Every matching rule overrides earlier ones, so the last match wins:
//! `muon`, `corsika`, `genie` (or case-insensitive `nu`), `noise`, `L2`.
//! Only the `nu` rule ignores case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Simulation Type
// ============================================================================

/// Simulation campaign label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimType {
    /// Detector data.
    #[serde(rename = "data")]
    Data,
    /// Neutrino generator simulation.
    #[serde(rename = "NuGen")]
    NuGen,
    /// Muon gun simulation.
    #[serde(rename = "muongun")]
    MuonGun,
    /// Cosmic-ray air shower simulation.
    #[serde(rename = "corsika")]
    Corsika,
    /// GENIE neutrino simulation.
    #[serde(rename = "genie")]
    Genie,
    /// Pure noise simulation.
    #[serde(rename = "noise")]
    Noise,
    /// Double-bang (heavy neutral lepton) simulation.
    #[serde(rename = "dbang")]
    DoubleBang,
}

impl SimType {
    /// Wire label of the simulation type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::NuGen => "NuGen",
            Self::MuonGun => "muongun",
            Self::Corsika => "corsika",
            Self::Genie => "genie",
            Self::Noise => "noise",
            Self::DoubleBang => "dbang",
        }
    }

    /// Classifies an event file by path convention.
    #[must_use]
    pub fn classify(is_monte_carlo: bool, file_path: &str) -> Self {
        let mut sim_type = if is_monte_carlo { Self::NuGen } else { Self::Data };
        if file_path.contains("muon") {
            sim_type = Self::MuonGun;
        }
        if file_path.contains("corsika") {
            sim_type = Self::Corsika;
        }
        if file_path.contains("genie") || file_path.to_lowercase().contains("nu") {
            sim_type = Self::Genie;
        }
        if file_path.contains("noise") {
            sim_type = Self::Noise;
        }
        // Processing-level marker, kept for label compatibility.
        if file_path.contains("L2") {
            sim_type = Self::DoubleBang;
        }
        sim_type
    }
}

impl fmt::Display for SimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
