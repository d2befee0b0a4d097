// crates/icetruth-core/src/runtime/tree.rs
// ============================================================================
// Module: Particle Tree Traversal
// Description: Primary resolution, track energy, and double-cascade decay length.
// Purpose: Derive truth quantities from the Monte-Carlo particle hierarchy.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Helpers that walk a [`ParticleTree`] to locate the primary, sum the energy
//! carried away by tracks, and measure the distance between the two cascades
//! of a double-cascade decay. Traversal never mutates the tree.
//! Invariants:
//! - Missing data yields `None` or [`DecayLength::NotApplicable`], never a panic.
//! - Structural surprises are reported as [`DecayLength::Anomaly`] so callers
//!   can log them separately from "not applicable".

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Frame;
use crate::core::Particle;
use crate::core::ParticleId;
use crate::core::ParticleTree;
use crate::core::Position;
use crate::core::keys;

// ============================================================================
// SECTION: Primary Resolution
// ============================================================================

/// Resolves the in-ice primary particle of a Monte-Carlo frame.
///
/// Prefers the explicit primary key and falls back to the first tree entry.
/// A primary with NaN energy is replaced by the second tree entry when one
/// exists; some muon simulations store the usable copy there.
#[must_use]
pub fn resolve_primary(frame: &Frame) -> Option<&Particle> {
    let tree = frame.mc_tree();
    let candidate = frame
        .particle(keys::MC_IN_ICE_PRIMARY)
        .or_else(|| tree.and_then(|tree| tree.nth(0)))?;
    if candidate.energy.is_nan() {
        return tree.and_then(|tree| tree.nth(1)).or(Some(candidate));
    }
    Some(candidate)
}

/// Returns the first root of the tree.
#[must_use]
pub fn first_primary(tree: &ParticleTree) -> Option<ParticleId> {
    tree.primaries().first().copied()
}

// ============================================================================
// SECTION: Track Energy
// ============================================================================

/// Energy carried by tracks leaving the primary vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackEnergy {
    /// Summed total energy of track-like daughters.
    pub energy_track: f64,
    /// `1 - energy_track / primary.total_energy`; `None` when the primary
    /// total energy is zero or not finite.
    pub inelasticity: Option<f64>,
}

/// Daughters of `id` whose shape is a starting track or dark.
#[must_use]
pub fn track_daughters(tree: &ParticleTree, id: ParticleId) -> Vec<&Particle> {
    tree.daughters(id)
        .iter()
        .filter_map(|daughter| tree.get(*daughter))
        .filter(|particle| particle.shape.is_track_like())
        .collect()
}

/// Sums track energy below the first primary and derives inelasticity.
///
/// Returns `None` when the tree has no primary.
#[must_use]
pub fn track_energy(tree: &ParticleTree) -> Option<TrackEnergy> {
    let primary_id = first_primary(tree)?;
    let primary = tree.get(primary_id)?;
    let energy_track: f64 =
        track_daughters(tree, primary_id).iter().map(|track| track.total_energy).sum();
    let total = primary.total_energy;
    let inelasticity =
        (total.is_finite() && total != 0.0).then(|| 1.0 - energy_track / total);
    Some(TrackEnergy {
        energy_track,
        inelasticity,
    })
}

// ============================================================================
// SECTION: Double-Cascade Decay Length
// ============================================================================

/// Outcome of the double-cascade decay-length search.
#[derive(Debug, Clone, PartialEq)]
pub enum DecayLength {
    /// Distance between the hadronic cascade and the merged decay cascade (metres).
    Computed(f64),
    /// The event does not have a double-cascade topology.
    NotApplicable(&'static str),
    /// The topology looked like a double cascade but was malformed.
    Anomaly(String),
}

impl DecayLength {
    /// Returns the computed length or `padding`.
    #[must_use]
    pub const fn value_or(&self, padding: f64) -> f64 {
        match self {
            Self::Computed(length) => *length,
            Self::NotApplicable(_) | Self::Anomaly(_) => padding,
        }
    }
}

/// Cascade formed by merging the daughters of the decaying particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedCascade {
    /// Shared vertex of the merged daughters.
    pub pos: Position,
    /// Summed energy of the merged daughters.
    pub energy: f64,
    /// Number of daughters merged.
    pub parts: usize,
}

/// Merges particles sharing one vertex into a single cascade.
///
/// # Errors
///
/// Returns a description when the list is empty or the vertices differ.
pub fn merge_cascades(parts: &[&Particle]) -> Result<MergedCascade, String> {
    let Some(first) = parts.first() else {
        return Err("no cascades to merge".to_string());
    };
    let mut merged = MergedCascade {
        pos: first.pos,
        energy: first.energy,
        parts: 1,
    };
    for part in &parts[1 ..] {
        if part.pos != merged.pos {
            return Err(format!(
                "decay daughters do not share a vertex: ({}, {}, {}) vs ({}, {}, {})",
                merged.pos.x, merged.pos.y, merged.pos.z, part.pos.x, part.pos.y, part.pos.z
            ));
        }
        merged.energy += part.energy;
        merged.parts += 1;
    }
    Ok(merged)
}

/// Measures the decay length of a double-cascade event.
///
/// The first primary must have exactly two daughters: a hadronic cascade and
/// a decaying candidate. The candidate's daughters are merged into one cascade
/// and the distance between the two cascade vertices is returned.
#[must_use]
pub fn decay_length(tree: Option<&ParticleTree>) -> DecayLength {
    let Some(tree) = tree else {
        return DecayLength::NotApplicable("frame has no particle tree");
    };
    let Some(primary) = first_primary(tree) else {
        return DecayLength::NotApplicable("particle tree is empty");
    };
    let daughters = tree.daughters(primary);
    if daughters.len() != 2 {
        return DecayLength::NotApplicable("primary does not have exactly two daughters");
    }

    let mut hadronic = None;
    let mut candidate = None;
    for &id in daughters {
        let Some(particle) = tree.get(id) else {
            return DecayLength::Anomaly(format!("daughter slot {} missing", id.index()));
        };
        if particle.is_hadronic_cascade() {
            hadronic = Some(particle);
        } else {
            candidate = Some(id);
        }
    }

    let Some(candidate) = candidate else {
        return DecayLength::Anomaly("both primary daughters are hadronic cascades".to_string());
    };
    let decay_products: Vec<&Particle> =
        tree.daughters(candidate).iter().filter_map(|id| tree.get(*id)).collect();
    if decay_products.is_empty() {
        return DecayLength::NotApplicable("decay candidate has no daughters");
    }
    let Some(hadronic) = hadronic else {
        return DecayLength::Anomaly("no hadronic cascade among primary daughters".to_string());
    };
    match merge_cascades(&decay_products) {
        Ok(merged) => DecayLength::Computed(hadronic.pos.distance(&merged.pos)),
        Err(reason) => DecayLength::Anomaly(reason),
    }
}
