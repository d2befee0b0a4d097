// crates/icetruth-core/tests/tree_traversal_unit.rs
// ============================================================================
// Module: Particle Tree Traversal Tests
// Description: Tests for primary resolution, track energy, and decay length.
// Purpose: Validate tree-derived truth quantities on hand-built hierarchies.
// Dependencies: icetruth-core
// ============================================================================

//! ## Overview
//! Covers tree traversal for:
//! - Primary resolution order and the NaN-energy fallback
//! - Track energy over starting-track and dark daughters
//! - Double-cascade outcomes: computed, not applicable, anomalous

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use icetruth_core::DecayLength;
use icetruth_core::Direction;
use icetruth_core::Frame;
use icetruth_core::FrameObject;
use icetruth_core::HADRONS_PDG;
use icetruth_core::Particle;
use icetruth_core::ParticleShape;
use icetruth_core::ParticleTree;
use icetruth_core::Position;
use icetruth_core::keys;
use icetruth_core::runtime::decay_length;
use icetruth_core::runtime::merge_cascades;
use icetruth_core::runtime::resolve_primary;
use icetruth_core::runtime::track_energy;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn particle(pdg_encoding: i32, energy: f64, pos: Position, shape: ParticleShape) -> Particle {
    Particle {
        energy,
        total_energy: energy,
        pos,
        dir: Direction::default(),
        pdg_encoding,
        length: 0.0,
        shape,
    }
}

fn at(x: f64, y: f64, z: f64) -> Position {
    Position::new(x, y, z)
}

/// Primary with a hadronic cascade and a decaying candidate whose products
/// are placed at `products`.
fn double_cascade(products: &[Position]) -> ParticleTree {
    let origin = at(0.0, 0.0, 0.0);
    let mut tree = ParticleTree::new();
    let primary = tree.add_primary(particle(16, 50.0, origin, ParticleShape::Primary));
    tree.append_child(primary, particle(HADRONS_PDG, 10.0, origin, ParticleShape::Cascade))
        .unwrap();
    let tau = tree.append_child(primary, particle(15, 40.0, origin, ParticleShape::Null)).unwrap();
    for pos in products {
        tree.append_child(tau, particle(-211, 5.0, *pos, ParticleShape::Cascade)).unwrap();
    }
    tree
}

// ============================================================================
// SECTION: Primary Resolution
// ============================================================================

#[test]
fn explicit_primary_wins_over_tree() {
    let mut tree = ParticleTree::new();
    tree.add_primary(particle(14, 1.0, at(0.0, 0.0, 0.0), ParticleShape::Primary));
    let explicit = particle(12, 2.0, at(1.0, 1.0, 1.0), ParticleShape::Primary);
    let frame = Frame::new()
        .with(keys::MC_TREE, FrameObject::ParticleTree(tree))
        .with(keys::MC_IN_ICE_PRIMARY, FrameObject::Particle(explicit));
    assert_eq!(resolve_primary(&frame).unwrap().pdg_encoding, 12);
}

#[test]
fn nan_primary_without_second_entry_is_kept() {
    let mut tree = ParticleTree::new();
    tree.add_primary(particle(13, f64::NAN, at(0.0, 0.0, 0.0), ParticleShape::Primary));
    let frame = Frame::new().with(keys::MC_TREE, FrameObject::ParticleTree(tree));
    assert!(resolve_primary(&frame).unwrap().energy.is_nan());
}

#[test]
fn frame_without_truth_has_no_primary() {
    assert!(resolve_primary(&Frame::new()).is_none());
}

// ============================================================================
// SECTION: Track Energy
// ============================================================================

#[test]
fn track_energy_ignores_other_shapes_and_grandchildren() {
    let origin = at(0.0, 0.0, 0.0);
    let mut tree = ParticleTree::new();
    let primary = tree.add_primary(particle(14, 80.0, origin, ParticleShape::Primary));
    let track = tree
        .append_child(primary, particle(13, 20.0, origin, ParticleShape::StartingTrack))
        .unwrap();
    tree.append_child(primary, particle(13, 30.0, origin, ParticleShape::InfiniteTrack)).unwrap();
    tree.append_child(track, particle(13, 15.0, origin, ParticleShape::StartingTrack)).unwrap();

    let tracks = track_energy(&tree).unwrap();
    assert!((tracks.energy_track - 20.0).abs() < 1e-12);
    assert!((tracks.inelasticity.unwrap() - 0.75).abs() < 1e-12);
}

#[test]
fn track_energy_of_empty_tree_is_none() {
    assert!(track_energy(&ParticleTree::new()).is_none());
}

#[test]
fn non_finite_total_energy_has_no_inelasticity() {
    let mut tree = ParticleTree::new();
    tree.add_primary(particle(14, f64::INFINITY, at(0.0, 0.0, 0.0), ParticleShape::Primary));
    assert_eq!(track_energy(&tree).unwrap().inelasticity, None);
}

// ============================================================================
// SECTION: Decay Length
// ============================================================================

#[test]
fn decay_length_merges_products_at_one_vertex() {
    let vertex = at(0.0, 6.0, 8.0);
    let tree = double_cascade(&[vertex, vertex]);
    assert_eq!(decay_length(Some(&tree)), DecayLength::Computed(10.0));
}

#[test]
fn decay_length_without_tree_is_not_applicable() {
    assert!(matches!(decay_length(None), DecayLength::NotApplicable(_)));
}

#[test]
fn decay_length_of_empty_tree_is_not_applicable() {
    assert!(matches!(
        decay_length(Some(&ParticleTree::new())),
        DecayLength::NotApplicable(_)
    ));
}

#[test]
fn decay_length_without_products_is_not_applicable() {
    assert!(matches!(decay_length(Some(&double_cascade(&[]))), DecayLength::NotApplicable(_)));
}

#[test]
fn decay_length_with_split_vertices_is_anomalous() {
    let tree = double_cascade(&[at(1.0, 0.0, 0.0), at(2.0, 0.0, 0.0)]);
    assert!(matches!(decay_length(Some(&tree)), DecayLength::Anomaly(_)));
}

#[test]
fn two_hadronic_daughters_are_anomalous() {
    let origin = at(0.0, 0.0, 0.0);
    let mut tree = ParticleTree::new();
    let primary = tree.add_primary(particle(16, 50.0, origin, ParticleShape::Primary));
    for _ in 0 .. 2 {
        tree.append_child(primary, particle(HADRONS_PDG, 10.0, origin, ParticleShape::Cascade))
            .unwrap();
    }
    assert!(matches!(decay_length(Some(&tree)), DecayLength::Anomaly(_)));
}

#[test]
fn anomalies_and_skips_fall_back_to_padding() {
    assert!((DecayLength::Anomaly("x".to_string()).value_or(-1.0) + 1.0).abs() < f64::EPSILON);
    assert!((DecayLength::NotApplicable("x").value_or(-7.0) + 7.0).abs() < f64::EPSILON);
}

#[test]
fn merge_cascades_sums_energy() {
    let vertex = at(1.0, 2.0, 3.0);
    let a = particle(11, 1.5, vertex, ParticleShape::Cascade);
    let b = particle(-11, 2.5, vertex, ParticleShape::Cascade);
    let merged = merge_cascades(&[&a, &b]).unwrap();
    assert_eq!(merged.parts, 2);
    assert!((merged.energy - 4.0).abs() < 1e-12);
    assert_eq!(merged.pos, vertex);
    assert!(merge_cascades(&[]).is_err());
}
