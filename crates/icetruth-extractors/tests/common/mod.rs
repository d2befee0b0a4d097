// crates/icetruth-extractors/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Frame, particle, and context builders for extractor tests.
// Purpose: Keep integration tests focused on behavior rather than setup.
// Dependencies: icetruth-core, icetruth-extractors
// ============================================================================

//! ## Overview
//! Builders for frames shaped like detector output: event headers, particle
//! trees with double-cascade topologies, and muon primaries.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use icetruth_core::DaqTime;
use icetruth_core::Direction;
use icetruth_core::EventHeader;
use icetruth_core::ExtractionContext;
use icetruth_core::Extractor;
use icetruth_core::FilePair;
use icetruth_core::Frame;
use icetruth_core::FrameObject;
use icetruth_core::GcdContext;
use icetruth_core::HADRONS_PDG;
use icetruth_core::Particle;
use icetruth_core::ParticleShape;
use icetruth_core::ParticleTree;
use icetruth_core::Position;
use icetruth_core::keys;
use icetruth_extractors::TruthExtractor;
use icetruth_extractors::TruthExtractorConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Event file name that classifies as plain data.
pub const DATA_FILE: &str = "/data/exp/run_000123.i3";
/// Event file name that classifies as GENIE simulation.
pub const GENIE_FILE: &str = "/data/sim/genie/oscnext_140000.i3";
/// PDG code of the tau neutrino.
pub const NU_TAU_PDG: i32 = 16;
/// PDG code of the tau lepton.
pub const TAU_PDG: i32 = 15;

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Event header for `stream`.
pub fn header(stream: &str) -> EventHeader {
    EventHeader {
        run_id: 140_000,
        sub_run_id: 3,
        event_id: 17,
        sub_event_id: 0,
        sub_event_stream: stream.to_string(),
        start_time: DaqTime {
            utc_daq_time: 315_569_260_000_000_000,
        },
    }
}

/// Particle with the given code, energy, and vertex.
pub fn particle(pdg_encoding: i32, energy: f64, pos: Position) -> Particle {
    Particle {
        energy,
        total_energy: energy,
        pos,
        dir: Direction::new(0.5, 1.0),
        pdg_encoding,
        length: f64::NAN,
        shape: ParticleShape::Null,
    }
}

/// Muon starting at `pos` travelling `length` metres.
pub fn muon(pos: Position, length: f64, dir: Direction) -> Particle {
    Particle {
        energy: 25.0,
        total_energy: 25.1,
        pos,
        dir,
        pdg_encoding: -13,
        length,
        shape: ParticleShape::StartingTrack,
    }
}

/// Tau-neutrino tree with a hadronic cascade at the origin and a tau whose
/// decay products sit at `decay_vertex`.
pub fn double_bang_tree(decay_vertex: Position) -> ParticleTree {
    let origin = Position::new(0.0, 0.0, 0.0);
    let mut tree = ParticleTree::new();
    let primary = tree.add_primary(particle(NU_TAU_PDG, 100.0, origin));
    tree.append_child(primary, particle(HADRONS_PDG, 30.0, origin)).unwrap();
    let tau = tree.append_child(primary, particle(TAU_PDG, 70.0, origin)).unwrap();
    tree.append_child(tau, particle(HADRONS_PDG, 20.0, decay_vertex)).unwrap();
    tree.append_child(tau, particle(-211, 15.0, decay_vertex)).unwrap();
    tree
}

/// Frame holding a header for `stream` and nothing else.
pub fn header_frame(stream: &str) -> Frame {
    Frame::new().with(keys::EVENT_HEADER, FrameObject::EventHeader(header(stream)))
}

/// In-ice split simulation frame built around `tree`.
pub fn mc_frame(tree: ParticleTree) -> Frame {
    header_frame("InIceSplit")
        .with(keys::MC_TREE, FrameObject::ParticleTree(tree))
        .with(
            keys::MC_WEIGHT_DICT,
            FrameObject::Dict(BTreeMap::from([(keys::INTERACTION_TYPE.to_string(), 1.0)])),
        )
        .with(
            keys::GENIE_RESULT_DICT,
            FrameObject::Dict(BTreeMap::from([(keys::GENIE_Y.to_string(), 0.3)])),
        )
}

/// In-ice split frame whose explicit primary is `primary`.
pub fn primary_frame(primary: Particle) -> Frame {
    let mut tree = ParticleTree::new();
    tree.add_primary(primary.clone());
    mc_frame(tree).with(keys::MC_IN_ICE_PRIMARY, FrameObject::Particle(primary))
}

/// Extraction context for `event_file` with an empty detector description.
pub fn context(event_file: &str) -> ExtractionContext {
    ExtractionContext {
        files: FilePair::new(event_file, "/data/gcd/GeoCalibDetectorStatus.json"),
        gcd: Arc::new(GcdContext::default()),
    }
}

/// Truth extractor with default configuration and a context for `event_file`.
pub fn truth_extractor(event_file: &str) -> TruthExtractor {
    let mut extractor = TruthExtractor::new(TruthExtractorConfig::default());
    extractor.set_context(context(event_file));
    extractor
}
