// crates/icetruth-core/src/core/mod.rs
// ============================================================================
// Module: IceTruth Core Types
// Description: Frames, particles, detector context, and output records.
// Purpose: Provide stable, serializable types shared by every extractor.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types describe what extractors read (frames, particle trees, detector
//! context, fiducial borders) and what they produce (ordered field maps).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod detector;
pub mod fiducial;
pub mod fields;
pub mod frame;
pub mod identifiers;
pub mod particle;
pub mod sim_type;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use detector::DomCalibration;
pub use detector::FilePair;
pub use detector::GcdContext;
pub use detector::OmGeometry;
pub use fiducial::DEFAULT_BORDER_XY;
pub use fiducial::DEFAULT_BORDER_Z;
pub use fiducial::FiducialBorders;
pub use fiducial::GeometryError;
pub use fiducial::Polygon;
pub use fields::DEFAULT_PADDING_VALUE;
pub use fields::FieldMap;
pub use fields::FieldValue;
pub use fields::NamedFieldMap;
pub use fields::TRUTH_FIELDS;
pub use frame::DaqTime;
pub use frame::EventHeader;
pub use frame::Frame;
pub use frame::FrameObject;
pub use frame::IN_ICE_SPLIT_STREAM;
pub use frame::is_monte_carlo;
pub use frame::is_noise;
pub use frame::keys;
pub use identifiers::ExtractorName;
pub use identifiers::OmKey;
pub use particle::Direction;
pub use particle::HADRONS_PDG;
pub use particle::MUON_PDG;
pub use particle::Particle;
pub use particle::ParticleId;
pub use particle::ParticleShape;
pub use particle::ParticleTree;
pub use particle::Position;
pub use particle::TreeError;
pub use particle::TreeNode;
pub use sim_type::SimType;
