// crates/icetruth-core/src/runtime/mod.rs
// ============================================================================
// Module: IceTruth Runtime Helpers
// Description: Geometry utilities and particle-tree traversal.
// Purpose: Pure computations shared by extractor implementations.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Runtime helpers are pure functions over core types. They perform no I/O and
//! hold no state, so extractors can call them freely per frame.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod geometry;
pub mod tree;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use geometry::fiducial_contains;
pub use geometry::in_vertical_range;
pub use geometry::polygon_contains;
pub use geometry::project;
pub use tree::DecayLength;
pub use tree::MergedCascade;
pub use tree::TrackEnergy;
pub use tree::decay_length;
pub use tree::first_primary;
pub use tree::merge_cascades;
pub use tree::resolve_primary;
pub use tree::track_daughters;
pub use tree::track_energy;
