// crates/icetruth-core/src/lib.rs
// ============================================================================
// Module: IceTruth Core Library
// Description: Public API surface for the IceTruth core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! IceTruth core turns simulated detector event records into flat truth
//! records for machine-learning datasets. It defines the frame and particle
//! model, the extractor capability interface, and the geometry and tree
//! helpers extractors build on. Detector descriptions are loaded through the
//! [`GcdSource`] seam; the core itself performs no I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ExtractionContext;
pub use interfaces::Extractor;
pub use interfaces::ExtractorError;
pub use interfaces::GcdError;
pub use interfaces::GcdSource;
pub use runtime::DecayLength;
pub use runtime::TrackEnergy;
