// crates/icetruth-extractors/src/lib.rs
// ============================================================================
// Module: IceTruth Extractors
// Description: Built-in extractors, the extractor collection, and GCD loading.
// Purpose: Turn simulated detector frames into flat truth records.
// Dependencies: icetruth-core, serde, serde_json, serde_yaml, tracing
// ============================================================================

//! ## Overview
//! This crate ships the truth extractor, an ordered [`ExtractorCollection`]
//! that shares one context across its members, and a [`JsonGcdSource`] that
//! loads detector descriptions from JSON or YAML exports.
//! Invariants:
//! - Every truth record carries the full fixed schema.
//! - GCD reads are bounded by a configured byte limit.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod collection;
pub mod gcd;
pub mod truth;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use collection::ExtractorCollection;
pub use gcd::DEFAULT_MAX_GCD_BYTES;
pub use gcd::JsonGcdSource;
pub use gcd::JsonGcdSourceConfig;
pub use truth::DEFAULT_HORIZONTAL_PAD;
pub use truth::DEFAULT_VERTICAL_PAD;
pub use truth::ExtractionAnomaly;
pub use truth::TRUTH_EXTRACTOR_NAME;
pub use truth::TruthExtractor;
pub use truth::TruthExtractorConfig;
pub use truth::TruthReport;
