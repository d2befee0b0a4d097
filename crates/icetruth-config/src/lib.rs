// crates/icetruth-config/src/lib.rs
// ============================================================================
// Module: IceTruth Config
// Description: Canonical configuration model and validation for icetruth.toml.
// Purpose: Keep config loading and limits in one crate shared by every binary.
// Dependencies: icetruth-core, serde, toml
// ============================================================================

//! ## Overview
//! Loads and validates `icetruth.toml`. Invalid configuration fails closed;
//! an absent default file yields the built-in defaults.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
