// crates/icetruth-core/src/core/frame.rs
// ============================================================================
// Module: Physics Frames
// Description: Keyed event records as delivered by the frame source.
// Purpose: Model one detector trigger as a read-only keyed container.
// Dependencies: serde, crate::core::particle
// ============================================================================

//! ## Overview
//! A [`Frame`] is the per-trigger record handed to extractors. It maps frame
//! keys to typed [`FrameObject`] values and supports presence checks and
//! lookups by key. Frames are owned by the caller for the duration of one
//! extraction call and are never mutated by extractors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::particle::Particle;
use crate::core::particle::ParticleTree;

// ============================================================================
// SECTION: Frame Keys
// ============================================================================

/// Canonical frame keys read by the truth extractor.
pub mod keys {
    /// Event header key.
    pub const EVENT_HEADER: &str = "I3EventHeader";
    /// Online filter result map key.
    pub const FILTER_MASK: &str = "FilterMask";
    /// Explicit in-ice primary particle key.
    pub const MC_IN_ICE_PRIMARY: &str = "MCInIcePrimary";
    /// Monte-Carlo particle tree key.
    pub const MC_TREE: &str = "I3MCTree";
    /// Neutrino generator weight dictionary key.
    pub const MC_WEIGHT_DICT: &str = "I3MCWeightDict";
    /// GENIE generator result dictionary key.
    pub const GENIE_RESULT_DICT: &str = "I3GENIEResultDict";
    /// Interaction type entry inside the weight dictionary.
    pub const INTERACTION_TYPE: &str = "InteractionType";
    /// Bjorken-y entry inside the GENIE result dictionary.
    pub const GENIE_Y: &str = "y";
}

/// Sub-event stream carrying reconstruction-quality pulses.
pub const IN_ICE_SPLIT_STREAM: &str = "InIceSplit";

// ============================================================================
// SECTION: Event Header
// ============================================================================

/// Detector clock time of the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DaqTime {
    /// Tenths of nanoseconds since the start of the UTC year.
    pub utc_daq_time: i64,
}

/// Header identifying a trigger within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHeader {
    /// Run identifier.
    pub run_id: u32,
    /// Sub-run identifier.
    pub sub_run_id: u32,
    /// Event identifier within the run.
    pub event_id: u32,
    /// Sub-event identifier within the event split.
    pub sub_event_id: u32,
    /// Name of the split stream that produced this sub-event.
    pub sub_event_stream: String,
    /// Trigger start time.
    pub start_time: DaqTime,
}

// ============================================================================
// SECTION: Frame Objects
// ============================================================================

/// Typed value stored under a frame key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FrameObject {
    /// Event header.
    EventHeader(EventHeader),
    /// Named filter decisions.
    FilterMask(BTreeMap<String, bool>),
    /// Boolean flag.
    Bool(bool),
    /// Single particle.
    Particle(Particle),
    /// Particle tree.
    ParticleTree(ParticleTree),
    /// Numeric dictionary.
    Dict(BTreeMap<String, f64>),
    /// Floating-point scalar.
    Float(f64),
    /// Integer scalar.
    Int(i64),
    /// Text scalar.
    Text(String),
}

// ============================================================================
// SECTION: Frame
// ============================================================================

/// One detector trigger's keyed data bundle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    /// Frame objects keyed by frame key.
    objects: BTreeMap<String, FrameObject>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
        }
    }

    /// Inserts or replaces an object, returning the frame for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, object: FrameObject) -> Self {
        self.insert(key, object);
        self
    }

    /// Inserts or replaces an object.
    pub fn insert(&mut self, key: impl Into<String>, object: FrameObject) {
        self.objects.insert(key.into(), object);
    }

    /// Returns true when the key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Looks up an object by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FrameObject> {
        self.objects.get(key)
    }

    /// Returns the event header when present.
    #[must_use]
    pub fn event_header(&self) -> Option<&EventHeader> {
        match self.get(keys::EVENT_HEADER) {
            Some(FrameObject::EventHeader(header)) => Some(header),
            _ => None,
        }
    }

    /// Returns the filter mask when present.
    #[must_use]
    pub fn filter_mask(&self) -> Option<&BTreeMap<String, bool>> {
        match self.get(keys::FILTER_MASK) {
            Some(FrameObject::FilterMask(mask)) => Some(mask),
            _ => None,
        }
    }

    /// Returns a boolean-like value, accepting integer flags as well.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(FrameObject::Bool(value)) => Some(*value),
            Some(FrameObject::Int(value)) => Some(*value != 0),
            _ => None,
        }
    }

    /// Returns a particle stored directly under `key`.
    #[must_use]
    pub fn particle(&self, key: &str) -> Option<&Particle> {
        match self.get(key) {
            Some(FrameObject::Particle(particle)) => Some(particle),
            _ => None,
        }
    }

    /// Returns the Monte-Carlo particle tree when present.
    #[must_use]
    pub fn mc_tree(&self) -> Option<&ParticleTree> {
        match self.get(keys::MC_TREE) {
            Some(FrameObject::ParticleTree(tree)) => Some(tree),
            _ => None,
        }
    }

    /// Looks up `entry` inside the numeric dictionary stored under `key`.
    #[must_use]
    pub fn dict_value(&self, key: &str, entry: &str) -> Option<f64> {
        match self.get(key) {
            Some(FrameObject::Dict(dict)) => dict.get(entry).copied(),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Frame Predicates
// ============================================================================

/// Returns true when the frame carries Monte-Carlo truth.
#[must_use]
pub fn is_monte_carlo(frame: &Frame) -> bool {
    frame.contains(keys::MC_IN_ICE_PRIMARY) || frame.contains(keys::MC_TREE)
}

/// Returns true when no primary energy can be read (pure noise simulation).
#[must_use]
pub fn is_noise(frame: &Frame) -> bool {
    let tree_has_entry = frame.mc_tree().is_some_and(|tree| tree.nth(0).is_some());
    let has_primary = frame.particle(keys::MC_IN_ICE_PRIMARY).is_some();
    !tree_has_entry && !has_primary
}
