// crates/icetruth-extractors/src/truth.rs
// ============================================================================
// Module: Truth Extractor
// Description: Fixed-schema Monte-Carlo truth extraction for physics frames.
// Purpose: Produce one flat truth record per frame for ML training datasets.
// Dependencies: icetruth-core, tracing
// ============================================================================

//! ## Overview
//! The truth extractor always emits every field of [`TRUTH_FIELDS`]; values
//! that are absent or inapplicable carry the padding value. Extraction runs in
//! three steps:
//! 1. Header fields and simulation type, for every frame.
//! 2. Filter flags, only for the in-ice split stream.
//! 3. Monte-Carlo truth, only for non-noise simulation.
//!
//! For muon primaries the position fields hold the projected stopping point
//! rather than the interaction vertex, and `stopped_muon` reports whether that
//! point lies in the padded fiducial volume.
//! Invariants:
//! - The key set and order are identical for every frame.
//! - Extraction is a pure function of the frame and the held context.

// ============================================================================
// SECTION: Imports
// ============================================================================

use icetruth_core::DEFAULT_PADDING_VALUE;
use icetruth_core::DecayLength;
use icetruth_core::EventHeader;
use icetruth_core::ExtractionContext;
use icetruth_core::Extractor;
use icetruth_core::ExtractorError;
use icetruth_core::ExtractorName;
use icetruth_core::FiducialBorders;
use icetruth_core::FieldMap;
use icetruth_core::FieldValue;
use icetruth_core::Frame;
use icetruth_core::IN_ICE_SPLIT_STREAM;
use icetruth_core::Particle;
use icetruth_core::SimType;
use icetruth_core::TRUTH_FIELDS;
use icetruth_core::is_monte_carlo;
use icetruth_core::is_noise;
use icetruth_core::keys;
use icetruth_core::runtime::decay_length;
use icetruth_core::runtime::fiducial_contains;
use icetruth_core::runtime::project;
use icetruth_core::runtime::resolve_primary;
use icetruth_core::runtime::track_energy;
use tracing::debug;
use tracing::warn;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default extractor name.
pub const TRUTH_EXTRACTOR_NAME: &str = "truth";
/// Default horizontal exclusion distance for the stopped-muon test (metres).
pub const DEFAULT_HORIZONTAL_PAD: f64 = 100.0;
/// Default vertical exclusion distance for the stopped-muon test (metres).
pub const DEFAULT_VERTICAL_PAD: f64 = 100.0;

/// Filters read from the filter mask.
const FILTER_MASK_FIELDS: [&str; 4] =
    ["DeepCoreFilter_13", "CascadeFilter_13", "MuonFilter_13", "OnlineL2Filter_17"];
/// Filter read from a top-level flag when no filter mask exists.
const LEGACY_FILTER_FIELD: &str = "DeepCoreFilter_13";
/// Selection-level flags read from top-level frame keys.
const SELECTION_FIELDS: [&str; 5] =
    ["L3_oscNext_bool", "L4_oscNext_bool", "L5_oscNext_bool", "L6_oscNext_bool", "L7_oscNext_bool"];

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the truth extractor.
///
/// # Invariants
/// - `borders` are validated at construction of [`FiducialBorders`].
#[derive(Debug, Clone, PartialEq)]
pub struct TruthExtractorConfig {
    /// Extractor name used to namespace output.
    pub name: ExtractorName,
    /// Padding used by [`Extractor::extract`].
    pub padding_value: f64,
    /// Fiducial volume borders for the stopped-muon test.
    pub borders: FiducialBorders,
    /// Horizontal shrink applied to the outline.
    pub horizontal_pad: f64,
    /// Vertical shrink applied to each end of the depth range.
    pub vertical_pad: f64,
    /// Sub-event stream whose frames carry physics truth.
    pub in_ice_stream: String,
}

impl Default for TruthExtractorConfig {
    fn default() -> Self {
        Self {
            name: ExtractorName::from_static(TRUTH_EXTRACTOR_NAME),
            padding_value: DEFAULT_PADDING_VALUE,
            borders: FiducialBorders::default(),
            horizontal_pad: DEFAULT_HORIZONTAL_PAD,
            vertical_pad: DEFAULT_VERTICAL_PAD,
            in_ice_stream: IN_ICE_SPLIT_STREAM.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Extraction Report
// ============================================================================

/// Unexpected data shapes met while extracting, separate from plain absence.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionAnomaly {
    /// Double-cascade topology was malformed.
    DecayTopology(String),
    /// Primary total energy made inelasticity undefined.
    DegenerateInelasticity {
        /// Offending total energy.
        total_energy: f64,
    },
}

/// Truth record plus the anomalies met while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct TruthReport {
    /// Extracted fields.
    pub fields: FieldMap,
    /// Anomalies in encounter order.
    pub anomalies: Vec<ExtractionAnomaly>,
}

// ============================================================================
// SECTION: Truth Extractor
// ============================================================================

/// Extractor producing the fixed truth schema.
#[derive(Debug, Clone)]
pub struct TruthExtractor {
    /// Extractor configuration.
    config: TruthExtractorConfig,
    /// Context for the current file pair.
    context: Option<ExtractionContext>,
}

impl TruthExtractor {
    /// Creates a truth extractor without context.
    #[must_use]
    pub const fn new(config: TruthExtractorConfig) -> Self {
        Self {
            config,
            context: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &TruthExtractorConfig {
        &self.config
    }

    /// Returns the held context.
    #[must_use]
    pub const fn context(&self) -> Option<&ExtractionContext> {
        self.context.as_ref()
    }

    /// Extracts the truth record with an explicit padding value.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError`] when no context is set or the header is missing.
    pub fn extract_with_padding(
        &self,
        frame: &Frame,
        padding: f64,
    ) -> Result<FieldMap, ExtractorError> {
        self.extract_with_report(frame, padding).map(|report| report.fields)
    }

    /// Extracts the truth record and reports anomalies alongside it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError`] when no context is set or the header is missing.
    pub fn extract_with_report(
        &self,
        frame: &Frame,
        padding: f64,
    ) -> Result<TruthReport, ExtractorError> {
        let context = self.context.as_ref().ok_or_else(|| ExtractorError::MissingContext {
            extractor: self.config.name.to_string(),
        })?;
        let header = frame.event_header().ok_or_else(|| {
            ExtractorError::InvalidFrame(format!("missing {}", keys::EVENT_HEADER))
        })?;

        let is_mc = is_monte_carlo(frame);
        let sim_type = SimType::classify(is_mc, &context.files.event_file_text());
        let mut fields = FieldMap::padded(TRUTH_FIELDS, &FieldValue::Float(padding));
        write_header(&mut fields, header, sim_type);

        let mut anomalies = Vec::new();
        if header.sub_event_stream == self.config.in_ice_stream {
            write_filters(&mut fields, frame);
            if is_mc && !is_noise(frame) {
                self.write_monte_carlo(&mut fields, &mut anomalies, frame, padding);
            }
        }

        debug!(
            extractor = %self.config.name,
            run_id = header.run_id,
            event_id = header.event_id,
            sim_type = %sim_type,
            anomalies = anomalies.len(),
            "extracted truth record"
        );
        Ok(TruthReport {
            fields,
            anomalies,
        })
    }

    /// Writes primary, tree-derived, and muon stopping-point fields.
    fn write_monte_carlo(
        &self,
        fields: &mut FieldMap,
        anomalies: &mut Vec<ExtractionAnomaly>,
        frame: &Frame,
        padding: f64,
    ) {
        let Some(primary) = resolve_primary(frame) else {
            return;
        };
        write_primary(fields, primary);

        if let Some(value) = frame.dict_value(keys::MC_WEIGHT_DICT, keys::INTERACTION_TYPE) {
            fields.set("interaction_type", value);
        }
        if let Some(value) = frame.dict_value(keys::GENIE_RESULT_DICT, keys::GENIE_Y) {
            fields.set("elasticity", value);
        }

        if let Some(tracks) = frame.mc_tree().and_then(track_energy) {
            fields.set("energy_track", tracks.energy_track);
            if let Some(inelasticity) = tracks.inelasticity {
                fields.set("inelasticity", inelasticity);
            } else {
                let total_energy = frame
                    .mc_tree()
                    .and_then(|tree| tree.primaries().first().and_then(|id| tree.get(*id)))
                    .map_or(f64::NAN, |particle| particle.total_energy);
                warn!(
                    extractor = %self.config.name,
                    total_energy,
                    "inelasticity undefined for primary total energy"
                );
                anomalies.push(ExtractionAnomaly::DegenerateInelasticity {
                    total_energy,
                });
            }
        }

        let decay = decay_length(frame.mc_tree());
        if let DecayLength::Anomaly(reason) = &decay {
            debug!(extractor = %self.config.name, reason = %reason, "decay topology anomaly");
            anomalies.push(ExtractionAnomaly::DecayTopology(reason.clone()));
        }
        fields.set("dbang_decay_length", decay.value_or(padding));

        if primary.is_muon() {
            self.write_muon_endpoint(fields, primary);
        }
    }

    /// Replaces the vertex with the muon stopping point and flags containment.
    fn write_muon_endpoint(&self, fields: &mut FieldMap, muon: &Particle) {
        let end = project(muon.pos, muon.length, muon.dir);
        let stopped = fiducial_contains(
            end,
            &self.config.borders,
            self.config.horizontal_pad,
            self.config.vertical_pad,
        );
        fields.set("track_length", muon.length);
        fields.set("position_x", end.x);
        fields.set("position_y", end.y);
        fields.set("position_z", end.z);
        fields.set("stopped_muon", stopped);
    }
}

impl Extractor for TruthExtractor {
    fn name(&self) -> &ExtractorName {
        &self.config.name
    }

    fn set_context(&mut self, context: ExtractionContext) {
        self.context = Some(context);
    }

    fn extract(&self, frame: &Frame) -> Result<FieldMap, ExtractorError> {
        self.extract_with_padding(frame, self.config.padding_value)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes header-derived fields present on every frame.
fn write_header(fields: &mut FieldMap, header: &EventHeader, sim_type: SimType) {
    fields.set("event_time", header.start_time.utc_daq_time);
    fields.set("sim_type", sim_type.as_str());
    fields.set("RunID", i64::from(header.run_id));
    fields.set("SubrunID", i64::from(header.sub_run_id));
    fields.set("EventID", i64::from(header.event_id));
    fields.set("SubEventID", i64::from(header.sub_event_id));
}

/// Writes filter and selection flags from whichever source is present.
fn write_filters(fields: &mut FieldMap, frame: &Frame) {
    if let Some(mask) = frame.filter_mask() {
        for name in FILTER_MASK_FIELDS {
            if let Some(passed) = mask.get(name) {
                fields.set(name, *passed);
            }
        }
    } else if let Some(passed) = frame.flag(LEGACY_FILTER_FIELD) {
        fields.set(LEGACY_FILTER_FIELD, passed);
    }
    for name in SELECTION_FIELDS {
        if let Some(passed) = frame.flag(name) {
            fields.set(name, passed);
        }
    }
}

/// Writes kinematic fields of the primary particle.
fn write_primary(fields: &mut FieldMap, primary: &Particle) {
    fields.set("energy", primary.energy);
    fields.set("position_x", primary.pos.x);
    fields.set("position_y", primary.pos.y);
    fields.set("position_z", primary.pos.z);
    fields.set("azimuth", primary.dir.azimuth);
    fields.set("zenith", primary.dir.zenith);
    fields.set("pid", i64::from(primary.pdg_encoding));
}
