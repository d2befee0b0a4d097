// crates/icetruth-extractors/src/gcd.rs
// ============================================================================
// Module: JSON GCD Source
// Description: Detector description loader for JSON and YAML GCD exports.
// Purpose: Build an extraction context from a text export of a GCD file.
// Dependencies: icetruth-core, serde, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! [`JsonGcdSource`] reads a JSON (or YAML) export of a GCD file holding a
//! geometry frame and a calibration frame:
//!
//! ```json
//! {
//!   "geometry": {
//!     "omgeo": [{ "key": { "string": 1, "om": 1 }, "position": { "x": 0.0, "y": 0.0, "z": 0.0 } }]
//!   },
//!   "calibration": { "dom_cal": [{ "key": { "string": 1, "om": 1 }, "relative_dom_eff": 1.0 }] }
//! }
//! ```
//!
//! Reads are bounded by a byte limit so oversized inputs fail before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use icetruth_core::DomCalibration;
use icetruth_core::GcdContext;
use icetruth_core::GcdError;
use icetruth_core::GcdSource;
use icetruth_core::OmGeometry;
use serde::Deserialize;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default maximum GCD export size (64 MiB).
pub const DEFAULT_MAX_GCD_BYTES: usize = 64 * 1024 * 1024;

/// Configuration for the JSON GCD source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonGcdSourceConfig {
    /// Maximum file size allowed, in bytes.
    pub max_bytes: usize,
    /// Allow YAML parsing when the file extension is .yaml or .yml.
    pub allow_yaml: bool,
}

impl Default for JsonGcdSourceConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_GCD_BYTES,
            allow_yaml: true,
        }
    }
}

// ============================================================================
// SECTION: Wire Format
// ============================================================================

/// Top-level GCD export document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GcdDocument {
    /// Geometry frame content.
    geometry: Option<GeometryFrame>,
    /// Calibration frame content.
    calibration: Option<CalibrationFrame>,
}

/// Geometry frame export.
#[derive(Debug, Deserialize)]
struct GeometryFrame {
    /// Per-module positions.
    omgeo: Vec<OmGeometry>,
}

/// Calibration frame export.
#[derive(Debug, Deserialize)]
struct CalibrationFrame {
    /// Per-module calibration entries.
    dom_cal: Vec<DomCalibration>,
}

// ============================================================================
// SECTION: Source Implementation
// ============================================================================

/// GCD source reading JSON or YAML exports from disk.
#[derive(Debug, Clone, Default)]
pub struct JsonGcdSource {
    /// Source configuration, including size limits.
    config: JsonGcdSourceConfig,
}

impl JsonGcdSource {
    /// Creates a new JSON GCD source with the given configuration.
    #[must_use]
    pub const fn new(config: JsonGcdSourceConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &JsonGcdSourceConfig {
        &self.config
    }
}

impl GcdSource for JsonGcdSource {
    fn load(&self, gcd_file: &Path) -> Result<GcdContext, GcdError> {
        let content = read_file_limited(gcd_file, self.config.max_bytes)?;
        let document = parse_document(gcd_file, &content, self.config.allow_yaml)?;
        let Some(geometry) = document.geometry else {
            return Err(GcdError::Invalid("gcd file has no geometry frame".to_string()));
        };
        let Some(calibration) = document.calibration else {
            return Err(GcdError::Invalid("gcd file has no calibration frame".to_string()));
        };
        let context = GcdContext::new(geometry.omgeo, calibration.dom_cal);
        tracing::debug!(
            gcd_file = %gcd_file.display(),
            modules = context.module_count(),
            "loaded gcd context"
        );
        Ok(context)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, GcdError> {
    let file = File::open(path)
        .map_err(|err| GcdError::Io(format!("unable to open {}: {err}", path.display())))?;
    let mut buf = Vec::new();
    let limit = max_bytes.saturating_add(1);
    let limit = u64::try_from(limit)
        .map_err(|_| GcdError::Invalid("gcd size limit exceeds u64".to_string()))?;
    let mut handle = file.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|err| GcdError::Io(format!("unable to read {}: {err}", path.display())))?;
    if buf.len() > max_bytes {
        return Err(GcdError::TooLarge {
            path: path.display().to_string(),
            max_bytes,
            actual_bytes: buf.len(),
        });
    }
    Ok(buf)
}

/// Parses a JSON or YAML GCD export by file extension.
fn parse_document(path: &Path, content: &[u8], allow_yaml: bool) -> Result<GcdDocument, GcdError> {
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    let ext = ext.to_ascii_lowercase();
    if ext == "yaml" || ext == "yml" {
        if !allow_yaml {
            return Err(GcdError::Parse("yaml parsing is disabled".to_string()));
        }
        return serde_yaml::from_slice(content)
            .map_err(|err| GcdError::Parse(format!("invalid yaml: {err}")));
    }
    serde_json::from_slice(content).map_err(|err| GcdError::Parse(format!("invalid json: {err}")))
}
