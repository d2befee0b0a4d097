// crates/icetruth-config/src/config.rs
// ============================================================================
// Module: IceTruth Configuration
// Description: Configuration loading and validation for truth extraction.
// Purpose: Provide strict TOML parsing with hard limits and typed accessors.
// Dependencies: icetruth-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with size and path limits. The
//! path comes from the caller, then the `ICETRUTH_CONFIG` environment
//! variable, then `icetruth.toml` in the working directory. Only the last of
//! these may be absent; a missing default file yields the defaults.
//! Invariants:
//! - A value returned by [`IceTruthConfig::load`] has passed
//!   [`IceTruthConfig::validate`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use icetruth_core::DEFAULT_BORDER_XY;
use icetruth_core::DEFAULT_BORDER_Z;
use icetruth_core::DEFAULT_PADDING_VALUE;
use icetruth_core::ExtractorName;
use icetruth_core::FiducialBorders;
use icetruth_core::IN_ICE_SPLIT_STREAM;
use icetruth_core::Polygon;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "icetruth.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "ICETRUTH_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for `limits.max_gcd_bytes` (1 GiB).
pub(crate) const MAX_GCD_BYTES_CEILING: usize = 1024 * 1024 * 1024;
/// Upper bound for `limits.max_frame_bytes` (256 MiB).
pub(crate) const MAX_FRAME_BYTES_CEILING: usize = 256 * 1024 * 1024;
/// Maximum length of the extractor name.
pub(crate) const MAX_NAME_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Top-level `icetruth.toml` configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IceTruthConfig {
    /// Truth extractor settings.
    #[serde(default)]
    pub truth: TruthConfig,
    /// Fiducial volume used by the stopped-muon test.
    #[serde(default)]
    pub fiducial: FiducialConfig,
    /// Input size limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl IceTruthConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.truth.validate()?;
        self.fiducial.borders()?;
        self.limits.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Truth Settings
// ============================================================================

/// `[truth]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthConfig {
    /// Extractor name used to namespace output.
    #[serde(default = "default_truth_name")]
    pub name: String,
    /// Value written for absent or inapplicable fields.
    #[serde(default = "default_padding_value")]
    pub padding_value: f64,
    /// Horizontal shrink of the fiducial outline (metres).
    #[serde(default = "default_pad")]
    pub horizontal_pad: f64,
    /// Vertical shrink of each end of the depth range (metres).
    #[serde(default = "default_pad")]
    pub vertical_pad: f64,
    /// Split stream whose frames carry physics truth.
    #[serde(default = "default_in_ice_stream")]
    pub in_ice_stream: String,
}

impl Default for TruthConfig {
    fn default() -> Self {
        Self {
            name: default_truth_name(),
            padding_value: default_padding_value(),
            horizontal_pad: default_pad(),
            vertical_pad: default_pad(),
            in_ice_stream: default_in_ice_stream(),
        }
    }
}

impl TruthConfig {
    /// Returns the validated extractor name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the name is blank or too long.
    pub fn extractor_name(&self) -> Result<ExtractorName, ConfigError> {
        if self.name.len() > MAX_NAME_LENGTH {
            return Err(ConfigError::Invalid("truth.name exceeds max length".to_string()));
        }
        ExtractorName::new(self.name.clone())
            .ok_or_else(|| ConfigError::Invalid("truth.name must be non-empty".to_string()))
    }

    /// Validates the truth section.
    fn validate(&self) -> Result<(), ConfigError> {
        self.extractor_name()?;
        require_finite("truth.padding_value", self.padding_value)?;
        require_finite("truth.horizontal_pad", self.horizontal_pad)?;
        require_finite("truth.vertical_pad", self.vertical_pad)?;
        if self.in_ice_stream.trim().is_empty() {
            return Err(ConfigError::Invalid("truth.in_ice_stream must be non-empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Fiducial Settings
// ============================================================================

/// `[fiducial]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiducialConfig {
    /// Horizontal outline vertices `[x, y]` in order.
    #[serde(default = "default_border_xy")]
    pub border_xy: Vec<[f64; 2]>,
    /// Depth range `[z_min, z_max]`.
    #[serde(default = "default_z_range")]
    pub z_range: [f64; 2],
}

impl Default for FiducialConfig {
    fn default() -> Self {
        Self {
            border_xy: default_border_xy(),
            z_range: default_z_range(),
        }
    }
}

impl FiducialConfig {
    /// Builds validated fiducial borders.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the outline or depth range is malformed.
    pub fn borders(&self) -> Result<FiducialBorders, ConfigError> {
        let polygon = Polygon::new(self.border_xy.clone())
            .map_err(|err| ConfigError::Invalid(format!("fiducial.border_xy: {err}")))?;
        let [z_min, z_max] = self.z_range;
        FiducialBorders::new(polygon, z_min, z_max)
            .map_err(|err| ConfigError::Invalid(format!("fiducial.z_range: {err}")))
    }
}

// ============================================================================
// SECTION: Limits
// ============================================================================

/// `[limits]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum GCD export size in bytes.
    #[serde(default = "default_max_gcd_bytes")]
    pub max_gcd_bytes: usize,
    /// Maximum size of a single serialized frame in bytes.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_gcd_bytes: default_max_gcd_bytes(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl LimitsConfig {
    /// Validates the limits section.
    fn validate(&self) -> Result<(), ConfigError> {
        require_bounded("limits.max_gcd_bytes", self.max_gcd_bytes, MAX_GCD_BYTES_CEILING)?;
        require_bounded("limits.max_frame_bytes", self.max_frame_bytes, MAX_FRAME_BYTES_CEILING)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment.
///
/// Returns `None` when neither names a file and the default file is absent.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default.is_file().then_some(default))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Rejects NaN and infinite values.
fn require_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must be finite")))
    }
}

/// Requires `1 <= value <= ceiling`.
fn require_bounded(field: &str, value: usize, ceiling: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
    }
    if value > ceiling {
        return Err(ConfigError::Invalid(format!("{field} must be at most {ceiling}")));
    }
    Ok(())
}

/// Default extractor name.
fn default_truth_name() -> String {
    "truth".to_string()
}

/// Default padding value.
const fn default_padding_value() -> f64 {
    DEFAULT_PADDING_VALUE
}

/// Default horizontal and vertical pad.
const fn default_pad() -> f64 {
    100.0
}

/// Default in-ice split stream name.
fn default_in_ice_stream() -> String {
    IN_ICE_SPLIT_STREAM.to_string()
}

/// Default fiducial outline.
fn default_border_xy() -> Vec<[f64; 2]> {
    DEFAULT_BORDER_XY.to_vec()
}

/// Default depth range.
const fn default_z_range() -> [f64; 2] {
    [DEFAULT_BORDER_Z.0, DEFAULT_BORDER_Z.1]
}

/// Default GCD size limit (64 MiB).
const fn default_max_gcd_bytes() -> usize {
    64 * 1024 * 1024
}

/// Default frame size limit (16 MiB).
const fn default_max_frame_bytes() -> usize {
    16 * 1024 * 1024
}
