// crates/icetruth-core/src/interfaces/mod.rs
// ============================================================================
// Module: IceTruth Interfaces
// Description: Capability interfaces for extractors and detector-description loaders.
// Purpose: Define the contract surfaces between extraction and its collaborators.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! [`Extractor`] is the capability "turn one frame into a flat field map".
//! Implementations hold an [`ExtractionContext`] for the file pair currently
//! being processed and must fail with [`ExtractorError::MissingContext`] when
//! asked to extract before a context is set. [`GcdSource`] is the seam for the
//! external geometry/calibration loader.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::core::ExtractorName;
use crate::core::FieldMap;
use crate::core::FilePair;
use crate::core::Frame;
use crate::core::GcdContext;

// ============================================================================
// SECTION: Detector Description Source
// ============================================================================

/// Errors raised while loading a detector description.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GcdError {
    /// The description file could not be read.
    #[error("gcd io error: {0}")]
    Io(String),
    /// The description file exceeds the configured size limit.
    #[error("gcd file too large: {path} ({actual_bytes} > {max_bytes})")]
    TooLarge {
        /// Offending path.
        path: String,
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Observed size in bytes.
        actual_bytes: usize,
    },
    /// The description file could not be parsed.
    #[error("gcd parse error: {0}")]
    Parse(String),
    /// The description parsed but lacks required content.
    #[error("invalid gcd: {0}")]
    Invalid(String),
}

/// Loader for geometry and calibration frames of a GCD description.
pub trait GcdSource {
    /// Loads the geometry and calibration content of `gcd_file`.
    ///
    /// # Errors
    ///
    /// Returns [`GcdError`] when the description cannot be loaded.
    fn load(&self, gcd_file: &Path) -> Result<GcdContext, GcdError>;
}

// ============================================================================
// SECTION: Extraction Context
// ============================================================================

/// Immutable per-file-pair context handed to extractors.
///
/// # Invariants
/// - `gcd` was loaded from `files.gcd_file` and is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionContext {
    /// File pair the context was loaded for.
    pub files: FilePair,
    /// Detector geometry and calibration.
    pub gcd: Arc<GcdContext>,
}

impl ExtractionContext {
    /// Loads the context for a file pair.
    ///
    /// # Errors
    ///
    /// Returns [`GcdError`] when the GCD file cannot be loaded.
    pub fn load(files: FilePair, source: &dyn GcdSource) -> Result<Self, GcdError> {
        let gcd = source.load(&files.gcd_file)?;
        Ok(Self {
            files,
            gcd: Arc::new(gcd),
        })
    }
}

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Extractor errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractorError {
    /// Extraction was attempted before a context was set.
    #[error("extractor {extractor} has no context; call set_context first")]
    MissingContext {
        /// Extractor that was called.
        extractor: String,
    },
    /// Loading the context failed.
    #[error("extractor context error: {0}")]
    Context(#[from] GcdError),
    /// The frame lacks data every well-formed record carries.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
    /// An extractor with the same name is already registered.
    #[error("extractor already registered: {0}")]
    Duplicate(String),
}

/// Capability turning one frame into a flat field map.
pub trait Extractor {
    /// Stable name used to namespace output fields.
    fn name(&self) -> &ExtractorName;

    /// Replaces the held context with one for a new file pair.
    fn set_context(&mut self, context: ExtractionContext);

    /// Extracts fields from a frame using the held context.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::MissingContext`] when no context is set and
    /// [`ExtractorError::InvalidFrame`] for frames missing mandatory data.
    fn extract(&self, frame: &Frame) -> Result<FieldMap, ExtractorError>;

    /// Loads the context for `files` through `source` and installs it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Context`] when loading fails; the previous
    /// context is kept in that case.
    fn set_files(&mut self, files: FilePair, source: &dyn GcdSource) -> Result<(), ExtractorError> {
        let context = ExtractionContext::load(files, source)?;
        self.set_context(context);
        Ok(())
    }
}
