// crates/icetruth-extractors/src/collection.rs
// ============================================================================
// Module: Extractor Collection
// Description: Ordered set of extractors sharing one extraction context.
// Purpose: Broadcast context changes and gather per-extractor field maps.
// Dependencies: icetruth-core, tracing
// ============================================================================

//! ## Overview
//! The collection keeps extractors in registration order and guarantees unique
//! names, so each output field map can be namespaced by its extractor. A new
//! file pair is loaded once and the resulting context is shared by every
//! member.
//! Invariants:
//! - Extractor names are unique within the collection.
//! - `extract` output follows registration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use icetruth_core::ExtractionContext;
use icetruth_core::Extractor;
use icetruth_core::ExtractorError;
use icetruth_core::ExtractorName;
use icetruth_core::FilePair;
use icetruth_core::Frame;
use icetruth_core::GcdSource;
use icetruth_core::NamedFieldMap;
use tracing::debug;

// ============================================================================
// SECTION: Extractor Collection
// ============================================================================

/// Ordered collection of extractors.
///
/// # Invariants
/// - Extractor names are unique within the collection.
/// - Registered extractors are `Send + Sync` and stored behind trait objects.
#[derive(Default)]
pub struct ExtractorCollection {
    /// Extractors in registration order.
    extractors: Vec<Box<dyn Extractor + Send + Sync>>,
}

impl ExtractorCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Registers an extractor at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Duplicate`] when the name is already registered.
    pub fn register(
        &mut self,
        extractor: impl Extractor + Send + Sync + 'static,
    ) -> Result<(), ExtractorError> {
        self.register_boxed(Box::new(extractor))
    }

    /// Registers a boxed extractor at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Duplicate`] when the name is already registered.
    pub fn register_boxed(
        &mut self,
        extractor: Box<dyn Extractor + Send + Sync>,
    ) -> Result<(), ExtractorError> {
        if self.contains(extractor.name()) {
            return Err(ExtractorError::Duplicate(extractor.name().to_string()));
        }
        self.extractors.push(extractor);
        Ok(())
    }

    /// Returns true when an extractor with `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &ExtractorName) -> bool {
        self.extractors.iter().any(|extractor| extractor.name() == name)
    }

    /// Returns registered names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&ExtractorName> {
        self.extractors.iter().map(|extractor| extractor.name()).collect()
    }

    /// Number of registered extractors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Returns true when no extractor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Installs `context` on every member.
    pub fn set_context(&mut self, context: &ExtractionContext) {
        for extractor in &mut self.extractors {
            extractor.set_context(context.clone());
        }
    }

    /// Loads the context for `files` once and installs it on every member.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Context`] when loading fails; members keep
    /// their previous context in that case.
    pub fn set_files(
        &mut self,
        files: FilePair,
        source: &dyn GcdSource,
    ) -> Result<(), ExtractorError> {
        let context = ExtractionContext::load(files, source)?;
        debug!(
            event_file = %context.files.event_file.display(),
            gcd_file = %context.files.gcd_file.display(),
            extractors = self.extractors.len(),
            "installed extraction context"
        );
        self.set_context(&context);
        Ok(())
    }

    /// Runs every member on `frame` in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ExtractorError`] raised by a member.
    pub fn extract(&self, frame: &Frame) -> Result<Vec<NamedFieldMap>, ExtractorError> {
        self.extractors
            .iter()
            .map(|extractor| {
                Ok(NamedFieldMap {
                    name: extractor.name().clone(),
                    fields: extractor.extract(frame)?,
                })
            })
            .collect()
    }
}
