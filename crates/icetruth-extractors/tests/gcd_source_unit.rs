// crates/icetruth-extractors/tests/gcd_source_unit.rs
// ============================================================================
// Module: JSON GCD Source Tests
// Description: Tests for loading detector descriptions from JSON and YAML.
// Purpose: Validate parsing, size limits, and missing-frame handling.
// Dependencies: icetruth-core, icetruth-extractors, tempfile
// ============================================================================

//! ## Overview
//! Covers the JSON GCD source for:
//! - Happy path: JSON and YAML exports
//! - Boundary enforcement: file size limits
//! - Error handling: missing files, malformed content, absent frames

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use icetruth_core::ExtractionContext;
use icetruth_core::FilePair;
use icetruth_core::GcdError;
use icetruth_core::GcdSource;
use icetruth_core::OmKey;
use icetruth_core::Position;
use icetruth_extractors::JsonGcdSource;
use icetruth_extractors::JsonGcdSourceConfig;
use tempfile::tempdir;

const GCD_JSON: &str = r#"{
  "geometry": {
    "omgeo": [
      { "key": { "string": 36, "om": 1 }, "position": { "x": -34.88, "y": -44.72, "z": 496.03 } },
      { "key": { "string": 36, "om": 2 }, "position": { "x": -34.88, "y": -44.72, "z": 479.01 } }
    ]
  },
  "calibration": {
    "dom_cal": [
      { "key": { "string": 36, "om": 1 }, "relative_dom_eff": 1.35 }
    ]
  }
}"#;

// ============================================================================
// SECTION: Happy Path Tests
// ============================================================================

/// Tests that a JSON export yields geometry and calibration tables.
#[test]
fn loads_json_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gcd.json");
    fs::write(&path, GCD_JSON).unwrap();

    let context = JsonGcdSource::default().load(&path).unwrap();
    assert_eq!(context.module_count(), 2);
    assert_eq!(
        context.position(OmKey::new(36, 2)),
        Some(Position::new(-34.88, -44.72, 479.01))
    );
    assert_eq!(context.relative_dom_eff(OmKey::new(36, 1)), Some(1.35));
    assert_eq!(context.relative_dom_eff(OmKey::new(36, 2)), None);
}

/// Tests that YAML exports are parsed by extension.
#[test]
fn loads_yaml_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gcd.yaml");
    let yaml = "geometry:\n  omgeo:\n    - key: { string: 1, om: 60 }\n      \
                position: { x: 1.0, y: 2.0, z: -500.0 }\ncalibration:\n  dom_cal: []\n";
    fs::write(&path, yaml).unwrap();

    let context = JsonGcdSource::default().load(&path).unwrap();
    assert_eq!(context.position(OmKey::new(1, 60)), Some(Position::new(1.0, 2.0, -500.0)));
}

/// Tests that the context loader wires the file pair through.
#[test]
fn extraction_context_loads_through_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gcd.json");
    fs::write(&path, GCD_JSON).unwrap();

    let files = FilePair::new("/data/sim/genie/file.i3", &path);
    let context = ExtractionContext::load(files.clone(), &JsonGcdSource::default()).unwrap();
    assert_eq!(context.files, files);
    assert_eq!(context.gcd.module_count(), 2);
}

// ============================================================================
// SECTION: Error Tests
// ============================================================================

/// Tests that oversized files are rejected before parsing.
#[test]
fn rejects_oversized_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gcd.json");
    fs::write(&path, GCD_JSON).unwrap();

    let source = JsonGcdSource::new(JsonGcdSourceConfig {
        max_bytes: 16,
        ..JsonGcdSourceConfig::default()
    });
    let err = source.load(&path).unwrap_err();
    assert!(matches!(err, GcdError::TooLarge { max_bytes: 16, actual_bytes: 17, .. }));
}

/// Tests that YAML can be disabled.
#[test]
fn rejects_yaml_when_disabled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gcd.yml");
    fs::write(&path, "geometry: {omgeo: []}\ncalibration: {dom_cal: []}\n").unwrap();

    let source = JsonGcdSource::new(JsonGcdSourceConfig {
        allow_yaml: false,
        ..JsonGcdSourceConfig::default()
    });
    assert!(matches!(source.load(&path), Err(GcdError::Parse(_))));
}

/// Tests that a missing file is an io error.
#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = JsonGcdSource::default().load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, GcdError::Io(_)));
}

/// Tests that malformed JSON is a parse error.
#[test]
fn malformed_json_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gcd.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(JsonGcdSource::default().load(&path), Err(GcdError::Parse(_))));
}

/// Tests that exports without a calibration frame are invalid.
#[test]
fn missing_calibration_frame_is_invalid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gcd.json");
    fs::write(&path, r#"{"geometry": {"omgeo": []}}"#).unwrap();
    let err = JsonGcdSource::default().load(&path).unwrap_err();
    assert_eq!(err, GcdError::Invalid("gcd file has no calibration frame".to_string()));
}
