// crates/icetruth-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for frame streaming and option resolution.
// Purpose: Ensure line handling, size limits, and output shape are correct.
// Dependencies: icetruth-cli main helpers
// ============================================================================

//! ## Overview
//! Validates `extract_stream`, `read_frame_line`, and `truth_config` without
//! touching stdout.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Cursor;
use std::sync::Arc;

use icetruth_config::IceTruthConfig;
use icetruth_core::ExtractionContext;
use icetruth_core::FilePair;
use icetruth_core::GcdContext;
use icetruth_extractors::ExtractorCollection;
use icetruth_extractors::TruthExtractor;
use icetruth_extractors::TruthExtractorConfig;
use serde_json::Value;

use super::extract_stream;
use super::read_frame_line;
use super::truth_config;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const HEADER_FRAME: &str = r#"{"I3EventHeader": {"kind": "event_header", "value": {"run_id": 12, "sub_run_id": 0, "event_id": 5, "sub_event_id": 0, "sub_event_stream": "InIceSplit", "start_time": {"utc_daq_time": 99}}}}"#;

fn collection() -> ExtractorCollection {
    let mut collection = ExtractorCollection::new();
    collection.register(TruthExtractor::new(TruthExtractorConfig::default())).unwrap();
    collection.set_context(&ExtractionContext {
        files: FilePair::new("/data/exp/run_012.i3", "gcd.json"),
        gcd: Arc::new(GcdContext::default()),
    });
    collection
}

fn run(input: &str, max_frame_bytes: usize) -> Result<(usize, String), String> {
    let mut output = Vec::new();
    let frames = extract_stream(&collection(), Cursor::new(input), &mut output, max_frame_bytes)
        .map_err(|err| err.to_string())?;
    Ok((frames, String::from_utf8(output).unwrap()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn extract_stream_writes_one_record_per_frame() {
    let input = format!("{HEADER_FRAME}\n\n{HEADER_FRAME}\r\n");
    let (frames, output) = run(&input, 1024).unwrap();
    assert_eq!(frames, 2);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    let record: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["truth"]["RunID"], Value::from(12));
    assert_eq!(record["truth"]["event_time"], Value::from(99));
    assert_eq!(record["truth"]["energy"], Value::from(-1.0));
    assert_eq!(record["truth"].as_object().unwrap().len(), 29);
}

#[test]
fn extract_stream_reports_line_of_malformed_frame() {
    let input = format!("{HEADER_FRAME}\n{{not json}}\n");
    let err = run(&input, 1024).unwrap_err();
    assert!(err.starts_with("line 2: invalid frame"), "{err}");
}

#[test]
fn extract_stream_reports_frame_without_header() {
    let err = run("{}\n", 1024).unwrap_err();
    assert!(err.starts_with("line 1: invalid frame: missing I3EventHeader"), "{err}");
}

#[test]
fn extract_stream_rejects_oversized_frame() {
    let err = run(HEADER_FRAME, 16).unwrap_err();
    assert!(err.contains("frame exceeds size limit of 16 bytes"), "{err}");
}

#[test]
fn read_frame_line_handles_missing_trailing_newline() {
    let mut reader = Cursor::new("abc\ndef");
    let mut buf = Vec::new();
    assert!(read_frame_line(&mut reader, &mut buf, 8).unwrap());
    assert_eq!(buf, b"abc");
    assert!(read_frame_line(&mut reader, &mut buf, 8).unwrap());
    assert_eq!(buf, b"def");
    assert!(!read_frame_line(&mut reader, &mut buf, 8).unwrap());
}

#[test]
fn read_frame_line_allows_exact_limit() {
    let mut reader = Cursor::new("abcd\n");
    let mut buf = Vec::new();
    assert!(read_frame_line(&mut reader, &mut buf, 4).unwrap());
    assert_eq!(buf, b"abcd");
}

#[test]
fn read_frame_line_allows_exact_limit_with_crlf() {
    let mut reader = Cursor::new("abcd\r\nwxyz\r\n");
    let mut buf = Vec::new();
    assert!(read_frame_line(&mut reader, &mut buf, 4).unwrap());
    assert_eq!(buf, b"abcd");
    assert!(read_frame_line(&mut reader, &mut buf, 4).unwrap());
    assert_eq!(buf, b"wxyz");
    assert!(!read_frame_line(&mut reader, &mut buf, 4).unwrap());
}

#[test]
fn read_frame_line_rejects_one_byte_over_limit() {
    let mut reader = Cursor::new("abcde\n");
    let mut buf = Vec::new();
    assert!(read_frame_line(&mut reader, &mut buf, 4).is_err());
}

#[test]
fn truth_config_applies_padding_override() {
    let config = IceTruthConfig::default();
    let truth = truth_config(&config, Some(-999.0)).unwrap();
    assert_eq!(truth.padding_value.to_bits(), (-999.0f64).to_bits());
    assert_eq!(truth.name.as_str(), "truth");
    let truth = truth_config(&config, None).unwrap();
    assert_eq!(truth.padding_value.to_bits(), (-1.0f64).to_bits());
}

#[test]
fn truth_config_rejects_non_finite_padding() {
    let err = truth_config(&IceTruthConfig::default(), Some(f64::INFINITY)).unwrap_err();
    assert_eq!(err.to_string(), "--padding must be a finite number");
}
