//! Fiducial geometry property-based tests.
//!
//! ## Purpose
//! These tests check padded containment and track projection against their
//! geometric definitions using randomized points, pads, and directions.
//!
//! ## What is covered
//! - Growing the pad never admits a point that a smaller pad rejected.
//! - Containment does not depend on vertex winding order.
//! - Projection preserves distance and inverts with the opposite direction.
// crates/icetruth-core/tests/proptest_geometry.rs
// ============================================================================
// Module: Geometry Property-Based Tests
// Description: Randomized checks for containment and projection.
// Purpose: Ensure geometry helpers are monotone, symmetric, and panic-free.
// ============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::f64::consts::PI;

use icetruth_core::DEFAULT_BORDER_XY;
use icetruth_core::Direction;
use icetruth_core::FiducialBorders;
use icetruth_core::Polygon;
use icetruth_core::Position;
use icetruth_core::runtime::fiducial_contains;
use icetruth_core::runtime::polygon_contains;
use icetruth_core::runtime::project;
use proptest::prelude::*;

fn detector_outline() -> Polygon {
    Polygon::new(DEFAULT_BORDER_XY.to_vec()).unwrap()
}

proptest! {
    #[test]
    fn larger_pad_never_admits_more(
        x in -700.0f64 .. 700.0,
        y in -700.0f64 .. 700.0,
        pad in -200.0f64 .. 200.0,
        extra in 0.0f64 .. 100.0,
    ) {
        let outline = detector_outline();
        if polygon_contains([x, y], &outline, pad + extra) {
            prop_assert!(polygon_contains([x, y], &outline, pad));
        }
    }

    #[test]
    fn winding_order_is_irrelevant(
        x in -700.0f64 .. 700.0,
        y in -700.0f64 .. 700.0,
        pad in -150.0f64 .. 150.0,
    ) {
        let outline = detector_outline();
        let mut reversed = DEFAULT_BORDER_XY.to_vec();
        reversed.reverse();
        let reversed = Polygon::new(reversed).unwrap();
        prop_assert_eq!(
            polygon_contains([x, y], &outline, pad),
            polygon_contains([x, y], &reversed, pad)
        );
    }

    #[test]
    fn projection_preserves_length(
        length in 0.0f64 .. 2000.0,
        azimuth in 0.0f64 .. (2.0 * PI),
        zenith in 0.0f64 .. PI,
    ) {
        let origin = Position::new(10.0, -20.0, 30.0);
        let direction = Direction::new(azimuth, zenith);
        let end = project(origin, length, direction);
        prop_assert!((origin.distance(&end) - length).abs() < 1e-6);
        let back = project(end, -length, direction);
        prop_assert!(back.distance(&origin) < 1e-6);
    }

    #[test]
    fn points_above_the_volume_are_never_fiducial(
        x in -100.0f64 .. 100.0,
        y in -100.0f64 .. 100.0,
        z in 425.0f64 .. 2000.0,
    ) {
        let borders = FiducialBorders::default();
        prop_assert!(!fiducial_contains(Position::new(x, y, z), &borders, 100.0, 100.0));
    }
}
