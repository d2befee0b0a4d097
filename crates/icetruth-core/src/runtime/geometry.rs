// crates/icetruth-core/src/runtime/geometry.rs
// ============================================================================
// Module: Fiducial Geometry
// Description: Padded polygon containment, depth intervals, and track projection.
// Purpose: Decide where a track ends and whether that point is fiducial.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Containment uses signed padding. A positive pad erodes the region: a point
//! must lie inside and farther than `pad` from every edge. A negative pad
//! dilates it: points outside but within `|pad|` of an edge count as inside.
//! This matches offsetting the outline by `-pad` and is independent of the
//! polygon's winding order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Direction;
use crate::core::FiducialBorders;
use crate::core::Polygon;
use crate::core::Position;

// ============================================================================
// SECTION: Polygon Containment
// ============================================================================

/// Returns true when `point` lies inside `polygon` shrunk by `pad`.
#[must_use]
pub fn polygon_contains(point: [f64; 2], polygon: &Polygon, pad: f64) -> bool {
    let inside = crosses_odd(point, polygon);
    if pad == 0.0 {
        return inside;
    }
    let clearance = boundary_distance(point, polygon);
    if pad > 0.0 { inside && clearance > pad } else { inside || clearance < -pad }
}

/// Even-odd ray-casting test against the polygon boundary.
fn crosses_odd(point: [f64; 2], polygon: &Polygon) -> bool {
    let [px, py] = point;
    let mut inside = false;
    for ([x1, y1], [x2, y2]) in polygon.edges() {
        if (y1 > py) != (y2 > py) {
            let x_cross = (x2 - x1) * (py - y1) / (y2 - y1) + x1;
            if px < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Shortest distance from `point` to any polygon edge.
fn boundary_distance(point: [f64; 2], polygon: &Polygon) -> f64 {
    polygon
        .edges()
        .map(|(start, end)| segment_distance(point, start, end))
        .fold(f64::INFINITY, f64::min)
}

/// Distance from `point` to the segment `start..end`.
fn segment_distance(point: [f64; 2], start: [f64; 2], end: [f64; 2]) -> f64 {
    let (dx, dy) = (end[0] - start[0], end[1] - start[1]);
    let length_sq = dx.mul_add(dx, dy * dy);
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((point[0] - start[0]) * dx + (point[1] - start[1]) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (t.mul_add(dx, start[0]), t.mul_add(dy, start[1]));
    (point[0] - cx).hypot(point[1] - cy)
}

// ============================================================================
// SECTION: Depth Interval
// ============================================================================

/// Returns true iff `z_min + pad < z < z_max - pad`.
#[must_use]
pub fn in_vertical_range(z: f64, z_min: f64, z_max: f64, pad: f64) -> bool {
    z > z_min + pad && z < z_max - pad
}

// ============================================================================
// SECTION: Projection
// ============================================================================

/// Point reached by travelling `length` from `origin` along the particle direction.
///
/// The direction stores where the particle came from, so travel is opposite
/// to the unit vector built from azimuth and zenith.
#[must_use]
pub fn project(origin: Position, length: f64, direction: Direction) -> Position {
    let (sin_az, cos_az) = direction.azimuth.sin_cos();
    let (sin_zen, cos_zen) = direction.zenith.sin_cos();
    Position::new(
        origin.x - length * cos_az * sin_zen,
        origin.y - length * sin_az * sin_zen,
        origin.z - length * cos_zen,
    )
}

// ============================================================================
// SECTION: Fiducial Volume
// ============================================================================

/// Returns true when `point` lies inside the padded fiducial volume.
#[must_use]
pub fn fiducial_contains(
    point: Position,
    borders: &FiducialBorders,
    horizontal_pad: f64,
    vertical_pad: f64,
) -> bool {
    polygon_contains([point.x, point.y], borders.xy(), horizontal_pad)
        && in_vertical_range(point.z, borders.z_min(), borders.z_max(), vertical_pad)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
