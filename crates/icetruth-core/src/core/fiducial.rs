// crates/icetruth-core/src/core/fiducial.rs
// ============================================================================
// Module: Fiducial Borders
// Description: Horizontal outline and vertical extent of the fiducial volume.
// Purpose: Carry detector borders as injected data with a documented default.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`FiducialBorders`] pairs a closed 2-D polygon (the horizontal detector
//! outline) with a `(z_min, z_max)` depth range. The default is the 28-vertex
//! in-ice outline with the range `[-512.82, 524.56]` metres. Borders are
//! validated at construction and immutable afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Default Outline
// ============================================================================

/// Default horizontal detector outline, closed implicitly.
pub const DEFAULT_BORDER_XY: [[f64; 2]; 28] = [
    [-256.140_014_648_437_5, -521.080_017_089_843_8],
    [-132.800_003_051_757_8, -501.450_012_207_031_25],
    [-9.130_000_114_440_92, -481.739_990_234_375],
    [114.389_999_389_648_44, -461.989_990_234_375],
    [237.779_998_779_296_88, -442.420_013_427_734_4],
    [361.0, -422.829_986_572_265_6],
    [405.829_986_572_265_6, -306.380_004_882_812_5],
    [443.600_006_103_515_6, -194.160_003_662_109_38],
    [500.429_992_675_781_25, -58.450_000_762_939_45],
    [544.070_007_324_218_8, 55.889_999_389_648_44],
    [576.369_995_117_187_5, 170.919_998_168_945_3],
    [505.269_989_013_671_9, 257.880_004_882_812_5],
    [429.760_009_765_625, 351.019_989_013_671_9],
    [338.440_002_441_406_25, 463.720_001_220_703_1],
    [224.580_001_831_054_7, 432.350_006_103_515_6],
    [101.040_000_915_527_34, 412.790_008_544_921_9],
    [22.110_000_610_351_56, 509.5],
    [-101.059_997_558_593_75, 490.220_001_220_703_1],
    [-224.089_996_337_890_62, 470.859_985_351_562_5],
    [-347.880_004_882_812_5, 451.519_989_013_671_9],
    [-392.380_004_882_812_5, 334.239_990_234_375],
    [-437.040_008_544_921_9, 217.800_003_051_757_8],
    [-481.600_006_103_515_6, 101.389_999_389_648_44],
    [-526.630_004_882_812_5, -15.600_000_381_469_73],
    [-570.900_024_414_062_5, -125.139_999_389_648_44],
    [-492.429_992_675_781_25, -230.160_003_662_109_38],
    [-413.459_991_455_078_1, -327.269_989_013_671_9],
    [-334.799_987_792_968_75, -424.5],
];

/// Default vertical extent `(z_min, z_max)` in metres.
pub const DEFAULT_BORDER_Z: (f64, f64) = (-512.82, 524.56);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised for malformed fiducial borders.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Polygon has fewer than three vertices.
    #[error("fiducial polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    /// A coordinate is NaN or infinite.
    #[error("fiducial border coordinate must be finite")]
    NonFinite,
    /// Vertical range is empty or inverted.
    #[error("fiducial z range must satisfy z_min < z_max")]
    InvalidDepthRange,
}

// ============================================================================
// SECTION: Polygon
// ============================================================================

/// Simple polygon given as an ordered ring of `(x, y)` vertices.
///
/// # Invariants
/// - At least three vertices, all finite.
/// - The closing edge from the last to the first vertex is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct Polygon {
    /// Ordered vertices.
    vertices: Vec<[f64; 2]>,
}

impl Polygon {
    /// Builds a polygon from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] when fewer than three or non-finite vertices are given.
    pub fn new(vertices: Vec<[f64; 2]>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if vertices.iter().flatten().any(|value| !value.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        Ok(Self {
            vertices,
        })
    }

    /// Returns the vertices.
    #[must_use]
    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    /// Iterates over edges as `(start, end)` pairs including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = ([f64; 2], [f64; 2])> + '_ {
        let count = self.vertices.len();
        (0 .. count).map(move |index| (self.vertices[index], self.vertices[(index + 1) % count]))
    }
}

impl TryFrom<Vec<[f64; 2]>> for Polygon {
    type Error = GeometryError;

    fn try_from(vertices: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<[f64; 2]> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

// ============================================================================
// SECTION: Fiducial Borders
// ============================================================================

/// Horizontal outline plus vertical extent of the fiducial volume.
///
/// # Invariants
/// - `z_min < z_max`, both finite, on every construction path including serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFiducialBorders")]
pub struct FiducialBorders {
    /// Horizontal outline.
    xy: Polygon,
    /// Lower depth bound.
    z_min: f64,
    /// Upper depth bound.
    z_max: f64,
}

impl FiducialBorders {
    /// Builds borders from an outline and a depth range.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDepthRange`] unless `z_min < z_max` with finite bounds.
    pub fn new(xy: Polygon, z_min: f64, z_max: f64) -> Result<Self, GeometryError> {
        if !z_min.is_finite() || !z_max.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if z_min >= z_max {
            return Err(GeometryError::InvalidDepthRange);
        }
        Ok(Self {
            xy,
            z_min,
            z_max,
        })
    }

    /// Horizontal outline.
    #[must_use]
    pub const fn xy(&self) -> &Polygon {
        &self.xy
    }

    /// Lower depth bound.
    #[must_use]
    pub const fn z_min(&self) -> f64 {
        self.z_min
    }

    /// Upper depth bound.
    #[must_use]
    pub const fn z_max(&self) -> f64 {
        self.z_max
    }
}

/// Unvalidated wire form of [`FiducialBorders`].
#[derive(Deserialize)]
struct RawFiducialBorders {
    /// Horizontal outline.
    xy: Polygon,
    /// Lower depth bound.
    z_min: f64,
    /// Upper depth bound.
    z_max: f64,
}

impl TryFrom<RawFiducialBorders> for FiducialBorders {
    type Error = GeometryError;

    fn try_from(raw: RawFiducialBorders) -> Result<Self, Self::Error> {
        Self::new(raw.xy, raw.z_min, raw.z_max)
    }
}

impl Default for FiducialBorders {
    fn default() -> Self {
        Self {
            xy: Polygon {
                vertices: DEFAULT_BORDER_XY.to_vec(),
            },
            z_min: DEFAULT_BORDER_Z.0,
            z_max: DEFAULT_BORDER_Z.1,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
