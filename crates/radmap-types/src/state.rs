// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Survey State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Survey samples, grid geometry and the interpolated dose field.

use crate::config::InterpolationMethod;
use crate::error::{RadMapError, RadMapResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One dose-rate measurement at a planar position.
///
/// Immutable once ingested. Metadata is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyPoint {
    /// X position (m, planar projection).
    pub x: f64,
    /// Y position (m).
    pub y: f64,
    /// Measured dose rate (µSv/hr), non-negative.
    pub dose_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SurveyPoint {
    /// Create a sample, rejecting non-finite coordinates and negative doses.
    pub fn new(x: f64, y: f64, dose_rate: f64) -> RadMapResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "sample position must be finite: ({x}, {y})"
            )));
        }
        if !dose_rate.is_finite() || dose_rate < 0.0 {
            return Err(RadMapError::ConfigError(format!(
                "dose_rate must be finite and non-negative, got {dose_rate}"
            )));
        }
        Ok(SurveyPoint {
            x,
            y,
            dose_rate,
            source_id: None,
            timestamp: None,
        })
    }
}

/// Regular query lattice over the survey area.
///
/// `nx * ny` nodes, row-major `[ny, nx]` indexing to match the dose field
/// array layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub nx: usize,
    pub ny: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub dx: f64,
    pub dy: f64,
}

impl GridSpec {
    pub fn new(
        nx: usize,
        ny: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> RadMapResult<Self> {
        if nx < 2 || ny < 2 {
            return Err(RadMapError::ConfigError(format!(
                "grid needs at least 2 nodes per axis, got {nx}x{ny}"
            )));
        }
        if !(x_max > x_min) || !(y_max > y_min) {
            return Err(RadMapError::ConfigError(format!(
                "degenerate grid extent: x [{x_min}, {x_max}], y [{y_min}, {y_max}]"
            )));
        }
        let dx = (x_max - x_min) / (nx - 1) as f64;
        let dy = (y_max - y_min) / (ny - 1) as f64;
        Ok(GridSpec {
            nx,
            ny,
            x_min,
            x_max,
            y_min,
            y_max,
            dx,
            dy,
        })
    }

    /// Build a grid covering the sample bounding box plus a buffer margin,
    /// at roughly `cell_size` node spacing.
    pub fn from_samples(
        samples: &[SurveyPoint],
        cell_size: f64,
        buffer: f64,
    ) -> RadMapResult<Self> {
        if samples.is_empty() {
            return Err(RadMapError::EmptySurvey);
        }
        if !(cell_size > 0.0) {
            return Err(RadMapError::ConfigError(format!(
                "cell_size must be positive, got {cell_size}"
            )));
        }
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for p in samples {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
        x_min -= buffer;
        x_max += buffer;
        y_min -= buffer;
        y_max += buffer;
        // Degenerate spans (single sample, or all samples collinear with an
        // axis) still get a usable 2D grid.
        if x_max - x_min < cell_size {
            x_min -= cell_size;
            x_max += cell_size;
        }
        if y_max - y_min < cell_size {
            y_min -= cell_size;
            y_max += cell_size;
        }
        let nx = ((x_max - x_min) / cell_size).ceil() as usize + 1;
        let ny = ((y_max - y_min) / cell_size).ceil() as usize + 1;
        GridSpec::new(nx.max(2), ny.max(2), x_min, x_max, y_min, y_max)
    }

    /// X coordinate of column `i`.
    pub fn x_at(&self, i: usize) -> f64 {
        self.x_min + i as f64 * self.dx
    }

    /// Y coordinate of row `j`.
    pub fn y_at(&self, j: usize) -> f64 {
        self.y_min + j as f64 * self.dy
    }

    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Grid node nearest to `(x, y)`, or `None` when the point lies more
    /// than half a cell outside the lattice. Used to map raw samples onto
    /// the footprint of a labeled region.
    pub fn nearest_node(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let fi = (x - self.x_min) / self.dx;
        let fj = (y - self.y_min) / self.dy;
        if fi < -0.5 || fj < -0.5 {
            return None;
        }
        let i = fi.round() as isize;
        let j = fj.round() as isize;
        if i < 0 || j < 0 || i >= self.nx as isize || j >= self.ny as isize {
            return None;
        }
        Some((j as usize, i as usize))
    }
}

/// Interpolated dose-rate field over a grid.
///
/// Derived artifact: never mutated after creation. A rerun with different
/// parameters produces a new field. `method` records provenance so the
/// safety path can refuse fields produced by non-conservative methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseField {
    pub spec: GridSpec,
    /// Dose rates (µSv/hr), shape `[ny, nx]`.
    pub values: Array2<f64>,
    /// Which interpolation method produced this field.
    pub method: InterpolationMethod,
}

impl DoseField {
    pub fn new(spec: GridSpec, values: Array2<f64>, method: InterpolationMethod) -> Self {
        debug_assert_eq!(values.shape(), &[spec.ny, spec.nx]);
        DoseField {
            spec,
            values,
            method,
        }
    }

    /// Value at `[row, col]` with bounds checking.
    pub fn at(&self, row: usize, col: usize) -> RadMapResult<f64> {
        self.values
            .get([row, col])
            .copied()
            .ok_or(RadMapError::GridOutOfBounds { row, col })
    }

    pub fn min_dose(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_dose(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
