// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    DEFAULT_IDW_POWER, DEFAULT_REFERENCE_ENERGY_MEV, DEFAULT_ROUNDING_INCREMENT_CM,
    DEFAULT_SURVEY_BUFFER_M, OCCUPANCY_FULL_TIME_HOURS,
};
use crate::error::{RadMapError, RadMapResult};
use crate::materials::Material;
use crate::zone::ThresholdTable;
use serde::{Deserialize, Serialize};

/// Interpolation strategy for the dose field.
///
/// A tagged union rather than a trait hierarchy: the engine dispatches on
/// this at run configuration time and every variant satisfies the same
/// `evaluate(query) → dose` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Inverse distance weighting. Cannot overshoot; safe for classification.
    Idw,
    /// Linear barycentric over a Delaunay triangulation. Cannot overshoot
    /// inside the hull; required for corridor-like geometries.
    Linear,
    /// C¹ Clough–Tocher cubic. May overshoot between samples; rendering
    /// only, never classification.
    CloughTocher,
}

impl InterpolationMethod {
    /// Whether a field from this method may feed zone classification and
    /// hotspot labeling.
    pub fn is_safety_grade(&self) -> bool {
        !matches!(self, InterpolationMethod::CloughTocher)
    }
}

/// One analysis run's configuration.
///
/// The threshold table is carried here and passed explicitly into every
/// classification call; there is no ambient global regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub interpolation_method: InterpolationMethod,
    /// IDW distance exponent, > 0.
    #[serde(default = "default_idw_power")]
    pub idw_power: f64,
    /// Restrict IDW to the k nearest samples; `None` uses all samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idw_neighbors: Option<usize>,
    /// Grid node spacing (m), > 0.
    pub grid_cell_size: f64,
    /// Margin (m) the grid extends beyond the sampled bounding box.
    #[serde(default = "default_buffer_distance")]
    pub buffer_distance: f64,
    pub threshold_table: ThresholdTable,
    /// Annual occupancy (hours/year). Informational: feeds dose projection,
    /// never classification.
    #[serde(default = "default_occupancy_hours")]
    pub occupancy_hours: f64,
    /// Photon energy (MeV) for attenuation coefficient lookups.
    #[serde(default = "default_reference_energy")]
    pub reference_energy_mev: f64,
    /// Construction increment (cm) for recommended shield thickness.
    #[serde(default = "default_rounding_increment")]
    pub rounding_increment_cm: f64,
    /// Custom material set; `None` selects the built-in NIST library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<Material>>,
}

fn default_idw_power() -> f64 {
    DEFAULT_IDW_POWER
}
fn default_buffer_distance() -> f64 {
    DEFAULT_SURVEY_BUFFER_M
}
fn default_occupancy_hours() -> f64 {
    OCCUPANCY_FULL_TIME_HOURS
}
fn default_reference_energy() -> f64 {
    DEFAULT_REFERENCE_ENERGY_MEV
}
fn default_rounding_increment() -> f64 {
    DEFAULT_ROUNDING_INCREMENT_CM
}

impl AnalysisConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> RadMapResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed configuration eagerly. The core never substitutes
    /// defaults for invalid values.
    pub fn validate(&self) -> RadMapResult<()> {
        if !(self.idw_power > 0.0) || !self.idw_power.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "idw_power must be positive and finite, got {}",
                self.idw_power
            )));
        }
        if let Some(k) = self.idw_neighbors {
            if k == 0 {
                return Err(RadMapError::ConfigError(
                    "idw_neighbors must be at least 1".into(),
                ));
            }
        }
        if !(self.grid_cell_size > 0.0) || !self.grid_cell_size.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "grid_cell_size must be positive, got {}",
                self.grid_cell_size
            )));
        }
        if !(self.buffer_distance >= 0.0) || !self.buffer_distance.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "buffer_distance must be non-negative, got {}",
                self.buffer_distance
            )));
        }
        if !(self.occupancy_hours >= 0.0) || !self.occupancy_hours.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "occupancy_hours must be non-negative, got {}",
                self.occupancy_hours
            )));
        }
        if !(self.reference_energy_mev > 0.0) || !self.reference_energy_mev.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "reference_energy_mev must be positive, got {}",
                self.reference_energy_mev
            )));
        }
        if !(self.rounding_increment_cm > 0.0) || !self.rounding_increment_cm.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "rounding_increment_cm must be positive, got {}",
                self.rounding_increment_cm
            )));
        }
        self.threshold_table.validate()?;
        Ok(())
    }
}
