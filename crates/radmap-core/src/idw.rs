// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Inverse Distance Weighting
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Inverse distance weighting over scattered survey points.
//!
//! The estimate at a query is a convex combination of sample doses, so it
//! never overshoots the sampled range. Works with any sample geometry,
//! including a single point or a collinear transect.

use radmap_types::constants::SAMPLE_MATCH_EPS;
use radmap_types::error::{RadMapError, RadMapResult};
use radmap_types::state::SurveyPoint;

/// Shepard interpolator with an optional k-nearest-neighbor cutoff.
#[derive(Debug, Clone)]
pub struct IdwInterpolator {
    positions: Vec<[f64; 2]>,
    doses: Vec<f64>,
    power: f64,
    max_neighbors: Option<usize>,
}

impl IdwInterpolator {
    pub fn new(
        samples: &[SurveyPoint],
        power: f64,
        max_neighbors: Option<usize>,
    ) -> RadMapResult<Self> {
        if samples.is_empty() {
            return Err(RadMapError::EmptySurvey);
        }
        if !(power > 0.0) || !power.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "IDW power must be positive and finite, got {power}"
            )));
        }
        if max_neighbors == Some(0) {
            return Err(RadMapError::ConfigError(
                "IDW neighbor count must be at least 1".into(),
            ));
        }
        Ok(IdwInterpolator {
            positions: samples.iter().map(|p| [p.x, p.y]).collect(),
            doses: samples.iter().map(|p| p.dose_rate).collect(),
            power,
            max_neighbors,
        })
    }

    pub fn num_samples(&self) -> usize {
        self.positions.len()
    }

    /// Dose-rate estimate at `(x, y)`.
    ///
    /// A query within `SAMPLE_MATCH_EPS` of a sample returns that sample's
    /// measured value exactly; the weight 1/dᵖ blows up there and the
    /// measurement is the ground truth anyway.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let mut dist2: Vec<(f64, f64)> = Vec::with_capacity(self.positions.len());
        for (pos, &dose) in self.positions.iter().zip(&self.doses) {
            let d2 = (pos[0] - x).powi(2) + (pos[1] - y).powi(2);
            if d2 < SAMPLE_MATCH_EPS * SAMPLE_MATCH_EPS {
                return dose;
            }
            dist2.push((d2, dose));
        }
        if let Some(k) = self.max_neighbors {
            if k < dist2.len() {
                dist2.sort_by(|a, b| a.0.total_cmp(&b.0));
                dist2.truncate(k);
            }
        }
        let mut num = 0.0;
        let mut den = 0.0;
        for (d2, dose) in dist2 {
            let w = d2.powf(-self.power / 2.0);
            num += w * dose;
            den += w;
        }
        num / den
    }
}
