//! Survey statistics, annual dose projection and boundary leakage checks.
//!
//! Everything here is informational reporting layered on top of the
//! classification results. Occupancy-weighted projections never alter zone
//! assignments.

use radmap_types::constants::{ANNUAL_LIMIT_PUBLIC_MSV, ANNUAL_LIMIT_WORKER_MSV};
use radmap_types::error::{RadMapError, RadMapResult};
use radmap_types::state::SurveyPoint;
use radmap_types::zone::{annual_dose_msv, ThresholdTable, Zone};
use serde::{Deserialize, Serialize};

/// Descriptive statistics over the raw sample doses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n−1); 0 for a single sample.
    pub std_dev: f64,
}

impl SurveyStatistics {
    pub fn from_samples(samples: &[SurveyPoint]) -> RadMapResult<Self> {
        if samples.is_empty() {
            return Err(RadMapError::EmptySurvey);
        }
        let mut doses: Vec<f64> = samples.iter().map(|p| p.dose_rate).collect();
        doses.sort_by(f64::total_cmp);
        let n = doses.len();
        let mean = doses.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            doses[n / 2]
        } else {
            (doses[n / 2 - 1] + doses[n / 2]) / 2.0
        };
        let std_dev = if n > 1 {
            let ss: f64 = doses.iter().map(|d| (d - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        Ok(SurveyStatistics {
            count: n,
            min: doses[0],
            max: doses[n - 1],
            mean,
            median,
            std_dev,
        })
    }
}

/// How many raw samples fall in each zone band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneTally {
    pub zone: Zone,
    pub count: usize,
    pub percentage: f64,
}

/// Tally raw samples against the threshold table, one entry per zone the
/// table defines (zero-count zones included).
pub fn tally_samples(
    samples: &[SurveyPoint],
    table: &ThresholdTable,
) -> RadMapResult<Vec<ZoneTally>> {
    if samples.is_empty() {
        return Err(RadMapError::EmptySurvey);
    }
    table.validate()?;
    let mut tallies: Vec<ZoneTally> = table
        .entries()
        .iter()
        .map(|e| ZoneTally {
            zone: e.zone,
            count: 0,
            percentage: 0.0,
        })
        .collect();
    for sample in samples {
        let zone = table.classify(sample.dose_rate);
        if let Some(t) = tallies.iter_mut().find(|t| t.zone == zone) {
            t.count += 1;
        }
    }
    let n = samples.len() as f64;
    for t in &mut tallies {
        t.percentage = 100.0 * t.count as f64 / n;
    }
    Ok(tallies)
}

/// Annual dose at the surveyed maxima under an assumed occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualProjection {
    pub occupancy_hours: f64,
    /// Projection at the hottest sample (mSv/yr).
    pub max_annual_msv: f64,
    /// Projection at the mean dose rate (mSv/yr).
    pub mean_annual_msv: f64,
    /// Hottest-sample projection exceeds the occupational worker limit.
    pub exceeds_worker_limit: bool,
    /// Hottest-sample projection exceeds the public limit.
    pub exceeds_public_limit: bool,
}

pub fn project_annual(stats: &SurveyStatistics, occupancy_hours: f64) -> AnnualProjection {
    let max_annual = annual_dose_msv(stats.max, occupancy_hours);
    AnnualProjection {
        occupancy_hours,
        max_annual_msv: max_annual,
        mean_annual_msv: annual_dose_msv(stats.mean, occupancy_hours),
        exceeds_worker_limit: max_annual > ANNUAL_LIMIT_WORKER_MSV,
        exceeds_public_limit: max_annual > ANNUAL_LIMIT_PUBLIC_MSV,
    }
}

/// Dose-rate check along the survey perimeter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCheck {
    /// Hottest sample within `margin` of the bounding box edge (µSv/hr);
    /// 0 when no sample lies in the band.
    pub max_boundary_dose: f64,
    /// The boundary band exceeds the public/supervised limit.
    pub leakage: bool,
}

/// Inspect samples within `margin` meters of the surveyed bounding box
/// edge against `limit` (µSv/hr).
pub fn boundary_check(
    samples: &[SurveyPoint],
    margin: f64,
    limit: f64,
) -> RadMapResult<BoundaryCheck> {
    if samples.is_empty() {
        return Err(RadMapError::EmptySurvey);
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
    let mut max_dose = 0.0f64;
    for p in samples {
        let near_edge = p.x - x_min <= margin
            || x_max - p.x <= margin
            || p.y - y_min <= margin
            || y_max - p.y <= margin;
        if near_edge {
            max_dose = max_dose.max(p.dose_rate);
        }
    }
    Ok(BoundaryCheck {
        max_boundary_dose: max_dose,
        leakage: max_dose > limit,
    })
}
