// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Survey Analysis Pipeline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! End-to-end survey analysis.
//!
//! samples → grid → dose field → zones → hotspots → shielding options,
//! plus the compliance report. One call, one immutable result.

use crate::classify::{classify_field, ZoneCounts};
use crate::compliance::{
    boundary_check, project_annual, tally_samples, AnnualProjection, BoundaryCheck,
    SurveyStatistics, ZoneTally,
};
use crate::field::{interpolate_field, IdwParams};
use crate::hotspot::{label_hotspots, HotspotRegion};
use crate::shielding::{ShieldingCalculator, ShieldingResult};
use radmap_types::config::{AnalysisConfig, InterpolationMethod};
use radmap_types::error::{RadMapError, RadMapResult};
use radmap_types::materials::MaterialLibrary;
use radmap_types::state::{DoseField, GridSpec, SurveyPoint};

/// Shielding options for one hotspot region, thinnest first.
#[derive(Debug, Clone)]
pub struct RegionShielding {
    pub region_id: usize,
    pub peak_dose: f64,
    pub options: Vec<ShieldingResult>,
}

/// Everything one survey run produces.
#[derive(Debug, Clone)]
pub struct SurveyAnalysis {
    /// Safety-grade dose field; classification and hotspots derive from it.
    pub field: DoseField,
    /// Smooth cubic field for display, present only when requested. Never
    /// feeds classification.
    pub render_field: Option<DoseField>,
    pub zone_counts: ZoneCounts,
    pub hotspots: Vec<HotspotRegion>,
    pub shielding: Vec<RegionShielding>,
    pub statistics: SurveyStatistics,
    pub sample_tallies: Vec<ZoneTally>,
    pub annual: AnnualProjection,
    pub boundary: BoundaryCheck,
    /// Dose rate (µSv/hr) shields are designed to reach: the table's first
    /// non-base zone boundary.
    pub target_dose: f64,
}

/// Run the full analysis.
///
/// Method policy: a Clough–Tocher request yields a Linear safety field
/// plus the cubic as `render_field`. A triangulated method that fails on
/// degenerate geometry (collinear transect, fewer than three distinct
/// positions) falls back to IDW, which handles any sample count; the
/// field's `method` tag records what actually ran.
pub fn run_survey(samples: &[SurveyPoint], config: &AnalysisConfig) -> RadMapResult<SurveyAnalysis> {
    config.validate()?;
    if samples.is_empty() {
        return Err(RadMapError::EmptySurvey);
    }

    let spec = GridSpec::from_samples(samples, config.grid_cell_size, config.buffer_distance)?;
    let idw = IdwParams {
        power: config.idw_power,
        max_neighbors: config.idw_neighbors,
    };

    let safety_method = if config.interpolation_method.is_safety_grade() {
        config.interpolation_method
    } else {
        InterpolationMethod::Linear
    };
    let field = match interpolate_field(samples, &spec, safety_method, idw) {
        Err(RadMapError::InsufficientGeometry { .. }) => {
            interpolate_field(samples, &spec, InterpolationMethod::Idw, idw)?
        }
        other => other?,
    };
    let render_field = if config.interpolation_method == InterpolationMethod::CloughTocher {
        interpolate_field(samples, &spec, InterpolationMethod::CloughTocher, idw).ok()
    } else {
        None
    };

    let table = &config.threshold_table;
    let target_dose = shielding_target(table)?;
    let zones = classify_field(&field, table)?;
    let zone_counts = ZoneCounts::from_zones(&zones);
    let hotspots = label_hotspots(&field, table, samples)?;

    let library = match &config.materials {
        Some(materials) => MaterialLibrary::from_materials(materials.clone())?,
        None => MaterialLibrary::nist(),
    };
    let calculator = ShieldingCalculator::new(
        library,
        config.reference_energy_mev,
        config.rounding_increment_cm,
    )?;
    let mut shielding = Vec::with_capacity(hotspots.len());
    for region in &hotspots {
        shielding.push(RegionShielding {
            region_id: region.id,
            peak_dose: region.peak_dose,
            options: calculator.compare_materials(region.peak_dose, target_dose)?,
        });
    }

    let statistics = SurveyStatistics::from_samples(samples)?;
    let sample_tallies = tally_samples(samples, table)?;
    let annual = project_annual(&statistics, config.occupancy_hours);
    let boundary = boundary_check(samples, config.grid_cell_size, target_dose)?;

    Ok(SurveyAnalysis {
        field,
        render_field,
        zone_counts,
        hotspots,
        shielding,
        statistics,
        sample_tallies,
        annual,
        boundary,
        target_dose,
    })
}

/// Shields bring a hotspot down out of every elevated band, i.e. below the
/// first boundary above the base zone.
fn shielding_target(table: &radmap_types::zone::ThresholdTable) -> RadMapResult<f64> {
    table
        .entries()
        .get(1)
        .map(|e| e.lower_bound)
        .ok_or_else(|| {
            RadMapError::ConfigError(
                "threshold table defines no elevated zone to shield against".into(),
            )
        })
}
