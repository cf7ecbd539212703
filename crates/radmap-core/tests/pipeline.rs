// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — End-to-End Analysis Tests
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Whole-pipeline checks on the synthetic survey scenarios.

use radmap_core::pipeline::run_survey;
use radmap_core::scenario;
use radmap_core::shielding::{attenuate, ShieldingCalculator};
use radmap_types::config::{AnalysisConfig, InterpolationMethod};
use radmap_types::materials::MaterialLibrary;
use radmap_types::state::SurveyPoint;
use radmap_types::zone::ThresholdTable;

fn base_config(method: InterpolationMethod) -> AnalysisConfig {
    AnalysisConfig {
        interpolation_method: method,
        idw_power: 2.0,
        idw_neighbors: None,
        grid_cell_size: 1.0,
        buffer_distance: 5.0,
        threshold_table: ThresholdTable::cern_iaea(),
        occupancy_hours: 2000.0,
        reference_energy_mev: 1.0,
        rounding_increment_cm: 5.0,
        materials: None,
    }
}

// ── Shielding Design Numbers ─────────────────────────────────────────

#[test]
fn test_field_estimate_thicknesses_for_beamline_peak() {
    // A 100.9 µSv/hr hotspot shielded down to the 0.5 µSv/hr supervised
    // boundary, using the single-energy field coefficients.
    let calc = ShieldingCalculator::new(MaterialLibrary::field_estimates(), 1.0, 5.0).unwrap();

    let concrete = calc.required_thickness(100.9, 0.5, "concrete").unwrap();
    assert!((concrete.exact_thickness_cm - 35.39).abs() < 0.05);
    assert!((concrete.recommended_thickness_cm - 40.0).abs() < 1e-9);

    let steel = calc.required_thickness(100.9, 0.5, "steel").unwrap();
    assert!((steel.exact_thickness_cm - 17.69).abs() < 0.05);

    let lead = calc.required_thickness(100.9, 0.5, "lead").unwrap();
    assert!((lead.exact_thickness_cm - 9.65).abs() < 0.05);
    assert!((lead.recommended_thickness_cm - 10.0).abs() < 1e-9);
}

// ── Beamline Scenario ────────────────────────────────────────────────

#[test]
fn test_beamline_analysis_end_to_end() {
    let samples = scenario::beamline_hotspot(42);
    let analysis = run_survey(&samples, &base_config(InterpolationMethod::Linear)).unwrap();

    // The field must not overshoot the measurements
    let max_sample = samples
        .iter()
        .map(|p| p.dose_rate)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(analysis.field.max_dose() <= max_sample + 1e-9);
    assert!(analysis.field.min_dose() >= 0.0);

    // One dominant hotspot region around the source
    assert!(!analysis.hotspots.is_empty());
    let hottest = &analysis.hotspots[0];
    assert!(hottest.peak_dose > 25.0);
    assert_eq!(hottest.id, 0);

    // Every shielding option actually reaches the target when built at
    // the recommended thickness
    for region in &analysis.shielding {
        for option in &region.options {
            if option.already_compliant {
                continue;
            }
            let behind = attenuate(
                option.source_dose,
                option.mu_cm,
                option.recommended_thickness_cm,
            );
            assert!(
                behind <= option.target_dose + 1e-9,
                "{} at {} cm leaves {behind}",
                option.material,
                option.recommended_thickness_cm
            );
        }
        // Lead is always the thinnest of the built-in materials
        assert_eq!(region.options[0].material, "lead");
    }

    // The hall perimeter is above the public boundary near the source wall
    assert!(analysis.boundary.leakage);
    assert!(analysis.annual.exceeds_worker_limit);
}

#[test]
fn test_beamline_custom_materials_flow_through() {
    let samples = scenario::beamline_hotspot(42);
    let mut cfg = base_config(InterpolationMethod::Linear);
    cfg.materials = Some(MaterialLibrary::field_estimates().iter().cloned().collect());
    let analysis = run_survey(&samples, &cfg).unwrap();
    for region in &analysis.shielding {
        assert_eq!(region.options.len(), 4);
        assert!(region.options.iter().all(|o| o.material != "polyethylene"));
    }
}

// ── Clean and Degenerate Surveys ─────────────────────────────────────

#[test]
fn test_clean_storage_area_is_fully_compliant() {
    let samples = scenario::uniform_low(11);
    let analysis = run_survey(&samples, &base_config(InterpolationMethod::Idw)).unwrap();
    assert!(analysis.hotspots.is_empty());
    assert!(!analysis.boundary.leakage);
    assert!(!analysis.annual.exceeds_public_limit);
    assert_eq!(analysis.zone_counts.restricted, 0);
    assert_eq!(analysis.zone_counts.controlled, 0);
}

#[test]
fn test_single_sample_survey_runs_via_idw() {
    let samples = vec![SurveyPoint::new(3.0, 4.0, 1.2).unwrap()];
    let analysis = run_survey(&samples, &base_config(InterpolationMethod::Linear)).unwrap();
    assert_eq!(analysis.field.method, InterpolationMethod::Idw);
    // Constant field at the lone measurement
    assert!((analysis.field.min_dose() - 1.2).abs() < 1e-9);
    assert!((analysis.field.max_dose() - 1.2).abs() < 1e-9);
}

// ── Threshold Regimes ────────────────────────────────────────────────

#[test]
fn test_conservative_regime_never_relaxes_classification() {
    let samples = scenario::scattered_sources(9);
    let iaea = run_survey(&samples, &base_config(InterpolationMethod::Linear)).unwrap();
    let mut cfg = base_config(InterpolationMethod::Linear);
    cfg.threshold_table = ThresholdTable::conservative();
    let cons = run_survey(&samples, &cfg).unwrap();
    assert!(cons.zone_counts.restricted >= iaea.zone_counts.restricted);
    assert!(
        cons.zone_counts.restricted + cons.zone_counts.controlled
            >= iaea.zone_counts.restricted + iaea.zone_counts.controlled
    );
}

// ── Rendering Path ───────────────────────────────────────────────────

#[test]
fn test_render_field_is_separate_from_safety_field() {
    let samples = scenario::scattered_sources(3);
    let analysis = run_survey(&samples, &base_config(InterpolationMethod::CloughTocher)).unwrap();
    assert_eq!(analysis.field.method, InterpolationMethod::Linear);
    let render = analysis.render_field.as_ref().unwrap();
    assert_eq!(render.method, InterpolationMethod::CloughTocher);
    assert_eq!(render.values.shape(), analysis.field.values.shape());
    assert!(render.min_dose() >= 0.0);
}
