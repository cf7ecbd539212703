// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Dose Field Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dose field construction: evaluate an interpolator over a grid.

use crate::clough_tocher::CloughTocherInterpolator;
use crate::idw::IdwInterpolator;
use crate::triangulated::LinearInterpolator;
use ndarray::Array2;
use radmap_types::config::InterpolationMethod;
use radmap_types::error::RadMapResult;
use radmap_types::state::{DoseField, GridSpec, SurveyPoint};

/// Parameters specific to the IDW method. The triangulated methods take
/// none.
#[derive(Debug, Clone, Copy)]
pub struct IdwParams {
    pub power: f64,
    pub max_neighbors: Option<usize>,
}

impl Default for IdwParams {
    fn default() -> Self {
        IdwParams {
            power: radmap_types::constants::DEFAULT_IDW_POWER,
            max_neighbors: None,
        }
    }
}

/// One constructed interpolator. Tagged union: every variant answers
/// `evaluate(x, y) → dose`, the engine dispatches once at build time.
#[derive(Debug, Clone)]
pub enum Interpolator {
    Idw(IdwInterpolator),
    Linear(LinearInterpolator),
    CloughTocher(CloughTocherInterpolator),
}

impl Interpolator {
    pub fn build(
        samples: &[SurveyPoint],
        method: InterpolationMethod,
        idw: IdwParams,
    ) -> RadMapResult<Self> {
        match method {
            InterpolationMethod::Idw => Ok(Interpolator::Idw(IdwInterpolator::new(
                samples,
                idw.power,
                idw.max_neighbors,
            )?)),
            InterpolationMethod::Linear => {
                Ok(Interpolator::Linear(LinearInterpolator::new(samples)?))
            }
            InterpolationMethod::CloughTocher => Ok(Interpolator::CloughTocher(
                CloughTocherInterpolator::new(samples)?,
            )),
        }
    }

    pub fn method(&self) -> InterpolationMethod {
        match self {
            Interpolator::Idw(_) => InterpolationMethod::Idw,
            Interpolator::Linear(_) => InterpolationMethod::Linear,
            Interpolator::CloughTocher(_) => InterpolationMethod::CloughTocher,
        }
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        match self {
            Interpolator::Idw(i) => i.evaluate(x, y),
            Interpolator::Linear(i) => i.evaluate(x, y),
            Interpolator::CloughTocher(i) => i.evaluate(x, y),
        }
    }
}

/// Interpolate the samples onto every node of `spec`.
///
/// Negative cubic undershoots are clamped to zero; dose rates are physical
/// quantities. The resulting field records which method produced it.
pub fn interpolate_field(
    samples: &[SurveyPoint],
    spec: &GridSpec,
    method: InterpolationMethod,
    idw: IdwParams,
) -> RadMapResult<DoseField> {
    let interp = Interpolator::build(samples, method, idw)?;
    Ok(evaluate_on_grid(&interp, spec))
}

/// Evaluate an already-built interpolator over a grid.
pub fn evaluate_on_grid(interp: &Interpolator, spec: &GridSpec) -> DoseField {
    let mut values = Array2::zeros((spec.ny, spec.nx));
    for j in 0..spec.ny {
        let y = spec.y_at(j);
        for i in 0..spec.nx {
            values[[j, i]] = interp.evaluate(spec.x_at(i), y).max(0.0);
        }
    }
    DoseField::new(spec.clone(), values, interp.method())
}
