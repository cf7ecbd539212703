// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Shielding Thickness Design
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shield thickness from Beer–Lambert inversion.
//!
//! Narrow-beam attenuation: D(x) = D₀·e^(−μx), so the thickness that
//! brings a source dose down to a target is x = ln(D₀/Dₜ)/μ. Buildup from
//! scattered photons is NOT modeled; the rounded-up recommendation plus a
//! conservative peak dose is the margin.

use radmap_types::error::{RadMapError, RadMapResult};
use radmap_types::materials::MaterialLibrary;

/// One material's answer to "how thick must the shield be".
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldingResult {
    pub material: String,
    pub display_name: String,
    /// Dose rate behind no shield (µSv/hr).
    pub source_dose: f64,
    /// Dose rate the shield must achieve (µSv/hr).
    pub target_dose: f64,
    /// μ used (cm⁻¹) at the calculator's reference energy.
    pub mu_cm: f64,
    /// Analytic thickness (cm); 0 when already compliant.
    pub exact_thickness_cm: f64,
    /// Thickness rounded up to the construction increment (cm).
    pub recommended_thickness_cm: f64,
    /// Source was at or below target; no shield needed. Not an error: an
    /// already-safe location is a valid survey outcome.
    pub already_compliant: bool,
}

/// Thickness calculator bound to a material library, a reference photon
/// energy and a construction rounding increment.
#[derive(Debug, Clone)]
pub struct ShieldingCalculator {
    library: MaterialLibrary,
    reference_energy_mev: f64,
    rounding_increment_cm: f64,
}

impl ShieldingCalculator {
    pub fn new(
        library: MaterialLibrary,
        reference_energy_mev: f64,
        rounding_increment_cm: f64,
    ) -> RadMapResult<Self> {
        if !(reference_energy_mev > 0.0) || !reference_energy_mev.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "reference energy must be positive, got {reference_energy_mev}"
            )));
        }
        if !(rounding_increment_cm > 0.0) || !rounding_increment_cm.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "rounding increment must be positive, got {rounding_increment_cm}"
            )));
        }
        Ok(ShieldingCalculator {
            library,
            reference_energy_mev,
            rounding_increment_cm,
        })
    }

    pub fn library(&self) -> &MaterialLibrary {
        &self.library
    }

    /// Thickness of `material_key` bringing `source_dose` down to
    /// `target_dose`.
    pub fn required_thickness(
        &self,
        source_dose: f64,
        target_dose: f64,
        material_key: &str,
    ) -> RadMapResult<ShieldingResult> {
        if !(source_dose > 0.0) || !(target_dose > 0.0) {
            return Err(RadMapError::NonPositiveDose {
                source: source_dose,
                target: target_dose,
            });
        }
        let material = self.library.get(material_key)?;
        let mu = material.mu_at(self.reference_energy_mev)?;
        if source_dose <= target_dose {
            return Ok(ShieldingResult {
                material: material.key.clone(),
                display_name: material.display_name.clone(),
                source_dose,
                target_dose,
                mu_cm: mu,
                exact_thickness_cm: 0.0,
                recommended_thickness_cm: 0.0,
                already_compliant: true,
            });
        }
        let exact = (source_dose / target_dose).ln() / mu;
        Ok(ShieldingResult {
            material: material.key.clone(),
            display_name: material.display_name.clone(),
            source_dose,
            target_dose,
            mu_cm: mu,
            exact_thickness_cm: exact,
            recommended_thickness_cm: round_up(exact, self.rounding_increment_cm),
            already_compliant: false,
        })
    }

    /// Run every material in the library against the same source/target
    /// pair, thinnest recommendation first.
    pub fn compare_materials(
        &self,
        source_dose: f64,
        target_dose: f64,
    ) -> RadMapResult<Vec<ShieldingResult>> {
        let mut results = Vec::with_capacity(self.library.len());
        for material in self.library.iter() {
            results.push(self.required_thickness(source_dose, target_dose, &material.key)?);
        }
        results.sort_by(|a, b| a.exact_thickness_cm.total_cmp(&b.exact_thickness_cm));
        Ok(results)
    }
}

/// Dose rate behind `thickness_cm` of material with coefficient `mu_cm`.
pub fn attenuate(source_dose: f64, mu_cm: f64, thickness_cm: f64) -> f64 {
    source_dose * (-mu_cm * thickness_cm).exp()
}

/// Round up to the next multiple of `increment`, leaving exact multiples
/// alone (modulo float noise).
fn round_up(x: f64, increment: f64) -> f64 {
    (x / increment - 1e-9).ceil() * increment
}
