// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Materials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shielding material library.
//!
//! Linear attenuation coefficients μ (cm⁻¹) per material and photon energy,
//! tabulated from the NIST XCOM photon cross-section database under the
//! narrow-beam ("good geometry") assumption. Lookups between tabulated
//! energies use log-log linear interpolation: μ vs E is smooth on a log-log
//! scale. Outside the tabulated range the nearest tabulated value is used.
//!
//! For broad-beam thick-wall design, apply build-up factors
//! (ANSI/ANS-6.4.3) on top of these values.

use crate::error::{RadMapError, RadMapResult};
use serde::{Deserialize, Serialize};

/// One shielding material with its energy-dependent attenuation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Lookup key, e.g. "concrete".
    pub key: String,
    pub display_name: String,
    /// Bulk density (g/cm³).
    pub density_g_cm3: f64,
    /// Tabulated photon energies (MeV), strictly increasing.
    pub energies_mev: Vec<f64>,
    /// Linear attenuation coefficients (cm⁻¹) at those energies.
    pub mu_cm: Vec<f64>,
    /// Hydrogen mass fraction (relevant for neutron moderation).
    pub h_fraction: f64,
    /// Boron mass fraction (relevant for thermal neutron capture).
    pub b_fraction: f64,
    /// Indicative cost (USD/m³), market estimate.
    pub cost_per_m3: f64,
    /// Primary shielding role.
    pub role: String,
}

impl Material {
    /// Interpolated μ (cm⁻¹) at the given photon energy.
    ///
    /// Log-log linear between tabulated nodes, flat beyond the ends.
    pub fn mu_at(&self, energy_mev: f64) -> RadMapResult<f64> {
        if !(energy_mev > 0.0) || !energy_mev.is_finite() {
            return Err(RadMapError::ConfigError(format!(
                "photon energy must be positive and finite, got {energy_mev}"
            )));
        }
        let e = &self.energies_mev;
        let mu = &self.mu_cm;
        if energy_mev <= e[0] {
            return Ok(mu[0]);
        }
        if energy_mev >= e[e.len() - 1] {
            return Ok(mu[mu.len() - 1]);
        }
        // Find the bracketing pair; tables are short, linear scan is fine
        let mut hi = 1;
        while e[hi] < energy_mev {
            hi += 1;
        }
        let lo = hi - 1;
        let t = (energy_mev.ln() - e[lo].ln()) / (e[hi].ln() - e[lo].ln());
        let log_mu = mu[lo].ln() + t * (mu[hi].ln() - mu[lo].ln());
        Ok(log_mu.exp())
    }

    fn validate(&self) -> RadMapResult<()> {
        if self.energies_mev.is_empty() || self.energies_mev.len() != self.mu_cm.len() {
            return Err(RadMapError::ConfigError(format!(
                "material '{}': energy and mu tables must be non-empty and equal length",
                self.key
            )));
        }
        for pair in self.energies_mev.windows(2) {
            if pair[1] <= pair[0] {
                return Err(RadMapError::ConfigError(format!(
                    "material '{}': energies must be strictly increasing",
                    self.key
                )));
            }
        }
        if self.mu_cm.iter().any(|&m| !(m > 0.0)) {
            return Err(RadMapError::ConfigError(format!(
                "material '{}': mu values must be positive",
                self.key
            )));
        }
        Ok(())
    }
}

/// Immutable collection of materials, keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

/// Standard NIST tabulation grid (MeV) shared by all built-in materials.
const NIST_ENERGIES_MEV: [f64; 7] = [0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0];

fn nist_material(
    key: &str,
    display_name: &str,
    density: f64,
    mu: [f64; 7],
    h_fraction: f64,
    b_fraction: f64,
    cost_per_m3: f64,
    role: &str,
) -> Material {
    Material {
        key: key.into(),
        display_name: display_name.into(),
        density_g_cm3: density,
        energies_mev: NIST_ENERGIES_MEV.to_vec(),
        mu_cm: mu.to_vec(),
        h_fraction,
        b_fraction,
        cost_per_m3,
        role: role.into(),
    }
}

impl MaterialLibrary {
    /// Build from caller-supplied materials (e.g. deserialized config),
    /// validating each table eagerly.
    pub fn from_materials(materials: Vec<Material>) -> RadMapResult<Self> {
        if materials.is_empty() {
            return Err(RadMapError::ConfigError(
                "material library must not be empty".into(),
            ));
        }
        for m in &materials {
            m.validate()?;
        }
        Ok(MaterialLibrary { materials })
    }

    /// NIST XCOM reference library, valid 0.1–10 MeV.
    pub fn nist() -> Self {
        MaterialLibrary {
            materials: vec![
                nist_material(
                    "concrete",
                    "Ordinary Concrete",
                    2.35,
                    [0.402, 0.287, 0.211, 0.153, 0.116, 0.078, 0.059],
                    0.010,
                    0.000,
                    190.0,
                    "Gamma attenuation — standard structural shielding",
                ),
                nist_material(
                    "heavy_concrete",
                    "Heavy Concrete (Barite)",
                    3.45,
                    [1.029, 0.518, 0.319, 0.211, 0.164, 0.111, 0.087],
                    0.008,
                    0.000,
                    1200.0,
                    "High-density gamma shielding — thinner walls than ordinary concrete",
                ),
                nist_material(
                    "steel",
                    "Steel (Iron)",
                    7.9,
                    [2.912, 1.149, 0.662, 0.474, 0.336, 0.248, 0.236],
                    0.000,
                    0.000,
                    8000.0,
                    "High-Z gamma shielding — compact but expensive",
                ),
                nist_material(
                    "lead",
                    "Lead",
                    11.34,
                    [62.93, 11.33, 1.826, 0.805, 0.518, 0.483, 0.559],
                    0.000,
                    0.000,
                    21000.0,
                    "Very high-Z gamma shielding — best at low energies (<0.5 MeV)",
                ),
                nist_material(
                    "bentonite_slurry",
                    "Bentonite Slurry (~60% water)",
                    1.45,
                    [0.248, 0.199, 0.140, 0.103, 0.071, 0.044, 0.032],
                    0.067,
                    0.002,
                    160.0,
                    "Neutron moderation (primary) + low-cost gamma complement",
                ),
                nist_material(
                    "borated_bentonite",
                    "Borated Bentonite (+5% borax)",
                    1.50,
                    [0.257, 0.206, 0.145, 0.106, 0.074, 0.045, 0.033],
                    0.068,
                    0.022,
                    650.0,
                    "Neutron moderation + thermal neutron capture via B-10",
                ),
                nist_material(
                    "polyethylene",
                    "High-Density Polyethylene (HDPE)",
                    0.95,
                    [0.186, 0.138, 0.092, 0.069, 0.042, 0.027, 0.019],
                    0.143,
                    0.000,
                    900.0,
                    "Best solid neutron moderator — benchmark comparison material",
                ),
                nist_material(
                    "earth_soil",
                    "Compacted Earth / Soil",
                    1.80,
                    [0.308, 0.220, 0.161, 0.120, 0.089, 0.060, 0.045],
                    0.020,
                    0.000,
                    15.0,
                    "Earth berm shielding — cheapest bulk option",
                ),
            ],
        }
    }

    /// Coarse single-energy gamma estimates for quick hand calculations.
    /// Energy-independent by construction (one tabulated node).
    pub fn field_estimates() -> Self {
        let single = |key: &str, name: &str, density: f64, mu: f64, cost: f64| Material {
            key: key.into(),
            display_name: name.into(),
            density_g_cm3: density,
            energies_mev: vec![1.0],
            mu_cm: vec![mu],
            h_fraction: 0.0,
            b_fraction: 0.0,
            cost_per_m3: cost,
            role: "Single-energy gamma estimate".into(),
        };
        MaterialLibrary {
            materials: vec![
                single("concrete", "Concrete", 2.35, 0.15, 190.0),
                single("steel", "Steel", 7.9, 0.30, 8000.0),
                single("lead", "Lead", 11.34, 0.55, 21000.0),
                single("earth_soil", "Earth/Soil", 1.80, 0.10, 15.0),
            ],
        }
    }

    pub fn get(&self, key: &str) -> RadMapResult<&Material> {
        self.materials
            .iter()
            .find(|m| m.key == key)
            .ok_or_else(|| RadMapError::UnknownMaterial {
                material: key.to_string(),
            })
    }

    /// Interpolated μ (cm⁻¹) for a material at a photon energy.
    pub fn mu(&self, key: &str, energy_mev: f64) -> RadMapResult<f64> {
        self.get(key)?.mu_at(energy_mev)
    }

    /// Half-value layer (cm): thickness reducing dose by 50%.
    pub fn half_value_layer(&self, key: &str, energy_mev: f64) -> RadMapResult<f64> {
        Ok(std::f64::consts::LN_2 / self.mu(key, energy_mev)?)
    }

    /// Tenth-value layer (cm): thickness reducing dose by 90%.
    pub fn tenth_value_layer(&self, key: &str, energy_mev: f64) -> RadMapResult<f64> {
        Ok(10.0_f64.ln() / self.mu(key, energy_mev)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mu_at_tabulated_nodes() {
        let lib = MaterialLibrary::nist();
        // Interpolation must reproduce tabulated values exactly at the nodes
        assert!((lib.mu("concrete", 1.0).unwrap() - 0.153).abs() < 1e-12);
        assert!((lib.mu("lead", 0.1).unwrap() - 62.93).abs() < 1e-12);
        assert!((lib.mu("steel", 10.0).unwrap() - 0.236).abs() < 1e-12);
    }

    #[test]
    fn test_mu_between_nodes_is_bracketed() {
        let lib = MaterialLibrary::nist();
        // μ is monotonically decreasing for concrete; interpolated value at
        // 0.7 MeV must lie between the 0.5 and 1.0 MeV values
        let mu = lib.mu("concrete", 0.7).unwrap();
        assert!(mu < 0.211 && mu > 0.153, "mu = {mu}");
    }

    #[test]
    fn test_mu_flat_extrapolation() {
        let lib = MaterialLibrary::nist();
        assert!((lib.mu("concrete", 0.01).unwrap() - 0.402).abs() < 1e-12);
        assert!((lib.mu("concrete", 50.0).unwrap() - 0.059).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_material() {
        let lib = MaterialLibrary::nist();
        assert!(matches!(
            lib.mu("unobtainium", 1.0),
            Err(RadMapError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn test_nonpositive_energy_rejected() {
        let lib = MaterialLibrary::nist();
        assert!(lib.mu("concrete", 0.0).is_err());
        assert!(lib.mu("concrete", -1.0).is_err());
    }

    #[test]
    fn test_half_and_tenth_value_layers() {
        let lib = MaterialLibrary::field_estimates();
        // HVL = ln2 / 0.15 ≈ 4.62 cm for the concrete estimate
        let hvl = lib.half_value_layer("concrete", 1.0).unwrap();
        assert!((hvl - std::f64::consts::LN_2 / 0.15).abs() < 1e-12);
        let tvl = lib.tenth_value_layer("concrete", 1.0).unwrap();
        assert!(tvl > hvl, "TVL must exceed HVL");
        assert!((tvl / hvl - 10.0_f64.ln() / std::f64::consts::LN_2).abs() < 1e-9);
    }

    #[test]
    fn test_lead_energy_dependence() {
        let lib = MaterialLibrary::nist();
        // Photoelectric dominance: lead is far more effective at 0.1 MeV
        // than at 2 MeV
        let low = lib.mu("lead", 0.1).unwrap();
        let high = lib.mu("lead", 2.0).unwrap();
        assert!(low > 50.0 * high);
    }

    #[test]
    fn test_from_materials_rejects_bad_tables() {
        let mut m = MaterialLibrary::nist().get("concrete").unwrap().clone();
        m.mu_cm.pop();
        assert!(MaterialLibrary::from_materials(vec![m]).is_err());
        assert!(MaterialLibrary::from_materials(vec![]).is_err());
    }

    #[test]
    fn test_nist_library_complete() {
        let lib = MaterialLibrary::nist();
        assert_eq!(lib.len(), 8);
        for m in lib.iter() {
            assert_eq!(m.energies_mev.len(), m.mu_cm.len());
            assert!(m.density_g_cm3 > 0.0);
        }
    }
}
