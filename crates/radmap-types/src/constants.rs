// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Full-time worker occupancy (hours/year) used for annual dose projection.
pub const OCCUPANCY_FULL_TIME_HOURS: f64 = 2000.0;

/// µSv per mSv.
pub const USV_PER_MSV: f64 = 1000.0;

/// Statutory annual dose limit for radiation workers (mSv/year), IAEA GSR Part 3.
pub const ANNUAL_LIMIT_WORKER_MSV: f64 = 20.0;

/// Statutory annual dose limit for members of the public (mSv/year).
pub const ANNUAL_LIMIT_PUBLIC_MSV: f64 = 1.0;

/// Statutory annual dose limit for apprentices aged 16-18 (mSv/year).
pub const ANNUAL_LIMIT_APPRENTICE_MSV: f64 = 6.0;

/// Default construction increment for recommended shield thickness (cm).
/// Recommended thickness is always rounded UP to this increment.
pub const DEFAULT_ROUNDING_INCREMENT_CM: f64 = 5.0;

/// Default photon reference energy (MeV) for attenuation lookups.
pub const DEFAULT_REFERENCE_ENERGY_MEV: f64 = 1.0;

/// Default distance (m) the analysis grid extends beyond the sampled
/// bounding box.
pub const DEFAULT_SURVEY_BUFFER_M: f64 = 5.0;

/// Default inverse-distance power. p = 2 models inverse-square photon
/// flux falloff from a point source.
pub const DEFAULT_IDW_POWER: f64 = 2.0;

/// Distance (m) below which a query point is treated as coincident with a
/// sample point. Guards the 1/d^p weight against division by zero and makes
/// interpolation exact at sample locations.
pub const SAMPLE_MATCH_EPS: f64 = 1e-9;

/// Signed-area threshold below which a triangle is treated as degenerate.
pub const GEOM_EPS: f64 = 1e-12;
