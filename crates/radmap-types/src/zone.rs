// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Zones
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Regulatory area classes and the dose threshold table.
//!
//! Area classes follow CERN Safety Code F / IAEA GSR Part 3 terminology.
//! Two threshold regimes circulate in practice and disagree on the upper
//! boundaries, so there is deliberately no `Default` table: every
//! classification call takes its `ThresholdTable` explicitly and the two
//! regimes are exposed as named constructors.

use crate::constants::USV_PER_MSV;
use crate::error::{RadMapError, RadMapResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Regulatory area class, ordered from least to most restrictive.
///
/// The derived `Ord` is load-bearing: classification must be a
/// non-decreasing step function of dose under this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    Public,
    Supervised,
    Controlled,
    Restricted,
}

impl Zone {
    /// All zones in ascending order.
    pub const ALL: [Zone; 4] = [
        Zone::Public,
        Zone::Supervised,
        Zone::Controlled,
        Zone::Restricted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Zone::Public => "Public",
            Zone::Supervised => "Supervised",
            Zone::Controlled => "Controlled",
            Zone::Restricted => "Restricted",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `(zone, lower_bound_inclusive)` row of a threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub zone: Zone,
    /// Lower dose-rate bound (µSv/hr), inclusive. The zone extends up to the
    /// next entry's bound (exclusive); the last zone is unbounded above.
    pub lower_bound: f64,
}

/// Ordered dose-rate thresholds mapping `[0, ∞)` onto zones with no gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    entries: Vec<ThresholdEntry>,
}

impl ThresholdTable {
    /// Build a table and check its invariants eagerly.
    pub fn new(entries: Vec<ThresholdEntry>) -> RadMapResult<Self> {
        let table = ThresholdTable { entries };
        table.validate()?;
        Ok(table)
    }

    /// CERN Safety Code F boundaries: 0.5 / 7.5 / 25 µSv/hr.
    pub fn cern_iaea() -> Self {
        ThresholdTable {
            entries: vec![
                ThresholdEntry { zone: Zone::Public, lower_bound: 0.0 },
                ThresholdEntry { zone: Zone::Supervised, lower_bound: 0.5 },
                ThresholdEntry { zone: Zone::Controlled, lower_bound: 7.5 },
                ThresholdEntry { zone: Zone::Restricted, lower_bound: 25.0 },
            ],
        }
    }

    /// Tighter regime seen at some facilities: 0.5 / 3 / 10 µSv/hr.
    pub fn conservative() -> Self {
        ThresholdTable {
            entries: vec![
                ThresholdEntry { zone: Zone::Public, lower_bound: 0.0 },
                ThresholdEntry { zone: Zone::Supervised, lower_bound: 0.5 },
                ThresholdEntry { zone: Zone::Controlled, lower_bound: 3.0 },
                ThresholdEntry { zone: Zone::Restricted, lower_bound: 10.0 },
            ],
        }
    }

    /// Check the table invariants: non-empty, first bound 0, bounds finite
    /// and strictly increasing, zones strictly ascending.
    ///
    /// Caller-supplied tables (e.g. deserialized from JSON) bypass `new`,
    /// so field classification re-validates once per run, never per cell.
    pub fn validate(&self) -> RadMapResult<()> {
        if self.entries.is_empty() {
            return Err(RadMapError::InvalidThresholdTable(
                "table has no entries".into(),
            ));
        }
        if self.entries[0].lower_bound != 0.0 {
            return Err(RadMapError::InvalidThresholdTable(format!(
                "first bound must be 0, got {}",
                self.entries[0].lower_bound
            )));
        }
        for entry in &self.entries {
            if !entry.lower_bound.is_finite() {
                return Err(RadMapError::InvalidThresholdTable(format!(
                    "non-finite bound for zone {}",
                    entry.zone
                )));
            }
        }
        for pair in self.entries.windows(2) {
            if pair[1].lower_bound <= pair[0].lower_bound {
                return Err(RadMapError::InvalidThresholdTable(format!(
                    "bounds not strictly increasing: {} then {}",
                    pair[0].lower_bound, pair[1].lower_bound
                )));
            }
            if pair[1].zone <= pair[0].zone {
                return Err(RadMapError::InvalidThresholdTable(format!(
                    "zones not strictly ascending: {} then {}",
                    pair[0].zone, pair[1].zone
                )));
            }
        }
        Ok(())
    }

    /// Classify a dose rate (µSv/hr): the zone of the highest bound ≤ dose.
    ///
    /// Intervals are half-open `[lower, next_lower)`; the last zone is
    /// unbounded above. Pure and deterministic. Doses below the first bound
    /// (negative input) fall into the first zone.
    pub fn classify(&self, dose_rate: f64) -> Zone {
        let mut zone = self.entries[0].zone;
        for entry in &self.entries {
            if dose_rate >= entry.lower_bound {
                zone = entry.zone;
            } else {
                break;
            }
        }
        zone
    }

    /// Lower bound of a zone, if the table contains it.
    pub fn lower_bound(&self, zone: Zone) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.zone == zone)
            .map(|e| e.lower_bound)
    }

    pub fn entries(&self) -> &[ThresholdEntry] {
        &self.entries
    }
}

/// Project a dose rate (µSv/hr) to an annual dose (mSv/year) for a given
/// occupancy. Informational only: occupancy never alters classification.
pub fn annual_dose_msv(dose_rate_usv_hr: f64, occupancy_hours: f64) -> f64 {
    dose_rate_usv_hr * occupancy_hours / USV_PER_MSV
}
