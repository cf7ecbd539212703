// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Zone Classification
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Regulatory zone classification of interpolated dose fields.

use ndarray::Array2;
use radmap_types::error::{RadMapError, RadMapResult};
use radmap_types::state::DoseField;
use radmap_types::zone::{ThresholdTable, Zone};

/// Classify every grid node of a dose field.
///
/// Refuses fields produced by a non-conservative interpolation method: a
/// cubic overshoot must never promote a cell into a stricter zone, and an
/// undershoot hiding a hot cell is worse.
pub fn classify_field(field: &DoseField, table: &ThresholdTable) -> RadMapResult<Array2<Zone>> {
    if !field.method.is_safety_grade() {
        return Err(RadMapError::ConfigError(format!(
            "{:?} fields are rendering-only and cannot be classified",
            field.method
        )));
    }
    table.validate()?;
    Ok(field.values.mapv(|dose| table.classify(dose)))
}

/// Per-zone cell tallies for a classified grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCounts {
    pub public: usize,
    pub supervised: usize,
    pub controlled: usize,
    pub restricted: usize,
}

impl ZoneCounts {
    pub fn from_zones(zones: &Array2<Zone>) -> Self {
        let mut counts = ZoneCounts {
            public: 0,
            supervised: 0,
            controlled: 0,
            restricted: 0,
        };
        for z in zones.iter() {
            match z {
                Zone::Public => counts.public += 1,
                Zone::Supervised => counts.supervised += 1,
                Zone::Controlled => counts.controlled += 1,
                Zone::Restricted => counts.restricted += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.public + self.supervised + self.controlled + self.restricted
    }

    /// Fraction of cells at `zone` or stricter.
    pub fn fraction_at_least(&self, zone: Zone) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let n = match zone {
            Zone::Public => total,
            Zone::Supervised => self.supervised + self.controlled + self.restricted,
            Zone::Controlled => self.controlled + self.restricted,
            Zone::Restricted => self.restricted,
        };
        n as f64 / total as f64
    }
}
