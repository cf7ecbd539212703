// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Hotspot Region Labeling
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Connected-component labeling of restricted-zone cells.
//!
//! Cells classified `Restricted` are grouped into 4-connected regions via
//! union-find. Each region's peak dose is the maximum of the interpolated
//! values over its footprint AND of any raw sample mapped into the
//! footprint: the interpolated surface can sit below a measured spike, and
//! shielding must be designed against the measurement.

use crate::classify::classify_field;
use radmap_types::error::RadMapResult;
use radmap_types::state::{DoseField, SurveyPoint};
use radmap_types::zone::{ThresholdTable, Zone};

/// One 4-connected region of restricted cells.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotRegion {
    /// Rank by peak dose, 0 = hottest.
    pub id: usize,
    /// Conservative peak (µSv/hr): max over footprint nodes and raw samples.
    pub peak_dose: f64,
    /// Position of the peak (m).
    pub peak_location: (f64, f64),
    pub cell_count: usize,
    /// Footprint as `(row, col)` grid indices.
    pub cells: Vec<(usize, usize)>,
}

/// Union-find over flattened grid indices, path compression plus union by
/// rank.
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Label restricted regions in a classified dose field.
///
/// Returns regions sorted hottest-first. `samples` supplies the raw
/// measurements folded into each region's peak.
pub fn label_hotspots(
    field: &DoseField,
    table: &ThresholdTable,
    samples: &[SurveyPoint],
) -> RadMapResult<Vec<HotspotRegion>> {
    let zones = classify_field(field, table)?;
    let (ny, nx) = (field.spec.ny, field.spec.nx);

    let restricted = |j: usize, i: usize| zones[[j, i]] == Zone::Restricted;
    let mut dsu = DisjointSet::new(ny * nx);
    for j in 0..ny {
        for i in 0..nx {
            if !restricted(j, i) {
                continue;
            }
            if i > 0 && restricted(j, i - 1) {
                dsu.union(j * nx + i, j * nx + i - 1);
            }
            if j > 0 && restricted(j - 1, i) {
                dsu.union(j * nx + i, (j - 1) * nx + i);
            }
        }
    }

    // root flat index → accumulating region
    let mut by_root: Vec<(usize, HotspotRegion)> = Vec::new();
    let mut root_of_cell = vec![usize::MAX; ny * nx];
    for j in 0..ny {
        for i in 0..nx {
            if !restricted(j, i) {
                continue;
            }
            let root = dsu.find(j * nx + i);
            root_of_cell[j * nx + i] = root;
            let dose = field.values[[j, i]];
            let here = (field.spec.x_at(i), field.spec.y_at(j));
            match by_root.iter_mut().find(|(r, _)| *r == root) {
                Some((_, region)) => {
                    region.cells.push((j, i));
                    region.cell_count += 1;
                    if dose > region.peak_dose {
                        region.peak_dose = dose;
                        region.peak_location = here;
                    }
                }
                None => by_root.push((
                    root,
                    HotspotRegion {
                        id: 0,
                        peak_dose: dose,
                        peak_location: here,
                        cell_count: 1,
                        cells: vec![(j, i)],
                    },
                )),
            }
        }
    }

    // Fold raw measurements into the peaks. A sample maps to its nearest
    // grid node; if that node belongs to a region and the measurement
    // exceeds the interpolated peak, the measurement wins.
    for sample in samples {
        if let Some((j, i)) = field.spec.nearest_node(sample.x, sample.y) {
            let root = root_of_cell[j * nx + i];
            if root == usize::MAX {
                continue;
            }
            if let Some((_, region)) = by_root.iter_mut().find(|(r, _)| *r == root) {
                if sample.dose_rate > region.peak_dose {
                    region.peak_dose = sample.dose_rate;
                    region.peak_location = (sample.x, sample.y);
                }
            }
        }
    }

    let mut regions: Vec<HotspotRegion> = by_root.into_iter().map(|(_, r)| r).collect();
    regions.sort_by(|a, b| b.peak_dose.total_cmp(&a.peak_dose));
    for (rank, region) in regions.iter_mut().enumerate() {
        region.id = rank;
    }
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use radmap_types::config::InterpolationMethod;
    use radmap_types::state::GridSpec;

    /// 6x6 field with two separate hot patches and a diagonal-only bridge.
    fn two_patch_field() -> DoseField {
        let spec = GridSpec::new(6, 6, 0.0, 5.0, 0.0, 5.0).unwrap();
        let mut values = Array2::from_elem((6, 6), 0.1);
        // Patch A: rows 0-1, cols 0-1
        values[[0, 0]] = 30.0;
        values[[0, 1]] = 40.0;
        values[[1, 0]] = 28.0;
        values[[1, 1]] = 26.0;
        // Diagonal neighbor of patch A: must NOT join under 4-connectivity
        values[[2, 2]] = 27.0;
        // Patch B: row 5, cols 4-5
        values[[5, 4]] = 50.0;
        values[[5, 5]] = 60.0;
        DoseField::new(spec, values, InterpolationMethod::Linear)
    }

    #[test]
    fn test_four_connectivity_separates_diagonal() {
        let field = two_patch_field();
        let regions = label_hotspots(&field, &ThresholdTable::cern_iaea(), &[]).unwrap();
        assert_eq!(regions.len(), 3);
        let counts: Vec<usize> = regions.iter().map(|r| r.cell_count).collect();
        assert!(counts.contains(&4)); // patch A
        assert!(counts.contains(&2)); // patch B
        assert!(counts.contains(&1)); // the diagonal cell stands alone
    }

    #[test]
    fn test_regions_sorted_hottest_first() {
        let field = two_patch_field();
        let regions = label_hotspots(&field, &ThresholdTable::cern_iaea(), &[]).unwrap();
        assert!((regions[0].peak_dose - 60.0).abs() < 1e-12);
        assert_eq!(regions[0].id, 0);
        assert!(regions
            .windows(2)
            .all(|w| w[0].peak_dose >= w[1].peak_dose));
    }

    #[test]
    fn test_peak_location_matches_peak_cell() {
        let field = two_patch_field();
        let regions = label_hotspots(&field, &ThresholdTable::cern_iaea(), &[]).unwrap();
        // Hottest region peaks at node (5, 5) → (x=5, y=5)
        assert_eq!(regions[0].peak_location, (5.0, 5.0));
    }

    #[test]
    fn test_raw_sample_raises_peak() {
        let field = two_patch_field();
        // A measured spike inside patch A, hotter than any of its nodes
        let spike = SurveyPoint::new(0.9, 0.1, 95.0).unwrap();
        let regions =
            label_hotspots(&field, &ThresholdTable::cern_iaea(), &[spike.clone()]).unwrap();
        let patch_a = regions.iter().find(|r| r.cell_count == 4).unwrap();
        assert!((patch_a.peak_dose - 95.0).abs() < 1e-12);
        assert_eq!(patch_a.peak_location, (0.9, 0.1));
        // The spike re-ranks patch A above patch B
        assert_eq!(patch_a.id, 0);
    }

    #[test]
    fn test_sample_outside_regions_ignored() {
        let field = two_patch_field();
        let cold_area = SurveyPoint::new(3.0, 1.0, 999.0).unwrap();
        let regions = label_hotspots(&field, &ThresholdTable::cern_iaea(), &[cold_area]).unwrap();
        assert!((regions[0].peak_dose - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_restricted_cells_no_regions() {
        let spec = GridSpec::new(4, 4, 0.0, 3.0, 0.0, 3.0).unwrap();
        let values = Array2::from_elem((4, 4), 0.3);
        let field = DoseField::new(spec, values, InterpolationMethod::Idw);
        let regions = label_hotspots(&field, &ThresholdTable::cern_iaea(), &[]).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_whole_grid_restricted_single_region() {
        let spec = GridSpec::new(5, 4, 0.0, 4.0, 0.0, 3.0).unwrap();
        let values = Array2::from_elem((4, 5), 80.0);
        let field = DoseField::new(spec, values, InterpolationMethod::Idw);
        let regions = label_hotspots(&field, &ThresholdTable::cern_iaea(), &[]).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].cell_count, 20);
    }
}
