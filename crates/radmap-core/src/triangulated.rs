// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Linear Barycentric Interpolation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Linear barycentric interpolation over a Delaunay triangulation.
//!
//! Inside the convex hull the estimate is a convex combination of the
//! containing triangle's vertex doses, so it cannot overshoot. Outside the
//! hull it falls back to the nearest sample's measured value rather than
//! extrapolating a plane, which keeps remote grid nodes bounded by real
//! measurements.

use radmap_math::delaunay::Triangulation;
use radmap_types::error::RadMapResult;
use radmap_types::state::SurveyPoint;

#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    triangulation: Triangulation,
    /// Dose per triangulation vertex. Near-duplicate samples were merged
    /// during the build; the first occurrence's dose wins.
    doses: Vec<f64>,
}

impl LinearInterpolator {
    /// Triangulate the sample positions. Fails with `InsufficientGeometry`
    /// for fewer than three distinct positions or a collinear set.
    pub fn new(samples: &[SurveyPoint]) -> RadMapResult<Self> {
        let positions: Vec<[f64; 2]> = samples.iter().map(|p| [p.x, p.y]).collect();
        let triangulation = Triangulation::build(&positions)?;
        let doses = (0..triangulation.num_vertices())
            .map(|i| samples[triangulation.input_index(i)].dose_rate)
            .collect();
        Ok(LinearInterpolator {
            triangulation,
            doses,
        })
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn vertex_dose(&self, i: usize) -> f64 {
        self.doses[i]
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        match self.triangulation.locate(x, y) {
            Some((t, w)) => {
                let [a, b, c] = self.triangulation.triangles()[t];
                w[0] * self.doses[a] + w[1] * self.doses[b] + w[2] * self.doses[c]
            }
            None => self.doses[self.triangulation.nearest_vertex(x, y)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radmap_types::error::RadMapError;

    fn samples(data: &[(f64, f64, f64)]) -> Vec<SurveyPoint> {
        data.iter()
            .map(|&(x, y, d)| SurveyPoint::new(x, y, d).unwrap())
            .collect()
    }

    #[test]
    fn test_exact_at_vertices() {
        let s = samples(&[(0.0, 0.0, 1.0), (10.0, 0.0, 5.0), (0.0, 10.0, 3.0)]);
        let li = LinearInterpolator::new(&s).unwrap();
        for p in &s {
            assert!((li.evaluate(p.x, p.y) - p.dose_rate).abs() < 1e-9);
        }
    }

    #[test]
    fn test_reproduces_linear_ramp() {
        // Doses follow dose = 2x + y exactly; barycentric interpolation of a
        // plane must reproduce it at interior points.
        let ramp = |x: f64, y: f64| 2.0 * x + y;
        let pts = [
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (5.0, 3.0),
        ];
        let s = samples(
            &pts
                .iter()
                .map(|&(x, y)| (x, y, ramp(x, y)))
                .collect::<Vec<_>>(),
        );
        let li = LinearInterpolator::new(&s).unwrap();
        for &(x, y) in &[(2.5, 2.5), (7.0, 4.0), (3.0, 8.0), (6.0, 6.0)] {
            assert!(
                (li.evaluate(x, y) - ramp(x, y)).abs() < 1e-8,
                "ramp mismatch at ({x},{y})"
            );
        }
    }

    #[test]
    fn test_no_overshoot_inside_hull() {
        let s = samples(&[
            (0.0, 0.0, 0.2),
            (20.0, 0.0, 45.0),
            (0.0, 20.0, 3.0),
            (20.0, 20.0, 0.8),
            (10.0, 10.0, 12.0),
        ]);
        let li = LinearInterpolator::new(&s).unwrap();
        for i in 0..=20 {
            for j in 0..=20 {
                let v = li.evaluate(i as f64, j as f64);
                assert!((0.2..=45.0).contains(&v), "overshoot {v} at ({i},{j})");
            }
        }
    }

    #[test]
    fn test_outside_hull_uses_nearest_sample() {
        let s = samples(&[(0.0, 0.0, 1.0), (10.0, 0.0, 5.0), (0.0, 10.0, 3.0)]);
        let li = LinearInterpolator::new(&s).unwrap();
        // Far beyond the hull near the (10, 0) corner
        assert!((li.evaluate(50.0, -5.0) - 5.0).abs() < 1e-12);
        assert!((li.evaluate(-30.0, -30.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let collinear = samples(&[(0.0, 0.0, 1.0), (5.0, 5.0, 2.0), (10.0, 10.0, 3.0)]);
        assert!(matches!(
            LinearInterpolator::new(&collinear),
            Err(RadMapError::InsufficientGeometry { .. })
        ));
        let two = samples(&[(0.0, 0.0, 1.0), (5.0, 0.0, 2.0)]);
        assert!(LinearInterpolator::new(&two).is_err());
    }
}
