//! Smooth cubic interpolation over a Delaunay triangulation.
//!
//! Clough–Tocher style scheme: vertex gradients are estimated from the
//! planes of incident triangles, then each triangle carries a cubic Bézier
//! patch built from vertex values and gradients. The surface is continuous
//! everywhere and visibly smooth at sample points, but the cubic can
//! overshoot the sampled range between samples. Rendering use only; zone
//! classification and hotspot labeling refuse fields produced here.

use radmap_math::delaunay::Triangulation;
use radmap_types::error::RadMapResult;
use radmap_types::state::SurveyPoint;

/// Control net ordering for one cubic patch:
/// `[b300, b030, b003, b210, b201, b120, b021, b102, b012, b111]`.
type ControlNet = [f64; 10];

#[derive(Debug, Clone)]
pub struct CloughTocherInterpolator {
    triangulation: Triangulation,
    doses: Vec<f64>,
    control: Vec<ControlNet>,
}

impl CloughTocherInterpolator {
    pub fn new(samples: &[SurveyPoint]) -> RadMapResult<Self> {
        let positions: Vec<[f64; 2]> = samples.iter().map(|p| [p.x, p.y]).collect();
        let triangulation = Triangulation::build(&positions)?;
        let doses: Vec<f64> = (0..triangulation.num_vertices())
            .map(|i| samples[triangulation.input_index(i)].dose_rate)
            .collect();
        let gradients = estimate_gradients(&triangulation, &doses);
        let control = triangulation
            .triangles()
            .iter()
            .map(|&[a, b, c]| {
                build_control_net(
                    triangulation.vertex(a),
                    triangulation.vertex(b),
                    triangulation.vertex(c),
                    [doses[a], doses[b], doses[c]],
                    [gradients[a], gradients[b], gradients[c]],
                )
            })
            .collect();
        Ok(CloughTocherInterpolator {
            triangulation,
            doses,
            control,
        })
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        match self.triangulation.locate(x, y) {
            Some((t, w)) => eval_cubic(&self.control[t], w),
            None => self.doses[self.triangulation.nearest_vertex(x, y)],
        }
    }
}

/// Per-vertex gradient: area-weighted average of the plane gradients of the
/// incident triangles.
fn estimate_gradients(tri: &Triangulation, doses: &[f64]) -> Vec<[f64; 2]> {
    let mut grad = vec![[0.0f64; 2]; tri.num_vertices()];
    let mut weight = vec![0.0f64; tri.num_vertices()];
    for &[ia, ib, ic] in tri.triangles() {
        let (a, b, c) = (tri.vertex(ia), tri.vertex(ib), tri.vertex(ic));
        let det = (b[1] - c[1]) * (a[0] - c[0]) + (c[0] - b[0]) * (a[1] - c[1]);
        // Gradients of the barycentric coordinate functions
        let gwa = [(b[1] - c[1]) / det, (c[0] - b[0]) / det];
        let gwb = [(c[1] - a[1]) / det, (a[0] - c[0]) / det];
        let gwc = [-gwa[0] - gwb[0], -gwa[1] - gwb[1]];
        let (fa, fb, fc) = (doses[ia], doses[ib], doses[ic]);
        let g = [
            fa * gwa[0] + fb * gwb[0] + fc * gwc[0],
            fa * gwa[1] + fb * gwb[1] + fc * gwc[1],
        ];
        let area = det.abs() / 2.0;
        for &v in &[ia, ib, ic] {
            grad[v][0] += area * g[0];
            grad[v][1] += area * g[1];
            weight[v] += area;
        }
    }
    for (g, &w) in grad.iter_mut().zip(&weight) {
        if w > 0.0 {
            g[0] /= w;
            g[1] /= w;
        }
    }
    grad
}

fn build_control_net(
    a: [f64; 2],
    b: [f64; 2],
    c: [f64; 2],
    f: [f64; 3],
    g: [[f64; 2]; 3],
) -> ControlNet {
    let third = |from: [f64; 2], to: [f64; 2], fv: f64, gv: [f64; 2]| {
        fv + (gv[0] * (to[0] - from[0]) + gv[1] * (to[1] - from[1])) / 3.0
    };
    let b210 = third(a, b, f[0], g[0]);
    let b201 = third(a, c, f[0], g[0]);
    let b120 = third(b, a, f[1], g[1]);
    let b021 = third(b, c, f[1], g[1]);
    let b102 = third(c, a, f[2], g[2]);
    let b012 = third(c, b, f[2], g[2]);
    // Center control point chosen for quadratic precision
    let e = (b210 + b201 + b120 + b021 + b102 + b012) / 6.0;
    let v = (f[0] + f[1] + f[2]) / 3.0;
    let b111 = e + (e - v) / 2.0;
    [f[0], f[1], f[2], b210, b201, b120, b021, b102, b012, b111]
}

fn eval_cubic(net: &ControlNet, w: [f64; 3]) -> f64 {
    let [u, v, t] = w;
    net[0] * u * u * u
        + net[1] * v * v * v
        + net[2] * t * t * t
        + 3.0 * net[3] * u * u * v
        + 3.0 * net[4] * u * u * t
        + 3.0 * net[5] * u * v * v
        + 3.0 * net[6] * v * v * t
        + 3.0 * net[7] * u * t * t
        + 3.0 * net[8] * v * t * t
        + 6.0 * net[9] * u * v * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(data: &[(f64, f64, f64)]) -> Vec<SurveyPoint> {
        data.iter()
            .map(|&(x, y, d)| SurveyPoint::new(x, y, d).unwrap())
            .collect()
    }

    #[test]
    fn test_exact_at_vertices() {
        let s = samples(&[
            (0.0, 0.0, 1.0),
            (10.0, 0.0, 5.0),
            (0.0, 10.0, 3.0),
            (10.0, 10.0, 8.0),
        ]);
        let ct = CloughTocherInterpolator::new(&s).unwrap();
        for p in &s {
            assert!(
                (ct.evaluate(p.x, p.y) - p.dose_rate).abs() < 1e-8,
                "vertex mismatch at ({}, {})",
                p.x,
                p.y
            );
        }
    }

    #[test]
    fn test_linear_precision() {
        // For a globally linear dose surface every incident-plane gradient
        // is the true gradient and the cubic collapses to the plane.
        let ramp = |x: f64, y: f64| 0.7 * x - 0.3 * y + 2.0;
        let pts = [
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (4.0, 6.0),
        ];
        let s = samples(
            &pts
                .iter()
                .map(|&(x, y)| (x, y, ramp(x, y)))
                .collect::<Vec<_>>(),
        );
        let ct = CloughTocherInterpolator::new(&s).unwrap();
        for &(x, y) in &[(1.0, 1.0), (5.0, 5.0), (8.0, 2.0), (3.0, 7.0)] {
            assert!(
                (ct.evaluate(x, y) - ramp(x, y)).abs() < 1e-8,
                "linear precision fails at ({x},{y})"
            );
        }
    }

    #[test]
    fn test_continuous_across_interior_edge() {
        let s = samples(&[
            (0.0, 0.0, 1.0),
            (10.0, 0.0, 20.0),
            (5.0, 8.0, 3.0),
            (5.0, -8.0, 12.0),
        ]);
        let ct = CloughTocherInterpolator::new(&s).unwrap();
        // (5, 0) lies on the shared edge between the upper and lower
        // triangles; the patch values must agree from both sides.
        let above = ct.evaluate(5.0, 1e-7);
        let below = ct.evaluate(5.0, -1e-7);
        assert!((above - below).abs() < 1e-4, "jump {above} vs {below}");
    }

    #[test]
    fn test_outside_hull_uses_nearest_sample() {
        let s = samples(&[(0.0, 0.0, 1.0), (10.0, 0.0, 5.0), (0.0, 10.0, 3.0)]);
        let ct = CloughTocherInterpolator::new(&s).unwrap();
        assert!((ct.evaluate(100.0, 0.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let s = samples(&[(0.0, 0.0, 1.0), (5.0, 5.0, 2.0), (10.0, 10.0, 3.0)]);
        assert!(CloughTocherInterpolator::new(&s).is_err());
    }
}
