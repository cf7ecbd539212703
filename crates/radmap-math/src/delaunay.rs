//! Delaunay triangulation of scattered survey points.
//!
//! Incremental Bowyer–Watson with a super-triangle. Degenerate inputs
//! (fewer than 3 distinct points, or all points collinear) are rejected
//! eagerly with `InsufficientGeometry`; degeneracy is detected with
//! epsilon-guarded area tests, never by catching floating-point exceptions.

use radmap_types::constants::{GEOM_EPS, SAMPLE_MATCH_EPS};
use radmap_types::error::{RadMapError, RadMapResult};

/// Barycentric coordinates of `p` within triangle `(a, b, c)`.
///
/// Returns `None` for a zero-area triangle. Weights sum to 1; `p` lies
/// inside (or on the edge of) the triangle iff all weights are ≥ 0.
pub fn barycentric(a: [f64; 2], b: [f64; 2], c: [f64; 2], p: [f64; 2]) -> Option<[f64; 3]> {
    let det = (b[1] - c[1]) * (a[0] - c[0]) + (c[0] - b[0]) * (a[1] - c[1]);
    if det.abs() < GEOM_EPS {
        return None;
    }
    let w0 = ((b[1] - c[1]) * (p[0] - c[0]) + (c[0] - b[0]) * (p[1] - c[1])) / det;
    let w1 = ((c[1] - a[1]) * (p[0] - c[0]) + (a[0] - c[0]) * (p[1] - c[1])) / det;
    Some([w0, w1, 1.0 - w0 - w1])
}

/// Twice the signed area of triangle `(a, b, c)`.
fn signed_area2(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Strict circumcircle containment test, orientation-corrected.
fn in_circumcircle(a: [f64; 2], b: [f64; 2], c: [f64; 2], p: [f64; 2]) -> bool {
    let ax = a[0] - p[0];
    let ay = a[1] - p[1];
    let bx = b[0] - p[0];
    let by = b[1] - p[1];
    let cx = c[0] - p[0];
    let cy = c[1] - p[1];

    let det = (ax * ax + ay * ay) * (bx * cy - cx * by)
        - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);

    if signed_area2(a, b, c) > 0.0 {
        det > 0.0
    } else {
        det < 0.0
    }
}

/// Delaunay triangulation of a 2D point set.
///
/// Near-coincident input points (within `SAMPLE_MATCH_EPS`) are merged;
/// `input_index` maps each kept vertex back to the first input point at
/// that location.
#[derive(Debug, Clone)]
pub struct Triangulation {
    vertices: Vec<[f64; 2]>,
    input_index: Vec<usize>,
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Build the triangulation.
    ///
    /// Fails with `InsufficientGeometry` when fewer than 3 distinct points
    /// remain after merging, or when all points are collinear.
    pub fn build(points: &[[f64; 2]]) -> RadMapResult<Self> {
        // Merge near-duplicates, keeping the first occurrence
        let mut vertices: Vec<[f64; 2]> = Vec::with_capacity(points.len());
        let mut input_index: Vec<usize> = Vec::with_capacity(points.len());
        for (i, &p) in points.iter().enumerate() {
            let duplicate = vertices.iter().any(|&v| {
                let dx = v[0] - p[0];
                let dy = v[1] - p[1];
                (dx * dx + dy * dy).sqrt() < SAMPLE_MATCH_EPS
            });
            if !duplicate {
                vertices.push(p);
                input_index.push(i);
            }
        }

        if vertices.len() < 3 {
            return Err(RadMapError::InsufficientGeometry {
                points: vertices.len(),
                message: "at least 3 distinct points are required".into(),
            });
        }
        Self::check_not_collinear(&vertices)?;

        let triangles = Self::bowyer_watson(&vertices);
        if triangles.is_empty() {
            // Numerically collinear inputs that slipped past the area test
            return Err(RadMapError::InsufficientGeometry {
                points: vertices.len(),
                message: "triangulation produced no triangles".into(),
            });
        }

        Ok(Triangulation {
            vertices,
            input_index,
            triangles,
        })
    }

    fn check_not_collinear(vertices: &[[f64; 2]]) -> RadMapResult<()> {
        // Anchor on the pair with the largest separation, then look for any
        // third point off that line
        let a = vertices[0];
        let mut b = vertices[1];
        let mut best = 0.0;
        for &v in &vertices[1..] {
            let d = (v[0] - a[0]).powi(2) + (v[1] - a[1]).powi(2);
            if d > best {
                best = d;
                b = v;
            }
        }
        let span = best.sqrt();
        let max_offset = vertices
            .iter()
            .map(|&v| signed_area2(a, b, v).abs())
            .fold(0.0, f64::max);
        if max_offset <= GEOM_EPS.max(1e-9 * span * span) {
            return Err(RadMapError::InsufficientGeometry {
                points: vertices.len(),
                message: "all points are collinear".into(),
            });
        }
        Ok(())
    }

    fn bowyer_watson(vertices: &[[f64; 2]]) -> Vec<[usize; 3]> {
        let n = vertices.len();

        // Super-triangle comfortably containing every point
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for v in vertices {
            x_min = x_min.min(v[0]);
            x_max = x_max.max(v[0]);
            y_min = y_min.min(v[1]);
            y_max = y_max.max(v[1]);
        }
        let span = (x_max - x_min).max(y_max - y_min).max(1.0);
        let cx = 0.5 * (x_min + x_max);
        let cy = 0.5 * (y_min + y_max);
        let mut all: Vec<[f64; 2]> = vertices.to_vec();
        all.push([cx - 20.0 * span, cy - 10.0 * span]);
        all.push([cx + 20.0 * span, cy - 10.0 * span]);
        all.push([cx, cy + 20.0 * span]);

        let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

        for i in 0..n {
            let p = all[i];

            // Cavity: triangles whose circumcircle contains p
            let mut bad: Vec<usize> = Vec::new();
            for (t, tri) in triangles.iter().enumerate() {
                if in_circumcircle(all[tri[0]], all[tri[1]], all[tri[2]], p) {
                    bad.push(t);
                }
            }

            // Cavity boundary: edges used by exactly one bad triangle
            let mut edges: Vec<(usize, usize)> = Vec::new();
            for &t in &bad {
                let tri = triangles[t];
                for k in 0..3 {
                    let e = (tri[k], tri[(k + 1) % 3]);
                    let rev = (e.1, e.0);
                    if let Some(pos) = edges.iter().position(|&x| x == rev || x == e) {
                        edges.swap_remove(pos);
                    } else {
                        edges.push(e);
                    }
                }
            }

            for &t in bad.iter().rev() {
                triangles.swap_remove(t);
            }
            for (u, v) in edges {
                triangles.push([u, v, i]);
            }
        }

        // Drop triangles that touch the super-triangle
        triangles.retain(|tri| tri.iter().all(|&v| v < n));
        triangles
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex(&self, i: usize) -> [f64; 2] {
        self.vertices[i]
    }

    /// Index into the original input slice for kept vertex `i`.
    pub fn input_index(&self, i: usize) -> usize {
        self.input_index[i]
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Vertex coordinates of triangle `t`.
    pub fn triangle_vertices(&self, t: usize) -> [[f64; 2]; 3] {
        let [a, b, c] = self.triangles[t];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Find the triangle containing `(x, y)` and the barycentric weights of
    /// the query within it. `None` outside the convex hull.
    ///
    /// Weights are clamped to `[0, 1]` and renormalized, so edge queries are
    /// numerically stable.
    pub fn locate(&self, x: f64, y: f64) -> Option<(usize, [f64; 3])> {
        let p = [x, y];
        for (t, tri) in self.triangles.iter().enumerate() {
            let [a, b, c] = [
                self.vertices[tri[0]],
                self.vertices[tri[1]],
                self.vertices[tri[2]],
            ];
            if let Some(w) = barycentric(a, b, c, p) {
                if w.iter().all(|&wi| wi >= -1e-9) {
                    let clamped = [w[0].max(0.0), w[1].max(0.0), w[2].max(0.0)];
                    let sum = clamped[0] + clamped[1] + clamped[2];
                    return Some((t, [clamped[0] / sum, clamped[1] / sum, clamped[2] / sum]));
                }
            }
        }
        None
    }

    /// Brute-force nearest vertex to `(x, y)`.
    pub fn nearest_vertex(&self, x: f64, y: f64) -> usize {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for (i, v) in self.vertices.iter().enumerate() {
            let d = (v[0] - x).powi(2) + (v[1] - y).powi(2);
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        best
    }
}
