use std::f64::consts::TAU;

use crate::error::{MeshError, Result};
use crate::math::{is_finite_point, Point3, Vector3};

use super::{TriangleMesh, TubeParams, MAX_INDEXED_VERTICES};

/// Sweeps a circular cross-section along a polyline.
///
/// Every ring lies in the same plane (orthogonal to
/// [`TubeParams::ring_normal`]) and does not turn with the path, so the tube
/// pinches where the path runs parallel to that plane.
#[derive(Debug)]
pub struct TessellateTube<'a> {
    points: &'a [Point3],
    params: TubeParams,
}

impl<'a> TessellateTube<'a> {
    /// Creates a new tube tessellation operation.
    #[must_use]
    pub fn new(points: &'a [Point3], params: TubeParams) -> Self {
        Self { points, params }
    }

    /// Executes the tessellation.
    ///
    /// Produces `N * R` vertices and `2 * R * (N - 1)` triangles for `N`
    /// path points and `R` radial segments.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InsufficientPathLength`] for fewer than 2 points,
    /// [`MeshError::IndexOverflow`] if the vertices cannot be addressed with
    /// 16-bit indices, and [`MeshError::Degenerate`] for non-finite points.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let n = self.points.len();
        if n < 2 {
            return Err(MeshError::InsufficientPathLength { points: n }.into());
        }

        let ring = self.params.radial_segments();
        let vertex_count = n.saturating_mul(ring);
        if vertex_count > MAX_INDEXED_VERTICES {
            return Err(MeshError::IndexOverflow {
                vertices: vertex_count,
                max: MAX_INDEXED_VERTICES,
            }
            .into());
        }

        if let Some(i) = self.points.iter().position(|p| !is_finite_point(p)) {
            return Err(MeshError::Degenerate(format!("path point {i} is not finite")).into());
        }

        let (u, v) = self.params.ring_basis();
        let radius = self.params.radius();
        let offsets: Vec<Vector3> = (0..ring)
            .map(|j| {
                let angle = TAU * j as f64 / ring as f64;
                (u * angle.cos() + v * angle.sin()) * radius
            })
            .collect();

        let mut vertices = Vec::with_capacity(vertex_count);
        for p in self.points {
            vertices.extend(offsets.iter().map(|off| p + off));
        }

        // Quad between rings i and i+1 at angle j:
        //   a = (i, j), b = (i, j+1), c = (i+1, j), d = (i+1, j+1)
        // split into (a, c, b) and (b, c, d).
        let mut indices = Vec::with_capacity(2 * ring * (n - 1));
        for i in 0..n - 1 {
            let row = i * ring;
            let next = row + ring;
            for j in 0..ring {
                let k = (j + 1) % ring;
                let a = (row + j) as u16;
                let b = (row + k) as u16;
                let c = (next + j) as u16;
                let d = (next + k) as u16;
                indices.push([a, c, b]);
                indices.push([b, c, d]);
            }
        }

        Ok(TriangleMesh { vertices, indices })
    }
}
