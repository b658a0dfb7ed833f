mod fallback_segments;
mod tessellate_tube;

pub use fallback_segments::{FallbackSegments, SegmentPrimitive};
pub use tessellate_tube::TessellateTube;

use crate::error::{MeshError, Result};
use crate::math::{perpendicular_dir, Point3, Vector3, TOLERANCE};

/// Largest vertex count addressable by a 16-bit index buffer.
pub const MAX_INDEXED_VERTICES: usize = u16::MAX as usize + 1;

/// Parameters controlling tube tessellation.
#[derive(Debug, Clone, Copy)]
pub struct TubeParams {
    radius: f64,
    radial_segments: usize,
    ring_normal: Vector3,
}

impl TubeParams {
    /// Creates tube parameters with rings in the XY plane.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not finite and positive or
    /// `radial_segments < 3`.
    pub fn new(radius: f64, radial_segments: usize) -> Result<Self> {
        Self::with_ring_normal(radius, radial_segments, Vector3::z())
    }

    /// Creates tube parameters whose rings all lie in the plane orthogonal
    /// to `ring_normal`.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not finite and positive,
    /// `radial_segments < 3`, or `ring_normal` is zero-length.
    pub fn with_ring_normal(
        radius: f64,
        radial_segments: usize,
        ring_normal: Vector3,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MeshError::InvalidParameters(
                "tube radius must be finite and positive".to_owned(),
            )
            .into());
        }
        if radial_segments < 3 {
            return Err(MeshError::InvalidParameters(
                "tube needs at least 3 radial segments".to_owned(),
            )
            .into());
        }
        let len = ring_normal.norm();
        if !len.is_finite() || len < TOLERANCE {
            return Err(
                MeshError::InvalidParameters("ring normal must be non-zero".to_owned()).into(),
            );
        }
        Ok(Self {
            radius,
            radial_segments,
            ring_normal: ring_normal / len,
        })
    }

    /// Returns the tube radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the number of vertices per ring.
    #[must_use]
    pub fn radial_segments(&self) -> usize {
        self.radial_segments
    }

    /// Returns the unit normal shared by every ring.
    #[must_use]
    pub fn ring_normal(&self) -> &Vector3 {
        &self.ring_normal
    }

    /// Returns the in-plane basis `(u, v)` used for ring angles.
    ///
    /// Angle zero lies on `u`; `v = normal x u`.
    #[must_use]
    pub fn ring_basis(&self) -> (Vector3, Vector3) {
        let u = perpendicular_dir(&self.ring_normal);
        let v = self.ring_normal.cross(&u);
        (u, v)
    }
}

/// An indexed triangle mesh ready for submission to a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u16; 3]>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Flattens the index triples into a single index buffer.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u16> {
        self.indices.iter().flatten().copied().collect()
    }

    /// Packs vertex positions as interleaved `f32` triples.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn positions_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }
}
