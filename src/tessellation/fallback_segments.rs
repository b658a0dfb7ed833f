use crate::math::{Point3, UnitQuaternion, Vector3, TOLERANCE};

/// One rigid cylinder standing in for a stretch of tube.
///
/// The cylinder's local axis is `+Y`; `orientation` rotates it onto the
/// segment direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPrimitive {
    /// Midpoint between the two path points.
    pub center: Point3,
    /// Cylinder height (segment length times the overlap factor).
    pub length: f64,
    /// Cylinder radius.
    pub radius: f64,
    /// Rotation taking `+Y` onto the segment direction.
    pub orientation: UnitQuaternion,
}

/// Approximates a path with one short cylinder per consecutive point pair.
///
/// Used when tube tessellation or submission fails. Never fails itself:
/// coincident points yield a zero-length primitive with identity orientation,
/// and fewer than 2 points yield nothing.
#[derive(Debug)]
pub struct FallbackSegments<'a> {
    points: &'a [Point3],
    radius: f64,
    overlap: f64,
}

impl<'a> FallbackSegments<'a> {
    /// Creates a new fallback operation.
    ///
    /// * `overlap` - Length factor applied to each cylinder (e.g. `0.92`).
    #[must_use]
    pub fn new(points: &'a [Point3], radius: f64, overlap: f64) -> Self {
        Self {
            points,
            radius,
            overlap,
        }
    }

    /// Executes the operation, returning `N - 1` primitives for `N` points.
    #[must_use]
    pub fn execute(&self) -> Vec<SegmentPrimitive> {
        self.points
            .windows(2)
            .map(|pair| {
                let (start, end) = (pair[0], pair[1]);
                let delta = end - start;
                let len = delta.norm();
                SegmentPrimitive {
                    center: Point3::from((start.coords + end.coords) * 0.5),
                    length: len * self.overlap,
                    radius: self.radius,
                    orientation: orientation_along(&delta, len),
                }
            })
            .collect()
    }
}

/// Rotation taking `+Y` onto `delta`, identity for degenerate input.
fn orientation_along(delta: &Vector3, len: f64) -> UnitQuaternion {
    if !len.is_finite() || len < TOLERANCE {
        return UnitQuaternion::identity();
    }
    let dir = delta / len;
    UnitQuaternion::rotation_between(&Vector3::y(), &dir).unwrap_or_else(|| {
        // anti-parallel: half turn about X
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI)
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn one_primitive_per_pair() {
        let points = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 2.0, 0.0), p(1.0, 2.0, -3.0)];
        let prims = FallbackSegments::new(&points, 0.04, 0.92).execute();
        assert_eq!(prims.len(), 3);
        assert!(prims.iter().all(|s| s.length > 0.0));
        assert_relative_eq!(prims[1].length, 2.0 * 0.92, epsilon = 1e-12);
        assert_relative_eq!(prims[2].center.z, -1.5, epsilon = 1e-12);
        assert_relative_eq!(prims[0].radius, 0.04);
    }

    #[test]
    fn axis_follows_segment() {
        let points = vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, -2.0), p(3.0, 0.0, -2.0), p(3.0, -1.0, -2.0)];
        let prims = FallbackSegments::new(&points, 0.04, 0.92).execute();
        let expected = [-Vector3::z(), Vector3::x(), -Vector3::y()];
        for (prim, dir) in prims.iter().zip(expected.iter()) {
            let axis = prim.orientation * Vector3::y();
            assert!((axis - dir).norm() < 1e-9, "axis {axis} != {dir}");
        }
    }

    #[test]
    fn coincident_points_give_zero_length() {
        let points = vec![p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0)];
        let prims = FallbackSegments::new(&points, 0.04, 0.92).execute();
        assert_eq!(prims.len(), 1);
        assert_relative_eq!(prims[0].length, 0.0);
        assert_eq!(prims[0].orientation, UnitQuaternion::identity());
    }

    #[test]
    fn handles_geometry_that_fails_tessellation() {
        // Too many points for 16-bit indices is no problem here.
        let points: Vec<Point3> = (0..3000).map(|i| p(0.0, 0.0, -f64::from(i) * 0.01)).collect();
        let prims = FallbackSegments::new(&points, 0.04, 0.9).execute();
        assert_eq!(prims.len(), 2999);
    }

    #[test]
    fn fewer_than_two_points_is_noop() {
        assert!(FallbackSegments::new(&[], 0.04, 0.92).execute().is_empty());
        assert!(FallbackSegments::new(&[p(0.0, 0.0, 0.0)], 0.04, 0.92)
            .execute()
            .is_empty());
    }
}
