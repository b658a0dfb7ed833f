/// 2D point type (screen coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit quaternion used for primitive orientation.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if all three coordinates of `p` are finite.
#[must_use]
pub fn is_finite_point(p: &Point3) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

/// Finds a unit direction perpendicular to the given unit vector.
///
/// For `+Z` this is `+X`, so rings built from the pair
/// `(perpendicular_dir(n), n x perpendicular_dir(n))` lie in the XY plane
/// with angle zero on the X axis.
#[must_use]
pub fn perpendicular_dir(axis: &Vector3) -> Vector3 {
    let candidate = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let projected = candidate - axis * axis.dot(&candidate);
    projected / projected.norm()
}
