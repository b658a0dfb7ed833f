use crate::math::{Point3, UnitQuaternion, Vector3};

/// Rotation as three angles in degrees about the X, Y and Z axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    /// Tilt about X.
    pub x: f64,
    /// Yaw about the vertical Y axis.
    pub y: f64,
    /// Roll about Z.
    pub z: f64,
}

impl Orientation {
    /// Creates an orientation from degrees.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Converts to a quaternion (X applied first, then Y, then Z).
    #[must_use]
    pub fn to_quaternion(&self) -> UnitQuaternion {
        UnitQuaternion::from_euler_angles(
            self.x.to_radians(),
            self.y.to_radians(),
            self.z.to_radians(),
        )
    }
}

/// Placement of the displayed object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub position: Point3,
    /// Per-axis scale.
    pub scale: Vector3,
    pub orientation: Orientation,
}

impl ObjectTransform {
    /// Creates a new transform.
    #[must_use]
    pub fn new(position: Point3, scale: Vector3, orientation: Orientation) -> Self {
        Self {
            position,
            scale,
            orientation,
        }
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::new(Point3::origin(), Vector3::new(1.0, 1.0, 1.0), Orientation::default())
    }
}

/// Transform captured when the object was loaded.
///
/// Gestures are always expressed relative to this snapshot; it is never
/// re-derived from the live transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTransform(ObjectTransform);

impl ReferenceTransform {
    /// Captures a snapshot.
    #[must_use]
    pub fn capture(transform: ObjectTransform) -> Self {
        Self(transform)
    }

    /// Returns the captured transform.
    #[must_use]
    pub fn get(&self) -> &ObjectTransform {
        &self.0
    }
}
