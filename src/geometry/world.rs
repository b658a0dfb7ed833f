use crate::math::{Point3, Vector3};

/// Horizontal nudge applied to one rendered path segment.
///
/// Only X and Z can be biased, so a biased segment keeps exactly the world
/// heights the bounce detector compares against the ground.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentBias {
    pub x: f64,
    pub z: f64,
}

impl SegmentBias {
    /// Creates a new bias.
    #[must_use]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// Maps raw trajectory coordinates into scene space.
///
/// `world = sign * raw * scale + offset`, with `height_boost` added to Y.
/// Bounce detection and path sampling must share one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    scale: f64,
    offset: Vector3,
    height_boost: f64,
    axis_signs: Vector3,
}

impl WorldTransform {
    /// Creates a new transform.
    ///
    /// `axis_signs` entries are expected to be `1.0` or `-1.0`.
    #[must_use]
    pub fn new(scale: f64, offset: Vector3, height_boost: f64, axis_signs: Vector3) -> Self {
        Self {
            scale,
            offset,
            height_boost,
            axis_signs,
        }
    }

    /// The identity mapping.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(1.0, Vector3::zeros(), 0.0, Vector3::new(1.0, 1.0, 1.0))
    }

    /// Returns the uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the fixed offset.
    #[must_use]
    pub fn offset(&self) -> &Vector3 {
        &self.offset
    }

    /// Maps a raw Y value to a world height.
    #[must_use]
    pub fn world_y(&self, raw_y: f64) -> f64 {
        self.axis_signs.y * raw_y * self.scale + self.height_boost + self.offset.y
    }

    /// Maps a raw point into world space.
    #[must_use]
    pub fn apply(&self, raw: &Point3) -> Point3 {
        Point3::new(
            self.axis_signs.x * raw.x * self.scale + self.offset.x,
            self.world_y(raw.y),
            self.axis_signs.z * raw.z * self.scale + self.offset.z,
        )
    }

    /// Maps a raw point into world space and adds a segment bias.
    #[must_use]
    pub fn apply_biased(&self, raw: &Point3, bias: SegmentBias) -> Point3 {
        let p = self.apply(raw);
        Point3::new(p.x + bias.x, p.y, p.z + bias.z)
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::identity()
    }
}
