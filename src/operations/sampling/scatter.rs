use rand::Rng;

use crate::error::{ConfigError, Result};
use crate::math::Point3;

/// Axis-aligned box that impact markers are scattered in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactBounds {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl ImpactBounds {
    /// Creates new bounds from two corners.
    #[must_use]
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `p` lies inside the box (inclusive).
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

impl Default for ImpactBounds {
    fn default() -> Self {
        Self {
            min: Point3::new(-2.0, 0.09, -6.0),
            max: Point3::new(2.0, 0.12, 6.0),
        }
    }
}

/// Scatters impact positions uniformly inside [`ImpactBounds`].
#[derive(Debug)]
pub struct ScatterImpacts {
    bounds: ImpactBounds,
    count: usize,
}

impl ScatterImpacts {
    /// Creates a new `ScatterImpacts` operation.
    #[must_use]
    pub fn new(bounds: ImpactBounds, count: usize) -> Self {
        Self { bounds, count }
    }

    /// Executes the scatter with the given random source.
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is not finite or a minimum exceeds its
    /// maximum.
    pub fn execute<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Point3>> {
        let ImpactBounds { min, max } = self.bounds;
        let axes = [(min.x, max.x), (min.y, max.y), (min.z, max.z)];
        if axes
            .iter()
            .any(|&(lo, hi)| !lo.is_finite() || !hi.is_finite() || lo > hi)
        {
            return Err(ConfigError::Invalid(format!(
                "impact bounds {min} .. {max} are not a valid box"
            ))
            .into());
        }

        Ok((0..self.count)
            .map(|_| {
                Point3::new(
                    rng.gen_range(min.x..=max.x),
                    rng.gen_range(min.y..=max.y),
                    rng.gen_range(min.z..=max.z),
                )
            })
            .collect())
    }
}
