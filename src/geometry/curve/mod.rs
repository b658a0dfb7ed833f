mod quadratic;
mod trajectory;

pub use quadratic::QuadraticCurve;
pub use trajectory::Trajectory;

use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns `true` if both ends are finite and `t_min <= t_max`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.t_min.is_finite() && self.t_max.is_finite() && self.t_min <= self.t_max
    }

    /// Length of the parameter range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }
}

/// Trait for parametric curves in 3D space.
///
/// Evaluation is total over all real `t`; restricting `t` to
/// [`Curve::domain`] is the caller's job.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// Computes the first derivative with respect to `t`.
    fn velocity(&self, t: f64) -> Vector3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;
}
