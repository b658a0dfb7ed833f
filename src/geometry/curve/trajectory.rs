use crate::error::{Result, TrajectoryError};
use crate::math::{Point3, Vector3};

use super::{Curve, CurveDomain, QuadraticCurve};

/// A projectile path made of one quadratic per axis over a time domain.
///
/// Positions are in the raw coordinate system of the coefficients; mapping
/// into world space is done by [`crate::geometry::WorldTransform`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    x: QuadraticCurve,
    y: QuadraticCurve,
    z: QuadraticCurve,
    domain: CurveDomain,
}

impl Trajectory {
    /// Creates a new trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::InvalidDomain`] if the domain is not finite
    /// or `t_min > t_max`, and [`TrajectoryError::NonFiniteCoefficients`] if
    /// any coefficient is not finite.
    pub fn new(
        x: QuadraticCurve,
        y: QuadraticCurve,
        z: QuadraticCurve,
        domain: CurveDomain,
    ) -> Result<Self> {
        if !domain.is_valid() {
            return Err(TrajectoryError::InvalidDomain {
                t_min: domain.t_min,
                t_max: domain.t_max,
            }
            .into());
        }
        if let Some(axis) = [('X', &x), ('Y', &y), ('Z', &z)]
            .into_iter()
            .find_map(|(axis, curve)| (!curve.is_finite()).then_some(axis))
        {
            return Err(TrajectoryError::NonFiniteCoefficients { axis }.into());
        }
        Ok(Self { x, y, z, domain })
    }

    /// Creates a trajectory from three `[a, b, c]` coefficient triples.
    ///
    /// # Errors
    ///
    /// See [`Trajectory::new`].
    pub fn from_coefficients(
        x: [f64; 3],
        y: [f64; 3],
        z: [f64; 3],
        t_min: f64,
        t_max: f64,
    ) -> Result<Self> {
        Self::new(
            QuadraticCurve::from_coefficients(x),
            QuadraticCurve::from_coefficients(y),
            QuadraticCurve::from_coefficients(z),
            CurveDomain::new(t_min, t_max),
        )
    }

    /// Returns the X-axis quadratic.
    #[must_use]
    pub fn x(&self) -> &QuadraticCurve {
        &self.x
    }

    /// Returns the Y-axis quadratic.
    #[must_use]
    pub fn y(&self) -> &QuadraticCurve {
        &self.y
    }

    /// Returns the Z-axis quadratic.
    #[must_use]
    pub fn z(&self) -> &QuadraticCurve {
        &self.z
    }

    /// Leading coefficients of the three axes.
    #[must_use]
    pub fn leading_coefficients(&self) -> Vector3 {
        Vector3::new(self.x.a(), self.y.a(), self.z.a())
    }

    /// Builds the post-impact trajectory that starts at `t_bounce`.
    ///
    /// The new curve runs on a local time axis `dt = t - t_bounce` over
    /// `[0, t_max - t_bounce]`. It starts at the bounce position, keeps the
    /// horizontal velocity, reverses the vertical velocity scaled by
    /// `restitution`, and reuses each axis' leading coefficient unchanged.
    #[must_use]
    pub fn reflect_at(&self, t_bounce: f64, restitution: f64) -> Trajectory {
        let p = self.evaluate(t_bounce);
        let v = self.velocity(t_bounce);
        Trajectory {
            x: QuadraticCurve::new(self.x.a(), v.x, p.x),
            y: QuadraticCurve::new(self.y.a(), -v.y * restitution, p.y),
            z: QuadraticCurve::new(self.z.a(), v.z, p.z),
            domain: CurveDomain::new(0.0, (self.domain.t_max - t_bounce).max(0.0)),
        }
    }
}

impl Curve for Trajectory {
    fn evaluate(&self, t: f64) -> Point3 {
        Point3::new(self.x.evaluate(t), self.y.evaluate(t), self.z.evaluate(t))
    }

    fn velocity(&self, t: f64) -> Vector3 {
        Vector3::new(
            self.x.derivative(t),
            self.y.derivative(t),
            self.z.derivative(t),
        )
    }

    fn domain(&self) -> CurveDomain {
        self.domain
    }
}
