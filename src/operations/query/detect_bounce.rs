use crate::error::{Result, TrajectoryError};
use crate::geometry::{Curve, Trajectory, WorldTransform};
use crate::math::{Point3, Vector3};
use crate::operations::{time_grid, whole_steps};

/// The first downward ground crossing of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceEvent {
    /// Time of the first sample at or below the ground.
    pub t: f64,
    /// Raw position at `t`.
    pub position: Point3,
    /// Raw velocity at `t`, from the analytic derivative.
    pub velocity: Vector3,
    /// Position at `t` in world space (unbiased).
    pub world_position: Point3,
}

/// Scans a trajectory for the first step where the world height drops from
/// strictly above `ground` to at or below it.
///
/// A trajectory that starts at or below the ground never bounces.
#[derive(Debug)]
pub struct DetectBounce<'a> {
    trajectory: &'a Trajectory,
    transform: WorldTransform,
    ground: f64,
    step: f64,
}

impl<'a> DetectBounce<'a> {
    /// Creates a new `DetectBounce` query.
    ///
    /// * `ground` - Ground height in world units.
    /// * `step` - Sampling interval in trajectory time.
    #[must_use]
    pub fn new(
        trajectory: &'a Trajectory,
        transform: WorldTransform,
        ground: f64,
        step: f64,
    ) -> Self {
        Self {
            trajectory,
            transform,
            ground,
            step,
        }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::NoGroundCrossing`] if no downward crossing
    /// exists in the domain, and [`TrajectoryError::InvalidStep`] if the step
    /// is not finite and positive.
    pub fn execute(&self) -> Result<BounceEvent> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(TrajectoryError::InvalidStep(self.step).into());
        }

        let domain = self.trajectory.domain();
        let world_y = |t: f64| self.transform.world_y(self.trajectory.y().evaluate(t));

        let mut prev = world_y(domain.t_min);
        if prev > self.ground {
            let steps = whole_steps(domain.span(), self.step);
            for t in time_grid(domain.t_min, self.step, steps).skip(1) {
                let y = world_y(t);
                if prev > self.ground && y <= self.ground {
                    return Ok(self.event_at(t));
                }
                prev = y;
            }
        }

        Err(TrajectoryError::NoGroundCrossing {
            ground: self.ground,
            t_min: domain.t_min,
            t_max: domain.t_max,
        }
        .into())
    }

    fn event_at(&self, t: f64) -> BounceEvent {
        let position = self.trajectory.evaluate(t);
        BounceEvent {
            t,
            position,
            velocity: self.trajectory.velocity(t),
            world_position: self.transform.apply(&position),
        }
    }
}
