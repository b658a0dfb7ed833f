use crate::error::{ConfigError, Result, TrajectoryError};
use crate::geometry::{Curve, SegmentBias, Trajectory, WorldTransform};
use crate::math::Point3;
use crate::operations::query::BounceEvent;
use crate::operations::{time_grid, whole_steps};

/// Which side of the bounce a segment lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Sampled from the original trajectory up to the bounce.
    Pre,
    /// Sampled from the reflected trajectory after the bounce.
    Post,
}

/// An ordered run of world-space points on one side of the bounce.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub kind: SegmentKind,
    pub points: Vec<Point3>,
}

impl PathSegment {
    /// Returns the number of points in the segment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the segment has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The pre- and post-impact segments of one delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct BallPath {
    pub pre: PathSegment,
    pub post: PathSegment,
}

impl BallPath {
    /// Concatenates both segments, pre-impact first.
    #[must_use]
    pub fn combined(&self) -> Vec<Point3> {
        let mut points = Vec::with_capacity(self.pre.len() + self.post.len());
        points.extend_from_slice(&self.pre.points);
        points.extend_from_slice(&self.post.points);
        points
    }
}

/// Sampling parameters shared by both segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSampling {
    step: f64,
    restitution: f64,
    bias: SegmentBias,
}

impl PathSampling {
    /// Creates new sampling parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is not finite and positive, or if
    /// `restitution` is outside the open interval `(0, 1)`.
    pub fn new(step: f64, restitution: f64, bias: SegmentBias) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(TrajectoryError::InvalidStep(step).into());
        }
        if !(restitution > 0.0 && restitution < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "restitution {restitution} must lie in (0, 1)"
            ))
            .into());
        }
        Ok(Self {
            step,
            restitution,
            bias,
        })
    }

    /// Returns the sampling interval.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the restitution coefficient.
    #[must_use]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Returns the horizontal bias applied to every point.
    #[must_use]
    pub fn bias(&self) -> SegmentBias {
        self.bias
    }
}

/// Samples the pre-impact and reflected post-impact segments.
///
/// Each segment is sampled on the step grid from its start and never past
/// its end. The bounce lies on the pre-impact grid, so the pre segment ends
/// exactly at it.
#[derive(Debug)]
pub struct BuildBallPath<'a> {
    trajectory: &'a Trajectory,
    bounce: BounceEvent,
    transform: WorldTransform,
    sampling: PathSampling,
}

impl<'a> BuildBallPath<'a> {
    /// Creates a new `BuildBallPath` operation.
    #[must_use]
    pub fn new(
        trajectory: &'a Trajectory,
        bounce: BounceEvent,
        transform: WorldTransform,
        sampling: PathSampling,
    ) -> Self {
        Self {
            trajectory,
            bounce,
            transform,
            sampling,
        }
    }

    /// Executes the sampling.
    #[must_use]
    pub fn execute(&self) -> BallPath {
        let domain = self.trajectory.domain();
        let pre = self.sample(self.trajectory, domain.t_min, self.bounce.t);

        let reflected = self
            .trajectory
            .reflect_at(self.bounce.t, self.sampling.restitution);
        let post = self.sample(&reflected, 0.0, reflected.domain().t_max);

        BallPath {
            pre: PathSegment {
                kind: SegmentKind::Pre,
                points: pre,
            },
            post: PathSegment {
                kind: SegmentKind::Post,
                points: post,
            },
        }
    }

    fn sample(&self, curve: &Trajectory, start: f64, end: f64) -> Vec<Point3> {
        let step = self.sampling.step;
        let bias = self.sampling.bias;
        let steps = whole_steps(end - start, step);
        time_grid(start, step, steps)
            .map(|t| self.transform.apply_biased(&curve.evaluate(t), bias))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vector3;
    use crate::operations::query::DetectBounce;

    fn delivery() -> Trajectory {
        Trajectory::from_coefficients(
            [0.0, 0.0, -0.95],
            [-0.00145, 0.1418, -0.9646],
            [0.00025, -0.5451, 37.99],
            0.0,
            300.0,
        )
        .unwrap()
    }

    fn stadium() -> WorldTransform {
        WorldTransform::new(
            0.08,
            Vector3::new(0.0, -0.4, -2.5),
            1.5,
            Vector3::new(1.0, 1.0, 1.0),
        )
    }

    fn build(restitution: f64, bias: SegmentBias) -> (BounceEvent, BallPath) {
        let tr = delivery();
        let bounce = DetectBounce::new(&tr, stadium(), 0.1, 1.0).execute().unwrap();
        let sampling = PathSampling::new(1.0, restitution, bias).unwrap();
        let path = BuildBallPath::new(&tr, bounce, stadium(), sampling).execute();
        (bounce, path)
    }

    #[test]
    fn segment_sizes() {
        let (bounce, path) = build(0.9, SegmentBias::default());
        assert_relative_eq!(bounce.t, 151.0);
        // t = 0..=151 and dt = 0..=149
        assert_eq!(path.pre.len(), 152);
        assert_eq!(path.post.len(), 150);
        assert_eq!(path.pre.kind, SegmentKind::Pre);
        assert_eq!(path.post.kind, SegmentKind::Post);
        assert_eq!(path.combined().len(), 302);
    }

    #[test]
    fn segments_meet_at_bounce() {
        let (bounce, path) = build(0.9, SegmentBias::default());
        let last_pre = path.pre.points.last().unwrap();
        let first_post = path.post.points.first().unwrap();
        assert!((last_pre - first_post).norm() < 1e-12);
        assert!((first_post - bounce.world_position).norm() < 1e-12);
    }

    #[test]
    fn post_segment_rises_after_bounce() {
        let (_, path) = build(0.9, SegmentBias::default());
        assert!(path.post.points[1].y > path.post.points[0].y);
    }

    #[test]
    fn bias_applied_to_every_point() {
        let bias = SegmentBias::new(0.01, 4.0);
        let (_, plain) = build(0.9, SegmentBias::default());
        let (_, biased) = build(0.9, bias);
        for (a, b) in plain.combined().iter().zip(biased.combined().iter()) {
            assert_relative_eq!(b.x - a.x, 0.01, epsilon = 1e-9);
            assert_relative_eq!(b.y, a.y);
            assert_relative_eq!(b.z - a.z, 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn post_segment_stays_inside_domain() {
        // Bounce at 5 in [0, 10.5]: the post domain is [0, 5.5]
        let tr = Trajectory::from_coefficients([0.0; 3], [0.0, -1.0, 5.0], [0.0; 3], 0.0, 10.5)
            .unwrap();
        let bounce = DetectBounce::new(&tr, WorldTransform::identity(), 0.0, 1.0)
            .execute()
            .unwrap();
        let sampling = PathSampling::new(1.0, 0.5, SegmentBias::default()).unwrap();
        let path = BuildBallPath::new(&tr, bounce, WorldTransform::identity(), sampling).execute();
        assert_relative_eq!(bounce.t, 5.0);
        assert_eq!(path.pre.len(), 6);
        // dt = 0..=5, nothing extrapolated past 5.5
        assert_eq!(path.post.len(), 6);
        let last = path.post.points.last().unwrap();
        let reflected = tr.reflect_at(bounce.t, 0.5);
        assert!((last - reflected.evaluate(5.0)).norm() < 1e-12);
    }

    #[test]
    fn restitution_bounds() {
        assert!(PathSampling::new(1.0, 0.0, SegmentBias::default()).is_err());
        assert!(PathSampling::new(1.0, 1.0, SegmentBias::default()).is_err());
        assert!(PathSampling::new(-1.0, 0.5, SegmentBias::default()).is_err());
        assert!(PathSampling::new(1.0, 0.9, SegmentBias::default()).is_ok());
    }
}
