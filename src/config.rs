//! Tunable parameters with the reference values used by the stadium view.

use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::geometry::{SegmentBias, WorldTransform};
use crate::interaction::{ObjectTransform, Orientation};
use crate::math::{Point3, Vector3};
use crate::operations::sampling::{ImpactBounds, PathSampling};
use crate::tessellation::TubeParams;

/// Mapping from raw trajectory coordinates into the model's space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub scale: f64,
    pub height_boost: f64,
    pub offset: Vector3,
    /// `1.0` or `-1.0` per axis.
    pub axis_signs: Vector3,
    /// Ground height above `offset.y`.
    pub ground_lift: f64,
    /// Horizontal nudge applied to both rendered segments.
    pub segment_bias: SegmentBias,
}

impl WorldConfig {
    /// Builds the shared world transform.
    #[must_use]
    pub fn transform(&self) -> WorldTransform {
        WorldTransform::new(self.scale, self.offset, self.height_boost, self.axis_signs)
    }

    /// Ground height in world units.
    #[must_use]
    pub fn ground_height(&self) -> f64 {
        self.offset.y + self.ground_lift
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            scale: 0.08,
            height_boost: 1.5,
            offset: Vector3::new(0.0, -0.4, -2.5),
            axis_signs: Vector3::new(1.0, 1.0, 1.0),
            ground_lift: 0.5,
            segment_bias: SegmentBias::new(0.01, 4.0),
        }
    }
}

/// Time sampling of the trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub step: f64,
    /// Fraction of vertical speed kept after the bounce, in `(0, 1)`.
    pub restitution: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            step: 1.0,
            restitution: 0.9,
        }
    }
}

/// Tube and fallback geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeConfig {
    pub radius: f64,
    pub radial_segments: usize,
    pub ring_normal: Vector3,
    pub fallback_radius: f64,
    /// Length factor for fallback cylinders, in `(0, 1]`.
    pub fallback_overlap: f64,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            radius: 0.07,
            radial_segments: 34,
            ring_normal: Vector3::z(),
            fallback_radius: 0.04,
            fallback_overlap: 0.92,
        }
    }
}

/// The ball that travels along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerConfig {
    pub radius: f64,
    pub duration: Duration,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            radius: 0.1,
            duration: Duration::from_millis(1000),
        }
    }
}

/// Orbit, pinch and double-tap tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// Degrees of yaw per pixel of horizontal drag.
    pub orbit_sensitivity: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub tap_timeout: Duration,
    pub double_tap_timeout: Duration,
    /// Pixels a tap may drift and still count.
    pub tap_slop: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.5,
            min_scale: 0.25,
            max_scale: 2.5,
            tap_timeout: Duration::from_millis(200),
            double_tap_timeout: Duration::from_millis(300),
            tap_slop: 100.0,
        }
    }
}

/// Scattered impact markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactDotConfig {
    pub radius: f64,
    pub bounds: ImpactBounds,
    pub count: usize,
}

impl Default for ImpactDotConfig {
    fn default() -> Self {
        Self {
            radius: 0.05,
            bounds: ImpactBounds::default(),
            count: 1000,
        }
    }
}

/// All parameters of the visualizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizerConfig {
    pub world: WorldConfig,
    pub sampling: SamplingConfig,
    pub tube: TubeConfig,
    pub marker: MarkerConfig,
    pub interaction: InteractionConfig,
    pub impact_dots: ImpactDotConfig,
    /// Placement of the model when it was loaded.
    pub model_placement: ObjectTransform,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            sampling: SamplingConfig::default(),
            tube: TubeConfig::default(),
            marker: MarkerConfig::default(),
            interaction: InteractionConfig::default(),
            impact_dots: ImpactDotConfig::default(),
            model_placement: ObjectTransform::new(
                Point3::new(0.0, -0.3, -4.9),
                Vector3::new(0.45, 0.45, 0.35),
                Orientation::new(3.5, 0.0, 0.0),
            ),
        }
    }
}

impl VisualizerConfig {
    /// Checks every value for range and consistency.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        if !world.scale.is_finite() || world.scale <= 0.0 {
            return Err(invalid("world scale must be finite and positive"));
        }
        if world.axis_signs.iter().any(|s| (s.abs() - 1.0).abs() > f64::EPSILON) {
            return Err(invalid("axis signs must be 1 or -1"));
        }
        self.path_sampling()?;
        self.tube_params()?;
        if !(self.tube.fallback_radius > 0.0 && self.tube.fallback_radius.is_finite()) {
            return Err(invalid("fallback radius must be finite and positive"));
        }
        if !(self.tube.fallback_overlap > 0.0 && self.tube.fallback_overlap <= 1.0) {
            return Err(invalid("fallback overlap must lie in (0, 1]"));
        }
        if !(self.marker.radius > 0.0 && self.marker.radius.is_finite()) {
            return Err(invalid("marker radius must be finite and positive"));
        }
        if self.marker.duration.is_zero() {
            return Err(invalid("marker duration must be non-zero"));
        }
        let inter = &self.interaction;
        if !inter.orbit_sensitivity.is_finite() {
            return Err(invalid("orbit sensitivity must be finite"));
        }
        if !(inter.min_scale > 0.0 && inter.min_scale <= inter.max_scale)
            || !inter.max_scale.is_finite()
        {
            return Err(invalid("scale clamp must satisfy 0 < min <= max"));
        }
        if inter.tap_slop.is_nan() || inter.tap_slop < 0.0 {
            return Err(invalid("tap slop must be non-negative"));
        }
        Ok(())
    }

    /// Path sampling parameters derived from this config.
    ///
    /// # Errors
    ///
    /// Returns an error if the step or restitution is out of range.
    pub fn path_sampling(&self) -> Result<PathSampling> {
        PathSampling::new(
            self.sampling.step,
            self.sampling.restitution,
            self.world.segment_bias,
        )
    }

    /// Tube parameters derived from this config.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius, segment count or ring normal is
    /// invalid.
    pub fn tube_params(&self) -> Result<TubeParams> {
        TubeParams::with_ring_normal(
            self.tube.radius,
            self.tube.radial_segments,
            self.tube.ring_normal,
        )
    }
}

fn invalid(message: &str) -> crate::error::BalltrackError {
    ConfigError::Invalid(message.to_owned()).into()
}
