//! Application-facing entry points: draw a delivery, animate the ball, and
//! route touch input to the displayed stadium model.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::animation::{AnimationTicket, MarkerAnimator, MarkerStep};
use crate::config::VisualizerConfig;
use crate::error::{Result, SceneError};
use crate::geometry::Trajectory;
use crate::interaction::{InteractionController, ObjectTransform, TouchInput};
use crate::math::Point3;
use crate::operations::query::{BounceEvent, DetectBounce};
use crate::operations::sampling::{BuildBallPath, PathSampling, PathSegment, ScatterImpacts};
use crate::scene::{
    Color, Material, MeshHandle, ModelParts, PitchOverlay, Placement, Primitive, RenderEngine,
};
use crate::tessellation::{FallbackSegments, TessellateTube, TubeParams};

const PATH_MATERIAL: Material = Material::color(Color::RED);
const MARKER_MATERIAL: Material = Material::color(Color::WHITE);
const IMPACT_MATERIAL: Material = Material::color(Color::RED);

/// How one path segment ended up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRender {
    /// Swept tube mesh.
    Tube {
        handle: MeshHandle,
        vertices: usize,
        triangles: usize,
    },
    /// Chain of cylinders after the tube could not be built or submitted.
    Fallback { cylinders: usize },
    /// Fewer than 2 points; nothing drawn.
    Skipped,
}

/// Result of a successful [`Visualizer::draw_path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawReport {
    pub bounce: BounceEvent,
    pub pre: SegmentRender,
    pub post: SegmentRender,
    /// Points the marker will visit.
    pub marker_points: usize,
    pub animation: AnimationTicket,
}

/// Owns everything the ball-track view puts into the rendering engine.
///
/// Geometry is parented under the loaded model through `E`. When the model
/// asset is missing, model-dependent actions degrade to logged no-ops.
#[derive(Debug)]
pub struct Visualizer<E: RenderEngine, M: ModelParts> {
    config: VisualizerConfig,
    sampling: PathSampling,
    tube: TubeParams,
    engine: E,
    model: Option<M>,
    overlay: PitchOverlay,
    controller: InteractionController,
    animator: MarkerAnimator,
    path_meshes: Vec<MeshHandle>,
    marker: Option<MeshHandle>,
    impact_dots: Vec<MeshHandle>,
}

impl<E: RenderEngine, M: ModelParts> Visualizer<E, M> {
    /// Creates a visualizer and places the model at its reference transform.
    ///
    /// `model` is `None` when the asset loader could not supply the model.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: VisualizerConfig, mut engine: E, model: Option<M>) -> Result<Self> {
        config.validate()?;
        let sampling = config.path_sampling()?;
        let tube = config.tube_params()?;

        if model.is_some() {
            engine.set_model_transform(&config.model_placement);
        } else {
            warn!("stadium model unavailable; view controls disabled");
        }

        Ok(Self {
            config,
            sampling,
            tube,
            engine,
            model,
            overlay: PitchOverlay::default(),
            controller: InteractionController::new(config.model_placement, config.interaction),
            animator: MarkerAnimator::new(),
            path_meshes: Vec::new(),
            marker: None,
            impact_dots: Vec::new(),
        })
    }

    /// Replaces the pitch overlay preset.
    #[must_use]
    pub fn with_overlay(mut self, overlay: PitchOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Draws the path of `trajectory` and starts the marker along it.
    ///
    /// Previous path geometry is released only once a bounce has been found,
    /// so a trajectory without a ground crossing leaves the last drawing in
    /// place. Tube failures fall back to cylinder chains and are not
    /// reported as errors.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TrajectoryError::NoGroundCrossing`] when the
    /// trajectory never comes down through the ground; callers show this
    /// to the user as a notice.
    pub fn draw_path(&mut self, trajectory: &Trajectory) -> Result<DrawReport> {
        let transform = self.config.world.transform();
        let bounce = DetectBounce::new(
            trajectory,
            transform,
            self.config.world.ground_height(),
            self.sampling.step(),
        )
        .execute()
        .inspect_err(|e| {
            if e.is_user_notice() {
                warn!(error = %e, "no ground crossing; path not drawn");
            }
        })?;
        debug!(t = bounce.t, "bounce detected");

        let path = BuildBallPath::new(trajectory, bounce, transform, self.sampling).execute();
        debug!(pre = path.pre.len(), post = path.post.len(), "path sampled");

        self.release_path();
        let pre = self.render_segment(&path.pre);
        let post = self.render_segment(&path.post);

        let points = path.combined();
        let marker_points = points.len();
        if let Some(first) = points.first() {
            self.place_marker(*first);
        }
        let animation = self.animator.start(points, self.config.marker.duration);

        Ok(DrawReport {
            bounce,
            pre,
            post,
            marker_points,
            animation,
        })
    }

    /// Advances the marker animation by one frame.
    pub fn tick(&mut self, dt: Duration) -> Option<MarkerStep> {
        let step = self.animator.advance(dt)?;
        if let Some(marker) = self.marker {
            if let Err(e) = self.engine.set_position(marker, step.position) {
                warn!(error = %e, "marker lost; animation stopped");
                self.marker = None;
                self.animator.cancel();
            }
        }
        Some(step)
    }

    /// Feeds a touch event to the view controls.
    ///
    /// Returns the transform applied to the model, if it changed.
    pub fn handle_touch(&mut self, input: &TouchInput) -> Option<ObjectTransform> {
        if self.model.is_none() {
            return None;
        }
        let transform = self.controller.handle(input)?;
        self.engine.set_model_transform(&transform);
        Some(transform)
    }

    /// Restores the model to its reference transform.
    pub fn reset_view(&mut self) -> Option<ObjectTransform> {
        self.model.as_ref()?;
        let transform = self.controller.reset();
        self.engine.set_model_transform(&transform);
        Some(transform)
    }

    /// Shows or hides one named model part, returning how many matched.
    pub fn toggle_visual_overlay(&mut self, name: &str, visible: bool) -> usize {
        match self.model_mut() {
            Ok(model) => model.set_part_visibility(name, visible),
            Err(e) => {
                warn!(error = %e, name, "overlay toggle ignored");
                0
            }
        }
    }

    /// Applies the pitch overlay preset, returning how many parts changed.
    pub fn toggle_pitch(&mut self, show_pitch: bool) -> usize {
        let overlay = &self.overlay;
        match self.model.as_mut() {
            Some(model) => overlay.apply(model, show_pitch),
            None => {
                warn!(show_pitch, "pitch overlay ignored; model unavailable");
                0
            }
        }
    }

    /// Places an impact dot at each position, returning how many were
    /// created.
    pub fn add_impact_dots(&mut self, positions: &[Point3]) -> usize {
        let primitive = Primitive::Sphere {
            radius: self.config.impact_dots.radius,
        };
        let before = self.impact_dots.len();
        for position in positions {
            match self
                .engine
                .spawn_primitive(primitive, Placement::at(*position), IMPACT_MATERIAL)
            {
                Ok(handle) => self.impact_dots.push(handle),
                Err(e) => warn!(error = %e, "impact dot dropped"),
            }
        }
        self.impact_dots.len() - before
    }

    /// Removes every impact dot.
    pub fn clear_impact_dots(&mut self) {
        release_all(&mut self.engine, &mut self.impact_dots, "impact dot");
    }

    /// Replaces all impact dots with dots at `positions`.
    pub fn update_impact_dots(&mut self, positions: &[Point3]) -> usize {
        self.clear_impact_dots();
        self.add_impact_dots(positions)
    }

    /// Replaces all impact dots with a fresh random scatter.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured scatter bounds are invalid.
    pub fn scatter_impact_dots<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let dots = &self.config.impact_dots;
        let positions = ScatterImpacts::new(dots.bounds, dots.count).execute(rng)?;
        Ok(self.update_impact_dots(&positions))
    }

    /// Stops the animation and releases all geometry owned by the view.
    pub fn clear(&mut self) {
        self.animator.cancel();
        self.release_path();
        if let Some(marker) = self.marker.take() {
            if let Err(e) = self.engine.destroy(marker) {
                warn!(error = %e, "failed to release marker");
            }
        }
        self.clear_impact_dots();
    }

    #[must_use]
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    #[must_use]
    pub fn animator(&self) -> &MarkerAnimator {
        &self.animator
    }

    /// Handles of the current path geometry (tubes or fallback cylinders).
    #[must_use]
    pub fn path_meshes(&self) -> &[MeshHandle] {
        &self.path_meshes
    }

    #[must_use]
    pub fn marker(&self) -> Option<MeshHandle> {
        self.marker
    }

    #[must_use]
    pub fn impact_dots(&self) -> &[MeshHandle] {
        &self.impact_dots
    }

    fn model_mut(&mut self) -> Result<&mut M> {
        self.model
            .as_mut()
            .ok_or_else(|| SceneError::AssetUnavailable("stadium model".into()).into())
    }

    fn release_path(&mut self) {
        release_all(&mut self.engine, &mut self.path_meshes, "path mesh");
    }

    fn render_segment(&mut self, segment: &PathSegment) -> SegmentRender {
        if segment.len() < 2 {
            debug!(kind = ?segment.kind, points = segment.len(), "segment too short to draw");
            return SegmentRender::Skipped;
        }

        let built = TessellateTube::new(&segment.points, self.tube)
            .execute()
            .and_then(|mesh| {
                let handle = self.engine.submit_mesh(&mesh, PATH_MATERIAL)?;
                Ok((handle, mesh))
            });

        match built {
            Ok((handle, mesh)) => {
                self.path_meshes.push(handle);
                SegmentRender::Tube {
                    handle,
                    vertices: mesh.vertex_count(),
                    triangles: mesh.triangle_count(),
                }
            }
            Err(e) => {
                warn!(kind = ?segment.kind, error = %e, "tube unavailable; drawing segments");
                SegmentRender::Fallback {
                    cylinders: self.render_fallback(&segment.points),
                }
            }
        }
    }

    fn render_fallback(&mut self, points: &[Point3]) -> usize {
        let tube = &self.config.tube;
        let segments =
            FallbackSegments::new(points, tube.fallback_radius, tube.fallback_overlap).execute();

        let before = self.path_meshes.len();
        for segment in segments {
            let primitive = Primitive::Cylinder {
                radius: segment.radius,
                height: segment.length,
            };
            let placement = Placement {
                position: segment.center,
                orientation: segment.orientation,
            };
            match self
                .engine
                .spawn_primitive(primitive, placement, PATH_MATERIAL)
            {
                Ok(handle) => self.path_meshes.push(handle),
                Err(e) => warn!(error = %e, "fallback segment dropped"),
            }
        }
        self.path_meshes.len() - before
    }

    /// Moves the marker to `position`, creating it on first use.
    fn place_marker(&mut self, position: Point3) {
        if let Some(marker) = self.marker {
            if self.engine.set_position(marker, position).is_ok() {
                return;
            }
        }
        let sphere = Primitive::Sphere {
            radius: self.config.marker.radius,
        };
        self.marker = match self
            .engine
            .spawn_primitive(sphere, Placement::at(position), MARKER_MATERIAL)
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "marker unavailable");
                None
            }
        };
    }
}

fn release_all<E: RenderEngine>(engine: &mut E, handles: &mut Vec<MeshHandle>, what: &str) {
    for handle in handles.drain(..) {
        if let Err(e) = engine.destroy(handle) {
            warn!(error = %e, what, "failed to release geometry");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::scene::{PartTable, SceneObject, SceneStore};

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

    fn model() -> PartTable {
        PartTable::with_parts(["Crease", "stadium", "pitch"])
    }

    fn visualizer(store: SceneStore) -> Visualizer<SceneStore, PartTable> {
        Visualizer::new(VisualizerConfig::default(), store, Some(model())).unwrap()
    }

    fn marker_position(v: &Visualizer<SceneStore, PartTable>) -> Point3 {
        match v.engine().object(v.marker().unwrap()).unwrap() {
            SceneObject::Primitive { placement, .. } => placement.position,
            SceneObject::Mesh { .. } => panic!("marker should be a primitive"),
        }
    }

    #[test]
    fn draws_two_tubes_and_a_marker() {
        let mut v = visualizer(SceneStore::new());
        let report = v.draw_path(&delivery()).unwrap();

        assert!((report.bounce.t - 151.0).abs() < 1e-9);
        assert!(matches!(
            report.pre,
            SegmentRender::Tube { vertices, .. } if vertices == 152 * 34
        ));
        assert!(matches!(report.post, SegmentRender::Tube { .. }));
        assert_eq!(report.marker_points, 152 + 150);
        assert_eq!(v.engine().mesh_count(), 2);
        assert_eq!(v.engine().sphere_count(), 1);
        assert!(v.animator().is_current(report.animation));
    }

    #[test]
    fn redraw_releases_previous_geometry() {
        let mut v = visualizer(SceneStore::new());
        let first = v.draw_path(&delivery()).unwrap();
        let marker = v.marker();
        let second = v.draw_path(&delivery()).unwrap();

        assert_eq!(v.engine().mesh_count(), 2);
        assert_eq!(v.engine().sphere_count(), 1);
        assert_eq!(v.marker(), marker);
        assert!(!v.animator().is_current(first.animation));
        assert!(v.animator().is_current(second.animation));
    }

    #[test]
    fn rejected_meshes_fall_back_to_cylinders() {
        let mut v = visualizer(SceneStore::rejecting_meshes());
        let report = v.draw_path(&delivery()).unwrap();

        assert_eq!(report.pre, SegmentRender::Fallback { cylinders: 151 });
        assert_eq!(report.post, SegmentRender::Fallback { cylinders: 149 });
        assert_eq!(v.engine().mesh_count(), 0);
        assert_eq!(v.engine().cylinder_count(), 300);

        v.draw_path(&delivery()).unwrap();
        assert_eq!(v.engine().cylinder_count(), 300);
    }

    #[test]
    fn no_crossing_keeps_previous_drawing() {
        let mut v = visualizer(SceneStore::new());
        v.draw_path(&delivery()).unwrap();
        let before = v.engine().len();

        let floating =
            Trajectory::from_coefficients([0.0; 3], [0.0, 0.0, 100.0], [0.0; 3], 0.0, 300.0)
                .unwrap();
        let err = v.draw_path(&floating).unwrap_err();
        assert!(err.is_user_notice());
        assert_eq!(v.engine().len(), before);
    }

    #[test]
    fn tick_moves_marker_along_path() {
        let mut v = visualizer(SceneStore::new());
        v.draw_path(&delivery()).unwrap();

        let first = v.tick(Duration::ZERO).unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(marker_position(&v), first.position);

        let later = v.tick(Duration::from_millis(500)).unwrap();
        assert_eq!(later.index, 151);
        assert_eq!(marker_position(&v), later.position);

        assert!(v.tick(Duration::from_millis(600)).is_some());
        assert!(!v.animator().is_running());
        assert!(v.tick(Duration::from_millis(16)).is_none());
    }

    #[test]
    fn touch_drives_model_transform() {
        let mut v = visualizer(SceneStore::new());
        v.handle_touch(&TouchInput::one(0.0, 0.0, Duration::ZERO));
        let t = v
            .handle_touch(&TouchInput::one(10.0, 0.0, Duration::from_millis(16)))
            .unwrap();
        assert!((t.orientation.y - 5.0).abs() < 1e-12);
        assert_eq!(v.engine().model_transform(), Some(&t));

        let reset = v.reset_view().unwrap();
        assert_eq!(reset, v.config().model_placement);
        assert_eq!(v.engine().model_transform(), Some(&reset));
    }

    #[test]
    fn missing_model_degrades_to_no_op() {
        let mut v: Visualizer<SceneStore, PartTable> =
            Visualizer::new(VisualizerConfig::default(), SceneStore::new(), None).unwrap();
        assert_eq!(v.toggle_pitch(true), 0);
        assert_eq!(v.toggle_visual_overlay("pitch", false), 0);
        assert!(v.handle_touch(&TouchInput::one(0.0, 0.0, Duration::ZERO)).is_none());
        assert!(v.reset_view().is_none());
        assert!(v.engine().model_transform().is_none());
        // Drawing does not depend on the model.
        assert!(v.draw_path(&delivery()).is_ok());
    }

    #[test]
    fn overlay_toggles_reach_model() {
        let mut v = visualizer(SceneStore::new());
        assert_eq!(v.toggle_visual_overlay("stadium", false), 1);
        assert_eq!(v.model().unwrap().is_visible("stadium"), Some(false));
        v.toggle_pitch(false);
        assert_eq!(v.model().unwrap().is_visible("stadium"), Some(true));
        v.toggle_pitch(true);
        assert_eq!(v.model().unwrap().is_visible("pitch"), Some(false));
        assert_eq!(v.model().unwrap().is_visible("Crease"), Some(true));
    }

    #[test]
    fn impact_dots_replace_as_a_group() {
        let mut v = visualizer(SceneStore::new());
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(v.scatter_impact_dots(&mut rng).unwrap(), 1000);
        assert_eq!(v.engine().sphere_count(), 1000);

        let spots = [Point3::new(0.0, 0.1, 0.0), Point3::new(1.0, 0.1, 2.0)];
        assert_eq!(v.update_impact_dots(&spots), 2);
        assert_eq!(v.engine().sphere_count(), 2);
        for &dot in v.impact_dots() {
            let SceneObject::Primitive { material, .. } = v.engine().object(dot).unwrap() else {
                panic!("impact dot should be a primitive");
            };
            assert_eq!(material.color, Color::RED);
        }

        v.clear_impact_dots();
        assert!(v.impact_dots().is_empty());
        assert!(v.engine().is_empty());
    }

    #[test]
    fn clear_releases_everything() {
        let mut v = visualizer(SceneStore::new());
        v.draw_path(&delivery()).unwrap();
        v.add_impact_dots(&[Point3::origin()]);
        v.clear();
        assert!(v.engine().is_empty());
        assert!(v.marker().is_none());
        assert!(!v.animator().is_running());
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = VisualizerConfig::default();
        config.sampling.step = 0.0;
        assert!(Visualizer::<SceneStore, PartTable>::new(config, SceneStore::new(), None).is_err());
    }
}
