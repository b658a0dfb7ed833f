#![allow(clippy::unwrap_used)]

use std::time::Duration;

use approx::assert_relative_eq;
use balltrack::config::VisualizerConfig;
use balltrack::geometry::{Curve, Trajectory};
use balltrack::interaction::TouchInput;
use balltrack::math::Point2;
use balltrack::operations::query::DetectBounce;
use balltrack::scene::{PartTable, SceneStore};
use balltrack::{SegmentRender, Visualizer};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

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

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn bounce_against_lowered_ground() {
    init_tracing();
    let config = VisualizerConfig::default();
    let ground = config.world.offset.y - 0.5;
    let tr = delivery();

    let bounce = DetectBounce::new(&tr, config.world.transform(), ground, 1.0)
        .execute()
        .unwrap();
    assert_relative_eq!(bounce.t, 187.0);
    assert!(bounce.world_position.y <= ground);
    let before = config.world.transform().world_y(tr.evaluate(186.0).y);
    assert!(before > ground);
}

#[test]
fn draw_animate_and_interact() {
    init_tracing();
    let model = PartTable::with_parts(["Crease", "stadium", "pitch", "outer_ground"]);
    let mut view =
        Visualizer::new(VisualizerConfig::default(), SceneStore::new(), Some(model)).unwrap();

    // draw
    let report = view.draw_path(&delivery()).unwrap();
    assert_relative_eq!(report.bounce.t, 151.0);
    let SegmentRender::Tube {
        vertices,
        triangles,
        ..
    } = report.pre
    else {
        panic!("pre segment should be a tube");
    };
    assert_eq!(vertices, 152 * 34);
    assert_eq!(triangles, 2 * 34 * 151);
    assert!(matches!(report.post, SegmentRender::Tube { .. }));

    // animate to completion at 60 fps
    let mut last_index = None;
    for _ in 0..120 {
        if let Some(step) = view.tick(ms(16)) {
            if let Some(prev) = last_index {
                assert!(step.index > prev);
            }
            last_index = Some(step.index);
        }
    }
    assert_eq!(last_index, Some(report.marker_points - 1));
    assert!(!view.animator().is_running());

    // orbit then pinch
    view.handle_touch(&TouchInput::one(100.0, 100.0, ms(3000)));
    view.handle_touch(&TouchInput::one(140.0, 100.0, ms(3016)));
    view.handle_touch(&TouchInput::Released { at: ms(3500) });
    view.handle_touch(&TouchInput::two(
        Point2::new(0.0, 0.0),
        Point2::new(100.0, 0.0),
        ms(4000),
    ));
    let zoomed = view
        .handle_touch(&TouchInput::two(
            Point2::new(0.0, 0.0),
            Point2::new(200.0, 0.0),
            ms(4016),
        ))
        .unwrap();
    assert_relative_eq!(zoomed.orientation.y, 20.0);
    assert_relative_eq!(zoomed.scale.x, 0.9, epsilon = 1e-12);
    view.handle_touch(&TouchInput::Released { at: ms(4400) });

    // double tap resets
    view.handle_touch(&TouchInput::one(50.0, 50.0, ms(5000)));
    view.handle_touch(&TouchInput::Released { at: ms(5060) });
    view.handle_touch(&TouchInput::one(55.0, 48.0, ms(5200)));
    let reset = view
        .handle_touch(&TouchInput::Released { at: ms(5260) })
        .unwrap();
    assert_eq!(reset, view.config().model_placement);
    assert_eq!(view.engine().model_transform(), Some(&reset));

    // redraw mid-animation supersedes the old run without leaking geometry
    let first = view.draw_path(&delivery()).unwrap();
    view.tick(ms(300));
    let second = view.draw_path(&delivery()).unwrap();
    assert!(!view.animator().is_current(first.animation));
    assert_eq!(view.tick(Duration::ZERO).unwrap().index, 0);
    assert_eq!(view.engine().mesh_count(), 2);
    assert_eq!(view.engine().sphere_count(), 1);
    assert!(view.animator().is_current(second.animation));

    view.clear();
    assert!(view.engine().is_empty());
}

#[test]
fn engine_failures_degrade_to_fallback() {
    init_tracing();
    let mut view: Visualizer<SceneStore, PartTable> =
        Visualizer::new(VisualizerConfig::default(), SceneStore::rejecting_meshes(), None)
            .unwrap();
    let report = view.draw_path(&delivery()).unwrap();
    assert!(matches!(report.pre, SegmentRender::Fallback { cylinders: 151 }));
    assert!(matches!(report.post, SegmentRender::Fallback { cylinders: 149 }));
    assert_eq!(view.path_meshes().len(), 300);
}
