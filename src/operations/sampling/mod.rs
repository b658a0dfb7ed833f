mod build_path;
mod scatter;

pub use build_path::{BallPath, BuildBallPath, PathSampling, PathSegment, SegmentKind};
pub use scatter::{ImpactBounds, ScatterImpacts};
