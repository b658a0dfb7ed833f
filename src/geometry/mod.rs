pub mod curve;
pub mod world;

pub use curve::{Curve, CurveDomain, QuadraticCurve, Trajectory};
pub use world::{SegmentBias, WorldTransform};
