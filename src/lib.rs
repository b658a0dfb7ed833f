pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod math;
pub mod operations;
pub mod scene;
pub mod tessellation;
pub mod visualizer;

pub use error::{BalltrackError, Result};
pub use visualizer::{DrawReport, SegmentRender, Visualizer};
