mod detect_bounce;

pub use detect_bounce::{BounceEvent, DetectBounce};
