mod controller;
mod double_tap;
mod touch;
mod transform;

pub use controller::{GestureMode, InteractionController};
pub use double_tap::DoubleTapDetector;
pub use touch::TouchInput;
pub use transform::{ObjectTransform, Orientation, ReferenceTransform};
