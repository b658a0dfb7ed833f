use tracing::{debug, trace};

use crate::config::InteractionConfig;
use crate::math::{Point2, TOLERANCE};

use super::{DoubleTapDetector, ObjectTransform, Orientation, ReferenceTransform, TouchInput};

/// Current gesture, driven by the number of active contacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureMode {
    /// No contact.
    Idle,
    /// One contact; horizontal drag turns the object.
    Orbiting { last_x: f64 },
    /// Two contacts; spread changes the scale. `None` until a usable
    /// distance has been seen.
    Zooming { last_distance: Option<f64> },
}

/// Maps touch input to orbit, pinch-zoom and reset of the displayed object.
///
/// All changes are relative to the [`ReferenceTransform`] captured at
/// construction: yaw is added to the reference orientation's Y angle (its
/// X and Z angles are kept) and the scale is the reference scale times a
/// clamped factor.
#[derive(Debug, Clone)]
pub struct InteractionController {
    reference: ReferenceTransform,
    live: ObjectTransform,
    mode: GestureMode,
    yaw: f64,
    scale_factor: f64,
    settings: InteractionConfig,
    double_tap: DoubleTapDetector,
}

impl InteractionController {
    /// Creates a controller for an object loaded at `reference`.
    #[must_use]
    pub fn new(reference: ObjectTransform, settings: InteractionConfig) -> Self {
        Self {
            reference: ReferenceTransform::capture(reference),
            live: reference,
            mode: GestureMode::Idle,
            yaw: 0.0,
            scale_factor: 1.0,
            settings,
            double_tap: DoubleTapDetector::new(
                settings.tap_timeout,
                settings.double_tap_timeout,
                settings.tap_slop,
            ),
        }
    }

    /// Returns the current gesture.
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Accumulated yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Cumulative zoom factor.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// The live transform.
    #[must_use]
    pub fn transform(&self) -> &ObjectTransform {
        &self.live
    }

    /// The snapshot captured at load time.
    #[must_use]
    pub fn reference(&self) -> &ReferenceTransform {
        &self.reference
    }

    /// Handles one touch event.
    ///
    /// Returns the new transform when the event changed it.
    pub fn handle(&mut self, input: &TouchInput) -> Option<ObjectTransform> {
        if self.double_tap.on_input(input) {
            return Some(self.reset());
        }

        match input {
            TouchInput::Released { .. } => {
                self.mode = GestureMode::Idle;
                None
            }
            TouchInput::Contacts { points, .. } => match points.as_slice() {
                [] => {
                    self.mode = GestureMode::Idle;
                    None
                }
                [p] => self.orbit(p.x),
                [a, b] => self.pinch(*a, *b),
                _ => {
                    // Extra contacts break the gesture; the next pair starts fresh.
                    self.mode = GestureMode::Idle;
                    None
                }
            },
        }
    }

    /// Restores the reference transform and zeroes all gesture state.
    pub fn reset(&mut self) -> ObjectTransform {
        self.yaw = 0.0;
        self.scale_factor = 1.0;
        self.mode = GestureMode::Idle;
        self.double_tap.clear();
        self.live = *self.reference.get();
        debug!("view reset to reference transform");
        self.live
    }

    fn orbit(&mut self, x: f64) -> Option<ObjectTransform> {
        let GestureMode::Orbiting { last_x } = self.mode else {
            self.mode = GestureMode::Orbiting { last_x: x };
            return None;
        };
        self.mode = GestureMode::Orbiting { last_x: x };

        let dx = x - last_x;
        self.yaw += dx * self.settings.orbit_sensitivity;

        let base = self.reference.get().orientation;
        self.live.orientation = Orientation::new(base.x, base.y + self.yaw, base.z);
        trace!(yaw = self.yaw, "orbit");
        Some(self.live)
    }

    fn pinch(&mut self, a: Point2, b: Point2) -> Option<ObjectTransform> {
        let distance = (a - b).norm();
        let usable = (distance > TOLERANCE).then_some(distance);

        let GestureMode::Zooming {
            last_distance: Some(previous),
        } = self.mode
        else {
            self.mode = GestureMode::Zooming {
                last_distance: usable,
            };
            return None;
        };
        let Some(current) = usable else {
            // Contacts collapsed onto each other: keep the last good distance.
            return None;
        };
        self.mode = GestureMode::Zooming {
            last_distance: Some(current),
        };

        self.scale_factor = (self.scale_factor * current / previous)
            .clamp(self.settings.min_scale, self.settings.max_scale);
        self.live.scale = self.reference.get().scale * self.scale_factor;
        trace!(scale_factor = self.scale_factor, "pinch");
        Some(self.live)
    }
}
