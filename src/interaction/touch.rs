use std::time::Duration;

use crate::math::Point2;

/// One discrete touch event as delivered by the input system.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchInput {
    /// Contacts still on the screen after the event, in pixels.
    Contacts { points: Vec<Point2>, at: Duration },
    /// The last contact was lifted.
    Released { at: Duration },
}

impl TouchInput {
    /// Single-contact event.
    #[must_use]
    pub fn one(x: f64, y: f64, at: Duration) -> Self {
        Self::Contacts {
            points: vec![Point2::new(x, y)],
            at,
        }
    }

    /// Two-contact event.
    #[must_use]
    pub fn two(a: Point2, b: Point2, at: Duration) -> Self {
        Self::Contacts {
            points: vec![a, b],
            at,
        }
    }

    /// Number of active contacts after the event.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        match self {
            Self::Contacts { points, .. } => points.len(),
            Self::Released { .. } => 0,
        }
    }

    /// Timestamp of the event.
    #[must_use]
    pub fn at(&self) -> Duration {
        match self {
            Self::Contacts { at, .. } | Self::Released { at } => *at,
        }
    }
}
