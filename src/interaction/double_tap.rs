use std::time::Duration;

use crate::math::Point2;

use super::TouchInput;

#[derive(Debug, Clone, Copy)]
enum TapState {
    Idle,
    Down { origin: Point2, at: Duration },
    /// Moved, held too long or went multi-touch; wait for release.
    Disqualified,
}

#[derive(Debug, Clone, Copy)]
struct Tap {
    origin: Point2,
    released_at: Duration,
}

/// Recognizes double taps from raw contact events by timing.
///
/// A tap is a single contact lifted within `tap_timeout` without leaving
/// `slop` pixels of where it went down. Two taps form a double tap when the
/// second goes down within `double_tap_timeout` of the first being lifted,
/// and within `slop` pixels of it.
#[derive(Debug, Clone)]
pub struct DoubleTapDetector {
    tap_timeout: Duration,
    double_tap_timeout: Duration,
    slop: f64,
    state: TapState,
    last_tap: Option<Tap>,
}

impl DoubleTapDetector {
    /// Creates a new detector.
    #[must_use]
    pub fn new(tap_timeout: Duration, double_tap_timeout: Duration, slop: f64) -> Self {
        Self {
            tap_timeout,
            double_tap_timeout,
            slop,
            state: TapState::Idle,
            last_tap: None,
        }
    }

    /// Feeds one event; returns `true` when it completes a double tap.
    pub fn on_input(&mut self, input: &TouchInput) -> bool {
        match input {
            TouchInput::Contacts { points, at } => {
                self.on_contacts(points, *at);
                false
            }
            TouchInput::Released { at } => self.on_release(*at),
        }
    }

    /// Forgets any half-recognized gesture.
    pub fn clear(&mut self) {
        self.state = TapState::Idle;
        self.last_tap = None;
    }

    fn on_contacts(&mut self, points: &[Point2], at: Duration) {
        self.state = match (self.state, points) {
            (TapState::Idle, [origin]) => TapState::Down {
                origin: *origin,
                at,
            },
            (TapState::Down { origin, at: down_at }, [p]) => {
                if (*p - origin).norm() > self.slop
                    || at.saturating_sub(down_at) > self.tap_timeout
                {
                    TapState::Disqualified
                } else {
                    TapState::Down {
                        origin,
                        at: down_at,
                    }
                }
            }
            (TapState::Disqualified, _) | (_, []) => self.state,
            _ => TapState::Disqualified,
        };
    }

    fn on_release(&mut self, at: Duration) -> bool {
        let state = std::mem::replace(&mut self.state, TapState::Idle);
        let TapState::Down {
            origin,
            at: down_at,
        } = state
        else {
            self.last_tap = None;
            return false;
        };
        if at.saturating_sub(down_at) > self.tap_timeout {
            self.last_tap = None;
            return false;
        }

        if let Some(prev) = self.last_tap.take() {
            let gap = down_at.saturating_sub(prev.released_at);
            if gap <= self.double_tap_timeout && (origin - prev.origin).norm() <= self.slop {
                return true;
            }
        }
        self.last_tap = Some(Tap {
            origin,
            released_at: at,
        });
        false
    }
}
