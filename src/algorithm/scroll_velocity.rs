//! Two-finger scroll gesture with target/current velocity damping.
//!
//! The gesture drives a target velocity; the applied velocity eases towards
//! it every frame, so the page glides to a stop when the gesture ends.

use crate::models::landmarks::{HandFrame, HandLandmark};
use crate::models::settings::ScrollSettings;

use super::point_smoother::lerp;

/// Persistent scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Pixels per frame requested by the gesture.
    pub target_velocity: f64,
    /// Pixels per frame actually applied.
    pub current_velocity: f64,
    /// `None` until the gesture anchors.
    pub last_anchor_y: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ScrollVelocityEstimator {
    settings: ScrollSettings,
    state: ScrollState,
    active: bool,
}

impl ScrollVelocityEstimator {
    pub fn new(settings: ScrollSettings) -> Self {
        Self {
            settings,
            state: ScrollState::default(),
            active: false,
        }
    }

    /// Index and middle fingers both point up.
    pub fn is_scroll_posture(frame: &HandFrame) -> bool {
        frame.is_extended(HandLandmark::IndexTip, HandLandmark::IndexMcp)
            && frame.is_extended(HandLandmark::MiddleTip, HandLandmark::MiddleMcp)
    }

    /// Runs once per frame, hand or not. `blocked` is true while pinching
    /// or dragging. Returns the velocity to apply this frame.
    pub fn update(
        &mut self,
        frame: Option<&HandFrame>,
        blocked: bool,
        viewport_height: f64,
    ) -> f64 {
        let active = !blocked && frame.is_some_and(Self::is_scroll_posture);

        match frame {
            Some(frame) if active => {
                let anchor_y = frame.get(HandLandmark::MiddleMcp).y;
                let last = self.state.last_anchor_y.unwrap_or(anchor_y);
                let mut delta = anchor_y - last;
                if delta.abs() < self.settings.deadzone {
                    delta = 0.0;
                }
                self.state.target_velocity = delta * viewport_height * self.settings.sensitivity;
                self.state.last_anchor_y = Some(anchor_y);
            }
            _ => {
                self.state.target_velocity = 0.0;
                self.state.last_anchor_y = None;
            }
        }

        if active != self.active {
            log::debug!("scroll: gesture {}", if active { "engaged" } else { "released" });
        }
        self.active = active;

        let mut current = lerp(
            self.state.current_velocity,
            self.state.target_velocity,
            self.settings.lerp_factor,
        );
        if current.abs() < self.settings.epsilon {
            current = 0.0;
        }
        self.state.current_velocity = current;
        current
    }

    pub fn is_gesture_active(&self) -> bool {
        self.active
    }

    pub fn current_velocity(&self) -> f64 {
        self.state.current_velocity
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }
}
