//! Scale-invariant pinch detection with hysteresis.

use serde::{Deserialize, Serialize};

use crate::models::landmarks::{Fingertip, HandFrame, Landmark};
use crate::models::settings::PinchSettings;

use super::hand_scale::hand_scale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinchState {
    #[default]
    Idle,
    Pinching,
}

impl PinchState {
    pub fn is_pinching(self) -> bool {
        matches!(self, PinchState::Pinching)
    }
}

/// Thumb-to-index distance in the image plane. Depth is too noisy to use.
pub fn pinch_distance(thumb_tip: &Landmark, index_tip: &Landmark) -> f64 {
    thumb_tip.distance_2d(index_tip)
}

/// Two-threshold transition: enter below `scale * start_ratio`, leave above
/// `scale * release_ratio`, otherwise hold.
pub fn next_pinch_state(
    state: PinchState,
    thumb_tip: &Landmark,
    index_tip: &Landmark,
    scale: f64,
    settings: &PinchSettings,
) -> PinchState {
    if !(scale.is_finite() && scale > 0.0) {
        return state;
    }

    let distance = pinch_distance(thumb_tip, index_tip);
    match state {
        PinchState::Idle if distance < scale * settings.start_ratio => PinchState::Pinching,
        PinchState::Pinching if distance > scale * settings.release_ratio => PinchState::Idle,
        unchanged => unchanged,
    }
}

/// Runs [`next_pinch_state`] on a whole frame.
pub fn next_pinch_state_for_frame(
    state: PinchState,
    frame: &HandFrame,
    settings: &PinchSettings,
) -> PinchState {
    next_pinch_state(
        state,
        frame.fingertip(Fingertip::Thumb),
        frame.fingertip(Fingertip::Index),
        hand_scale(frame),
        settings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tips(distance: f64) -> (Landmark, Landmark) {
        (
            Landmark::new(0.5, 0.5, 0.0),
            Landmark::new(0.5 + distance, 0.5, 0.0),
        )
    }

    fn step(state: PinchState, distance: f64, scale: f64) -> PinchState {
        let (thumb, index) = tips(distance);
        next_pinch_state(state, &thumb, &index, scale, &PinchSettings::default())
    }

    #[test]
    fn enters_below_start_and_leaves_above_release() {
        let scale = 0.2;
        assert_eq!(step(PinchState::Idle, 0.07, scale), PinchState::Pinching);
        assert_eq!(step(PinchState::Pinching, 0.13, scale), PinchState::Idle);
    }

    #[test]
    fn no_flicker_inside_hysteresis_band() {
        let scale = 0.2;
        let band = [0.081, 0.119, 0.09, 0.11, 0.1, 0.085, 0.118];

        let mut state = PinchState::Idle;
        for distance in band {
            state = step(state, distance, scale);
            assert_eq!(state, PinchState::Idle, "entered at {distance}");
        }

        let mut state = PinchState::Pinching;
        for distance in band {
            state = step(state, distance, scale);
            assert_eq!(state, PinchState::Pinching, "released at {distance}");
        }
    }

    #[test]
    fn thresholds_scale_with_hand_size() {
        // Same absolute distance, farther (smaller) hand.
        assert_eq!(step(PinchState::Idle, 0.05, 0.2), PinchState::Pinching);
        assert_eq!(step(PinchState::Idle, 0.05, 0.1), PinchState::Idle);
    }

    #[test]
    fn depth_does_not_affect_distance() {
        let thumb = Landmark::new(0.5, 0.5, -0.3);
        let index = Landmark::new(0.52, 0.5, 0.3);
        let next = next_pinch_state(
            PinchState::Idle,
            &thumb,
            &index,
            0.2,
            &PinchSettings::default(),
        );
        assert_eq!(next, PinchState::Pinching);
    }

    #[test]
    fn degenerate_scale_holds_state() {
        assert_eq!(step(PinchState::Idle, 0.0, 0.0), PinchState::Idle);
        assert_eq!(step(PinchState::Pinching, 1.0, f64::NAN), PinchState::Pinching);
    }
}
