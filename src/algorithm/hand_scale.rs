use crate::models::landmarks::{HandFrame, HandLandmark};

/// Per-frame reference length: wrist to middle-finger MCP in full 3D.
///
/// The segment has a near-constant anatomical length, so it tracks
/// hand-to-camera distance and normalizes distance thresholds.
pub fn hand_scale(frame: &HandFrame) -> f64 {
    frame
        .get(HandLandmark::Wrist)
        .distance_3d(frame.get(HandLandmark::MiddleMcp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::landmarks::{Landmark, LANDMARK_COUNT};

    #[test]
    fn uses_depth_component() {
        let mut points = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[HandLandmark::Wrist.index()] = Landmark::new(0.5, 0.8, 0.0);
        points[HandLandmark::MiddleMcp.index()] = Landmark::new(0.5, 0.5, -0.4);
        let frame = HandFrame::new(points);
        assert!((hand_scale(&frame) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scales_with_hand_size() {
        let mut near = [Landmark::default(); LANDMARK_COUNT];
        near[HandLandmark::MiddleMcp.index()] = Landmark::new(0.0, 0.4, 0.0);
        let mut far = [Landmark::default(); LANDMARK_COUNT];
        far[HandLandmark::MiddleMcp.index()] = Landmark::new(0.0, 0.2, 0.0);
        let ratio = hand_scale(&HandFrame::new(near)) / hand_scale(&HandFrame::new(far));
        assert!((ratio - 2.0).abs() < 1e-12);
    }
}
