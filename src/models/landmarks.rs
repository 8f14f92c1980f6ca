//! Hand landmarks as produced by the external detector.
//!
//! Coordinates are normalized: `x`, `y` in `[0, 1]` relative to the camera
//! frame, `z` is relative depth (more negative = closer to the camera).

use serde::{Deserialize, Serialize};

/// Number of landmarks in one tracked hand.
pub const LANDMARK_COUNT: usize = 21;

/// One tracked anatomical point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Full 3D euclidean distance.
    pub fn distance_3d(&self, other: &Landmark) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance in the image plane, ignoring depth.
    pub fn distance_2d(&self, other: &Landmark) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Fixed anatomical indexing of the 21 hand landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    pub fn index(self) -> usize {
        self as usize
    }

    /// The five tracked fingertips, thumb first.
    pub fn fingertips() -> [HandLandmark; 5] {
        [
            Self::ThumbTip,
            Self::IndexTip,
            Self::MiddleTip,
            Self::RingTip,
            Self::PinkyTip,
        ]
    }
}

/// Position of a fingertip inside [`HandLandmark::fingertips`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fingertip {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Fingertip {
    pub const ALL: [Fingertip; 5] = [
        Fingertip::Thumb,
        Fingertip::Index,
        Fingertip::Middle,
        Fingertip::Ring,
        Fingertip::Pinky,
    ];

    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn landmark(self) -> HandLandmark {
        HandLandmark::fingertips()[self.slot()]
    }
}

/// One detector frame for a single tracked hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandFrame {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Builds a frame from raw detector output.
    ///
    /// Returns `None` when fewer than 21 landmarks are present or any
    /// coordinate is not finite; callers treat that as "no hand".
    /// Extra trailing points are ignored.
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        if points.len() < LANDMARK_COUNT {
            return None;
        }
        let head = &points[..LANDMARK_COUNT];
        if !head.iter().all(Landmark::is_finite) {
            return None;
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks.copy_from_slice(head);
        Some(Self { landmarks })
    }

    pub fn get(&self, landmark: HandLandmark) -> &Landmark {
        &self.landmarks[landmark.index()]
    }

    pub fn fingertip(&self, tip: Fingertip) -> &Landmark {
        self.get(tip.landmark())
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Tip above its MCP joint in image space (smaller y is higher).
    pub fn is_extended(&self, tip: HandLandmark, mcp: HandLandmark) -> bool {
        self.get(tip).y < self.get(mcp).y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anatomical_indices_match_detector_layout() {
        assert_eq!(HandLandmark::Wrist.index(), 0);
        assert_eq!(HandLandmark::ThumbTip.index(), 4);
        assert_eq!(HandLandmark::IndexMcp.index(), 5);
        assert_eq!(HandLandmark::IndexTip.index(), 8);
        assert_eq!(HandLandmark::MiddleMcp.index(), 9);
        assert_eq!(HandLandmark::MiddleTip.index(), 12);
        assert_eq!(HandLandmark::RingTip.index(), 16);
        assert_eq!(HandLandmark::PinkyTip.index(), 20);
        let tips: Vec<usize> = Fingertip::ALL
            .iter()
            .map(|tip| tip.landmark().index())
            .collect();
        assert_eq!(tips, vec![4, 8, 12, 16, 20]);
    }

    #[test]
    fn short_detector_output_is_no_hand() {
        let points = vec![Landmark::new(0.5, 0.5, 0.0); 20];
        assert!(HandFrame::from_slice(&points).is_none());
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[3].y = f64::NAN;
        assert!(HandFrame::from_slice(&points).is_none());
    }

    #[test]
    fn extra_points_are_ignored() {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT + 2];
        points[8] = Landmark::new(0.1, 0.2, -0.05);
        let frame = HandFrame::from_slice(&points).expect("frame");
        assert_eq!(*frame.fingertip(Fingertip::Index), Landmark::new(0.1, 0.2, -0.05));
    }

    #[test]
    fn missing_depth_defaults_to_zero() {
        let landmark: Landmark = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).expect("parse");
        assert_eq!(landmark.z, 0.0);
    }

    #[test]
    fn planar_distance_ignores_depth() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.3, 0.4, 5.0);
        assert!((a.distance_2d(&b) - 0.5).abs() < 1e-12);
        assert!(a.distance_3d(&b) > 5.0);
    }
}
