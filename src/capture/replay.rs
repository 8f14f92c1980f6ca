use crate::error::{HandpointerError, Result};
use crate::models::landmarks::{HandFrame, LANDMARK_COUNT};
use crate::models::recording::RecordedFrame;

use super::Detector;

impl RecordedFrame {
    /// Converts the recorded landmarks; `Ok(None)` is a recorded "no hand".
    pub fn hand_frame(&self) -> Result<Option<HandFrame>> {
        let Some(points) = &self.landmarks else {
            return Ok(None);
        };
        if points.len() < LANDMARK_COUNT {
            return Err(HandpointerError::InvalidFrame {
                ts: self.ts,
                count: points.len(),
            });
        }
        Ok(HandFrame::from_slice(points))
    }
}

/// Plays back recorded detector output one frame per call.
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    frames: Vec<RecordedFrame>,
    cursor: usize,
}

impl ReplayDetector {
    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self { frames, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl Detector for ReplayDetector {
    fn detect(&mut self) -> Option<HandFrame> {
        let frame = self.frames.get(self.cursor)?;
        self.cursor += 1;
        match frame.hand_frame() {
            Ok(hand) => hand,
            Err(err) => {
                log::warn!("replay: treating frame as no hand: {err}");
                None
            }
        }
    }
}
