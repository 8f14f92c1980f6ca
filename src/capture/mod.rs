//! Where hand frames come from.

pub mod replay;

use crate::models::landmarks::HandFrame;

/// The external landmark detector.
///
/// Called once per frame; returns the latest result without queuing.
/// `None` means no hand is tracked.
pub trait Detector {
    fn detect(&mut self) -> Option<HandFrame>;
}

impl<F> Detector for F
where
    F: FnMut() -> Option<HandFrame>,
{
    fn detect(&mut self) -> Option<HandFrame> {
        self()
    }
}
