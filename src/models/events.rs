//! Discrete interaction events produced by the per-frame loop.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::surface::TargetId;

/// Tag of the visual transition started when a drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Item animates into the drop-zone.
    Drop,
    /// Item animates back to where it was picked up.
    Return,
}

/// Event emitted during one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InteractionEvent {
    HandFound {
        frame: u64,
    },
    HandLost {
        frame: u64,
    },
    PinchStarted {
        frame: u64,
    },
    PinchEnded {
        frame: u64,
    },
    DragStarted {
        frame: u64,
        target: TargetId,
        session: Uuid,
    },
    /// Released over the drop-zone.
    Dropped {
        frame: u64,
        target: TargetId,
        session: Uuid,
        #[serde(rename = "dropCount")]
        drop_count: u32,
    },
    /// Released outside the drop-zone.
    Returned {
        frame: u64,
        target: TargetId,
        session: Uuid,
    },
    /// Tracking was lost mid-drag.
    DragAborted {
        frame: u64,
        target: TargetId,
        session: Uuid,
    },
    TransitionCompleted {
        frame: u64,
        session: Uuid,
    },
    ScrollStarted {
        frame: u64,
    },
    ScrollEnded {
        frame: u64,
    },
}

impl InteractionEvent {
    pub fn frame(&self) -> u64 {
        match self {
            InteractionEvent::HandFound { frame } => *frame,
            InteractionEvent::HandLost { frame } => *frame,
            InteractionEvent::PinchStarted { frame } => *frame,
            InteractionEvent::PinchEnded { frame } => *frame,
            InteractionEvent::DragStarted { frame, .. } => *frame,
            InteractionEvent::Dropped { frame, .. } => *frame,
            InteractionEvent::Returned { frame, .. } => *frame,
            InteractionEvent::DragAborted { frame, .. } => *frame,
            InteractionEvent::TransitionCompleted { frame, .. } => *frame,
            InteractionEvent::ScrollStarted { frame } => *frame,
            InteractionEvent::ScrollEnded { frame } => *frame,
        }
    }
}
