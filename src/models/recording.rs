//! Recorded detector session (recording.json).
//! schemaVersion: 1

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::landmarks::Landmark;
use super::settings::ViewportSettings;

pub const SCHEMA_VERSION: u32 = 1;

/// One detector result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedFrame {
    /// Milliseconds from the start of the recording.
    pub ts: u64,
    /// `None` when the detector reported no hand.
    pub landmarks: Option<Vec<Landmark>>,
}

/// A draggable card in the recorded page layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneCard {
    pub id: u64,
    pub rect: Rect,
}

/// Page layout the recording was captured against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayout {
    #[serde(default)]
    pub cards: Vec<SceneCard>,
    #[serde(default)]
    pub drop_zone: Option<Rect>,
}

/// Root container of recording.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingFile {
    pub schema_version: u32,
    pub recording_id: String,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    /// Viewport the pixel coordinates refer to; overrides settings when present.
    #[serde(default)]
    pub viewport: Option<ViewportSettings>,
    #[serde(default)]
    pub scene: SceneLayout,
    pub frames: Vec<RecordedFrame>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_recording_with_absent_frames() {
        let raw = r#"{
            "schemaVersion": 1,
            "recordingId": "abc",
            "frames": [
                { "ts": 0, "landmarks": null },
                { "ts": 16, "landmarks": [{ "x": 0.5, "y": 0.5, "z": -0.1 }] }
            ]
        }"#;

        let recording: RecordingFile = serde_json::from_str(raw).expect("parse recording");
        assert_eq!(recording.schema_version, SCHEMA_VERSION);
        assert!(recording.recorded_at.is_none());
        assert!(recording.viewport.is_none());
        assert!(recording.scene.cards.is_empty());
        assert!(recording.scene.drop_zone.is_none());
        assert!(recording.frames[0].landmarks.is_none());
        assert_eq!(recording.frames[1].landmarks.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn parses_scene_and_timestamp() {
        let raw = r#"{
            "schemaVersion": 1,
            "recordingId": "abc",
            "recordedAt": "2026-03-01T10:00:00Z",
            "viewport": { "width": 800, "height": 600 },
            "scene": {
                "cards": [{ "id": 1, "rect": { "top": 10, "left": 20, "width": 100, "height": 50 } }],
                "dropZone": { "top": 500, "left": 700, "width": 80, "height": 80 }
            },
            "frames": []
        }"#;

        let recording: RecordingFile = serde_json::from_str(raw).expect("parse recording");
        assert!(recording.recorded_at.is_some());
        assert_eq!(recording.viewport.map(|v| v.width), Some(800.0));
        assert_eq!(recording.scene.cards[0].rect.left, 20.0);
        assert_eq!(recording.scene.drop_zone.map(|r| r.top), Some(500.0));
    }
}
