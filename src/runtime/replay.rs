//! Loading recordings and settings, and replaying a recording headlessly.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::capture::replay::ReplayDetector;
use crate::error::{HandpointerError, Result};
use crate::models::events::InteractionEvent;
use crate::models::recording::{RecordingFile, SCHEMA_VERSION};
use crate::models::settings::InteractionSettings;
use crate::surface::headless::{HeadlessSurface, RecordingSink};
use crate::surface::TargetId;

use super::interaction_loop::InteractionLoop;

const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub recording_id: String,
    pub recorded_at: Option<DateTime<Utc>>,
    pub replayed_at: DateTime<Utc>,
    pub frames: u64,
    pub hand_frames: u64,
    pub drops: u32,
    pub returns: u32,
    pub aborts: u32,
    pub final_scroll_offset: f64,
    pub placed_cards: Vec<u64>,
    pub events: Vec<InteractionEvent>,
}

/// Loads and checks a `recording.json`.
pub fn load_recording(path: &Path) -> Result<RecordingFile> {
    log::info!("load_recording: path={}", path.display());
    let recording: RecordingFile = read_json(path)?;
    if recording.schema_version != SCHEMA_VERSION {
        return Err(HandpointerError::UnsupportedSchema {
            path: path.to_path_buf(),
            expected: SCHEMA_VERSION,
            found: recording.schema_version,
        });
    }
    Ok(recording)
}

/// Loads settings from `path`, or from the user config directory when no
/// path is given. Falls back to defaults when no file exists there.
pub fn load_settings(path: Option<&Path>) -> Result<InteractionSettings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_settings_file() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("load_settings: no settings file, using defaults");
                return Ok(InteractionSettings::default());
            }
        },
    };

    log::info!("load_settings: path={}", path.display());
    let settings: InteractionSettings = read_json(&path)?;
    settings.validate()?;
    Ok(settings)
}

fn default_settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("handpointer").join(SETTINGS_FILE_NAME))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| HandpointerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| HandpointerError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads both files and replays the recording.
pub fn replay_file(recording_path: &Path, settings_path: Option<&Path>) -> Result<ReplaySummary> {
    let settings = load_settings(settings_path)?;
    let recording = load_recording(recording_path)?;
    replay_recording(&recording, &settings)
}

/// Runs every recorded frame through the interaction loop against a
/// headless page built from the recording's scene, then lets running
/// transitions finish. A viewport stored in the recording overrides the
/// one in `settings`.
pub fn replay_recording(
    recording: &RecordingFile,
    settings: &InteractionSettings,
) -> Result<ReplaySummary> {
    let mut settings = settings.clone();
    if let Some(viewport) = recording.viewport {
        settings.viewport = viewport;
    }
    settings.validate()?;

    let surface = HeadlessSurface::from_scene(&recording.scene, settings.drag.transition_frames);
    let detector = ReplayDetector::new(recording.frames.clone());
    let mut interaction =
        InteractionLoop::new(detector, surface, RecordingSink::default(), &settings);

    let mut events = Vec::new();
    let mut hand_frames = 0;
    while !interaction.detector().is_exhausted() {
        let report = interaction.tick();
        if report.hand_present {
            hand_frames += 1;
        }
        for event in &report.events {
            log::debug!("replay: {event:?}");
        }
        events.extend(report.events);
        forward_completions(&mut interaction);
    }

    while interaction.surface().running_transitions() > 0 {
        forward_completions(&mut interaction);
        events.extend(interaction.drain_completions());
    }

    let mut summary = ReplaySummary {
        recording_id: recording.recording_id.clone(),
        recorded_at: recording.recorded_at,
        replayed_at: Utc::now(),
        frames: interaction.context().frame(),
        hand_frames,
        drops: 0,
        returns: 0,
        aborts: 0,
        final_scroll_offset: interaction.surface().scroll_offset(),
        placed_cards: recording
            .scene
            .cards
            .iter()
            .filter(|card| {
                interaction
                    .surface()
                    .card(TargetId(card.id))
                    .is_some_and(|view| view.placed)
            })
            .map(|card| card.id)
            .collect(),
        events: Vec::new(),
    };
    for event in &events {
        match event {
            InteractionEvent::Dropped { .. } => summary.drops += 1,
            InteractionEvent::Returned { .. } => summary.returns += 1,
            InteractionEvent::DragAborted { .. } => summary.aborts += 1,
            _ => {}
        }
    }
    summary.events = events;

    log::info!(
        "replay: id={} frames={} drops={} returns={} aborts={}",
        summary.recording_id,
        summary.frames,
        summary.drops,
        summary.returns,
        summary.aborts
    );
    Ok(summary)
}

fn forward_completions(
    interaction: &mut InteractionLoop<ReplayDetector, HeadlessSurface, RecordingSink>,
) {
    for session in interaction.surface_mut().advance() {
        interaction.notify_transition_complete(session);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::models::geometry::Rect;
    use crate::models::landmarks::{HandLandmark, Landmark, LANDMARK_COUNT};
    use crate::models::recording::{RecordedFrame, SceneCard, SceneLayout};
    use crate::models::settings::ViewportSettings;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("handpointer-")
            .suffix(".json")
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    /// Index tip at a viewport pixel of an 800x600 viewport; hand scale 0.2.
    fn points(px: f64, py: f64, pinched: bool) -> Vec<Landmark> {
        let ix = 1.0 - px / 800.0;
        let iy = py / 600.0;
        let mut points = vec![Landmark::new(ix + 0.05, iy + 0.15, 0.0); LANDMARK_COUNT];
        points[HandLandmark::Wrist.index()] = Landmark::new(ix + 0.05, iy + 0.3, 0.0);
        points[HandLandmark::MiddleMcp.index()] = Landmark::new(ix + 0.05, iy + 0.1, 0.0);
        points[HandLandmark::MiddleTip.index()] = Landmark::new(ix + 0.05, iy + 0.2, 0.0);
        points[HandLandmark::IndexMcp.index()] = Landmark::new(ix, iy - 0.05, 0.0);
        points[HandLandmark::IndexTip.index()] = Landmark::new(ix, iy, 0.0);
        let dx = if pinched { 0.02 } else { 0.2 };
        points[HandLandmark::ThumbTip.index()] = Landmark::new(ix + dx, iy, 0.0);
        points
    }

    fn recording() -> RecordingFile {
        let mut frames = Vec::new();
        let mut ts = 0;
        let mut push = |landmarks: Option<Vec<Landmark>>| {
            frames.push(RecordedFrame { ts, landmarks });
            ts += 16;
        };
        // Drag card 1 into the zone.
        push(Some(points(60.0, 60.0, false)));
        push(Some(points(60.0, 60.0, true)));
        push(Some(points(400.0, 300.0, true)));
        push(Some(points(720.0, 520.0, true)));
        push(Some(points(720.0, 520.0, false)));
        // Grab card 2 and lose the hand.
        push(Some(points(60.0, 200.0, false)));
        push(Some(points(60.0, 200.0, true)));
        push(Some(points(200.0, 300.0, true)));
        push(None);
        // Malformed detector output counts as no hand.
        push(Some(vec![Landmark::default(); 3]));

        RecordingFile {
            schema_version: SCHEMA_VERSION,
            recording_id: "test".to_string(),
            recorded_at: None,
            viewport: Some(ViewportSettings {
                width: 800.0,
                height: 600.0,
            }),
            scene: SceneLayout {
                cards: vec![
                    SceneCard {
                        id: 1,
                        rect: Rect::new(20.0, 20.0, 120.0, 80.0),
                    },
                    SceneCard {
                        id: 2,
                        rect: Rect::new(20.0, 160.0, 120.0, 80.0),
                    },
                ],
                drop_zone: Some(Rect::new(680.0, 480.0, 100.0, 100.0)),
            },
            frames,
        }
    }

    #[test]
    fn replay_counts_drop_and_abort() {
        let mut settings = InteractionSettings::default();
        settings.smoothing.factor = 1.0;
        let summary = replay_recording(&recording(), &settings).expect("replay");

        assert_eq!(summary.frames, 10);
        assert_eq!(summary.hand_frames, 8);
        assert_eq!(summary.drops, 1);
        assert_eq!(summary.returns, 0);
        assert_eq!(summary.aborts, 1);
        assert_eq!(summary.placed_cards, vec![1]);
        assert!(summary
            .events
            .iter()
            .any(|e| matches!(e, InteractionEvent::TransitionCompleted { .. })));

        let json = serde_json::to_string(&summary).expect("serialize summary");
        assert!(json.contains("\"placedCards\":[1]"));
    }

    #[test]
    fn degenerate_recorded_viewport_is_rejected() {
        let mut recording = recording();
        recording.viewport = Some(ViewportSettings {
            width: 0.0,
            height: 600.0,
        });
        let err = replay_recording(&recording, &InteractionSettings::default())
            .expect_err("zero-width viewport");
        assert!(matches!(err, HandpointerError::InvalidSettings(_)));
    }

    #[test]
    fn load_recording_rejects_other_schema_versions() {
        let file = temp_file(r#"{ "schemaVersion": 2, "recordingId": "x", "frames": [] }"#);
        let err = load_recording(file.path()).expect_err("schema 2 is rejected");
        assert!(matches!(
            err,
            HandpointerError::UnsupportedSchema {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn load_recording_reports_parse_and_io_errors() {
        let file = temp_file("{ not json");
        assert!(matches!(
            load_recording(file.path()),
            Err(HandpointerError::Parse { .. })
        ));

        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            load_recording(&dir.path().join("missing.json")),
            Err(HandpointerError::Io { .. })
        ));
    }

    #[test]
    fn load_settings_validates_explicit_file() {
        let file = temp_file(r#"{ "pinch": { "startRatio": 0.7, "releaseRatio": 0.5 } }"#);
        assert!(matches!(
            load_settings(Some(file.path())),
            Err(HandpointerError::InvalidSettings(_))
        ));

        let file = temp_file(r#"{ "smoothing": { "factor": 0.3 } }"#);
        let settings = load_settings(Some(file.path())).expect("valid settings");
        assert_eq!(settings.smoothing.factor, 0.3);
    }
}
