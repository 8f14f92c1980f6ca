//! Tunable constants for smoothing, pinch, scroll and drag behaviour.

use serde::{Deserialize, Serialize};

use crate::error::{HandpointerError, Result};

/// Upper bound for `drag.transitionFrames` (ten seconds at 60 fps).
pub const MAX_TRANSITION_FRAMES: u32 = 600;

/// Exponential smoothing applied to every fingertip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmoothingSettings {
    /// 1.0 = no smoothing, smaller = smoother with more lag.
    pub factor: f64,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self { factor: 0.15 }
    }
}

/// Hysteresis thresholds, as ratios of the per-frame hand scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PinchSettings {
    pub start_ratio: f64,
    pub release_ratio: f64,
}

impl Default for PinchSettings {
    fn default() -> Self {
        Self {
            start_ratio: 0.4,
            release_ratio: 0.6,
        }
    }
}

/// Two-finger scroll gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrollSettings {
    /// Anchor deltas below this (normalized units) count as zero.
    pub deadzone: f64,
    /// Multiplier from anchor travel (viewport pixels) to target velocity.
    pub sensitivity: f64,
    /// Per-frame blend from current towards target velocity.
    pub lerp_factor: f64,
    /// Velocities below this (px/frame) snap to zero.
    pub epsilon: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            deadzone: 0.005,
            sensitivity: 1.5,
            lerp_factor: 0.15,
            epsilon: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DragSettings {
    /// Second hit-test probe, below the fingertip.
    pub hit_test_fallback_offset_px: f64,
    /// Frames a headless visual transition takes before it reports completion.
    pub transition_frames: u32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            hit_test_fallback_offset_px: 10.0,
            transition_frames: 18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Size of the optional 3D display space markers are mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldSettings {
    pub width: f64,
    pub height: f64,
    pub depth_scale: f64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 9.0,
            depth_scale: 10.0,
        }
    }
}

/// Root settings object (`settings.json`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionSettings {
    pub smoothing: SmoothingSettings,
    pub pinch: PinchSettings,
    pub scroll: ScrollSettings,
    pub drag: DragSettings,
    pub viewport: ViewportSettings,
    /// `None` disables the 3D marker mapping.
    pub world: Option<WorldSettings>,
}

impl InteractionSettings {
    pub fn validate(&self) -> Result<()> {
        let factor = self.smoothing.factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(invalid(format!(
                "smoothing.factor must be in (0, 1], got {factor}"
            )));
        }
        if !(self.pinch.start_ratio > 0.0) {
            return Err(invalid(format!(
                "pinch.startRatio must be positive, got {}",
                self.pinch.start_ratio
            )));
        }
        if !(self.pinch.release_ratio > self.pinch.start_ratio) {
            return Err(invalid(format!(
                "pinch.releaseRatio ({}) must be greater than pinch.startRatio ({})",
                self.pinch.release_ratio, self.pinch.start_ratio
            )));
        }
        if !(self.scroll.deadzone >= 0.0) {
            return Err(invalid(format!(
                "scroll.deadzone must not be negative, got {}",
                self.scroll.deadzone
            )));
        }
        let lerp = self.scroll.lerp_factor;
        if !(lerp > 0.0 && lerp <= 1.0) {
            return Err(invalid(format!(
                "scroll.lerpFactor must be in (0, 1], got {lerp}"
            )));
        }
        for (name, value) in [
            ("scroll.sensitivity", self.scroll.sensitivity),
            ("scroll.epsilon", self.scroll.epsilon),
            (
                "drag.hitTestFallbackOffsetPx",
                self.drag.hit_test_fallback_offset_px,
            ),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!(
                    "{name} must be finite and not negative, got {value}"
                )));
            }
        }
        if self.drag.transition_frames > MAX_TRANSITION_FRAMES {
            return Err(invalid(format!(
                "drag.transitionFrames must be at most {MAX_TRANSITION_FRAMES}, got {}",
                self.drag.transition_frames
            )));
        }
        if !is_positive_size(self.viewport.width, self.viewport.height) {
            return Err(invalid(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if let Some(world) = self.world {
            if !(is_positive_size(world.width, world.height) && world.depth_scale.is_finite()) {
                return Err(invalid(format!(
                    "world must be a positive finite size, got {}x{} depth {}",
                    world.width, world.height, world.depth_scale
                )));
            }
        }
        Ok(())
    }
}

fn is_positive_size(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

fn invalid(message: String) -> HandpointerError {
    HandpointerError::InvalidSettings(message)
}
