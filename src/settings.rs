//! Driver settings
//!
//! Loaded from a JSON file. Settings shape how the session is driven (seed,
//! frame pacing, autopilot, snapshots); the difficulty curve is fixed.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::MAX_FRAME_DT;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "ELIMININJA_SETTINGS";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Headless driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; derived from the clock when absent
    pub seed: Option<u64>,
    /// Frames per second the driver feeds the session
    pub frame_rate: u32,
    /// Frame delta cap in seconds
    pub max_frame_dt: f32,
    /// Stop a headless run after this many seconds of frames
    pub duration_secs: f32,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Emit a JSON snapshot every N frames (0 = never)
    pub snapshot_every: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_rate: 60,
            max_frame_dt: MAX_FRAME_DT,
            duration_secs: 120.0,
            autopilot: true,
            snapshot_every: 0,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_rate == 0 {
            return Err(SettingsError::Invalid {
                field: "frame_rate",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(SettingsError::Invalid {
                field: "max_frame_dt",
                reason: format!("must be positive, got {}", self.max_frame_dt),
            });
        }
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "duration_secs",
                reason: format!("must be non-negative, got {}", self.duration_secs),
            });
        }
        Ok(())
    }

    /// Real seconds per driver frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Number of frames in a headless run
    pub fn frame_budget(&self) -> u64 {
        (self.duration_secs * self.frame_rate as f32).ceil() as u64
    }
}
