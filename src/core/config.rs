//! Export settings.
//!
//! One [`ExportConfig`] is supplied per export run and stays read-only while
//! objects are sampled. Out-of-range values are never rejected; they are
//! clamped by [`ExportConfig::normalized`] before the run starts.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{FrameRange, Timeline};
use crate::util::Result;

/// Placeholder in the class name template replaced by the object name.
pub const NAME_PLACEHOLDER: char = '@';

/// Highest frame number accepted for the sampled range.
pub const MAX_FRAME: i32 = 32767;
/// Allowed frame offset bounds.
pub const MIN_OFFSET: i32 = -16384;
pub const MAX_OFFSET: i32 = 16383;
/// Highest accepted frame rate.
pub const MAX_FRAME_RATE: f64 = 600.0;

/// Which transform channels are written per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channels {
    pub position: bool,
    pub rotation: bool,
    pub scaling: bool,
}

impl Channels {
    pub const ALL: Self = Self { position: true, rotation: true, scaling: true };
    pub const NONE: Self = Self { position: false, rotation: false, scaling: false };

    pub const fn new(position: bool, rotation: bool, scaling: bool) -> Self {
        Self { position, rotation, scaling }
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::ALL
    }
}

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Namespace wrapping every generated class.
    pub namespace: String,
    /// Class name template; every `@` becomes the object name.
    pub class_name: String,
    pub frame_start: i32,
    pub frame_end: i32,
    /// Added to every frame number written to the script.
    pub frame_offset: i32,
    pub frame_rate: f64,
    pub channels: Channels,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            namespace: "AnimaData".to_string(),
            class_name: "Seq_@".to_string(),
            frame_start: 0,
            frame_end: 0,
            frame_offset: 0,
            frame_rate: 60.0,
            channels: Channels::ALL,
        }
    }
}

impl ExportConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply the fields present in a JSON config file on top of `self`.
    pub fn overlay_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        self.overlay_json(&text)
    }

    /// Apply the fields present in `text` on top of `self`. Fields the JSON
    /// leaves out keep their current value instead of the default.
    pub fn overlay_json(self, text: &str) -> Result<Self> {
        let mut base = serde_json::to_value(&self)?;
        let patch: serde_json::Value = serde_json::from_str(text)?;
        merge_json(&mut base, patch);
        Ok(serde_json::from_value(base)?)
    }

    /// Seed the frame range and rate from the host timeline.
    pub fn with_timeline(mut self, timeline: &Timeline) -> Self {
        self.frame_start = timeline.frame_start;
        self.frame_end = timeline.frame_end;
        self.frame_rate = timeline.frame_rate();
        self
    }

    /// Clamp every field into its accepted range.
    ///
    /// An end frame before the start collapses onto the start, and a
    /// negative (or NaN) frame rate becomes zero.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();

        cfg.frame_start = self.frame_start.clamp(0, MAX_FRAME);
        cfg.frame_end = self.frame_end.clamp(0, MAX_FRAME);
        cfg.frame_offset = self.frame_offset.clamp(MIN_OFFSET, MAX_OFFSET);
        if cfg.frame_end < cfg.frame_start {
            cfg.frame_end = cfg.frame_start;
        }
        cfg.frame_rate = if self.frame_rate > 0.0 {
            self.frame_rate.min(MAX_FRAME_RATE)
        } else {
            0.0
        };

        if cfg != *self {
            tracing::warn!(
                "export settings normalized: frames {}..{} -> {}..{}, offset {} -> {}, rate {} -> {}",
                self.frame_start, self.frame_end, cfg.frame_start, cfg.frame_end,
                self.frame_offset, cfg.frame_offset, self.frame_rate, cfg.frame_rate,
            );
        }
        cfg
    }

    /// Sampled frame range.
    pub fn range(&self) -> FrameRange {
        FrameRange::new(self.frame_start, self.frame_end)
    }

    /// Class name for an object: the template with every `@` replaced.
    pub fn class_name_for(&self, label: &str) -> String {
        self.class_name.replace(NAME_PLACEHOLDER, label)
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    use serde_json::Value;
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
