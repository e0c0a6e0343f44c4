use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Media manifest for a game: audio cues and video clips.
/// Games ship a default and the host may replace it with JSON at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Audio assets by name.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
    /// Video assets by name.
    #[serde(default)]
    pub videos: HashMap<String, VideoDescriptor>,
}

/// Describes an audio asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
    /// Playback volume in [0, 1].
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Restart from the beginning when playback ends.
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

/// Describes a video asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    /// Relative path to the video file.
    pub path: String,
}

fn default_volume() -> f32 {
    1.0
}

impl SoundDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            event_id: None,
            volume: default_volume(),
            looping: false,
        }
    }

    pub fn with_event(mut self, event_id: u32) -> Self {
        self.event_id = Some(event_id);
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Path of a named video.
    pub fn video_path(&self, name: &str) -> Option<&str> {
        self.videos.get(name).map(|v| v.path.as_str())
    }
}
