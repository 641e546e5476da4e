//! Slideshow configuration and settings persistence.
//!
//! The config is a flat settings object mutated only through an explicit
//! update operation. Out-of-range timing values are clamped here, at the
//! settings boundary, so the navigation engine can assume they are always
//! positive. Malformed or missing persisted settings fall back to defaults
//! and are never surfaced to the user.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SlideshowConfig {
    /// Seconds each photo stays on screen. Always >= 1 after sanitizing.
    pub photo_display_seconds: u64,
    /// Seconds each video stays on screen; ignored when `play_video_to_end`.
    pub video_display_seconds: u64,
    /// Advance videos on natural loop completion instead of a fixed window.
    pub play_video_to_end: bool,
    #[serde(with = "humantime_serde")]
    pub transition_duration: Duration,
    pub ken_burns_enabled: bool,
    #[serde(with = "humantime_serde")]
    pub ken_burns_duration: Duration,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            photo_display_seconds: 10,
            video_display_seconds: 10,
            play_video_to_end: false,
            transition_duration: Duration::from_millis(1000),
            ken_burns_enabled: true,
            ken_burns_duration: Duration::from_millis(5000),
        }
    }
}

impl SlideshowConfig {
    /// Clamp display times to at least one second.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.photo_display_seconds < 1 {
            warn!(
                value = self.photo_display_seconds,
                "photo-display-seconds below minimum; clamping to 1"
            );
            self.photo_display_seconds = 1;
        }
        if self.video_display_seconds < 1 {
            warn!(
                value = self.video_display_seconds,
                "video-display-seconds below minimum; clamping to 1"
            );
            self.video_display_seconds = 1;
        }
        self
    }

    /// The fixed-duration window for videos as a [`Duration`].
    #[must_use]
    pub fn video_window(&self) -> Duration {
        Duration::from_secs(self.video_display_seconds)
    }
}

/// Load persisted settings, falling back to defaults when the file is
/// missing or malformed. Invoked at mount only, never per tick.
#[must_use]
pub fn load_settings(path: &Path) -> SlideshowConfig {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_yaml::from_str::<SlideshowConfig>(&raw) {
            Ok(cfg) => cfg.sanitized(),
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed settings; using defaults");
                SlideshowConfig::default()
            }
        },
        Err(err) => {
            warn!(path = %path.display(), %err, "settings unreadable; using defaults");
            SlideshowConfig::default()
        }
    }
}

/// Persist settings on explicit user save.
///
/// # Errors
/// Returns an error when serialization or the write fails.
pub fn save_settings(path: &Path, config: &SlideshowConfig) -> Result<(), Error> {
    let raw = serde_yaml::to_string(config)?;
    fs::write(path, raw)?;
    Ok(())
}
