//! Bridges the looping video element to slide advancement.
//!
//! Two modes, per configuration:
//!
//! - fixed-duration: a wall-clock deadline armed when the element reports
//!   playback started. A duration change mid-playback only moves the
//!   deadline; the element is never restarted and elapsed time is kept.
//! - play-to-end: the element loops, so a native "ended" never fires.
//!   Completion is inferred from position updates with a debounce: mark
//!   near-end once the position crosses `duration - EPSILON`, then fire a
//!   single advance when the position wraps back below `EPSILON`.

use std::time::Instant;

use tracing::debug;

use crate::config::SlideshowConfig;

/// Absorbs the element's own loop-restart jitter around the clip boundary.
pub const LOOP_EPSILON_SECS: f64 = 0.5;

#[derive(Debug, Default)]
pub struct VideoCoordinator {
    started_at: Option<Instant>,
    deadline: Option<Instant>,
    reached_end_of_loop: bool,
}

impl VideoCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When the fixed-duration advance should fire, if one is armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[cfg(test)]
    #[must_use]
    pub fn reached_end_of_loop(&self) -> bool {
        self.reached_end_of_loop
    }

    /// A different item became current: drop every per-video state bit.
    /// Any armed deadline is a zombie now and must never fire against the
    /// new item; the loop debounce starts over for the next video.
    pub fn on_media_changed(&mut self) {
        self.started_at = None;
        self.deadline = None;
        self.reached_end_of_loop = false;
    }

    /// The element reported playback started on the current video.
    pub fn on_play_started(&mut self, config: &SlideshowConfig, now: Instant) {
        self.started_at = Some(now);
        self.deadline = if config.play_video_to_end {
            None
        } else {
            Some(now + config.video_window())
        };
        debug!(
            play_to_end = config.play_video_to_end,
            window_secs = config.video_display_seconds,
            "video playback started"
        );
    }

    /// Playback paused: a paused video must never silently auto-advance
    /// later, so the deadline is cancelled. Resuming re-arms a full window
    /// from the next play signal.
    pub fn on_paused(&mut self) {
        self.started_at = None;
        self.deadline = None;
    }

    /// The duration configuration changed while this video may already be
    /// playing. Keeps elapsed time: the deadline moves to
    /// `started_at + new_window`, clamped to `now` when that moment has
    /// already passed.
    pub fn on_config_changed(&mut self, config: &SlideshowConfig, now: Instant) {
        if config.play_video_to_end {
            self.deadline = None;
            return;
        }
        if let Some(started) = self.started_at {
            let target = started + config.video_window();
            self.deadline = Some(target.max(now));
        }
    }

    /// Position update from the looping element. Returns `true` exactly once
    /// per completed playthrough in play-to-end mode: when the position
    /// wraps back to the start after having reached the end.
    pub fn on_time_update(
        &mut self,
        config: &SlideshowConfig,
        position_secs: f64,
        duration_secs: f64,
    ) -> bool {
        if !config.play_video_to_end {
            self.reached_end_of_loop = false;
            return false;
        }
        if duration_secs <= LOOP_EPSILON_SECS {
            return false;
        }
        if position_secs >= duration_secs - LOOP_EPSILON_SECS {
            self.reached_end_of_loop = true;
            return false;
        }
        if position_secs < LOOP_EPSILON_SECS && self.reached_end_of_loop {
            self.reached_end_of_loop = false;
            debug!(duration_secs, "video loop completed");
            return true;
        }
        false
    }
}
