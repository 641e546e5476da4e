//! Photo countdown tick policy.
//!
//! The one-second tick only applies while playback is running and the
//! current item is a photo; videos advance through their own lifecycle
//! signals so the two paths can never race into a double advance. On
//! expiry the advance itself re-derives the new countdown, so `Expired`
//! carries no decrement.

use crate::media::MediaItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running (paused, empty, or a video is showing).
    Suspended,
    /// One second elapsed; the new remaining time.
    Decrement(u64),
    /// Countdown elapsed; advance to the next slide.
    Expired,
}

/// Whether the countdown should be armed at all.
#[must_use]
pub fn is_armed(is_playing: bool, item: Option<&MediaItem>) -> bool {
    is_playing && item.is_some_and(MediaItem::is_photo)
}

/// Evaluate one tick of the countdown.
#[must_use]
pub fn on_tick(is_playing: bool, item: Option<&MediaItem>, time_remaining: u64) -> TickOutcome {
    if !is_armed(is_playing, item) {
        return TickOutcome::Suspended;
    }
    if time_remaining <= 1 {
        TickOutcome::Expired
    } else {
        TickOutcome::Decrement(time_remaining - 1)
    }
}
