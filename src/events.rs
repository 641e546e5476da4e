//! Messages exchanged between the controller and the presentation layer.

use crate::config::SlideshowConfig;
use crate::filter::MediaFilter;
use crate::media::MediaItem;
use crate::ordering::DisplayOrder;

/// Control operations dispatched to the slideshow controller.
#[derive(Debug)]
pub enum Command {
    PlayPause,
    Next,
    Previous,
    CycleDisplayOrder,
    CycleFilter,
    ToggleMute,
    OpenInFileManager,
    UpdateConfig(SlideshowConfig),
    /// The catalog produced a new snapshot (the user picked a folder).
    CatalogLoaded(Vec<MediaItem>),
    /// The catalog could not be read; the message is surfaced for display.
    CatalogFailed(String),
}

/// Lifecycle signals from the video element, forwarded by the presentation
/// layer.
#[derive(Debug)]
pub enum VideoSignal {
    Play,
    Pause,
    CanPlay,
    TimeUpdate { position: f64, duration: f64 },
    Error(String),
}

/// State published to the presentation layer after every mutation.
#[derive(Debug, Clone, Default)]
pub struct SlideshowSnapshot {
    pub current_item: Option<MediaItem>,
    pub current_index: Option<usize>,
    pub total_count: usize,
    pub time_remaining: u64,
    pub display_order: DisplayOrder,
    pub media_filter: MediaFilter,
    pub is_playing: bool,
    pub is_muted: bool,
    pub last_error: Option<String>,
}
