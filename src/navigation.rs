//! Position state machine over the ordered, filtered list.
//!
//! The engine owns the effective list snapshot together with the current
//! index, so the "current item is always `list[index]`" invariant holds
//! structurally: every public operation resolves both in the same step.

use tracing::debug;

use crate::config::SlideshowConfig;
use crate::media::{MediaItem, MediaKind};

/// Seconds the given item stays on screen. Zero is the sentinel for
/// "not timer-driven" (a video playing to its natural end).
#[must_use]
pub fn display_time(item: Option<&MediaItem>, config: &SlideshowConfig) -> u64 {
    match item {
        None => config.photo_display_seconds,
        Some(item) if item.kind == MediaKind::Video && config.play_video_to_end => 0,
        Some(item) if item.kind == MediaKind::Video => config.video_display_seconds,
        Some(_) => config.photo_display_seconds,
    }
}

pub struct NavigationEngine {
    list: Vec<MediaItem>,
    index: Option<usize>,
    time_remaining: u64,
}

impl NavigationEngine {
    #[must_use]
    pub fn new(list: Vec<MediaItem>, config: &SlideshowConfig) -> Self {
        let mut nav = Self {
            list: Vec::new(),
            index: None,
            time_remaining: 0,
        };
        nav.reset(list, config);
        nav
    }

    #[must_use]
    pub fn list(&self) -> &[MediaItem] {
        &self.list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.index.and_then(|i| self.list.get(i))
    }

    #[must_use]
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    pub fn set_time_remaining(&mut self, seconds: u64) {
        self.time_remaining = seconds;
    }

    /// Advance to the next item, wrapping from last to first. No-op on an
    /// empty list.
    pub fn next(&mut self, config: &SlideshowConfig) {
        if let Some(index) = self.index {
            self.position_at((index + 1) % self.list.len(), config);
        }
    }

    /// Step back to the previous item, wrapping from first to last. No-op on
    /// an empty list.
    pub fn previous(&mut self, config: &SlideshowConfig) {
        if let Some(index) = self.index {
            let prev = if index == 0 {
                self.list.len() - 1
            } else {
                index - 1
            };
            self.position_at(prev, config);
        }
    }

    /// Swap in a re-derived list (filter or order change), keeping the
    /// viewer on the item they were watching where possible:
    /// the previous current item is re-found by identity in the new list;
    /// if it is genuinely gone (filtered out), the old index is kept when
    /// still in bounds, else position falls back to the start.
    pub fn on_list_changed(&mut self, new_list: Vec<MediaItem>, config: &SlideshowConfig) {
        if new_list.is_empty() {
            self.list = new_list;
            self.index = None;
            self.time_remaining = 0;
            return;
        }

        let current_id = self.current_item().map(|item| item.id.clone());
        let resolved = match current_id {
            Some(id) => match new_list.iter().position(|item| item.id == id) {
                Some(found) => found,
                None => match self.index {
                    Some(old) if old < new_list.len() => old,
                    _ => 0,
                },
            },
            None => 0,
        };
        debug!(index = resolved, total = new_list.len(), "list changed");
        self.list = new_list;
        self.position_at(resolved, config);
    }

    /// Force position back to the start of a brand-new list. Used when the
    /// catalog itself changes, unlike filter/order changes which go through
    /// the identity-preserving [`Self::on_list_changed`] path.
    pub fn reset(&mut self, list: Vec<MediaItem>, config: &SlideshowConfig) {
        self.list = list;
        if self.list.is_empty() {
            self.index = None;
            self.time_remaining = 0;
        } else {
            self.position_at(0, config);
        }
    }

    fn position_at(&mut self, index: usize, config: &SlideshowConfig) {
        // Defensive clamp; an out-of-bounds index here is a programming
        // error caught by tests, not a user-facing failure.
        let index = index.min(self.list.len().saturating_sub(1));
        self.index = Some(index);
        self.time_remaining = display_time(self.list.get(index), config);
    }
}
