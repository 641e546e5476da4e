//! Composition root: wires navigation, ordering, filtering, the photo
//! countdown, and the video coordinator behind a single command surface.
//!
//! All mutation happens on one task. Commands and video-element signals
//! arrive on channels; the photo tick and the fixed-duration video deadline
//! are re-armed sleeps inside the select loop, so a stale deferred advance
//! can never fire after the state that scheduled it is gone.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant as TokioInstant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SlideshowConfig;
use crate::events::{Command, SlideshowSnapshot, VideoSignal};
use crate::filter::{self, MediaFilter};
use crate::media::{MediaItem, MediaKind};
use crate::navigation::{NavigationEngine, display_time};
use crate::ordering::OrderingEngine;
use crate::platform::PlatformServices;
use crate::timer::{self, TickOutcome};
use crate::video::VideoCoordinator;

pub struct SlideshowController {
    catalog: Vec<MediaItem>,
    config: SlideshowConfig,
    filter: MediaFilter,
    ordering: OrderingEngine,
    nav: NavigationEngine,
    video: VideoCoordinator,
    is_playing: bool,
    is_muted: bool,
    last_error: Option<String>,
    platform: Arc<dyn PlatformServices>,
}

impl SlideshowController {
    #[must_use]
    pub fn new(
        catalog: Vec<MediaItem>,
        config: SlideshowConfig,
        platform: Arc<dyn PlatformServices>,
    ) -> Self {
        let config = config.sanitized();
        let filter = MediaFilter::default();
        let mut ordering = OrderingEngine::new();
        let filtered = filter::apply(&catalog, filter);
        let list = ordering.apply(&filtered);
        let nav = NavigationEngine::new(list, &config);
        Self {
            catalog,
            config,
            filter,
            ordering,
            nav,
            video: VideoCoordinator::new(),
            is_playing: true,
            is_muted: false,
            last_error: None,
            platform,
        }
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.nav.current_item()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.nav.current_index()
    }

    #[must_use]
    pub fn time_remaining(&self) -> u64 {
        self.nav.time_remaining()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    #[must_use]
    pub fn snapshot(&self) -> SlideshowSnapshot {
        SlideshowSnapshot {
            current_item: self.nav.current_item().cloned(),
            current_index: self.nav.current_index(),
            total_count: self.nav.len(),
            time_remaining: self.nav.time_remaining(),
            display_order: self.ordering.order(),
            media_filter: self.filter,
            is_playing: self.is_playing,
            is_muted: self.is_muted,
            last_error: self.last_error.clone(),
        }
    }

    pub fn handle_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::PlayPause => {
                self.is_playing = !self.is_playing;
                if !self.is_playing {
                    self.video.on_paused();
                }
                info!(playing = self.is_playing, "play/pause toggled");
            }
            Command::Next => self.advance(),
            Command::Previous => self.retreat(),
            Command::CycleDisplayOrder => {
                let before = self.current_id();
                let order = self.ordering.cycle();
                info!(order = order.label(), "cycling display order");
                let list = self.effective_list();
                self.nav.on_list_changed(list, &self.config);
                self.after_move(before);
            }
            Command::CycleFilter => {
                let before = self.current_id();
                self.filter = self.filter.cycle();
                info!(filter = self.filter.label(), "cycling media filter");
                let list = self.effective_list();
                self.nav.on_list_changed(list, &self.config);
                self.after_move(before);
            }
            Command::ToggleMute => {
                self.is_muted = !self.is_muted;
                info!(muted = self.is_muted, "mute toggled");
            }
            Command::OpenInFileManager => {
                if let Some(item) = self.nav.current_item()
                    && let Err(err) = self
                        .platform
                        .reveal_in_file_manager(Path::new(&item.locator))
                {
                    warn!(%err, "failed to open file manager");
                }
            }
            Command::UpdateConfig(new_config) => {
                self.config = new_config.sanitized();
                // Recompute the countdown for the current item in place; the
                // position never moves on a settings change.
                let remaining = display_time(self.nav.current_item(), &self.config);
                self.nav.set_time_remaining(remaining);
                self.video.on_config_changed(&self.config, now);
            }
            Command::CatalogLoaded(items) => {
                info!(count = items.len(), "catalog replaced");
                self.catalog = items;
                self.last_error = None;
                self.ordering.invalidate();
                let list = self.effective_list();
                self.nav.reset(list, &self.config);
                self.video.on_media_changed();
            }
            Command::CatalogFailed(message) => {
                warn!(%message, "catalog unavailable");
                self.catalog.clear();
                self.last_error = Some(message);
                self.ordering.invalidate();
                self.nav.reset(Vec::new(), &self.config);
                self.video.on_media_changed();
            }
        }
    }

    pub fn handle_video_signal(&mut self, signal: VideoSignal, now: Instant) {
        match signal {
            VideoSignal::Play => {
                if self.is_playing && self.current_is_video() {
                    self.video.on_play_started(&self.config, now);
                }
            }
            VideoSignal::Pause => self.video.on_paused(),
            VideoSignal::CanPlay => debug!("video element ready"),
            VideoSignal::TimeUpdate { position, duration } => {
                if self.is_playing
                    && self.current_is_video()
                    && self.video.on_time_update(&self.config, position, duration)
                {
                    self.advance();
                }
            }
            VideoSignal::Error(message) => {
                // Deliberately no auto-skip: a broken file stays current
                // until the user navigates away.
                warn!(%message, "video playback error; holding current slide");
            }
        }
    }

    /// The fixed-duration window for the current video elapsed.
    pub fn on_video_deadline(&mut self) {
        // Consume the deadline first so a wrap back onto the same item on a
        // single-entry list cannot refire it.
        self.video.on_media_changed();
        self.advance();
    }

    /// One second of the photo countdown elapsed.
    pub fn on_photo_tick(&mut self) {
        match timer::on_tick(
            self.is_playing,
            self.nav.current_item(),
            self.nav.time_remaining(),
        ) {
            TickOutcome::Expired => self.advance(),
            TickOutcome::Decrement(remaining) => self.nav.set_time_remaining(remaining),
            TickOutcome::Suspended => {}
        }
    }

    #[must_use]
    pub fn photo_timer_armed(&self) -> bool {
        timer::is_armed(self.is_playing, self.nav.current_item())
    }

    #[must_use]
    pub fn video_deadline(&self) -> Option<Instant> {
        self.video.deadline()
    }

    fn advance(&mut self) {
        let before = self.current_id();
        self.nav.next(&self.config);
        self.after_move(before);
    }

    fn retreat(&mut self) {
        let before = self.current_id();
        self.nav.previous(&self.config);
        self.after_move(before);
    }

    fn after_move(&mut self, before: Option<String>) {
        if self.current_id() != before {
            self.video.on_media_changed();
            debug!(
                index = ?self.nav.current_index(),
                item = self.nav.current_item().map(|i| i.name.as_str()),
                "position changed"
            );
        }
    }

    fn current_id(&self) -> Option<String> {
        self.nav.current_item().map(|item| item.id.clone())
    }

    fn current_is_video(&self) -> bool {
        self.nav
            .current_item()
            .is_some_and(|item| item.kind == MediaKind::Video)
    }

    fn effective_list(&mut self) -> Vec<MediaItem> {
        let filtered = filter::apply(&self.catalog, self.filter);
        self.ordering.apply(&filtered)
    }
}

/// Drive the controller until cancellation. Commands and video signals are
/// consumed from their channels; a state snapshot is published after every
/// handled event.
pub async fn run(
    mut controller: SlideshowController,
    mut commands: mpsc::Receiver<Command>,
    mut video_signals: mpsc::Receiver<VideoSignal>,
    state_tx: watch::Sender<SlideshowSnapshot>,
    cancel: CancellationToken,
) -> Result<()> {
    let _ = state_tx.send(controller.snapshot());
    let mut video_channel_open = true;

    loop {
        let deadline = controller.video_deadline().map(TokioInstant::from_std);
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("cancel received; exiting controller task");
                break;
            }

            maybe = commands.recv() => match maybe {
                Some(command) => controller.handle_command(command, Instant::now()),
                None => {
                    // Every control handle dropped; nothing can reach us.
                    break;
                }
            },

            maybe = video_signals.recv(), if video_channel_open => match maybe {
                Some(signal) => controller.handle_video_signal(signal, Instant::now()),
                None => video_channel_open = false,
            },

            // Photo countdown. The sleep is re-created every loop iteration,
            // so any handled event restarts the tick cycle and a suspended
            // timer never fires.
            _ = sleep(Duration::from_secs(1)), if controller.photo_timer_armed() => {
                controller.on_photo_tick();
            }

            // Fixed-duration video advance.
            _ = sleep_until(deadline.unwrap_or_else(TokioInstant::now)), if deadline.is_some() => {
                controller.on_video_deadline();
            }
        }
        let _ = state_tx.send(controller.snapshot());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::DisplayOrder;
    use crate::platform::NullPlatform;

    fn photo(name: &str) -> MediaItem {
        item(name, MediaKind::Photo)
    }

    fn video(name: &str) -> MediaItem {
        item(name, MediaKind::Video)
    }

    fn item(name: &str, kind: MediaKind) -> MediaItem {
        MediaItem {
            id: name.to_string(),
            name: name.to_string(),
            locator: name.to_string(),
            kind,
            extension: String::new(),
            modified_at: None,
        }
    }

    fn cfg() -> SlideshowConfig {
        SlideshowConfig {
            photo_display_seconds: 3,
            video_display_seconds: 5,
            ..SlideshowConfig::default()
        }
    }

    fn controller(catalog: Vec<MediaItem>) -> SlideshowController {
        SlideshowController::new(catalog, cfg(), Arc::new(NullPlatform))
    }

    #[test]
    fn starts_on_first_item_playing() {
        let c = controller(vec![photo("p1"), photo("p2")]);
        assert!(c.is_playing());
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.current_item().unwrap().id, "p1");
        assert_eq!(c.time_remaining(), 3);
        assert!(c.photo_timer_armed());
    }

    #[test]
    fn filtering_out_the_current_video_falls_back() {
        // current = v1 (index 2); photos-only removes it, old index is out
        // of bounds, position falls back to the start
        let mut c = controller(vec![photo("p1"), photo("p2"), video("v1")]);
        c.handle_command(Command::Next, Instant::now());
        c.handle_command(Command::Next, Instant::now());
        assert_eq!(c.current_item().unwrap().id, "v1");

        c.handle_command(Command::CycleFilter, Instant::now());
        let snap = c.snapshot();
        assert_eq!(snap.media_filter, MediaFilter::PhotosOnly);
        assert_eq!(snap.total_count, 2);
        assert_eq!(snap.current_index, Some(0));
        assert_eq!(snap.current_item.unwrap().id, "p1");
    }

    #[test]
    fn cycling_order_keeps_the_current_item() {
        let mut c = controller(vec![photo("a"), photo("b"), photo("c"), photo("d")]);
        c.handle_command(Command::Next, Instant::now());
        assert_eq!(c.current_item().unwrap().id, "b");

        c.handle_command(Command::CycleDisplayOrder, Instant::now());
        assert_eq!(c.snapshot().display_order, DisplayOrder::Random);
        assert_eq!(c.current_item().unwrap().id, "b");

        c.handle_command(Command::CycleDisplayOrder, Instant::now());
        assert_eq!(c.snapshot().display_order, DisplayOrder::Alphabetical);
        assert_eq!(c.current_item().unwrap().id, "b");
    }

    #[test]
    fn filter_cycle_closes_and_videos_only_can_be_empty() {
        let mut c = controller(vec![photo("p1")]);
        c.handle_command(Command::CycleFilter, Instant::now()); // photos only
        assert_eq!(c.current_item().unwrap().id, "p1");
        c.handle_command(Command::CycleFilter, Instant::now()); // videos only
        assert_eq!(c.current_item(), None);
        assert_eq!(c.current_index(), None);
        assert_eq!(c.time_remaining(), 0);
        c.handle_command(Command::CycleFilter, Instant::now()); // back to all
        assert_eq!(c.current_item().unwrap().id, "p1");
    }

    #[test]
    fn config_change_recomputes_countdown_without_moving() {
        let mut c = controller(vec![photo("p1"), photo("p2")]);
        c.on_photo_tick();
        assert_eq!(c.time_remaining(), 2);

        let new_config = SlideshowConfig {
            photo_display_seconds: 8,
            ..cfg()
        };
        c.handle_command(Command::UpdateConfig(new_config), Instant::now());
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.time_remaining(), 8);
    }

    #[test]
    fn photo_ticks_expire_into_advance() {
        let mut c = controller(vec![photo("p1"), photo("p2")]);
        c.on_photo_tick(); // 3 -> 2
        c.on_photo_tick(); // 2 -> 1
        c.on_photo_tick(); // expire -> advance
        assert_eq!(c.current_item().unwrap().id, "p2");
        assert_eq!(c.time_remaining(), 3);
    }

    #[test]
    fn timer_is_suspended_on_videos_and_while_paused() {
        let mut c = controller(vec![video("v1"), photo("p1")]);
        assert!(!c.photo_timer_armed());
        c.handle_command(Command::Next, Instant::now());
        assert!(c.photo_timer_armed());
        c.handle_command(Command::PlayPause, Instant::now());
        assert!(!c.photo_timer_armed());
    }

    #[test]
    fn play_signal_arms_fixed_duration_deadline() {
        let mut c = controller(vec![video("v1")]);
        let now = Instant::now();
        c.handle_video_signal(VideoSignal::Play, now);
        assert_eq!(c.video_deadline(), Some(now + Duration::from_secs(5)));
    }

    #[test]
    fn pausing_cancels_the_video_deadline() {
        let mut c = controller(vec![video("v1")]);
        c.handle_video_signal(VideoSignal::Play, Instant::now());
        assert!(c.video_deadline().is_some());
        c.handle_command(Command::PlayPause, Instant::now());
        assert_eq!(c.video_deadline(), None);
    }

    #[test]
    fn navigating_away_cancels_the_video_deadline() {
        let mut c = controller(vec![video("v1"), photo("p1")]);
        c.handle_video_signal(VideoSignal::Play, Instant::now());
        assert!(c.video_deadline().is_some());
        c.handle_command(Command::Next, Instant::now());
        assert_eq!(c.video_deadline(), None);
    }

    #[test]
    fn play_to_end_wrap_advances_once() {
        let mut c = controller(vec![video("v1"), video("v2")]);
        let config = SlideshowConfig {
            play_video_to_end: true,
            ..cfg()
        };
        c.handle_command(Command::UpdateConfig(config), Instant::now());
        assert_eq!(c.time_remaining(), 0);

        let now = Instant::now();
        for (position, duration) in [(0.1, 5.0), (4.9, 5.0), (5.0, 5.0)] {
            c.handle_video_signal(VideoSignal::TimeUpdate { position, duration }, now);
            assert_eq!(c.current_item().unwrap().id, "v1");
        }
        c.handle_video_signal(
            VideoSignal::TimeUpdate {
                position: 0.05,
                duration: 5.0,
            },
            now,
        );
        assert_eq!(c.current_item().unwrap().id, "v2");

        // the abandoned debounce state must not leak into v2
        c.handle_video_signal(
            VideoSignal::TimeUpdate {
                position: 0.1,
                duration: 8.0,
            },
            now,
        );
        assert_eq!(c.current_item().unwrap().id, "v2");
    }

    #[test]
    fn video_error_holds_the_current_slide() {
        let mut c = controller(vec![video("v1"), photo("p1")]);
        c.handle_video_signal(VideoSignal::Error("decode failed".into()), Instant::now());
        assert_eq!(c.current_item().unwrap().id, "v1");
    }

    #[test]
    fn catalog_failure_surfaces_error_and_empties_navigation() {
        let mut c = controller(vec![photo("p1")]);
        c.handle_command(
            Command::CatalogFailed("permission denied".into()),
            Instant::now(),
        );
        let snap = c.snapshot();
        assert_eq!(snap.current_item, None);
        assert_eq!(snap.total_count, 0);
        assert_eq!(snap.last_error.as_deref(), Some("permission denied"));
    }

    #[test]
    fn catalog_reload_resets_position_and_clears_error() {
        let mut c = controller(vec![photo("p1"), photo("p2")]);
        c.handle_command(Command::Next, Instant::now());
        c.handle_command(
            Command::CatalogFailed("folder unreadable".into()),
            Instant::now(),
        );
        c.handle_command(
            Command::CatalogLoaded(vec![photo("x"), photo("y")]),
            Instant::now(),
        );
        let snap = c.snapshot();
        assert_eq!(snap.current_index, Some(0));
        assert_eq!(snap.current_item.unwrap().id, "x");
        assert_eq!(snap.last_error, None);
    }

    #[test]
    fn mute_toggle_round_trips() {
        let mut c = controller(vec![photo("p1")]);
        assert!(!c.is_muted());
        c.handle_command(Command::ToggleMute, Instant::now());
        assert!(c.is_muted());
        c.handle_command(Command::ToggleMute, Instant::now());
        assert!(!c.is_muted());
    }
}
