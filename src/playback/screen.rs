//! Player screen coordinating playback and disc rotation.
//! Every input goes through here so that the rotation ticker is reconciled
//! with the playing flag after each state change, whatever caused it.

use std::path::Path;
use tracing::info;
use crate::audio::transport::{AudioTransport, TransportLoader};
use crate::config::PlayerConfig;
use crate::core::time::{format_time, Seconds};
use crate::playback::controller::PlaybackController;
use crate::playback::state::PlaybackSession;
use crate::playback::sync::DiscRotation;
use crate::timer::{Scheduler, TimerEvent, TimerKind};

/// State behind one visible player screen
pub struct PlayerScreen<T: AudioTransport, S: Scheduler> {
    controller: PlaybackController<T>,
    rotation: DiscRotation,
    scheduler: S,
    visible: bool,
}

impl<T: AudioTransport, S: Scheduler> PlayerScreen<T, S> {
    pub fn new(config: &PlayerConfig, scheduler: S) -> Self {
        Self {
            controller: PlaybackController::new(config.elapsed_tick()),
            rotation: DiscRotation::new(config.rotation_tick(), config.revolution()),
            scheduler,
            visible: false,
        }
    }

    /// View appeared: load the resource
    pub fn appear<L>(&mut self, loader: &L, path: &Path)
    where
        L: TransportLoader<Transport = T>,
    {
        self.controller.initialize(loader, path);
        self.visible = true;
        self.sync_rotation();
    }

    /// Play/pause button
    pub fn toggle_play(&mut self) {
        if self.controller.is_playing() {
            self.controller.pause();
        } else {
            self.controller.play(&self.scheduler);
        }
        self.sync_rotation();
    }

    pub fn play(&mut self) {
        self.controller.play(&self.scheduler);
        self.sync_rotation();
    }

    pub fn pause(&mut self) {
        self.controller.pause();
        self.sync_rotation();
    }

    /// Backward/forward buttons
    pub fn reset(&mut self) {
        self.controller.reset();
        self.sync_rotation();
    }

    /// Slider drag
    pub fn seek(&mut self, fraction: f64) {
        self.controller.seek(fraction);
        self.sync_rotation();
    }

    /// Deliver a timer tick to whichever component it drives
    pub fn handle_timer(&mut self, event: TimerEvent) {
        match event.kind {
            TimerKind::Elapsed => {
                self.controller.on_timer(&event);
            }
            TimerKind::Rotation => {
                self.rotation.on_timer(&event);
            }
        }
        self.sync_rotation();
    }

    /// View disappeared: stop everything and release the transport
    pub fn disappear(&mut self) {
        if !self.visible {
            return;
        }
        self.controller.teardown();
        self.rotation.stop();
        self.visible = false;
        info!("player screen dismissed");
    }

    fn sync_rotation(&mut self) {
        self.rotation.follow(self.controller.is_playing(), &self.scheduler);
    }

    pub fn session(&self) -> &PlaybackSession {
        self.controller.session()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn progress_fraction(&self) -> f64 {
        self.session().progress_fraction()
    }

    pub fn elapsed_seconds(&self) -> Seconds {
        self.session().elapsed_seconds()
    }

    pub fn formatted_elapsed(&self) -> String {
        format_time(self.session().elapsed_seconds())
    }

    pub fn formatted_total(&self) -> String {
        format_time(self.session().total_duration_seconds())
    }

    pub fn angle_degrees(&self) -> f64 {
        self.rotation.angle_degrees()
    }

    pub fn is_spinning(&self) -> bool {
        self.rotation.is_spinning()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<T: AudioTransport, S: Scheduler> Drop for PlayerScreen<T, S> {
    fn drop(&mut self) {
        self.disappear();
    }
}
