//! Playback controller.
//! Sole owner of the playback session and the only caller of the audio
//! transport. Runs the elapsed-time ticker while playing.

use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::audio::transport::{AudioTransport, TransportError, TransportLoader};
use crate::core::time::{self, Seconds, ZERO};
use crate::playback::state::{PlaybackSession, PlaybackState};
use crate::timer::scheduler::MIN_PERIOD;
use crate::timer::{Scheduler, TimerEvent, TimerHandle, TimerKind};

/// Default period of the elapsed-time ticker
pub const ELAPSED_TICK: Duration = Duration::from_secs(1);

/// Playback controller for a single audio resource
pub struct PlaybackController<T: AudioTransport> {
    session: PlaybackSession,
    transport: Option<T>,
    elapsed_timer: Option<TimerHandle>,
    tick_period: Duration,
}

impl<T: AudioTransport> PlaybackController<T> {
    /// Create a controller with nothing loaded.
    /// Each tick advances playback by exactly one `tick_period`.
    pub fn new(tick_period: Duration) -> Self {
        Self {
            session: PlaybackSession::new(),
            transport: None,
            elapsed_timer: None,
            tick_period: tick_period.max(MIN_PERIOD),
        }
    }

    /// Playback time covered by one elapsed-time tick
    pub fn tick_step(&self) -> Seconds {
        time::from_duration(self.tick_period)
    }

    /// Load the audio resource and take its duration.
    ///
    /// A missing or unloadable resource leaves the duration at zero, which
    /// turns every later playback operation into a no-op.
    pub fn initialize<L>(&mut self, loader: &L, path: &Path)
    where
        L: TransportLoader<Transport = T>,
    {
        self.pause();
        match loader.load(path) {
            Ok(transport) => {
                self.session.set_total_duration(transport.duration());
                info!(
                    path = %path.display(),
                    duration = self.session.total_duration_seconds(),
                    "player initialized"
                );
                self.transport = Some(transport);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "audio resource unavailable, playback disabled");
                self.transport = None;
                self.session.set_total_duration(ZERO);
            }
        }
    }

    /// Start playback from the current position
    pub fn play(&mut self, scheduler: &dyn Scheduler) {
        if self.session.is_playing() {
            return;
        }
        if !self.session.has_duration() {
            debug!("play ignored, nothing playable is loaded");
            return;
        }
        let Some(transport) = self.transport.as_mut() else {
            debug!("play ignored, no transport");
            return;
        };

        let position = self.session.elapsed_seconds();
        log_failure("seek", transport.seek(position));
        log_failure("play", transport.play());

        self.session.set_state(PlaybackState::Playing);
        self.elapsed_timer = Some(scheduler.start_repeating(TimerKind::Elapsed, self.tick_period));
        info!(position, "playback started");
    }

    /// Pause playback, keeping the position
    pub fn pause(&mut self) {
        if let Some(timer) = self.elapsed_timer.take() {
            timer.cancel();
        }
        if !self.session.is_playing() {
            return;
        }
        if let Some(transport) = self.transport.as_mut() {
            log_failure("pause", transport.pause());
        }
        self.session.set_state(PlaybackState::Paused);
        info!(position = self.session.elapsed_seconds(), "playback paused");
    }

    /// Rewind to the start without changing play/pause state
    pub fn reset(&mut self) {
        self.session.set_elapsed(ZERO);
        if let Some(transport) = self.transport.as_mut() {
            log_failure("seek", transport.seek(ZERO));
        }
        debug!("playback reset");
    }

    /// Jump to a fraction of the track (slider input)
    pub fn seek(&mut self, fraction: f64) {
        if !self.session.has_duration() {
            return;
        }
        self.session.set_progress(fraction);
        let position = self.session.elapsed_seconds();
        if let Some(transport) = self.transport.as_mut() {
            log_failure("seek", transport.seek(position));
        }
        debug!(fraction = self.session.progress_fraction(), position, "seek");
    }

    /// One elapsed-time tick: advance, and stop once the end is reached
    pub fn tick(&mut self) {
        if !self.session.is_playing() {
            return;
        }
        if self.session.elapsed_seconds() < self.session.total_duration_seconds() {
            self.session.advance(self.tick_step());
        }
        if self.session.at_end() {
            info!("end of track");
            self.pause();
        }
    }

    /// Apply a timer event; events from cancelled tickers are ignored
    pub fn on_timer(&mut self, event: &TimerEvent) -> bool {
        let current = self
            .elapsed_timer
            .as_ref()
            .is_some_and(|timer| timer.owns(event));
        if current {
            self.tick();
        } else {
            debug!(id = %event.id, "stale elapsed tick dropped");
        }
        current
    }

    /// Stop playback and release the transport
    pub fn teardown(&mut self) {
        self.pause();
        if self.transport.take().is_some() {
            debug!("transport released");
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    pub fn is_ticking(&self) -> bool {
        self.elapsed_timer.is_some()
    }
}

fn log_failure(operation: &str, result: Result<(), TransportError>) {
    if let Err(err) = result {
        warn!(operation, error = %err, "audio transport call failed");
    }
}
