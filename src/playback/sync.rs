//! Disc rotation kept in step with playback.
//! The rotation ticker runs exactly while playback runs; the angle freezes
//! where it is whenever playback stops.

use std::time::Duration;
use tracing::debug;
use crate::timer::{Scheduler, TimerEvent, TimerHandle, TimerKind};

/// Default period of the rotation ticker (50 ticks per second)
pub const ROTATION_TICK: Duration = Duration::from_millis(20);
/// Default time for one full revolution of the disc
pub const REVOLUTION: Duration = Duration::from_secs(10);
/// Degrees in one revolution; the angle wraps here
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// Angle advanced per tick so that one revolution takes `revolution`
pub fn degrees_per_tick(tick: Duration, revolution: Duration) -> f64 {
    if revolution.is_zero() {
        return 0.0;
    }
    FULL_TURN_DEGREES * tick.as_secs_f64() / revolution.as_secs_f64()
}

/// Disc angle, always in `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    angle_degrees: f64,
}

impl RotationState {
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    fn advance(&mut self, degrees: f64) {
        let next = (self.angle_degrees + degrees).rem_euclid(FULL_TURN_DEGREES);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        self.angle_degrees = if next >= FULL_TURN_DEGREES { 0.0 } else { next };
    }
}

/// Rotation driver for the album-art disc
pub struct DiscRotation {
    state: RotationState,
    timer: Option<TimerHandle>,
    tick_period: Duration,
    step: f64,
}

impl DiscRotation {
    pub fn new(tick_period: Duration, revolution: Duration) -> Self {
        Self {
            state: RotationState::default(),
            timer: None,
            tick_period,
            step: degrees_per_tick(tick_period, revolution),
        }
    }

    /// Start or stop the ticker to match the playing flag
    pub fn follow(&mut self, playing: bool, scheduler: &dyn Scheduler) {
        match (playing, self.timer.is_some()) {
            (true, false) => {
                self.timer = Some(scheduler.start_repeating(TimerKind::Rotation, self.tick_period));
                debug!(angle = self.state.angle_degrees(), "disc rotation started");
            }
            (false, true) => self.stop(),
            _ => {}
        }
    }

    /// Cancel the ticker, freezing the angle
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
            debug!(angle = self.state.angle_degrees(), "disc rotation stopped");
        }
    }

    /// One rotation tick; ignored unless the ticker is running
    pub fn tick(&mut self) {
        if self.timer.is_some() {
            self.state.advance(self.step);
        }
    }

    /// Apply a timer event; events from cancelled tickers are ignored
    pub fn on_timer(&mut self, event: &TimerEvent) -> bool {
        let current = self.timer.as_ref().is_some_and(|timer| timer.owns(event));
        if current {
            self.tick();
        }
        current
    }

    pub fn angle_degrees(&self) -> f64 {
        self.state.angle_degrees()
    }

    pub fn is_spinning(&self) -> bool {
        self.timer.is_some()
    }

    /// Degrees added per tick
    pub fn step(&self) -> f64 {
        self.step
    }
}
