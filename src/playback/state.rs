//! Playback state machine and the session it lives in.

use crate::core::time::{Seconds, ZERO};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Paused - initial state, also entered at end of track
    #[default]
    Paused,
    /// Playing - transport running and elapsed time advancing
    Playing,
}

impl PlaybackState {
    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused)
    }
}

/// Per-screen playback position.
///
/// Elapsed time always stays within `[0, total]` and the progress fraction
/// is always `elapsed / total`, or 0 while no duration is known. Every
/// mutator keeps both relations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSession {
    state: PlaybackState,
    elapsed: Seconds,
    total: Seconds,
    progress: f64,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn elapsed_seconds(&self) -> Seconds {
        self.elapsed
    }

    pub fn total_duration_seconds(&self) -> Seconds {
        self.total
    }

    pub fn progress_fraction(&self) -> f64 {
        self.progress
    }

    /// Whether a positive duration is known
    pub fn has_duration(&self) -> bool {
        self.total > ZERO
    }

    /// Whether the position has reached the end of a known duration
    pub fn at_end(&self) -> bool {
        self.has_duration() && self.elapsed >= self.total
    }

    pub(crate) fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
    }

    /// Set the track length; the current position is clamped into it
    pub fn set_total_duration(&mut self, total: Seconds) {
        self.total = if total.is_finite() && total > ZERO { total } else { ZERO };
        self.set_elapsed(self.elapsed);
    }

    /// Move to an absolute position, clamped to the track
    pub fn set_elapsed(&mut self, elapsed: Seconds) {
        self.elapsed = if elapsed.is_nan() {
            ZERO
        } else {
            elapsed.clamp(ZERO, self.total)
        };
        self.progress = if self.has_duration() {
            self.elapsed / self.total
        } else {
            0.0
        };
    }

    /// Move to a fraction of the track.
    /// The fraction is clamped to `[0, 1]`; without a duration the position stays at zero.
    pub fn set_progress(&mut self, fraction: f64) {
        if !self.has_duration() {
            self.set_elapsed(ZERO);
            return;
        }
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.elapsed = fraction * self.total;
        self.progress = fraction;
    }

    /// Step forward, stopping at the end of the track
    pub fn advance(&mut self, step: Seconds) {
        self.set_elapsed(self.elapsed + step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(session: &PlaybackSession) {
        let elapsed = session.elapsed_seconds();
        let total = session.total_duration_seconds();
        assert!(elapsed >= 0.0 && elapsed <= total, "elapsed {elapsed} outside [0, {total}]");
        if total > 0.0 {
            assert!((session.progress_fraction() - elapsed / total).abs() < 1e-9);
        } else {
            assert_eq!(session.progress_fraction(), 0.0);
        }
    }

    #[test]
    fn test_new_session_is_paused_at_zero() {
        let session = PlaybackSession::new();
        assert!(session.state().is_paused());
        assert_eq!(session.elapsed_seconds(), 0.0);
        assert_eq!(session.total_duration_seconds(), 0.0);
        assert_eq!(session.progress_fraction(), 0.0);
        assert!(!session.at_end());
    }

    #[test]
    fn test_set_progress_round_trips_fraction() {
        let mut session = PlaybackSession::new();
        session.set_total_duration(200.0);
        for f in [0.0, 0.1, 0.333, 0.5, 0.99, 1.0] {
            session.set_progress(f);
            assert!((session.progress_fraction() - f).abs() < 1e-12);
            assert_consistent(&session);
        }
    }

    #[test]
    fn test_set_progress_clamps_out_of_range() {
        let mut session = PlaybackSession::new();
        session.set_total_duration(10.0);

        session.set_progress(1.5);
        assert_eq!(session.elapsed_seconds(), 10.0);
        assert_eq!(session.progress_fraction(), 1.0);

        session.set_progress(-0.2);
        assert_eq!(session.elapsed_seconds(), 0.0);

        session.set_progress(f64::NAN);
        assert_eq!(session.progress_fraction(), 0.0);
        assert_consistent(&session);
    }

    #[test]
    fn test_zero_duration_pins_progress() {
        let mut session = PlaybackSession::new();
        session.set_progress(0.7);
        assert_eq!(session.progress_fraction(), 0.0);
        session.advance(1.0);
        assert_eq!(session.elapsed_seconds(), 0.0);
        assert_consistent(&session);
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut session = PlaybackSession::new();
        session.set_total_duration(2.5);
        session.advance(1.0);
        session.advance(1.0);
        assert!(!session.at_end());
        session.advance(1.0);
        assert_eq!(session.elapsed_seconds(), 2.5);
        assert!(session.at_end());
        assert_consistent(&session);
    }

    #[test]
    fn test_shrinking_duration_clamps_position() {
        let mut session = PlaybackSession::new();
        session.set_total_duration(100.0);
        session.set_elapsed(80.0);
        session.set_total_duration(40.0);
        assert_eq!(session.elapsed_seconds(), 40.0);
        assert_consistent(&session);

        session.set_total_duration(f64::NAN);
        assert_eq!(session.total_duration_seconds(), 0.0);
        assert_consistent(&session);
    }
}
