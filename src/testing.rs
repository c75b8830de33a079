//! Test doubles shared by the unit tests.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::audio::transport::{AudioTransport, TransportError, TransportLoader};
use crate::core::time::Seconds;
use crate::timer::{Scheduler, TimerEvent, TimerHandle, TimerId, TimerKind};

/// A transport call as observed by [`RecordingTransport`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportCall {
    Play,
    Pause,
    Seek(Seconds),
}

/// Transport that records every call and optionally fails all of them
#[derive(Debug)]
pub struct RecordingTransport {
    duration: Seconds,
    calls: Arc<Mutex<Vec<TransportCall>>>,
    failing: bool,
}

impl RecordingTransport {
    fn record(&self, call: TransportCall) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(call);
        if self.failing {
            Err(TransportError::UnknownDuration("broken-device".into()))
        } else {
            Ok(())
        }
    }
}

impl AudioTransport for RecordingTransport {
    fn duration(&self) -> Seconds {
        self.duration
    }

    fn play(&mut self) -> Result<(), TransportError> {
        self.record(TransportCall::Play)
    }

    fn pause(&mut self) -> Result<(), TransportError> {
        self.record(TransportCall::Pause)
    }

    fn seek(&mut self, position: Seconds) -> Result<(), TransportError> {
        self.record(TransportCall::Seek(position))
    }
}

/// Loader handing out [`RecordingTransport`]s, or failing like a missing file
#[derive(Debug, Clone, Default)]
pub struct FakeLoader {
    duration: Option<Seconds>,
    failing_calls: bool,
    calls: Arc<Mutex<Vec<TransportCall>>>,
}

impl FakeLoader {
    /// Loads succeed with a track of `duration` seconds
    pub fn with_duration(duration: Seconds) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Loads fail as if the resource were missing
    pub fn missing() -> Self {
        Self::default()
    }

    /// Loads succeed but every transport call reports an error
    pub fn failing_calls(mut self) -> Self {
        self.failing_calls = true;
        self
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl TransportLoader for FakeLoader {
    type Transport = RecordingTransport;

    fn load(&self, path: &Path) -> Result<RecordingTransport, TransportError> {
        match self.duration {
            Some(duration) => Ok(RecordingTransport {
                duration,
                calls: Arc::clone(&self.calls),
                failing: self.failing_calls,
            }),
            None => Err(TransportError::ResourceUnavailable {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }
}

#[derive(Debug, Default)]
struct ManualState {
    next_id: u64,
    live: BTreeMap<TimerId, (TimerKind, Duration)>,
    started: usize,
    cancelled: usize,
}

/// Scheduler whose timers only fire when the test says so
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live timers of a kind
    pub fn live(&self, kind: TimerKind) -> usize {
        let state = self.state.lock().unwrap();
        state.live.values().filter(|(k, _)| *k == kind).count()
    }

    pub fn live_total(&self) -> usize {
        self.state.lock().unwrap().live.len()
    }

    pub fn started(&self) -> usize {
        self.state.lock().unwrap().started
    }

    pub fn cancelled(&self) -> usize {
        self.state.lock().unwrap().cancelled
    }

    /// Period of the live timer of a kind
    pub fn period(&self, kind: TimerKind) -> Option<Duration> {
        let state = self.state.lock().unwrap();
        state
            .live
            .values()
            .find(|(k, _)| *k == kind)
            .map(|(_, period)| *period)
    }

    /// Produce the event the live timer of `kind` would deliver, if one is running
    pub fn fire(&self, kind: TimerKind) -> Option<TimerEvent> {
        let state = self.state.lock().unwrap();
        state
            .live
            .iter()
            .find(|(_, (k, _))| *k == kind)
            .map(|(id, _)| TimerEvent { id: *id, kind })
    }
}

impl Scheduler for ManualScheduler {
    fn start_repeating(&self, kind: TimerKind, period: Duration) -> TimerHandle {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = TimerId::from_raw(state.next_id);
        state.live.insert(id, (kind, period));
        state.started += 1;

        let shared = Arc::clone(&self.state);
        TimerHandle::new(id, kind, move || {
            let mut state = shared.lock().unwrap();
            if state.live.remove(&id).is_some() {
                state.cancelled += 1;
            }
        })
    }
}
