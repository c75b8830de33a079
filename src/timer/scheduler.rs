//! Cancellable repeating timers.
//!
//! Timers never touch player state themselves. Each tick is delivered as a
//! [`TimerEvent`] over a crossbeam channel and applied by whoever owns the
//! state, on its own thread. A timer runs until its [`TimerHandle`] is
//! cancelled or dropped.

use crossbeam::channel;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Handle, Runtime};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Shortest period a timer may run at
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Most rotation ticks applied from one backlog
pub const MAX_ROTATION_CATCH_UP: usize = 5;

/// What a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Advances playback position once per period
    Elapsed,
    /// Advances the disc angle once per period
    Rotation,
}

/// Identity of one started timer; never reused within a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// One tick of a running timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub id: TimerId,
    pub kind: TimerKind,
}

/// Starts repeating timers
pub trait Scheduler {
    fn start_repeating(&self, kind: TimerKind, period: Duration) -> TimerHandle;
}

/// Owner of a running timer. Cancels the timer when cancelled or dropped.
pub struct TimerHandle {
    id: TimerId,
    kind: TimerKind,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(id: TimerId, kind: TimerKind, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            kind,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Whether an event was produced by this timer
    pub fn owns(&self, event: &TimerEvent) -> bool {
        event.id == self.id
    }

    /// Stop the timer now
    pub fn cancel(mut self) {
        self.fire_cancel();
    }

    fn fire_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            debug!(id = %self.id, kind = ?self.kind, "timer cancelled");
            cancel();
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.fire_cancel();
    }
}

/// Build the background runtime that hosts timer tasks
pub fn build_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("player-timers")
        .enable_time()
        .build()
}

/// Scheduler running each timer as a tokio task
#[derive(Clone)]
pub struct TokioScheduler {
    runtime: Handle,
    tx: channel::Sender<TimerEvent>,
    next_id: Arc<AtomicU64>,
    waker: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl TokioScheduler {
    /// Create a scheduler on a runtime, returning the receiving end for its events
    pub fn new(runtime: Handle) -> (Self, channel::Receiver<TimerEvent>) {
        let (tx, rx) = channel::unbounded();
        let scheduler = Self {
            runtime,
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
            waker: None,
        };
        (scheduler, rx)
    }

    /// Call `waker` after every delivered event, e.g. to request a repaint
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }
}

impl Scheduler for TokioScheduler {
    fn start_repeating(&self, kind: TimerKind, period: Duration) -> TimerHandle {
        let id = TimerId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));
        let period = period.max(MIN_PERIOD);
        let tx = self.tx.clone();
        let waker = self.waker.clone();

        let task = self.runtime.spawn(async move {
            // First tick one full period after start, like a scheduled timer
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(TimerEvent { id, kind }).is_err() {
                    break;
                }
                if let Some(waker) = &waker {
                    waker();
                }
            }
        });

        debug!(%id, ?kind, ?period, "timer started");
        TimerHandle::new(id, kind, move || task.abort())
    }
}

/// Collapse a backlog of events.
/// Elapsed ticks are all kept, in order; of the rotation ticks only the
/// newest `max_rotation` survive.
pub fn coalesce(events: impl IntoIterator<Item = TimerEvent>, max_rotation: usize) -> Vec<TimerEvent> {
    let events: Vec<TimerEvent> = events.into_iter().collect();
    let rotations = events.iter().filter(|e| e.kind == TimerKind::Rotation).count();
    let mut skip = rotations.saturating_sub(max_rotation);
    if skip > 0 {
        debug!(dropped = skip, "rotation backlog coalesced");
    }

    events
        .into_iter()
        .filter(|event| {
            if event.kind == TimerKind::Rotation && skip > 0 {
                skip -= 1;
                false
            } else {
                true
            }
        })
        .collect()
}
