pub mod scheduler;

pub use scheduler::{
    build_runtime, coalesce, Scheduler, TimerEvent, TimerHandle, TimerId, TimerKind, TokioScheduler,
    MAX_ROTATION_CATCH_UP,
};
