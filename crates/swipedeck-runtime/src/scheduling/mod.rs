// Scheduling primitives: pluggable flush schedulers and single-shot timers.
// Everything here spawns onto an explicit runtime handle so that callers on
// synchronous paths (enqueue, gesture input) never need to be inside a task.

pub mod scheduler;
pub mod timer;

pub use scheduler::{IdleScheduler, IdleSignal, Scheduler, TimerScheduler, build_scheduler};
pub use timer::OneShotTimer;
