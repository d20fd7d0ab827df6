pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod loader;
pub mod scheduling;
pub mod vote_queue;

pub use config::{DeckConfig, SchedulerKind};
pub use controller::{DeckSnapshot, StackController};
pub use error::{Error, Result};
pub use events::{DeckEvent, EventSink};
pub use loader::{PaginationLoader, PendingPage, SharedWindow};
pub use scheduling::{IdleScheduler, IdleSignal, OneShotTimer, Scheduler, TimerScheduler};
pub use vote_queue::{QueueSnapshot, VoteQueue};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
