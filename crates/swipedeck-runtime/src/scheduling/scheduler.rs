use crate::config::SchedulerKind;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Where deferred background work (vote flushes) gets to run.
///
/// Responsibilities:
/// - Run the task eventually, exactly once
/// - Keep it off the interaction path as far as the implementation can
pub trait Scheduler: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn schedule(&self, task: BoxFuture<'static, ()>);
}

/// Busy/idle flag raised by the stack while a gesture or transition is live
#[derive(Clone)]
pub struct IdleSignal {
    busy: Arc<watch::Sender<bool>>,
}

impl Default for IdleSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl IdleSignal {
    pub fn new() -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            busy: Arc::new(busy),
        }
    }

    pub fn set_busy(&self, busy: bool) {
        self.busy.send_if_modified(|current| {
            let changed = *current != busy;
            *current = busy;
            changed
        });
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Resolve once the stack is idle; immediately if it already is
    pub async fn wait_idle(&self) {
        let mut rx = self.busy.subscribe();
        loop {
            if !*rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Runs tasks during idle periods, or after `timeout` if none comes
pub struct IdleScheduler {
    runtime: Handle,
    signal: IdleSignal,
    timeout: Duration,
}

impl IdleScheduler {
    pub fn new(runtime: Handle, signal: IdleSignal, timeout: Duration) -> Self {
        Self {
            runtime,
            signal,
            timeout,
        }
    }
}

impl Scheduler for IdleScheduler {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn schedule(&self, task: BoxFuture<'static, ()>) {
        let signal = self.signal.clone();
        let timeout = self.timeout;
        self.runtime.spawn(async move {
            tokio::select! {
                _ = signal.wait_idle() => {}
                _ = tokio::time::sleep(timeout) => {
                    tracing::debug!(timeout_ms = timeout.as_millis() as u64, "no idle period, running anyway");
                }
            }
            task.await;
        });
    }
}

/// Runs tasks on the next runtime tick
pub struct TimerScheduler {
    runtime: Handle,
}

impl TimerScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for TimerScheduler {
    fn name(&self) -> &'static str {
        "timer"
    }

    fn schedule(&self, task: BoxFuture<'static, ()>) {
        self.runtime.spawn(async move {
            tokio::task::yield_now().await;
            task.await;
        });
    }
}

pub fn build_scheduler(
    kind: SchedulerKind,
    runtime: Handle,
    signal: IdleSignal,
    idle_timeout: Duration,
) -> Arc<dyn Scheduler> {
    match kind {
        SchedulerKind::Idle => Arc::new(IdleScheduler::new(runtime, signal, idle_timeout)),
        SchedulerKind::Timer => Arc::new(TimerScheduler::new(runtime)),
    }
}
