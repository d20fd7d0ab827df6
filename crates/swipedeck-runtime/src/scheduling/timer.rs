use crate::lock;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Default)]
struct TimerSlot {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// A single-shot, re-armable timer.
///
/// Arming replaces any pending run; at most one run is ever pending. Once the
/// delay has elapsed the task is detached from the timer, so re-arming from
/// inside the task (or while it runs) never aborts it.
pub struct OneShotTimer {
    name: &'static str,
    runtime: Handle,
    slot: Arc<Mutex<TimerSlot>>,
}

impl OneShotTimer {
    pub fn new(name: &'static str, runtime: Handle) -> Self {
        Self {
            name,
            runtime,
            slot: Arc::new(Mutex::new(TimerSlot::default())),
        }
    }

    pub fn arm<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = lock(&self.slot);
        if let Some(previous) = slot.pending.take() {
            previous.abort();
        }
        slot.generation += 1;

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let name = self.name;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut slot = lock(&shared);
                if slot.generation != generation {
                    return;
                }
                slot.pending = None;
            }
            tracing::debug!(timer = name, "timer fired");
            task.await;
        });
        slot.pending = Some(handle);
    }

    /// Drop the pending run, if any
    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        if let Some(pending) = slot.pending.take() {
            pending.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }
}

impl Drop for OneShotTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
