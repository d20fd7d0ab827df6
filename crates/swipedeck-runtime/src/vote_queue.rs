use crate::config::DeckConfig;
use crate::events::{DeckEvent, EventSink};
use crate::lock;
use crate::scheduling::{OneShotTimer, Scheduler};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use swipedeck_providers::CandidateSource;
use swipedeck_types::{CandidateId, Decision, VoteEntry};
use tokio::runtime::Handle;

#[derive(Default)]
struct QueueState {
    entries: VecDeque<VoteEntry>,
    is_flushing: bool,
    flush_requested: bool,
    favorites_dirty: bool,
    refresh_scheduled: bool,
}

/// Point-in-time view of the queue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueSnapshot {
    pub pending: Vec<VoteEntry>,
    pub is_flushing: bool,
    pub favorites_dirty: bool,
    pub refresh_scheduled: bool,
}

struct QueueInner {
    source: Arc<dyn CandidateSource>,
    scheduler: Arc<dyn Scheduler>,
    events: EventSink,
    state: Mutex<QueueState>,
    retry: OneShotTimer,
    refresh: OneShotTimer,
    backoff: Duration,
    debounce: Duration,
}

/// Optimistic FIFO of decisions awaiting persistence.
///
/// `enqueue` never blocks. A background flush pass persists entries strictly
/// in order; an entry leaves the queue only once the source accepted it, and a
/// failure stops the pass with that entry still at the head. Failed passes are
/// retried after `flush_backoff_ms`, without limit; enqueueing during the
/// backoff does not bring the retry forward. Accepted decisions mark the
/// favorites list dirty; a debounced refresh reloads it once per burst.
#[derive(Clone)]
pub struct VoteQueue {
    inner: Arc<QueueInner>,
}

impl VoteQueue {
    pub fn new(
        source: Arc<dyn CandidateSource>,
        scheduler: Arc<dyn Scheduler>,
        events: EventSink,
        config: &DeckConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                source,
                scheduler,
                events,
                state: Mutex::new(QueueState::default()),
                retry: OneShotTimer::new("flush-retry", runtime.clone()),
                refresh: OneShotTimer::new("favorites-refresh", runtime),
                backoff: config.flush_backoff(),
                debounce: config.favorites_debounce(),
            }),
        }
    }

    pub fn enqueue(&self, decision: Decision, candidate_id: CandidateId) {
        let pending = {
            let mut state = lock(&self.inner.state);
            state
                .entries
                .push_back(VoteEntry::new(decision, candidate_id.clone()));
            state.entries.len()
        };
        tracing::debug!(
            candidate_id = %candidate_id,
            decision = %decision,
            pending,
            "vote enqueued"
        );
        request_flush(&self.inner);
    }

    pub fn len(&self) -> usize {
        lock(&self.inner.state).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        let state = lock(&self.inner.state);
        QueueSnapshot {
            pending: state.entries.iter().cloned().collect(),
            is_flushing: state.is_flushing,
            favorites_dirty: state.favorites_dirty,
            refresh_scheduled: state.refresh_scheduled,
        }
    }

    /// Run a flush pass now, on the caller's task
    pub async fn flush(&self) {
        flush(Arc::clone(&self.inner)).await;
    }
}

fn request_flush(inner: &Arc<QueueInner>) {
    if inner.retry.is_armed() {
        return;
    }
    {
        let mut state = lock(&inner.state);
        if state.is_flushing || state.flush_requested || state.entries.is_empty() {
            return;
        }
        state.flush_requested = true;
    }
    let queue = Arc::clone(inner);
    inner.scheduler.schedule(Box::pin(flush(queue)));
}

async fn flush(inner: Arc<QueueInner>) {
    {
        let mut state = lock(&inner.state);
        state.flush_requested = false;
        if state.is_flushing {
            return;
        }
        state.is_flushing = true;
    }

    let mut stalled = false;
    loop {
        let head = {
            let mut state = lock(&inner.state);
            match state.entries.front() {
                Some(entry) => entry.clone(),
                None => {
                    state.is_flushing = false;
                    break;
                }
            }
        };

        match inner
            .source
            .record_decision(head.decision, &head.candidate_id)
            .await
        {
            Ok(()) => {
                let mut state = lock(&inner.state);
                let persisted = state.entries.pop_front();
                debug_assert_eq!(persisted.as_ref().map(|e| e.id), Some(head.id));
                if head.decision.is_accept() {
                    state.favorites_dirty = true;
                }
                tracing::debug!(
                    candidate_id = %head.candidate_id,
                    decision = %head.decision,
                    pending = state.entries.len(),
                    "vote persisted"
                );
            }
            Err(err) => {
                let mut state = lock(&inner.state);
                let attempts = match state.entries.front_mut() {
                    Some(entry) => {
                        entry.attempts += 1;
                        entry.attempts
                    }
                    None => 0,
                };
                state.is_flushing = false;
                tracing::warn!(
                    candidate_id = %head.candidate_id,
                    attempts,
                    pending = state.entries.len(),
                    error = %err,
                    "vote persistence failed, retrying later"
                );
                stalled = true;
                break;
            }
        }
    }

    schedule_refresh(&inner);
    if stalled {
        schedule_retry(&inner);
    } else {
        inner.retry.cancel();
    }
}

fn schedule_retry(inner: &Arc<QueueInner>) {
    let queue = Arc::clone(inner);
    inner.retry.arm(inner.backoff, async move {
        request_flush(&queue);
    });
}

fn schedule_refresh(inner: &Arc<QueueInner>) {
    lock(&inner.state).refresh_scheduled = true;
    let queue = Arc::clone(inner);
    inner
        .refresh
        .arm(inner.debounce, refresh_favorites(queue));
}

async fn refresh_favorites(inner: Arc<QueueInner>) {
    {
        let mut state = lock(&inner.state);
        state.refresh_scheduled = false;
        if !state.favorites_dirty {
            return;
        }
        state.favorites_dirty = false;
    }

    match inner.source.notify_favorites_changed().await {
        Ok(favorites) => {
            tracing::debug!(count = favorites.len(), "favorites refreshed");
            inner.events.emit(DeckEvent::FavoritesRefreshed(favorites));
        }
        Err(err) => {
            tracing::warn!(error = %err, "favorites refresh failed");
            lock(&inner.state).favorites_dirty = true;
            schedule_refresh(&inner);
        }
    }
}
