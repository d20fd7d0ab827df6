use crate::config::DeckConfig;
use crate::events::{DeckEvent, EventSink};
use crate::loader::{PaginationLoader, PendingPage, SharedWindow};
use crate::scheduling::{IdleSignal, OneShotTimer, build_scheduler};
use crate::vote_queue::VoteQueue;
use crate::{Result, lock};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use swipedeck_engine::{
    CandidateWindow, Commit, GestureContext, GestureMachine, PointerEvent,
    PointerSample, Rect, StackPhase, StackPosition, Transition, Viewport, compact_consumed,
};
use swipedeck_providers::CandidateSource;
use swipedeck_types::{Candidate, CandidateId, Decision, FilterMode, VoteEntry};
use tokio::runtime::Handle;
use uuid::Uuid;

type SlotKey = (Option<CandidateId>, Option<CandidateId>);

struct StackState {
    position: StackPosition,
    phase: StackPhase,
    filter: FilterMode,
    detail: Option<CandidateId>,
    machine: GestureMachine,
    /// Active/next ids last announced to the host
    published: Option<SlotKey>,
}

/// Point-in-time view of the whole deck
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckSnapshot {
    pub current_index: usize,
    pub window_len: usize,
    pub fetch_offset: usize,
    pub epoch: u64,
    pub terminal_appended: bool,
    pub is_fetching: bool,
    pub phase: StackPhase,
    pub detail_open: bool,
    pub filter: FilterMode,
    pub active: Option<Candidate>,
    pub next: Option<Candidate>,
    pub pending_votes: Vec<VoteEntry>,
}

struct ControllerInner {
    session_id: Uuid,
    config: DeckConfig,
    runtime: Handle,
    // Lock order: window, then state.
    window: SharedWindow,
    state: Mutex<StackState>,
    loader: PaginationLoader,
    votes: VoteQueue,
    idle: IdleSignal,
    events: EventSink,
    settle: OneShotTimer,
}

/// Owns the stack state and is the only writer of the candidate window.
///
/// Responsibilities:
/// - Route pointer input through the gesture machine
/// - Advance the active slot on committed decisions and hand them to the
///   vote queue
/// - Trigger pagination at the threshold and compact the window afterwards
/// - Announce slot changes, frames and detail view changes to the host
#[derive(Clone)]
pub struct StackController {
    inner: Arc<ControllerInner>,
}

impl StackController {
    pub fn new(
        source: Arc<dyn CandidateSource>,
        config: DeckConfig,
        events: EventSink,
        runtime: Handle,
    ) -> Result<Self> {
        config.validate()?;

        let idle = IdleSignal::new();
        let scheduler = build_scheduler(
            config.scheduler,
            runtime.clone(),
            idle.clone(),
            config.idle_timeout(),
        );
        let votes = VoteQueue::new(
            Arc::clone(&source),
            scheduler,
            events.clone(),
            &config,
            runtime.clone(),
        );
        let loader = PaginationLoader::new(source, config.page_size);
        let machine = GestureMachine::new(config.gesture.clone(), Viewport::default());
        let session_id = Uuid::new_v4();

        tracing::debug!(
            session = %session_id,
            scheduler = ?config.scheduler,
            page_size = config.page_size,
            "stack controller created"
        );

        Ok(Self {
            inner: Arc::new(ControllerInner {
                session_id,
                settle: OneShotTimer::new("settle", runtime.clone()),
                runtime,
                window: Arc::new(Mutex::new(CandidateWindow::new())),
                state: Mutex::new(StackState {
                    position: StackPosition::new(),
                    phase: StackPhase::Idle,
                    filter: FilterMode::Feed,
                    detail: None,
                    machine,
                    published: None,
                }),
                loader,
                votes,
                idle,
                events,
                config,
            }),
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.inner.session_id
    }

    pub fn config(&self) -> &DeckConfig {
        &self.inner.config
    }

    pub fn votes(&self) -> &VoteQueue {
        &self.inner.votes
    }

    /// Load the first page and announce the initial slots
    pub async fn start(&self) -> bool {
        let pending = {
            let mut window = lock(&self.inner.window);
            let state = lock(&self.inner.state);
            self.inner.claim(&mut window, &state)
        };
        match pending {
            Some(pending) => finish_load(Arc::clone(&self.inner), pending).await,
            None => false,
        }
    }

    /// Switch filter mode: drop the window, start a new epoch and load its
    /// first page. Responses still in flight for the old epoch are discarded.
    pub async fn set_filter(&self, filter: FilterMode) -> bool {
        let (pending, closed) = {
            let mut window = lock(&self.inner.window);
            let mut state = lock(&self.inner.state);
            let epoch = window.reset();
            state.position.reset();
            state.machine.reset();
            state.published = None;
            state.filter = filter;
            tracing::debug!(
                session = %self.inner.session_id,
                epoch,
                filter = state.filter.name(),
                "filter changed"
            );
            let closed = state.detail.take();
            (self.inner.claim(&mut window, &state), closed)
        };

        if let Some(candidate_id) = closed {
            self.inner
                .events
                .emit(DeckEvent::DetailClosed { candidate_id });
        }
        self.inner.release_busy();

        match pending {
            Some(pending) => finish_load(Arc::clone(&self.inner), pending).await,
            None => false,
        }
    }

    /// Fetch the next page outside of a swipe, e.g. after a failed fetch
    /// left the stack without an active card. Compacts like a threshold load
    /// when the active index is past the threshold.
    pub async fn load_more(&self) -> bool {
        let pending = {
            let mut window = lock(&self.inner.window);
            let state = lock(&self.inner.state);
            self.inner.claim(&mut window, &state)
        };
        match pending {
            Some(pending) => finish_load(Arc::clone(&self.inner), pending).await,
            None => false,
        }
    }

    pub fn filter(&self) -> FilterMode {
        lock(&self.inner.state).filter.clone()
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        lock(&self.inner.state).machine.set_viewport(viewport);
    }

    /// Feed one raw pointer event through the gesture machine
    pub fn feed_pointer(&self, event: &PointerEvent) -> Transition {
        let inner = &self.inner;
        let (transition, expanded) = {
            let window = lock(&inner.window);
            let mut state = lock(&inner.state);
            let active = state.position.active(&window);
            let ctx = GestureContext {
                active_slot: active.map(|_| state.position.current_index()),
                active_is_terminal: active.is_some_and(|c| c.is_terminal),
                detail_open: state.detail.is_some(),
            };
            let transition = state.machine.feed(event, &ctx);

            let expanded = match transition {
                Transition::Committed {
                    commit: Commit::Expand,
                    ..
                } => {
                    let id = active.map(|c| c.id.clone());
                    state.detail = id.clone();
                    id
                }
                _ => None,
            };
            (transition, expanded)
        };

        match &transition {
            Transition::Started { .. } => inner.idle.set_busy(true),
            Transition::Frame(frame) => inner.events.emit(DeckEvent::GestureFrame(frame.clone())),
            Transition::SnapBack(snap) => {
                inner.events.emit(DeckEvent::SnapBack(snap.clone()));
                inner.release_busy();
            }
            Transition::Committed {
                commit: Commit::Swipe(decision),
                ..
            } => {
                if !inner.commit(*decision) {
                    inner.release_busy();
                }
            }
            Transition::Committed {
                commit: Commit::Expand,
                ..
            } => {
                if let Some(candidate_id) = expanded {
                    inner.events.emit(DeckEvent::DetailOpened {
                        candidate_id,
                        animated: false,
                    });
                }
                inner.release_busy();
            }
            Transition::Ignored => inner.release_busy(),
        }
        transition
    }

    /// Start a drag on whatever slot is currently active
    pub fn press_active(&self, element: Rect, sample: PointerSample) -> Transition {
        let slot = lock(&self.inner.state).position.current_index();
        self.feed_pointer(&PointerEvent::Down {
            slot,
            element,
            sample,
        })
    }

    /// Commit a decision without a gesture (accept/reject buttons)
    pub fn vote(&self, decision: Decision) -> bool {
        self.inner.commit(decision)
    }

    /// Open the detail view for the active candidate
    pub fn open_detail(&self) -> bool {
        let candidate_id = {
            let window = lock(&self.inner.window);
            let mut state = lock(&self.inner.state);
            if state.detail.is_some() {
                return false;
            }
            let Some(active) = state.position.active(&window) else {
                return false;
            };
            if active.is_terminal {
                return false;
            }
            let id = active.id.clone();
            state.machine.reset();
            state.detail = Some(id.clone());
            id
        };

        self.inner.events.emit(DeckEvent::DetailOpened {
            candidate_id,
            animated: true,
        });
        self.inner.release_busy();
        true
    }

    pub fn close_detail(&self) -> bool {
        let closed = lock(&self.inner.state).detail.take();
        match closed {
            Some(candidate_id) => {
                self.inner
                    .events
                    .emit(DeckEvent::DetailClosed { candidate_id });
                true
            }
            None => false,
        }
    }

    /// Candidates currently resident in the window, in presentation order
    pub fn window_items(&self) -> Vec<Candidate> {
        lock(&self.inner.window).items().to_vec()
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        let pending_votes = self.inner.votes.snapshot().pending;
        let window = lock(&self.inner.window);
        let state = lock(&self.inner.state);
        DeckSnapshot {
            current_index: state.position.current_index(),
            window_len: window.len(),
            fetch_offset: window.fetch_offset(),
            epoch: window.epoch(),
            terminal_appended: window.terminal_appended(),
            is_fetching: window.is_fetching(),
            phase: state.phase,
            detail_open: state.detail.is_some(),
            filter: state.filter.clone(),
            active: state.position.active(&window).cloned(),
            next: state.position.next(&window).cloned(),
            pending_votes,
        }
    }
}

impl ControllerInner {
    /// Claim a page fetch for the current filter and announce it
    fn claim(&self, window: &mut CandidateWindow, state: &StackState) -> Option<PendingPage> {
        let pending = self
            .loader
            .claim(window, &self.window, state.filter.clone())?;
        let request = pending.request();
        self.events.emit(DeckEvent::PageRequested {
            offset: request.offset,
            limit: request.limit,
            epoch: pending.ticket().epoch,
        });
        Some(pending)
    }

    fn commit(self: &Arc<Self>, decision: Decision) -> bool {
        let (retired, pending) = {
            let mut window = lock(&self.window);
            let mut state = lock(&self.state);
            if state.phase == StackPhase::AnimatingTransition {
                tracing::debug!(decision = %decision, "transition in progress, decision ignored");
                return false;
            }
            let retired = match state.position.active(&window) {
                Some(active) if !active.is_terminal => active.id.clone(),
                _ => return false,
            };

            state.phase = StackPhase::AnimatingTransition;
            state.position.advance();

            // Also refill when the active slot ran dry before the threshold,
            // which happens whenever page_size < pagination_threshold.
            let due = state.position.current_index() >= self.config.pagination_threshold
                || state.position.active(&window).is_none();
            let pending = if due {
                self.claim(&mut window, &state)
            } else {
                None
            };
            (retired, pending)
        };

        tracing::debug!(
            session = %self.session_id,
            candidate_id = %retired,
            decision = %decision,
            "decision committed"
        );
        self.idle.set_busy(true);
        self.votes.enqueue(decision, retired.clone());

        if let Some(pending) = pending {
            let inner = Arc::clone(self);
            self.runtime.spawn(async move {
                finish_load(inner, pending).await;
            });
        }

        self.publish_view();

        let inner = Arc::clone(self);
        self.settle.arm(self.config.settle_delay(), async move {
            inner.settle(retired);
        });
        true
    }

    fn settle(&self, retired: CandidateId) {
        lock(&self.state).phase = StackPhase::Idle;
        self.release_busy();
        self.events.emit(DeckEvent::ActiveRetired {
            candidate_id: retired,
        });
    }

    fn release_busy(&self) {
        let busy = {
            let state = lock(&self.state);
            state.phase == StackPhase::AnimatingTransition || state.machine.is_dragging()
        };
        self.idle.set_busy(busy);
    }

    /// Drop consumed candidates once the active index is past the threshold.
    ///
    /// Runs under the window lock that appended the page, so no decision can
    /// observe the pre-compaction index after the fetch slot is released.
    fn compact_if_due(&self, window: &mut CandidateWindow) -> Result<()> {
        let mut state = lock(&self.state);
        let count = self.config.pagination_threshold;
        if state.position.current_index() < count {
            return Ok(());
        }

        compact_consumed(window, &mut state.position, count)?;
        tracing::debug!(
            dropped = count,
            current_index = state.position.current_index(),
            window_len = window.len(),
            "window compacted"
        );
        Ok(())
    }

    /// Announce the active/next slots if they changed since the last time
    fn publish_view(&self) {
        let (active, next) = {
            let window = lock(&self.window);
            let mut state = lock(&self.state);
            let active = state.position.active(&window).cloned();
            let next = state.position.next(&window).cloned();
            let key = (
                active.as_ref().map(|c| c.id.clone()),
                next.as_ref().map(|c| c.id.clone()),
            );
            if state.published.as_ref() == Some(&key) {
                return;
            }
            state.published = Some(key);
            (active, next)
        };

        let terminal = active.as_ref().is_some_and(|c| c.is_terminal);
        self.events.emit(DeckEvent::StackAdvanced { active, next });
        if terminal {
            tracing::debug!(session = %self.session_id, "terminal candidate reached");
            self.events.emit(DeckEvent::TerminalReached);
        }
    }
}

async fn finish_load(inner: Arc<ControllerInner>, pending: PendingPage) -> bool {
    let compactor = Arc::clone(&inner);
    let added = pending
        .complete_with(move |window| compactor.compact_if_due(window))
        .await;
    if added {
        inner.publish_view();
    }
    added
}
