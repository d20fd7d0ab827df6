// Re-exports of the domain and engine types a host works with.

pub use swipedeck_engine::{
    Commit, ExpandFrame, GestureFrame, GestureTuning, Point, PointerEvent, PointerSample, Rect,
    SnapBack, StackPhase, Transition, Viewport,
};
pub use swipedeck_runtime::{DeckConfig, DeckEvent, DeckSnapshot, QueueSnapshot, SchedulerKind};
pub use swipedeck_types::{
    Candidate, CandidateId, Decision, FilterMode, TERMINAL_CANDIDATE_ID, VoteEntry,
};
