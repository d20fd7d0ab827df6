// Engine - pure, synchronous swipe-deck logic.
// Nothing in this crate performs I/O, spawns tasks or reads clocks; the
// runtime layer owns all of that and drives these types.

pub mod error;
pub mod gesture;
pub mod stack;
pub mod window;

pub use error::{Result, WindowError};
pub use gesture::{
    Commit, DragSession, ExpandFrame, GestureContext, GestureFrame, GestureMachine, GestureState,
    GestureTuning, Point, PointerEvent, PointerSample, Rect, SnapBack, Transition, Viewport,
};
pub use stack::{StackPhase, StackPosition, compact_consumed};
pub use window::{AppendOutcome, CandidateWindow, FetchTicket};
