//! Continuous-gesture recognition for the active stack slot.
//!
//! The machine is host-agnostic: the host converts raw mouse/touch events into
//! [`PointerEvent`]s and feeds them in, and renders whatever [`Transition`]
//! comes back. No DOM or windowing types appear here.

mod frame;
mod geometry;
mod machine;
mod pointer;
mod tuning;

pub use frame::{ExpandFrame, GestureFrame, SnapBack, drag_frame, rest_frame};
pub use geometry::{Point, Rect, Viewport, lerp};
pub use machine::{Commit, DragSession, GestureContext, GestureMachine, GestureState, Transition};
pub use pointer::{PointerEvent, PointerSample};
pub use tuning::GestureTuning;
