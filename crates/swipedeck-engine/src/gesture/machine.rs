use super::frame::{GestureFrame, SnapBack, drag_frame, rest_frame, trigger_height};
use super::geometry::{Point, Rect, Viewport};
use super::pointer::PointerEvent;
use super::tuning::GestureTuning;
use swipedeck_types::Decision;

/// Transient state of one drag, from pointer-down to the terminal transition
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub slot: usize,
    pub origin: Point,
    /// Element box before the drag started
    pub element: Rect,
    /// Last resolved pointer position, used when a release carries no
    /// coordinates
    pub last: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Final outcome of a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Swipe(Decision),
    Expand,
}

/// What a single fed event did to the machine
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Event did not apply (wrong slot, detail open, not dragging, ...)
    Ignored,
    Started { slot: usize },
    Frame(GestureFrame),
    Committed { slot: usize, commit: Commit },
    SnapBack(SnapBack),
}

/// Stack facts the machine needs to decide whether a drag may start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureContext {
    pub active_slot: Option<usize>,
    pub active_is_terminal: bool,
    pub detail_open: bool,
}

#[derive(Debug, Clone)]
pub struct GestureMachine {
    state: GestureState,
    tuning: GestureTuning,
    viewport: Viewport,
}

impl GestureMachine {
    pub fn new(tuning: GestureTuning, viewport: Viewport) -> Self {
        Self {
            state: GestureState::Idle,
            tuning,
            viewport,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn tuning(&self) -> &GestureTuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Drop any drag in progress without producing a transition
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    pub fn feed(&mut self, event: &PointerEvent, ctx: &GestureContext) -> Transition {
        match event {
            PointerEvent::Down {
                slot,
                element,
                sample,
            } => {
                if self.is_dragging() || ctx.detail_open || ctx.active_is_terminal {
                    return Transition::Ignored;
                }
                if ctx.active_slot != Some(*slot) {
                    return Transition::Ignored;
                }
                let Some(origin) = sample.resolve() else {
                    return Transition::Ignored;
                };
                self.state = GestureState::Dragging(DragSession {
                    slot: *slot,
                    origin,
                    element: *element,
                    last: origin,
                });
                Transition::Started { slot: *slot }
            }
            PointerEvent::Move { sample } => {
                if ctx.detail_open {
                    self.reset();
                    return Transition::Ignored;
                }
                let GestureState::Dragging(session) = &mut self.state else {
                    return Transition::Ignored;
                };
                let Some(point) = sample.resolve() else {
                    return Transition::Ignored;
                };
                session.last = point;
                let delta = point.delta_from(session.origin);

                if delta.y > trigger_height(self.viewport, &self.tuning) {
                    let slot = session.slot;
                    self.reset();
                    return Transition::Committed {
                        slot,
                        commit: Commit::Expand,
                    };
                }

                Transition::Frame(drag_frame(session, delta, self.viewport, &self.tuning))
            }
            PointerEvent::Up { sample } => {
                let GestureState::Dragging(session) = std::mem::take(&mut self.state) else {
                    return Transition::Ignored;
                };
                if ctx.detail_open {
                    return Transition::Ignored;
                }
                let point = sample.resolve().unwrap_or(session.last);
                let delta = point.delta_from(session.origin);
                let threshold = self.viewport.width * self.tuning.commit_fraction;

                if delta.x.abs() > threshold {
                    Transition::Committed {
                        slot: session.slot,
                        commit: Commit::Swipe(Decision::from_direction(delta.x)),
                    }
                } else {
                    self.snap_back(&session)
                }
            }
            PointerEvent::Cancel => {
                let GestureState::Dragging(session) = std::mem::take(&mut self.state) else {
                    return Transition::Ignored;
                };
                self.snap_back(&session)
            }
        }
    }

    fn snap_back(&self, session: &DragSession) -> Transition {
        Transition::SnapBack(SnapBack {
            frame: rest_frame(session),
            duration_ms: self.tuning.snap_back_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PointerSample;

    const ELEMENT: Rect = Rect {
        left: 40.0,
        top: 0.0,
        width: 320.0,
        height: 640.0,
    };

    fn machine() -> GestureMachine {
        GestureMachine::new(GestureTuning::default(), Viewport::new(400.0, 800.0))
    }

    fn ctx() -> GestureContext {
        GestureContext {
            active_slot: Some(0),
            ..GestureContext::default()
        }
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            slot: 0,
            element: ELEMENT,
            sample: PointerSample::mouse(x, y),
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            sample: PointerSample::mouse(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            sample: PointerSample::mouse(x, y),
        }
    }

    #[test]
    fn drag_right_past_threshold_accepts() {
        let mut m = machine();
        assert_eq!(m.feed(&down(200.0, 300.0), &ctx()), Transition::Started { slot: 0 });
        assert!(matches!(m.feed(&mv(280.0, 300.0), &ctx()), Transition::Frame(_)));

        let t = m.feed(&up(320.0, 300.0), &ctx());
        assert_eq!(
            t,
            Transition::Committed {
                slot: 0,
                commit: Commit::Swipe(Decision::Accept)
            }
        );
        assert!(!m.is_dragging());
    }

    #[test]
    fn drag_left_past_threshold_rejects() {
        let mut m = machine();
        m.feed(&down(200.0, 300.0), &ctx());
        let t = m.feed(&up(60.0, 300.0), &ctx());
        assert_eq!(
            t,
            Transition::Committed {
                slot: 0,
                commit: Commit::Swipe(Decision::Reject)
            }
        );
    }

    #[test]
    fn release_at_or_below_threshold_snaps_back() {
        for end_x in [200.0, 250.0, 300.0, 100.0] {
            let mut m = machine();
            m.feed(&down(200.0, 300.0), &ctx());
            m.feed(&mv(end_x, 300.0), &ctx());

            match m.feed(&up(end_x, 300.0), &ctx()) {
                Transition::SnapBack(snap) => {
                    assert_eq!(snap.frame.opacity, 1.0);
                    assert_eq!(snap.duration_ms, 500);
                }
                other => panic!("expected snap back for x={end_x}, got {other:?}"),
            }
            assert!(!m.is_dragging());
        }
    }

    #[test]
    fn vertical_past_trigger_expands_despite_horizontal_distance() {
        let mut m = machine();
        m.feed(&down(200.0, 100.0), &ctx());

        // 300px sideways would commit a swipe on release, but the downward
        // travel (>200px) commits the expand first.
        let t = m.feed(&mv(500.0, 301.0), &ctx());
        assert_eq!(
            t,
            Transition::Committed {
                slot: 0,
                commit: Commit::Expand
            }
        );
        assert!(!m.is_dragging());
        assert_eq!(m.feed(&up(500.0, 301.0), &ctx()), Transition::Ignored);
    }

    #[test]
    fn vertical_exactly_at_trigger_does_not_expand() {
        let mut m = machine();
        m.feed(&down(200.0, 100.0), &ctx());
        let t = m.feed(&mv(200.0, 300.0), &ctx());
        match t {
            Transition::Frame(frame) => assert_eq!(frame.expand.unwrap().progress, 1.0),
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[test]
    fn upward_drag_never_expands() {
        let mut m = machine();
        m.feed(&down(200.0, 700.0), &ctx());
        match m.feed(&mv(200.0, 100.0), &ctx()) {
            Transition::Frame(frame) => {
                assert!(frame.expand.is_none());
                assert_eq!(frame.translate, Some(Point::new(0.0, -600.0)));
            }
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[test]
    fn drag_on_non_active_slot_is_ignored() {
        let mut m = machine();
        let event = PointerEvent::Down {
            slot: 1,
            element: ELEMENT,
            sample: PointerSample::mouse(0.0, 0.0),
        };
        assert_eq!(m.feed(&event, &ctx()), Transition::Ignored);
        assert!(!m.is_dragging());
    }

    #[test]
    fn open_detail_suspends_recognition() {
        let mut m = machine();
        let open = GestureContext {
            detail_open: true,
            ..ctx()
        };
        assert_eq!(m.feed(&down(0.0, 0.0), &open), Transition::Ignored);

        m.feed(&down(200.0, 300.0), &ctx());
        assert_eq!(m.feed(&up(390.0, 300.0), &open), Transition::Ignored);
        assert!(!m.is_dragging());
    }

    #[test]
    fn terminal_slot_has_no_swipe_affordance() {
        let mut m = machine();
        let end = GestureContext {
            active_is_terminal: true,
            ..ctx()
        };
        assert_eq!(m.feed(&down(0.0, 0.0), &end), Transition::Ignored);
    }

    #[test]
    fn second_pointer_down_is_ignored_while_dragging() {
        let mut m = machine();
        m.feed(&down(200.0, 300.0), &ctx());
        assert_eq!(m.feed(&down(10.0, 10.0), &ctx()), Transition::Ignored);

        match m.state() {
            GestureState::Dragging(session) => assert_eq!(session.origin, Point::new(200.0, 300.0)),
            GestureState::Idle => panic!("drag should still be in progress"),
        }
    }

    #[test]
    fn touch_release_uses_changed_touches() {
        let mut m = machine();
        let start = PointerEvent::Down {
            slot: 0,
            element: ELEMENT,
            sample: PointerSample::touch([Point::new(200.0, 300.0), Point::new(5.0, 5.0)]),
        };
        m.feed(&start, &ctx());

        let end = PointerEvent::Up {
            sample: PointerSample::touch_end([Point::new(20.0, 300.0)]),
        };
        assert_eq!(
            m.feed(&end, &ctx()),
            Transition::Committed {
                slot: 0,
                commit: Commit::Swipe(Decision::Reject)
            }
        );
    }

    #[test]
    fn release_without_coordinates_uses_last_move() {
        let mut m = machine();
        m.feed(&down(200.0, 300.0), &ctx());
        m.feed(&mv(350.0, 300.0), &ctx());

        let end = PointerEvent::Up {
            sample: PointerSample::default(),
        };
        assert_eq!(
            m.feed(&end, &ctx()),
            Transition::Committed {
                slot: 0,
                commit: Commit::Swipe(Decision::Accept)
            }
        );
    }

    #[test]
    fn cancel_snaps_back() {
        let mut m = machine();
        m.feed(&down(200.0, 300.0), &ctx());
        m.feed(&mv(390.0, 300.0), &ctx());
        assert!(matches!(
            m.feed(&PointerEvent::Cancel, &ctx()),
            Transition::SnapBack(_)
        ));
        assert_eq!(m.feed(&PointerEvent::Cancel, &ctx()), Transition::Ignored);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut m = machine();
        assert_eq!(m.feed(&mv(10.0, 10.0), &ctx()), Transition::Ignored);
    }
}
