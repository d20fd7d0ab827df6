use super::geometry::{Point, Rect, Viewport, lerp};
use super::machine::DragSession;
use super::tuning::GestureTuning;
use serde::Serialize;

/// Visual state of the dragged element for one pointer-motion event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureFrame {
    pub slot: usize,
    pub delta: Point,
    /// Translation of the element; `None` while the expand channel positions
    /// the element through `expand.rect` instead
    pub translate: Option<Point>,
    pub opacity: f64,
    pub expand: Option<ExpandFrame>,
}

/// Progress of the downward "open detail" gesture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandFrame {
    /// 0.0 at rest, 1.0 at the trigger height
    pub progress: f64,
    pub rect: Rect,
    pub corner_radius: f64,
    /// Opacity of title, description, rating and action buttons
    pub secondary_opacity: f64,
}

/// Animate every modified property back to rest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapBack {
    pub frame: GestureFrame,
    pub duration_ms: u64,
}

/// Height the pointer must travel downward to commit an expand
pub(crate) fn trigger_height(viewport: Viewport, tuning: &GestureTuning) -> f64 {
    viewport.height / tuning.trigger_divisor
}

fn horizontal_opacity(dx: f64, viewport: Viewport, tuning: &GestureTuning) -> f64 {
    if viewport.width <= 0.0 {
        return 1.0;
    }
    let distance = dx.abs();
    if distance < viewport.width * tuning.fade_start_fraction {
        return 1.0;
    }
    (tuning.fade_bias - distance / viewport.width).clamp(0.0, 1.0)
}

/// Frame for a drag displaced by `delta` from the session origin
pub fn drag_frame(
    session: &DragSession,
    delta: Point,
    viewport: Viewport,
    tuning: &GestureTuning,
) -> GestureFrame {
    let opacity = horizontal_opacity(delta.x, viewport, tuning);

    if delta.y <= 0.0 {
        return GestureFrame {
            slot: session.slot,
            delta,
            translate: Some(delta),
            opacity,
            expand: None,
        };
    }

    let trigger = trigger_height(viewport, tuning);
    let progress = if trigger > 0.0 {
        (delta.y / trigger).min(1.0)
    } else {
        1.0
    };
    let element = session.element;

    let rect = Rect {
        left: lerp(element.left + delta.x, 0.0, progress),
        top: element.top - delta.y / tuning.lift_divisor,
        width: lerp(element.width, viewport.width, progress),
        height: lerp(element.height, viewport.height, progress),
    };

    GestureFrame {
        slot: session.slot,
        delta,
        translate: None,
        opacity,
        expand: Some(ExpandFrame {
            progress,
            rect,
            corner_radius: lerp(tuning.rest_corner_radius, 0.0, progress),
            secondary_opacity: 1.0 - progress,
        }),
    }
}

/// Rest frame: no translation, full opacity, original geometry
pub fn rest_frame(session: &DragSession) -> GestureFrame {
    GestureFrame {
        slot: session.slot,
        delta: Point::default(),
        translate: Some(Point::default()),
        opacity: 1.0,
        expand: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> DragSession {
        DragSession {
            slot: 0,
            origin: Point::new(200.0, 300.0),
            element: Rect::new(40.0, 0.0, 320.0, 640.0),
            last: Point::new(200.0, 300.0),
        }
    }

    #[test]
    fn opacity_stays_full_before_fade_start() {
        let tuning = GestureTuning::default();
        let viewport = Viewport::new(400.0, 720.0);

        let frame = drag_frame(&session(), Point::new(-30.0, 0.0), viewport, &tuning);
        assert_eq!(frame.opacity, 1.0);
        assert_eq!(frame.translate, Some(Point::new(-30.0, 0.0)));
        assert!(frame.expand.is_none());
    }

    #[test]
    fn opacity_fades_linearly_and_clamps() {
        let tuning = GestureTuning::default();
        let viewport = Viewport::new(1000.0, 800.0);

        let half = drag_frame(&session(), Point::new(600.0, 0.0), viewport, &tuning);
        assert!((half.opacity - 0.5).abs() < 1e-9);

        let gone = drag_frame(&session(), Point::new(-1500.0, 0.0), viewport, &tuning);
        assert_eq!(gone.opacity, 0.0);
    }

    #[test]
    fn downward_drag_interpolates_toward_full_viewport() {
        let tuning = GestureTuning::default();
        let viewport = Viewport::new(400.0, 720.0);

        let frame = drag_frame(&session(), Point::new(0.0, 90.0), viewport, &tuning);

        insta::assert_debug_snapshot!(frame, @r###"
        GestureFrame {
            slot: 0,
            delta: Point {
                x: 0.0,
                y: 90.0,
            },
            translate: None,
            opacity: 1.0,
            expand: Some(
                ExpandFrame {
                    progress: 0.5,
                    rect: Rect {
                        left: 20.0,
                        top: -50.0,
                        width: 360.0,
                        height: 680.0,
                    },
                    corner_radius: 10.0,
                    secondary_opacity: 0.5,
                },
            ),
        }
        "###);
    }

    #[test]
    fn progress_saturates_at_trigger() {
        let tuning = GestureTuning::default();
        let viewport = Viewport::new(400.0, 800.0);

        let frame = drag_frame(&session(), Point::new(0.0, 200.0), viewport, &tuning);
        let expand = frame.expand.unwrap();
        assert_eq!(expand.progress, 1.0);
        assert_eq!(expand.rect.width, 400.0);
        assert_eq!(expand.rect.left, 0.0);
        assert_eq!(expand.corner_radius, 0.0);
        assert_eq!(expand.secondary_opacity, 0.0);
    }

    #[test]
    fn eager_tuning_shortens_trigger() {
        let viewport = Viewport::new(400.0, 800.0);
        assert_eq!(trigger_height(viewport, &GestureTuning::default()), 200.0);
        assert_eq!(trigger_height(viewport, &GestureTuning::eager_expand()), 160.0);
    }
}
