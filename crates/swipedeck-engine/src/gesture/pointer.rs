use super::geometry::{Point, Rect};

/// Coordinates carried by one raw mouse or touch event.
///
/// Mouse events fill `client`; touch events fill `touches` (start/move) and
/// `changed_touches` (end). Only the first touch point is authoritative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSample {
    pub changed_touches: Vec<Point>,
    pub touches: Vec<Point>,
    pub client: Option<Point>,
}

impl PointerSample {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            client: Some(Point::new(x, y)),
            ..Self::default()
        }
    }

    /// Touch start/move: the currently active touch points
    pub fn touch(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            touches: points.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Touch end: the points that were lifted
    pub fn touch_end(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            changed_touches: points.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Pick the authoritative coordinates: first changed touch, then first
    /// active touch, then the plain client position.
    pub fn resolve(&self) -> Option<Point> {
        self.changed_touches
            .first()
            .or_else(|| self.touches.first())
            .copied()
            .or(self.client)
    }
}

/// Input fed into the gesture machine
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on the element occupying stack slot `slot`
    Down {
        slot: usize,
        element: Rect,
        sample: PointerSample,
    },
    Move {
        sample: PointerSample,
    },
    Up {
        sample: PointerSample,
    },
    /// Touch cancelled by the platform
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_changed_touches() {
        let sample = PointerSample {
            changed_touches: vec![Point::new(1.0, 1.0)],
            touches: vec![Point::new(2.0, 2.0)],
            client: Some(Point::new(3.0, 3.0)),
        };
        assert_eq!(sample.resolve(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn falls_back_to_touches_then_client() {
        let touch = PointerSample {
            touches: vec![Point::new(2.0, 2.0), Point::new(9.0, 9.0)],
            client: Some(Point::new(3.0, 3.0)),
            ..PointerSample::default()
        };
        assert_eq!(touch.resolve(), Some(Point::new(2.0, 2.0)));

        assert_eq!(
            PointerSample::mouse(3.0, 4.0).resolve(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(PointerSample::default().resolve(), None);
    }
}
