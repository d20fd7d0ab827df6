use crate::error::{Result, WindowError};
use crate::window::CandidateWindow;
use serde::{Deserialize, Serialize};
use swipedeck_types::Candidate;

/// Whether the stack is free to accept a new decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackPhase {
    #[default]
    Idle,
    AnimatingTransition,
}

/// Index of the active slot in the candidate window.
///
/// The next slot is implicitly `current_index + 1`. The index is always a
/// valid or one-past-end index into the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StackPosition {
    current_index: usize,
}

impl StackPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn next_index(&self) -> usize {
        self.current_index + 1
    }

    pub fn advance(&mut self) {
        self.current_index += 1;
    }

    /// Shift the index back after `count` candidates were dropped from the
    /// front of the window
    pub fn rebase(&mut self, count: usize) -> Result<()> {
        if count > self.current_index {
            return Err(WindowError::IndexUnderflow {
                requested: count,
                current: self.current_index,
            });
        }
        self.current_index -= count;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    pub fn active<'a>(&self, window: &'a CandidateWindow) -> Option<&'a Candidate> {
        window.get(self.current_index)
    }

    pub fn next<'a>(&self, window: &'a CandidateWindow) -> Option<&'a Candidate> {
        window.get(self.next_index())
    }
}

/// Drop `count` consumed candidates and shift the position by the same
/// amount, so the active candidate stays active.
///
/// Both preconditions are checked before anything is mutated.
pub fn compact_consumed(
    window: &mut CandidateWindow,
    position: &mut StackPosition,
    count: usize,
) -> Result<()> {
    if count > position.current_index() {
        return Err(WindowError::IndexUnderflow {
            requested: count,
            current: position.current_index(),
        });
    }
    window.compact(count)?;
    position.rebase(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn window_of(n: i64) -> CandidateWindow {
        let mut window = CandidateWindow::new();
        window
            .append((0..n).map(|id| Candidate::new(id, Value::Null)).collect(), false)
            .unwrap();
        window
    }

    #[test]
    fn active_and_next_follow_index() {
        let window = window_of(3);
        let mut position = StackPosition::new();

        assert_eq!(position.active(&window).unwrap().id.as_str(), "0");
        assert_eq!(position.next(&window).unwrap().id.as_str(), "1");

        position.advance();
        position.advance();
        assert_eq!(position.active(&window).unwrap().id.as_str(), "2");
        assert!(position.next(&window).is_none());

        position.advance();
        assert!(position.active(&window).is_none());
    }

    #[test]
    fn compaction_preserves_active_candidate() {
        let mut window = window_of(15);
        let mut position = StackPosition::new();
        for _ in 0..12 {
            position.advance();
        }
        let before = position.active(&window).unwrap().id.clone();

        compact_consumed(&mut window, &mut position, 10).unwrap();

        assert_eq!(position.current_index(), 2);
        assert_eq!(position.active(&window).unwrap().id, before);
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn compaction_beyond_index_is_rejected_without_mutation() {
        let mut window = window_of(15);
        let mut position = StackPosition::new();
        position.advance();

        let err = compact_consumed(&mut window, &mut position, 10).unwrap_err();
        assert_eq!(
            err,
            WindowError::IndexUnderflow {
                requested: 10,
                current: 1
            }
        );
        assert_eq!(window.len(), 15);
        assert_eq!(position.current_index(), 1);
    }

    #[test]
    fn rebase_underflow_is_rejected() {
        let mut position = StackPosition::new();
        assert!(position.rebase(1).is_err());
        assert_eq!(position.current_index(), 0);
    }
}
