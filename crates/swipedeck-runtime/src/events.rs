use swipedeck_engine::{GestureFrame, SnapBack};
use swipedeck_types::{Candidate, CandidateId};
use tokio::sync::mpsc;

/// Notifications the deck sends to its host UI
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    /// Live visual feedback while the active card is dragged
    GestureFrame(GestureFrame),

    /// The drag was released below every threshold; animate back to rest
    SnapBack(SnapBack),

    /// A page fetch was started
    PageRequested {
        offset: usize,
        limit: usize,
        epoch: u64,
    },

    /// The active/next slots changed
    StackAdvanced {
        active: Option<Candidate>,
        next: Option<Candidate>,
    },

    /// The terminal candidate became the active slot
    TerminalReached,

    /// Settle delay elapsed; the exiting card can be removed
    ActiveRetired { candidate_id: CandidateId },

    DetailOpened {
        candidate_id: CandidateId,
        animated: bool,
    },

    DetailClosed { candidate_id: CandidateId },

    /// Result of a debounced favorites refresh
    FavoritesRefreshed(Vec<Candidate>),
}

/// Sending half of the host event channel.
///
/// A host that dropped its receiver simply stops getting events.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<DeckEvent>,
}

impl EventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DeckEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: DeckEvent) {
        let _ = self.tx.send(event);
    }
}
