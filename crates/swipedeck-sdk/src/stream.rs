use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use swipedeck_runtime::DeckEvent;
use tokio::sync::mpsc::UnboundedReceiver;

/// Host-facing stream of deck events.
///
/// Ends once the deck and every clone of it have been dropped.
pub struct DeckEvents {
    receiver: UnboundedReceiver<DeckEvent>,
}

impl DeckEvents {
    pub(crate) fn new(receiver: UnboundedReceiver<DeckEvent>) -> Self {
        Self { receiver }
    }

    /// Poll for the next event (non-blocking).
    ///
    /// Returns `None` if no event is available immediately.
    pub fn try_next(&mut self) -> Option<DeckEvent> {
        self.receiver.try_recv().ok()
    }

    /// Every event available right now
    pub fn drain(&mut self) -> Vec<DeckEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

impl Stream for DeckEvents {
    type Item = DeckEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
