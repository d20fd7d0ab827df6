use crate::{Error, Result, lock};
use std::sync::{Arc, Mutex};
use swipedeck_engine::{CandidateWindow, FetchTicket};
use swipedeck_providers::{CandidateSource, PageRequest};
use swipedeck_types::FilterMode;

/// Candidate window shared between the controller and in-flight fetches
pub type SharedWindow = Arc<Mutex<CandidateWindow>>;

/// Fetches the next page for a window from a candidate source.
///
/// The window's `is_fetching` flag is the only guard against duplicate
/// in-flight fetches; claiming it is synchronous, so a second load started
/// before the first resolves is refused immediately.
pub struct PaginationLoader {
    source: Arc<dyn CandidateSource>,
    page_size: usize,
}

impl PaginationLoader {
    pub fn new(source: Arc<dyn CandidateSource>, page_size: usize) -> Self {
        Self { source, page_size }
    }

    /// Claim the fetch slot on an already-locked window.
    ///
    /// Returns `None` without side effects while another fetch is in flight
    /// or once the terminal candidate has been appended.
    pub fn claim(
        &self,
        window: &mut CandidateWindow,
        shared: &SharedWindow,
        filter: FilterMode,
    ) -> Option<PendingPage> {
        if window.terminal_appended() {
            tracing::debug!(epoch = window.epoch(), "feed exhausted, not fetching");
            return None;
        }
        let Some(ticket) = window.begin_fetch() else {
            tracing::debug!(epoch = window.epoch(), "fetch already in flight");
            return None;
        };

        Some(PendingPage {
            window: Arc::clone(shared),
            source: Arc::clone(&self.source),
            request: PageRequest::new(ticket.offset, self.page_size, filter),
            ticket,
        })
    }

    /// Fetch and append one page. Returns `true` if anything was added.
    pub async fn load(&self, window: &SharedWindow, filter: &FilterMode) -> bool {
        let pending = {
            let mut guard = lock(window);
            self.claim(&mut guard, window, filter.clone())
        };
        match pending {
            Some(pending) => pending.complete().await,
            None => false,
        }
    }
}

/// A claimed fetch slot. Dropping it, completed or not, releases the slot.
pub struct PendingPage {
    window: SharedWindow,
    source: Arc<dyn CandidateSource>,
    request: PageRequest,
    ticket: FetchTicket,
}

impl PendingPage {
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    /// Run the fetch and append the response.
    ///
    /// Failures are logged and swallowed; the offset is left untouched so the
    /// next load re-requests the same range.
    pub async fn complete(self) -> bool {
        self.complete_with(|_| Ok(())).await
    }

    /// Like [`PendingPage::complete`], running `after_append` under the same
    /// window lock as the append, before the fetch slot is released.
    pub async fn complete_with<F>(self, after_append: F) -> bool
    where
        F: FnOnce(&mut CandidateWindow) -> Result<()> + Send,
    {
        let fetched = match self.source.fetch_page(&self.request).await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(
                    source = self.source.id(),
                    offset = self.request.offset,
                    limit = self.request.limit,
                    error = %err,
                    "page fetch failed"
                );
                return false;
            }
        };

        let mut window = lock(&self.window);
        if !window.is_current(&self.ticket) {
            tracing::debug!(
                epoch = self.ticket.epoch,
                current = window.epoch(),
                "dropping page from a stale epoch"
            );
            return false;
        }

        // Rows the source flags as terminal still occupy a source offset.
        let returned = fetched.len();
        let items: Vec<_> = fetched.into_iter().filter(|c| !c.is_terminal).collect();
        let skipped = returned - items.len();
        if skipped > 0 {
            tracing::warn!(
                offset = self.request.offset,
                skipped,
                "source page contained terminal rows"
            );
        }

        let outcome = match window.append(items, returned < self.request.limit) {
            Ok(outcome) => outcome,
            Err(err) => {
                let err = Error::from(err);
                tracing::error!(error = %err, offset = self.request.offset, "window rejected page");
                return false;
            }
        };
        window.advance_offset(outcome.real + skipped);
        tracing::debug!(
            offset = self.request.offset,
            appended = outcome.real,
            terminal = outcome.terminal_added,
            "page appended"
        );

        let result = after_append(&mut *window);
        if let Err(err) = &result {
            tracing::error!(error = %err, "post-append step failed");
        }
        debug_assert!(result.is_ok(), "post-append step failed: {:?}", result);
        !outcome.is_empty()
    }
}

impl Drop for PendingPage {
    fn drop(&mut self) {
        lock(&self.window).finish_fetch(&self.ticket);
    }
}
