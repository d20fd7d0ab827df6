use crate::error::{Result, WindowError};
use swipedeck_types::Candidate;

/// Proof that a fetch was started against a particular window epoch.
///
/// A response is only applied when its ticket still matches the window's
/// current epoch, so a response that was in flight across a filter change is
/// dropped instead of being appended to the new feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: u64,
    pub offset: usize,
}

/// What a single `append` added to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppendOutcome {
    pub real: usize,
    pub terminal_added: bool,
}

impl AppendOutcome {
    /// Total elements added, terminal included
    pub fn added(&self) -> usize {
        self.real + usize::from(self.terminal_added)
    }

    pub fn is_empty(&self) -> bool {
        self.added() == 0
    }
}

/// Fetched-but-not-yet-consumed candidates plus pagination bookkeeping.
///
/// Insertion order is presentation order. At most one terminal candidate
/// exists and it is always the last element appended.
#[derive(Debug, Clone, Default)]
pub struct CandidateWindow {
    items: Vec<Candidate>,
    fetch_offset: usize,
    terminal_appended: bool,
    is_fetching: bool,
    epoch: u64,
}

impl CandidateWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    /// Total real candidates ever requested from the source for this epoch
    pub fn fetch_offset(&self) -> usize {
        self.fetch_offset
    }

    pub fn terminal_appended(&self) -> bool {
        self.terminal_appended
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Append a fetched page in order.
    ///
    /// `short_page` signals the source returned fewer items than requested;
    /// the first time that happens a terminal candidate is synthesized after
    /// the page. Later short pages never add a second one.
    pub fn append(&mut self, items: Vec<Candidate>, short_page: bool) -> Result<AppendOutcome> {
        if items.iter().any(|c| c.is_terminal) {
            return Err(WindowError::TerminalInPage);
        }
        if self.terminal_appended && !items.is_empty() {
            return Err(WindowError::AppendAfterTerminal);
        }

        let mut outcome = AppendOutcome {
            real: items.len(),
            terminal_added: false,
        };
        self.items.extend(items);

        if short_page && !self.terminal_appended {
            self.items.push(Candidate::terminal());
            self.terminal_appended = true;
            outcome.terminal_added = true;
        }

        Ok(outcome)
    }

    /// Advance the fetch offset by the number of real candidates appended.
    /// The terminal candidate never counts.
    pub fn advance_offset(&mut self, real: usize) {
        self.fetch_offset += real;
    }

    /// Drop the first `drop_count` candidates.
    ///
    /// The caller shifts any index into the window by the same amount; see
    /// [`crate::stack::compact_consumed`].
    pub fn compact(&mut self, drop_count: usize) -> Result<()> {
        if drop_count > self.items.len() {
            return Err(WindowError::CompactionUnderflow {
                requested: drop_count,
                len: self.items.len(),
            });
        }
        self.items.drain(..drop_count);
        Ok(())
    }

    /// Claim the fetch slot. Returns `None` while another fetch is in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.is_fetching {
            return None;
        }
        self.is_fetching = true;
        Some(FetchTicket {
            epoch: self.epoch,
            offset: self.fetch_offset,
        })
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Release the fetch slot claimed by `ticket`.
    ///
    /// A ticket from a previous epoch leaves the flag alone: it belongs to a
    /// fetch started after the reset.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket) {
        if self.is_current(ticket) {
            self.is_fetching = false;
        }
    }

    /// Forget everything and start a new epoch. Returns the new epoch.
    pub fn reset(&mut self) -> u64 {
        self.items.clear();
        self.fetch_offset = 0;
        self.terminal_appended = false;
        self.is_fetching = false;
        self.epoch += 1;
        self.epoch
    }
}
