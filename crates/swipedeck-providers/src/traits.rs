use crate::Result;
use async_trait::async_trait;
use swipedeck_types::{Candidate, CandidateId, Decision, FilterMode};

/// One page request against a candidate source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
    pub filter: FilterMode,
}

impl PageRequest {
    pub fn new(offset: usize, limit: usize, filter: FilterMode) -> Self {
        Self {
            offset,
            limit,
            filter,
        }
    }
}

/// Remote collaborator that supplies candidates and stores decisions.
///
/// Responsibilities:
/// - Serve pages of candidates for the active filter mode
/// - Persist accept/reject decisions
/// - Return the refreshed favorites list after decisions changed it
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Short identifier used in logs (e.g., "catalog", "http")
    fn id(&self) -> &str;

    /// Fetch up to `request.limit` candidates starting at `request.offset`.
    /// Returning fewer than `limit` means the feed is exhausted.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Candidate>>;

    /// Persist one decision
    async fn record_decision(&self, decision: Decision, candidate_id: &CandidateId) -> Result<()>;

    /// Reload the accepted-candidates list
    async fn notify_favorites_changed(&self) -> Result<Vec<Candidate>>;
}
