use super::{CandidateId, Decision};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A swipe decision waiting to be persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteEntry {
    pub id: Uuid,
    pub decision: Decision,
    pub candidate_id: CandidateId,
    pub committed_at: DateTime<Utc>,
    /// Failed persistence attempts so far
    #[serde(default)]
    pub attempts: u32,
}

impl VoteEntry {
    pub fn new(decision: Decision, candidate_id: CandidateId) -> Self {
        Self {
            id: Uuid::new_v4(),
            decision,
            candidate_id,
            committed_at: Utc::now(),
            attempts: 0,
        }
    }
}
