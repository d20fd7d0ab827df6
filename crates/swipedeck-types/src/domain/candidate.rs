use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Reserved identifier of the synthetic end-of-feed candidate.
pub const TERMINAL_CANDIDATE_ID: &str = "end-card";

/// Candidate identifier as issued by the candidate source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The sentinel id carried by the terminal candidate
    pub fn terminal() -> Self {
        Self(TERMINAL_CANDIDATE_ID.to_string())
    }

    pub fn is_terminal(&self) -> bool {
        self.0 == TERMINAL_CANDIDATE_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for CandidateId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl AsRef<str> for CandidateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One feed item eligible for a swipe decision.
///
/// Candidates are immutable once fetched. The display payload is opaque to the
/// core and is handed back to the host untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub is_terminal: bool,
}

impl Candidate {
    pub fn new(id: impl Into<CandidateId>, payload: Value) -> Self {
        Self {
            id: id.into(),
            external_id: None,
            payload,
            is_terminal: false,
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Synthetic end-of-feed sentinel
    pub fn terminal() -> Self {
        Self {
            id: CandidateId::terminal(),
            external_id: None,
            payload: Value::Null,
            is_terminal: true,
        }
    }

    /// String field from the display payload, if present
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }
}
