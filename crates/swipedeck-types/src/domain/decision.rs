use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a committed horizontal swipe (or an accept/reject button press)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// Positive horizontal displacement accepts, anything else rejects
    pub fn from_direction(delta_x: f64) -> Self {
        if delta_x > 0.0 {
            Decision::Accept
        } else {
            Decision::Reject
        }
    }

    pub fn is_accept(self) -> bool {
        matches!(self, Decision::Accept)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Accept => "accept",
            Decision::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
