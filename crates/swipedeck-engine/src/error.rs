use std::fmt;

/// Result type for swipedeck-engine operations
pub type Result<T> = std::result::Result<T, WindowError>;

/// Invariant violations on the candidate window or stack position.
///
/// None of these occur in correct operation; callers treat them as
/// programming errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Compaction asked to drop more candidates than the window holds
    CompactionUnderflow { requested: usize, len: usize },

    /// Rebasing the stack position would move it below zero
    IndexUnderflow { requested: usize, current: usize },

    /// Real candidates arrived after the terminal candidate was appended
    AppendAfterTerminal,

    /// A fetched page already contained a terminal candidate
    TerminalInPage,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::CompactionUnderflow { requested, len } => write!(
                f,
                "Compaction underflow: cannot drop {} of {} candidates",
                requested, len
            ),
            WindowError::IndexUnderflow { requested, current } => write!(
                f,
                "Index underflow: cannot shift index {} back by {}",
                current, requested
            ),
            WindowError::AppendAfterTerminal => {
                write!(f, "Candidates appended after the terminal candidate")
            }
            WindowError::TerminalInPage => {
                write!(f, "Fetched page contained a terminal candidate")
            }
        }
    }
}

impl std::error::Error for WindowError {}
