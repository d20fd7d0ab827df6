//! Custom assertions for swipedeck-specific validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Persisted decision ordering
//! - Candidate identity uniqueness

use anyhow::Result;
use std::collections::HashSet;
use swipedeck_types::{Candidate, CandidateId, Decision};

use crate::ScriptedSource;

/// Assert the backend persisted exactly `expected`, in that order.
pub fn assert_persisted_order(
    source: &ScriptedSource,
    expected: &[(Decision, CandidateId)],
) -> Result<()> {
    let persisted = source.persisted();
    if persisted != expected {
        anyhow::bail!(
            "Persisted order mismatch:\n  expected: {:?}\n  actual:   {:?}",
            expected,
            persisted
        );
    }
    Ok(())
}

/// Assert no candidate id appears twice.
pub fn assert_unique_ids(items: &[Candidate]) -> Result<()> {
    let mut seen = HashSet::new();
    for (i, item) in items.iter().enumerate() {
        if !seen.insert(&item.id) {
            anyhow::bail!("Duplicate candidate {} at position {}", item.id, i);
        }
    }
    Ok(())
}
