//! Configuration Tests
//!
//! Verifies that the builder:
//! - Reads deck settings from a TOML file
//! - Rejects invalid settings as invalid input
//! - Requires a tokio runtime

use anyhow::Result;
use std::sync::Arc;
use swipedeck_sdk::types::DeckEvent;
use swipedeck_sdk::{Deck, Error};
use swipedeck_testing::ScriptedSource;
use swipedeck_testing::fixtures::sample_candidates;
use tempfile::TempDir;

fn source() -> Arc<ScriptedSource> {
    Arc::new(ScriptedSource::new(sample_candidates(1, 20)))
}

#[tokio::test(start_paused = true)]
async fn test_config_file_sets_page_size() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "page_size = 5\npagination_threshold = 5\n")?;

    let (deck, mut events) = Deck::builder(source())
        .config_file(path.to_str())?
        .build()?;
    assert_eq!(deck.config().page_size, 5);

    deck.start().await;
    assert_eq!(
        events.try_next(),
        Some(DeckEvent::PageRequested {
            offset: 0,
            limit: 5,
            epoch: 0
        })
    );
    assert_eq!(deck.snapshot().window_len, 5);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_missing_config_file_uses_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("absent.toml");

    let (deck, _events) = Deck::builder(source())
        .config_file(path.to_str())?
        .build()?;
    assert_eq!(deck.config().page_size, 10);
    Ok(())
}

#[test]
fn test_invalid_config_is_invalid_input() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "page_size = 0\n")?;

    let err = Deck::builder(source())
        .config_file(path.to_str())
        .err()
        .expect("zero page size must be rejected");
    assert!(matches!(err, Error::InvalidInput(_)));
    Ok(())
}

#[test]
fn test_build_requires_runtime() {
    let result = Deck::builder(source()).build();
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
