//! Session Tests
//!
//! Verifies a full deck session against a catalogue file:
//! - Likes and dislikes reach the source in commit order
//! - Favorites are refreshed once the likes settle
//! - Search inputs pick the filter by precedence
//! - A short feed ends on the terminal card

use anyhow::Result;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use swipedeck_sdk::types::{CandidateId, DeckEvent, FilterMode};
use swipedeck_sdk::{CatalogSource, Deck};
use swipedeck_testing::fixtures::catalog_file;

const SETTLE: Duration = Duration::from_millis(501);

fn catalog(count: usize) -> Result<Arc<CatalogSource>> {
    let file = catalog_file(count);
    Ok(Arc::new(CatalogSource::from_path(file.path())?))
}

#[tokio::test(start_paused = true)]
async fn test_likes_reach_catalog_and_refresh_favorites() -> Result<()> {
    let source = catalog(12)?;
    let (deck, mut events) = Deck::builder(source.clone()).build()?;
    assert!(deck.start().await);

    assert!(deck.accept());
    tokio::time::sleep(SETTLE).await;
    assert!(deck.reject());
    tokio::time::sleep(SETTLE).await;
    assert!(deck.accept());
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(
        source.liked(),
        vec![CandidateId::from(1), CandidateId::from(3)]
    );
    assert_eq!(source.disliked(), vec![CandidateId::from(2)]);
    assert!(deck.votes().pending.is_empty());

    let refreshed: Vec<Vec<String>> = events
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            DeckEvent::FavoritesRefreshed(favorites) => {
                Some(favorites.iter().map(|c| c.id.to_string()).collect())
            }
            _ => None,
        })
        .collect();
    assert_eq!(refreshed.last(), Some(&vec!["1".to_string(), "3".to_string()]));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_search_prefers_emotion_over_keyword() -> Result<()> {
    let source = catalog(12)?;
    let (deck, _events) = Deck::builder(source).build()?;
    deck.start().await;

    assert!(deck.search(Some("film"), None, Some("joy")).await);
    assert_eq!(
        deck.filter(),
        FilterMode::Emotion {
            emotion: "joy".to_string()
        }
    );

    let snapshot = deck.snapshot();
    assert_eq!(snapshot.active.unwrap().id.as_str(), "2");
    assert_eq!(snapshot.next.unwrap().id.as_str(), "4");
    assert_eq!(snapshot.window_len, 7);
    assert!(snapshot.terminal_appended);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_blank_search_returns_to_feed() -> Result<()> {
    let source = catalog(12)?;
    let (deck, _events) = Deck::builder(source)
        .filter(FilterMode::Keyword {
            query: "film 1".to_string(),
        })
        .build()?;
    assert!(deck.start().await);
    assert_eq!(deck.snapshot().window_len, 5);

    assert!(deck.search(Some("  "), None, None).await);
    assert_eq!(deck.filter(), FilterMode::Feed);
    assert_eq!(deck.snapshot().window_len, 10);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_short_feed_ends_on_terminal_card() -> Result<()> {
    let source = catalog(3)?;
    let (deck, mut events) = Deck::builder(source).build()?;
    deck.start().await;

    for _ in 0..3 {
        assert!(deck.accept());
        tokio::time::sleep(SETTLE).await;
    }
    assert!(!deck.accept());
    assert!(!deck.open_detail());

    let mut reached = false;
    while let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_millis(10), events.next()).await
    {
        if event == DeckEvent::TerminalReached {
            reached = true;
        }
    }
    assert!(reached);
    assert!(deck.snapshot().active.unwrap().is_terminal);
    Ok(())
}
