//! Gesture Tests
//!
//! Verifies pointer input through the SDK:
//! - Horizontal releases past a quarter of the viewport commit decisions
//! - Cancelled and short drags snap back
//! - Touch input uses the first touch point
//! - Detail view suspends dragging until closed

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use swipedeck_sdk::types::{
    CandidateId, Commit, Decision, DeckEvent, Point, PointerSample, Rect, Transition, Viewport,
};
use swipedeck_sdk::{Deck, DeckEvents};
use swipedeck_testing::ScriptedSource;
use swipedeck_testing::assertions::assert_persisted_order;
use swipedeck_testing::fixtures::sample_candidates;

const CARD: Rect = Rect {
    left: 40.0,
    top: 0.0,
    width: 320.0,
    height: 640.0,
};

async fn started_deck() -> Result<(Arc<ScriptedSource>, Deck, DeckEvents)> {
    let source = Arc::new(ScriptedSource::new(sample_candidates(1, 20)));
    let (deck, mut events) = Deck::builder(source.clone())
        .viewport(Viewport::new(400.0, 800.0))
        .build()?;
    deck.start().await;
    events.drain();
    Ok((source, deck, events))
}

#[tokio::test(start_paused = true)]
async fn test_left_swipe_rejects() -> Result<()> {
    let (source, deck, _events) = started_deck().await?;

    deck.press(CARD, PointerSample::mouse(200.0, 300.0));
    deck.drag(PointerSample::mouse(120.0, 290.0));
    let transition = deck.release(PointerSample::mouse(50.0, 280.0));
    assert_eq!(
        transition,
        Transition::Committed {
            slot: 0,
            commit: Commit::Swipe(Decision::Reject)
        }
    );

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_persisted_order(&source, &[(Decision::Reject, CandidateId::from(1))])?;
    assert_eq!(deck.snapshot().active.unwrap().id.as_str(), "2");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancel_snaps_back() -> Result<()> {
    let (source, deck, mut events) = started_deck().await?;

    deck.press(CARD, PointerSample::mouse(200.0, 300.0));
    deck.drag(PointerSample::mouse(380.0, 300.0));
    let transition = deck.cancel();

    match transition {
        Transition::SnapBack(snap) => {
            assert_eq!(snap.duration_ms, 500);
            assert_eq!(snap.frame.opacity, 1.0);
        }
        other => panic!("expected snap back, got {:?}", other),
    }
    assert!(matches!(events.drain().last(), Some(DeckEvent::SnapBack(_))));
    assert_eq!(deck.snapshot().current_index, 0);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(source.attempts().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_touch_uses_first_point() -> Result<()> {
    let (_source, deck, _events) = started_deck().await?;

    let started = deck.press(
        CARD,
        PointerSample::touch([Point::new(200.0, 300.0), Point::new(5.0, 5.0)]),
    );
    assert_eq!(started, Transition::Started { slot: 0 });

    deck.drag(PointerSample::touch([Point::new(260.0, 300.0)]));
    let released = deck.release(PointerSample::touch_end([
        Point::new(330.0, 300.0),
        Point::new(0.0, 0.0),
    ]));
    assert_eq!(
        released,
        Transition::Committed {
            slot: 0,
            commit: Commit::Swipe(Decision::Accept)
        }
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_detail_view_blocks_dragging() -> Result<()> {
    let (_source, deck, mut events) = started_deck().await?;

    assert!(deck.open_detail());
    assert_eq!(
        deck.press(CARD, PointerSample::mouse(200.0, 300.0)),
        Transition::Ignored
    );
    assert!(deck.close_detail());

    let drained = events.drain();
    assert_eq!(
        drained,
        vec![
            DeckEvent::DetailOpened {
                candidate_id: CandidateId::from(1),
                animated: true
            },
            DeckEvent::DetailClosed {
                candidate_id: CandidateId::from(1)
            },
        ]
    );

    assert_eq!(
        deck.press(CARD, PointerSample::mouse(200.0, 300.0)),
        Transition::Started { slot: 0 }
    );
    Ok(())
}
