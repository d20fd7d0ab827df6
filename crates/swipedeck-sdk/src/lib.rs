//! swipedeck-sdk: headless core for swipe-card decks.
//!
//! # Overview
//!
//! `swipedeck-sdk` drives a two-card stack of remotely fetched candidates.
//! The host feeds raw pointer input in and renders the events that come out;
//! the deck owns gesture recognition, pagination with a bounded window, and an
//! optimistic queue that persists accept/reject decisions in the background.
//!
//! # Quickstart
//!
//! ```no_run
//! use std::sync::Arc;
//! use swipedeck_sdk::{CatalogSource, Deck};
//! use swipedeck_sdk::types::{DeckEvent, PointerSample, Rect};
//! use futures::stream::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! swipedeck_sdk::telemetry::init_tracing();
//!
//! let source = Arc::new(CatalogSource::from_path("films.json".as_ref())?);
//! let (deck, mut events) = Deck::builder(source).build()?;
//! deck.start().await;
//!
//! let card = Rect::new(40.0, 0.0, 320.0, 640.0);
//! deck.press(card, PointerSample::mouse(200.0, 300.0));
//! deck.drag(PointerSample::mouse(420.0, 310.0));
//! deck.release(PointerSample::mouse(420.0, 310.0));
//!
//! while let Some(event) = events.next().await {
//!     if let DeckEvent::StackAdvanced { active, .. } = event {
//!         println!("now showing {:?}", active.map(|c| c.id));
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! This SDK acts as a facade over:
//! - `swipedeck-types`: Candidates, decisions and filter modes
//! - `swipedeck-engine`: Candidate window, stack position and the gesture
//!   state machine (synchronous, no I/O)
//! - `swipedeck-providers`: The candidate source abstraction
//! - `swipedeck-runtime`: Pagination, vote queue, schedulers and the stack
//!   controller
//!
//! Every method on [`Deck`] returns immediately; network work runs on the
//! tokio runtime the deck was built on.

pub mod deck;
pub mod error;
pub mod stream;
pub mod telemetry;
pub mod types;

pub use deck::{Deck, DeckBuilder};
pub use error::{Error, Result};
pub use stream::DeckEvents;
pub use swipedeck_providers::{CandidateSource, CatalogSource, PageRequest};
