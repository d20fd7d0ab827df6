use crate::error::{Error, Result};
use crate::stream::DeckEvents;
use std::sync::Arc;
use swipedeck_engine::{PointerEvent, PointerSample, Rect, Transition, Viewport};
use swipedeck_providers::CandidateSource;
use swipedeck_runtime::{
    DeckConfig, DeckSnapshot, EventSink, QueueSnapshot, StackController, config,
};
use swipedeck_types::{Decision, FilterMode};
use tokio::runtime::Handle;

pub struct DeckBuilder {
    source: Arc<dyn CandidateSource>,
    config: DeckConfig,
    viewport: Option<Viewport>,
    filter: FilterMode,
    runtime: Option<Handle>,
}

impl DeckBuilder {
    pub fn new(source: Arc<dyn CandidateSource>) -> Self {
        Self {
            source,
            config: DeckConfig::default(),
            viewport: None,
            filter: FilterMode::Feed,
            runtime: None,
        }
    }

    pub fn config(mut self, config: DeckConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from `path`, `SWIPEDECK_CONFIG` or the platform
    /// config directory, in that order. A missing file keeps the defaults.
    pub fn config_file(mut self, path: Option<&str>) -> Result<Self> {
        let path = config::resolve_config_path(path)?;
        self.config = DeckConfig::load_from(&path)?;
        Ok(self)
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Filter mode used by [`Deck::start`]
    pub fn filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Spawn background work onto `runtime` instead of the current one
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<(Deck, DeckEvents)> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|e| {
                Error::InvalidInput(format!("a tokio runtime is required: {}", e))
            })?,
        };

        let (sink, receiver) = EventSink::channel();
        let controller = StackController::new(self.source, self.config, sink, runtime)?;
        if let Some(viewport) = self.viewport {
            controller.set_viewport(viewport);
        }

        let deck = Deck {
            controller,
            initial_filter: self.filter,
        };
        Ok((deck, DeckEvents::new(receiver)))
    }
}

/// A running swipe deck.
///
/// Cheap to clone; clones drive the same stack.
#[derive(Clone)]
pub struct Deck {
    controller: StackController,
    initial_filter: FilterMode,
}

impl Deck {
    pub fn builder(source: Arc<dyn CandidateSource>) -> DeckBuilder {
        DeckBuilder::new(source)
    }

    /// Load the first page. Returns `false` if nothing could be loaded.
    pub async fn start(&self) -> bool {
        match &self.initial_filter {
            FilterMode::Feed => self.controller.start().await,
            filter => self.controller.set_filter(filter.clone()).await,
        }
    }

    pub async fn set_filter(&self, filter: FilterMode) -> bool {
        self.controller.set_filter(filter).await
    }

    /// Apply the host's search inputs (see [`FilterMode::resolve`])
    pub async fn search(
        &self,
        keyword: Option<&str>,
        semantic: Option<&str>,
        emotion: Option<&str>,
    ) -> bool {
        self.set_filter(FilterMode::resolve(keyword, semantic, emotion))
            .await
    }

    pub async fn load_more(&self) -> bool {
        self.controller.load_more().await
    }

    pub fn filter(&self) -> FilterMode {
        self.controller.filter()
    }

    pub fn feed(&self, event: &PointerEvent) -> Transition {
        self.controller.feed_pointer(event)
    }

    /// Begin a drag on the active card
    pub fn press(&self, element: Rect, sample: PointerSample) -> Transition {
        self.controller.press_active(element, sample)
    }

    pub fn drag(&self, sample: PointerSample) -> Transition {
        self.controller
            .feed_pointer(&PointerEvent::Move { sample })
    }

    pub fn release(&self, sample: PointerSample) -> Transition {
        self.controller.feed_pointer(&PointerEvent::Up { sample })
    }

    pub fn cancel(&self) -> Transition {
        self.controller.feed_pointer(&PointerEvent::Cancel)
    }

    pub fn accept(&self) -> bool {
        self.controller.vote(Decision::Accept)
    }

    pub fn reject(&self) -> bool {
        self.controller.vote(Decision::Reject)
    }

    pub fn open_detail(&self) -> bool {
        self.controller.open_detail()
    }

    pub fn close_detail(&self) -> bool {
        self.controller.close_detail()
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.controller.set_viewport(viewport);
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        self.controller.snapshot()
    }

    pub fn votes(&self) -> QueueSnapshot {
        self.controller.votes().snapshot()
    }

    pub fn config(&self) -> &DeckConfig {
        self.controller.config()
    }
}
