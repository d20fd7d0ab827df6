//! Local candidate source backed by an in-memory catalogue.
//!
//! Used for demos, offline hosts and tests. The catalogue is a JSON array of
//! candidates whose payload may carry `title`, `description` and `emotions`
//! fields; other payload fields are passed through untouched.

use crate::traits::{CandidateSource, PageRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use swipedeck_types::{Candidate, CandidateId, Decision, FilterMode};

#[derive(Debug, Default)]
struct VoteBook {
    liked: Vec<CandidateId>,
    disliked: Vec<CandidateId>,
}

impl VoteBook {
    fn record(&mut self, decision: Decision, id: &CandidateId) {
        let (add, remove) = match decision {
            Decision::Accept => (&mut self.liked, &mut self.disliked),
            Decision::Reject => (&mut self.disliked, &mut self.liked),
        };
        remove.retain(|existing| existing != id);
        if !add.contains(id) {
            add.push(id.clone());
        }
    }
}

pub struct CatalogSource {
    items: Vec<Candidate>,
    votes: Mutex<VoteBook>,
}

impl CatalogSource {
    pub fn new(items: Vec<Candidate>) -> Self {
        Self {
            items: items.into_iter().filter(|c| !c.is_terminal).collect(),
            votes: Mutex::new(VoteBook::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let items: Vec<Candidate> = serde_json::from_str(text)?;
        Ok(Self::new(items))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let source = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            candidates = source.items.len(),
            "catalog loaded"
        );
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn liked(&self) -> Vec<CandidateId> {
        self.book().liked.clone()
    }

    pub fn disliked(&self) -> Vec<CandidateId> {
        self.book().disliked.clone()
    }

    fn book(&self) -> MutexGuard<'_, VoteBook> {
        self.votes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn matching(&self, filter: &FilterMode) -> Vec<&Candidate> {
        match filter {
            FilterMode::Feed => self.items.iter().collect(),
            FilterMode::Keyword { query } => {
                let needle = query.to_lowercase();
                self.items
                    .iter()
                    .filter(|c| {
                        c.payload_str("title")
                            .is_some_and(|title| title.to_lowercase().contains(&needle))
                    })
                    .collect()
            }
            FilterMode::Emotion { emotion } => self
                .items
                .iter()
                .filter(|c| has_emotion(c, emotion))
                .collect(),
            FilterMode::Semantic {
                query,
                exclude_favorites,
            } => {
                let liked: HashSet<CandidateId> = if *exclude_favorites {
                    self.book().liked.iter().cloned().collect()
                } else {
                    HashSet::new()
                };
                let terms = words(query);

                let mut scored: Vec<(usize, &Candidate)> = self
                    .items
                    .iter()
                    .filter(|c| !liked.contains(&c.id))
                    .map(|c| (overlap(&terms, c), c))
                    .filter(|(score, _)| *score > 0)
                    .collect();
                // Stable sort keeps catalogue order among equal scores.
                scored.sort_by(|a, b| b.0.cmp(&a.0));
                scored.into_iter().map(|(_, c)| c).collect()
            }
        }
    }
}

fn words(text: &str) -> HashSet<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn overlap(terms: &HashSet<String>, candidate: &Candidate) -> usize {
    let mut text = String::new();
    for key in ["title", "description"] {
        if let Some(value) = candidate.payload_str(key) {
            text.push_str(value);
            text.push(' ');
        }
    }
    words(&text).intersection(terms).count()
}

fn has_emotion(candidate: &Candidate, emotion: &str) -> bool {
    candidate
        .payload
        .get("emotions")
        .and_then(|v| v.as_array())
        .is_some_and(|tags| {
            tags.iter()
                .filter_map(|t| t.as_str())
                .any(|t| t.eq_ignore_ascii_case(emotion))
        })
}

#[async_trait]
impl CandidateSource for CatalogSource {
    fn id(&self) -> &str {
        "catalog"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Candidate>> {
        let page: Vec<Candidate> = self
            .matching(&request.filter)
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .cloned()
            .collect();
        tracing::debug!(
            filter = request.filter.name(),
            offset = request.offset,
            limit = request.limit,
            returned = page.len(),
            "catalog page served"
        );
        Ok(page)
    }

    async fn record_decision(&self, decision: Decision, candidate_id: &CandidateId) -> Result<()> {
        if !self.items.iter().any(|c| &c.id == candidate_id) {
            return Err(Error::NotFound(format!("candidate {}", candidate_id)));
        }
        self.book().record(decision, candidate_id);
        Ok(())
    }

    async fn notify_favorites_changed(&self) -> Result<Vec<Candidate>> {
        let liked = self.liked();
        Ok(liked
            .iter()
            .filter_map(|id| self.items.iter().find(|c| &c.id == id))
            .cloned()
            .collect())
    }
}
