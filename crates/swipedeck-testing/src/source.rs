//! Scripted candidate source.
//!
//! Serves pages from fixed catalogues and lets a test decide, call by call,
//! which fetches, decisions and refreshes fail, and when a fetch is allowed to
//! complete.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use swipedeck_providers::{CandidateSource, Error, PageRequest, Result};
use swipedeck_types::{Candidate, CandidateId, Decision, FilterMode};
use tokio::sync::Notify;

#[derive(Default)]
struct Script {
    requests: Vec<PageRequest>,
    attempts: Vec<(Decision, CandidateId)>,
    persisted: Vec<(Decision, CandidateId)>,
    failing_fetches: usize,
    failing_decisions: usize,
    failing_refreshes: usize,
    refresh_calls: usize,
    gate: Option<Arc<Notify>>,
}

pub struct ScriptedSource {
    catalogs: HashMap<FilterMode, Vec<Candidate>>,
    script: Mutex<Script>,
}

impl ScriptedSource {
    /// Source whose plain feed is `feed`
    pub fn new(feed: Vec<Candidate>) -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert(FilterMode::Feed, feed);
        Self {
            catalogs,
            script: Mutex::new(Script::default()),
        }
    }

    /// Serve `items` when `filter` is requested
    pub fn with_filter(mut self, filter: FilterMode, items: Vec<Candidate>) -> Self {
        self.catalogs.insert(filter, items);
        self
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fail_next_fetches(&self, count: usize) {
        self.script().failing_fetches = count;
    }

    pub fn fail_next_decisions(&self, count: usize) {
        self.script().failing_decisions = count;
    }

    pub fn fail_next_refreshes(&self, count: usize) {
        self.script().failing_refreshes = count;
    }

    /// Make every subsequent fetch wait for [`ScriptedSource::release_fetch`]
    pub fn hold_fetches(&self) {
        self.script().gate = Some(Arc::new(Notify::new()));
    }

    /// Let one held fetch complete
    pub fn release_fetch(&self) {
        if let Some(gate) = &self.script().gate {
            gate.notify_one();
        }
    }

    /// Stop holding fetches and release any that are waiting
    pub fn open_fetches(&self) {
        if let Some(gate) = self.script().gate.take() {
            gate.notify_waiters();
        }
    }

    /// Every page request received, in order
    pub fn requests(&self) -> Vec<PageRequest> {
        self.script().requests.clone()
    }

    /// Every persistence attempt, failed ones included
    pub fn attempts(&self) -> Vec<(Decision, CandidateId)> {
        self.script().attempts.clone()
    }

    /// Successfully persisted decisions, in backend order
    pub fn persisted(&self) -> Vec<(Decision, CandidateId)> {
        self.script().persisted.clone()
    }

    pub fn refresh_calls(&self) -> usize {
        self.script().refresh_calls
    }

    fn lookup(&self, id: &CandidateId) -> Option<Candidate> {
        self.catalogs
            .values()
            .flat_map(|items| items.iter())
            .find(|c| &c.id == id)
            .cloned()
    }
}

#[async_trait]
impl CandidateSource for ScriptedSource {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Candidate>> {
        let (gate, fail) = {
            let mut script = self.script();
            script.requests.push(request.clone());
            let fail = script.failing_fetches > 0;
            if fail {
                script.failing_fetches -= 1;
            }
            (script.gate.clone(), fail)
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        if fail {
            return Err(Error::Transport("scripted fetch failure".to_string()));
        }

        let items = self
            .catalogs
            .get(&request.filter)
            .map(|items| {
                items
                    .iter()
                    .skip(request.offset)
                    .take(request.limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    async fn record_decision(&self, decision: Decision, candidate_id: &CandidateId) -> Result<()> {
        let mut script = self.script();
        script.attempts.push((decision, candidate_id.clone()));
        if script.failing_decisions > 0 {
            script.failing_decisions -= 1;
            return Err(Error::Rejected {
                status: 503,
                message: "scripted decision failure".to_string(),
            });
        }
        script.persisted.push((decision, candidate_id.clone()));
        Ok(())
    }

    async fn notify_favorites_changed(&self) -> Result<Vec<Candidate>> {
        let accepted: Vec<CandidateId> = {
            let mut script = self.script();
            script.refresh_calls += 1;
            if script.failing_refreshes > 0 {
                script.failing_refreshes -= 1;
                return Err(Error::Transport("scripted refresh failure".to_string()));
            }
            let mut accepted: Vec<CandidateId> = Vec::new();
            for (decision, id) in &script.persisted {
                if decision.is_accept() && !accepted.contains(id) {
                    accepted.push(id.clone());
                }
            }
            accepted
        };
        Ok(accepted.iter().filter_map(|id| self.lookup(id)).collect())
    }
}
