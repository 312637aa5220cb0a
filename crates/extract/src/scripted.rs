//! Scripted extraction backend for tests.
//!
//! Each city carries a queue of outcomes consumed one per call, so retry
//! behavior ("fails once, then succeeds") can be expressed directly.
//! Unscripted cities yield an empty result set.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use leadmap_core::{BusinessRecord, NOT_AVAILABLE};

use crate::backend::{ExtractError, ExtractionBackend, ExtractionQuery};

/// One scripted extraction result.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Succeed with this many generated sample records.
    Records(usize),
    /// Fail with a transient (retryable) error.
    Transient(&'static str),
    /// Fail with a fatal backend error.
    Fatal(&'static str),
}

#[derive(Default)]
pub struct ScriptedExtractor {
    outcomes: Mutex<HashMap<String, VecDeque<ScriptedOutcome>>>,
    calls: Mutex<HashMap<String, u32>>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for a city. Outcomes are consumed in FIFO order,
    /// one per `extract` call; the last outcome repeats once the queue drains.
    pub fn script(self, city: &str, outcome: ScriptedOutcome) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .entry(city.to_string())
            .or_default()
            .push_back(outcome);
        self
    }

    /// How many times `extract` was called for a city.
    pub fn calls_for(&self, city: &str) -> u32 {
        self.calls.lock().unwrap().get(city).copied().unwrap_or(0)
    }

    fn next_outcome(&self, city: &str) -> Option<ScriptedOutcome> {
        let mut outcomes = self.outcomes.lock().unwrap();
        let queue = outcomes.get_mut(city)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

/// Deterministic sample records for a city, numbered 1..=count.
pub fn sample_records(query: &ExtractionQuery, count: usize) -> Vec<BusinessRecord> {
    (1..=count)
        .map(|n| BusinessRecord {
            business_name: format!("{} #{}", query.category, n),
            address: format!("{} Main St", n),
            city: query.city.clone(),
            state: NOT_AVAILABLE.to_string(),
            phone: format!("(555) 010-{:04}", n),
            website: NOT_AVAILABLE.to_string(),
            category: query.category.clone(),
            source_url: format!("https://maps.example/place/{}-{}", query.city, n),
        })
        .collect()
}

#[async_trait]
impl ExtractionBackend for ScriptedExtractor {
    async fn extract(&self, query: &ExtractionQuery) -> Result<Vec<BusinessRecord>, ExtractError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(query.city.clone())
            .or_insert(0) += 1;

        match self.next_outcome(&query.city) {
            None => Ok(Vec::new()),
            Some(ScriptedOutcome::Records(count)) => Ok(sample_records(query, count)),
            Some(ScriptedOutcome::Transient(reason)) => Err(ExtractError::Transient {
                city: query.city.clone(),
                reason: reason.to_string(),
            }),
            Some(ScriptedOutcome::Fatal(reason)) => {
                Err(ExtractError::Backend(reason.to_string()))
            }
        }
    }
}
