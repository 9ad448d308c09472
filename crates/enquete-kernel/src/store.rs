//! In-memory survey store.
//!
//! # Concurrency Model
//!
//! - An outer `RwLock<IndexMap>` guards the index; held only long enough to
//!   insert or look up an entry. `IndexMap` keeps insertion order for listing.
//! - Each survey sits behind its own `Mutex`, held for the whole of a
//!   resolve+mutate so concurrent writers to one survey serialize.
//! - Readers clone under that mutex, so they see the survey either before or
//!   after a mutation, never halfway.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};

use enquete_types::{Survey, SurveyId};

type Entry = Arc<Mutex<Survey>>;

/// Map from survey ID to survey document. The single source of truth.
#[derive(Default)]
pub struct SurveyStore {
    surveys: RwLock<IndexMap<SurveyId, Entry>>,
}

impl SurveyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a survey. A replaced survey keeps its list position.
    pub fn put(&self, survey: Survey) {
        let id = survey.id.clone();
        let mut surveys = self.surveys.write();
        match surveys.get(&id) {
            Some(entry) => *entry.lock() = survey,
            None => {
                surveys.insert(id, Arc::new(Mutex::new(survey)));
            }
        }
    }

    /// Snapshot of one survey.
    pub fn get(&self, id: &SurveyId) -> Option<Survey> {
        let entry = self.entry(id)?;
        let survey = entry.lock().clone();
        Some(survey)
    }

    /// Snapshots of every survey, in insertion order.
    pub fn all(&self) -> Vec<Survey> {
        self.entries()
            .into_iter()
            .map(|entry| entry.lock().clone())
            .collect()
    }

    /// Run `f` on a survey while holding its lock.
    ///
    /// Returns `None` when the survey doesn't exist. Other surveys stay
    /// available to readers and writers while `f` runs.
    pub fn update<R>(&self, id: &SurveyId, f: impl FnOnce(&mut Survey) -> R) -> Option<R> {
        let entry = self.entry(id)?;
        let mut survey = entry.lock();
        Some(f(&mut survey))
    }

    /// Run `f` on a survey by shared reference, without cloning it.
    pub fn read<R>(&self, id: &SurveyId, f: impl FnOnce(&Survey) -> R) -> Option<R> {
        let entry = self.entry(id)?;
        let survey = entry.lock();
        Some(f(&survey))
    }

    /// List all survey IDs, in insertion order.
    pub fn list_ids(&self) -> Vec<SurveyId> {
        self.surveys.read().keys().cloned().collect()
    }

    /// Check if a survey exists.
    pub fn contains(&self, id: &SurveyId) -> bool {
        self.surveys.read().contains_key(id)
    }

    /// Get the number of surveys.
    pub fn len(&self) -> usize {
        self.surveys.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.surveys.read().is_empty()
    }

    fn entry(&self, id: &SurveyId) -> Option<Entry> {
        self.surveys.read().get(id).cloned()
    }

    fn entries(&self) -> Vec<Entry> {
        self.surveys.read().values().cloned().collect()
    }
}

/// Shared store handle.
pub type SharedSurveyStore = Arc<SurveyStore>;

/// Create a new shared store.
pub fn shared_survey_store() -> SharedSurveyStore {
    Arc::new(SurveyStore::new())
}
