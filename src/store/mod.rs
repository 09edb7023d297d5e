//! In-memory poem store
//!
//! One store is built at start-up and shared by the HTTP handlers behind a
//! tokio `RwLock`; writers hold the write lock for the whole
//! read-modify-write, so updates to a record are serialized.

pub mod seed;

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::poem::{validate_poem, FieldError, NewPoem, Poem, PoemPatch};

/// Outcome of a rejected write
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Poem not found: {0}")]
    NotFound(u32),

    #[error("Invalid poem: {}", field_list(.0))]
    Invalid(Vec<FieldError>),
}

fn field_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) => format!("{} {}", field, e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub struct PoemStore {
    poems: BTreeMap<u32, Poem>,
    next_id: u32,
    enforce_ranges: bool,
}

pub type SharedStore = Arc<RwLock<PoemStore>>;

impl PoemStore {
    pub fn new(enforce_ranges: bool) -> Self {
        Self {
            poems: BTreeMap::new(),
            next_id: 1,
            enforce_ranges,
        }
    }

    /// Store holding the sample poem as id 1
    pub fn with_sample(enforce_ranges: bool) -> Self {
        let mut store = Self::new(enforce_ranges);
        let sample = seed::sample_poem();
        store.next_id = sample.id + 1;
        store.poems.insert(sample.id, sample);
        info!("Seeded sample poem");
        store
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn get(&self, id: u32) -> Option<&Poem> {
        self.poems.get(&id)
    }

    /// Lowest-id poem at the given cycle step
    pub fn get_by_cycle(&self, cycle_step: i32) -> Option<&Poem> {
        self.poems.values().find(|p| p.cycle_step == cycle_step)
    }

    pub fn list(&self) -> Vec<Poem> {
        self.poems.values().cloned().collect()
    }

    fn check(&self, poem: &Poem) -> Result<(), StoreError> {
        if !self.enforce_ranges {
            return Ok(());
        }
        let errors = validate_poem(poem);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Invalid(errors))
        }
    }

    pub fn create(&mut self, new_poem: NewPoem) -> Result<Poem, StoreError> {
        let poem = new_poem.into_poem(self.next_id);
        self.check(&poem)?;

        self.next_id += 1;
        self.poems.insert(poem.id, poem.clone());
        info!(poem_id = poem.id, title = %poem.title, "Created poem");
        Ok(poem)
    }

    /// Apply a patch; nothing is committed if the merged record is invalid
    pub fn update(&mut self, id: u32, patch: PoemPatch) -> Result<Poem, StoreError> {
        let existing = self.poems.get(&id).ok_or(StoreError::NotFound(id))?;

        let mut updated = existing.clone();
        updated.apply_patch(patch);
        self.check(&updated)?;

        debug!(poem_id = id, cycle_step = updated.cycle_step, "Updated poem");
        self.poems.insert(id, updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_poem(cycle_step: i32) -> NewPoem {
        let sample = seed::sample_poem();
        NewPoem {
            title: "Second".to_string(),
            content: sample.content,
            cycle_step,
            total_cycles: 42,
            godel_number: "7".to_string(),
            chaos_value: 0.1,
            beauty_value: 0.2,
            complexity_value: 0.3,
            coherence_value: 0.4,
            consciousness_value: 0.5,
        }
    }

    #[test]
    fn test_seeded_store() {
        let store = PoemStore::with_sample(true);
        let poem = store.get(1).unwrap();
        assert_eq!(poem.chaos_value, 0.88);
        assert_eq!(poem.godel_number, "42424284");
        assert!(store.get(999).is_none());
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut store = PoemStore::with_sample(true);
        let a = store.create(new_poem(2)).unwrap();
        let b = store.create(new_poem(3)).unwrap();
        assert_eq!(a.id, 2);
        assert_eq!(b.id, 3);
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn test_get_by_cycle_returns_lowest_id() {
        let mut store = PoemStore::with_sample(true);
        store.create(new_poem(1)).unwrap();
        assert_eq!(store.get_by_cycle(1).unwrap().id, 1);
        assert!(store.get_by_cycle(40).is_none());
    }

    #[test]
    fn test_invalid_update_not_committed() {
        let mut store = PoemStore::with_sample(true);
        let result = store.update(
            1,
            PoemPatch {
                cycle_step: Some(43),
                chaos_value: Some(0.1),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StoreError::Invalid(_))));
        let poem = store.get(1).unwrap();
        assert_eq!(poem.cycle_step, 1);
        assert_eq!(poem.chaos_value, 0.88);
    }

    #[test]
    fn test_permissive_store_accepts_out_of_range() {
        let mut store = PoemStore::with_sample(false);
        let poem = store
            .update(1, PoemPatch { cycle_step: Some(0), ..Default::default() })
            .unwrap();
        assert_eq!(poem.cycle_step, 0);
        assert_eq!(poem.content.stanzas[0].lines[0], "Cycle Step 0 of 42, a spiral unbound,");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreError::NotFound(5).to_string(), "Poem not found: 5");
        let err = StoreError::Invalid(vec![
            FieldError::new("cycleStep", "must be between 1 and 42"),
            FieldError::general("bad"),
        ]);
        assert_eq!(err.to_string(), "Invalid poem: cycleStep must be between 1 and 42; bad");
    }

    #[test]
    fn test_update_missing() {
        let mut store = PoemStore::new(true);
        assert_eq!(
            store.update(5, PoemPatch::default()),
            Err(StoreError::NotFound(5))
        );
    }
}
