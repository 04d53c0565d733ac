use std::collections::HashSet;

use tracing::warn;

use crate::core::record::RecordId;
use crate::core::Result;
use crate::storage::{keys, StateStore};

/// The records the user has finished this session, in completion order.
///
/// A completed record still participates in ranking and filtering but is
/// held after all non-completed records in its batch. The set persists
/// under `completed-records::<section>` and is clearable by an explicit
/// reset.
#[derive(Debug)]
pub struct CompletedSet {
    section: String,
    ids: Vec<RecordId>,
}

impl CompletedSet {
    pub fn load(section: impl Into<String>, store: &dyn StateStore) -> Self {
        let section = section.into();
        let ids = match store.get(&keys::completed(&section)) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(ids) => ids,
                Err(err) => {
                    warn!(section = %section, %err, "discarding corrupt completed payload");
                    Vec::new()
                }
            },
        };
        Self { section, ids }
    }

    /// Mark a record complete and persist. Idempotent.
    pub fn mark(&mut self, id: RecordId, store: &mut dyn StateStore) -> Result<()> {
        if self.ids.contains(&id) {
            return Ok(());
        }
        self.ids.push(id);
        self.persist(store)
    }

    /// Explicit reset: clear the set and its persisted payload.
    pub fn reset(&mut self, store: &mut dyn StateStore) -> Result<()> {
        self.ids.clear();
        store.remove(&keys::completed(&self.section))
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn as_set(&self) -> HashSet<RecordId> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self, store: &mut dyn StateStore) -> Result<()> {
        store.set(
            &keys::completed(&self.section),
            &serde_json::to_string(&self.ids)?,
        )
    }
}
