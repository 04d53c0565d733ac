// ============================================================================
// Snooze registry
// ============================================================================
//
// Time-boxed exclusions from the working set. Entries live in the
// namespaced persistent store and are evicted lazily on read: every
// recomputation drops entries whose expiry has passed before the exclusion
// set is computed, so a snoozed record re-enters automatically with no
// timer and no explicit action.
//
// ============================================================================

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::record::RecordId;
use crate::core::Result;
use crate::storage::{keys, StateStore};

/// A persisted snooze, in the store's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnoozeEntry {
    #[serde(rename = "recordId")]
    pub record_id: RecordId,
    #[serde(rename = "snoozeUntil")]
    pub until: DateTime<Utc>,
}

/// Durations the list surface offers for snoozing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnoozeDuration {
    Hours(u32),
    Days(u32),
    NextWeek,
}

impl SnoozeDuration {
    pub fn until(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Hours(h) => now + Duration::hours(i64::from(*h)),
            Self::Days(d) => now + Duration::days(i64::from(*d)),
            Self::NextWeek => now + Duration::days(7),
        }
    }
}

/// The set of currently snoozed records for one section.
#[derive(Debug)]
pub struct SnoozeRegistry {
    section: String,
    entries: HashMap<RecordId, DateTime<Utc>>,
}

impl SnoozeRegistry {
    /// Load the registry for `section` from the store.
    ///
    /// A missing payload starts empty; a corrupt one is logged and
    /// discarded rather than failing the session.
    pub fn load(section: impl Into<String>, store: &dyn StateStore) -> Self {
        let section = section.into();
        let entries = match store.get(&keys::snoozed(&section)) {
            None => HashMap::new(),
            Some(raw) => match serde_json::from_str::<Vec<SnoozeEntry>>(&raw) {
                Ok(list) => list.into_iter().map(|e| (e.record_id, e.until)).collect(),
                Err(err) => {
                    warn!(section = %section, %err, "discarding corrupt snooze payload");
                    HashMap::new()
                }
            },
        };
        Self { section, entries }
    }

    /// Snooze `record_id` until `until`, persisting immediately.
    pub fn snooze(
        &mut self,
        record_id: RecordId,
        until: DateTime<Utc>,
        store: &mut dyn StateStore,
    ) -> Result<()> {
        self.entries.insert(record_id, until);
        self.persist(store)
    }

    /// Drop entries whose expiry has passed. In-memory only: the store is
    /// rewritten on the next explicit snooze, per the write-on-user-action
    /// policy.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|_, until| *until > now);
    }

    /// The exclusion set as of `now`. Prunes expired entries first, so a
    /// snooze with a past expiry never appears even once.
    pub fn active_snoozes(&mut self, now: DateTime<Utc>) -> HashSet<RecordId> {
        self.prune_expired(now);
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self, store: &mut dyn StateStore) -> Result<()> {
        let list: Vec<SnoozeEntry> = self
            .entries
            .iter()
            .map(|(record_id, until)| SnoozeEntry {
                record_id: record_id.clone(),
                until: *until,
            })
            .collect();
        store.set(&keys::snoozed(&self.section), &serde_json::to_string(&list)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn t(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_snooze_persists_and_reloads() {
        let mut store = MemoryStore::new();
        let mut registry = SnoozeRegistry::load("speedrun", &store);
        registry
            .snooze("p1".into(), t(10_000), &mut store)
            .unwrap();

        let mut reloaded = SnoozeRegistry::load("speedrun", &store);
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.active_snoozes(t(5_000)).contains(&"p1".into()));
    }

    #[test]
    fn test_expired_snooze_excluded_immediately() {
        let mut store = MemoryStore::new();
        let mut registry = SnoozeRegistry::load("speedrun", &store);
        registry.snooze("p1".into(), t(1_000), &mut store).unwrap();

        // expiry in the past: never part of the exclusion set
        let active = registry.active_snoozes(t(1_000));
        assert!(active.is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_sections_are_namespaced() {
        let mut store = MemoryStore::new();
        let mut a = SnoozeRegistry::load("speedrun", &store);
        a.snooze("p1".into(), t(10_000), &mut store).unwrap();

        let b = SnoozeRegistry::load("other", &store);
        assert!(b.is_empty());
    }

    #[test]
    fn test_corrupt_payload_starts_empty() {
        let mut store = MemoryStore::new();
        store
            .set(&keys::snoozed("speedrun"), "{broken")
            .unwrap();
        let registry = SnoozeRegistry::load("speedrun", &store);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duration_helpers() {
        let now = t(0);
        assert_eq!(
            SnoozeDuration::Hours(4).until(now),
            now + Duration::hours(4)
        );
        assert_eq!(
            SnoozeDuration::NextWeek.until(now),
            now + Duration::days(7)
        );
    }
}
