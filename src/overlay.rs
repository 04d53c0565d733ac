// ============================================================================
// Optimistic edit overlay
// ============================================================================
//
// A committed edit reaches the backend asynchronously. Without this overlay,
// a background refresh arriving before read-replica consistency would
// visually revert the user's own edit. Each entry is a sparse patch merged
// over the authoritative record until its TTL elapses, after which the
// authoritative value is trusted unconditionally. The TTL bounds the
// staleness-exposure window; it is a correctness mechanism, not a network
// timeout, and a failed backing write must never extend it.
//
// ============================================================================

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use crate::core::record::{Patch, RecordId};
use crate::core::Record;

/// Default staleness-exposure window.
pub const DEFAULT_OVERLAY_TTL_MS: i64 = 30_000;

#[derive(Debug, Clone)]
struct OverlayEntry {
    patch: Patch,
    inserted_at: DateTime<Utc>,
    ttl: Duration,
}

impl OverlayEntry {
    fn is_active(&self, now: DateTime<Utc>) -> bool {
        now - self.inserted_at < self.ttl
    }
}

/// A short-lived id→patch map merged on top of authoritative records.
#[derive(Debug, Default)]
pub struct OptimisticOverlay {
    entries: HashMap<RecordId, OverlayEntry>,
}

impl OptimisticOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an optimistic edit for `record_id`.
    ///
    /// Replaces any prior entry for that id wholesale: the TTL restarts per
    /// apply rather than accumulating, so a re-edit keeps the full
    /// protection window for the newest patch.
    pub fn apply(&mut self, record_id: RecordId, patch: Patch, ttl: Duration, now: DateTime<Utc>) {
        trace!(record = %record_id, fields = patch.len(), "overlay apply");
        self.entries.insert(
            record_id,
            OverlayEntry {
                patch,
                inserted_at: now,
                ttl,
            },
        );
    }

    /// Merge active entries into `records`, producing fresh copies.
    ///
    /// Expiry is re-evaluated lazily on every call, and expired entries are
    /// purged here to bound memory. An expired entry contributes nothing
    /// even if it were still physically present.
    pub fn merge_into(&mut self, records: &[Record], now: DateTime<Utc>) -> Vec<Record> {
        self.expire_now(now);
        records
            .iter()
            .map(|record| match self.entries.get(record.id()) {
                Some(entry) if entry.is_active(now) => record.patched(&entry.patch),
                _ => record.clone(),
            })
            .collect()
    }

    /// Drop every entry whose TTL has elapsed.
    pub fn expire_now(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|_, entry| entry.is_active(now));
    }

    /// Whether an active entry currently covers `record_id`.
    pub fn covers(&self, record_id: &RecordId, now: DateTime<Utc>) -> bool {
        self.entries
            .get(record_id)
            .is_some_and(|entry| entry.is_active(now))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
