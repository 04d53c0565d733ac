use crate::core::record::{Patch, RecordId};
use crate::core::Record;

/// One observation of the data-access collaborator's state.
///
/// The collaborator is an opaque, possibly-stale source; the engine reads
/// its current state synchronously and never awaits it. `loading` with an
/// empty cache renders as the loading phase; an `error` freezes the
/// last-known-good page.
#[derive(Debug, Clone, Default)]
pub struct SectionSnapshot {
    pub data: Vec<Record>,
    pub count: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl SectionSnapshot {
    pub fn ready(data: Vec<Record>) -> Self {
        let count = data.len();
        Self {
            data,
            count,
            loading: false,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// The data-access collaborator supplying raw records.
///
/// The core does not manage its retry or network lifecycle; `refresh` and
/// `clear_cache` are fire-and-forget hints.
pub trait RecordSource {
    fn fetch_section_records(&self, section: &str, limit: usize) -> SectionSnapshot;
    fn refresh(&mut self);
    fn clear_cache(&mut self);
}

/// The record-mutation collaborator committing a user edit.
///
/// The outcome is observed synchronously from the engine's perspective;
/// the backing write itself is the collaborator's business.
pub trait RecordMutator {
    fn submit_action(
        &mut self,
        record_id: &RecordId,
        patch: &Patch,
    ) -> std::result::Result<(), String>;
}

/// A fixed in-memory source. Useful for demos and tests.
#[derive(Debug, Default)]
pub struct StaticRecordSource {
    records: Vec<Record>,
    refreshes: usize,
}

impl StaticRecordSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            refreshes: 0,
        }
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}

impl RecordSource for StaticRecordSource {
    fn fetch_section_records(&self, _section: &str, limit: usize) -> SectionSnapshot {
        SectionSnapshot::ready(self.records.iter().take(limit).cloned().collect())
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn clear_cache(&mut self) {
        self.records.clear();
    }
}

/// A mutator that accepts every write. Useful for demos and tests.
#[derive(Debug, Default)]
pub struct DiscardMutator;

impl RecordMutator for DiscardMutator {
    fn submit_action(
        &mut self,
        _record_id: &RecordId,
        _patch: &Patch,
    ) -> std::result::Result<(), String> {
        Ok(())
    }
}
