//! Convenience re-exports for consumers that want the whole surface.

pub use crate::batch::{DEFAULT_SPRINT_SIZE, SprintBatcher, SprintPage};
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::controller::{
    CompletedSet, ControllerConfig, DiscardMutator, ListPhase, ListView, PipelineListController,
    RecordMutator, RecordSource, SectionSnapshot, StaticRecordSource,
};
pub use crate::core::{
    Company, EngineError, FieldValue, Patch, Record, RecordId, Result, fields,
};
pub use crate::filter::{
    ContactRecency, FilterCriteria, HeadcountBand, PriorityFilter, RecordFilterEngine, RevenueBand,
};
pub use crate::overlay::{DEFAULT_OVERLAY_TTL_MS, OptimisticOverlay};
pub use crate::rank::{RankComparator, RankTogglePolicy, SortDirection, SortSpec};
pub use crate::snooze::{SnoozeDuration, SnoozeEntry, SnoozeRegistry};
pub use crate::storage::{FileStore, MemoryStore, StateStore};
