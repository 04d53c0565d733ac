//! A sales-pipeline list engine.
//!
//! Maintains a ranked working set of target records worked through in
//! fixed-size batches ("sprints"), continuously reconciling locally cached
//! edits against a remote record store that may be stale or slower than the
//! interface. The pipeline on every change:
//!
//! ```text
//! raw records → snooze exclusion → filter → overlay merge → rank sort
//!            → sprint pagination → ListView
//! ```
//!
//! [`PipelineListController`] orchestrates everything; the leaf pieces
//! ([`RecordFilterEngine`], [`RankComparator`], [`OptimisticOverlay`],
//! [`SprintBatcher`], [`SnoozeRegistry`]) are usable on their own.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use pipelist::{
//!     ControllerConfig, DiscardMutator, MemoryStore, PipelineListController,
//!     Record, StaticRecordSource, SystemClock, fields,
//! };
//!
//! let records = vec![
//!     Record::new("p1")
//!         .with_field(fields::NAME, "Ada Lovelace")
//!         .with_field(fields::RANK, "1A"),
//!     Record::new("p2")
//!         .with_field(fields::NAME, "Grace Hopper")
//!         .with_field(fields::RANK, "1B"),
//! ];
//!
//! let mut controller = PipelineListController::new(
//!     ControllerConfig::new("speedrun", "workspace-1"),
//!     StaticRecordSource::new(records),
//!     DiscardMutator,
//!     Arc::new(SystemClock),
//!     Box::new(MemoryStore::new()),
//! );
//!
//! assert_eq!(controller.view().page.len(), 2);
//! assert_eq!(controller.view().total_active, 2);
//!
//! controller.mark_complete("p1".into()).unwrap();
//! // still on the page, relocated after the active records
//! assert_eq!(controller.view().total_active, 1);
//! assert_eq!(controller.view().page.last().unwrap().id().as_str(), "p1");
//! ```

pub mod batch;
pub mod clock;
pub mod controller;
pub mod core;
pub mod filter;
pub mod overlay;
pub mod prelude;
pub mod rank;
pub mod snooze;
pub mod storage;

// Re-export main types for convenience
pub use crate::core::{Company, EngineError, FieldValue, Patch, Record, RecordId, Result, fields};

pub use batch::{DEFAULT_SPRINT_SIZE, SprintBatcher, SprintPage};
pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{
    CompletedSet, ControllerConfig, DiscardMutator, ListPhase, ListView, PipelineListController,
    RecordMutator, RecordSource, SectionSnapshot, StaticRecordSource,
};
pub use filter::{
    ContactRecency, FilterCriteria, HeadcountBand, PriorityFilter, RecordFilterEngine, RevenueBand,
};
pub use overlay::{DEFAULT_OVERLAY_TTL_MS, OptimisticOverlay};
pub use rank::{RankComparator, RankTogglePolicy, SortDirection, SortSpec};
pub use snooze::{SnoozeDuration, SnoozeEntry, SnoozeRegistry};
pub use storage::{FileStore, MemoryStore, StateStore};
