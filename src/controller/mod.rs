// ============================================================================
// Pipeline list controller
// ============================================================================
//
// Orchestrates the fixed pipeline on every relevant input change:
//
//   raw records → snooze exclusion → filter → overlay merge → rank sort
//              → sprint pagination → ListView
//
// The controller owns all mutable working-set state — overlay, snooze
// registry, completed set, filter criteria, sort spec, batch index,
// selection cursor — as explicit injected objects, never ambient globals.
// Execution is single-threaded and cooperative: the remote fetch and the
// remote write are observed synchronously through their collaborator
// traits and never awaited.
//
// ============================================================================

mod completed;
mod source;

pub use completed::CompletedSet;
pub use source::{
    DiscardMutator, RecordMutator, RecordSource, SectionSnapshot, StaticRecordSource,
};

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use crate::batch::{SprintBatcher, DEFAULT_SPRINT_SIZE};
use crate::clock::Clock;
use crate::core::record::{Patch, RecordId};
use crate::core::{EngineError, Record, Result};
use crate::filter::{FilterCriteria, RecordFilterEngine};
use crate::overlay::{OptimisticOverlay, DEFAULT_OVERLAY_TTL_MS};
use crate::rank::{next_spec, RankComparator, RankTogglePolicy, SortSpec};
use crate::snooze::{SnoozeDuration, SnoozeRegistry};
use crate::storage::{keys, StateStore};

/// Default fetch window asked of the data-access collaborator.
pub const DEFAULT_FETCH_LIMIT: usize = 100;

/// Construction-time knobs for a [`PipelineListController`].
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Section type, namespacing the persisted state.
    pub section: String,
    /// Workspace id, namespacing the persisted sort preference.
    pub workspace: String,
    pub batch_size: usize,
    pub fetch_limit: usize,
    pub overlay_ttl: Duration,
    pub toggle_policy: RankTogglePolicy,
}

impl ControllerConfig {
    pub fn new(section: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            workspace: workspace.into(),
            batch_size: DEFAULT_SPRINT_SIZE,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            overlay_ttl: Duration::milliseconds(DEFAULT_OVERLAY_TTL_MS),
            toggle_policy: RankTogglePolicy::default(),
        }
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    pub fn overlay_ttl(mut self, ttl: Duration) -> Self {
        self.overlay_ttl = ttl;
        self
    }

    pub fn toggle_policy(mut self, policy: RankTogglePolicy) -> Self {
        self.toggle_policy = policy;
        self
    }
}

/// Where the list stands, beyond what the page itself shows.
///
/// `Empty` is the explicit terminal state for a working set reduced to
/// zero active records — distinct from `Loading`. `FetchFailed` freezes
/// the last-known-good page and carries the retry affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Ready,
    Empty,
    FetchFailed(String),
}

/// What the rendering collaborator receives.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub page: Vec<Record>,
    pub batch_index: usize,
    pub batch_count: usize,
    pub selection: Option<RecordId>,
    pub total_active: usize,
    pub total_completed: usize,
}

pub struct PipelineListController<S: RecordSource, M: RecordMutator> {
    config: ControllerConfig,
    source: S,
    mutator: M,
    clock: Arc<dyn Clock>,
    store: Box<dyn StateStore>,

    overlay: OptimisticOverlay,
    snoozes: SnoozeRegistry,
    completed: CompletedSet,
    criteria: FilterCriteria,
    sort: SortSpec,

    batch_index: usize,
    selection: Option<RecordId>,
    /// Last-known-good raw records; superseded fetches are last-write-wins.
    cache: Vec<Record>,

    phase: ListPhase,
    view: ListView,
}

impl<S: RecordSource, M: RecordMutator> PipelineListController<S, M> {
    /// Build a controller, restoring persisted state for the section, and
    /// run the first recompute.
    pub fn new(
        config: ControllerConfig,
        source: S,
        mutator: M,
        clock: Arc<dyn Clock>,
        store: Box<dyn StateStore>,
    ) -> Self {
        let snoozes = SnoozeRegistry::load(&config.section, store.as_ref());
        let completed = CompletedSet::load(&config.section, store.as_ref());
        let sort = load_sort_pref(store.as_ref(), &config.section, &config.workspace);

        let mut controller = Self {
            config,
            source,
            mutator,
            clock,
            store,
            overlay: OptimisticOverlay::new(),
            snoozes,
            completed,
            criteria: FilterCriteria::all(),
            sort,
            batch_index: 0,
            selection: None,
            cache: Vec::new(),
            phase: ListPhase::Loading,
            view: ListView::default(),
        };
        controller.recompute();
        controller
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Re-observe the data-access collaborator and rerun the pipeline.
    pub fn recompute(&mut self) {
        let snapshot = self
            .source
            .fetch_section_records(&self.config.section, self.config.fetch_limit);

        if let Some(message) = snapshot.error {
            warn!(section = %self.config.section, error = %message, "fetch failed");
            self.phase = ListPhase::FetchFailed(message);
            // last-known-good page stays frozen
            return;
        }

        if snapshot.loading {
            if self.cache.is_empty() {
                self.phase = ListPhase::Loading;
                return;
            }
            // keep serving the cached set until the fetch lands
        } else {
            self.cache = snapshot.data;
        }

        self.rebuild_view();
    }

    /// Rerun the local pipeline over the cached raw records.
    fn rebuild_view(&mut self) {
        let now = self.clock.now();

        let excluded = self.snoozes.active_snoozes(now);
        let visible: Vec<Record> = self
            .cache
            .iter()
            .filter(|record| !excluded.contains(record.id()))
            .cloned()
            .collect();

        let filtered = RecordFilterEngine::filter(&visible, &self.criteria, now);
        let mut merged = self.overlay.merge_into(&filtered, now);
        RankComparator::sort(&mut merged, &self.sort);

        let completed_set = self.completed.as_set();
        let total_completed = merged
            .iter()
            .filter(|record| completed_set.contains(record.id()))
            .count();
        let total_active = merged.len() - total_completed;

        let batch_count = total_active.div_ceil(self.config.batch_size.max(1));
        if self.batch_index >= batch_count {
            self.batch_index = batch_count.saturating_sub(1);
        }

        let page = SprintBatcher::paginate(
            &merged,
            &completed_set,
            self.batch_index,
            self.config.batch_size,
        );

        if let Some(selected) = &self.selection {
            if !page.records.iter().any(|r| r.id() == selected) {
                self.selection = None;
            }
        }

        self.phase = if total_active == 0 {
            ListPhase::Empty
        } else {
            ListPhase::Ready
        };
        self.view = ListView {
            page: page.records,
            batch_index: self.batch_index,
            batch_count: page.batch_count,
            selection: self.selection.clone(),
            total_active,
            total_completed,
        };
    }

    // ------------------------------------------------------------------
    // Selection cursor
    // ------------------------------------------------------------------

    /// Select a record on the current page. Off-page ids are ignored.
    pub fn select_record(&mut self, id: RecordId) {
        if self.view.page.iter().any(|r| r.id() == &id) {
            self.selection = Some(id);
            self.view.selection = self.selection.clone();
        }
    }

    pub fn selection(&self) -> Option<&RecordId> {
        self.selection.as_ref()
    }

    /// Advance the cursor within the page; exhausting the page wraps into
    /// the next sprint rather than stopping.
    pub fn next(&mut self) {
        if self.view.page.is_empty() {
            return;
        }
        let position = self
            .selection
            .as_ref()
            .and_then(|id| self.view.page.iter().position(|r| r.id() == id));
        match position {
            Some(i) if i + 1 < self.view.page.len() => {
                self.selection = Some(self.view.page[i + 1].id().clone());
                self.view.selection = self.selection.clone();
            }
            Some(_) => {
                self.step_batch(1);
                self.select_edge(true);
            }
            None => self.select_edge(true),
        }
    }

    /// Move the cursor back within the page; the page start wraps into the
    /// previous sprint.
    pub fn previous(&mut self) {
        if self.view.page.is_empty() {
            return;
        }
        let position = self
            .selection
            .as_ref()
            .and_then(|id| self.view.page.iter().position(|r| r.id() == id));
        match position {
            Some(i) if i > 0 => {
                self.selection = Some(self.view.page[i - 1].id().clone());
                self.view.selection = self.selection.clone();
            }
            Some(_) => {
                self.step_batch(-1);
                self.select_edge(false);
            }
            None => self.select_edge(false),
        }
    }

    fn select_edge(&mut self, first: bool) {
        let id = if first {
            self.view.page.first().map(|r| r.id().clone())
        } else {
            self.view.page.last().map(|r| r.id().clone())
        };
        self.selection = id;
        self.view.selection = self.selection.clone();
    }

    fn step_batch(&mut self, delta: i64) {
        let count = self.view.batch_count.max(1) as i64;
        let next = (self.batch_index as i64 + delta).rem_euclid(count) as usize;
        self.batch_index = next;
        // selection never carries across batch boundaries
        self.selection = None;
        self.rebuild_view();
    }

    /// Jump to a batch. Resets the selection cursor.
    pub fn set_batch_index(&mut self, index: usize) {
        self.batch_index = index;
        self.selection = None;
        self.rebuild_view();
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Mark a record complete: persist it, keep it in view (relocated to
    /// the bottom of its batch on recompute), and advance the cursor to
    /// the next active record — next in page order, else the next batch,
    /// else the list goes empty.
    pub fn mark_complete(&mut self, id: RecordId) -> Result<()> {
        let page_before = self.view.page.clone();
        self.completed.mark(id.clone(), self.store.as_mut())?;
        debug!(record = %id, "marked complete");

        let completed_set = self.completed.as_set();
        let next_active = page_before
            .iter()
            .position(|r| r.id() == &id)
            .and_then(|i| {
                page_before[i + 1..]
                    .iter()
                    .find(|r| !completed_set.contains(r.id()))
                    .map(|r| r.id().clone())
            });

        self.selection = None;
        self.rebuild_view();

        if let Some(next_id) = next_active {
            if self.view.page.iter().any(|r| r.id() == &next_id) {
                self.selection = Some(next_id);
                self.view.selection = self.selection.clone();
                return Ok(());
            }
        }
        let first_active = self
            .view
            .page
            .iter()
            .find(|r| !self.completed.contains(r.id()))
            .map(|r| r.id().clone());
        if let Some(first_id) = first_active {
            self.selection = Some(first_id);
            self.view.selection = self.selection.clone();
            return Ok(());
        }
        if self.view.batch_count > self.batch_index + 1 {
            self.batch_index += 1;
            self.rebuild_view();
            let first_active = self
                .view
                .page
                .iter()
                .find(|r| !self.completed.contains(r.id()))
                .map(|r| r.id().clone());
            self.selection = first_active;
            self.view.selection = self.selection.clone();
        }
        // no batches remain: rebuild_view already reported Empty
        Ok(())
    }

    /// Clear the completed set (explicit reset action).
    pub fn reset_completed(&mut self) -> Result<()> {
        self.completed.reset(self.store.as_mut())?;
        self.rebuild_view();
        Ok(())
    }

    /// Apply an optimistic edit and submit the backing write.
    ///
    /// The overlay entry shields the edit from stale refreshes for the
    /// configured TTL. A failed submit surfaces as `MutationFailed`; the
    /// entry still expires on schedule — indefinitely trusting an overlay
    /// whose write failed would permanently diverge from the authoritative
    /// store.
    pub fn apply_edit(&mut self, id: RecordId, patch: Patch) -> Result<()> {
        let now = self.clock.now();
        self.overlay
            .apply(id.clone(), patch.clone(), self.config.overlay_ttl, now);
        self.rebuild_view();

        match self.mutator.submit_action(&id, &patch) {
            Ok(()) => Ok(()),
            Err(reason) => {
                warn!(record = %id, reason = %reason, "mutation failed");
                Err(EngineError::MutationFailed {
                    record_id: id,
                    reason,
                })
            }
        }
    }

    /// Snooze a record out of the working set for `duration`.
    pub fn snooze(&mut self, id: RecordId, duration: SnoozeDuration) -> Result<()> {
        let until = duration.until(self.clock.now());
        self.snoozes.snooze(id, until, self.store.as_mut())?;
        self.rebuild_view();
        Ok(())
    }

    /// Three-state sort toggle; the resulting spec persists per
    /// section and workspace.
    pub fn set_sort_field(&mut self, field: &str) -> Result<()> {
        self.sort = next_spec(&self.sort, field, self.config.toggle_policy);
        let key = keys::sort_pref(&self.config.section, &self.config.workspace);
        self.store.set(&key, &serde_json::to_string(&self.sort)?)?;
        self.rebuild_view();
        Ok(())
    }

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.rebuild_view();
    }

    /// External invalidation hook: something elsewhere changed the backing
    /// data. Decoupled from any event-bus mechanism.
    pub fn on_external_invalidate(&mut self) {
        self.source.refresh();
        self.recompute();
    }

    /// Retry affordance after a fetch failure.
    pub fn retry_fetch(&mut self) {
        self.source.refresh();
        self.recompute();
    }
}

fn load_sort_pref(store: &dyn StateStore, section: &str, workspace: &str) -> SortSpec {
    match store.get(&keys::sort_pref(section, workspace)) {
        None => SortSpec::unsorted(),
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(section = %section, workspace = %workspace, %err, "discarding corrupt sort preference");
            SortSpec::unsorted()
        }),
    }
}
