// ============================================================================
// Integration tests for the sprint batching flow
// ============================================================================
//
// These exercise the full pipeline through the controller: ranked input,
// completion relocation, batch membership stability, and the completed
// carry displacing active records from the page.
//
// ============================================================================

use std::sync::Arc;

use pipelist::{
    ControllerConfig, DiscardMutator, ListPhase, ManualClock, MemoryStore,
    PipelineListController, Record, StaticRecordSource, fields,
};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// 12 records ranked 1A, 1B, 2A, 2B, ... 6A, 6B, ids equal to their ranks,
/// provided in rank order.
fn ranked_dozen() -> Vec<Record> {
    let mut records = Vec::new();
    for ordinal in 1..=6 {
        for letter in ["A", "B"] {
            let rank = format!("{}{}", ordinal, letter);
            records.push(
                Record::new(rank.clone())
                    .with_field(fields::NAME, format!("Contact {}", rank))
                    .with_field(fields::RANK, rank),
            );
        }
    }
    records
}

fn controller_over(
    records: Vec<Record>,
) -> PipelineListController<StaticRecordSource, DiscardMutator> {
    PipelineListController::new(
        ControllerConfig::new("speedrun", "ws1"),
        StaticRecordSource::new(records),
        DiscardMutator,
        Arc::new(ManualClock::at_epoch()),
        Box::new(MemoryStore::new()),
    )
}

fn page_ids(controller: &PipelineListController<StaticRecordSource, DiscardMutator>) -> Vec<String> {
    controller
        .view()
        .page
        .iter()
        .map(|r| r.id().as_str().to_string())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_end_to_end_completed_rank_relocation() {
    let mut controller = controller_over(ranked_dozen());
    assert_eq!(controller.view().total_active, 12);

    controller.mark_complete("3A".into()).unwrap();

    // Batch 0: nine active records in rank order, skipping 3A, with 3A
    // appended last. 6A is displaced from the page by the carry.
    let ids = page_ids(&controller);
    assert_eq!(
        ids,
        vec!["1A", "1B", "2A", "2B", "3B", "4A", "4B", "5A", "5B", "3A"]
    );
    assert_eq!(controller.view().total_active, 11);
    assert_eq!(controller.view().total_completed, 1);
    assert_eq!(controller.view().batch_count, 2);

    // Batch 1 holds the single leftover active record.
    controller.set_batch_index(1);
    assert_eq!(page_ids(&controller), vec!["6B"]);
}

#[test]
fn test_completion_does_not_reorder_others() {
    let mut controller = controller_over(ranked_dozen());
    let before = page_ids(&controller);

    controller.mark_complete("3A".into()).unwrap();
    let after = page_ids(&controller);

    // every non-completed record keeps its relative order
    let before_active: Vec<_> = before.iter().filter(|id| *id != "3A").collect();
    let after_active: Vec<_> = after.iter().filter(|id| *id != "3A").collect();
    assert_eq!(before_active[..after_active.len()], after_active[..]);
    // and the completed record sits at the bottom of the page
    assert_eq!(after.last().unwrap(), "3A");
}

#[test]
fn test_batch_membership_survives_completion() {
    // completing a record changes the completed carry, not which batch the
    // remaining active records belong to
    let mut controller = controller_over(ranked_dozen());
    controller.mark_complete("1A".into()).unwrap();

    assert_eq!(controller.view().batch_count, 2);
    controller.set_batch_index(1);
    assert_eq!(page_ids(&controller), vec!["6B"]);
}

#[test]
fn test_completing_everything_goes_empty() {
    let records: Vec<Record> = (0..3)
        .map(|i| Record::new(format!("p{}", i)))
        .collect();
    let mut controller = controller_over(records);

    controller.mark_complete("p0".into()).unwrap();
    controller.mark_complete("p1".into()).unwrap();
    assert_eq!(*controller.phase(), ListPhase::Ready);

    controller.mark_complete("p2".into()).unwrap();
    assert_eq!(*controller.phase(), ListPhase::Empty);
    assert_eq!(controller.view().total_active, 0);
    // completed records remain visible on the final page
    assert_eq!(controller.view().total_completed, 3);
}

#[test]
fn test_reset_completed_restores_working_set() {
    let mut controller = controller_over(ranked_dozen());
    controller.mark_complete("1A".into()).unwrap();
    controller.mark_complete("1B".into()).unwrap();
    assert_eq!(controller.view().total_active, 10);

    controller.reset_completed().unwrap();
    assert_eq!(controller.view().total_active, 12);
    assert_eq!(controller.view().total_completed, 0);
}

#[test]
fn test_completed_set_restored_from_store() {
    use pipelist::StateStore;

    // a previous session persisted 3A under the section's namespace
    let mut store = MemoryStore::new();
    store
        .set("completed-records::speedrun", "[\"3A\"]")
        .unwrap();

    let controller = PipelineListController::new(
        ControllerConfig::new("speedrun", "ws1"),
        StaticRecordSource::new(ranked_dozen()),
        DiscardMutator,
        Arc::new(ManualClock::at_epoch()),
        Box::new(store),
    );
    assert_eq!(controller.view().total_completed, 1);
    assert_eq!(page_ids(&controller).last().unwrap(), "3A");
}
