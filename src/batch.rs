// ============================================================================
// Sprint batching
// ============================================================================
//
// Partitions the filtered, ranked working set into fixed-size pages.
// Batch membership is computed over the active (non-completed) subsequence
// only, so completing a record never renumbers anyone else's batch.
// Completed records stay visible, held at the bottom of their current
// batch: they displace the lowest-ranked still-active records from the
// page rather than growing it.
//
// ============================================================================

use std::collections::HashSet;

use crate::core::record::RecordId;
use crate::core::Record;

/// Default sprint size.
pub const DEFAULT_SPRINT_SIZE: usize = 10;

/// One rendered page of the working set.
#[derive(Debug, Clone)]
pub struct SprintPage {
    /// Truncated active slice followed by the completed carry.
    pub records: Vec<Record>,
    /// `ceil(active_count / batch_size)`, over active records only.
    pub batch_count: usize,
}

pub struct SprintBatcher;

impl SprintBatcher {
    /// Build the page for `batch_index`.
    ///
    /// 1. Partition into active and completed, preserving relative rank
    ///    order within each.
    /// 2. `batch_count = ceil(active.len() / batch_size)`.
    /// 3. Slice the active subsequence for `batch_index`.
    /// 4. Reduce active slots by the completed carry so the page never
    ///    exceeds `batch_size`.
    /// 5. Emit the truncated active slice, then the carry.
    ///
    /// If the carry alone exceeds `batch_size` the page is completed
    /// records only, truncated to `batch_size`. Deterministic: identical
    /// inputs always yield the identical page.
    pub fn paginate(
        ranked: &[Record],
        completed_ids: &HashSet<RecordId>,
        batch_index: usize,
        batch_size: usize,
    ) -> SprintPage {
        let batch_size = batch_size.max(1);

        let (active, completed): (Vec<&Record>, Vec<&Record>) = ranked
            .iter()
            .partition(|record| !completed_ids.contains(record.id()));

        let batch_count = active.len().div_ceil(batch_size);

        let start = batch_index.saturating_mul(batch_size).min(active.len());
        let end = (start + batch_size).min(active.len());
        let active_slice = &active[start..end];

        let carry = &completed[..completed.len().min(batch_size)];
        let active_slots = batch_size - carry.len();

        let mut records: Vec<Record> = active_slice
            .iter()
            .take(active_slots)
            .map(|r| (*r).clone())
            .collect();
        records.extend(carry.iter().map(|r| (*r).clone()));

        SprintPage {
            records,
            batch_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<Record> {
        (0..n).map(|i| Record::new(format!("r{}", i))).collect()
    }

    fn ids(page: &SprintPage) -> Vec<String> {
        page.records
            .iter()
            .map(|r| r.id().as_str().to_string())
            .collect()
    }

    #[test]
    fn test_plain_pagination() {
        let set = records(23);
        let page = SprintBatcher::paginate(&set, &HashSet::new(), 0, 10);
        assert_eq!(page.batch_count, 3);
        assert_eq!(page.records.len(), 10);
        assert_eq!(page.records[0].id().as_str(), "r0");

        let last = SprintBatcher::paginate(&set, &HashSet::new(), 2, 10);
        assert_eq!(last.records.len(), 3);
    }

    #[test]
    fn test_completed_displace_lowest_active() {
        // 26 records, 3 completed: 23 active -> batch_count 3;
        // batch 0 shows 7 active + 3 completed = 10.
        let set = records(26);
        let completed: HashSet<RecordId> =
            ["r23", "r24", "r25"].iter().map(|s| (*s).into()).collect();

        let page = SprintBatcher::paginate(&set, &completed, 0, 10);
        assert_eq!(page.batch_count, 3);
        assert_eq!(page.records.len(), 10);

        let ids = ids(&page);
        assert_eq!(&ids[..7], &["r0", "r1", "r2", "r3", "r4", "r5", "r6"]);
        assert_eq!(&ids[7..], &["r23", "r24", "r25"]);
    }

    #[test]
    fn test_completion_does_not_shift_other_batches() {
        let set = records(23);
        let before = SprintBatcher::paginate(&set, &HashSet::new(), 1, 10);

        // completing a record from batch 0 leaves batch 1's active
        // membership intact (the carry appends, nothing renumbers)
        let completed: HashSet<RecordId> = [RecordId::from("r0")].into_iter().collect();
        let after = SprintBatcher::paginate(&set, &completed, 1, 10);

        let before_ids = ids(&before);
        let after_ids = ids(&after);
        // r0 left the active sequence, so batch 1 starts one later
        assert_eq!(before_ids[1..], after_ids[..9]);
        assert_eq!(after_ids[9], "r0");
    }

    #[test]
    fn test_carry_alone_exceeding_batch_size() {
        let set = records(15);
        let completed: HashSet<RecordId> =
            (0..12).map(|i| RecordId::from(format!("r{}", i))).collect();

        let page = SprintBatcher::paginate(&set, &completed, 0, 10);
        // 3 active -> one batch; page is completed-only, truncated
        assert_eq!(page.batch_count, 1);
        assert_eq!(page.records.len(), 10);
        assert!(page
            .records
            .iter()
            .all(|r| completed.contains(r.id())));
    }

    #[test]
    fn test_deterministic() {
        let set = records(23);
        let completed: HashSet<RecordId> = [RecordId::from("r5")].into_iter().collect();
        let a = SprintBatcher::paginate(&set, &completed, 1, 10);
        let b = SprintBatcher::paginate(&set, &completed, 1, 10);
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.batch_count, b.batch_count);
    }

    #[test]
    fn test_empty_input() {
        let page = SprintBatcher::paginate(&[], &HashSet::new(), 0, 10);
        assert_eq!(page.batch_count, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_out_of_range_batch_index() {
        let set = records(5);
        let page = SprintBatcher::paginate(&set, &HashSet::new(), 9, 10);
        assert_eq!(page.batch_count, 1);
        assert!(page.records.is_empty());
    }
}
