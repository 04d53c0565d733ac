use serde::{Deserialize, Serialize};

use crate::rank::{is_compound_rank_field, SortDirection, SortSpec};

/// How repeated clicks on a compound-rank column cycle.
///
/// `DescendingUnsortedOnly` is the primary contract: "best rank first" is
/// the only meaningful default, so ascending is never reachable and the
/// cycle is descending ⇄ unsorted. `FullCycle` restores the ordinary
/// three-state cycle for callers that want it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankTogglePolicy {
    #[default]
    DescendingUnsortedOnly,
    FullCycle,
}

/// Advance the sort spec for a click on `field`.
///
/// Clicking a new field starts its cycle; clicking the current field
/// advances it: ascending → descending → unsorted → ascending, except
/// compound-rank fields under `DescendingUnsortedOnly`, which start at
/// descending and cycle descending ⇄ unsorted.
pub fn next_spec(current: &SortSpec, field: &str, policy: RankTogglePolicy) -> SortSpec {
    let compound_restricted =
        is_compound_rank_field(field) && policy == RankTogglePolicy::DescendingUnsortedOnly;

    let same_field = !current.is_unsorted() && current.field == field;
    if !same_field {
        let direction = if compound_restricted {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        return SortSpec::new(field, direction);
    }

    match current.direction {
        SortDirection::Ascending => SortSpec::new(field, SortDirection::Descending),
        SortDirection::Descending => SortSpec::unsorted(),
        SortDirection::Unsorted => {
            // unreachable in practice: the unsorted state clears the field
            SortSpec::unsorted()
        }
    }
}
