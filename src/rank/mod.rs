// ============================================================================
// Ranking and sorting
// ============================================================================
//
// Resolves a sortable key from a record and a sort specification, including
// the compound alphanumeric rank format. Comparison is total: missing dates
// resolve to the earliest representable instant (unset sorts as "oldest"),
// missing numerics to 0, and text keys are lower-cased. "Unsorted" is a real
// third state distinct from ascending — callers preserve upstream order and
// never invoke the comparator.
//
// ============================================================================

mod compound;
mod toggle;

pub use compound::{decode as decode_rank, decode_str as decode_rank_str};
pub use toggle::{next_spec, RankTogglePolicy};

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::fields;
use crate::core::value::FieldValue;
use crate::core::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    Unsorted,
}

/// A sort specification. An empty `field` is the true unsorted state,
/// preserving input order — distinct from sorting ascending by anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn unsorted() -> Self {
        Self {
            field: String::new(),
            direction: SortDirection::Unsorted,
        }
    }

    pub fn is_unsorted(&self) -> bool {
        self.field.is_empty() || self.direction == SortDirection::Unsorted
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::unsorted()
    }
}

/// A resolved, totally-ordered sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
    Time(DateTime<Utc>),
}

impl SortKey {
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            // Keys for one field are homogeneous by construction; a mixed
            // comparison means inconsistent data and orders by kind.
            (a, b) => kind_rank(a).cmp(&kind_rank(b)),
        }
    }
}

fn kind_rank(key: &SortKey) -> u8 {
    match key {
        SortKey::Number(_) => 0,
        SortKey::Time(_) => 1,
        SortKey::Text(_) => 2,
    }
}

/// Which decoding a field's sort key uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Date,
    Numeric,
    Rank,
    Text,
}

fn field_kind(field: &str) -> FieldKind {
    match field {
        fields::LAST_ACTION_DATE | fields::NEXT_ACTION_DATE => FieldKind::Date,
        fields::AMOUNT | fields::EMPLOYEE_COUNT => FieldKind::Numeric,
        fields::RANK => FieldKind::Rank,
        _ => FieldKind::Text,
    }
}

/// Whether a field carries the compound alphanumeric rank format, which
/// restricts the interactive toggle (see [`RankTogglePolicy`]).
pub fn is_compound_rank_field(field: &str) -> bool {
    field_kind(field) == FieldKind::Rank
}

pub struct RankComparator;

impl RankComparator {
    /// Resolve the sortable key for `field` on `record`.
    ///
    /// - date fields: missing/unparseable resolves to the earliest
    ///   representable instant, never to null
    /// - numeric and rank fields: missing resolves to 0
    /// - text fields: lower-cased, missing resolves to ""
    pub fn sort_key(record: &Record, field: &str) -> SortKey {
        match field_kind(field) {
            FieldKind::Date => SortKey::Time(
                record
                    .field(field)
                    .and_then(FieldValue::as_timestamp)
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
            FieldKind::Numeric => SortKey::Number(
                record
                    .field(field)
                    .and_then(FieldValue::as_f64)
                    .unwrap_or(0.0),
            ),
            FieldKind::Rank => SortKey::Number(
                record
                    .field(field)
                    .map(compound::decode)
                    .unwrap_or(0.0),
            ),
            FieldKind::Text => SortKey::Text(record.text(field).to_lowercase()),
        }
    }

    /// Compare two records under `spec`.
    ///
    /// Callers must skip invoking this when `spec.is_unsorted()` and
    /// preserve upstream order instead; if called anyway it reports equal.
    pub fn compare(a: &Record, b: &Record, spec: &SortSpec) -> Ordering {
        if spec.is_unsorted() {
            return Ordering::Equal;
        }
        let ka = Self::sort_key(a, &spec.field);
        let kb = Self::sort_key(b, &spec.field);
        let ordering = ka.compare(&kb);
        match spec.direction {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    }

    /// Stable-sort `records` in place under `spec`.
    ///
    /// The unsorted state leaves the slice untouched — upstream order is
    /// the contract, not a no-op comparator pass.
    pub fn sort(records: &mut [Record], spec: &SortSpec) {
        if spec.is_unsorted() || records.len() < 2 {
            return;
        }
        records.sort_by(|a, b| Self::compare(a, b, spec));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ids(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.id().as_str().to_string())
            .collect()
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let mut records = vec![
            Record::new("b").with_field(fields::NAME, "beta"),
            Record::new("a").with_field(fields::NAME, "Alpha"),
        ];
        RankComparator::sort(
            &mut records,
            &SortSpec::new(fields::NAME, SortDirection::Ascending),
        );
        assert_eq!(ids(&records), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_date_sorts_oldest() {
        let mut records = vec![
            Record::new("dated").with_field(fields::LAST_ACTION_DATE, "2024-05-01T00:00:00Z"),
            Record::new("undated"),
        ];
        RankComparator::sort(
            &mut records,
            &SortSpec::new(fields::LAST_ACTION_DATE, SortDirection::Ascending),
        );
        assert_eq!(ids(&records), vec!["undated", "dated"]);
    }

    #[test]
    fn test_missing_numeric_is_zero() {
        let key = RankComparator::sort_key(&Record::new("x"), fields::AMOUNT);
        assert_eq!(key, SortKey::Number(0.0));
    }

    #[test]
    fn test_compound_rank_descending() {
        let mut records = vec![
            Record::new("2A").with_field(fields::RANK, "2A"),
            Record::new("10A").with_field(fields::RANK, "10A"),
            Record::new("2B").with_field(fields::RANK, "2B"),
        ];
        RankComparator::sort(
            &mut records,
            &SortSpec::new(fields::RANK, SortDirection::Descending),
        );
        assert_eq!(ids(&records), vec!["10A", "2B", "2A"]);
    }

    #[test]
    fn test_unsorted_preserves_input_order() {
        let mut records = vec![
            Record::new("z").with_field(fields::NAME, "z"),
            Record::new("a").with_field(fields::NAME, "a"),
        ];
        RankComparator::sort(&mut records, &SortSpec::unsorted());
        assert_eq!(ids(&records), vec!["z", "a"]);
    }

    #[test]
    fn test_timestamp_keys_compare() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(
            SortKey::Time(early).compare(&SortKey::Time(late)),
            Ordering::Less
        );
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut records = vec![
            Record::new("first").with_field(fields::STATUS, "active"),
            Record::new("second").with_field(fields::STATUS, "active"),
        ];
        RankComparator::sort(
            &mut records,
            &SortSpec::new(fields::STATUS, SortDirection::Ascending),
        );
        assert_eq!(ids(&records), vec!["first", "second"]);
    }
}
