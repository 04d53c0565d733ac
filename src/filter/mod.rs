// ============================================================================
// Record filtering
// ============================================================================
//
// A conjunction of independent predicates over the working set. Every
// predicate has an "all" sentinel that always passes, so the default
// criteria are the identity filter. Filtering is pure and total: missing
// fields never panic and are treated as non-matching for equality
// predicates. `now` is injected for the recency buckets.
//
// ============================================================================

mod bands;

pub use bands::{ContactRecency, HeadcountBand, RevenueBand};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::fields;
use crate::core::value::FieldValue;
use crate::core::Record;

/// Priority predicate: match everything, only records with no priority set,
/// or one specific level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityFilter {
    #[default]
    Any,
    Unset,
    Level(String),
}

/// The fixed set of filter predicates, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring across name, title, company, and email.
    pub search: Option<String>,
    pub status: Option<String>,
    pub stage: Option<String>,
    pub priority: PriorityFilter,
    pub revenue: Option<RevenueBand>,
    pub headcount: Option<HeadcountBand>,
    pub state: Option<String>,
    /// Case-insensitive equality-or-substring on the technology field.
    pub technology: Option<String>,
    pub last_contacted: Option<ContactRecency>,
}

impl FilterCriteria {
    /// The identity filter: every predicate at its "all" sentinel.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// The remote's sentinel for a record that has never been worked.
const NO_ACTION_TAKEN: &str = "No action taken";

pub struct RecordFilterEngine;

impl RecordFilterEngine {
    /// Apply `criteria` to `records`, preserving input order.
    pub fn filter(
        records: &[Record],
        criteria: &FilterCriteria,
        now: DateTime<Utc>,
    ) -> Vec<Record> {
        records
            .iter()
            .filter(|record| Self::matches(record, criteria, now))
            .cloned()
            .collect()
    }

    pub fn matches(record: &Record, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
        if let Some(needle) = non_empty(&criteria.search) {
            let needle = needle.to_lowercase();
            let hit = [fields::NAME, fields::TITLE, fields::COMPANY, fields::EMAIL]
                .into_iter()
                .any(|key| record.text(key).to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(status) = non_empty(&criteria.status) {
            if !text_eq_ci(record, fields::STATUS, status) {
                return false;
            }
        }

        if let Some(stage) = non_empty(&criteria.stage) {
            if !text_eq_ci(record, fields::STAGE, stage) {
                return false;
            }
        }

        match &criteria.priority {
            PriorityFilter::Any => {}
            PriorityFilter::Unset => {
                let set = record
                    .field(fields::PRIORITY)
                    .is_some_and(|v| !v.is_null() && v.as_str() != Some(""));
                if set {
                    return false;
                }
            }
            PriorityFilter::Level(level) => {
                if !text_eq_ci(record, fields::PRIORITY, level) {
                    return false;
                }
            }
        }

        if let Some(band) = &criteria.revenue {
            let amount = record.field(fields::AMOUNT).and_then(FieldValue::as_f64);
            match amount {
                Some(amount) if band.contains(amount) => {}
                _ => return false,
            }
        }

        if let Some(band) = &criteria.headcount {
            let count = record
                .field(fields::EMPLOYEE_COUNT)
                .and_then(FieldValue::as_i64);
            match count {
                Some(count) if band.contains(count) => {}
                _ => return false,
            }
        }

        if let Some(state) = non_empty(&criteria.state) {
            if !text_eq_ci(record, fields::STATE, state) {
                return false;
            }
        }

        if let Some(tech) = non_empty(&criteria.technology) {
            let haystack = record.text(fields::TECHNOLOGY).to_lowercase();
            if !haystack.contains(&tech.to_lowercase()) {
                return false;
            }
        }

        if let Some(recency) = &criteria.last_contacted {
            if !matches_recency(record, *recency, now) {
                return false;
            }
        }

        true
    }
}

fn matches_recency(record: &Record, recency: ContactRecency, now: DateTime<Utc>) -> bool {
    match recency {
        ContactRecency::Never => record
            .field(fields::LAST_ACTION_DATE)
            .and_then(FieldValue::as_timestamp)
            .is_none(),
        ContactRecency::Uncontacted => {
            let action = record.field(fields::LAST_ACTION);
            match action {
                None => true,
                Some(v) if v.is_null() => true,
                Some(v) => matches!(v.as_str(), Some("") | Some(NO_ACTION_TAKEN)),
            }
        }
        bucket => record
            .field(fields::LAST_ACTION_DATE)
            .and_then(FieldValue::as_timestamp)
            .is_some_and(|ts| bucket.contains(ts, now)),
    }
}

fn text_eq_ci(record: &Record, key: &str, expected: &str) -> bool {
    record
        .field(key)
        .and_then(FieldValue::as_str)
        .is_some_and(|actual| actual.eq_ignore_ascii_case(expected))
}

fn non_empty(opt: &Option<String>) -> Option<&str> {
    opt.as_deref().filter(|s| !s.trim().is_empty())
}
