use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A dynamically-typed record field value.
///
/// Records arrive from the remote store as loose field maps, so values keep
/// their wire-level shape instead of being forced into a schema. `Timestamp`
/// covers the date-bearing fields (`lastActionDate`, `nextActionDate`);
/// date strings that reach us as `Text` are promoted on access via
/// [`FieldValue::as_timestamp`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Timestamp(_) => "timestamp",
            Self::Text(_) => "text",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(*f as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Resolve a timestamp from this value.
    ///
    /// Accepts a native `Timestamp`, an RFC 3339 string, or a bare
    /// `YYYY-MM-DD` date (interpreted as midnight UTC). Anything else
    /// resolves to `None`.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            Self::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Compare two values of the same logical kind.
    ///
    /// Numeric kinds coerce between integer and float. Mixed incompatible
    /// kinds fall back to a fixed ordering by type so the comparison stays
    /// total; NaN sorts after every finite float.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Greater,
            (_, Null) => Ordering::Less,

            (Integer(a), Integer(b)) => a.cmp(b),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),

            (Float(a), Float(b)) => compare_floats(*a, *b),
            (Integer(a), Float(b)) => compare_floats(*a as f64, *b),
            (Float(a), Integer(b)) => compare_floats(*a, *b as f64),

            (a, b) => type_rank(a).cmp(&type_rank(b)),
        }
    }
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn type_rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Null => 0,
        FieldValue::Boolean(_) => 1,
        FieldValue::Integer(_) | FieldValue::Float(_) => 2,
        FieldValue::Timestamp(_) => 3,
        FieldValue::Text(_) => 4,
    }
}

/// Parse an RFC 3339 timestamp, falling back to a bare date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s.trim()) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (Timestamp(a), Timestamp(b)) => a == b,
            (Float(a), Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    return true;
                }
                (a - b).abs() < f64::EPSILON
            }
            (Integer(i), Float(f)) | (Float(f), Integer(i)) => {
                (*i as f64 - f).abs() < f64::EPSILON
            }
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(fl) => write!(f, "{}", fl),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_equality() {
        assert_eq!(FieldValue::Integer(42), FieldValue::Integer(42));
        assert_eq!(FieldValue::Float(3.5), FieldValue::Float(3.5));
        assert_eq!(FieldValue::Integer(2), FieldValue::Float(2.0));
        assert_ne!(FieldValue::Integer(1), FieldValue::Integer(2));
    }

    #[test]
    fn test_compare_numeric_coercion() {
        assert_eq!(
            FieldValue::Integer(1).compare(&FieldValue::Float(2.0)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Float(2.5).compare(&FieldValue::Integer(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_null_sorts_last() {
        assert_eq!(
            FieldValue::Null.compare(&FieldValue::Integer(0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_timestamp_from_text() {
        let v = FieldValue::from("2024-01-15T10:30:00Z");
        let ts = v.as_timestamp().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T10:30:00+00:00");

        let bare = FieldValue::from("2024-01-15");
        assert!(bare.as_timestamp().is_some());

        assert!(FieldValue::from("not a date").as_timestamp().is_none());
    }

    #[test]
    fn test_numeric_from_text() {
        assert_eq!(FieldValue::from("42").as_i64(), Some(42));
        assert_eq!(FieldValue::from(" 2.5 ").as_f64(), Some(2.5));
        assert_eq!(FieldValue::from("abc").as_f64(), None);
    }
}
