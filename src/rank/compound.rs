//! Compound-rank decoding.
//!
//! Ranks arrive either as plain numbers or as compound strings like `"2A"`:
//! a company-tier ordinal followed by a within-company sub-rank letter.
//! `"<n><L>"` decodes to `n*100 + (L-'A'+1)`, which preserves the intended
//! `1A, 1B, 2A, 2B, …` ordering: for equal leading integers earlier letters
//! sort first, and across different integers the integer dominates
//! regardless of letter. Anything that matches neither shape is a
//! data-quality issue, tolerated as rank 0 — never an error.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::core::value::FieldValue;

lazy_static! {
    static ref COMPOUND_RANK: Regex = Regex::new(r"^(\d+)([A-Z])$").unwrap();
}

/// Decode a rank field into its sortable numeric key.
pub fn decode(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Integer(i) => *i as f64,
        FieldValue::Float(f) if f.is_finite() => *f,
        FieldValue::Text(s) => decode_str(s),
        _ => 0.0,
    }
}

/// Decode a rank string: compound pattern, then plain number, then 0.
pub fn decode_str(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Some(caps) = COMPOUND_RANK.captures(trimmed) {
        let ordinal: i64 = caps[1].parse().unwrap_or(i64::MAX / 200);
        let letter = caps[2].as_bytes()[0];
        let tier = i64::from(letter - b'A') + 1;
        return (ordinal.saturating_mul(100).saturating_add(tier)) as f64;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return n;
        }
    }
    if !trimmed.is_empty() {
        debug!(rank = trimmed, "malformed rank, treating as 0");
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_ordering() {
        let a2 = decode_str("2A");
        let b2 = decode_str("2B");
        let a10 = decode_str("10A");
        assert!(a2 < b2);
        assert!(b2 < a10);
    }

    #[test]
    fn test_integer_dominates_letter() {
        // 1Z still sorts before 2A
        assert!(decode_str("1Z") < decode_str("2A"));
    }

    #[test]
    fn test_plain_numbers_pass_through() {
        assert_eq!(decode_str("7"), 7.0);
        assert_eq!(decode_str("3.5"), 3.5);
        assert_eq!(decode(&FieldValue::Integer(42)), 42.0);
    }

    #[test]
    fn test_malformed_is_zero() {
        assert_eq!(decode_str("A2"), 0.0);
        assert_eq!(decode_str("2a"), 0.0);
        assert_eq!(decode_str(""), 0.0);
        assert_eq!(decode_str("first"), 0.0);
        assert_eq!(decode(&FieldValue::Null), 0.0);
        assert_eq!(decode(&FieldValue::Boolean(true)), 0.0);
    }

    #[test]
    fn test_decode_sequence_is_monotonic() {
        let ranks = ["1A", "1B", "2A", "2B", "3A", "10A", "10B"];
        let keys: Vec<f64> = ranks.iter().map(|r| decode_str(r)).collect();
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "expected {:?} ascending", keys);
        }
    }
}
