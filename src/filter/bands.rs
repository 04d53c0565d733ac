use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Annual revenue buckets offered by the list filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueBand {
    UpTo1M,
    OneToTenM,
    TenToFiftyM,
    FiftyToTwoFiftyM,
    OverTwoFiftyM,
}

impl RevenueBand {
    pub fn contains(&self, amount: f64) -> bool {
        const M: f64 = 1_000_000.0;
        match self {
            Self::UpTo1M => amount < M,
            Self::OneToTenM => (M..10.0 * M).contains(&amount),
            Self::TenToFiftyM => (10.0 * M..50.0 * M).contains(&amount),
            Self::FiftyToTwoFiftyM => (50.0 * M..250.0 * M).contains(&amount),
            Self::OverTwoFiftyM => amount >= 250.0 * M,
        }
    }
}

/// Company headcount buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadcountBand {
    UpTo10,
    From11To50,
    From51To200,
    From201To1000,
    Over1000,
}

impl HeadcountBand {
    pub fn contains(&self, count: i64) -> bool {
        match self {
            Self::UpTo10 => (1..=10).contains(&count),
            Self::From11To50 => (11..=50).contains(&count),
            Self::From51To200 => (51..=200).contains(&count),
            Self::From201To1000 => (201..=1000).contains(&count),
            Self::Over1000 => count > 1000,
        }
    }
}

/// How recently a record was last touched.
///
/// `Never` keys off the absence of a parseable `lastActionDate`;
/// `Uncontacted` keys off the `lastAction` field being unset (or the
/// remote's "No action taken" sentinel). The remaining buckets are
/// cumulative day ranges measured from `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactRecency {
    Never,
    Today,
    Within7Days,
    Within30Days,
    Within90Days,
    Over90Days,
    Uncontacted,
}

impl ContactRecency {
    /// Whether a last-action instant falls in this bucket.
    ///
    /// `Never` and `Uncontacted` are resolved by the caller from field
    /// presence, not from a date, so they never match here.
    pub fn contains(&self, last_action: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let days = (now - last_action).num_days();
        match self {
            Self::Never | Self::Uncontacted => false,
            Self::Today => days == 0 && now >= last_action,
            Self::Within7Days => (0..=7).contains(&days),
            Self::Within30Days => (0..=30).contains(&days),
            Self::Within90Days => (0..=90).contains(&days),
            Self::Over90Days => days > 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_revenue_band_edges() {
        assert!(RevenueBand::UpTo1M.contains(999_999.0));
        assert!(!RevenueBand::UpTo1M.contains(1_000_000.0));
        assert!(RevenueBand::OneToTenM.contains(1_000_000.0));
        assert!(RevenueBand::TenToFiftyM.contains(25_000_000.0));
        assert!(RevenueBand::OverTwoFiftyM.contains(300_000_000.0));
    }

    #[test]
    fn test_headcount_band_edges() {
        assert!(HeadcountBand::UpTo10.contains(10));
        assert!(!HeadcountBand::UpTo10.contains(11));
        assert!(HeadcountBand::From51To200.contains(120));
        assert!(HeadcountBand::Over1000.contains(5000));
        assert!(!HeadcountBand::UpTo10.contains(0));
    }

    #[test]
    fn test_recency_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let three_days = Utc.with_ymd_and_hms(2024, 6, 7, 12, 0, 0).unwrap();
        let hundred_days = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert!(ContactRecency::Within7Days.contains(three_days, now));
        assert!(ContactRecency::Within30Days.contains(three_days, now));
        assert!(!ContactRecency::Today.contains(three_days, now));
        assert!(ContactRecency::Over90Days.contains(hundred_days, now));
        assert!(!ContactRecency::Within90Days.contains(hundred_days, now));
    }
}
