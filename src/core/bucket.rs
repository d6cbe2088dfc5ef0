//! Day-of-month split between the two published horoscope days.
//!
//! The document only carries two days of content, so the birthday's day of
//! month picks one of them. Month and year play no part.

use crate::domain::model::CalendarDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD_DAY: u32 = 15;
pub const DEFAULT_EARLY_BUCKET: &str = "2025-09-27";
pub const DEFAULT_LATE_BUCKET: &str = "2025-09-28";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketPolicy {
    /// Last day of month that still maps to `early`.
    pub threshold_day: u32,
    pub early: String,
    pub late: String,
}

impl Default for BucketPolicy {
    fn default() -> Self {
        Self {
            threshold_day: DEFAULT_THRESHOLD_DAY,
            early: DEFAULT_EARLY_BUCKET.to_string(),
            late: DEFAULT_LATE_BUCKET.to_string(),
        }
    }
}

impl BucketPolicy {
    pub fn select(&self, date: &CalendarDate) -> &str {
        self.select_day(date.day())
    }

    pub fn select_day(&self, day: u32) -> &str {
        if day <= self.threshold_day {
            &self.early
        } else {
            &self.late
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_month_and_year() {
        let policy = BucketPolicy::default();
        for year in [1925, 2000, 2025] {
            for month in 1..=12 {
                let first = CalendarDate::new(year, month, 1).unwrap();
                let mid = CalendarDate::new(year, month, 15).unwrap();
                let after = CalendarDate::new(year, month, 16).unwrap();
                assert_eq!(policy.select(&first), "2025-09-27");
                assert_eq!(policy.select(&mid), "2025-09-27");
                assert_eq!(policy.select(&after), "2025-09-28");
            }
        }
    }

    #[test]
    fn test_custom_threshold() {
        let policy = BucketPolicy {
            threshold_day: 10,
            early: "a".to_string(),
            late: "b".to_string(),
        };
        assert_eq!(policy.select_day(10), "a");
        assert_eq!(policy.select_day(11), "b");
        assert_eq!(policy.select_day(31), "b");
    }
}
