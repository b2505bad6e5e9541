use crate::error::AnalyticsError;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::Order;
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar dates (UTC). Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range, rejecting one whose start falls after its end.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, AnalyticsError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(AnalyticsError::InvalidRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// A range that accepts every date.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let day = timestamp.date_naive();
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }

    /// Keeps the orders whose date falls inside the range.
    pub fn select<'a, I>(&self, orders: I) -> impl Iterator<Item = &'a Order> + use<'a, I>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let range = *self;
        orders.into_iter().filter(move |o| range.contains(&o.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some(day(2024, 1, 10)), Some(day(2024, 1, 20))).unwrap();
        let at = |d| Utc.with_ymd_and_hms(2024, 1, d, 23, 59, 59).unwrap();

        assert!(!range.contains(&at(9)));
        assert!(range.contains(&at(10)));
        assert!(range.contains(&at(20)));
        assert!(!range.contains(&at(21)));
    }

    #[test]
    fn open_range_accepts_everything() {
        let ts = Utc.with_ymd_and_hms(1999, 12, 31, 0, 0, 0).unwrap();
        assert!(DateRange::all().contains(&ts));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = DateRange::new(Some(day(2024, 2, 1)), Some(day(2024, 1, 1))).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InvalidRange {
                start: day(2024, 2, 1),
                end: day(2024, 1, 1)
            }
        );
    }
}
