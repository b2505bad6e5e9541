use chrono::{Datelike, Days, Months, NaiveDate};
use core_types::TrendPeriod;

/// First day of the period containing `date`. Weeks start on Monday.
pub(crate) fn period_start(period: TrendPeriod, date: NaiveDate) -> NaiveDate {
    match period {
        TrendPeriod::Day => date,
        TrendPeriod::Week => {
            let back = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(back)).unwrap_or(date)
        }
        TrendPeriod::Month => date.with_day(1).unwrap_or(date),
    }
}

/// Start of the period after the one beginning at `start`.
pub(crate) fn next_period(period: TrendPeriod, start: NaiveDate) -> Option<NaiveDate> {
    match period {
        TrendPeriod::Day => start.succ_opt(),
        TrendPeriod::Week => start.checked_add_days(Days::new(7)),
        TrendPeriod::Month => start.checked_add_months(Months::new(1)),
    }
}
