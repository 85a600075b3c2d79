/// Period alignment helpers
///
/// Weeks start on Sunday and are computed on the plain calendar date, with
/// no timezone shifting, so a date always lands in exactly one week.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::Frequency;

/// Number of days in a weekly period
pub const DAYS_PER_WEEK: i64 = 7;

/// The Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// The first day of the period containing `date`
///
/// For daily habits every day is its own period.
pub fn period_start(frequency: Frequency, date: NaiveDate) -> NaiveDate {
    match frequency {
        Frequency::Daily => date,
        Frequency::Weekly => week_start(date),
    }
}

/// Length of one period of the given frequency, in days
pub fn period_length_days(frequency: Frequency) -> i64 {
    match frequency {
        Frequency::Daily => 1,
        Frequency::Weekly => DAYS_PER_WEEK,
    }
}
