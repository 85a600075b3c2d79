/// Weekly progress calculation
///
/// Progress always looks at the calendar week containing the reference
/// date, whatever the habit's frequency: daily habits progress towards
/// seven completions, weekly habits are either done for the week or not.

use chrono::NaiveDate;

use crate::domain::{period_start, week_start, Frequency, DAYS_PER_WEEK};

/// Percentage (0-100) of the current week's target that has been completed
///
/// Completions are counted as given, so duplicate or backdated records can
/// push the raw count past seven; the result is clamped rather than
/// averaged.
pub fn compute_weekly_progress(
    completion_dates: &[NaiveDate],
    frequency: Frequency,
    reference: NaiveDate,
) -> u8 {
    let boundary = week_start(reference);
    let this_week = completion_dates
        .iter()
        .filter(|&&date| date >= boundary)
        .count();

    match frequency {
        Frequency::Daily => {
            let ratio = (this_week as f64 / DAYS_PER_WEEK as f64).min(1.0);
            (ratio * 100.0).round() as u8
        }
        Frequency::Weekly => {
            if this_week > 0 {
                100
            } else {
                0
            }
        }
    }
}

/// Whether the period containing `reference` already has a completion
pub fn is_period_complete(
    completion_dates: &[NaiveDate],
    frequency: Frequency,
    reference: NaiveDate,
) -> bool {
    let current = period_start(frequency, reference);
    completion_dates
        .iter()
        .any(|&date| period_start(frequency, date) == current)
}
