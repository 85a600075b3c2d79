/// Source of "today" for the request layer
///
/// Streak and progress calculations never read the clock themselves; the
/// server asks its `Clock` once per request and passes the date down.

use chrono::{NaiveDate, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// The current UTC calendar date
    #[default]
    System,
    /// A pinned date, for tests and reproducible runs
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

impl From<Option<NaiveDate>> for Clock {
    fn from(pinned: Option<NaiveDate>) -> Self {
        pinned.map(Clock::Fixed).unwrap_or_default()
    }
}
