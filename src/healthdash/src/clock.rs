use chrono::{NaiveDate, Utc};

/// Source of "today" for the dashboard.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Today in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
