use chrono::{DateTime, Months, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Last second a day window reaches. The stats queries have always stopped
/// at 23:59:29 rather than 23:59:59, and day totals are compared against
/// that boundary.
pub const DAY_END_SECONDS: u32 = 23 * 3600 + 59 * 60 + 29;

pub fn day_end() -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(DAY_END_SECONDS, 0).expect("Invalid time")
}

/// A closed `[start, end]` interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `date 00:00:00` to `date 23:59:29`, UTC.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date.and_time(NaiveTime::MIN).and_utc(),
            end: date.and_time(day_end()).and_utc(),
        }
    }

    /// From the start of the day `months` calendar months before `date` to the
    /// end of `date`. Month ends are clamped, so Aug 31 minus six months is the
    /// last day of February.
    pub fn lookback(date: NaiveDate, months: u32) -> Self {
        let from = date
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start: from.and_time(NaiveTime::MIN).and_utc(),
            end: Self::day(date).end,
        }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time <= self.end
    }
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `weeks` full weeks back from `today`, both ends included.
    pub fn trailing_weeks(today: NaiveDate, weeks: u32) -> Self {
        Self {
            start: today - TimeDelta::days(7 * i64::from(weeks)),
            end: today,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn len(&self) -> usize {
        let days = (self.end - self.start).num_days() + 1;
        days.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn time_window(&self) -> TimeWindow {
        TimeWindow {
            start: TimeWindow::day(self.start).start,
            end: TimeWindow::day(self.end).end,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_window_bounds() {
        let window = TimeWindow::day(date(2024, 3, 10));
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 29).unwrap());
    }

    #[test]
    fn day_window_misses_last_half_minute() {
        let window = TimeWindow::day(date(2024, 3, 10));
        let late = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 45).unwrap();
        assert!(!window.contains(late));
        assert!(window.contains(window.end));
        assert_eq!(day_end().second(), 29);
    }

    #[test]
    fn lookback_six_months() {
        let window = TimeWindow::lookback(date(2024, 3, 10), 6);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2023, 9, 10, 0, 0, 0).unwrap());
        assert_eq!(window.end, TimeWindow::day(date(2024, 3, 10)).end);
    }

    #[test]
    fn lookback_clamps_month_end() {
        let window = TimeWindow::lookback(date(2024, 8, 31), 6);
        assert_eq!(window.start.date_naive(), date(2024, 2, 29));
    }

    #[test]
    fn trailing_eight_weeks() {
        let window = DateWindow::trailing_weeks(date(2024, 2, 26), 8);
        assert_eq!(window.start, date(2024, 1, 1));
        assert_eq!(window.len(), 57);
        assert_eq!(window.days().count(), 57);
        assert_eq!(window.days().last(), Some(date(2024, 2, 26)));
    }

    #[test]
    fn inverted_window_is_empty() {
        let window = DateWindow::new(date(2024, 2, 2), date(2024, 2, 1));
        assert!(window.is_empty());
        assert_eq!(window.days().count(), 0);
    }

    #[test]
    fn date_window_to_time_window() {
        let window = DateWindow::new(date(2024, 1, 1), date(2024, 1, 7)).time_window();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 1, 7, 23, 59, 29).unwrap());
    }
}
