use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::format::format_day;

/// Inclusive calendar-day range a collection report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self::new(today, today)
    }

    /// `start 00:00:00`
    pub fn start_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// `end 23:59:59`; the final sub-second of the day is outside the range.
    pub fn end_bound(&self) -> NaiveDateTime {
        let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.end.and_time(last)
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        *ts >= self.start_bound() && *ts <= self.end_bound()
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// `From dd/mm/yyyy to dd/mm/yyyy`
    pub fn label(&self) -> String {
        format!("From {} to {}", format_day(&self.start), format_day(&self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_cover_whole_days() {
        let range = DateRange::new(day(2026, 10, 1), day(2026, 10, 3));
        assert_eq!(range.start_bound().to_string(), "2026-10-01 00:00:00");
        assert_eq!(range.end_bound().to_string(), "2026-10-03 23:59:59");

        assert!(range.contains(&day(2026, 10, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(range.contains(&day(2026, 10, 3).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!range.contains(&day(2026, 9, 30).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!range.contains(&day(2026, 10, 4).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange::new(day(2026, 10, 5), day(2026, 10, 1));
        assert!(range.is_inverted());
        assert!(!range.contains(&day(2026, 10, 3).and_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn label_uses_day_month_year() {
        let range = DateRange::new(day(2026, 1, 9), day(2026, 2, 28));
        assert_eq!(range.label(), "From 09/01/2026 to 28/02/2026");
    }
}
