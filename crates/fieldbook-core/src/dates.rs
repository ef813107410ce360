//! Calendar arithmetic for the metrics engine
//!
//! Month windows run from the first through the last day of the calendar
//! month; the previous-month window handles the December -> January year
//! rollover explicitly. Weeks are Sunday-based. All helpers return
//! `Option` so callers can fall back to a zero-filled result instead of
//! panicking on out-of-range dates.

use chrono::{Datelike, Days, NaiveDate};

/// First and last day of the date's calendar month
pub fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = date.with_day(1)?;
    let end = first_of_next_month(date)?.pred_opt()?;
    Some((start, end))
}

/// First and last day of the month before the date's month
pub fn previous_month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    month_bounds(NaiveDate::from_ymd_opt(year, month, 1)?)
}

/// Number of calendar days in the date's month
pub fn days_in_month(date: NaiveDate) -> Option<u32> {
    month_bounds(date).map(|(_, end)| end.day())
}

/// Number of weekdays (Monday through Friday) in the date's month
pub fn working_days_in_month(date: NaiveDate) -> Option<u32> {
    let (start, end) = month_bounds(date)?;
    let mut day = start;
    let mut count = 0;
    while day <= end {
        if day.weekday().number_from_monday() <= 5 {
            count += 1;
        }
        day = day.succ_opt()?;
    }
    Some(count)
}

/// Sunday and Saturday of the date's week
pub fn week_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let back = date.weekday().num_days_from_sunday() as u64;
    let start = date.checked_sub_days(Days::new(back))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some((start, end))
}

/// The 7-day-ahead window used for "next week" metrics:
/// date+7 through date+13, both inclusive
pub fn next_week_window(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = date.checked_add_days(Days::new(7))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some((start, end))
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}
