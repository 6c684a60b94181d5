//! Date arithmetic, formatting, and interval overlap.
//!
//! Pure functions over calendar dates. Each accepts anything implementing
//! [`ToDateTime`] (ISO-8601 strings or chrono values) and normalizes it once
//! on entry; unparseable input fails with [`DateError`].

mod error;
mod input;
mod pattern;
mod range;
mod week;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

pub use error::DateError;
pub use input::{ToDateTime, parse_iso};
pub use pattern::DatePattern;
pub use range::DateInterval;
pub use week::{Week, WeekDay, next_week, previous_week, week_days};

/// Pattern used when no other is given.
pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd";

/// Pattern for each end of [`formatted_date_range`].
const RANGE_PATTERN: &str = "MMM d, yyyy";

/// Format a date with a pattern such as `"EEE d MMM"`.
pub fn format_date(date: impl ToDateTime, pattern: &str) -> Result<String, DateError> {
    let datetime = date.to_datetime()?;
    Ok(DatePattern::parse(pattern)?.format(datetime))
}

/// Format a date as `yyyy-MM-dd`.
pub fn format_ymd(date: impl ToDateTime) -> Result<String, DateError> {
    format_date(date, DEFAULT_PATTERN)
}

/// Whole days from `start` to `end`, truncated toward zero.
///
/// Negative when `end` precedes `start`; ordering is the caller's concern.
///
/// ```
/// use booking_calendar::dates::calculate_duration;
///
/// assert_eq!(calculate_duration("2024-01-01", "2024-01-05").unwrap(), 4);
/// assert_eq!(calculate_duration("2024-01-05", "2024-01-01").unwrap(), -4);
/// ```
pub fn calculate_duration(start: impl ToDateTime, end: impl ToDateTime) -> Result<i64, DateError> {
    let start = start.to_datetime()?;
    let end = end.to_datetime()?;
    Ok(end.signed_duration_since(start).num_days())
}

/// Whether `date` lies in `[start, end]`, both bounds included.
pub fn is_date_in_range(
    date: impl ToDateTime,
    start: impl ToDateTime,
    end: impl ToDateTime,
) -> Result<bool, DateError> {
    let instant = date.to_datetime()?;
    Ok(DateInterval::new(start, end)?.contains(instant))
}

/// Render `"Jun 1, 2024 - Jun 7, 2024"`.
pub fn formatted_date_range(
    start: impl ToDateTime,
    end: impl ToDateTime,
) -> Result<String, DateError> {
    let pattern = DatePattern::parse(RANGE_PATTERN)?;
    Ok(format!(
        "{} - {}",
        pattern.format(start.to_datetime()?),
        pattern.format(end.to_datetime()?)
    ))
}

/// Replace the month, given as a zero-based index.
///
/// Indices outside `0..12` carry into neighbouring years (12 is January of
/// the following year, -1 December of the previous one). The day of month
/// is not clamped: January 31 moved to February rolls over into March.
pub fn change_month(date: impl ToDateTime, month_index: i32) -> Result<NaiveDateTime, DateError> {
    let datetime = date.to_datetime()?;
    let months = datetime
        .year()
        .checked_mul(12)
        .and_then(|m| m.checked_add(month_index))
        .ok_or(DateError::OutOfRange)?;

    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    rolled_date(year, month, datetime.day(), datetime.time())
}

/// Replace the year. February 29 in a non-leap year rolls over to March 1.
pub fn change_year(date: impl ToDateTime, year: i32) -> Result<NaiveDateTime, DateError> {
    let datetime = date.to_datetime()?;
    rolled_date(year, datetime.month(), datetime.day(), datetime.time())
}

/// Day `day` of the given month, letting excess days spill into later months.
fn rolled_date(year: i32, month: u32, day: u32, time: NaiveTime) -> Result<NaiveDateTime, DateError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(day - 1))))
        .map(|date| date.and_time(time))
        .ok_or(DateError::OutOfRange)
}

/// First instant to last millisecond of the month containing `date`.
pub fn month_range(date: impl ToDateTime) -> Result<DateInterval, DateError> {
    let date = date.to_datetime()?.date();
    let first = date.with_day(1).ok_or(DateError::OutOfRange)?;
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(DateError::OutOfRange)?;
    Ok(DateInterval::whole_days(first, last))
}

/// Whether `[start_a, end_a]` and `[start_b, end_b]` share at least one day.
///
/// Touching endpoints count as overlapping.
///
/// ```
/// use booking_calendar::dates::check_date_range_overlap;
///
/// assert!(check_date_range_overlap("2024-06-01", "2024-06-05", "2024-06-05", "2024-06-10").unwrap());
/// assert!(!check_date_range_overlap("2024-06-01", "2024-06-05", "2024-06-06", "2024-06-10").unwrap());
/// ```
pub fn check_date_range_overlap(
    start_a: impl ToDateTime,
    end_a: impl ToDateTime,
    start_b: impl ToDateTime,
    end_b: impl ToDateTime,
) -> Result<bool, DateError> {
    let a = DateInterval::new(start_a, end_a)?;
    let b = DateInterval::new(start_b, end_b)?;
    Ok(a.overlaps(&b))
}
