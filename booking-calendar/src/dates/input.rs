//! Normalization of date inputs.
//!
//! Every public date function accepts either a chrono value or an ISO-8601
//! string. Inputs are normalized once, at the boundary, into a
//! `NaiveDateTime`; nothing downstream compares raw strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use super::error::DateError;

/// Date-time layouts tried after RFC 3339, in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// A value that can be normalized into a calendar date-time.
pub trait ToDateTime {
    /// Normalize into a naive date-time.
    fn to_datetime(&self) -> Result<NaiveDateTime, DateError>;
}

impl ToDateTime for str {
    fn to_datetime(&self) -> Result<NaiveDateTime, DateError> {
        parse_iso(self)
    }
}

impl ToDateTime for String {
    fn to_datetime(&self) -> Result<NaiveDateTime, DateError> {
        parse_iso(self)
    }
}

impl ToDateTime for NaiveDateTime {
    fn to_datetime(&self) -> Result<NaiveDateTime, DateError> {
        Ok(*self)
    }
}

impl ToDateTime for NaiveDate {
    fn to_datetime(&self) -> Result<NaiveDateTime, DateError> {
        Ok(self.and_time(NaiveTime::MIN))
    }
}

/// Zoned values are converted to UTC before the offset is dropped.
impl<Tz: TimeZone> ToDateTime for DateTime<Tz> {
    fn to_datetime(&self) -> Result<NaiveDateTime, DateError> {
        Ok(self.naive_utc())
    }
}

impl<T: ToDateTime + ?Sized> ToDateTime for &T {
    fn to_datetime(&self) -> Result<NaiveDateTime, DateError> {
        (**self).to_datetime()
    }
}

/// Parse an ISO-8601 date or date-time string.
///
/// Accepts RFC 3339 timestamps (converted to UTC), offset-less date-times,
/// and plain `yyyy-MM-dd` dates (taken as midnight).
///
/// # Examples
///
/// ```
/// use booking_calendar::dates::parse_iso;
///
/// let midnight = parse_iso("2024-06-01").unwrap();
/// assert_eq!(midnight.to_string(), "2024-06-01 00:00:00");
///
/// let utc = parse_iso("2024-06-01T10:30:00+02:00").unwrap();
/// assert_eq!(utc.to_string(), "2024-06-01 08:30:00");
///
/// assert!(parse_iso("June 1st").is_err());
/// ```
pub fn parse_iso(input: &str) -> Result<NaiveDateTime, DateError> {
    let trimmed = input.trim();

    if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(zoned.naive_utc());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| DateError::Unparseable {
            input: input.to_string(),
        })
}
