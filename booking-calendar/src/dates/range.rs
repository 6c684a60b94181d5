//! Inclusive date intervals and overlap testing.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::error::DateError;
use super::input::ToDateTime;

/// An inclusive `[start, end]` interval of date-times.
///
/// No ordering is enforced: an interval whose end precedes its start simply
/// contains nothing and overlaps according to the raw comparisons. Callers
/// validate ordering where it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateInterval {
    /// Build an interval from any pair of date inputs.
    pub fn new(start: impl ToDateTime, end: impl ToDateTime) -> Result<Self, DateError> {
        Ok(Self {
            start: start.to_datetime()?,
            end: end.to_datetime()?,
        })
    }

    /// Build an interval from already-normalized values.
    pub fn from_datetimes(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole calendar days: midnight of `first` to the last millisecond of `last`.
    pub fn whole_days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: end_of_day(last),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether two intervals share at least one day.
    ///
    /// Intervals overlap iff each one starts no later than the other ends,
    /// where "no later" also holds whenever the two instants fall on the
    /// same calendar day. Touching endpoints therefore overlap, which is
    /// what booking conflict detection needs.
    pub fn overlaps(&self, other: &DateInterval) -> bool {
        let starts_before_other_ends =
            self.start < other.end || same_day(self.start, other.end);
        let ends_after_other_starts =
            self.end > other.start || same_day(self.end, other.start);

        starts_before_other_ends && ends_after_other_starts
    }

    /// Whether `instant` lies within the interval, bounds included.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }
}

fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// The last representable millisecond of `date`.
pub(crate) fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // Wraps backwards from 00:00 to 23:59:59.999 without touching the date.
    let (last_milli, _) = NaiveTime::MIN.overflowing_sub_signed(Duration::milliseconds(1));
    date.and_time(last_milli)
}
