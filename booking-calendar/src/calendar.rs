//! Week navigation and the per-day view of a week's bookings.

use chrono::{NaiveDate, Utc};

use crate::dates::{self, DateError, DateInterval, ToDateTime, Week, WeekDay};
use crate::domain::Booking;

/// The date the calendar is showing.
///
/// Only the anchor is stored; the visible week is derived from it. The
/// calendar runs on UTC days, the same days booking timestamps are
/// normalized to, so "today" is the current UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCursor {
    anchor: NaiveDate,
}

impl WeekCursor {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    /// A cursor on the current UTC date.
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn go_to(&mut self, date: impl ToDateTime) -> Result<(), DateError> {
        self.anchor = date.to_datetime()?.date();
        Ok(())
    }

    pub fn go_to_today(&mut self) {
        *self = Self::today();
    }

    pub fn next_week(&mut self) -> Result<(), DateError> {
        self.anchor = dates::next_week(self.anchor)?.date();
        Ok(())
    }

    pub fn previous_week(&mut self) -> Result<(), DateError> {
        self.anchor = dates::previous_week(self.anchor)?.date();
        Ok(())
    }

    /// Jump to a month of the anchor's year; see [`dates::change_month`].
    pub fn change_month(&mut self, month_index: i32) -> Result<(), DateError> {
        self.anchor = dates::change_month(self.anchor, month_index)?.date();
        Ok(())
    }

    pub fn change_year(&mut self, year: i32) -> Result<(), DateError> {
        self.anchor = dates::change_year(self.anchor, year)?.date();
        Ok(())
    }

    pub fn week(&self) -> Result<Week, DateError> {
        Week::containing(self.anchor)
    }

    /// The range to fetch bookings for: the visible week, whole days.
    pub fn window(&self) -> Result<DateInterval, DateError> {
        Ok(self.week()?.interval())
    }

    /// E.g. "Jun 3, 2024 - Jun 9, 2024".
    pub fn label(&self) -> Result<String, DateError> {
        let week = self.week()?;
        dates::formatted_date_range(week.start(), week.end())
    }
}

impl Default for WeekCursor {
    fn default() -> Self {
        Self::today()
    }
}

/// The bookings that change hands on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub day: WeekDay,
    /// Bookings starting on this day.
    pub pickups: Vec<Booking>,
    /// Bookings ending on this day.
    pub returns: Vec<Booking>,
}

impl DaySchedule {
    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty() && self.returns.is_empty()
    }
}

/// Lay out `bookings` over the days of `week`.
///
/// A booking shows up as a pickup on its start day and as a return on its
/// end day, when those days fall in the week. Bookings spanning the whole
/// week appear on no day. Input order is kept within each list.
pub fn week_schedule(week: &Week, bookings: &[Booking]) -> Vec<DaySchedule> {
    week.iter()
        .map(|day| DaySchedule {
            day: day.clone(),
            pickups: bookings
                .iter()
                .filter(|b| b.start_date.date() == day.date)
                .cloned()
                .collect(),
            returns: bookings
                .iter()
                .filter(|b| b.end_date.date() == day.date)
                .cloned()
                .collect(),
        })
        .collect()
}
