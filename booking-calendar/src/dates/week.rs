//! Monday-start calendar weeks.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use super::error::DateError;
use super::input::ToDateTime;
use super::range::DateInterval;

/// One day of a calendar week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub day_name: String,
    /// Day of the month.
    pub day_number: u32,
    /// `yyyy-MM-dd`.
    pub formatted_date: String,
}

impl WeekDay {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            day_name: date.format("%a").to_string(),
            day_number: date.day(),
            formatted_date: date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Seven consecutive days, Monday first.
///
/// Derived on demand from an anchor date and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    days: [WeekDay; 7],
}

impl Week {
    /// The week containing `anchor`.
    pub fn containing(anchor: NaiveDate) -> Result<Self, DateError> {
        let monday = anchor
            .checked_sub_days(Days::new(u64::from(anchor.weekday().num_days_from_monday())))
            .ok_or(DateError::OutOfRange)?;

        let days: Vec<WeekDay> = monday.iter_days().take(7).map(WeekDay::new).collect();
        let days: [WeekDay; 7] = days.try_into().map_err(|_| DateError::OutOfRange)?;

        Ok(Self { days })
    }

    pub fn days(&self) -> &[WeekDay; 7] {
        &self.days
    }

    /// The Monday.
    pub fn start(&self) -> NaiveDate {
        self.days[0].date
    }

    /// The Sunday.
    pub fn end(&self) -> NaiveDate {
        self.days[6].date
    }

    /// Monday 00:00 to Sunday 23:59:59.999.
    pub fn interval(&self) -> DateInterval {
        DateInterval::whole_days(self.start(), self.end())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeekDay> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a Week {
    type Item = &'a WeekDay;
    type IntoIter = std::slice::Iter<'a, WeekDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// The Monday-start week containing `anchor`.
///
/// # Examples
///
/// ```
/// use booking_calendar::dates::week_days;
///
/// // 2024-06-06 is a Thursday
/// let week = week_days("2024-06-06").unwrap();
/// assert_eq!(week.days()[0].formatted_date, "2024-06-03");
/// assert_eq!(week.days()[0].day_name, "Mon");
/// assert_eq!(week.days()[6].formatted_date, "2024-06-09");
/// ```
pub fn week_days(anchor: impl ToDateTime) -> Result<Week, DateError> {
    Week::containing(anchor.to_datetime()?.date())
}

/// Shift forward exactly seven days, keeping the time of day.
pub fn next_week(date: impl ToDateTime) -> Result<NaiveDateTime, DateError> {
    date.to_datetime()?
        .checked_add_days(Days::new(7))
        .ok_or(DateError::OutOfRange)
}

/// Shift back exactly seven days, keeping the time of day.
pub fn previous_week(date: impl ToDateTime) -> Result<NaiveDateTime, DateError> {
    date.to_datetime()?
        .checked_sub_days(Days::new(7))
        .ok_or(DateError::OutOfRange)
}
