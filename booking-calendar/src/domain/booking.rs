//! Vehicle bookings.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::dates::{DateError, DateInterval};

use super::error::RescheduleError;
use super::ids::{BookingId, StationId};

/// What a booking represents on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    Pickup,
    Return,
    InProgress,
    /// Any value this client does not know about.
    #[serde(other)]
    Other,
}

/// A reservation tying a customer to a pickup/return window at a station.
///
/// Dates arrive as ISO-8601 strings and are parsed once, on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub customer_name: String,
    #[serde(with = "iso_datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "iso_datetime")]
    pub end_date: NaiveDateTime,
    pub pickup_return_station_id: StationId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub booking_type: Option<BookingType>,
}

impl Booking {
    /// The booking's `[start, end]` interval.
    pub fn interval(&self) -> DateInterval {
        DateInterval::from_datetimes(self.start_date, self.end_date)
    }

    /// Whether the booking shares at least one day with `window`.
    pub fn overlaps(&self, window: &DateInterval) -> bool {
        self.interval().overlaps(window)
    }

    /// Start no later than end, compared by calendar day.
    pub fn is_well_formed(&self) -> bool {
        self.start_date.date() <= self.end_date.date()
    }

    /// In-progress bookings are already underway and stay put.
    pub fn is_reschedulable(&self) -> bool {
        self.booking_type != Some(BookingType::InProgress)
    }

    /// Whole days between start and end.
    pub fn duration_days(&self) -> i64 {
        self.end_date.signed_duration_since(self.start_date).num_days()
    }

    /// A copy of this booking moved to `day`, as when dropped on a calendar day.
    ///
    /// Pickups move their start date, returns their end date. Untyped
    /// bookings move as a whole, keeping their length. Time of day is
    /// always preserved.
    pub fn rescheduled_to(&self, day: NaiveDate) -> Result<Booking, RescheduleError> {
        if !self.is_reschedulable() {
            return Err(RescheduleError::NotReschedulable(self.id.clone()));
        }

        let mut moved = self.clone();
        match self.booking_type {
            Some(BookingType::Pickup) => {
                moved.start_date = shift_to_day(self.start_date, day)?;
            }
            Some(BookingType::Return) => {
                moved.end_date = shift_to_day(self.end_date, day)?;
            }
            _ => {
                let days = (day - self.start_date.date()).num_days();
                moved.start_date = shift_by_days(self.start_date, days)?;
                moved.end_date = shift_by_days(self.end_date, days)?;
            }
        }

        if !moved.is_well_formed() {
            return Err(RescheduleError::EndBeforeStart {
                id: self.id.clone(),
                day,
            });
        }

        Ok(moved)
    }
}

fn shift_to_day(instant: NaiveDateTime, day: NaiveDate) -> Result<NaiveDateTime, DateError> {
    shift_by_days(instant, (day - instant.date()).num_days())
}

fn shift_by_days(instant: NaiveDateTime, days: i64) -> Result<NaiveDateTime, DateError> {
    instant
        .checked_add_signed(Duration::days(days))
        .ok_or(DateError::OutOfRange)
}

/// A `null` name decodes like a missing one.
fn null_as_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde adapter: ISO-8601 in, RFC 3339 UTC with milliseconds out.
mod iso_datetime {
    use chrono::{NaiveDateTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::dates::parse_iso;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_iso(&raw).map_err(de::Error::custom)
    }
}
