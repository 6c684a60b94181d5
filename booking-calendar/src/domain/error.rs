//! Domain error types.

use chrono::NaiveDate;

use crate::dates::DateError;

use super::BookingId;

/// Reasons a booking cannot be moved to another day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RescheduleError {
    /// Booking is not in the currently loaded list
    #[error("booking {0} is not in the current list")]
    UnknownBooking(BookingId),

    /// Booking is already underway
    #[error("booking {0} is in progress and cannot be moved")]
    NotReschedulable(BookingId),

    /// The move would put the return before the pickup
    #[error("moving booking {id} to {day} would end it before it starts")]
    EndBeforeStart { id: BookingId, day: NaiveDate },

    /// Date arithmetic left the calendar
    #[error(transparent)]
    Date(#[from] DateError),
}
