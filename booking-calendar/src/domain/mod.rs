//! Domain types for the booking calendar.
//!
//! Stations and bookings as the remote API describes them, with dates
//! already normalized. Identity is by id throughout.

mod booking;
mod error;
mod ids;
mod station;

pub use booking::{Booking, BookingType};
pub use error::RescheduleError;
pub use ids::{BookingId, StationId};
pub use station::Station;
