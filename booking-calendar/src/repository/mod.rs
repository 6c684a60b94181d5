//! Booking repository.
//!
//! Stateless request/response operations over a [`RemoteApi`](crate::api::RemoteApi):
//! station search, bookings in a date window, and single booking lookup.
//! Failures are logged here and returned to the caller.

mod bookings;
mod directory;
mod error;

pub use bookings::{BookingRepository, bookings_in_window};
pub use directory::filter_by_name;
pub use error::RepositoryError;
