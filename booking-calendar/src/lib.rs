//! Booking calendar core.
//!
//! Weekly pickup/return calendar for a vehicle rental company: date
//! utilities, a repository over the remote booking API, and observable
//! stores for stations and bookings.

pub mod api;
pub mod cache;
pub mod calendar;
pub mod dates;
pub mod domain;
pub mod repository;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;
