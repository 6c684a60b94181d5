//! Observable application state.
//!
//! Each store wraps a `tokio::sync::watch` channel holding an immutable
//! snapshot. Actions are the only writers; views read snapshots or
//! subscribe for changes.

mod booking_state;
mod request;
mod station_state;

pub use booking_state::{
    BookingSnapshot, BookingState, FETCH_BOOKING_DETAILS_FAILED, FETCH_BOOKINGS_FAILED,
};
pub use station_state::{FETCH_STATIONS_FAILED, StationSnapshot, StationState};
