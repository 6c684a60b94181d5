//! The seam between the repository and the remote API.

use std::future::Future;

use crate::domain::{Booking, BookingId, Station, StationId};

use super::error::ApiError;

/// Request/response access to the booking backend.
///
/// This abstraction lets the repository run against the HTTP client, a
/// caching wrapper, or an in-memory fake in tests.
pub trait RemoteApi: Send + Sync {
    /// `GET /stations`
    fn get_stations(&self) -> impl Future<Output = Result<Vec<Station>, ApiError>> + Send;

    /// `GET /stations/{stationId}/bookings`
    ///
    /// The server may include bookings that belong to other stations.
    fn get_station_bookings(
        &self,
        station_id: &StationId,
    ) -> impl Future<Output = Result<Vec<Booking>, ApiError>> + Send;

    /// `GET /stations/{stationId}/bookings/{bookingId}`
    ///
    /// `Ok(None)` when the backend answers with nothing.
    fn get_booking(
        &self,
        station_id: &StationId,
        booking_id: &BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, ApiError>> + Send;
}
