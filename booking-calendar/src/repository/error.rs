//! Repository error types.

use crate::api::ApiError;
use crate::domain::{BookingId, StationId};

/// Errors surfaced by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The remote API could not be reached or answered with a failure
    #[error("network error: {0}")]
    Network(#[from] ApiError),

    /// The request succeeded but no such booking exists
    #[error("booking {booking_id} not found at station {station_id}")]
    NotFound {
        station_id: StationId,
        booking_id: BookingId,
    },
}
