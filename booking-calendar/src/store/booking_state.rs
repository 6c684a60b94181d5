//! Observable booking store.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::api::RemoteApi;
use crate::dates::DateInterval;
use crate::domain::{Booking, BookingId, RescheduleError, StationId};
use crate::repository::BookingRepository;

use super::request::{InFlight, RequestSequence, RequestState};

/// Shown when the booking list cannot be loaded.
pub const FETCH_BOOKINGS_FAILED: &str = "Failed to fetch bookings. Please try again.";

/// Shown when a single booking cannot be loaded.
pub const FETCH_BOOKING_DETAILS_FAILED: &str =
    "Failed to fetch booking details. Please try again.";

/// Everything the calendar view reads about bookings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSnapshot {
    /// Bookings of the visible station and week, in API order.
    pub bookings: Vec<Booking>,
    pub selected_booking: Option<Booking>,
    pub loading: bool,
    /// User-facing message of the last failed action.
    pub error: Option<String>,
}

impl RequestState for BookingSnapshot {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// Booking state for one session.
///
/// State is only changed by the actions below. Readers take a
/// [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe) to
/// changes. Actions never return errors: failures land in
/// `BookingSnapshot::error` and the action returns an empty value.
///
/// Overlapping fetches are allowed. A response is applied only if no newer
/// request of the same action was issued meanwhile, so a slow answer for a
/// previous station or week never overwrites the current one.
pub struct BookingState<A> {
    repository: Arc<BookingRepository<A>>,
    state: watch::Sender<BookingSnapshot>,
    in_flight: InFlight,
    list_requests: RequestSequence,
    detail_requests: RequestSequence,
}

impl<A: RemoteApi> BookingState<A> {
    pub fn new(repository: Arc<BookingRepository<A>>) -> Self {
        let (state, _) = watch::channel(BookingSnapshot::default());
        Self {
            repository,
            state,
            in_flight: InFlight::default(),
            list_requests: RequestSequence::default(),
            detail_requests: RequestSequence::default(),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> BookingSnapshot {
        self.state.borrow().clone()
    }

    /// Receive every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<BookingSnapshot> {
        self.state.subscribe()
    }

    /// Load the station's bookings overlapping `window` into the store.
    ///
    /// Returns the fetched bookings, or an empty list on failure. On failure
    /// the previously loaded bookings stay in place, so the view may keep
    /// showing stale entries next to the error message.
    pub async fn fetch_bookings_by_station_and_date_range(
        &self,
        station_id: &StationId,
        window: &DateInterval,
    ) -> Vec<Booking> {
        let ticket = self.list_requests.issue();
        let _loading = self.in_flight.begin(&self.state);

        let result = self
            .repository
            .list_bookings_for_station_in_range(station_id, window)
            .await;

        if !self.list_requests.is_latest(ticket) {
            debug!(%station_id, "discarding stale booking list response");
            return result.unwrap_or_default();
        }

        match result {
            Ok(bookings) => {
                let loaded = bookings.clone();
                self.state.send_modify(|s| s.bookings = loaded);
                bookings
            }
            Err(e) => {
                error!(error = %e, %station_id, "error in fetch_bookings_by_station_and_date_range");
                self.state
                    .send_modify(|s| s.error = Some(FETCH_BOOKINGS_FAILED.to_string()));
                Vec::new()
            }
        }
    }

    /// Load one booking and make it the selection.
    ///
    /// The booking need not be in the loaded list. On failure the current
    /// selection is kept and `None` returned.
    pub async fn get_booking_details(
        &self,
        station_id: &StationId,
        booking_id: &BookingId,
    ) -> Option<Booking> {
        let ticket = self.detail_requests.issue();
        let _loading = self.in_flight.begin(&self.state);

        let result = self
            .repository
            .get_booking_details(station_id, booking_id)
            .await;

        if !self.detail_requests.is_latest(ticket) {
            debug!(%station_id, %booking_id, "discarding stale booking details response");
            return result.ok();
        }

        match result {
            Ok(booking) => {
                let selected = booking.clone();
                self.state
                    .send_modify(|s| s.selected_booking = Some(selected));
                Some(booking)
            }
            Err(e) => {
                error!(error = %e, %station_id, %booking_id, "error in get_booking_details");
                self.state
                    .send_modify(|s| s.error = Some(FETCH_BOOKING_DETAILS_FAILED.to_string()));
                None
            }
        }
    }

    pub fn clear_selected_booking(&self) {
        self.state.send_modify(|s| s.selected_booking = None);
    }

    /// Select a booking from the loaded list; an unknown id clears the selection.
    pub fn set_selected_booking(&self, booking_id: &BookingId) {
        self.state.send_modify(|s| {
            s.selected_booking = s.bookings.iter().find(|b| &b.id == booking_id).cloned();
        });
    }

    /// Replace the loaded booking with the same id by `updated`.
    ///
    /// Local only: nothing is sent to the backend, and the next fetch
    /// replaces the change with the server's version. Returns whether a
    /// booking was replaced.
    pub fn reschedule_booking(&self, updated: Booking) -> bool {
        let id = updated.id.clone();
        let replaced = self.state.send_if_modified(|s| {
            match s.bookings.iter_mut().find(|b| b.id == updated.id) {
                Some(slot) => {
                    *slot = updated;
                    true
                }
                None => false,
            }
        });

        if replaced {
            debug!(booking_id = %id, "booking rescheduled locally");
        }
        replaced
    }

    /// Move a loaded booking to another day, as a drag-and-drop would.
    ///
    /// See [`Booking::rescheduled_to`] for which date moves. Applied through
    /// [`reschedule_booking`](Self::reschedule_booking), so equally local.
    pub fn move_booking(
        &self,
        booking_id: &BookingId,
        day: NaiveDate,
    ) -> Result<Booking, RescheduleError> {
        let current = self
            .state
            .borrow()
            .bookings
            .iter()
            .find(|b| &b.id == booking_id)
            .cloned()
            .ok_or_else(|| RescheduleError::UnknownBooking(booking_id.clone()))?;

        let moved = current.rescheduled_to(day)?;
        self.reschedule_booking(moved.clone());
        Ok(moved)
    }
}
