//! Repository operations over the remote API.

use tracing::{error, warn};

use crate::api::RemoteApi;
use crate::dates::DateInterval;
use crate::domain::{Booking, BookingId, Station, StationId};

use super::directory::filter_by_name;
use super::error::RepositoryError;

/// Stateless access to stations and bookings.
///
/// Owns nothing but the API handle; every call is a fresh request.
pub struct BookingRepository<A> {
    api: A,
}

impl<A: RemoteApi> BookingRepository<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// All stations, narrowed by a case-insensitive name search when
    /// `search_term` is non-empty.
    pub async fn list_stations(&self, search_term: &str) -> Result<Vec<Station>, RepositoryError> {
        let stations = self.api.get_stations().await.map_err(|e| {
            error!(error = %e, "error fetching stations");
            e
        })?;

        Ok(filter_by_name(stations, search_term))
    }

    /// Bookings of `station_id` that share at least one day with `window`.
    pub async fn list_bookings_for_station_in_range(
        &self,
        station_id: &StationId,
        window: &DateInterval,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let bookings = self
            .api
            .get_station_bookings(station_id)
            .await
            .map_err(|e| {
                error!(error = %e, %station_id, "error fetching bookings");
                e
            })?;

        Ok(bookings_in_window(bookings, station_id, window))
    }

    /// A single booking.
    pub async fn get_booking_details(
        &self,
        station_id: &StationId,
        booking_id: &BookingId,
    ) -> Result<Booking, RepositoryError> {
        match self.api.get_booking(station_id, booking_id).await {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => {
                warn!(%station_id, %booking_id, "booking not found");
                Err(RepositoryError::NotFound {
                    station_id: station_id.clone(),
                    booking_id: booking_id.clone(),
                })
            }
            Err(e) => {
                error!(error = %e, %station_id, %booking_id, "error fetching booking details");
                Err(e.into())
            }
        }
    }
}

/// Keep bookings that belong to `station_id` and overlap `window`.
///
/// The bookings endpoint may return records of other stations, so station
/// membership is checked again here.
pub fn bookings_in_window(
    bookings: Vec<Booking>,
    station_id: &StationId,
    window: &DateInterval,
) -> Vec<Booking> {
    bookings
        .into_iter()
        .filter(|booking| &booking.pickup_return_station_id == station_id)
        .filter(|booking| booking.overlaps(window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, booking, station};

    fn window() -> DateInterval {
        DateInterval::new("2024-06-03", "2024-06-09T23:59:59.999").unwrap()
    }

    fn ids(bookings: &[Booking]) -> Vec<&str> {
        bookings.iter().map(|b| b.id.as_str()).collect()
    }

    fn repository() -> BookingRepository<FakeApi> {
        let api = FakeApi::new()
            .with_stations(vec![
                station("1", "Berlin"),
                station("2", "Hamburg"),
                station("3", "Bern"),
            ])
            .with_bookings(
                "1",
                vec![
                    booking("before", "1", "2024-05-20", "2024-05-25"),
                    booking("touching", "1", "2024-05-30", "2024-06-03"),
                    booking("inside", "1", "2024-06-05", "2024-06-06"),
                    booking("after", "1", "2024-06-10", "2024-06-12"),
                    booking("elsewhere", "2", "2024-06-05", "2024-06-06"),
                ],
            );
        BookingRepository::new(api)
    }

    #[test]
    fn window_filter_rechecks_station() {
        let bookings = vec![
            booking("mine", "1", "2024-06-04", "2024-06-04"),
            booking("theirs", "2", "2024-06-04", "2024-06-04"),
        ];
        let kept = bookings_in_window(bookings, &StationId::new("1"), &window());
        assert_eq!(ids(&kept), ["mine"]);
    }

    #[test]
    fn window_filter_keeps_spanning_bookings() {
        let bookings = vec![booking("long", "1", "2024-05-01", "2024-07-01")];
        let kept = bookings_in_window(bookings, &StationId::new("1"), &window());
        assert_eq!(ids(&kept), ["long"]);
    }

    #[tokio::test]
    async fn lists_bookings_overlapping_the_window() {
        let repo = repository();
        let bookings = repo
            .list_bookings_for_station_in_range(&StationId::new("1"), &window())
            .await
            .unwrap();

        assert_eq!(ids(&bookings), ["touching", "inside"]);
    }

    #[tokio::test]
    async fn unknown_station_has_no_bookings() {
        let repo = repository();
        let bookings = repo
            .list_bookings_for_station_in_range(&StationId::new("99"), &window())
            .await
            .unwrap();
        assert!(bookings.is_empty());
    }

    #[tokio::test]
    async fn lists_and_searches_stations() {
        let repo = repository();
        assert_eq!(repo.list_stations("").await.unwrap().len(), 3);

        let found = repo.list_stations("ber").await.unwrap();
        let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Berlin", "Bern"]);
    }

    #[tokio::test]
    async fn transport_failures_are_network_errors() {
        let repo = repository();
        repo.api().fail_requests(true);

        assert!(matches!(
            repo.list_stations("").await,
            Err(RepositoryError::Network(_))
        ));
        assert!(matches!(
            repo.list_bookings_for_station_in_range(&StationId::new("1"), &window())
                .await,
            Err(RepositoryError::Network(_))
        ));
        assert!(matches!(
            repo.get_booking_details(&StationId::new("1"), &BookingId::new("inside"))
                .await,
            Err(RepositoryError::Network(_))
        ));
    }

    #[tokio::test]
    async fn booking_details() {
        let repo = repository();
        let found = repo
            .get_booking_details(&StationId::new("1"), &BookingId::new("inside"))
            .await
            .unwrap();
        assert_eq!(found.id.as_str(), "inside");
    }

    #[tokio::test]
    async fn missing_booking_is_not_found() {
        let repo = repository();
        let err = repo
            .get_booking_details(&StationId::new("1"), &BookingId::new("nope"))
            .await
            .unwrap_err();

        match err {
            RepositoryError::NotFound {
                station_id,
                booking_id,
            } => {
                assert_eq!(station_id.as_str(), "1");
                assert_eq!(booking_id.as_str(), "nope");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
