//! Observable station store.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error};

use crate::api::RemoteApi;
use crate::domain::Station;
use crate::repository::BookingRepository;

use super::request::{InFlight, RequestSequence, RequestState};

/// Shown when the station list cannot be loaded.
pub const FETCH_STATIONS_FAILED: &str = "Failed to fetch stations. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationSnapshot {
    /// Result of the latest successful search.
    pub stations: Vec<Station>,
    pub selected_station: Option<Station>,
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestState for StationSnapshot {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// Station search results and the user's station selection.
///
/// Follows the same rules as [`BookingState`](super::BookingState): errors
/// go into the snapshot, and only the newest search may write results.
pub struct StationState<A> {
    repository: Arc<BookingRepository<A>>,
    state: watch::Sender<StationSnapshot>,
    in_flight: InFlight,
    searches: RequestSequence,
}

impl<A: RemoteApi> StationState<A> {
    pub fn new(repository: Arc<BookingRepository<A>>) -> Self {
        let (state, _) = watch::channel(StationSnapshot::default());
        Self {
            repository,
            state,
            in_flight: InFlight::default(),
            searches: RequestSequence::default(),
        }
    }

    pub fn snapshot(&self) -> StationSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StationSnapshot> {
        self.state.subscribe()
    }

    /// Search stations by name; an empty term lists all of them.
    ///
    /// Returns the matches, or an empty list on failure, in which case the
    /// previous results stay in the store.
    pub async fn fetch_stations(&self, search_term: &str) -> Vec<Station> {
        let ticket = self.searches.issue();
        let _loading = self.in_flight.begin(&self.state);

        let result = self.repository.list_stations(search_term).await;

        if !self.searches.is_latest(ticket) {
            debug!(search_term, "discarding stale station search response");
            return result.unwrap_or_default();
        }

        match result {
            Ok(stations) => {
                let found = stations.clone();
                self.state.send_modify(|s| s.stations = found);
                stations
            }
            Err(e) => {
                error!(error = %e, search_term, "error in fetch_stations");
                self.state
                    .send_modify(|s| s.error = Some(FETCH_STATIONS_FAILED.to_string()));
                Vec::new()
            }
        }
    }

    /// Select a station; it need not be among the loaded results.
    pub fn set_selected_station(&self, station: Station) {
        debug!(station_id = %station.id, "station selected");
        self.state.send_modify(|s| s.selected_station = Some(station));
    }

    pub fn clear_selected_station(&self) {
        self.state.send_modify(|s| s.selected_station = None);
    }
}
