//! One user's calendar session.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::RemoteApi;
use crate::calendar::{DaySchedule, WeekCursor, week_schedule};
use crate::dates::{DateError, ToDateTime};
use crate::domain::{Booking, Station};
use crate::repository::BookingRepository;
use crate::store::{BookingState, StationState};

/// Ties the stores to the visible week.
///
/// Both stores share one repository. Navigation moves the cursor and
/// reloads the selected station's bookings for the new week.
pub struct CalendarSession<A> {
    repository: Arc<BookingRepository<A>>,
    stations: StationState<A>,
    bookings: BookingState<A>,
    cursor: WeekCursor,
}

impl<A: RemoteApi> CalendarSession<A> {
    /// A session showing the current week.
    pub fn new(api: A) -> Self {
        Self::with_cursor(api, WeekCursor::today())
    }

    pub fn with_cursor(api: A, cursor: WeekCursor) -> Self {
        let repository = Arc::new(BookingRepository::new(api));
        Self {
            stations: StationState::new(repository.clone()),
            bookings: BookingState::new(repository.clone()),
            repository,
            cursor,
        }
    }

    pub fn repository(&self) -> &BookingRepository<A> {
        &self.repository
    }

    pub fn stations(&self) -> &StationState<A> {
        &self.stations
    }

    pub fn bookings(&self) -> &BookingState<A> {
        &self.bookings
    }

    pub fn cursor(&self) -> WeekCursor {
        self.cursor
    }

    /// Select a station and load its bookings for the visible week.
    pub async fn select_station(&self, station: Station) -> Vec<Booking> {
        self.stations.set_selected_station(station);
        self.bookings.clear_selected_booking();
        self.load_visible_week().await
    }

    /// Fetch the selected station's bookings for the visible week.
    ///
    /// Without a selected station nothing is fetched.
    pub async fn load_visible_week(&self) -> Vec<Booking> {
        let Some(station) = self.stations.snapshot().selected_station else {
            debug!("no station selected, skipping booking load");
            return Vec::new();
        };

        let window = match self.cursor.window() {
            Ok(window) => window,
            Err(e) => {
                warn!(error = %e, anchor = %self.cursor.anchor(), "visible week out of range");
                return Vec::new();
            }
        };

        self.bookings
            .fetch_bookings_by_station_and_date_range(&station.id, &window)
            .await
    }

    pub async fn next_week(&mut self) -> Result<Vec<Booking>, DateError> {
        self.cursor.next_week()?;
        Ok(self.load_visible_week().await)
    }

    pub async fn previous_week(&mut self) -> Result<Vec<Booking>, DateError> {
        self.cursor.previous_week()?;
        Ok(self.load_visible_week().await)
    }

    pub async fn go_to(&mut self, date: impl ToDateTime) -> Result<Vec<Booking>, DateError> {
        self.cursor.go_to(date)?;
        Ok(self.load_visible_week().await)
    }

    pub async fn go_to_today(&mut self) -> Vec<Booking> {
        self.cursor.go_to_today();
        self.load_visible_week().await
    }

    pub async fn change_month(&mut self, month_index: i32) -> Result<Vec<Booking>, DateError> {
        self.cursor.change_month(month_index)?;
        Ok(self.load_visible_week().await)
    }

    pub async fn change_year(&mut self, year: i32) -> Result<Vec<Booking>, DateError> {
        self.cursor.change_year(year)?;
        Ok(self.load_visible_week().await)
    }

    /// Loaded bookings laid out over the visible week.
    pub fn schedule(&self) -> Result<Vec<DaySchedule>, DateError> {
        let week = self.cursor.week()?;
        Ok(week_schedule(&week, &self.bookings.snapshot().bookings))
    }
}
