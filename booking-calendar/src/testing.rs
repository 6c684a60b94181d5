//! In-memory fake of the booking API for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::api::{ApiError, RemoteApi};
use crate::dates::parse_iso;
use crate::domain::{Booking, BookingId, BookingType, Station, StationId};

pub(crate) fn station(id: &str, name: &str) -> Station {
    Station::new(id, name)
}

pub(crate) fn booking(id: &str, station_id: &str, start: &str, end: &str) -> Booking {
    Booking {
        id: BookingId::new(id),
        customer_name: format!("Customer {id}"),
        start_date: parse_iso(start).unwrap(),
        end_date: parse_iso(end).unwrap(),
        pickup_return_station_id: StationId::new(station_id),
        booking_type: None,
    }
}

pub(crate) fn typed_booking(
    id: &str,
    station_id: &str,
    start: &str,
    end: &str,
    kind: BookingType,
) -> Booking {
    Booking {
        booking_type: Some(kind),
        ..booking(id, station_id, start, end)
    }
}

/// A request that can be held back by a gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GateKey {
    Stations,
    BookingList(StationId),
    Booking(BookingId),
}

/// Serves canned stations and bookings, counting calls.
///
/// A gated request waits until the test releases the gate, which lets
/// tests force responses to resolve out of order. Each gate holds only the
/// next matching request.
#[derive(Default)]
pub(crate) struct FakeApi {
    stations: Vec<Station>,
    bookings: HashMap<StationId, Vec<Booking>>,
    details: HashMap<BookingId, Booking>,
    fail: AtomicBool,
    station_calls: AtomicUsize,
    booking_list_calls: AtomicUsize,
    booking_detail_calls: AtomicUsize,
    gates: Mutex<HashMap<GateKey, Arc<Notify>>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_stations(mut self, stations: Vec<Station>) -> Self {
        self.stations = stations;
        self
    }

    /// Bookings returned for `GET /stations/{station_id}/bookings`.
    pub(crate) fn with_bookings(mut self, station_id: &str, bookings: Vec<Booking>) -> Self {
        self.bookings.insert(StationId::new(station_id), bookings);
        self
    }

    /// A booking only reachable through the detail endpoint.
    pub(crate) fn with_detail(mut self, booking: Booking) -> Self {
        self.details.insert(booking.id.clone(), booking);
        self
    }

    pub(crate) fn fail_requests(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Hold the next station list request until the returned gate is notified.
    pub(crate) fn gate_stations(&self) -> Arc<Notify> {
        self.add_gate(GateKey::Stations)
    }

    /// Hold the next booking list request for `station_id`.
    pub(crate) fn gate_booking_list(&self, station_id: &str) -> Arc<Notify> {
        self.add_gate(GateKey::BookingList(StationId::new(station_id)))
    }

    /// Hold the next detail request for `booking_id`.
    pub(crate) fn gate_booking(&self, booking_id: &str) -> Arc<Notify> {
        self.add_gate(GateKey::Booking(BookingId::new(booking_id)))
    }

    fn add_gate(&self, key: GateKey) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(key, gate.clone());
        gate
    }

    async fn pass_gate(&self, key: GateKey) {
        let gate = self.gates.lock().unwrap().remove(&key);
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    pub(crate) fn station_calls(&self) -> usize {
        self.station_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn booking_list_calls(&self) -> usize {
        self.booking_list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn booking_detail_calls(&self) -> usize {
        self.booking_detail_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl RemoteApi for FakeApi {
    async fn get_stations(&self) -> Result<Vec<Station>, ApiError> {
        self.station_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(GateKey::Stations).await;
        self.check_failure()?;
        Ok(self.stations.clone())
    }

    async fn get_station_bookings(&self, station_id: &StationId) -> Result<Vec<Booking>, ApiError> {
        self.booking_list_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(GateKey::BookingList(station_id.clone())).await;
        self.check_failure()?;
        Ok(self.bookings.get(station_id).cloned().unwrap_or_default())
    }

    async fn get_booking(
        &self,
        station_id: &StationId,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, ApiError> {
        self.booking_detail_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(GateKey::Booking(booking_id.clone())).await;
        self.check_failure()?;

        let listed = self
            .bookings
            .get(station_id)
            .and_then(|list| list.iter().find(|b| &b.id == booking_id));
        Ok(listed.or_else(|| self.details.get(booking_id)).cloned())
    }
}
