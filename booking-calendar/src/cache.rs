//! Caching layer for booking API responses.
//!
//! Station lists and per-station booking lists are re-requested on every
//! station switch and week navigation; they are cached with a short TTL.
//! Single booking lookups always go to the backend.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::api::{ApiError, RemoteApi};
use crate::domain::{Booking, BookingId, Station, StationId};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached booking lists.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 100,
        }
    }
}

/// Remote API with response caching.
///
/// Wraps any [`RemoteApi`] and caches the station list and each station's
/// booking list. Failed requests are never cached.
pub struct CachedApi<A> {
    inner: A,
    stations: MokaCache<(), Arc<Vec<Station>>>,
    bookings: MokaCache<StationId, Arc<Vec<Booking>>>,
}

impl<A: RemoteApi> CachedApi<A> {
    /// Create a new cached API.
    pub fn new(inner: A, config: &CacheConfig) -> Self {
        let stations = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();
        let bookings = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            stations,
            bookings,
        }
    }

    /// Access the wrapped API for requests that bypass the cache.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Drop the cached booking list of one station.
    pub async fn invalidate_station(&self, station_id: &StationId) {
        self.bookings.invalidate(station_id).await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
        self.bookings.invalidate_all();
    }
}

impl<A: RemoteApi> RemoteApi for CachedApi<A> {
    async fn get_stations(&self) -> Result<Vec<Station>, ApiError> {
        if let Some(cached) = self.stations.get(&()).await {
            debug!(count = cached.len(), "station list served from cache");
            return Ok(cached.as_ref().clone());
        }

        let stations = self.inner.get_stations().await?;
        self.stations.insert((), Arc::new(stations.clone())).await;
        Ok(stations)
    }

    async fn get_station_bookings(&self, station_id: &StationId) -> Result<Vec<Booking>, ApiError> {
        if let Some(cached) = self.bookings.get(station_id).await {
            debug!(%station_id, count = cached.len(), "booking list served from cache");
            return Ok(cached.as_ref().clone());
        }

        let bookings = self.inner.get_station_bookings(station_id).await?;
        self.bookings
            .insert(station_id.clone(), Arc::new(bookings.clone()))
            .await;
        Ok(bookings)
    }

    async fn get_booking(
        &self,
        station_id: &StationId,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, ApiError> {
        self.inner.get_booking(station_id, booking_id).await
    }
}
