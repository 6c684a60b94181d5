//! End-to-end tests against a local fake of the booking API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};

use booking_calendar::api::{ApiClient, ApiConfig, ApiError, RemoteApi};
use booking_calendar::cache::{CacheConfig, CachedApi};
use booking_calendar::calendar::WeekCursor;
use booking_calendar::dates::DateInterval;
use booking_calendar::domain::{BookingId, BookingType, StationId};
use booking_calendar::repository::{BookingRepository, RepositoryError};
use booking_calendar::session::CalendarSession;
use booking_calendar::store::{
    BookingState, FETCH_BOOKINGS_FAILED, FETCH_STATIONS_FAILED, StationState,
};

async fn stations() -> Json<Value> {
    Json(json!([
        { "id": "1", "name": "Berlin", "createdAt": "2021-03-25T10:00:00.000Z" },
        { "id": 2, "name": "Hamburg" },
        { "id": "3", "name": "Bern" }
    ]))
}

fn berlin_bookings() -> Value {
    json!([
        {
            "id": "10",
            "customerName": "Ada",
            "startDate": "2024-06-04T09:00:00.000Z",
            "endDate": "2024-06-06T17:00:00.000Z",
            "pickupReturnStationId": "1",
            "type": "PICKUP"
        },
        {
            "id": "11",
            "customerName": "Grace",
            "startDate": "2024-05-01T09:00:00.000Z",
            "endDate": "2024-05-03T17:00:00.000Z",
            "pickupReturnStationId": "1"
        },
        {
            "id": 12,
            "customerName": "Edsger",
            "startDate": "2024-06-09T12:00:00+02:00",
            "endDate": "2024-06-12T12:00:00+02:00",
            "pickupReturnStationId": 1,
            "type": "RETURN"
        },
        {
            "id": "13",
            "customerName": "Stray",
            "startDate": "2024-06-05T09:00:00.000Z",
            "endDate": "2024-06-05T10:00:00.000Z",
            "pickupReturnStationId": "2"
        },
        {
            "id": "14",
            "customerName": "Broken",
            "startDate": "2024-06-05T09:00:00.000Z",
            "endDate": "",
            "pickupReturnStationId": "1"
        }
    ])
}

async fn station_bookings(Path(station_id): Path<String>) -> Json<Value> {
    match station_id.as_str() {
        "1" => Json(berlin_bookings()),
        _ => Json(json!([])),
    }
}

async fn booking(Path((station_id, booking_id)): Path<(String, String)>) -> Response {
    match (station_id.as_str(), booking_id.as_str()) {
        ("1", "10") => Json(berlin_bookings()[0].clone()).into_response(),
        ("1", "null") => Json(Value::Null).into_response(),
        _ => (StatusCode::NOT_FOUND, "\"Not found\"").into_response(),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn healthy_backend() -> ApiClient {
    let app = Router::new()
        .route("/stations", get(stations))
        .route("/stations/:station_id/bookings", get(station_bookings))
        .route("/stations/:station_id/bookings/:booking_id", get(booking));
    client_for(serve(app).await)
}

async fn failing_backend() -> ApiClient {
    let app = Router::new()
        .fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") });
    client_for(serve(app).await)
}

async fn garbage_backend() -> ApiClient {
    let app = Router::new().fallback(|| async { "<html>definitely not json</html>" });
    client_for(serve(app).await)
}

fn client_for(addr: SocketAddr) -> ApiClient {
    let config = ApiConfig::new()
        .with_base_url(format!("http://{addr}"))
        .with_timeout(5);
    ApiClient::new(config).unwrap()
}

fn week_of_june_3() -> DateInterval {
    DateInterval::new("2024-06-03", "2024-06-09T23:59:59.999").unwrap()
}

fn ids(bookings: &[booking_calendar::domain::Booking]) -> Vec<&str> {
    bookings.iter().map(|b| b.id.as_str()).collect()
}

#[tokio::test]
async fn client_decodes_stations_and_bookings() {
    let client = healthy_backend().await;

    let stations = client.get_stations().await.unwrap();
    let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(stations[0].extra["createdAt"], "2021-03-25T10:00:00.000Z");

    let bookings = client
        .get_station_bookings(&StationId::new("1"))
        .await
        .unwrap();
    // The record with an empty end date is dropped, the rest survive
    assert_eq!(bookings.len(), 4);
    assert!(bookings.iter().all(|b| b.id.as_str() != "14"));
    assert_eq!(bookings[0].booking_type, Some(BookingType::Pickup));
    assert_eq!(bookings[1].booking_type, None);

    // Offsets are normalized to UTC
    assert_eq!(bookings[2].start_date.to_string(), "2024-06-09 10:00:00");
    assert_eq!(bookings[2].pickup_return_station_id.as_str(), "1");
}

#[tokio::test]
async fn client_treats_missing_bookings_as_absent() {
    let client = healthy_backend().await;
    let station = StationId::new("1");

    let found = client
        .get_booking(&station, &BookingId::new("10"))
        .await
        .unwrap();
    assert_eq!(found.map(|b| b.customer_name), Some("Ada".to_string()));

    assert!(
        client
            .get_booking(&station, &BookingId::new("404"))
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        client
            .get_booking(&station, &BookingId::new("null"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn client_reports_status_and_decode_failures() {
    let failing = failing_backend().await;
    match failing.get_stations().await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }

    let garbage = garbage_backend().await;
    match garbage.get_stations().await {
        Err(ApiError::Json { body, .. }) => {
            assert_eq!(body.as_deref(), Some("<html>definitely not json</html>"));
        }
        other => panic!("expected JSON error, got {other:?}"),
    }
}

#[tokio::test]
async fn repository_filters_by_station_and_week() {
    let repository = BookingRepository::new(healthy_backend().await);

    let bookings = repository
        .list_bookings_for_station_in_range(&StationId::new("1"), &week_of_june_3())
        .await
        .unwrap();
    assert_eq!(ids(&bookings), ["10", "12"]);

    let found = repository.list_stations("bEr").await.unwrap();
    let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Berlin", "Bern"]);

    let missing = repository
        .get_booking_details(&StationId::new("1"), &BookingId::new("99"))
        .await;
    assert!(matches!(missing, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
async fn stores_surface_backend_failures() {
    let repository = Arc::new(BookingRepository::new(failing_backend().await));
    let stations = StationState::new(repository.clone());
    let bookings = BookingState::new(repository);

    assert!(stations.fetch_stations("").await.is_empty());
    let snapshot = stations.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some(FETCH_STATIONS_FAILED));
    assert!(!snapshot.loading);

    assert!(
        bookings
            .fetch_bookings_by_station_and_date_range(&StationId::new("1"), &week_of_june_3())
            .await
            .is_empty()
    );
    let snapshot = bookings.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some(FETCH_BOOKINGS_FAILED));
    assert!(snapshot.bookings.is_empty());
}

#[tokio::test]
async fn cached_session_shows_a_week() {
    let api = CachedApi::new(healthy_backend().await, &CacheConfig::default());
    let cursor = WeekCursor::new(chrono::NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
    let mut session = CalendarSession::with_cursor(api, cursor);

    let stations = session.stations().fetch_stations("berlin").await;
    let loaded = session.select_station(stations[0].clone()).await;
    assert_eq!(ids(&loaded), ["10", "12"]);

    let schedule = session.schedule().unwrap();
    assert_eq!(ids(&schedule[1].pickups), ["10"]);
    assert_eq!(ids(&schedule[3].returns), ["10"]);
    assert_eq!(ids(&schedule[6].pickups), ["12"]);

    // Next week comes from the cached list
    let loaded = session.next_week().await.unwrap();
    assert_eq!(ids(&loaded), ["12"]);

    let details = session
        .bookings()
        .get_booking_details(&StationId::new("1"), &BookingId::new("10"))
        .await;
    assert!(details.is_some());
    assert_eq!(
        session.bookings().snapshot().selected_booking.map(|b| b.id),
        Some(BookingId::new("10"))
    );
}
