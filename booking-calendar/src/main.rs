use std::process::ExitCode;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use booking_calendar::api::{ApiClient, ApiConfig};
use booking_calendar::cache::{CacheConfig, CachedApi};
use booking_calendar::calendar::{DaySchedule, WeekCursor};
use booking_calendar::session::CalendarSession;

const USAGE: &str = "usage: booking-calendar <station-search> [yyyy-MM-dd]";

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let Some(search) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let mut cursor = WeekCursor::today();
    if let Some(date) = args.next() {
        if let Err(e) = cursor.go_to(date.as_str()) {
            eprintln!("Invalid date {date:?}: {e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    }

    let client = match ApiClient::new(api_config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create API client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let api = CachedApi::new(client, &CacheConfig::default());
    let session = CalendarSession::with_cursor(api, cursor);

    let stations = session.stations().fetch_stations(&search).await;
    if let Some(error) = session.stations().snapshot().error {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }
    let Some(station) = stations.into_iter().next() else {
        eprintln!("No station matches {search:?}");
        return ExitCode::FAILURE;
    };
    info!(station_id = %station.id, name = %station.name, "showing station");

    let station_name = station.name.clone();
    session.select_station(station).await;
    if let Some(error) = session.bookings().snapshot().error {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    let (label, schedule) = match (session.cursor().label(), session.schedule()) {
        (Ok(label), Ok(schedule)) => (label, schedule),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Cannot show this week: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{station_name}: {label}");
    println!();
    for day in &schedule {
        print_day(day);
    }

    ExitCode::SUCCESS
}

/// Config from `BOOKING_API_BASE_URL` and `BOOKING_API_TIMEOUT_SECS`.
fn api_config() -> ApiConfig {
    let mut config = ApiConfig::default();

    if let Ok(url) = std::env::var("BOOKING_API_BASE_URL") {
        config = config.with_base_url(url);
    }

    if let Ok(secs) = std::env::var("BOOKING_API_TIMEOUT_SECS") {
        match secs.parse() {
            Ok(secs) => config = config.with_timeout(secs),
            Err(_) => warn!(value = %secs, "ignoring invalid BOOKING_API_TIMEOUT_SECS"),
        }
    }

    config
}

fn print_day(day: &DaySchedule) {
    println!("{} {}", day.day.day_name, day.day.formatted_date);

    if day.is_empty() {
        println!("  No bookings");
        return;
    }

    for booking in &day.pickups {
        println!("  PICKUP  {} ({})", booking.customer_name, booking.id);
    }
    for booking in &day.returns {
        println!("  RETURN  {} ({})", booking.customer_name, booking.id);
    }
}
