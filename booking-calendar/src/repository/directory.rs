//! Station directory: name search over the station list.

use crate::domain::Station;

/// Keep stations whose name contains `search_term`, ignoring case.
///
/// An empty term keeps everything. Order is preserved.
pub fn filter_by_name(stations: Vec<Station>, search_term: &str) -> Vec<Station> {
    if search_term.is_empty() {
        return stations;
    }

    let needle = search_term.to_lowercase();
    stations
        .into_iter()
        .filter(|station| station.name.to_lowercase().contains(&needle))
        .collect()
}
