//! Rental stations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::StationId;

/// A physical rental location.
///
/// Only `id` and `name` are interpreted; any other fields the API sends are
/// kept verbatim in `extra` so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: StationId::new(id),
            name: name.into(),
            extra: Map::new(),
        }
    }
}
