use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the WGS-84 ellipsoid. Only finite, in-range values can be built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinate;

impl fmt::Display for InvalidCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinate: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinate {}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        // NaN 不在任何範圍內，一併拒絕
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub bikes_available: u32,
    pub coordinate: Coordinate,
}

/// A station together with its distance from the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStation {
    pub station: Station,
    pub distance_meters: f64,
}

/// Stations with bikes, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedStations(Vec<RankedStation>);

impl RankedStations {
    pub(crate) fn from_sorted(stations: Vec<RankedStation>) -> Self {
        Self(stations)
    }

    pub fn truncate(mut self, limit: usize) -> Self {
        self.0.truncate(limit);
        self
    }

    pub fn as_slice(&self) -> &[RankedStation] {
        &self.0
    }

    pub fn first(&self) -> Option<&RankedStation> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedStation> {
        self.0.iter()
    }
}

/// Result of the address and station lookups. Anticipated upstream failures
/// are values; only unexpected ones travel as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainOutcome<T> {
    Success(T),
    PermissionDenied,
    TransientError,
}

/// What the last response asked the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviousIntent {
    /// Offered to read out more stations.
    MainQuery,
    /// Gave help and offered to run the search.
    Help,
}

/// Cross-turn memory, carried in the session attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_intent: Option<PreviousIntent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_stations: Option<String>,
}

impl ConversationState {
    pub fn awaiting_more(next_stations: String) -> Self {
        Self {
            previous_intent: Some(PreviousIntent::MainQuery),
            next_stations: Some(next_stations),
        }
    }

    pub fn help_offered() -> Self {
        Self {
            previous_intent: Some(PreviousIntent::Help),
            next_stations: None,
        }
    }

    /// Reads the state out of a session attribute bag. Attributes this skill
    /// did not write are ignored and unreadable values fall back to no state.
    pub fn from_attributes(attributes: &serde_json::Map<String, serde_json::Value>) -> Self {
        match serde_json::from_value(serde_json::Value::Object(attributes.clone())) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session attributes: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_attributes(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}
