use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A geographic point associated with a trip. `is_manual` distinguishes
/// user-entered points from the ones the tracking service logs on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitedLocation {
    pub id: String,
    pub trip_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub visited_at: DateTime<Utc>,
    pub duration_minutes: Option<i64>,
    pub photo_url: Option<String>,
    pub notes: String,
    pub is_manual: bool,
}

impl VisitedLocation {
    pub fn manual(
        trip_id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self::new(trip_id, name, latitude, longitude, true)
    }

    pub fn auto(trip_id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::new(trip_id, "Tracked location", latitude, longitude, false)
    }

    fn new(
        trip_id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        is_manual: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.into(),
            name: name.into(),
            latitude,
            longitude,
            visited_at: Utc::now(),
            duration_minutes: None,
            photo_url: None,
            notes: String::new(),
            is_manual,
        }
    }
}

/// A bare (latitude, longitude) pair from the distinct-coordinates query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePoint {
    pub latitude: f64,
    pub longitude: f64,
}
