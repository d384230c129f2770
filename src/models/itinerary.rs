use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ItineraryCategory {
    #[serde(rename = "FLIGHT")]
    Flight,
    #[serde(rename = "HOTEL")]
    Hotel,
    #[serde(rename = "ACTIVITY")]
    Activity,
    #[serde(rename = "FOOD")]
    Food,
    #[serde(rename = "TRANSPORT")]
    Transport,
    #[default]
    #[serde(rename = "OTHER")]
    Other,
}

impl ItineraryCategory {
    pub const ALL: [ItineraryCategory; 6] = [
        ItineraryCategory::Flight,
        ItineraryCategory::Hotel,
        ItineraryCategory::Activity,
        ItineraryCategory::Food,
        ItineraryCategory::Transport,
        ItineraryCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItineraryCategory::Flight => "FLIGHT",
            ItineraryCategory::Hotel => "HOTEL",
            ItineraryCategory::Activity => "ACTIVITY",
            ItineraryCategory::Food => "FOOD",
            ItineraryCategory::Transport => "TRANSPORT",
            ItineraryCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for ItineraryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItineraryCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLIGHT" => Ok(ItineraryCategory::Flight),
            "HOTEL" => Ok(ItineraryCategory::Hotel),
            "ACTIVITY" => Ok(ItineraryCategory::Activity),
            "FOOD" => Ok(ItineraryCategory::Food),
            "TRANSPORT" => Ok(ItineraryCategory::Transport),
            "OTHER" => Ok(ItineraryCategory::Other),
            other => Err(AppError::Data(format!(
                "unknown itinerary category '{other}'"
            ))),
        }
    }
}

/// A planned activity within a trip. `sort_order` drives display order;
/// gaps and duplicates are tolerated, the list queries break ties on
/// (date, time).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryItem {
    pub id: String,
    pub trip_id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: ItineraryCategory,
    pub is_completed: bool,
    pub image_url: Option<String>,
    pub reminder_time: Option<DateTime<Utc>>,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItineraryItem {
    pub fn new(trip_id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.into(),
            title: title.into(),
            description: String::new(),
            date,
            time: String::new(),
            location: String::new(),
            latitude: None,
            longitude: None,
            category: ItineraryCategory::Other,
            is_completed: false,
            image_url: None,
            reminder_time: None,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
