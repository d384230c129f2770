use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TripStatus {
    #[default]
    #[serde(rename = "UPCOMING")]
    Upcoming,
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Upcoming => "UPCOMING",
            TripStatus::Active => "ACTIVE",
            TripStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPCOMING" => Ok(TripStatus::Upcoming),
            "ACTIVE" => Ok(TripStatus::Active),
            "COMPLETED" => Ok(TripStatus::Completed),
            other => Err(AppError::Data(format!("unknown trip status '{other}'"))),
        }
    }
}

/// Top-level aggregate: one travel event with a date range and budget.
/// Every child entity carries this record's id and is cascade-deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cover_image_url: Option<String>,
    pub notes: String,
    pub status: TripStatus,
    pub total_budget: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// The initial status is derived from the date range once, at creation.
    /// Afterwards status is only ever changed explicitly; the date-window
    /// list queries ignore it entirely.
    pub fn new(
        name: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        let status = if start_date > now.date_naive() {
            TripStatus::Upcoming
        } else {
            TripStatus::Active
        };
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            destination: destination.into(),
            start_date,
            end_date,
            cover_image_url: None,
            notes: String::new(),
            status,
            total_budget: 0.0,
            currency: "USD".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
