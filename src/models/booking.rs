use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate reservation ("flight", "hotel", "activity", ...) a user is
/// considering. At most one option per (trip, kind) is selected at a time,
/// maintained by an explicit clear-then-set in the repository rather than a
/// storage constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingOption {
    pub id: String,
    pub trip_id: String,
    pub kind: String,
    pub title: String,
    pub provider: String,
    pub price: f64,
    pub currency: String,
    pub booking_url: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub is_selected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingOption {
    pub fn new(
        trip_id: impl Into<String>,
        kind: impl Into<String>,
        title: impl Into<String>,
        price: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.into(),
            kind: kind.into(),
            title: title.into(),
            provider: String::new(),
            price,
            currency: "USD".to_string(),
            booking_url: None,
            description: String::new(),
            image_url: None,
            is_selected: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A confirmed booking linked to a selected option. Cascade-deleted when
/// either the trip or the option goes away.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingTicket {
    pub id: String,
    pub trip_id: String,
    pub booking_option_id: String,
    pub confirmation_code: String,
    pub ticket_image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingTicket {
    pub fn new(
        trip_id: impl Into<String>,
        booking_option_id: impl Into<String>,
        confirmation_code: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.into(),
            booking_option_id: booking_option_id.into(),
            confirmation_code: confirmation_code.into(),
            ticket_image_url: None,
            pdf_url: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
