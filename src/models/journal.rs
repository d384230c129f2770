use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A travel-journal entry. By convention there is at most one entry per
/// (trip, date); nothing enforces that at write time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub trip_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub weather: Option<String>,
    pub temperature: Option<f64>,
    pub photo_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(trip_id: impl Into<String>, date: NaiveDate, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.into(),
            date,
            title: title.into(),
            content: String::new(),
            mood: None,
            weather: None,
            temperature: None,
            photo_urls: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn photo_count(&self) -> usize {
        self.photo_urls.len()
    }
}
