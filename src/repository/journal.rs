use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::JournalEntry;
use crate::store::{JournalRow, JournalStore};

use super::live::Live;

fn to_domain(row: JournalRow) -> Result<JournalEntry, AppError> {
    let photo_urls: Vec<String> = serde_json::from_str(&row.photo_urls)
        .map_err(|err| AppError::Data(format!("bad photo_urls json: {err}")))?;
    Ok(JournalEntry {
        id: row.id,
        trip_id: row.trip_id,
        date: row.date,
        title: row.title,
        content: row.content,
        mood: row.mood,
        weather: row.weather,
        temperature: row.temperature,
        photo_urls,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_row(entry: &JournalEntry) -> Result<JournalRow, AppError> {
    let photo_urls = serde_json::to_string(&entry.photo_urls)
        .map_err(|err| AppError::Data(format!("unencodable photo_urls: {err}")))?;
    Ok(JournalRow {
        id: entry.id.clone(),
        trip_id: entry.trip_id.clone(),
        date: entry.date,
        title: entry.title.clone(),
        content: entry.content.clone(),
        mood: entry.mood.clone(),
        weather: entry.weather.clone(),
        temperature: entry.temperature,
        photo_urls,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    })
}

#[derive(Clone)]
pub struct JournalRepository {
    store: JournalStore,
}

impl JournalRepository {
    pub fn new(store: JournalStore) -> Self {
        Self { store }
    }

    pub async fn entries_for_trip(&self, trip_id: &str) -> Result<Vec<JournalEntry>, AppError> {
        self.store
            .list_for_trip(trip_id)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn entry_by_id(&self, id: &str) -> Result<Option<JournalEntry>, AppError> {
        self.store.by_id(id).await?.map(to_domain).transpose()
    }

    pub async fn entry_by_date(
        &self,
        trip_id: &str,
        date: NaiveDate,
    ) -> Result<Option<JournalEntry>, AppError> {
        self.store
            .by_date(trip_id, date)
            .await?
            .map(to_domain)
            .transpose()
    }

    pub async fn entries_in_date_range(
        &self,
        trip_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalEntry>, AppError> {
        self.store
            .list_in_date_range(trip_id, start, end)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn entries_by_mood(
        &self,
        trip_id: &str,
        mood: &str,
    ) -> Result<Vec<JournalEntry>, AppError> {
        self.store
            .list_by_mood(trip_id, mood)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn entry_count(&self, trip_id: &str) -> Result<i64, AppError> {
        self.store.count_for_trip(trip_id).await
    }

    pub async fn insert_entry(&self, entry: &JournalEntry) -> Result<(), AppError> {
        self.store.upsert(&to_row(entry)?).await
    }

    pub async fn insert_entries(&self, entries: &[JournalEntry]) -> Result<(), AppError> {
        let rows: Vec<JournalRow> = entries.iter().map(to_row).collect::<Result<_, _>>()?;
        self.store.upsert_many(&rows).await
    }

    pub async fn update_entry(&self, entry: &JournalEntry) -> Result<(), AppError> {
        self.store.upsert(&to_row(entry)?).await
    }

    pub async fn delete_entry_by_id(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn delete_entries_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        self.store.delete_for_trip(trip_id).await
    }

    pub fn watch_entries_for_trip(&self, trip_id: &str) -> Live<JournalEntry> {
        let store = self.store.clone();
        let trip_id = trip_id.to_string();
        Live::new(
            self.store.changes().subscribe(),
            Box::new(move || {
                let store = store.clone();
                let trip_id = trip_id.clone();
                Box::pin(async move {
                    store
                        .list_for_trip(&trip_id)
                        .await?
                        .into_iter()
                        .map(to_domain)
                        .collect()
                })
            }),
        )
    }
}
