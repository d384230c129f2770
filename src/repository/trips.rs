use chrono::{NaiveDate, Utc};

use crate::error::AppError;
use crate::models::{Trip, TripStatus};
use crate::store::{TripRow, TripStore};

use super::live::Live;

fn to_domain(row: TripRow) -> Result<Trip, AppError> {
    Ok(Trip {
        id: row.id,
        name: row.name,
        destination: row.destination,
        start_date: row.start_date,
        end_date: row.end_date,
        cover_image_url: row.cover_image_url,
        notes: row.notes,
        status: row.status.parse()?,
        total_budget: row.total_budget,
        currency: row.currency,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_row(trip: &Trip) -> TripRow {
    TripRow {
        id: trip.id.clone(),
        name: trip.name.clone(),
        destination: trip.destination.clone(),
        start_date: trip.start_date,
        end_date: trip.end_date,
        cover_image_url: trip.cover_image_url.clone(),
        notes: trip.notes.clone(),
        status: trip.status.as_str().to_string(),
        total_budget: trip.total_budget,
        currency: trip.currency.clone(),
        created_at: trip.created_at,
        updated_at: trip.updated_at,
    }
}

/// Pure adapter over `TripStore`: field-for-field row↔domain mapping, same
/// operation shapes, no business logic.
#[derive(Clone)]
pub struct TripRepository {
    store: TripStore,
}

impl TripRepository {
    pub fn new(store: TripStore) -> Self {
        Self { store }
    }

    pub async fn all_trips(&self) -> Result<Vec<Trip>, AppError> {
        self.store.all().await?.into_iter().map(to_domain).collect()
    }

    pub async fn trip_by_id(&self, id: &str) -> Result<Option<Trip>, AppError> {
        self.store.by_id(id).await?.map(to_domain).transpose()
    }

    pub async fn trips_by_status(&self, status: TripStatus) -> Result<Vec<Trip>, AppError> {
        self.store
            .by_status(status.as_str())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    /// Date-window "active" lookup; can disagree with the stored status.
    pub async fn active_trip(&self) -> Result<Option<Trip>, AppError> {
        self.store
            .active_trip(Utc::now().date_naive())
            .await?
            .map(to_domain)
            .transpose()
    }

    pub async fn upcoming_trips(&self, limit: i64) -> Result<Vec<Trip>, AppError> {
        self.store
            .upcoming(Utc::now().date_naive(), limit)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn past_trips(&self, limit: i64) -> Result<Vec<Trip>, AppError> {
        self.store
            .past(Utc::now().date_naive(), limit)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn active_trip_on(&self, date: NaiveDate) -> Result<Option<Trip>, AppError> {
        self.store.active_trip(date).await?.map(to_domain).transpose()
    }

    pub async fn insert_trip(&self, trip: &Trip) -> Result<(), AppError> {
        self.store.upsert(&to_row(trip)).await
    }

    pub async fn insert_trips(&self, trips: &[Trip]) -> Result<(), AppError> {
        let rows: Vec<TripRow> = trips.iter().map(to_row).collect();
        self.store.upsert_many(&rows).await
    }

    pub async fn update_trip(&self, trip: &Trip) -> Result<(), AppError> {
        self.store.upsert(&to_row(trip)).await
    }

    pub async fn update_trip_status(&self, id: &str, status: TripStatus) -> Result<(), AppError> {
        self.store.set_status(id, status.as_str()).await
    }

    pub async fn delete_trip(&self, trip: &Trip) -> Result<(), AppError> {
        self.store.delete_by_id(&trip.id).await
    }

    pub async fn delete_trip_by_id(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub fn watch_all_trips(&self) -> Live<Trip> {
        let store = self.store.clone();
        Live::new(
            self.store.changes().subscribe(),
            Box::new(move || {
                let store = store.clone();
                Box::pin(async move { store.all().await?.into_iter().map(to_domain).collect() })
            }),
        )
    }
}
