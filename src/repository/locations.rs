use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{CoordinatePoint, VisitedLocation};
use crate::store::{CoordinateRow, LocationRow, LocationStore};

use super::live::Live;

fn to_domain(row: LocationRow) -> VisitedLocation {
    VisitedLocation {
        id: row.id,
        trip_id: row.trip_id,
        name: row.name,
        latitude: row.latitude,
        longitude: row.longitude,
        visited_at: row.visited_at,
        duration_minutes: row.duration_minutes,
        photo_url: row.photo_url,
        notes: row.notes,
        is_manual: row.is_manual,
    }
}

fn to_row(location: &VisitedLocation) -> LocationRow {
    LocationRow {
        id: location.id.clone(),
        trip_id: location.trip_id.clone(),
        name: location.name.clone(),
        latitude: location.latitude,
        longitude: location.longitude,
        visited_at: location.visited_at,
        duration_minutes: location.duration_minutes,
        photo_url: location.photo_url.clone(),
        notes: location.notes.clone(),
        is_manual: location.is_manual,
    }
}

#[derive(Clone)]
pub struct VisitedLocationRepository {
    store: LocationStore,
}

impl VisitedLocationRepository {
    pub fn new(store: LocationStore) -> Self {
        Self { store }
    }

    pub async fn locations_for_trip(&self, trip_id: &str) -> Result<Vec<VisitedLocation>, AppError> {
        Ok(self
            .store
            .list_for_trip(trip_id)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    pub async fn location_by_id(&self, id: &str) -> Result<Option<VisitedLocation>, AppError> {
        Ok(self.store.by_id(id).await?.map(to_domain))
    }

    pub async fn locations_by_manual(
        &self,
        trip_id: &str,
        is_manual: bool,
    ) -> Result<Vec<VisitedLocation>, AppError> {
        Ok(self
            .store
            .list_by_manual(trip_id, is_manual)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    pub async fn locations_in_time_range(
        &self,
        trip_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<VisitedLocation>, AppError> {
        Ok(self
            .store
            .list_in_time_range(trip_id, start, end)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    pub async fn location_count(&self, trip_id: &str) -> Result<i64, AppError> {
        self.store.count_for_trip(trip_id).await
    }

    pub async fn unique_coordinates(&self, trip_id: &str) -> Result<Vec<CoordinatePoint>, AppError> {
        Ok(self
            .store
            .distinct_coordinates(trip_id)
            .await?
            .into_iter()
            .map(|CoordinateRow { latitude, longitude }| CoordinatePoint {
                latitude,
                longitude,
            })
            .collect())
    }

    pub async fn insert_location(&self, location: &VisitedLocation) -> Result<(), AppError> {
        self.store.upsert(&to_row(location)).await
    }

    pub async fn insert_locations(&self, locations: &[VisitedLocation]) -> Result<(), AppError> {
        let rows: Vec<LocationRow> = locations.iter().map(to_row).collect();
        self.store.upsert_many(&rows).await
    }

    pub async fn update_location(&self, location: &VisitedLocation) -> Result<(), AppError> {
        self.store.upsert(&to_row(location)).await
    }

    pub async fn delete_location_by_id(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn delete_locations_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        self.store.delete_for_trip(trip_id).await
    }

    pub async fn delete_auto_locations(&self, trip_id: &str) -> Result<(), AppError> {
        self.store.delete_auto_for_trip(trip_id).await
    }

    pub fn watch_locations_for_trip(&self, trip_id: &str) -> Live<VisitedLocation> {
        let store = self.store.clone();
        let trip_id = trip_id.to_string();
        Live::new(
            self.store.changes().subscribe(),
            Box::new(move || {
                let store = store.clone();
                let trip_id = trip_id.clone();
                Box::pin(async move {
                    Ok(store
                        .list_for_trip(&trip_id)
                        .await?
                        .into_iter()
                        .map(to_domain)
                        .collect())
                })
            }),
        )
    }
}
