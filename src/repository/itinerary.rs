use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{ItineraryCategory, ItineraryItem};
use crate::store::{ItineraryRow, ItineraryStore};

use super::live::Live;

fn to_domain(row: ItineraryRow) -> Result<ItineraryItem, AppError> {
    Ok(ItineraryItem {
        id: row.id,
        trip_id: row.trip_id,
        title: row.title,
        description: row.description,
        date: row.date,
        time: row.time,
        location: row.location,
        latitude: row.latitude,
        longitude: row.longitude,
        category: row.category.parse()?,
        is_completed: row.is_completed,
        image_url: row.image_url,
        reminder_time: row.reminder_time,
        sort_order: row.sort_order,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_row(item: &ItineraryItem) -> ItineraryRow {
    ItineraryRow {
        id: item.id.clone(),
        trip_id: item.trip_id.clone(),
        title: item.title.clone(),
        description: item.description.clone(),
        date: item.date,
        time: item.time.clone(),
        location: item.location.clone(),
        latitude: item.latitude,
        longitude: item.longitude,
        category: item.category.as_str().to_string(),
        is_completed: item.is_completed,
        image_url: item.image_url.clone(),
        reminder_time: item.reminder_time,
        sort_order: item.sort_order,
        created_at: item.created_at,
        updated_at: item.updated_at,
    }
}

#[derive(Clone)]
pub struct ItineraryRepository {
    store: ItineraryStore,
}

impl ItineraryRepository {
    pub fn new(store: ItineraryStore) -> Self {
        Self { store }
    }

    pub async fn items_for_trip(&self, trip_id: &str) -> Result<Vec<ItineraryItem>, AppError> {
        self.store
            .list_for_trip(trip_id)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn items_for_date(
        &self,
        trip_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ItineraryItem>, AppError> {
        self.store
            .list_for_trip_and_date(trip_id, date)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn item_by_id(&self, id: &str) -> Result<Option<ItineraryItem>, AppError> {
        self.store.by_id(id).await?.map(to_domain).transpose()
    }

    pub async fn items_by_category(
        &self,
        trip_id: &str,
        category: ItineraryCategory,
    ) -> Result<Vec<ItineraryItem>, AppError> {
        self.store
            .list_by_category(trip_id, category.as_str())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn items_by_completion(
        &self,
        trip_id: &str,
        is_completed: bool,
    ) -> Result<Vec<ItineraryItem>, AppError> {
        self.store
            .list_by_completion(trip_id, is_completed)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn items_in_date_range(
        &self,
        trip_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ItineraryItem>, AppError> {
        self.store
            .list_in_date_range(trip_id, start, end)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn max_sort_order(&self, trip_id: &str) -> Result<Option<i64>, AppError> {
        self.store.max_sort_order(trip_id).await
    }

    pub async fn insert_item(&self, item: &ItineraryItem) -> Result<(), AppError> {
        self.store.upsert(&to_row(item)).await
    }

    pub async fn insert_items(&self, items: &[ItineraryItem]) -> Result<(), AppError> {
        let rows: Vec<ItineraryRow> = items.iter().map(to_row).collect();
        self.store.upsert_many(&rows).await
    }

    pub async fn update_item(&self, item: &ItineraryItem) -> Result<(), AppError> {
        self.store.upsert(&to_row(item)).await
    }

    pub async fn set_completion(&self, id: &str, is_completed: bool) -> Result<(), AppError> {
        self.store.set_completion(id, is_completed).await
    }

    pub async fn set_sort_order(&self, id: &str, sort_order: i64) -> Result<(), AppError> {
        self.store.set_sort_order(id, sort_order).await
    }

    pub async fn delete_item_by_id(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn delete_items_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        self.store.delete_for_trip(trip_id).await
    }

    pub fn watch_items_for_trip(&self, trip_id: &str) -> Live<ItineraryItem> {
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
