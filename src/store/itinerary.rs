use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::AppError;

use super::changes::ChangeFeed;

#[derive(Debug, Clone, FromRow)]
pub struct ItineraryRow {
    pub id: String,
    pub trip_id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: String,
    pub is_completed: bool,
    pub image_url: Option<String>,
    pub reminder_time: Option<DateTime<Utc>>,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ItineraryStore {
    pool: DbPool,
    changes: ChangeFeed,
}

impl ItineraryStore {
    pub fn new(pool: DbPool, changes: ChangeFeed) -> Self {
        Self { pool, changes }
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    pub async fn list_for_trip(&self, trip_id: &str) -> Result<Vec<ItineraryRow>, AppError> {
        let rows = sqlx::query_as::<_, ItineraryRow>(
            "SELECT * FROM itinerary_items WHERE trip_id = ?1 \
             ORDER BY sort_order ASC, date ASC, time ASC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_for_trip_and_date(
        &self,
        trip_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ItineraryRow>, AppError> {
        let rows = sqlx::query_as::<_, ItineraryRow>(
            "SELECT * FROM itinerary_items WHERE trip_id = ?1 AND date = ?2 \
             ORDER BY sort_order ASC, time ASC",
        )
        .bind(trip_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<ItineraryRow>, AppError> {
        let row = sqlx::query_as::<_, ItineraryRow>("SELECT * FROM itinerary_items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list_by_category(
        &self,
        trip_id: &str,
        category: &str,
    ) -> Result<Vec<ItineraryRow>, AppError> {
        let rows = sqlx::query_as::<_, ItineraryRow>(
            "SELECT * FROM itinerary_items WHERE trip_id = ?1 AND category = ?2 \
             ORDER BY date ASC, time ASC",
        )
        .bind(trip_id)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_completion(
        &self,
        trip_id: &str,
        is_completed: bool,
    ) -> Result<Vec<ItineraryRow>, AppError> {
        let rows = sqlx::query_as::<_, ItineraryRow>(
            "SELECT * FROM itinerary_items WHERE trip_id = ?1 AND is_completed = ?2 \
             ORDER BY date ASC, time ASC",
        )
        .bind(trip_id)
        .bind(is_completed)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_in_date_range(
        &self,
        trip_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ItineraryRow>, AppError> {
        let rows = sqlx::query_as::<_, ItineraryRow>(
            "SELECT * FROM itinerary_items WHERE trip_id = ?1 AND date >= ?2 AND date <= ?3 \
             ORDER BY date ASC, time ASC",
        )
        .bind(trip_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Used to append new items at the end of a trip's list.
    pub async fn max_sort_order(&self, trip_id: &str) -> Result<Option<i64>, AppError> {
        let max: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(sort_order) FROM itinerary_items WHERE trip_id = ?1",
        )
        .bind(trip_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(max)
    }

    pub async fn upsert(&self, row: &ItineraryRow) -> Result<(), AppError> {
        self.write(row).await?;
        self.changes.mark();
        Ok(())
    }

    /// Row-by-row, not wrapped in a transaction.
    pub async fn upsert_many(&self, rows: &[ItineraryRow]) -> Result<(), AppError> {
        for row in rows {
            self.write(row).await?;
        }
        self.changes.mark();
        Ok(())
    }

    async fn write(&self, row: &ItineraryRow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO itinerary_items \
             (id, trip_id, title, description, date, time, location, latitude, longitude, \
              category, is_completed, image_url, reminder_time, sort_order, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )
        .bind(&row.id)
        .bind(&row.trip_id)
        .bind(&row.title)
        .bind(&row.description)
        .bind(row.date)
        .bind(&row.time)
        .bind(&row.location)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(&row.category)
        .bind(row.is_completed)
        .bind(&row.image_url)
        .bind(row.reminder_time)
        .bind(row.sort_order)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_completion(&self, id: &str, is_completed: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE itinerary_items SET is_completed = ?1 WHERE id = ?2")
            .bind(is_completed)
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn set_sort_order(&self, id: &str, sort_order: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE itinerary_items SET sort_order = ?1 WHERE id = ?2")
            .bind(sort_order)
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM itinerary_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM itinerary_items WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }
}
