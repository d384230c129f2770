use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::AppError;

use super::changes::ChangeFeed;

#[derive(Debug, Clone, FromRow)]
pub struct BookingOptionRow {
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

#[derive(Clone)]
pub struct BookingOptionStore {
    pool: DbPool,
    changes: ChangeFeed,
}

impl BookingOptionStore {
    pub fn new(pool: DbPool, changes: ChangeFeed) -> Self {
        Self { pool, changes }
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    pub async fn list_for_trip(&self, trip_id: &str) -> Result<Vec<BookingOptionRow>, AppError> {
        let rows = sqlx::query_as::<_, BookingOptionRow>(
            "SELECT * FROM booking_options WHERE trip_id = ?1 ORDER BY created_at DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<BookingOptionRow>, AppError> {
        let row =
            sqlx::query_as::<_, BookingOptionRow>("SELECT * FROM booking_options WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn list_by_kind(
        &self,
        trip_id: &str,
        kind: &str,
    ) -> Result<Vec<BookingOptionRow>, AppError> {
        let rows = sqlx::query_as::<_, BookingOptionRow>(
            "SELECT * FROM booking_options WHERE trip_id = ?1 AND kind = ?2 \
             ORDER BY created_at DESC",
        )
        .bind(trip_id)
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_selection(
        &self,
        trip_id: &str,
        is_selected: bool,
    ) -> Result<Vec<BookingOptionRow>, AppError> {
        let rows = sqlx::query_as::<_, BookingOptionRow>(
            "SELECT * FROM booking_options WHERE trip_id = ?1 AND is_selected = ?2 \
             ORDER BY created_at DESC",
        )
        .bind(trip_id)
        .bind(is_selected)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn upsert(&self, row: &BookingOptionRow) -> Result<(), AppError> {
        self.write(row).await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn upsert_many(&self, rows: &[BookingOptionRow]) -> Result<(), AppError> {
        for row in rows {
            self.write(row).await?;
        }
        self.changes.mark();
        Ok(())
    }

    async fn write(&self, row: &BookingOptionRow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO booking_options \
             (id, trip_id, kind, title, provider, price, currency, booking_url, description, \
              image_url, is_selected, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(&row.id)
        .bind(&row.trip_id)
        .bind(&row.kind)
        .bind(&row.title)
        .bind(&row.provider)
        .bind(row.price)
        .bind(&row.currency)
        .bind(&row.booking_url)
        .bind(&row.description)
        .bind(&row.image_url)
        .bind(row.is_selected)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_selection(&self, id: &str, is_selected: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE booking_options SET is_selected = ?1 WHERE id = ?2")
            .bind(is_selected)
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    /// First half of the clear-then-set selection contract.
    pub async fn clear_selection_for_kind(&self, trip_id: &str, kind: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE booking_options SET is_selected = 0 WHERE trip_id = ?1 AND kind = ?2")
            .bind(trip_id)
            .bind(kind)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM booking_options WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM booking_options WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }
}
