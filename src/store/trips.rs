use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::AppError;

use super::changes::ChangeFeed;

#[derive(Debug, Clone, FromRow)]
pub struct TripRow {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cover_image_url: Option<String>,
    pub notes: String,
    pub status: String,
    pub total_budget: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TripStore {
    pool: DbPool,
    changes: ChangeFeed,
}

impl TripStore {
    pub fn new(pool: DbPool, changes: ChangeFeed) -> Self {
        Self { pool, changes }
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    pub async fn all(&self) -> Result<Vec<TripRow>, AppError> {
        let rows = sqlx::query_as::<_, TripRow>("SELECT * FROM trips ORDER BY start_date ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<TripRow>, AppError> {
        let row = sqlx::query_as::<_, TripRow>("SELECT * FROM trips WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn by_status(&self, status: &str) -> Result<Vec<TripRow>, AppError> {
        let rows = sqlx::query_as::<_, TripRow>(
            "SELECT * FROM trips WHERE status = ?1 ORDER BY start_date ASC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Date-window lookup, independent of the stored status column.
    pub async fn active_trip(&self, today: NaiveDate) -> Result<Option<TripRow>, AppError> {
        let row = sqlx::query_as::<_, TripRow>(
            "SELECT * FROM trips WHERE start_date <= ?1 AND end_date >= ?1 LIMIT 1",
        )
        .bind(today)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn upcoming(&self, today: NaiveDate, limit: i64) -> Result<Vec<TripRow>, AppError> {
        let rows = sqlx::query_as::<_, TripRow>(
            "SELECT * FROM trips WHERE start_date > ?1 ORDER BY start_date ASC LIMIT ?2",
        )
        .bind(today)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn past(&self, today: NaiveDate, limit: i64) -> Result<Vec<TripRow>, AppError> {
        let rows = sqlx::query_as::<_, TripRow>(
            "SELECT * FROM trips WHERE end_date < ?1 ORDER BY start_date DESC LIMIT ?2",
        )
        .bind(today)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn upsert(&self, row: &TripRow) -> Result<(), AppError> {
        self.write(row).await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn upsert_many(&self, rows: &[TripRow]) -> Result<(), AppError> {
        for row in rows {
            self.write(row).await?;
        }
        self.changes.mark();
        Ok(())
    }

    async fn write(&self, row: &TripRow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO trips \
             (id, name, destination, start_date, end_date, cover_image_url, notes, status, \
              total_budget, currency, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.destination)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(&row.cover_image_url)
        .bind(&row.notes)
        .bind(&row.status)
        .bind(row.total_budget)
        .bind(&row.currency)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_status(&self, id: &str, status: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE trips SET status = ?1 WHERE id = ?2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM trips WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }
}
