use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::AppError;

use super::changes::ChangeFeed;

#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRow {
    pub id: String,
    pub trip_id: String,
    pub title: String,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub date: NaiveDate,
    pub receipt_image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategorySum {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct DailySum {
    pub date: NaiveDate,
    pub total: f64,
}

#[derive(Clone)]
pub struct ExpenseStore {
    pool: DbPool,
    changes: ChangeFeed,
}

impl ExpenseStore {
    pub fn new(pool: DbPool, changes: ChangeFeed) -> Self {
        Self { pool, changes }
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    pub async fn list_for_trip(&self, trip_id: &str) -> Result<Vec<ExpenseRow>, AppError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            "SELECT * FROM expenses WHERE trip_id = ?1 ORDER BY date DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<ExpenseRow>, AppError> {
        let row = sqlx::query_as::<_, ExpenseRow>("SELECT * FROM expenses WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list_by_category(
        &self,
        trip_id: &str,
        category: &str,
    ) -> Result<Vec<ExpenseRow>, AppError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            "SELECT * FROM expenses WHERE trip_id = ?1 AND category = ?2 ORDER BY date DESC",
        )
        .bind(trip_id)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_in_date_range(
        &self,
        trip_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExpenseRow>, AppError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            "SELECT * FROM expenses WHERE trip_id = ?1 AND date >= ?2 AND date <= ?3 \
             ORDER BY date DESC",
        )
        .bind(trip_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// NULL (no expenses) comes back as None, not zero.
    pub async fn total_for_trip(&self, trip_id: &str) -> Result<Option<f64>, AppError> {
        let total: Option<f64> =
            sqlx::query_scalar("SELECT SUM(amount) FROM expenses WHERE trip_id = ?1")
                .bind(trip_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }

    pub async fn total_for_category(
        &self,
        trip_id: &str,
        category: &str,
    ) -> Result<Option<f64>, AppError> {
        let total: Option<f64> = sqlx::query_scalar(
            "SELECT SUM(amount) FROM expenses WHERE trip_id = ?1 AND category = ?2",
        )
        .bind(trip_id)
        .bind(category)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn category_summary(&self, trip_id: &str) -> Result<Vec<CategorySum>, AppError> {
        let rows = sqlx::query_as::<_, CategorySum>(
            "SELECT category, SUM(amount) AS total FROM expenses \
             WHERE trip_id = ?1 GROUP BY category",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn daily_summary(&self, trip_id: &str) -> Result<Vec<DailySum>, AppError> {
        let rows = sqlx::query_as::<_, DailySum>(
            "SELECT date, SUM(amount) AS total FROM expenses \
             WHERE trip_id = ?1 GROUP BY date ORDER BY date DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn upsert(&self, row: &ExpenseRow) -> Result<(), AppError> {
        self.write(row).await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn upsert_many(&self, rows: &[ExpenseRow]) -> Result<(), AppError> {
        for row in rows {
            self.write(row).await?;
        }
        self.changes.mark();
        Ok(())
    }

    async fn write(&self, row: &ExpenseRow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO expenses \
             (id, trip_id, title, category, amount, currency, date, receipt_image_url, \
              latitude, longitude, notes, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(&row.id)
        .bind(&row.trip_id)
        .bind(&row.title)
        .bind(&row.category)
        .bind(row.amount)
        .bind(&row.currency)
        .bind(row.date)
        .bind(&row.receipt_image_url)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(&row.notes)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM expenses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM expenses WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }
}
