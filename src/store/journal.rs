use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::AppError;

use super::changes::ChangeFeed;

/// `photo_urls` is a JSON array of strings; the repository decodes it.
#[derive(Debug, Clone, FromRow)]
pub struct JournalRow {
    pub id: String,
    pub trip_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub weather: Option<String>,
    pub temperature: Option<f64>,
    pub photo_urls: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct JournalStore {
    pool: DbPool,
    changes: ChangeFeed,
}

impl JournalStore {
    pub fn new(pool: DbPool, changes: ChangeFeed) -> Self {
        Self { pool, changes }
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    pub async fn list_for_trip(&self, trip_id: &str) -> Result<Vec<JournalRow>, AppError> {
        let rows = sqlx::query_as::<_, JournalRow>(
            "SELECT * FROM journal_entries WHERE trip_id = ?1 ORDER BY date DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<JournalRow>, AppError> {
        let row = sqlx::query_as::<_, JournalRow>("SELECT * FROM journal_entries WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// One entry per (trip, date) is a convention, not a constraint; if
    /// duplicates exist this returns an arbitrary one of them.
    pub async fn by_date(
        &self,
        trip_id: &str,
        date: NaiveDate,
    ) -> Result<Option<JournalRow>, AppError> {
        let row = sqlx::query_as::<_, JournalRow>(
            "SELECT * FROM journal_entries WHERE trip_id = ?1 AND date = ?2 LIMIT 1",
        )
        .bind(trip_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_in_date_range(
        &self,
        trip_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalRow>, AppError> {
        let rows = sqlx::query_as::<_, JournalRow>(
            "SELECT * FROM journal_entries WHERE trip_id = ?1 AND date >= ?2 AND date <= ?3 \
             ORDER BY date DESC",
        )
        .bind(trip_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_mood(
        &self,
        trip_id: &str,
        mood: &str,
    ) -> Result<Vec<JournalRow>, AppError> {
        let rows = sqlx::query_as::<_, JournalRow>(
            "SELECT * FROM journal_entries WHERE trip_id = ?1 AND mood = ?2 ORDER BY date DESC",
        )
        .bind(trip_id)
        .bind(mood)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_trip(&self, trip_id: &str) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM journal_entries WHERE trip_id = ?1")
                .bind(trip_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn upsert(&self, row: &JournalRow) -> Result<(), AppError> {
        self.write(row).await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn upsert_many(&self, rows: &[JournalRow]) -> Result<(), AppError> {
        for row in rows {
            self.write(row).await?;
        }
        self.changes.mark();
        Ok(())
    }

    async fn write(&self, row: &JournalRow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO journal_entries \
             (id, trip_id, date, title, content, mood, weather, temperature, photo_urls, \
              created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&row.id)
        .bind(&row.trip_id)
        .bind(row.date)
        .bind(&row.title)
        .bind(&row.content)
        .bind(&row.mood)
        .bind(&row.weather)
        .bind(row.temperature)
        .bind(&row.photo_urls)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM journal_entries WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM journal_entries WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }
}
