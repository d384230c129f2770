use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::AppError;

use super::changes::ChangeFeed;

#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub id: String,
    pub trip_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub visited_at: DateTime<Utc>,
    pub duration_minutes: Option<i64>,
    pub photo_url: Option<String>,
    pub notes: String,
    pub is_manual: bool,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct CoordinateRow {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone)]
pub struct LocationStore {
    pool: DbPool,
    changes: ChangeFeed,
}

impl LocationStore {
    pub fn new(pool: DbPool, changes: ChangeFeed) -> Self {
        Self { pool, changes }
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    pub async fn list_for_trip(&self, trip_id: &str) -> Result<Vec<LocationRow>, AppError> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT * FROM visited_locations WHERE trip_id = ?1 ORDER BY visited_at DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<LocationRow>, AppError> {
        let row = sqlx::query_as::<_, LocationRow>("SELECT * FROM visited_locations WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list_by_manual(
        &self,
        trip_id: &str,
        is_manual: bool,
    ) -> Result<Vec<LocationRow>, AppError> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT * FROM visited_locations WHERE trip_id = ?1 AND is_manual = ?2 \
             ORDER BY visited_at DESC",
        )
        .bind(trip_id)
        .bind(is_manual)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_in_time_range(
        &self,
        trip_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LocationRow>, AppError> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT * FROM visited_locations \
             WHERE trip_id = ?1 AND visited_at >= ?2 AND visited_at <= ?3 \
             ORDER BY visited_at DESC",
        )
        .bind(trip_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_trip(&self, trip_id: &str) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM visited_locations WHERE trip_id = ?1")
                .bind(trip_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Distinct (latitude, longitude) pairs; row order follows the query
    /// plan, not visit order.
    pub async fn distinct_coordinates(&self, trip_id: &str) -> Result<Vec<CoordinateRow>, AppError> {
        let rows = sqlx::query_as::<_, CoordinateRow>(
            "SELECT DISTINCT latitude, longitude FROM visited_locations WHERE trip_id = ?1",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn upsert(&self, row: &LocationRow) -> Result<(), AppError> {
        self.write(row).await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn upsert_many(&self, rows: &[LocationRow]) -> Result<(), AppError> {
        for row in rows {
            self.write(row).await?;
        }
        self.changes.mark();
        Ok(())
    }

    async fn write(&self, row: &LocationRow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO visited_locations \
             (id, trip_id, name, latitude, longitude, visited_at, duration_minutes, \
              photo_url, notes, is_manual) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&row.id)
        .bind(&row.trip_id)
        .bind(&row.name)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(row.visited_at)
        .bind(row.duration_minutes)
        .bind(&row.photo_url)
        .bind(&row.notes)
        .bind(row.is_manual)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM visited_locations WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM visited_locations WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    /// Drops only the auto-tracked points, keeping manual entries.
    pub async fn delete_auto_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM visited_locations WHERE trip_id = ?1 AND is_manual = 0")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }
}
