use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::AppError;

use super::changes::ChangeFeed;

#[derive(Debug, Clone, FromRow)]
pub struct BookingTicketRow {
    pub id: String,
    pub trip_id: String,
    pub booking_option_id: String,
    pub confirmation_code: String,
    pub ticket_image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct BookingTicketStore {
    pool: DbPool,
    changes: ChangeFeed,
}

impl BookingTicketStore {
    pub fn new(pool: DbPool, changes: ChangeFeed) -> Self {
        Self { pool, changes }
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    pub async fn list_for_trip(&self, trip_id: &str) -> Result<Vec<BookingTicketRow>, AppError> {
        let rows = sqlx::query_as::<_, BookingTicketRow>(
            "SELECT * FROM booking_tickets WHERE trip_id = ?1 ORDER BY created_at DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<BookingTicketRow>, AppError> {
        let row =
            sqlx::query_as::<_, BookingTicketRow>("SELECT * FROM booking_tickets WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn list_for_option(
        &self,
        booking_option_id: &str,
    ) -> Result<Vec<BookingTicketRow>, AppError> {
        let rows = sqlx::query_as::<_, BookingTicketRow>(
            "SELECT * FROM booking_tickets WHERE booking_option_id = ?1",
        )
        .bind(booking_option_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn upsert(&self, row: &BookingTicketRow) -> Result<(), AppError> {
        self.write(row).await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn upsert_many(&self, rows: &[BookingTicketRow]) -> Result<(), AppError> {
        for row in rows {
            self.write(row).await?;
        }
        self.changes.mark();
        Ok(())
    }

    async fn write(&self, row: &BookingTicketRow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO booking_tickets \
             (id, trip_id, booking_option_id, confirmation_code, ticket_image_url, pdf_url, \
              notes, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&row.id)
        .bind(&row.trip_id)
        .bind(&row.booking_option_id)
        .bind(&row.confirmation_code)
        .bind(&row.ticket_image_url)
        .bind(&row.pdf_url)
        .bind(&row.notes)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM booking_tickets WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM booking_tickets WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }

    pub async fn delete_for_option(&self, booking_option_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM booking_tickets WHERE booking_option_id = ?1")
            .bind(booking_option_id)
            .execute(&self.pool)
            .await?;
        self.changes.mark();
        Ok(())
    }
}
