use crate::error::AppError;
use crate::models::BookingTicket;
use crate::store::{BookingTicketRow, BookingTicketStore};

fn to_domain(row: BookingTicketRow) -> BookingTicket {
    BookingTicket {
        id: row.id,
        trip_id: row.trip_id,
        booking_option_id: row.booking_option_id,
        confirmation_code: row.confirmation_code,
        ticket_image_url: row.ticket_image_url,
        pdf_url: row.pdf_url,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn to_row(ticket: &BookingTicket) -> BookingTicketRow {
    BookingTicketRow {
        id: ticket.id.clone(),
        trip_id: ticket.trip_id.clone(),
        booking_option_id: ticket.booking_option_id.clone(),
        confirmation_code: ticket.confirmation_code.clone(),
        ticket_image_url: ticket.ticket_image_url.clone(),
        pdf_url: ticket.pdf_url.clone(),
        notes: ticket.notes.clone(),
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
    }
}

#[derive(Clone)]
pub struct BookingTicketRepository {
    store: BookingTicketStore,
}

impl BookingTicketRepository {
    pub fn new(store: BookingTicketStore) -> Self {
        Self { store }
    }

    pub async fn tickets_for_trip(&self, trip_id: &str) -> Result<Vec<BookingTicket>, AppError> {
        Ok(self
            .store
            .list_for_trip(trip_id)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    pub async fn ticket_by_id(&self, id: &str) -> Result<Option<BookingTicket>, AppError> {
        Ok(self.store.by_id(id).await?.map(to_domain))
    }

    pub async fn tickets_for_option(
        &self,
        booking_option_id: &str,
    ) -> Result<Vec<BookingTicket>, AppError> {
        Ok(self
            .store
            .list_for_option(booking_option_id)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    pub async fn insert_ticket(&self, ticket: &BookingTicket) -> Result<(), AppError> {
        self.store.upsert(&to_row(ticket)).await
    }

    pub async fn insert_tickets(&self, tickets: &[BookingTicket]) -> Result<(), AppError> {
        let rows: Vec<BookingTicketRow> = tickets.iter().map(to_row).collect();
        self.store.upsert_many(&rows).await
    }

    pub async fn update_ticket(&self, ticket: &BookingTicket) -> Result<(), AppError> {
        self.store.upsert(&to_row(ticket)).await
    }

    pub async fn delete_ticket_by_id(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn delete_tickets_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        self.store.delete_for_trip(trip_id).await
    }

    pub async fn delete_tickets_for_option(&self, booking_option_id: &str) -> Result<(), AppError> {
        self.store.delete_for_option(booking_option_id).await
    }
}
