use crate::error::AppError;
use crate::models::BookingOption;
use crate::store::{BookingOptionRow, BookingOptionStore};

use super::live::Live;

fn to_domain(row: BookingOptionRow) -> BookingOption {
    BookingOption {
        id: row.id,
        trip_id: row.trip_id,
        kind: row.kind,
        title: row.title,
        provider: row.provider,
        price: row.price,
        currency: row.currency,
        booking_url: row.booking_url,
        description: row.description,
        image_url: row.image_url,
        is_selected: row.is_selected,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn to_row(option: &BookingOption) -> BookingOptionRow {
    BookingOptionRow {
        id: option.id.clone(),
        trip_id: option.trip_id.clone(),
        kind: option.kind.clone(),
        title: option.title.clone(),
        provider: option.provider.clone(),
        price: option.price,
        currency: option.currency.clone(),
        booking_url: option.booking_url.clone(),
        description: option.description.clone(),
        image_url: option.image_url.clone(),
        is_selected: option.is_selected,
        created_at: option.created_at,
        updated_at: option.updated_at,
    }
}

#[derive(Clone)]
pub struct BookingOptionRepository {
    store: BookingOptionStore,
}

impl BookingOptionRepository {
    pub fn new(store: BookingOptionStore) -> Self {
        Self { store }
    }

    pub async fn options_for_trip(&self, trip_id: &str) -> Result<Vec<BookingOption>, AppError> {
        Ok(self
            .store
            .list_for_trip(trip_id)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    pub async fn option_by_id(&self, id: &str) -> Result<Option<BookingOption>, AppError> {
        Ok(self.store.by_id(id).await?.map(to_domain))
    }

    pub async fn options_by_kind(
        &self,
        trip_id: &str,
        kind: &str,
    ) -> Result<Vec<BookingOption>, AppError> {
        Ok(self
            .store
            .list_by_kind(trip_id, kind)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    pub async fn selected_options(&self, trip_id: &str) -> Result<Vec<BookingOption>, AppError> {
        Ok(self
            .store
            .list_by_selection(trip_id, true)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    pub async fn insert_option(&self, option: &BookingOption) -> Result<(), AppError> {
        self.store.upsert(&to_row(option)).await
    }

    pub async fn insert_options(&self, options: &[BookingOption]) -> Result<(), AppError> {
        let rows: Vec<BookingOptionRow> = options.iter().map(to_row).collect();
        self.store.upsert_many(&rows).await
    }

    pub async fn update_option(&self, option: &BookingOption) -> Result<(), AppError> {
        self.store.upsert(&to_row(option)).await
    }

    /// Clear-then-set: after this, the given option is the only selected one
    /// of its kind within its trip. Not atomic across the two statements.
    pub async fn select_option(&self, option: &BookingOption) -> Result<(), AppError> {
        self.store
            .clear_selection_for_kind(&option.trip_id, &option.kind)
            .await?;
        self.store.set_selection(&option.id, true).await
    }

    pub async fn deselect_option(&self, id: &str) -> Result<(), AppError> {
        self.store.set_selection(id, false).await
    }

    pub async fn delete_option_by_id(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn delete_options_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        self.store.delete_for_trip(trip_id).await
    }

    pub fn watch_options_for_trip(&self, trip_id: &str) -> Live<BookingOption> {
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
