use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{Expense, ExpenseCategory};
use crate::store::{CategorySum, DailySum, ExpenseRow, ExpenseStore};

use super::live::Live;

/// Per-category aggregate with the TEXT category decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

fn to_domain(row: ExpenseRow) -> Result<Expense, AppError> {
    Ok(Expense {
        id: row.id,
        trip_id: row.trip_id,
        title: row.title,
        category: row.category.parse()?,
        amount: row.amount,
        currency: row.currency,
        date: row.date,
        receipt_image_url: row.receipt_image_url,
        latitude: row.latitude,
        longitude: row.longitude,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_row(expense: &Expense) -> ExpenseRow {
    ExpenseRow {
        id: expense.id.clone(),
        trip_id: expense.trip_id.clone(),
        title: expense.title.clone(),
        category: expense.category.as_str().to_string(),
        amount: expense.amount,
        currency: expense.currency.clone(),
        date: expense.date,
        receipt_image_url: expense.receipt_image_url.clone(),
        latitude: expense.latitude,
        longitude: expense.longitude,
        notes: expense.notes.clone(),
        created_at: expense.created_at,
        updated_at: expense.updated_at,
    }
}

fn to_category_total(row: CategorySum) -> Result<CategoryTotal, AppError> {
    Ok(CategoryTotal {
        category: row.category.parse()?,
        total: row.total,
    })
}

#[derive(Clone)]
pub struct ExpenseRepository {
    store: ExpenseStore,
}

impl ExpenseRepository {
    pub fn new(store: ExpenseStore) -> Self {
        Self { store }
    }

    pub async fn expenses_for_trip(&self, trip_id: &str) -> Result<Vec<Expense>, AppError> {
        self.store
            .list_for_trip(trip_id)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn expense_by_id(&self, id: &str) -> Result<Option<Expense>, AppError> {
        self.store.by_id(id).await?.map(to_domain).transpose()
    }

    pub async fn expenses_by_category(
        &self,
        trip_id: &str,
        category: ExpenseCategory,
    ) -> Result<Vec<Expense>, AppError> {
        self.store
            .list_by_category(trip_id, category.as_str())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn expenses_in_date_range(
        &self,
        trip_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, AppError> {
        self.store
            .list_in_date_range(trip_id, start, end)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn total_for_trip(&self, trip_id: &str) -> Result<Option<f64>, AppError> {
        self.store.total_for_trip(trip_id).await
    }

    pub async fn total_for_category(
        &self,
        trip_id: &str,
        category: ExpenseCategory,
    ) -> Result<Option<f64>, AppError> {
        self.store.total_for_category(trip_id, category.as_str()).await
    }

    pub async fn category_summary(&self, trip_id: &str) -> Result<Vec<CategoryTotal>, AppError> {
        self.store
            .category_summary(trip_id)
            .await?
            .into_iter()
            .map(to_category_total)
            .collect()
    }

    pub async fn daily_summary(&self, trip_id: &str) -> Result<Vec<DailyTotal>, AppError> {
        Ok(self
            .store
            .daily_summary(trip_id)
            .await?
            .into_iter()
            .map(|DailySum { date, total }| DailyTotal { date, total })
            .collect())
    }

    pub async fn insert_expense(&self, expense: &Expense) -> Result<(), AppError> {
        self.store.upsert(&to_row(expense)).await
    }

    pub async fn insert_expenses(&self, expenses: &[Expense]) -> Result<(), AppError> {
        let rows: Vec<ExpenseRow> = expenses.iter().map(to_row).collect();
        self.store.upsert_many(&rows).await
    }

    pub async fn update_expense(&self, expense: &Expense) -> Result<(), AppError> {
        self.store.upsert(&to_row(expense)).await
    }

    pub async fn delete_expense_by_id(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn delete_expenses_for_trip(&self, trip_id: &str) -> Result<(), AppError> {
        self.store.delete_for_trip(trip_id).await
    }

    pub fn watch_expenses_for_trip(&self, trip_id: &str) -> Live<Expense> {
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
