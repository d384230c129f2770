use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::models::{Expense, ExpenseCategory};
use crate::repository::{ExpenseRepository, TripRepository};

use super::machine::{Screen, ScreenCtx};

#[derive(Debug, Clone, Default)]
pub struct ExpenseState {
    pub is_loading: bool,
    pub trip_id: String,
    pub expenses: Vec<Expense>,
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub currency: String,
    pub category_totals: HashMap<ExpenseCategory, f64>,
    pub daily_totals: HashMap<NaiveDate, f64>,
    pub selected_category: Option<ExpenseCategory>,
    pub selected_date: Option<NaiveDate>,
    pub error: Option<String>,
}

impl ExpenseState {
    pub fn for_trip(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            currency: "USD".to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub enum ExpenseIntent {
    SetTrip(String),
    LoadExpenses,
    FilterByCategory(Option<ExpenseCategory>),
    FilterByDate(Option<NaiveDate>),
    AddExpense(Expense),
    UpdateExpense(Expense),
    DeleteExpense { expense_id: String },
    UpdateBudget(f64),
    UpdateCurrency(String),
    ExportExpenses,
    OpenAddExpense,
    OpenEditExpense { expense_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseEffect {
    ShowError(String),
    ExpenseAdded,
    ExpenseUpdated,
    ExpenseDeleted,
    BudgetUpdated,
    ShowExportSuccess { file_path: String },
    NavigateToAddExpense,
    NavigateToEditExpense { expense_id: String },
}

pub struct ExpenseScreen {
    expenses: ExpenseRepository,
    trips: TripRepository,
}

impl ExpenseScreen {
    pub fn new(expenses: ExpenseRepository, trips: TripRepository) -> Self {
        Self { expenses, trips }
    }

    async fn fail(&self, err: impl ToString, ctx: &ScreenCtx<Self>) {
        let message = err.to_string();
        ctx.update(|s| {
            s.is_loading = false;
            s.error = Some(message.clone());
        });
        ctx.effect(ExpenseEffect::ShowError(message)).await;
    }

    async fn load(&self, ctx: &ScreenCtx<Self>) {
        let snapshot = ctx.state();
        if snapshot.trip_id.is_empty() {
            return;
        }
        ctx.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let trip = match self.trips.trip_by_id(&snapshot.trip_id).await {
            Ok(trip) => trip,
            Err(err) => return self.fail(err, ctx).await,
        };

        let listed = match (snapshot.selected_category, snapshot.selected_date) {
            (Some(category), _) => {
                self.expenses
                    .expenses_by_category(&snapshot.trip_id, category)
                    .await
            }
            (None, Some(date)) => {
                self.expenses
                    .expenses_in_date_range(&snapshot.trip_id, date, date)
                    .await
            }
            (None, None) => self.expenses.expenses_for_trip(&snapshot.trip_id).await,
        };
        let expenses = match listed {
            Ok(expenses) => expenses,
            Err(err) => return self.fail(err, ctx).await,
        };

        let totals = async {
            let total_spent = self
                .expenses
                .total_for_trip(&snapshot.trip_id)
                .await?
                .unwrap_or(0.0);
            let by_category = self.expenses.category_summary(&snapshot.trip_id).await?;
            let by_day = self.expenses.daily_summary(&snapshot.trip_id).await?;
            Ok::<_, crate::error::AppError>((total_spent, by_category, by_day))
        };
        match totals.await {
            Ok((total_spent, by_category, by_day)) => {
                let total_budget = trip.as_ref().map_or(0.0, |t| t.total_budget);
                let currency = trip.map_or_else(|| "USD".to_string(), |t| t.currency);
                ctx.update(|s| {
                    s.is_loading = false;
                    s.expenses = expenses;
                    s.total_budget = total_budget;
                    s.total_spent = total_spent;
                    s.remaining_budget = total_budget - total_spent;
                    s.currency = currency;
                    s.category_totals = by_category
                        .into_iter()
                        .map(|sum| (sum.category, sum.total))
                        .collect();
                    s.daily_totals = by_day
                        .into_iter()
                        .map(|sum| (sum.date, sum.total))
                        .collect();
                });
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn add_expense(&self, mut expense: Expense, ctx: &ScreenCtx<Self>) {
        if expense.amount < 0.0 {
            let message = "Expense amount cannot be negative".to_string();
            ctx.update(|s| s.error = Some(message.clone()));
            ctx.effect(ExpenseEffect::ShowError(message)).await;
            return;
        }
        expense.trip_id = ctx.state().trip_id;
        expense.touch();
        match self.expenses.insert_expense(&expense).await {
            Ok(()) => {
                ctx.effect(ExpenseEffect::ExpenseAdded).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn update_expense(&self, mut expense: Expense, ctx: &ScreenCtx<Self>) {
        if expense.amount < 0.0 {
            let message = "Expense amount cannot be negative".to_string();
            ctx.update(|s| s.error = Some(message.clone()));
            ctx.effect(ExpenseEffect::ShowError(message)).await;
            return;
        }
        expense.touch();
        match self.expenses.update_expense(&expense).await {
            Ok(()) => {
                ctx.effect(ExpenseEffect::ExpenseUpdated).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn delete_expense(&self, expense_id: &str, ctx: &ScreenCtx<Self>) {
        match self.expenses.delete_expense_by_id(expense_id).await {
            Ok(()) => {
                ctx.effect(ExpenseEffect::ExpenseDeleted).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn update_budget(&self, budget: f64, ctx: &ScreenCtx<Self>) {
        let trip_id = ctx.state().trip_id;
        let trip = match self.trips.trip_by_id(&trip_id).await {
            Ok(Some(trip)) => trip,
            Ok(None) => return self.fail("Trip not found", ctx).await,
            Err(err) => return self.fail(err, ctx).await,
        };
        let mut trip = trip;
        trip.total_budget = budget;
        trip.touch();
        match self.trips.update_trip(&trip).await {
            Ok(()) => {
                ctx.effect(ExpenseEffect::BudgetUpdated).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn update_currency(&self, currency: String, ctx: &ScreenCtx<Self>) {
        let trip_id = ctx.state().trip_id;
        let mut trip = match self.trips.trip_by_id(&trip_id).await {
            Ok(Some(trip)) => trip,
            Ok(None) => return self.fail("Trip not found", ctx).await,
            Err(err) => return self.fail(err, ctx).await,
        };
        trip.currency = currency;
        trip.touch();
        match self.trips.update_trip(&trip).await {
            Ok(()) => self.load(ctx).await,
            Err(err) => self.fail(err, ctx).await,
        }
    }
}

#[async_trait]
impl Screen for ExpenseScreen {
    type State = ExpenseState;
    type Intent = ExpenseIntent;
    type Effect = ExpenseEffect;

    async fn handle(&mut self, intent: ExpenseIntent, ctx: &ScreenCtx<Self>) {
        match intent {
            ExpenseIntent::SetTrip(trip_id) => {
                ctx.update(|s| s.trip_id = trip_id);
                self.load(ctx).await;
            }
            ExpenseIntent::LoadExpenses => self.load(ctx).await,
            ExpenseIntent::FilterByCategory(category) => {
                ctx.update(|s| {
                    s.selected_category = category;
                    s.selected_date = None;
                });
                self.load(ctx).await;
            }
            ExpenseIntent::FilterByDate(date) => {
                ctx.update(|s| {
                    s.selected_date = date;
                    s.selected_category = None;
                });
                self.load(ctx).await;
            }
            ExpenseIntent::AddExpense(expense) => self.add_expense(expense, ctx).await,
            ExpenseIntent::UpdateExpense(expense) => self.update_expense(expense, ctx).await,
            ExpenseIntent::DeleteExpense { expense_id } => {
                self.delete_expense(&expense_id, ctx).await
            }
            ExpenseIntent::UpdateBudget(budget) => self.update_budget(budget, ctx).await,
            ExpenseIntent::UpdateCurrency(currency) => self.update_currency(currency, ctx).await,
            ExpenseIntent::ExportExpenses => {
                // File generation is not implemented; only the path is produced.
                let file_path = format!(
                    "trip_expenses_{}_{}.csv",
                    ctx.state().trip_id,
                    Utc::now().timestamp_millis()
                );
                ctx.effect(ExpenseEffect::ShowExportSuccess { file_path }).await;
            }
            ExpenseIntent::OpenAddExpense => {
                ctx.effect(ExpenseEffect::NavigateToAddExpense).await
            }
            ExpenseIntent::OpenEditExpense { expense_id } => {
                ctx.effect(ExpenseEffect::NavigateToEditExpense { expense_id })
                    .await
            }
        }
    }
}
