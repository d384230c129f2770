use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::geo;
use crate::models::{ExpenseCategory, Trip};
use crate::repository::{
    ExpenseRepository, ItineraryRepository, JournalRepository, TripRepository,
    VisitedLocationRepository,
};

use super::machine::{Screen, ScreenCtx};

#[derive(Debug, Clone, Default)]
pub struct TripSummaryState {
    pub is_loading: bool,
    pub trip_id: String,
    pub trip: Option<Trip>,
    pub total_spent: f64,
    pub expense_breakdown: HashMap<ExpenseCategory, f64>,
    pub most_expensive_category: Option<ExpenseCategory>,
    pub places_visited: i64,
    pub distance_travelled_km: f64,
    pub items_completed: usize,
    pub items_total: usize,
    pub journal_entry_count: i64,
    pub photo_count: usize,
    pub duration_days: i64,
    pub error: Option<String>,
}

impl TripSummaryState {
    pub fn for_trip(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub enum TripSummaryIntent {
    SetTrip(String),
    LoadSummary,
    ExportCsv,
    ExportPdf,
    GenerateReport,
    ShareTrip,
    OpenMap,
    OpenJournal,
    GoBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripSummaryEffect {
    ShowError(String),
    ShowExportSuccess { file_path: String },
    ShowGeneratingReport,
    ShowShareDialog { content: String },
    NavigateToMap,
    NavigateToJournal,
    NavigateBack,
}

pub struct TripSummaryScreen {
    trips: TripRepository,
    expenses: ExpenseRepository,
    locations: VisitedLocationRepository,
    itinerary: ItineraryRepository,
    journal: JournalRepository,
}

impl TripSummaryScreen {
    pub fn new(
        trips: TripRepository,
        expenses: ExpenseRepository,
        locations: VisitedLocationRepository,
        itinerary: ItineraryRepository,
        journal: JournalRepository,
    ) -> Self {
        Self {
            trips,
            expenses,
            locations,
            itinerary,
            journal,
        }
    }

    async fn fail(&self, err: impl ToString, ctx: &ScreenCtx<Self>) {
        let message = err.to_string();
        ctx.update(|s| {
            s.is_loading = false;
            s.error = Some(message.clone());
        });
        ctx.effect(TripSummaryEffect::ShowError(message)).await;
    }

    async fn load(&self, ctx: &ScreenCtx<Self>) {
        let trip_id = ctx.state().trip_id;
        if trip_id.is_empty() {
            return;
        }
        ctx.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let trip = match self.trips.trip_by_id(&trip_id).await {
            Ok(Some(trip)) => trip,
            Ok(None) => return self.fail("Trip not found", ctx).await,
            Err(err) => return self.fail(err, ctx).await,
        };

        let gathered = async {
            let total_spent = self
                .expenses
                .total_for_trip(&trip_id)
                .await?
                .unwrap_or(0.0);
            let breakdown = self.expenses.category_summary(&trip_id).await?;
            let places_visited = self.locations.location_count(&trip_id).await?;
            let coordinates = self.locations.unique_coordinates(&trip_id).await?;
            let items = self.itinerary.items_for_trip(&trip_id).await?;
            let journal_entry_count = self.journal.entry_count(&trip_id).await?;
            let entries = self.journal.entries_for_trip(&trip_id).await?;
            Ok::<_, crate::error::AppError>((
                total_spent,
                breakdown,
                places_visited,
                coordinates,
                items,
                journal_entry_count,
                entries,
            ))
        };

        match gathered.await {
            Ok((
                total_spent,
                breakdown,
                places_visited,
                coordinates,
                items,
                journal_entry_count,
                entries,
            )) => {
                let most_expensive_category = breakdown
                    .iter()
                    .max_by(|a, b| a.total.total_cmp(&b.total))
                    .map(|t| t.category);
                let distance_travelled_km = geo::path_length_km(&coordinates);
                let items_completed = items.iter().filter(|item| item.is_completed).count();
                let photo_count = entries.iter().map(|entry| entry.photo_count()).sum();
                let duration_days = trip.duration_days();
                ctx.update(|s| {
                    s.is_loading = false;
                    s.trip = Some(trip.clone());
                    s.total_spent = total_spent;
                    s.expense_breakdown = breakdown
                        .iter()
                        .map(|t| (t.category, t.total))
                        .collect();
                    s.most_expensive_category = most_expensive_category;
                    s.places_visited = places_visited;
                    s.distance_travelled_km = distance_travelled_km;
                    s.items_completed = items_completed;
                    s.items_total = items.len();
                    s.journal_entry_count = journal_entry_count;
                    s.photo_count = photo_count;
                    s.duration_days = duration_days;
                });
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    fn share_content(state: &TripSummaryState) -> String {
        let Some(trip) = &state.trip else {
            return String::new();
        };
        format!(
            "{} ({}): {} days, {} places visited, {:.1} km travelled, {:.2} {} spent",
            trip.name,
            trip.destination,
            state.duration_days,
            state.places_visited,
            state.distance_travelled_km,
            state.total_spent,
            trip.currency,
        )
    }

    // File generation is not implemented; only the path is produced.
    fn export_path(trip_id: &str, extension: &str) -> String {
        format!(
            "trip_summary_{}_{}.{}",
            trip_id,
            Utc::now().timestamp_millis(),
            extension
        )
    }
}

#[async_trait]
impl Screen for TripSummaryScreen {
    type State = TripSummaryState;
    type Intent = TripSummaryIntent;
    type Effect = TripSummaryEffect;

    async fn handle(&mut self, intent: TripSummaryIntent, ctx: &ScreenCtx<Self>) {
        match intent {
            TripSummaryIntent::SetTrip(trip_id) => {
                ctx.update(|s| s.trip_id = trip_id);
                self.load(ctx).await;
            }
            TripSummaryIntent::LoadSummary => self.load(ctx).await,
            TripSummaryIntent::ExportCsv => {
                let file_path = Self::export_path(&ctx.state().trip_id, "csv");
                ctx.effect(TripSummaryEffect::ShowExportSuccess { file_path })
                    .await;
            }
            TripSummaryIntent::ExportPdf => {
                let file_path = Self::export_path(&ctx.state().trip_id, "pdf");
                ctx.effect(TripSummaryEffect::ShowExportSuccess { file_path })
                    .await;
            }
            TripSummaryIntent::GenerateReport => {
                ctx.effect(TripSummaryEffect::ShowGeneratingReport).await;
            }
            TripSummaryIntent::ShareTrip => {
                let content = Self::share_content(&ctx.state());
                ctx.effect(TripSummaryEffect::ShowShareDialog { content })
                    .await;
            }
            TripSummaryIntent::OpenMap => ctx.effect(TripSummaryEffect::NavigateToMap).await,
            TripSummaryIntent::OpenJournal => {
                ctx.effect(TripSummaryEffect::NavigateToJournal).await
            }
            TripSummaryIntent::GoBack => ctx.effect(TripSummaryEffect::NavigateBack).await,
        }
    }
}
