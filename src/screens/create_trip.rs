use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};

use crate::models::Trip;
use crate::repository::TripRepository;

use super::machine::{Screen, ScreenCtx};

#[derive(Debug, Clone)]
pub struct CreateTripState {
    pub is_loading: bool,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: String,
    pub total_budget: String,
    pub currency: String,
    pub cover_image_url: Option<String>,
    pub error: Option<String>,
    pub is_saved: bool,
}

impl Default for CreateTripState {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        Self {
            is_loading: false,
            name: String::new(),
            destination: String::new(),
            start_date: today,
            end_date: today + Duration::days(7),
            notes: String::new(),
            total_budget: String::new(),
            currency: "USD".to_string(),
            cover_image_url: None,
            error: None,
            is_saved: false,
        }
    }
}

#[derive(Debug)]
pub enum CreateTripIntent {
    SetName(String),
    SetDestination(String),
    SetStartDate(NaiveDate),
    SetEndDate(NaiveDate),
    SetNotes(String),
    SetTotalBudget(String),
    SetCurrency(String),
    SetCoverImage(Option<String>),
    SaveTrip,
    GoBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTripEffect {
    NavigateBack,
    ShowError(String),
    ShowSaveSuccess,
}

pub struct CreateTripScreen {
    trips: TripRepository,
}

impl CreateTripScreen {
    pub fn new(trips: TripRepository) -> Self {
        Self { trips }
    }

    /// Field-level validation happens here, before any persistence call.
    fn validate(state: &CreateTripState) -> Option<&'static str> {
        if state.name.trim().is_empty() {
            return Some("Trip name is required");
        }
        if state.destination.trim().is_empty() {
            return Some("Destination is required");
        }
        if state.start_date > state.end_date {
            return Some("Start date must be before end date");
        }
        None
    }

    async fn save(&self, ctx: &ScreenCtx<Self>) {
        let snapshot = ctx.state();
        if let Some(message) = Self::validate(&snapshot) {
            ctx.update(|s| s.error = Some(message.to_string()));
            return;
        }

        // Blank or unparseable budget input falls back to zero.
        let budget = snapshot.total_budget.trim().parse::<f64>().unwrap_or(0.0);

        ctx.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let mut trip = Trip::new(
            snapshot.name.clone(),
            snapshot.destination.clone(),
            snapshot.start_date,
            snapshot.end_date,
        );
        trip.notes = snapshot.notes.clone();
        trip.total_budget = budget;
        trip.currency = snapshot.currency.clone();
        trip.cover_image_url = snapshot.cover_image_url.clone();

        match self.trips.insert_trip(&trip).await {
            Ok(()) => {
                ctx.update(|s| {
                    s.is_loading = false;
                    s.is_saved = true;
                });
                ctx.effect(CreateTripEffect::NavigateBack).await;
                ctx.effect(CreateTripEffect::ShowSaveSuccess).await;
            }
            Err(err) => {
                let message = err.to_string();
                ctx.update(|s| {
                    s.is_loading = false;
                    s.error = Some(message.clone());
                });
                ctx.effect(CreateTripEffect::ShowError(message)).await;
            }
        }
    }
}

#[async_trait]
impl Screen for CreateTripScreen {
    type State = CreateTripState;
    type Intent = CreateTripIntent;
    type Effect = CreateTripEffect;

    async fn handle(&mut self, intent: CreateTripIntent, ctx: &ScreenCtx<Self>) {
        match intent {
            CreateTripIntent::SetName(name) => ctx.update(|s| {
                s.name = name;
                s.error = None;
            }),
            CreateTripIntent::SetDestination(destination) => ctx.update(|s| {
                s.destination = destination;
                s.error = None;
            }),
            CreateTripIntent::SetStartDate(date) => ctx.update(|s| {
                s.start_date = date;
                s.error = None;
            }),
            CreateTripIntent::SetEndDate(date) => ctx.update(|s| {
                s.end_date = date;
                s.error = None;
            }),
            CreateTripIntent::SetNotes(notes) => ctx.update(|s| {
                s.notes = notes;
                s.error = None;
            }),
            CreateTripIntent::SetTotalBudget(budget) => ctx.update(|s| {
                s.total_budget = budget;
                s.error = None;
            }),
            CreateTripIntent::SetCurrency(currency) => ctx.update(|s| {
                s.currency = currency;
                s.error = None;
            }),
            CreateTripIntent::SetCoverImage(url) => ctx.update(|s| {
                s.cover_image_url = url;
                s.error = None;
            }),
            CreateTripIntent::SaveTrip => self.save(ctx).await,
            CreateTripIntent::GoBack => ctx.effect(CreateTripEffect::NavigateBack).await,
        }
    }
}
