use async_trait::async_trait;
use tracing::warn;

use crate::models::Trip;
use crate::repository::TripRepository;

use super::machine::{Screen, ScreenCtx};

#[derive(Debug, Clone, Default)]
pub struct TripListState {
    pub is_loading: bool,
    pub active_trip: Option<Trip>,
    pub upcoming_trips: Vec<Trip>,
    pub past_trips: Vec<Trip>,
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum TripListIntent {
    LoadTrips,
    RefreshTrips,
    DeleteTrip { trip_id: String },
    OpenTrip { trip_id: String },
    OpenCreateTrip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripListEffect {
    ShowError(String),
    NavigateToTrip { trip_id: String },
    NavigateToCreateTrip,
}

pub struct TripListScreen {
    trips: TripRepository,
    list_limit: i64,
}

impl TripListScreen {
    pub fn new(trips: TripRepository, list_limit: i64) -> Self {
        Self { trips, list_limit }
    }

    async fn load(&self, ctx: &ScreenCtx<Self>) {
        ctx.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        // Three views of the same table, combined into one state update.
        let (active, upcoming, past) = tokio::join!(
            self.trips.active_trip(),
            self.trips.upcoming_trips(self.list_limit),
            self.trips.past_trips(self.list_limit),
        );

        match active.and_then(|active| Ok((active, upcoming?, past?))) {
            Ok((active, upcoming, past)) => {
                ctx.update(|s| {
                    s.is_loading = false;
                    s.active_trip = active;
                    s.upcoming_trips = upcoming;
                    s.past_trips = past;
                });
            }
            Err(err) => {
                let message = err.to_string();
                warn!("trip list load failed: {message}");
                ctx.update(|s| {
                    s.is_loading = false;
                    s.error = Some(message.clone());
                });
                ctx.effect(TripListEffect::ShowError(message)).await;
            }
        }
    }

    async fn delete_trip(&self, trip_id: &str, ctx: &ScreenCtx<Self>) {
        match self.trips.delete_trip_by_id(trip_id).await {
            Ok(()) => self.load(ctx).await,
            Err(err) => {
                let message = err.to_string();
                ctx.update(|s| s.error = Some(message.clone()));
                ctx.effect(TripListEffect::ShowError(message)).await;
            }
        }
    }
}

#[async_trait]
impl Screen for TripListScreen {
    type State = TripListState;
    type Intent = TripListIntent;
    type Effect = TripListEffect;

    async fn handle(&mut self, intent: TripListIntent, ctx: &ScreenCtx<Self>) {
        match intent {
            TripListIntent::LoadTrips | TripListIntent::RefreshTrips => self.load(ctx).await,
            TripListIntent::DeleteTrip { trip_id } => self.delete_trip(&trip_id, ctx).await,
            TripListIntent::OpenTrip { trip_id } => {
                ctx.effect(TripListEffect::NavigateToTrip { trip_id }).await;
            }
            TripListIntent::OpenCreateTrip => {
                ctx.effect(TripListEffect::NavigateToCreateTrip).await;
            }
        }
    }
}
