use tracing::{error, info};
use voyage::config::AppConfig;
use voyage::db::{init_pool, run_migrations};
use voyage::error::AppError;
use voyage::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let db = init_pool(&config.database_url).await?;

    if let Err(err) = run_migrations(&db).await {
        error!("migration failed: {err:?}");
        return Err(err);
    }

    let state = AppState::new(config, db);

    let upcoming = state.trips.upcoming_trips(state.config.trip_list_limit).await?;
    let past = state.trips.past_trips(state.config.trip_list_limit).await?;
    match state.trips.active_trip().await? {
        Some(trip) => info!(
            "active trip: {} ({} to {})",
            trip.name, trip.start_date, trip.end_date
        ),
        None => info!("no active trip"),
    }
    info!(
        "{} upcoming trip(s), {} recent past trip(s)",
        upcoming.len(),
        past.len()
    );

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,voyage=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
