use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::VisitedLocation;
use crate::repository::VisitedLocationRepository;

/// A single position report from whatever is providing location updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of location fixes. `subscribe` fails with
/// [`AppError::PermissionDenied`] when the platform refuses access, which
/// aborts the start of tracking before anything is recorded.
#[async_trait]
pub trait LocationSource: Send + Sync + 'static {
    async fn subscribe(&self) -> Result<mpsc::Receiver<LocationFix>, AppError>;
}

struct Tracking {
    trip_id: String,
    task: JoinHandle<()>,
}

/// Records incoming fixes as auto visited locations for one trip at a time.
/// Starting for a new trip stops the previous recording first.
#[derive(Clone)]
pub struct LocationTracker {
    locations: VisitedLocationRepository,
    current: Arc<Mutex<Option<Tracking>>>,
}

impl LocationTracker {
    pub fn new(locations: VisitedLocationRepository) -> Self {
        Self {
            locations,
            current: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn start(
        &self,
        trip_id: impl Into<String>,
        source: &dyn LocationSource,
    ) -> Result<(), AppError> {
        let trip_id = trip_id.into();
        // Subscribe before touching existing tracking, so a denied permission
        // leaves the previous recording running.
        let mut fixes = source.subscribe().await?;

        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            previous.task.abort();
        }

        let locations = self.locations.clone();
        let task_trip_id = trip_id.clone();
        let task = tokio::spawn(async move {
            while let Some(fix) = fixes.recv().await {
                let location =
                    VisitedLocation::auto(task_trip_id.clone(), fix.latitude, fix.longitude);
                if let Err(err) = locations.insert_location(&location).await {
                    warn!("failed to record tracked location: {err}");
                }
            }
            debug!("location stream for trip {task_trip_id} ended");
        });

        *current = Some(Tracking { trip_id, task });
        Ok(())
    }

    pub async fn stop(&self) {
        if let Some(tracking) = self.current.lock().await.take() {
            tracking.task.abort();
        }
    }

    pub async fn is_tracking(&self) -> bool {
        self.current.lock().await.is_some()
    }

    pub async fn current_trip(&self) -> Option<String> {
        self.current
            .lock()
            .await
            .as_ref()
            .map(|t| t.trip_id.clone())
    }
}
