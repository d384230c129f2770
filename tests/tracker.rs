mod common;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::TestApp;
use tokio::sync::{mpsc, Mutex};
use voyage::error::AppError;
use voyage::models::Trip;
use voyage::services::{LocationFix, LocationSource, LocationTracker};

/// Hands out a pre-built fix channel once; useful for driving the tracker
/// from a test.
struct ChannelSource {
    rx: Mutex<Option<mpsc::Receiver<LocationFix>>>,
}

impl ChannelSource {
    fn new() -> (Self, mpsc::Sender<LocationFix>) {
        let (tx, rx) = mpsc::channel(8);
        (
            Self {
                rx: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl LocationSource for ChannelSource {
    async fn subscribe(&self) -> Result<mpsc::Receiver<LocationFix>, AppError> {
        self.rx
            .lock()
            .await
            .take()
            .ok_or_else(|| AppError::Data("source already subscribed".to_string()))
    }
}

struct DeniedSource;

#[async_trait]
impl LocationSource for DeniedSource {
    async fn subscribe(&self) -> Result<mpsc::Receiver<LocationFix>, AppError> {
        Err(AppError::PermissionDenied)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

async fn wait_for_count(app: &TestApp, trip_id: &str, expected: i64) {
    for _ in 0..100 {
        let count = app
            .state
            .locations
            .location_count(trip_id)
            .await
            .expect("count");
        if count == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {expected} locations for trip {trip_id}");
}

#[tokio::test]
async fn fixes_are_recorded_as_auto_locations() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Tracked", "Alps", date(2024, 7, 1), date(2024, 7, 10));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    let tracker = LocationTracker::new(app.state.locations.clone());
    let (source, fixes) = ChannelSource::new();
    tracker.start(&trip.id, &source).await.expect("start");
    assert!(tracker.is_tracking().await);
    assert_eq!(tracker.current_trip().await, Some(trip.id.clone()));

    fixes
        .send(LocationFix {
            latitude: 46.0,
            longitude: 7.0,
        })
        .await
        .expect("send fix");
    fixes
        .send(LocationFix {
            latitude: 46.1,
            longitude: 7.1,
        })
        .await
        .expect("send fix");

    wait_for_count(&app, &trip.id, 2).await;
    let recorded = app
        .state
        .locations
        .locations_for_trip(&trip.id)
        .await
        .expect("list");
    assert!(recorded.iter().all(|l| !l.is_manual));
    assert!(recorded.iter().all(|l| l.name == "Tracked location"));

    tracker.stop().await;
    assert!(!tracker.is_tracking().await);
    assert_eq!(tracker.current_trip().await, None);
}

#[tokio::test]
async fn denied_permission_aborts_start() {
    let app = TestApp::new().await.expect("test app");
    let tracker = LocationTracker::new(app.state.locations.clone());

    let err = tracker
        .start("some-trip", &DeniedSource)
        .await
        .expect_err("start must fail");
    assert!(matches!(err, AppError::PermissionDenied));
    assert!(!tracker.is_tracking().await);
}

#[tokio::test]
async fn starting_for_a_new_trip_replaces_the_old_recording() {
    let app = TestApp::new().await.expect("test app");
    let first = Trip::new("First", "A", date(2024, 7, 1), date(2024, 7, 5));
    let second = Trip::new("Second", "B", date(2024, 8, 1), date(2024, 8, 5));
    app.state
        .trips
        .insert_trips(&[first.clone(), second.clone()])
        .await
        .expect("trips");

    let tracker = LocationTracker::new(app.state.locations.clone());
    let (source_a, _fixes_a) = ChannelSource::new();
    tracker.start(&first.id, &source_a).await.expect("start first");

    let (source_b, fixes_b) = ChannelSource::new();
    tracker.start(&second.id, &source_b).await.expect("start second");
    assert_eq!(tracker.current_trip().await, Some(second.id.clone()));

    fixes_b
        .send(LocationFix {
            latitude: 1.0,
            longitude: 2.0,
        })
        .await
        .expect("send fix");
    wait_for_count(&app, &second.id, 1).await;
    assert_eq!(
        app.state
            .locations
            .location_count(&first.id)
            .await
            .expect("count"),
        0
    );
}

#[tokio::test]
async fn denied_permission_leaves_existing_recording_running() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Running", "C", date(2024, 7, 1), date(2024, 7, 5));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    let tracker = LocationTracker::new(app.state.locations.clone());
    let (source, fixes) = ChannelSource::new();
    tracker.start(&trip.id, &source).await.expect("start");

    tracker
        .start("other-trip", &DeniedSource)
        .await
        .expect_err("denied");
    assert_eq!(tracker.current_trip().await, Some(trip.id.clone()));

    fixes
        .send(LocationFix {
            latitude: 5.0,
            longitude: 6.0,
        })
        .await
        .expect("send fix");
    wait_for_count(&app, &trip.id, 1).await;
}
