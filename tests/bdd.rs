#![allow(dead_code)]

use std::{fmt, fs::File};

use anyhow::Context;
use chrono::NaiveDate;
use cucumber::{given, then, when, World as _};
use tempfile::TempDir;
use voyage::{
    config::AppConfig,
    db::init_pool,
    models::{Expense, ItineraryItem, JournalEntry, Trip},
    state::AppState,
};

#[derive(Debug, cucumber::World, Default)]
struct AppWorld {
    state: Option<TestState>,
    current_trip: Option<Trip>,
}

impl AppWorld {
    fn app_state(&self) -> &AppState {
        self.state
            .as_ref()
            .expect("state must be initialised first")
            .app()
    }

    fn trip(&self) -> &Trip {
        self.current_trip
            .as_ref()
            .expect("a trip must be created first")
    }
}

struct TestState {
    app: AppState,
    _root: TempDir,
}

impl fmt::Debug for TestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestState").finish()
    }
}

impl TestState {
    async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for bdd world")?;
        let db_path = root.path().join("bdd.sqlite");
        File::create(&db_path)?;
        let database_url = format!("sqlite://{}", db_path.to_string_lossy());

        let config = AppConfig {
            database_url: database_url.clone(),
            ..AppConfig::default()
        };

        let db = init_pool(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&db).await?;

        let app = AppState::new(config, db);
        Ok(Self { app, _root: root })
    }

    fn app(&self) -> &AppState {
        &self.app
    }
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date in YYYY-MM-DD form")
}

#[given("a fresh application state")]
async fn given_fresh_state(world: &mut AppWorld) {
    world.state = Some(TestState::new().await.expect("state"));
    world.current_trip = None;
}

#[when(regex = r#"^I create a trip \"([^\"]+)\" to \"([^\"]+)\" from (\S+) to (\S+)$"#)]
async fn when_create_trip(
    world: &mut AppWorld,
    name: String,
    destination: String,
    start: String,
    end: String,
) {
    let trip = Trip::new(name, destination, parse_date(&start), parse_date(&end));
    world
        .app_state()
        .trips
        .insert_trip(&trip)
        .await
        .expect("insert trip");
    world.current_trip = Some(trip);
}

#[when(regex = r#"^I add an itinerary item \"([^\"]+)\" on (\S+)$"#)]
async fn when_add_item(world: &mut AppWorld, title: String, date: String) {
    let trip_id = world.trip().id.clone();
    let itinerary = world.app_state().itinerary.clone();
    let next_order = itinerary
        .max_sort_order(&trip_id)
        .await
        .expect("max sort order")
        .map_or(0, |m| m + 1);
    let mut item = ItineraryItem::new(&trip_id, title, parse_date(&date));
    item.sort_order = next_order;
    itinerary.insert_item(&item).await.expect("insert item");
}

#[when(regex = r#"^I complete the itinerary item \"([^\"]+)\"$"#)]
async fn when_complete_item(world: &mut AppWorld, title: String) {
    let trip_id = world.trip().id.clone();
    let itinerary = world.app_state().itinerary.clone();
    let items = itinerary.items_for_trip(&trip_id).await.expect("items");
    let mut item = items
        .into_iter()
        .find(|i| i.title == title)
        .expect("item with the given title");
    item.is_completed = true;
    item.touch();
    itinerary.update_item(&item).await.expect("update item");
}

#[when(regex = r#"^I record an expense \"([^\"]+)\" of ([\d.]+) on (\S+)$"#)]
async fn when_record_expense(world: &mut AppWorld, title: String, amount: f64, date: String) {
    let trip_id = world.trip().id.clone();
    let expense = Expense::new(
        &trip_id,
        title,
        Default::default(),
        amount,
        parse_date(&date),
    );
    world
        .app_state()
        .expenses
        .insert_expense(&expense)
        .await
        .expect("insert expense");
}

#[when(regex = r#"^I write a journal entry \"([^\"]+)\" for (\S+)$"#)]
async fn when_write_journal(world: &mut AppWorld, title: String, date: String) {
    let trip_id = world.trip().id.clone();
    let entry = JournalEntry::new(&trip_id, parse_date(&date), title);
    world
        .app_state()
        .journal
        .insert_entry(&entry)
        .await
        .expect("insert entry");
}

#[when("I delete the trip")]
async fn when_delete_trip(world: &mut AppWorld) {
    let trip_id = world.trip().id.clone();
    world
        .app_state()
        .trips
        .delete_trip_by_id(&trip_id)
        .await
        .expect("delete trip");
}

#[then(regex = r"^the trip has (\d+) itinerary items$")]
async fn then_item_count(world: &mut AppWorld, expected: usize) {
    let trip_id = world.trip().id.clone();
    let items = world
        .app_state()
        .itinerary
        .items_for_trip(&trip_id)
        .await
        .expect("items");
    assert_eq!(items.len(), expected);
}

#[then(regex = r#"^the itinerary item \"([^\"]+)\" is completed$"#)]
async fn then_item_completed(world: &mut AppWorld, title: String) {
    let trip_id = world.trip().id.clone();
    let items = world
        .app_state()
        .itinerary
        .items_for_trip(&trip_id)
        .await
        .expect("items");
    let item = items
        .iter()
        .find(|i| i.title == title)
        .expect("item with the given title");
    assert!(item.is_completed);
}

#[then(regex = r#"^the itinerary items are ordered \"([^\"]+)\"$"#)]
async fn then_items_ordered(world: &mut AppWorld, expected: String) {
    let trip_id = world.trip().id.clone();
    let items = world
        .app_state()
        .itinerary
        .items_for_trip(&trip_id)
        .await
        .expect("items");
    let titles: Vec<String> = items.into_iter().map(|i| i.title).collect();
    let expected: Vec<String> = expected.split(", ").map(str::to_string).collect();
    assert_eq!(titles, expected);
}

#[then(regex = r"^the trip total spend is ([\d.]+)$")]
async fn then_total_spend(world: &mut AppWorld, expected: f64) {
    let trip_id = world.trip().id.clone();
    let total = world
        .app_state()
        .expenses
        .total_for_trip(&trip_id)
        .await
        .expect("total")
        .unwrap_or(0.0);
    assert!((total - expected).abs() < 1e-9, "{total} != {expected}");
}

#[then(regex = r"^the trip has (\d+) journal entries$")]
async fn then_journal_count(world: &mut AppWorld, expected: i64) {
    let trip_id = world.trip().id.clone();
    let count = world
        .app_state()
        .journal
        .entry_count(&trip_id)
        .await
        .expect("count");
    assert_eq!(count, expected);
}

#[then("no data remains for the trip")]
async fn then_no_data_remains(world: &mut AppWorld) {
    let trip_id = world.trip().id.clone();
    let app = world.app_state();
    assert!(app.trips.trip_by_id(&trip_id).await.expect("trip").is_none());
    assert!(app
        .itinerary
        .items_for_trip(&trip_id)
        .await
        .expect("items")
        .is_empty());
    assert!(app
        .expenses
        .expenses_for_trip(&trip_id)
        .await
        .expect("expenses")
        .is_empty());
    assert!(app
        .journal
        .entries_for_trip(&trip_id)
        .await
        .expect("entries")
        .is_empty());
}

#[tokio::main]
async fn main() {
    AppWorld::cucumber()
        .fail_on_skipped()
        .with_default_cli()
        .run("tests/features")
        .await;
}
