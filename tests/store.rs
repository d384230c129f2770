mod common;

use chrono::{Duration, NaiveDate, Utc};
use common::TestApp;
use voyage::models::{
    BookingOption, BookingTicket, Expense, ExpenseCategory, ItineraryItem, JournalEntry, Trip,
    TripStatus, VisitedLocation,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[tokio::test]
async fn trip_round_trips_through_storage() {
    let app = TestApp::new().await.expect("test app");
    let mut trip = Trip::new("Japan", "Tokyo", date(2024, 4, 1), date(2024, 4, 10));
    trip.notes = "Cherry blossom season".to_string();
    trip.total_budget = 3000.0;
    trip.currency = "JPY".to_string();
    trip.cover_image_url = Some("https://example.com/fuji.jpg".to_string());

    app.state.trips.insert_trip(&trip).await.expect("insert");
    let loaded = app
        .state
        .trips
        .trip_by_id(&trip.id)
        .await
        .expect("fetch")
        .expect("trip exists");
    assert_eq!(loaded, trip);
}

#[tokio::test]
async fn trip_lists_split_by_date_window_not_status() {
    let app = TestApp::new().await.expect("test app");
    let today = Utc::now().date_naive();

    let current = Trip::new("Now", "Here", today - Duration::days(1), today + Duration::days(1));
    let future = Trip::new("Later", "There", today + Duration::days(10), today + Duration::days(14));
    let mut finished = Trip::new(
        "Before",
        "Elsewhere",
        today - Duration::days(14),
        today - Duration::days(10),
    );
    // A stale stored status does not affect the date-window queries.
    finished.status = TripStatus::Active;
    app.state
        .trips
        .insert_trips(&[current.clone(), future.clone(), finished.clone()])
        .await
        .expect("insert");

    let active = app.state.trips.active_trip().await.expect("active");
    assert_eq!(active.map(|t| t.id), Some(current.id.clone()));

    let upcoming = app.state.trips.upcoming_trips(5).await.expect("upcoming");
    assert_eq!(upcoming.iter().map(|t| &t.id).collect::<Vec<_>>(), [&future.id]);

    let past = app.state.trips.past_trips(5).await.expect("past");
    assert_eq!(past.iter().map(|t| &t.id).collect::<Vec<_>>(), [&finished.id]);
}

#[tokio::test]
async fn active_trip_window_is_inclusive_on_both_ends() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Edges", "X", date(2024, 6, 1), date(2024, 6, 5));
    app.state.trips.insert_trip(&trip).await.expect("insert");

    for day in [date(2024, 6, 1), date(2024, 6, 5)] {
        let found = app.state.trips.active_trip_on(day).await.expect("query");
        assert_eq!(found.map(|t| t.id), Some(trip.id.clone()), "day {day}");
    }
    assert!(app
        .state
        .trips
        .active_trip_on(date(2024, 5, 31))
        .await
        .expect("query")
        .is_none());
    assert!(app
        .state
        .trips
        .active_trip_on(date(2024, 6, 6))
        .await
        .expect("query")
        .is_none());
}

#[tokio::test]
async fn deleting_a_trip_cascades_to_all_children() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Doomed", "Gone", date(2024, 1, 1), date(2024, 1, 5));
    app.state.trips.insert_trip(&trip).await.expect("insert trip");

    let item = ItineraryItem::new(&trip.id, "Museum", date(2024, 1, 2));
    app.state.itinerary.insert_item(&item).await.expect("item");

    let expense = Expense::new(&trip.id, "Lunch", ExpenseCategory::Food, 12.5, date(2024, 1, 2));
    app.state.expenses.insert_expense(&expense).await.expect("expense");

    let location = VisitedLocation::manual(&trip.id, "Louvre", 48.8606, 2.3376);
    app.state.locations.insert_location(&location).await.expect("location");

    let entry = JournalEntry::new(&trip.id, date(2024, 1, 2), "Day two");
    app.state.journal.insert_entry(&entry).await.expect("entry");

    let option = BookingOption::new(&trip.id, "hotel", "Grand Hotel", 180.0);
    app.state.booking_options.insert_option(&option).await.expect("option");

    let ticket = BookingTicket::new(&trip.id, &option.id, "ABC123");
    app.state.booking_tickets.insert_ticket(&ticket).await.expect("ticket");

    app.state.trips.delete_trip_by_id(&trip.id).await.expect("delete");

    assert!(app.state.itinerary.items_for_trip(&trip.id).await.expect("items").is_empty());
    assert!(app.state.expenses.expenses_for_trip(&trip.id).await.expect("expenses").is_empty());
    assert!(app.state.locations.locations_for_trip(&trip.id).await.expect("locations").is_empty());
    assert!(app.state.journal.entries_for_trip(&trip.id).await.expect("entries").is_empty());
    assert!(app.state.booking_options.options_for_trip(&trip.id).await.expect("options").is_empty());
    assert!(app.state.booking_tickets.tickets_for_trip(&trip.id).await.expect("tickets").is_empty());
}

#[tokio::test]
async fn itinerary_items_order_by_sort_order_then_date_and_time() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Ordered", "Y", date(2024, 3, 1), date(2024, 3, 7));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    let mut late = ItineraryItem::new(&trip.id, "Dinner", date(2024, 3, 2));
    late.sort_order = 1;
    late.time = "19:00".to_string();
    let mut early = ItineraryItem::new(&trip.id, "Breakfast", date(2024, 3, 2));
    early.sort_order = 0;
    early.time = "08:00".to_string();
    // Same sort_order as `late`; the (date, time) tie-break puts it first.
    let mut tied = ItineraryItem::new(&trip.id, "Lunch", date(2024, 3, 2));
    tied.sort_order = 1;
    tied.time = "12:00".to_string();

    app.state
        .itinerary
        .insert_items(&[late.clone(), early.clone(), tied.clone()])
        .await
        .expect("insert");

    let listed = app.state.itinerary.items_for_trip(&trip.id).await.expect("list");
    let titles: Vec<&str> = listed.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Breakfast", "Lunch", "Dinner"]);
}

#[tokio::test]
async fn max_sort_order_tracks_highest_value() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Sorted", "Z", date(2024, 3, 1), date(2024, 3, 7));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    assert_eq!(app.state.itinerary.max_sort_order(&trip.id).await.expect("max"), None);

    let mut item = ItineraryItem::new(&trip.id, "One", date(2024, 3, 1));
    item.sort_order = 4;
    app.state.itinerary.insert_item(&item).await.expect("insert");
    assert_eq!(
        app.state.itinerary.max_sort_order(&trip.id).await.expect("max"),
        Some(4)
    );
}

#[tokio::test]
async fn category_totals_sum_to_trip_total() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Spendy", "W", date(2024, 2, 1), date(2024, 2, 10));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    let expenses = [
        Expense::new(&trip.id, "Flight out", ExpenseCategory::Flight, 420.5, date(2024, 2, 1)),
        Expense::new(&trip.id, "Hotel night", ExpenseCategory::Hotel, 130.0, date(2024, 2, 1)),
        Expense::new(&trip.id, "Ramen", ExpenseCategory::Food, 11.25, date(2024, 2, 2)),
        Expense::new(&trip.id, "Sushi", ExpenseCategory::Food, 28.75, date(2024, 2, 3)),
    ];
    app.state.expenses.insert_expenses(&expenses).await.expect("insert");

    let total = app
        .state
        .expenses
        .total_for_trip(&trip.id)
        .await
        .expect("total")
        .expect("some expenses");
    let by_category = app.state.expenses.category_summary(&trip.id).await.expect("summary");
    let summed: f64 = by_category.iter().map(|t| t.total).sum();
    assert!((summed - total).abs() < 1e-9, "{summed} != {total}");

    let food = by_category
        .iter()
        .find(|t| t.category == ExpenseCategory::Food)
        .expect("food bucket");
    assert!((food.total - 40.0).abs() < 1e-9);

    let daily = app.state.expenses.daily_summary(&trip.id).await.expect("daily");
    let day_one = daily.iter().find(|d| d.date == date(2024, 2, 1)).expect("day one");
    assert!((day_one.total - 550.5).abs() < 1e-9);
}

#[tokio::test]
async fn total_is_none_for_trip_without_expenses() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Frugal", "V", date(2024, 2, 1), date(2024, 2, 3));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    assert_eq!(app.state.expenses.total_for_trip(&trip.id).await.expect("total"), None);
}

#[tokio::test]
async fn journal_entry_by_date_returns_the_matching_entry() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Diary", "U", date(2024, 5, 1), date(2024, 5, 10));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    let mut entry = JournalEntry::new(&trip.id, date(2024, 5, 3), "Great day");
    entry.mood = Some("Happy".to_string());
    entry.photo_urls = vec!["a.jpg".to_string(), "b.jpg".to_string()];
    app.state.journal.insert_entry(&entry).await.expect("insert");

    let found = app
        .state
        .journal
        .entry_by_date(&trip.id, date(2024, 5, 3))
        .await
        .expect("query")
        .expect("entry exists");
    assert_eq!(found, entry);
    assert_eq!(found.photo_count(), 2);

    assert!(app
        .state
        .journal
        .entry_by_date(&trip.id, date(2024, 5, 4))
        .await
        .expect("query")
        .is_none());

    let happy = app
        .state
        .journal
        .entries_by_mood(&trip.id, "Happy")
        .await
        .expect("mood query");
    assert_eq!(happy.len(), 1);
}

#[tokio::test]
async fn unique_coordinates_deduplicate_repeat_visits() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Walker", "T", date(2024, 7, 1), date(2024, 7, 5));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    let locations = [
        VisitedLocation::auto(&trip.id, 35.0, 139.0),
        VisitedLocation::auto(&trip.id, 35.0, 139.0),
        VisitedLocation::auto(&trip.id, 35.1, 139.1),
    ];
    app.state.locations.insert_locations(&locations).await.expect("insert");

    assert_eq!(app.state.locations.location_count(&trip.id).await.expect("count"), 3);
    let coords = app.state.locations.unique_coordinates(&trip.id).await.expect("coords");
    assert_eq!(coords.len(), 2);
}

#[tokio::test]
async fn deleting_auto_locations_keeps_manual_ones() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Mixed", "S", date(2024, 7, 1), date(2024, 7, 5));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    app.state
        .locations
        .insert_locations(&[
            VisitedLocation::auto(&trip.id, 1.0, 2.0),
            VisitedLocation::manual(&trip.id, "Pinned", 3.0, 4.0),
        ])
        .await
        .expect("insert");

    app.state.locations.delete_auto_locations(&trip.id).await.expect("delete");
    let remaining = app.state.locations.locations_for_trip(&trip.id).await.expect("list");
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].is_manual);
    assert_eq!(remaining[0].name, "Pinned");
}

#[tokio::test]
async fn selecting_a_booking_option_deselects_others_of_its_kind() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Booker", "R", date(2024, 8, 1), date(2024, 8, 10));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    let mut cheap = BookingOption::new(&trip.id, "hotel", "Hostel", 40.0);
    cheap.is_selected = true;
    let fancy = BookingOption::new(&trip.id, "hotel", "Palace", 400.0);
    let flight = BookingOption::new(&trip.id, "flight", "Red-eye", 220.0);
    app.state
        .booking_options
        .insert_options(&[cheap.clone(), fancy.clone(), flight.clone()])
        .await
        .expect("insert");
    app.state.booking_options.select_option(&flight).await.expect("select flight");

    app.state.booking_options.select_option(&fancy).await.expect("select fancy");

    let selected = app.state.booking_options.selected_options(&trip.id).await.expect("selected");
    let mut ids: Vec<&str> = selected.iter().map(|o| o.id.as_str()).collect();
    ids.sort();
    let mut expected = vec![fancy.id.as_str(), flight.id.as_str()];
    expected.sort();
    // One selection per kind: the hotel switch left the flight alone.
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn deleting_an_option_removes_its_tickets() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Ticketed", "Q", date(2024, 8, 1), date(2024, 8, 10));
    app.state.trips.insert_trip(&trip).await.expect("trip");

    let option = BookingOption::new(&trip.id, "flight", "Morning", 150.0);
    app.state.booking_options.insert_option(&option).await.expect("option");
    let ticket = BookingTicket::new(&trip.id, &option.id, "ZZ999");
    app.state.booking_tickets.insert_ticket(&ticket).await.expect("ticket");

    app.state
        .booking_options
        .delete_option_by_id(&option.id)
        .await
        .expect("delete option");
    assert!(app
        .state
        .booking_tickets
        .tickets_for_option(&option.id)
        .await
        .expect("tickets")
        .is_empty());
}

#[tokio::test]
async fn cascade_delete_wakes_child_table_watchers() {
    let app = TestApp::new().await.expect("test app");
    let trip = Trip::new("Watched", "O", date(2024, 9, 1), date(2024, 9, 5));
    app.state.trips.insert_trip(&trip).await.expect("trip");
    let item = ItineraryItem::new(&trip.id, "Packing", date(2024, 9, 1));
    app.state.itinerary.insert_item(&item).await.expect("item");

    let mut live = app.state.itinerary.watch_items_for_trip(&trip.id);
    let first = live.next().await.expect("initial snapshot").expect("ok");
    assert_eq!(first.len(), 1);

    // The delete happens on the trips table; the cascade must still reach
    // subscribers of the itinerary table.
    app.state.trips.delete_trip_by_id(&trip.id).await.expect("delete");
    let second = live.next().await.expect("post-delete snapshot").expect("ok");
    assert!(second.is_empty());
}

#[tokio::test]
async fn live_query_reruns_after_writes() {
    let app = TestApp::new().await.expect("test app");
    let mut live = app.state.trips.watch_all_trips();

    let first = live.next().await.expect("initial snapshot").expect("ok");
    assert!(first.is_empty());

    let trip = Trip::new("Watched", "P", date(2024, 9, 1), date(2024, 9, 5));
    app.state.trips.insert_trip(&trip).await.expect("insert");

    let second = live.next().await.expect("second snapshot").expect("ok");
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, trip.id);
}
