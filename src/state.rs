use crate::config::AppConfig;
use crate::db::DbPool;
use crate::repository::{
    BookingOptionRepository, BookingTicketRepository, ExpenseRepository, ItineraryRepository,
    JournalRepository, TripRepository, VisitedLocationRepository,
};
use crate::store::{
    BookingOptionStore, BookingTicketStore, ChangeFeed, ExpenseStore, ItineraryStore, JournalStore,
    LocationStore, TripStore,
};

/// Process-wide shared handles: one pool, one change feed, one store per
/// table, one repository per entity. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub trips: TripRepository,
    pub itinerary: ItineraryRepository,
    pub expenses: ExpenseRepository,
    pub locations: VisitedLocationRepository,
    pub journal: JournalRepository,
    pub booking_options: BookingOptionRepository,
    pub booking_tickets: BookingTicketRepository,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool) -> Self {
        // One feed across all tables; a cascade delete on trips must wake
        // watchers of the child tables as well.
        let changes = ChangeFeed::new();
        let trips = TripRepository::new(TripStore::new(db.clone(), changes.clone()));
        let itinerary = ItineraryRepository::new(ItineraryStore::new(db.clone(), changes.clone()));
        let expenses = ExpenseRepository::new(ExpenseStore::new(db.clone(), changes.clone()));
        let locations =
            VisitedLocationRepository::new(LocationStore::new(db.clone(), changes.clone()));
        let journal = JournalRepository::new(JournalStore::new(db.clone(), changes.clone()));
        let booking_options =
            BookingOptionRepository::new(BookingOptionStore::new(db.clone(), changes.clone()));
        let booking_tickets =
            BookingTicketRepository::new(BookingTicketStore::new(db.clone(), changes));
        Self {
            config,
            db,
            trips,
            itinerary,
            expenses,
            locations,
            journal,
            booking_options,
            booking_tickets,
        }
    }
}
