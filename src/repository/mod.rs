pub mod bookings;
pub mod expenses;
pub mod itinerary;
pub mod journal;
pub mod live;
pub mod locations;
pub mod tickets;
pub mod trips;

pub use bookings::BookingOptionRepository;
pub use expenses::{CategoryTotal, DailyTotal, ExpenseRepository};
pub use itinerary::ItineraryRepository;
pub use journal::JournalRepository;
pub use live::Live;
pub use locations::VisitedLocationRepository;
pub use tickets::BookingTicketRepository;
pub use trips::TripRepository;
