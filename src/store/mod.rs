pub mod bookings;
pub mod changes;
pub mod expenses;
pub mod itinerary;
pub mod journal;
pub mod locations;
pub mod tickets;
pub mod trips;

pub use bookings::{BookingOptionRow, BookingOptionStore};
pub use changes::ChangeFeed;
pub use expenses::{CategorySum, DailySum, ExpenseRow, ExpenseStore};
pub use itinerary::{ItineraryRow, ItineraryStore};
pub use journal::{JournalRow, JournalStore};
pub use locations::{CoordinateRow, LocationRow, LocationStore};
pub use tickets::{BookingTicketRow, BookingTicketStore};
pub use trips::{TripRow, TripStore};
