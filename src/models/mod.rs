pub mod booking;
pub mod expense;
pub mod itinerary;
pub mod journal;
pub mod location;
pub mod trip;

pub use booking::{BookingOption, BookingTicket};
pub use expense::{Expense, ExpenseCategory};
pub use itinerary::{ItineraryCategory, ItineraryItem};
pub use journal::JournalEntry;
pub use location::{CoordinatePoint, VisitedLocation};
pub use trip::{Trip, TripStatus};
