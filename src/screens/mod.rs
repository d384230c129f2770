pub mod create_trip;
pub mod expense;
pub mod itinerary;
pub mod journal;
pub mod machine;
pub mod summary;
pub mod trip_list;

pub use machine::{spawn, Screen, ScreenCtx, ScreenHandle};
