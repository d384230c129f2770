pub mod tracker;

pub use tracker::{LocationFix, LocationSource, LocationTracker};
