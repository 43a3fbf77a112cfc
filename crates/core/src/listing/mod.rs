//! Bounded listing of stored objects.

mod service;

pub use service::{ListingResult, ListingService};
