//! Domain types for the metro itinerary planner.
//!
//! The core vertex identity lives here: a [`Station`] is a (name, line)
//! pair, so the same physical station appears once per line serving it.

mod station;

pub use station::{META_LINE_END, META_LINE_START, Station};
