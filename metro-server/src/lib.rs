//! Metro itinerary planner server.
//!
//! Computes itineraries through a city metro network under a live model
//! of traffic perturbations: lines can be shut down or slowed, stations
//! closed entirely or on a single line. Routes are planned either for
//! minimal travel time or for the fewest line changes.

pub mod domain;
pub mod graph;
pub mod network;
pub mod planner;
pub mod stats;
pub mod traffic;
pub mod web;
