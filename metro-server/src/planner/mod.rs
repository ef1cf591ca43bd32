//! Pathfinding over the station network.
//!
//! Two search strategies share the module: plain shortest travel time
//! (Dijkstra over the station graph) and fewest line changes (a
//! budget-aware search over the per-line matrices). Route assembly in
//! [`route`] ties them together behind one entry point.

mod connections;
mod dijkstra;
mod line_matrix;
mod route;

pub use connections::{min_connection_path, reachable_interchanges};
pub use dijkstra::{ShortestPaths, shortest_paths};
pub use line_matrix::LineMatrix;
pub use route::{Itinerary, RouteError, RoutePreference, RouteStep, plan_route};
