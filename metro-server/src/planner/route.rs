//! Itinerary assembly.
//!
//! Validates the endpoints, splices the synthetic start/end vertices onto
//! a private copy of the live graph, establishes reachability with the
//! shortest-time search, then renders the itinerary the caller asked for:
//! the fastest station-by-station route, or the route with the fewest
//! line changes.

use crate::domain::Station;
use crate::graph::WeightedGraph;

use super::connections::min_connection_path;
use super::dijkstra::shortest_paths;
use super::line_matrix::LineMatrix;

/// Which itinerary the caller prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePreference {
    /// Minimal total travel time.
    Shortest,
    /// Minimal number of line changes, ties broken by travel time.
    LeastConnexion,
}

impl RoutePreference {
    /// Parse the request-layer selector.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "shortest" => Some(Self::Shortest),
            "leastConnexion" => Some(Self::LeastConnexion),
            _ => None,
        }
    }
}

/// One step of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStep {
    /// Station name.
    pub station: String,
    /// Line ridden out of this station toward the next one;
    /// `None` tags the destination, where no further line is traveled.
    pub line: Option<String>,
}

impl RouteStep {
    pub fn ride(station: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            line: Some(line.into()),
        }
    }

    pub fn terminal(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            line: None,
        }
    }
}

/// A computed route.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Steps in destination-to-origin order; the first entry is the
    /// destination with its terminal tag.
    pub steps: Vec<RouteStep>,
    /// Total travel time in seconds.
    pub total_time: f64,
    /// Number of line changes along the route.
    pub interchanges: usize,
}

/// Why no itinerary could be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The named station is not part of the network.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Both stations exist but no route connects them.
    #[error("no path from {from} to {to} under current traffic conditions")]
    NoPath { from: String, to: String },
}

/// Compute an itinerary between two station names.
///
/// Unknown stations are reported before any search runs. Reachability is
/// always established with the shortest-time search, whatever the
/// preference; the connection-limited search only runs once a path is
/// known to exist.
pub fn plan_route(
    graph: &WeightedGraph<Station>,
    matrix: &LineMatrix,
    start: &str,
    end: &str,
    preference: RoutePreference,
) -> Result<Itinerary, RouteError> {
    for name in [start, end] {
        if graph.count_vertices(|s| !s.is_meta() && s.name() == name) == 0 {
            return Err(RouteError::UnknownStation(name.to_string()));
        }
    }

    let no_path = || RouteError::NoPath {
        from: start.to_string(),
        to: end.to_string(),
    };

    // Splice the query endpoints onto a private copy so concurrent
    // requests never see each other's meta vertices.
    let mut query = graph.clone();
    let meta_start = Station::meta_start(start);
    let meta_end = Station::meta_end(end);
    query.add_vertex(meta_start.clone());
    query.add_double_edge(&meta_start, 0.0, |s| !s.is_meta() && s.name() == start);
    query.add_vertex(meta_end.clone());
    query.add_double_edge(&meta_end, 0.0, |s| !s.is_meta() && s.name() == end);

    let sp = shortest_paths(&query, &meta_start);
    let Some(total) = sp.distance(&meta_end) else {
        return Err(no_path());
    };

    match preference {
        RoutePreference::Shortest => {
            let chain = sp.path_to(&meta_end).ok_or_else(no_path)?;
            Ok(itinerary_from_chain(&chain, total))
        }
        RoutePreference::LeastConnexion => {
            min_connection_path(matrix, start, end).ok_or_else(no_path)
        }
    }
}

/// Render a vertex chain from the shortest-time search as an itinerary.
///
/// Meta endpoints are dropped; an interchange shows up as a line switch
/// between steps, not as a duplicated station entry.
fn itinerary_from_chain(chain: &[Station], total_time: f64) -> Itinerary {
    let real: Vec<&Station> = chain.iter().filter(|s| !s.is_meta()).collect();

    let mut steps = Vec::new();
    if let Some(last) = real.last() {
        steps.push(RouteStep::terminal(last.name()));
    }
    for window in real.windows(2).rev() {
        let (from, to) = (window[0], window[1]);
        if from.name() == to.name() {
            // In-station interchange hop.
            continue;
        }
        steps.push(RouteStep::ride(from.name(), from.line()));
    }

    // Count line switches along the rides, origin to destination.
    let mut interchanges = 0;
    let mut rides = steps.iter().rev().filter_map(|s| s.line.as_deref());
    if let Some(mut current) = rides.next() {
        for line in rides {
            if line != current {
                interchanges += 1;
                current = line;
            }
        }
    }

    Itinerary {
        steps,
        total_time,
        interchanges,
    }
}
