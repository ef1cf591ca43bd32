//! Fewest-interchange path search.
//!
//! Works over the [`LineMatrix`] rather than the raw station graph: one
//! transition is a whole ride along a single line, so the interchange
//! budget is simply the number of rides taken. Search state is the
//! composite `(station index, rides used)` key — the best sub-path to a
//! station differs depending on how many rides got it there, so the two
//! cannot be collapsed. A single pass over that composite state space
//! answers every budget at once: the smallest ride count that reaches the
//! destination is the minimum-interchange route, and within that count the
//! time ordering of the frontier has already broken ties.
//!
//! Rides are capped at the number of stations: an optimal route never
//! revisits a station, so one that would need more rides than there are
//! stations does not exist. (The number of lines is not a safe cap — a
//! perturbation can split a line into disconnected pieces that a route
//! legitimately rides twice.)

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::line_matrix::LineMatrix;
use super::route::{Itinerary, RouteStep};

/// Station index plus rides taken so far.
type State = (usize, usize);

struct Frontier {
    dist: f64,
    state: State,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.dist.total_cmp(&other.dist) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap pops the smallest time first.
        other.dist.total_cmp(&self.dist)
    }
}

struct SearchTable {
    dist: HashMap<State, f64>,
    /// Predecessor state plus the line ridden into the keyed state.
    prev: HashMap<State, (State, String)>,
}

/// Time-ordered search over `(station, rides)` states from `start`.
///
/// When `goal` is given, states that can no longer improve on the best
/// ride count already reaching it are not expanded.
fn run_search(
    matrix: &LineMatrix,
    start: usize,
    max_rides: usize,
    goal: Option<usize>,
) -> SearchTable {
    let mut table = SearchTable {
        dist: HashMap::new(),
        prev: HashMap::new(),
    };
    let mut visited: HashSet<State> = HashSet::new();
    let mut frontier = BinaryHeap::new();
    let mut best_rides: Option<usize> = None;

    table.dist.insert((start, 0), 0.0);
    frontier.push(Frontier {
        dist: 0.0,
        state: (start, 0),
    });

    while let Some(Frontier { dist, state }) = frontier.pop() {
        if !visited.insert(state) {
            continue;
        }
        let (at, rides) = state;
        if goal == Some(at) {
            best_rides = Some(best_rides.map_or(rides, |b| b.min(rides)));
        }
        if rides == max_rides {
            continue;
        }
        if best_rides.is_some_and(|best| rides + 1 > best) {
            continue;
        }
        for line in matrix.lines() {
            if !matrix.serves(line, at) {
                continue;
            }
            for target in 0..matrix.len() {
                if target == at {
                    continue;
                }
                let Some(ride) = matrix.ride_time(line, at, target) else {
                    continue;
                };
                let next = (target, rides + 1);
                let candidate = dist + ride;
                let better = table
                    .dist
                    .get(&next)
                    .is_none_or(|&current| candidate < current);
                if better {
                    table.dist.insert(next, candidate);
                    table.prev.insert(next, (state, line.to_string()));
                    frontier.push(Frontier {
                        dist: candidate,
                        state: next,
                    });
                }
            }
        }
    }

    table
}

/// The route between two station names using the fewest line changes,
/// ties broken by travel time.
///
/// Steps come destination first, each tagged with the line ridden out of
/// it; the destination carries the terminal tag. Travel time covers the
/// rides themselves. `None` when either name is unknown or no route
/// exists at any interchange count.
pub fn min_connection_path(matrix: &LineMatrix, start: &str, end: &str) -> Option<Itinerary> {
    let s = matrix.index_of(start)?;
    let e = matrix.index_of(end)?;
    if s == e {
        return Some(Itinerary {
            steps: vec![RouteStep::terminal(end)],
            total_time: 0.0,
            interchanges: 0,
        });
    }

    let max_rides = matrix.len();
    let table = run_search(matrix, s, max_rides, Some(e));
    let rides_needed = (1..=max_rides).find(|r| table.dist.contains_key(&(e, *r)))?;
    let total_time = *table.dist.get(&(e, rides_needed))?;

    let mut steps = vec![RouteStep::terminal(end)];
    let mut cursor = (e, rides_needed);
    while let Some((pred, line)) = table.prev.get(&cursor) {
        steps.push(RouteStep::ride(matrix.name_of(pred.0), line.clone()));
        cursor = *pred;
    }

    Some(Itinerary {
        steps,
        total_time,
        interchanges: rides_needed - 1,
    })
}

/// Minimum interchange count from `start` to every reachable station
/// name. Used by the network statistics.
pub fn reachable_interchanges(matrix: &LineMatrix, start: &str) -> HashMap<String, usize> {
    let mut out = HashMap::new();
    let Some(s) = matrix.index_of(start) else {
        return out;
    };
    let table = run_search(matrix, s, matrix.len(), None);
    for &(idx, rides) in table.dist.keys() {
        let interchanges = rides.saturating_sub(1);
        out.entry(matrix.name_of(idx).to_string())
            .and_modify(|current: &mut usize| *current = (*current).min(interchanges))
            .or_insert(interchanges);
    }
    out
}
