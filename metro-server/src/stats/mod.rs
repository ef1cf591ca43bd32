//! Network-wide metrics.
//!
//! Pure functions over a graph snapshot. In practice they run against the
//! pristine graph so active perturbations never skew the numbers. A
//! "same-line edge" below is an edge whose endpoints sit on one line —
//! interchange edges connect two variants of one station name and are
//! excluded from per-line aggregates.

use std::collections::HashMap;

use crate::domain::Station;
use crate::graph::WeightedGraph;
use crate::planner::{LineMatrix, reachable_interchanges, shortest_paths};

/// The most distant station pair and its travel time.
#[derive(Debug, Clone, PartialEq)]
pub struct DistantPair {
    pub from: Station,
    pub to: Station,
    pub time: f64,
}

/// The pair of stations with the longest shortest travel time, taking
/// sources matching `src_pred` and targets matching `dst_pred`.
///
/// Unreachable pairs are skipped; `None` when no finite pair exists.
pub fn most_distant_stations(
    graph: &WeightedGraph<Station>,
    src_pred: impl Fn(&Station) -> bool,
    dst_pred: impl Fn(&Station) -> bool,
) -> Option<DistantPair> {
    let mut best: Option<DistantPair> = None;
    for source in graph.vertices_matching(|s| !s.is_meta() && src_pred(s)) {
        let sp = shortest_paths(graph, source);
        for (target, time) in sp.distances() {
            if target.is_meta() || !dst_pred(target) {
                continue;
            }
            if best.as_ref().is_none_or(|b| time > b.time) {
                best = Some(DistantPair {
                    from: source.clone(),
                    to: target.clone(),
                    time,
                });
            }
        }
    }
    best
}

/// The smallest interchange budget with which some station matching
/// `start_pred` reaches some station matching `end_pred`.
///
/// `None` when no such connection exists at any budget.
pub fn minimum_correspondence(
    graph: &WeightedGraph<Station>,
    matrix: &LineMatrix,
    start_pred: impl Fn(&Station) -> bool,
    end_pred: impl Fn(&Station) -> bool,
) -> Option<usize> {
    let mut start_names: Vec<&str> = graph
        .vertices_matching(|s| !s.is_meta() && start_pred(s))
        .into_iter()
        .map(Station::name)
        .collect();
    start_names.sort_unstable();
    start_names.dedup();

    let end_names: Vec<&str> = graph
        .vertices_matching(|s| !s.is_meta() && end_pred(s))
        .into_iter()
        .map(Station::name)
        .collect();

    let mut best: Option<usize> = None;
    for start in start_names {
        let reachable = reachable_interchanges(matrix, start);
        for end in &end_names {
            if let Some(&count) = reachable.get(*end) {
                if best.is_none_or(|b| count < b) {
                    best = Some(count);
                }
            }
        }
    }
    best
}

/// Station count per line.
fn stations_per_line(graph: &WeightedGraph<Station>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for vertex in graph.vertices().filter(|s| !s.is_meta()) {
        *counts.entry(vertex.line().to_string()).or_insert(0) += 1;
    }
    counts
}

/// The line with the most (`longest = true`) or fewest stations.
///
/// Ties resolve to the lexicographically smallest line name so the result
/// is deterministic.
pub fn extremum_line(graph: &WeightedGraph<Station>, longest: bool) -> Option<(String, usize)> {
    let mut counts: Vec<(String, usize)> = stations_per_line(graph).into_iter().collect();
    counts.sort_unstable();
    let mut best: Option<(String, usize)> = None;
    for (line, count) in counts {
        let replace = match &best {
            None => true,
            Some((_, b)) => {
                if longest {
                    count > *b
                } else {
                    count < *b
                }
            }
        };
        if replace {
            best = Some((line, count));
        }
    }
    best
}

/// Mean travel time of the same-line edges of each line.
pub fn average_time_per_line(graph: &WeightedGraph<Station>) -> HashMap<String, f64> {
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    for (s, p, w) in same_line_edges(graph) {
        debug_assert_eq!(s.line(), p.line());
        let entry = sums.entry(s.line().to_string()).or_insert((0.0, 0));
        entry.0 += w;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(line, (total, count))| (line, total / count as f64))
        .collect()
}

/// Mean number of stations per line across the network.
pub fn average_stations_per_line(graph: &WeightedGraph<Station>) -> Option<f64> {
    let counts = stations_per_line(graph);
    if counts.is_empty() {
        return None;
    }
    let total: usize = counts.values().sum();
    Some(total as f64 / counts.len() as f64)
}

/// The line with the greatest (`longest = true`) or smallest total
/// travel time, summing each segment once per direction pair.
pub fn extremum_travel_time_line(
    graph: &WeightedGraph<Station>,
    longest: bool,
) -> Option<(String, f64)> {
    let mut sums: HashMap<String, f64> = HashMap::new();
    for (s, _, w) in same_line_edges(graph) {
        *sums.entry(s.line().to_string()).or_insert(0.0) += w;
    }
    // Same-line edges come in both directions; halve to count each
    // segment once.
    let mut totals: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(line, total)| (line, total / 2.0))
        .collect();
    totals.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    let mut best: Option<(String, f64)> = None;
    for (line, total) in totals {
        let replace = match &best {
            None => true,
            Some((_, b)) => {
                if longest {
                    total > *b
                } else {
                    total < *b
                }
            }
        };
        if replace {
            best = Some((line, total));
        }
    }
    best
}

/// Every directed edge whose endpoints share a real line.
fn same_line_edges(
    graph: &WeightedGraph<Station>,
) -> impl Iterator<Item = (&Station, &Station, f64)> {
    graph
        .vertices()
        .filter(|s| !s.is_meta())
        .flat_map(|s| {
            graph
                .edges_from(s)
                .map(move |(target, weight)| (s, target, weight))
        })
        .filter(|(s, p, _)| s.line() == p.line())
}
