//! Station-plan loading.
//!
//! A plan file is plain text, one section per line of the network:
//!
//! ```text
//! # comments start with '#'
//! line 11
//! Porte des Lilas
//! Télégraphe
//! ...
//!
//! line 3
//! ...
//! ```
//!
//! A `line <label>` header opens a section; every following non-blank row
//! names the next station of that line, in order. From this the pristine
//! graph is built: one vertex per (station, line), travel edges in both
//! directions between consecutive stations of a line, and interchange
//! edges in both directions between the line variants of a station name.
//!
//! Loading fails fast on a malformed plan: a city with a corrupt network
//! never starts serving requests.

pub mod config;

use std::collections::HashMap;
use std::path::Path;

use crate::domain::Station;
use crate::graph::WeightedGraph;

use config::CitiesConfig;

/// Travel time in seconds between consecutive stations of a line.
pub const SEGMENT_TIME: f64 = 90.0;

/// Time in seconds to change lines within one station.
pub const INTERCHANGE_TIME: f64 = 60.0;

/// A malformed or unreadable station plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("cannot read plan file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {0}: station listed before any 'line' header")]
    StationOutsideLine(usize),

    #[error("line {0}: 'line' header without a label")]
    MissingLineLabel(usize),

    #[error("duplicate line section: {0}")]
    DuplicateLine(String),

    #[error("station {station:?} listed twice on line {line}")]
    DuplicateStation { line: String, station: String },

    #[error("line {0} has fewer than two stations")]
    ShortLine(String),

    #[error("plan describes no lines")]
    Empty,
}

/// A parsed station plan: lines with their stations in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPlan {
    lines: Vec<(String, Vec<String>)>,
}

impl NetworkPlan {
    /// Parse plan text. See the module documentation for the format.
    pub fn parse(text: &str) -> Result<Self, PlanError> {
        let mut lines: Vec<(String, Vec<String>)> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let row = raw.trim();
            if row.is_empty() || row.starts_with('#') {
                continue;
            }
            if let Some(label) = row.strip_prefix("line ").or(match row {
                "line" => Some(""),
                _ => None,
            }) {
                let label = label.trim();
                if label.is_empty() {
                    return Err(PlanError::MissingLineLabel(idx + 1));
                }
                if lines.iter().any(|(l, _)| l == label) {
                    return Err(PlanError::DuplicateLine(label.to_string()));
                }
                lines.push((label.to_string(), Vec::new()));
            } else {
                let Some((label, stations)) = lines.last_mut() else {
                    return Err(PlanError::StationOutsideLine(idx + 1));
                };
                if stations.iter().any(|s| s == row) {
                    return Err(PlanError::DuplicateStation {
                        line: label.clone(),
                        station: row.to_string(),
                    });
                }
                stations.push(row.to_string());
            }
        }

        if lines.is_empty() {
            return Err(PlanError::Empty);
        }
        for (label, stations) in &lines {
            if stations.len() < 2 {
                return Err(PlanError::ShortLine(label.clone()));
            }
        }

        Ok(Self { lines })
    }

    /// Line labels in plan order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|(label, _)| label.as_str())
    }

    /// Build the pristine graph for this plan.
    pub fn build_graph(&self) -> WeightedGraph<Station> {
        let mut graph = WeightedGraph::new();

        for (label, stations) in &self.lines {
            for name in stations {
                graph.add_vertex(Station::new(name.clone(), label.clone()));
            }
            for pair in stations.windows(2) {
                let s = Station::new(pair[0].clone(), label.clone());
                let p = Station::new(pair[1].clone(), label.clone());
                graph.add_edge(&s, &p, SEGMENT_TIME);
                graph.add_edge(&p, &s, SEGMENT_TIME);
            }
        }

        // Interchange edges between every pair of line variants of a name.
        let mut variants: HashMap<&str, Vec<Station>> = HashMap::new();
        for (label, stations) in &self.lines {
            for name in stations {
                variants
                    .entry(name.as_str())
                    .or_default()
                    .push(Station::new(name.clone(), label.clone()));
            }
        }
        for group in variants.values() {
            for a in group {
                for b in group {
                    if a != b {
                        graph.add_edge(a, b, INTERCHANGE_TIME);
                    }
                }
            }
        }

        graph
    }
}

/// Read, parse and build one city network.
pub fn load_network(path: &Path) -> Result<WeightedGraph<Station>, PlanError> {
    let text = std::fs::read_to_string(path)?;
    let plan = NetworkPlan::parse(&text)?;
    let graph = plan.build_graph();
    tracing::info!(
        plan = %path.display(),
        lines = plan.lines.len(),
        stations = graph.len(),
        "loaded network plan"
    );
    Ok(graph)
}

/// Load every configured city network, failing on the first corrupt one.
pub fn load_all(
    config: &CitiesConfig,
) -> Result<HashMap<String, WeightedGraph<Station>>, PlanError> {
    let mut networks = HashMap::new();
    for entry in config.cities() {
        let graph = load_network(&entry.plan)?;
        networks.insert(entry.city.clone(), graph);
    }
    Ok(networks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "\
# two crossing lines
line 1
Alpha
Hub
Omega

line 2
Hub
Delta
";

    #[test]
    fn parses_sections_and_stations() {
        let plan = NetworkPlan::parse(PLAN).unwrap();
        let labels: Vec<&str> = plan.lines().collect();
        assert_eq!(labels, vec!["1", "2"]);
    }

    #[test]
    fn builds_vertices_per_line_variant() {
        let g = NetworkPlan::parse(PLAN).unwrap().build_graph();
        // 3 + 2 vertices; "Hub" appears once per line.
        assert_eq!(g.len(), 5);
        assert!(g.contains(&Station::new("Hub", "1")));
        assert!(g.contains(&Station::new("Hub", "2")));
    }

    #[test]
    fn builds_bidirectional_segment_edges() {
        let g = NetworkPlan::parse(PLAN).unwrap().build_graph();
        let a = Station::new("Alpha", "1");
        let h = Station::new("Hub", "1");
        assert_eq!(g.weight(&a, &h), Some(SEGMENT_TIME));
        assert_eq!(g.weight(&h, &a), Some(SEGMENT_TIME));
        // Non-consecutive stations are not directly connected.
        assert_eq!(g.weight(&a, &Station::new("Omega", "1")), None);
    }

    #[test]
    fn builds_interchange_edges_at_shared_names() {
        let g = NetworkPlan::parse(PLAN).unwrap().build_graph();
        let h1 = Station::new("Hub", "1");
        let h2 = Station::new("Hub", "2");
        assert_eq!(g.weight(&h1, &h2), Some(INTERCHANGE_TIME));
        assert_eq!(g.weight(&h2, &h1), Some(INTERCHANGE_TIME));
        // No interchange where names are not shared.
        assert_eq!(
            g.weight(&Station::new("Alpha", "1"), &Station::new("Delta", "2")),
            None
        );
    }

    #[test]
    fn rejects_station_before_any_header() {
        let err = NetworkPlan::parse("Alpha\nline 1\n").unwrap_err();
        assert!(matches!(err, PlanError::StationOutsideLine(1)));
    }

    #[test]
    fn rejects_header_without_label() {
        let err = NetworkPlan::parse("line\nAlpha\nBeta\n").unwrap_err();
        assert!(matches!(err, PlanError::MissingLineLabel(1)));
    }

    #[test]
    fn rejects_duplicate_sections_and_stations() {
        let err = NetworkPlan::parse("line 1\nA\nB\nline 1\nC\nD\n").unwrap_err();
        assert!(matches!(err, PlanError::DuplicateLine(l) if l == "1"));

        let err = NetworkPlan::parse("line 1\nA\nB\nA\n").unwrap_err();
        assert!(matches!(err, PlanError::DuplicateStation { .. }));
    }

    #[test]
    fn rejects_short_and_empty_plans() {
        assert!(matches!(
            NetworkPlan::parse("line 1\nA\n").unwrap_err(),
            PlanError::ShortLine(_)
        ));
        assert!(matches!(
            NetworkPlan::parse("# nothing\n").unwrap_err(),
            PlanError::Empty
        ));
    }

    #[test]
    fn comments_and_blank_rows_are_ignored() {
        let plan = NetworkPlan::parse("# x\n\nline 1\nA\n\n# y\nB\n").unwrap();
        let g = plan.build_graph();
        assert_eq!(g.len(), 2);
    }
}
