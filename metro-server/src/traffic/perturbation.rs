//! Perturbation kinds and their graph mutations.

use std::fmt;

use crate::domain::Station;
use crate::graph::WeightedGraph;

/// A single traffic disruption.
///
/// Applying a perturbation mutates a working copy of the network; the
/// pristine graph is never touched.
#[derive(Debug, Clone, PartialEq)]
pub enum Perturbation {
    /// Remove every edge between consecutive stations of the line.
    LineShutdown { line: String },

    /// Multiply the weight of every edge between consecutive stations of
    /// the line by `factor` (`factor > 1` means slower).
    LineSlowdown { line: String, factor: f64 },

    /// Delete every line variant of the named station.
    StationShutdown { station: String },

    /// Delete one (name, line) vertex only.
    PartialStationShutdown { station: Station },
}

impl Perturbation {
    /// Apply this perturbation to a working graph.
    pub fn apply_to(&self, graph: &mut WeightedGraph<Station>) {
        match self {
            Perturbation::LineShutdown { line } => {
                for (s, p, _) in same_line_edges(graph, line) {
                    graph.remove_edge(&s, &p);
                }
            }
            Perturbation::LineSlowdown { line, factor } => {
                for (s, p, w) in same_line_edges(graph, line) {
                    graph.remove_edge(&s, &p);
                    graph.add_edge(&s, &p, w * factor);
                }
            }
            Perturbation::StationShutdown { station } => {
                let victims: Vec<Station> = graph
                    .vertices_matching(|s| s.name() == station)
                    .into_iter()
                    .cloned()
                    .collect();
                for v in victims {
                    graph.delete_vertex(&v);
                }
            }
            Perturbation::PartialStationShutdown { station } => {
                graph.delete_vertex(station);
            }
        }
    }
}

impl fmt::Display for Perturbation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Perturbation::LineShutdown { line } => write!(f, "line {line} shut down"),
            Perturbation::LineSlowdown { line, factor } => {
                write!(f, "line {line} slowed down {factor}x")
            }
            Perturbation::StationShutdown { station } => write!(f, "station {station} closed"),
            Perturbation::PartialStationShutdown { station } => {
                write!(f, "station {} closed on line {}", station.name(), station.line())
            }
        }
    }
}

/// Every directed edge whose two endpoints sit on the given line.
fn same_line_edges(
    graph: &WeightedGraph<Station>,
    line: &str,
) -> Vec<(Station, Station, f64)> {
    let mut edges = Vec::new();
    for vertex in graph.vertices_matching(|s| s.line() == line) {
        for (target, weight) in graph.edges_from(vertex) {
            if target.line() == line {
                edges.push((vertex.clone(), target.clone(), weight));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(name: &str, line: &str) -> Station {
        Station::new(name, line)
    }

    /// line 1: a - b, line 2: b - c, interchange at b.
    fn network() -> WeightedGraph<Station> {
        let mut g = WeightedGraph::new();
        for s in [st("a", "1"), st("b", "1"), st("b", "2"), st("c", "2")] {
            g.add_vertex(s);
        }
        for (s, p, w) in [
            (st("a", "1"), st("b", "1"), 90.0),
            (st("b", "2"), st("c", "2"), 90.0),
            (st("b", "1"), st("b", "2"), 60.0),
        ] {
            g.add_edge(&s, &p, w);
            g.add_edge(&p, &s, w);
        }
        g
    }

    #[test]
    fn line_shutdown_removes_only_same_line_edges() {
        let mut g = network();
        Perturbation::LineShutdown { line: "1".into() }.apply_to(&mut g);

        assert_eq!(g.weight(&st("a", "1"), &st("b", "1")), None);
        assert_eq!(g.weight(&st("b", "1"), &st("a", "1")), None);
        // Other line and the interchange survive.
        assert_eq!(g.weight(&st("b", "2"), &st("c", "2")), Some(90.0));
        assert_eq!(g.weight(&st("b", "1"), &st("b", "2")), Some(60.0));
        // Vertices stay.
        assert!(g.contains(&st("a", "1")));
    }

    #[test]
    fn line_slowdown_scales_same_line_edges() {
        let mut g = network();
        Perturbation::LineSlowdown {
            line: "2".into(),
            factor: 3.0,
        }
        .apply_to(&mut g);

        assert_eq!(g.weight(&st("b", "2"), &st("c", "2")), Some(270.0));
        assert_eq!(g.weight(&st("c", "2"), &st("b", "2")), Some(270.0));
        // Untouched: line 1 and the interchange.
        assert_eq!(g.weight(&st("a", "1"), &st("b", "1")), Some(90.0));
        assert_eq!(g.weight(&st("b", "1"), &st("b", "2")), Some(60.0));
    }

    #[test]
    fn station_shutdown_removes_every_variant() {
        let mut g = network();
        Perturbation::StationShutdown {
            station: "b".into(),
        }
        .apply_to(&mut g);

        assert!(!g.contains(&st("b", "1")));
        assert!(!g.contains(&st("b", "2")));
        assert!(g.contains(&st("a", "1")));
        assert!(g.neighbors(&st("a", "1")).next().is_none());
    }

    #[test]
    fn partial_station_shutdown_removes_one_variant() {
        let mut g = network();
        Perturbation::PartialStationShutdown {
            station: st("b", "1"),
        }
        .apply_to(&mut g);

        assert!(!g.contains(&st("b", "1")));
        assert!(g.contains(&st("b", "2")));
        assert_eq!(g.weight(&st("b", "2"), &st("c", "2")), Some(90.0));
    }

    #[test]
    fn display_descriptions() {
        assert_eq!(
            Perturbation::LineShutdown { line: "3".into() }.to_string(),
            "line 3 shut down"
        );
        assert_eq!(
            Perturbation::PartialStationShutdown {
                station: st("Temple", "3")
            }
            .to_string(),
            "station Temple closed on line 3"
        );
    }
}
