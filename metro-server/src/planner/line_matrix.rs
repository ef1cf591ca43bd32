//! Dense per-line travel-time matrices.
//!
//! A read-only snapshot derived from a station graph. Every distinct
//! station name gets a stable dense index (names are sorted before
//! indexing so rebuilding the same graph yields the same indices). Two
//! matrix families are held:
//!
//! - one square matrix per line, seeded with the travel times between
//!   consecutive stations of that line and then transitively closed within
//!   the line, so a single lookup answers "ride this line from i to j";
//! - a "direct" matrix with the best known travel time between any two
//!   names ignoring line structure, populated by running the shortest-time
//!   search from every vertex of the source graph.
//!
//! Inside matrices `f64::INFINITY` marks an absent connection; the public
//! accessors translate that to `None`. A `LineMatrix` is never patched in
//! place: whenever the source graph changes it is rebuilt from scratch.

use std::collections::{BTreeMap, HashMap};

use crate::domain::Station;
use crate::graph::WeightedGraph;

use super::dijkstra::shortest_paths;

/// Per-line and cross-line travel-time matrices for one graph snapshot.
#[derive(Debug, Clone)]
pub struct LineMatrix {
    index: HashMap<String, usize>,
    names: Vec<String>,
    /// Line label -> closed ride-time matrix. `matrix[i][i] == 0.0` marks
    /// station `i` as served by the line.
    lines: BTreeMap<String, Vec<Vec<f64>>>,
    direct: Vec<Vec<f64>>,
}

impl LineMatrix {
    /// Build the matrices from a station graph snapshot.
    ///
    /// Meta vertices, if any are present, are ignored: matrices only ever
    /// describe the real network.
    pub fn build(graph: &WeightedGraph<Station>) -> Self {
        let mut names: Vec<String> = graph
            .vertices()
            .filter(|s| !s.is_meta())
            .map(|s| s.name().to_string())
            .collect();
        names.sort();
        names.dedup();

        let index: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        let n = names.len();

        let mut lines: BTreeMap<String, Vec<Vec<f64>>> = BTreeMap::new();
        for vertex in graph.vertices().filter(|s| !s.is_meta()) {
            let matrix = lines
                .entry(vertex.line().to_string())
                .or_insert_with(|| vec![vec![f64::INFINITY; n]; n]);
            let i = index[vertex.name()];
            matrix[i][i] = 0.0;
            for (target, weight) in graph.edges_from(vertex) {
                if target.line() == vertex.line() {
                    let j = index[target.name()];
                    if weight < matrix[i][j] {
                        matrix[i][j] = weight;
                    }
                }
            }
        }
        for matrix in lines.values_mut() {
            close_within_line(matrix);
        }

        let mut direct = vec![vec![f64::INFINITY; n]; n];
        for vertex in graph.vertices().filter(|s| !s.is_meta()) {
            let i = index[vertex.name()];
            let sp = shortest_paths(graph, vertex);
            for (target, d) in sp.distances() {
                if target.is_meta() {
                    continue;
                }
                let j = index[target.name()];
                if d < direct[i][j] {
                    direct[i][j] = d;
                }
            }
        }

        Self {
            index,
            names,
            lines,
            direct,
        }
    }

    /// Number of distinct station names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the source graph had no stations.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Dense index of a station name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Station name at a dense index.
    pub fn name_of(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    /// Line labels known to the matrix, sorted.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Time to ride `line` from station index `from` to station index
    /// `to` without leaving the line. `None` when either station is not on
    /// the line or the line does not connect them.
    pub fn ride_time(&self, line: &str, from: usize, to: usize) -> Option<f64> {
        let t = *self.lines.get(line)?.get(from)?.get(to)?;
        t.is_finite().then_some(t)
    }

    /// True when the line serves the station at `idx`.
    pub fn serves(&self, line: &str, idx: usize) -> bool {
        self.lines
            .get(line)
            .is_some_and(|m| m[idx][idx] == 0.0)
    }

    /// Best known travel time between two names, ignoring line structure.
    ///
    /// `None` when either name is unknown or no path connects them.
    pub fn direct_time(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        let t = self.direct[i][j];
        t.is_finite().then_some(t)
    }

    /// Station names served by `line`, in index order.
    pub fn stations_on(&self, line: &str) -> Vec<&str> {
        match self.lines.get(line) {
            Some(m) => (0..self.names.len())
                .filter(|&i| m[i][i] == 0.0)
                .map(|i| self.names[i].as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Floyd-Warshall restricted to the stations the line serves.
fn close_within_line(matrix: &mut [Vec<f64>]) {
    let on_line: Vec<usize> = (0..matrix.len())
        .filter(|&i| matrix[i][i] == 0.0)
        .collect();
    for &k in &on_line {
        for &i in &on_line {
            for &j in &on_line {
                let via = matrix[i][k] + matrix[k][j];
                if via < matrix[i][j] {
                    matrix[i][j] = via;
                }
            }
        }
    }
}
