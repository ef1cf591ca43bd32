//! Generic directed weighted graph.
//!
//! Adjacency-list graph over any vertex type with equality and hashing.
//! Mutations report success as `bool` rather than panicking or throwing:
//! the caller decides what a rejected operation means.
//!
//! Invariants:
//! - no self-loop edges;
//! - at most one directed edge per ordered vertex pair;
//! - weights are non-negative travel durations.
//!
//! An absent edge is `None` from [`WeightedGraph::weight`]; there is no
//! in-band sentinel weight.

use std::collections::HashMap;
use std::hash::Hash;

/// A directed graph with `f64` edge weights.
#[derive(Debug, Clone)]
pub struct WeightedGraph<T> {
    adjacency: HashMap<T, Vec<(T, f64)>>,
}

impl<T: Eq + Hash> PartialEq for WeightedGraph<T> {
    fn eq(&self, other: &Self) -> bool {
        self.adjacency == other.adjacency
    }
}

impl<T> Default for WeightedGraph<T> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> WeightedGraph<T> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// True if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// True if `v` is a vertex of the graph.
    pub fn contains(&self, v: &T) -> bool {
        self.adjacency.contains_key(v)
    }

    /// All vertices, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = &T> {
        self.adjacency.keys()
    }

    /// Vertices reachable from `v` in one edge, in insertion order.
    ///
    /// Empty when `v` is not a vertex.
    pub fn neighbors(&self, v: &T) -> impl Iterator<Item = &T> {
        self.adjacency
            .get(v)
            .into_iter()
            .flatten()
            .map(|(target, _)| target)
    }

    /// Outgoing edges of `v` as `(target, weight)` pairs, in insertion
    /// order. Empty when `v` is not a vertex.
    pub fn edges_from(&self, v: &T) -> impl Iterator<Item = (&T, f64)> {
        self.adjacency
            .get(v)
            .into_iter()
            .flatten()
            .map(|(target, weight)| (target, *weight))
    }

    /// Weight of the `s -> p` edge, or `None` when there is no such edge
    /// (including when either endpoint is absent).
    pub fn weight(&self, s: &T, p: &T) -> Option<f64> {
        self.adjacency
            .get(s)?
            .iter()
            .find(|(target, _)| target == p)
            .map(|(_, weight)| *weight)
    }

    /// Insert a vertex with an empty adjacency list.
    ///
    /// Returns `false` without touching the graph when `v` is already
    /// present.
    pub fn add_vertex(&mut self, v: T) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, Vec::new());
        true
    }

    /// Remove a vertex together with every edge that starts or ends at it.
    ///
    /// Returns `false` when `v` is not a vertex. After a successful
    /// deletion no adjacency list references `v`.
    pub fn delete_vertex(&mut self, v: &T) -> bool {
        if self.adjacency.remove(v).is_none() {
            return false;
        }
        for edges in self.adjacency.values_mut() {
            edges.retain(|(target, _)| target != v);
        }
        true
    }

    /// Append the directed edge `s -> p` with the given weight.
    ///
    /// Returns `false` when `s == p`, when either endpoint is absent, or
    /// when an `s -> p` edge already exists; the existing edge keeps its
    /// weight.
    pub fn add_edge(&mut self, s: &T, p: &T, weight: f64) -> bool {
        if s == p || !self.adjacency.contains_key(p) || self.weight(s, p).is_some() {
            return false;
        }
        match self.adjacency.get_mut(s) {
            Some(edges) => {
                edges.push((p.clone(), weight));
                true
            }
            None => false,
        }
    }

    /// Remove the directed edge `s -> p`.
    ///
    /// Returns `false` when either endpoint is absent; removing a
    /// non-existent edge between present vertices is a successful no-op.
    pub fn remove_edge(&mut self, s: &T, p: &T) -> bool {
        if !self.adjacency.contains_key(p) {
            return false;
        }
        match self.adjacency.get_mut(s) {
            Some(edges) => {
                edges.retain(|(target, _)| target != p);
                true
            }
            None => false,
        }
    }

    /// Connect `v` in both directions, with the given weight, to every
    /// other vertex satisfying `pred`.
    ///
    /// Used to splice a synthetic start/end vertex into the graph for one
    /// itinerary query. Returns `false` when `v` is not a vertex.
    pub fn add_double_edge(&mut self, v: &T, weight: f64, pred: impl Fn(&T) -> bool) -> bool {
        if !self.adjacency.contains_key(v) {
            return false;
        }
        let targets: Vec<T> = self
            .adjacency
            .keys()
            .filter(|t| *t != v && pred(t))
            .cloned()
            .collect();
        for t in targets {
            self.add_edge(v, &t, weight);
            self.add_edge(&t, v, weight);
        }
        true
    }

    /// Number of vertices satisfying `pred`.
    pub fn count_vertices(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.adjacency.keys().filter(|v| pred(v)).count()
    }

    /// Vertices satisfying `pred`, in no particular order.
    pub fn vertices_matching(&self, pred: impl Fn(&T) -> bool) -> Vec<&T> {
        self.adjacency.keys().filter(|v| pred(v)).collect()
    }
}
