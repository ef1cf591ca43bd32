//! Single-source shortest travel time.
//!
//! Plain Dijkstra over non-negative weights. The result bundles the
//! distance and predecessor maps into one value; absence of a vertex from
//! the distance map is the "no path" signal, never a zero or sentinel
//! distance.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

use crate::graph::WeightedGraph;

/// Outcome of a shortest-time search from a fixed start vertex.
#[derive(Debug, Clone)]
pub struct ShortestPaths<T> {
    start: T,
    dist: HashMap<T, f64>,
    prev: HashMap<T, T>,
}

impl<T: Eq + Hash + Clone> ShortestPaths<T> {
    /// Minimal total travel time to `v`, or `None` when `v` is unreachable.
    pub fn distance(&self, v: &T) -> Option<f64> {
        self.dist.get(v).copied()
    }

    /// True when some path from the start reaches `v`.
    pub fn is_reachable(&self, v: &T) -> bool {
        self.dist.contains_key(v)
    }

    /// The vertex preceding `v` on its shortest path. `None` for the start
    /// vertex and for unreachable vertices.
    pub fn predecessor(&self, v: &T) -> Option<&T> {
        self.prev.get(v)
    }

    /// Every reachable vertex with its minimal travel time.
    pub fn distances(&self) -> impl Iterator<Item = (&T, f64)> {
        self.dist.iter().map(|(v, &d)| (v, d))
    }

    /// The full shortest path from the start to `v`, start first.
    ///
    /// `None` when `v` is unreachable.
    pub fn path_to(&self, v: &T) -> Option<Vec<T>> {
        if !self.dist.contains_key(v) {
            return None;
        }
        let mut path = vec![v.clone()];
        let mut cursor = v;
        while let Some(p) = self.prev.get(cursor) {
            path.push(p.clone());
            cursor = p;
        }
        debug_assert!(path.last() == Some(&self.start));
        path.reverse();
        Some(path)
    }
}

/// Frontier entry ordered by tentative distance.
struct Entry<T> {
    dist: f64,
    vertex: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dist.total_cmp(&other.dist) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the smallest distance first.
        other.dist.total_cmp(&self.dist)
    }
}

/// Shortest travel time from `start` to every reachable vertex.
///
/// When `start` is not a vertex of the graph the result is empty and every
/// query on it reports unreachable.
pub fn shortest_paths<T: Eq + Hash + Clone>(
    graph: &WeightedGraph<T>,
    start: &T,
) -> ShortestPaths<T> {
    let mut result = ShortestPaths {
        start: start.clone(),
        dist: HashMap::new(),
        prev: HashMap::new(),
    };
    if !graph.contains(start) {
        return result;
    }

    let mut visited: HashSet<T> = HashSet::new();
    let mut frontier = BinaryHeap::new();
    result.dist.insert(start.clone(), 0.0);
    frontier.push(Entry {
        dist: 0.0,
        vertex: start.clone(),
    });

    while let Some(Entry { dist, vertex }) = frontier.pop() {
        if !visited.insert(vertex.clone()) {
            continue;
        }
        for (target, weight) in graph.edges_from(&vertex) {
            if visited.contains(target) {
                continue;
            }
            let candidate = dist + weight;
            let better = result
                .dist
                .get(target)
                .is_none_or(|&current| candidate < current);
            if better {
                result.dist.insert(target.clone(), candidate);
                result.prev.insert(target.clone(), vertex.clone());
                frontier.push(Entry {
                    dist: candidate,
                    vertex: target.clone(),
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a --1--> b --2--> c, plus a direct a --10--> c and an isolated d.
    fn diamond() -> WeightedGraph<&'static str> {
        let mut g = WeightedGraph::new();
        for v in ["a", "b", "c", "d"] {
            g.add_vertex(v);
        }
        g.add_edge(&"a", &"b", 1.0);
        g.add_edge(&"b", &"c", 2.0);
        g.add_edge(&"a", &"c", 10.0);
        g
    }

    #[test]
    fn picks_the_cheaper_route() {
        let sp = shortest_paths(&diamond(), &"a");
        assert_eq!(sp.distance(&"a"), Some(0.0));
        assert_eq!(sp.distance(&"b"), Some(1.0));
        assert_eq!(sp.distance(&"c"), Some(3.0));
        assert_eq!(sp.predecessor(&"c"), Some(&"b"));
        assert_eq!(sp.path_to(&"c"), Some(vec!["a", "b", "c"]));
    }

    #[test]
    fn unreachable_vertex_is_absent_not_zero() {
        let sp = shortest_paths(&diamond(), &"a");
        assert!(!sp.is_reachable(&"d"));
        assert_eq!(sp.distance(&"d"), None);
        assert_eq!(sp.path_to(&"d"), None);
    }

    #[test]
    fn start_has_no_predecessor() {
        let sp = shortest_paths(&diamond(), &"a");
        assert_eq!(sp.predecessor(&"a"), None);
        assert_eq!(sp.path_to(&"a"), Some(vec!["a"]));
    }

    #[test]
    fn absent_start_yields_empty_result() {
        let sp = shortest_paths(&diamond(), &"z");
        assert!(!sp.is_reachable(&"a"));
        assert!(!sp.is_reachable(&"z"));
    }

    #[test]
    fn respects_edge_direction() {
        let mut g = WeightedGraph::new();
        g.add_vertex("a");
        g.add_vertex("b");
        g.add_edge(&"a", &"b", 5.0);
        let sp = shortest_paths(&g, &"b");
        assert!(!sp.is_reachable(&"a"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A fixed 6-vertex topology whose weights come from the strategy:
    /// a chain 0-1-2-3-4 with shortcuts 0->2, 1->3, 2->5 and 4->5.
    fn build(weights: &[f64; 8]) -> WeightedGraph<usize> {
        let mut g = WeightedGraph::new();
        for v in 0..6 {
            g.add_vertex(v);
        }
        let edges = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (0, 2),
            (1, 3),
            (2, 5),
            (4, 5),
        ];
        for ((s, p), w) in edges.iter().zip(weights) {
            g.add_edge(s, p, *w);
        }
        g
    }

    proptest! {
        /// Scaling every weight by k > 0 scales every finite distance by k.
        #[test]
        fn distances_scale_with_weights(
            weights in proptest::array::uniform8(0.1f64..100.0),
            k in 0.25f64..8.0,
        ) {
            let base = shortest_paths(&build(&weights), &0);
            let scaled_weights: [f64; 8] = weights.map(|w| w * k);
            let scaled = shortest_paths(&build(&scaled_weights), &0);

            for v in 0..6usize {
                match (base.distance(&v), scaled.distance(&v)) {
                    (Some(d), Some(s)) => {
                        prop_assert!((s - d * k).abs() <= 1e-9 * (1.0 + s.abs()));
                    }
                    (None, None) => {}
                    (d, s) => prop_assert!(false, "reachability diverged: {d:?} vs {s:?}"),
                }
            }
        }
    }
}
