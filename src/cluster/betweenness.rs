//! Incremental edge betweenness

use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;
use rayon::prelude::*;

use crate::config::Config;
use crate::error::Result;
use crate::graph::{all_shortest_paths, all_shortest_paths_bounded, Edge, Graph, Vertex};

/// Relative tolerance under which two betweenness scores count as tied
pub const SCORE_EPSILON: f64 = 1e-9;

/// Betweenness score per edge of a working graph.
///
/// The score map always covers exactly the edges present in the graph it was
/// last initialized or updated against. Each vertex pair with `k` shortest
/// paths adds `1/k` to an edge for every one of those paths that uses it.
#[derive(Debug, Clone)]
pub struct EdgeBetweenness<V: Vertex> {
    scores: BTreeMap<Edge<V>, f64>,
    parallel_threshold: usize,
    max_paths: Option<usize>,
}

impl<V: Vertex> EdgeBetweenness<V> {
    pub fn new(config: &Config) -> Self {
        Self {
            scores: BTreeMap::new(),
            parallel_threshold: config.parallel_threshold,
            max_paths: config.max_paths_per_pair,
        }
    }

    /// Reset every edge of `graph` to zero and score all vertex pairs
    pub fn initialize(&mut self, graph: &Graph<V>) -> Result<()> {
        self.scores = graph.edges().map(|edge| (edge, 0.0)).collect();
        self.update(graph.vertices(), graph)
    }

    /// Recompute scores for every pair drawn from `subset`.
    ///
    /// Edges with both endpoints in `subset` are zeroed first. This is only
    /// sound when `subset` is a union of whole components of `graph`: pairs
    /// outside it keep the same shortest paths, and no path between them can
    /// cross an edge inside it.
    pub fn update<'a, I>(&mut self, subset: I, graph: &Graph<V>) -> Result<()>
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        let mut vertices: Vec<&V> = subset.into_iter().collect();
        vertices.sort();
        vertices.dedup();

        let members: HashSet<&V> = vertices.iter().copied().collect();
        for &v in &vertices {
            for n in graph.neighbors(v) {
                if v < n && members.contains(n) {
                    if let Some(score) = self.scores.get_mut(&Edge::ordered(v.clone(), n.clone())) {
                        *score = 0.0;
                    }
                }
            }
        }

        let pair_count = vertices.len() * vertices.len().saturating_sub(1) / 2;
        log::trace!(
            "Updating betweenness for {} vertices ({} pairs)",
            vertices.len(),
            pair_count
        );

        if pair_count >= self.parallel_threshold {
            let pairs: Vec<(&V, &V)> = vertices.iter().copied().tuple_combinations().collect();
            // Collecting keeps pair order, so accumulation below matches the
            // sequential branch exactly.
            let contributions: Vec<Vec<(Edge<V>, f64)>> = pairs
                .par_iter()
                .map(|&(a, b)| self.pair_contribution(graph, a, b))
                .collect::<Result<_>>()?;
            for contribution in contributions {
                self.accumulate(contribution);
            }
        } else {
            for (a, b) in vertices.iter().copied().tuple_combinations() {
                let contribution = self.pair_contribution(graph, a, b)?;
                self.accumulate(contribution);
            }
        }

        Ok(())
    }

    /// Share of each edge in the shortest paths between `a` and `b`.
    ///
    /// Paths are tallied per edge first so the result does not depend on the
    /// order in which paths are enumerated.
    fn pair_contribution(&self, graph: &Graph<V>, a: &V, b: &V) -> Result<Vec<(Edge<V>, f64)>> {
        let paths = match self.max_paths {
            Some(limit) => all_shortest_paths_bounded(graph, a, b, limit)?,
            None => all_shortest_paths(graph, a, b)?,
        };
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let mut uses: BTreeMap<Edge<V>, usize> = BTreeMap::new();
        for path in &paths {
            for step in path.windows(2) {
                *uses.entry(Edge::ordered(step[0].clone(), step[1].clone())).or_insert(0) += 1;
            }
        }

        let total = paths.len() as f64;
        Ok(uses
            .into_iter()
            .map(|(edge, count)| (edge, count as f64 / total))
            .collect())
    }

    fn accumulate(&mut self, contribution: Vec<(Edge<V>, f64)>) {
        for (edge, value) in contribution {
            *self.scores.entry(edge).or_insert(0.0) += value;
        }
    }

    /// Edge with the highest score.
    ///
    /// Scores within [`SCORE_EPSILON`] (relative) of each other are ties,
    /// resolved in favour of the smallest edge by endpoint order.
    pub fn max_edge(&self) -> Option<Edge<V>> {
        let mut best: Option<(&Edge<V>, f64)> = None;
        for (edge, &score) in &self.scores {
            let higher = match best {
                Some((_, top)) => score > top + SCORE_EPSILON * top.abs().max(1.0),
                None => true,
            };
            if higher {
                best = Some((edge, score));
            }
        }
        best.map(|(edge, _)| edge.clone())
    }

    /// Drop an edge's entry, returning its last score
    pub fn remove(&mut self, edge: &Edge<V>) -> Option<f64> {
        self.scores.remove(edge)
    }

    pub fn score(&self, edge: &Edge<V>) -> Option<f64> {
        self.scores.get(edge).copied()
    }

    /// All scores in edge order
    pub fn iter(&self) -> impl Iterator<Item = (&Edge<V>, f64)> {
        self.scores.iter().map(|(edge, &score)| (edge, score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::components;

    fn edge(a: u32, b: u32) -> Edge<u32> {
        Edge::new(a, b).unwrap()
    }

    fn initialized(graph: &Graph<u32>, config: &Config) -> EdgeBetweenness<u32> {
        let mut tracker = EdgeBetweenness::new(config);
        tracker.initialize(graph).unwrap();
        tracker
    }

    fn two_triangles() -> Graph<u32> {
        Graph::from_edges([(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)]).unwrap()
    }

    #[test]
    fn path_graph_scores() {
        let g = Graph::from_edges([(0, 1), (1, 2), (2, 3)]).unwrap();
        let t = initialized(&g, &Config::default());
        assert_eq!(t.len(), 3);
        assert_eq!(t.score(&edge(0, 1)), Some(3.0));
        assert_eq!(t.score(&edge(1, 2)), Some(4.0));
        assert_eq!(t.score(&edge(2, 3)), Some(3.0));
        assert_eq!(t.max_edge(), Some(edge(1, 2)));
    }

    #[test]
    fn tied_paths_split_credit() {
        // square 0-1-3-2-0: each diagonal pair has two paths
        let g = Graph::from_edges([(0, 1), (1, 3), (3, 2), (2, 0)]).unwrap();
        let t = initialized(&g, &Config::default());
        for (_, score) in t.iter() {
            assert!((score - 2.0).abs() < 1e-12, "score = {score}");
        }
        // all tied: smallest edge wins
        assert_eq!(t.max_edge(), Some(edge(0, 1)));
    }

    #[test]
    fn bridge_dominates_triangle_edges() {
        let g = two_triangles();
        let t = initialized(&g, &Config::default());
        let bridge = t.score(&edge(2, 3)).unwrap();
        assert_eq!(bridge, 9.0);
        for (e, score) in t.iter() {
            if *e != edge(2, 3) {
                assert!(score < bridge);
            }
        }
        assert_eq!(t.max_edge(), Some(edge(2, 3)));
    }

    #[test]
    fn incremental_update_matches_full_recompute() {
        let config = Config::default();
        let mut g = two_triangles();
        for (a, b) in [(10, 11), (11, 12)] {
            g.add_vertex(a);
            g.add_vertex(b);
            g.add_edge(a, b).unwrap();
        }
        let mut t = initialized(&g, &config);

        let removed = edge(2, 3);
        g.remove_edge(removed.lo(), removed.hi()).unwrap();
        t.remove(&removed);

        let partition = components(&g);
        let touched: Vec<&u32> = partition
            .iter()
            .filter(|c| c.contains(removed.lo()) || c.contains(removed.hi()))
            .flatten()
            .collect();
        t.update(touched, &g).unwrap();

        let fresh = initialized(&g, &config);
        let incremental: Vec<_> = t.iter().collect();
        let full: Vec<_> = fresh.iter().collect();
        assert_eq!(incremental, full);
    }

    #[test]
    fn parallel_update_is_bit_identical() {
        let g = two_triangles();
        let sequential = initialized(&g, &Config::default());
        let parallel = initialized(&g, &Config::new(1, None));
        assert_eq!(
            sequential.iter().collect::<Vec<_>>(),
            parallel.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn path_budget_propagates() {
        // 0 and 3 are joined by two shortest paths
        let g = Graph::from_edges([(0, 1), (1, 3), (3, 2), (2, 0)]).unwrap();
        let mut t = EdgeBetweenness::new(&Config::new(usize::MAX, Some(1)));
        assert!(matches!(
            t.initialize(&g),
            Err(crate::error::ClusterError::PathBudgetExceeded { limit: 1 })
        ));
    }

    #[test]
    fn empty_graph_has_no_max() {
        let g: Graph<u32> = Graph::new();
        let t = initialized(&g, &Config::default());
        assert!(t.is_empty());
        assert_eq!(t.max_edge(), None);
    }
}
