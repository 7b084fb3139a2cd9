//! Adjacency-based undirected graph

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GraphError;

/// Requirements on a vertex identifier.
///
/// `Ord` gives every edge a canonical endpoint order and makes tie-breaking
/// reproducible; `Debug` is only used to render error messages. `Send + Sync`
/// lets betweenness updates fan out over the rayon pool.
pub trait Vertex: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Ord + Debug + Send + Sync> Vertex for T {}

/// An undirected edge, identified by its unordered pair of endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge<V> {
    lo: V,
    hi: V,
}

/// Decoded through [`Edge::new`]: endpoints are reordered and self-loops
/// rejected.
impl<'de, V: Vertex + Deserialize<'de>> Deserialize<'de> for Edge<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Endpoints<V> {
            lo: V,
            hi: V,
        }

        let raw = Endpoints::deserialize(deserializer)?;
        Edge::new(raw.lo, raw.hi).map_err(serde::de::Error::custom)
    }
}

impl<V: Vertex> Edge<V> {
    /// Create an edge between two distinct vertices.
    pub fn new(a: V, b: V) -> Result<Self, GraphError> {
        if a == b {
            return Err(GraphError::self_loop(&a));
        }
        Ok(Self::ordered(a, b))
    }

    /// Caller guarantees `a != b`.
    pub(crate) fn ordered(a: V, b: V) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The smaller endpoint
    pub fn lo(&self) -> &V {
        &self.lo
    }

    /// The larger endpoint
    pub fn hi(&self) -> &V {
        &self.hi
    }

    pub fn endpoints(&self) -> (&V, &V) {
        (&self.lo, &self.hi)
    }

    pub fn contains(&self, v: &V) -> bool {
        &self.lo == v || &self.hi == v
    }
}

/// Undirected graph stored as a symmetric adjacency map.
///
/// Every mutation updates both directions at once, so there is no way to
/// observe an edge `u -> v` without `v -> u`. Edge weights are stored but
/// clustering treats every edge as unit weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<V: Vertex> {
    /// Neighbor map per vertex: neighbor -> edge weight
    adjacency: HashMap<V, HashMap<V, f64>>,

    /// Number of distinct undirected edges
    edge_count: usize,
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> Graph<V> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Create an empty graph with room for `vertex_count` vertices
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Add a vertex. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, HashMap::new());
        true
    }

    /// Remove a vertex together with all incident edges.
    /// Returns `false` if the vertex was not present.
    pub fn remove_vertex(&mut self, v: &V) -> bool {
        let Some(neighbors) = self.adjacency.remove(v) else {
            return false;
        };
        for n in neighbors.keys() {
            if let Some(back) = self.adjacency.get_mut(n) {
                back.remove(v);
            }
        }
        self.edge_count -= neighbors.len();
        true
    }

    /// Add a unit-weight edge. See [`Graph::add_weighted_edge`].
    pub fn add_edge(&mut self, u: V, v: V) -> Result<bool, GraphError> {
        self.add_weighted_edge(u, v, 1.0)
    }

    /// Add an edge between two existing vertices.
    ///
    /// Returns `Ok(false)` without changing anything when the edge already
    /// exists or either endpoint is missing. Self-loops are rejected.
    pub fn add_weighted_edge(&mut self, u: V, v: V, weight: f64) -> Result<bool, GraphError> {
        if u == v {
            return Err(GraphError::self_loop(&u));
        }
        if !self.adjacency.contains_key(&v) {
            return Ok(false);
        }
        match self.adjacency.get_mut(&u) {
            Some(neighbors) if !neighbors.contains_key(&v) => {
                neighbors.insert(v.clone(), weight);
            }
            _ => return Ok(false),
        }
        if let Some(back) = self.adjacency.get_mut(&v) {
            back.insert(u, weight);
        }
        self.edge_count += 1;
        Ok(true)
    }

    /// Remove the edge `{u, v}`.
    pub fn remove_edge(&mut self, u: &V, v: &V) -> Result<(), GraphError> {
        let removed = self
            .adjacency
            .get_mut(u)
            .and_then(|neighbors| neighbors.remove(v))
            .is_some();
        if !removed {
            return Err(GraphError::edge_not_found(u, v));
        }
        if let Some(back) = self.adjacency.get_mut(v) {
            back.remove(u);
        }
        self.edge_count -= 1;
        Ok(())
    }

    /// Neighbors of `v`; empty if `v` is not in the graph
    pub fn neighbors<'a>(&'a self, v: &V) -> impl Iterator<Item = &'a V> + 'a {
        self.adjacency
            .get(v)
            .into_iter()
            .flat_map(|neighbors| neighbors.keys())
    }

    /// Degree of `v`; 0 if `v` is not in the graph
    pub fn degree(&self, v: &V) -> usize {
        self.adjacency.get(v).map_or(0, |neighbors| neighbors.len())
    }

    pub fn contains_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.adjacency
            .get(u)
            .map_or(false, |neighbors| neighbors.contains_key(v))
    }

    /// Stored weight of `{u, v}`, if the edge exists
    pub fn weight(&self, u: &V, v: &V) -> Option<f64> {
        self.adjacency.get(u).and_then(|neighbors| neighbors.get(v).copied())
    }

    /// All vertices, in no particular order
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    /// Every undirected edge exactly once, in no particular order
    pub fn edges(&self) -> impl Iterator<Item = Edge<V>> + '_ {
        self.adjacency.iter().flat_map(|(u, neighbors)| {
            neighbors
                .keys()
                .filter(move |v| u < *v)
                .map(move |v| Edge::ordered(u.clone(), v.clone()))
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct undirected edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
