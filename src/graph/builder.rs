//! Graph construction module

use std::collections::{HashMap, HashSet};

use crate::error::GraphError;
use crate::graph::store::{Graph, Vertex};

/// Builder for incrementally constructing a validated [`Graph`].
///
/// Arcs are collected one direction at a time and only checked in
/// [`GraphBuilder::build`], so an adjacency mapping can be fed in as-is and
/// rejected as a whole if it is not symmetric.
pub struct GraphBuilder<V: Vertex> {
    /// Vertices in insertion order
    vertices: Vec<V>,

    /// Vertex membership lookup
    known: HashSet<V>,

    /// Vertices declared as adjacency-mapping keys
    declared: HashSet<V>,

    /// Directed arcs with their weights
    arcs: HashMap<V, HashMap<V, f64>>,

    /// First error seen while collecting
    error: Option<GraphError>,
}

impl<V: Vertex> Default for GraphBuilder<V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<V: Vertex> GraphBuilder<V> {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            known: HashSet::with_capacity(capacity),
            declared: HashSet::new(),
            arcs: HashMap::with_capacity(capacity),
            error: None,
        }
    }

    /// Add a vertex; repeated additions are ignored
    pub fn add_vertex(&mut self, v: V) -> &mut Self {
        if self.known.insert(v.clone()) {
            self.vertices.push(v);
        }
        self
    }

    /// Declare `v` as a key of an adjacency mapping. Declaring the same id
    /// twice fails the build.
    pub fn declare_vertex(&mut self, v: V) -> &mut Self {
        if !self.declared.insert(v.clone()) {
            self.fail(GraphError::duplicate(&v));
        }
        self.add_vertex(v)
    }

    /// Add an undirected unit-weight edge (both arcs)
    pub fn add_edge(&mut self, u: V, v: V) -> &mut Self {
        self.add_weighted_edge(u, v, 1.0)
    }

    /// Add an undirected weighted edge (both arcs)
    pub fn add_weighted_edge(&mut self, u: V, v: V, weight: f64) -> &mut Self {
        self.add_arc(u.clone(), v.clone(), weight);
        self.add_arc(v, u, weight)
    }

    /// Add a single directed arc; `build` requires the reverse arc to exist
    pub fn add_arc(&mut self, from: V, to: V, weight: f64) -> &mut Self {
        if from == to {
            self.fail(GraphError::self_loop(&from));
            return self;
        }
        self.add_vertex(from.clone());
        self.add_vertex(to.clone());
        self.arcs.entry(from).or_default().insert(to, weight);
        self
    }

    fn fail(&mut self, error: GraphError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Validate the collected arcs and build the graph
    pub fn build(self) -> Result<Graph<V>, GraphError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        for (from, targets) in &self.arcs {
            for to in targets.keys() {
                let reverse = self
                    .arcs
                    .get(to)
                    .map_or(false, |back| back.contains_key(from));
                if !reverse {
                    return Err(GraphError::asymmetric(from, to));
                }
            }
        }

        let mut graph = Graph::with_capacity(self.vertices.len());
        for v in &self.vertices {
            graph.add_vertex(v.clone());
        }
        for (from, targets) in self.arcs {
            for (to, weight) in targets {
                if from < to {
                    graph.add_weighted_edge(from.clone(), to, weight)?;
                }
            }
        }

        log::debug!(
            "Built graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );

        Ok(graph)
    }
}

impl<V: Vertex> Graph<V> {
    /// Build a graph from a list of undirected edges.
    ///
    /// Duplicate edges (in either orientation) collapse into one.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut builder = GraphBuilder::default();
        for (u, v) in edges {
            builder.add_edge(u, v);
        }
        builder.build()
    }

    /// Build a graph from a vertex -> neighbors mapping.
    ///
    /// The mapping must already be symmetric; it is never repaired here.
    pub fn from_adjacency<I, N>(adjacency: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = V>,
    {
        let mut builder = GraphBuilder::default();
        for (v, neighbors) in adjacency {
            builder.declare_vertex(v.clone());
            for n in neighbors {
                builder.add_arc(v.clone(), n, 1.0);
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_edges_collapses_duplicates() {
        let g = Graph::from_edges([(0, 1), (1, 0), (1, 2)]).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn from_edges_rejects_self_loop() {
        let err = Graph::from_edges([(0, 1), (2, 2)]).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop("2".to_string()));
    }

    #[test]
    fn from_adjacency_accepts_symmetric_mapping() {
        let g = Graph::from_adjacency(vec![
            ("a", vec!["b", "c"]),
            ("b", vec!["a"]),
            ("c", vec!["a"]),
            ("d", vec![]),
        ])
        .unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(&"d"), 0);
    }

    #[test]
    fn from_adjacency_rejects_asymmetric_mapping() {
        let err = Graph::from_adjacency(vec![(1, vec![2]), (2, vec![])]).unwrap_err();
        assert!(matches!(err, GraphError::AsymmetricEdge { .. }));
    }

    #[test]
    fn from_adjacency_rejects_duplicate_vertex() {
        let err = Graph::from_adjacency(vec![(1, vec![2]), (2, vec![1]), (1, vec![2])])
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateVertex("1".to_string()));
    }

    #[test]
    fn from_adjacency_rejects_neighbor_without_entry() {
        // 2 is never declared, so the arc 1 -> 2 has no reverse
        let err = Graph::from_adjacency(vec![(1, vec![2])]).unwrap_err();
        assert!(matches!(err, GraphError::AsymmetricEdge { .. }));
    }

    #[test]
    fn builder_keeps_isolated_vertices() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_vertex(7).add_edge(1, 2);
        let g = builder.build().unwrap();
        assert!(g.contains_vertex(&7));
        assert_eq!(g.edge_count(), 1);
    }
}
