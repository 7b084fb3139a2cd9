//! Conversion to and from `petgraph` undirected graphs

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::error::GraphError;
use crate::graph::store::{Graph, Vertex};

impl<V: Vertex> Graph<V> {
    /// Copy into a `petgraph` graph whose node weights are the vertex ids.
    ///
    /// Nodes are inserted in ascending vertex order so the resulting indices
    /// are stable across runs.
    pub fn to_petgraph(&self) -> UnGraph<V, f64> {
        let mut vertices: Vec<&V> = self.vertices().collect();
        vertices.sort();

        let mut out = UnGraph::with_capacity(vertices.len(), self.edge_count());
        let mut index: HashMap<&V, NodeIndex> = HashMap::with_capacity(vertices.len());
        for v in vertices {
            index.insert(v, out.add_node(v.clone()));
        }

        let mut edges: Vec<_> = self.edges().collect();
        edges.sort();
        for edge in edges {
            let (a, b) = edge.endpoints();
            let weight = self.weight(a, b).unwrap_or(1.0);
            out.add_edge(index[a], index[b], weight);
        }
        out
    }

    /// Build from a `petgraph` undirected graph, using node weights as ids.
    ///
    /// Parallel edges collapse into one; self-loops and repeated node
    /// weights are rejected.
    pub fn from_petgraph(source: &UnGraph<V, f64>) -> Result<Self, GraphError> {
        let mut graph = Graph::with_capacity(source.node_count());
        for node in source.node_indices() {
            let v = &source[node];
            if !graph.add_vertex(v.clone()) {
                return Err(GraphError::duplicate(v));
            }
        }
        for edge in source.edge_indices() {
            if let Some((a, b)) = source.edge_endpoints(edge) {
                let weight = source[edge];
                graph.add_weighted_edge(source[a].clone(), source[b].clone(), weight)?;
            }
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::connected_components;

    #[test]
    fn petgraph_round_trip_preserves_structure() {
        let g = Graph::from_edges([(0, 1), (1, 2), (3, 4)]).unwrap();
        let pg = g.to_petgraph();
        assert_eq!(pg.node_count(), 5);
        assert_eq!(pg.edge_count(), 3);
        assert_eq!(connected_components(&pg), 2);

        let back = Graph::from_petgraph(&pg).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn from_petgraph_rejects_self_loop() {
        let mut pg = UnGraph::<u32, f64>::new_undirected();
        let a = pg.add_node(0);
        pg.add_edge(a, a, 1.0);
        assert!(matches!(
            Graph::from_petgraph(&pg),
            Err(GraphError::SelfLoop(_))
        ));
    }
}
