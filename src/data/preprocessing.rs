//! Data preprocessing module for graph analysis

use std::collections::HashSet;

use anyhow::Result;

use crate::graph::{Graph, Vertex};

/// Keep only relationships listed in both directions.
///
/// Input arcs are read as directed; each mutual pair is returned once with
/// its endpoints in ascending order. Self-loops are dropped. This is the
/// repair step for adjacency data that is not already symmetric.
pub fn mutual_edges<V: Vertex>(arcs: &[(V, V)]) -> Vec<(V, V)> {
    let present: HashSet<(&V, &V)> = arcs.iter().map(|(a, b)| (a, b)).collect();

    let mut self_loops = 0usize;
    let mut mutual: Vec<(V, V)> = Vec::new();
    for (src, dst) in arcs {
        if src == dst {
            self_loops += 1;
            continue;
        }
        // Only store in one direction
        if src < dst && present.contains(&(dst, src)) {
            mutual.push((src.clone(), dst.clone()));
        }
    }
    mutual.sort();
    mutual.dedup();

    if self_loops > 0 {
        log::warn!("Dropped {} self-loops", self_loops);
    }
    log::info!(
        "Found {} mutual relationships among {} arcs",
        mutual.len(),
        arcs.len()
    );
    mutual
}

/// Flatten an adjacency mapping into directed arcs
pub fn adjacency_arcs<V, I, N>(adjacency: I) -> Vec<(V, V)>
where
    V: Vertex,
    I: IntoIterator<Item = (V, N)>,
    N: IntoIterator<Item = V>,
{
    adjacency
        .into_iter()
        .flat_map(|(v, neighbors)| neighbors.into_iter().map(move |n| (v.clone(), n)))
        .collect()
}

/// Filter a graph to only include vertices with a minimum degree.
///
/// Degrees are measured in the input graph; the result is the subgraph
/// induced by the surviving vertices.
pub fn filter_by_degree<V: Vertex>(graph: &Graph<V>, min_degree: usize) -> Result<Graph<V>> {
    let keep: HashSet<&V> = graph
        .vertices()
        .filter(|v| graph.degree(v) >= min_degree)
        .collect();

    let mut filtered = Graph::with_capacity(keep.len());
    for v in &keep {
        filtered.add_vertex((*v).clone());
    }
    for edge in graph.edges() {
        let (a, b) = edge.endpoints();
        if keep.contains(a) && keep.contains(b) {
            let weight = graph.weight(a, b).unwrap_or(1.0);
            filtered.add_weighted_edge(a.clone(), b.clone(), weight)?;
        }
    }

    log::info!(
        "Kept {} of {} vertices with degree >= {}",
        filtered.vertex_count(),
        graph.vertex_count(),
        min_degree
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutual_edges_keeps_reciprocated_arcs_once() {
        let arcs = vec![(1, 2), (2, 1), (2, 3), (4, 4), (3, 1), (1, 3), (1, 2)];
        assert_eq!(mutual_edges(&arcs), vec![(1, 2), (1, 3)]);
    }

    #[test]
    fn adjacency_arcs_flattens() {
        let arcs = adjacency_arcs(vec![(1, vec![2, 3]), (2, vec![1])]);
        assert_eq!(arcs, vec![(1, 2), (1, 3), (2, 1)]);
    }

    #[test]
    fn repaired_adjacency_builds() {
        // 1 -> 3 is not reciprocated and gets dropped
        let arcs = adjacency_arcs(vec![(1, vec![2, 3]), (2, vec![1]), (3, vec![])]);
        assert!(Graph::from_adjacency(vec![(1, vec![2, 3]), (2, vec![1]), (3, vec![])]).is_err());
        let g = Graph::from_edges(mutual_edges(&arcs)).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn degree_filter_induces_subgraph() {
        // star centre 0 with leaves 1..=3, plus 1-2
        let g = Graph::from_edges([(0, 1), (0, 2), (0, 3), (1, 2)]).unwrap();
        let f = filter_by_degree(&g, 2).unwrap();
        assert_eq!(f.vertex_count(), 3);
        assert!(!f.contains_vertex(&3));
        assert_eq!(f.edge_count(), 3);
    }
}
