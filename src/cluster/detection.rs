//! Connected component detection

use std::collections::{HashSet, VecDeque};

use crate::cluster::Partition;
use crate::graph::{Graph, Vertex};

/// Split the graph into its connected components using breadth-first search.
///
/// Vertices are marked on discovery rather than on dequeue, so each one is
/// enqueued exactly once and the whole pass is O(V + E).
pub fn components<V: Vertex>(graph: &Graph<V>) -> Partition<V> {
    let mut visited: HashSet<&V> = HashSet::with_capacity(graph.vertex_count());
    let mut clusters: Vec<Vec<V>> = Vec::new();
    let mut queue = VecDeque::new();

    for root in graph.vertices() {
        if !visited.insert(root) {
            continue;
        }

        let mut members = vec![root.clone()];
        queue.push_back(root);

        while let Some(vertex) = queue.pop_front() {
            for neighbor in graph.neighbors(vertex) {
                if visited.insert(neighbor) {
                    members.push(neighbor.clone());
                    queue.push_back(neighbor);
                }
            }
        }

        clusters.push(members);
    }

    log::trace!("Found {} connected components", clusters.len());

    Partition::from_clusters(clusters)
}
