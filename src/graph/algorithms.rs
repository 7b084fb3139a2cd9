//! Graph algorithms for analysis

use std::collections::{HashMap, VecDeque};

use crate::error::{ClusterError, GraphError};
use crate::graph::store::{Graph, Vertex};

/// Find every minimum-length path from `start` to `end`.
///
/// Each path is returned as a vertex sequence beginning with `start` and
/// ending with `end`. An empty result means `end` is unreachable; `start ==
/// end` yields the single trivial path `[start]`. The order of the returned
/// paths is unspecified.
pub fn all_shortest_paths<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    end: &V,
) -> Result<Vec<Vec<V>>, GraphError> {
    check_endpoints(graph, start, end)?;
    let distance = bfs_distances(graph, start, end);
    // Without a limit reconstruction always completes.
    Ok(reconstruct(graph, start, end, &distance, None).unwrap_or_default())
}

/// Like [`all_shortest_paths`], but gives up with
/// [`ClusterError::PathBudgetExceeded`] once more than `limit` partial or
/// complete paths are held at the same time.
pub fn all_shortest_paths_bounded<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    end: &V,
    limit: usize,
) -> Result<Vec<Vec<V>>, ClusterError> {
    check_endpoints(graph, start, end)?;
    let distance = bfs_distances(graph, start, end);
    reconstruct(graph, start, end, &distance, Some(limit))
        .ok_or(ClusterError::PathBudgetExceeded { limit })
}

fn check_endpoints<V: Vertex>(graph: &Graph<V>, start: &V, end: &V) -> Result<(), GraphError> {
    for v in [start, end] {
        if !graph.contains_vertex(v) {
            return Err(GraphError::vertex_not_found(v));
        }
    }
    Ok(())
}

/// Forward BFS from `start`, labeling distances.
///
/// Vertices are labeled on discovery. The search stops once `end` is
/// dequeued: every vertex closer to `start` than `end` is labeled by then.
/// Vertices missing from the map are unreachable.
fn bfs_distances<'g, V: Vertex>(
    graph: &'g Graph<V>,
    start: &'g V,
    end: &V,
) -> HashMap<&'g V, usize> {
    let mut distance = HashMap::new();
    let mut queue = VecDeque::new();

    distance.insert(start, 0);
    queue.push_back(start);

    while let Some(vertex) = queue.pop_front() {
        if vertex == end {
            break;
        }
        let next = distance[vertex] + 1;
        for neighbor in graph.neighbors(vertex) {
            if !distance.contains_key(neighbor) {
                distance.insert(neighbor, next);
                queue.push_back(neighbor);
            }
        }
    }

    distance
}

/// Walk back from `end`, prepending any neighbor one step closer to `start`.
///
/// Partial paths live in an arena as `(vertex, next)` links pointing toward
/// `end`, so branches share their common suffix and a path is only copied
/// out once it reaches `start`. Returns `None` when `limit` is exceeded.
fn reconstruct<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    end: &V,
    distance: &HashMap<&V, usize>,
    limit: Option<usize>,
) -> Option<Vec<Vec<V>>> {
    if start == end {
        return Some(vec![vec![start.clone()]]);
    }
    if !distance.contains_key(end) {
        return Some(Vec::new());
    }

    let mut arena: Vec<(&V, Option<usize>)> = vec![(end, None)];
    let mut frontier = VecDeque::from([0usize]);
    let mut complete = Vec::new();

    while let Some(idx) = frontier.pop_front() {
        let vertex = arena[idx].0;
        let Some(wanted) = distance[vertex].checked_sub(1) else {
            continue;
        };
        for neighbor in graph.neighbors(vertex) {
            if distance.get(neighbor) != Some(&wanted) {
                continue;
            }
            arena.push((neighbor, Some(idx)));
            let link = arena.len() - 1;
            if neighbor == start {
                complete.push(link);
            } else {
                frontier.push_back(link);
            }
        }
        if let Some(limit) = limit {
            if complete.len() + frontier.len() > limit {
                return None;
            }
        }
    }

    let paths = complete
        .into_iter()
        .map(|head| {
            let mut path = Vec::with_capacity(distance[end] + 1);
            let mut cursor = Some(head);
            while let Some(idx) = cursor {
                let (vertex, next) = arena[idx];
                path.push(vertex.clone());
                cursor = next;
            }
            path
        })
        .collect();

    Some(paths)
}
