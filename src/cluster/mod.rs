//! Cluster analysis module

pub mod detection;
pub mod betweenness;
pub mod metrics;
pub mod engine;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

use crate::graph::{Edge, Graph, Vertex};

pub use betweenness::EdgeBetweenness;
pub use detection::components;
pub use engine::{cluster, Clusterer};
pub use metrics::{Density, NewmanGirvan, Scorer};

/// A set of disjoint, non-empty vertex sets.
///
/// Clusters are kept sorted by their smallest member, so two partitions
/// compare equal exactly when they contain the same sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition<V: Ord> {
    clusters: Vec<BTreeSet<V>>,
}

/// Decoded through [`Partition::from_clusters`]. A vertex listed in more
/// than one cluster is an error.
impl<'de, V: Vertex + Deserialize<'de>> Deserialize<'de> for Partition<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Clusters<V: Ord> {
            clusters: Vec<BTreeSet<V>>,
        }

        let raw = Clusters::deserialize(deserializer)?;
        let partition = Partition::from_clusters(raw.clusters);
        if partition.membership().len() != partition.vertex_count() {
            return Err(serde::de::Error::custom(
                "vertex appears in more than one cluster",
            ));
        }
        Ok(partition)
    }
}

impl<V: Vertex> Partition<V> {
    /// Normalize a collection of clusters. Empty clusters are dropped.
    pub fn from_clusters<I, C>(clusters: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = V>,
    {
        let mut clusters: Vec<BTreeSet<V>> = clusters
            .into_iter()
            .map(|c| c.into_iter().collect::<BTreeSet<V>>())
            .filter(|c| !c.is_empty())
            .collect();
        clusters.sort_by(|a, b| a.iter().next().cmp(&b.iter().next()));
        Self { clusters }
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn clusters(&self) -> &[BTreeSet<V>] {
        &self.clusters
    }

    pub fn iter(&self) -> impl Iterator<Item = &BTreeSet<V>> {
        self.clusters.iter()
    }

    /// Total number of vertices across all clusters
    pub fn vertex_count(&self) -> usize {
        self.clusters.iter().map(|c| c.len()).sum()
    }

    /// Map each vertex to the index of its cluster
    pub fn membership(&self) -> HashMap<&V, usize> {
        let mut map = HashMap::with_capacity(self.vertex_count());
        for (idx, cluster) in self.clusters.iter().enumerate() {
            for v in cluster {
                map.insert(v, idx);
            }
        }
        map
    }

    /// Index of the cluster containing `v`
    pub fn cluster_of(&self, v: &V) -> Option<usize> {
        self.clusters.iter().position(|c| c.contains(v))
    }

    /// Whether the clusters are pairwise disjoint and cover exactly the
    /// vertices of `graph`
    pub fn is_partition_of(&self, graph: &Graph<V>) -> bool {
        let membership = self.membership();
        membership.len() == self.vertex_count()
            && membership.len() == graph.vertex_count()
            && graph.vertices().all(|v| membership.contains_key(v))
    }
}

/// Snapshot taken after each edge removal (index 0 is the unmodified graph)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutRecord {
    /// Number of clusters after the removal
    pub cluster_count: usize,

    /// Score of the partition against the original graph
    pub modularity: f64,
}

/// Everything a clustering run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "V: Vertex + Deserialize<'de>"))]
pub struct ClusterOutcome<V: Ord> {
    /// Highest-scoring partition seen during the run
    pub best: Partition<V>,

    /// Score of `best`
    pub best_score: f64,

    /// One record per state, `edge count + 1` in total
    pub cuts: Vec<CutRecord>,

    /// Partitions recorded each time the cluster count grew
    pub hierarchy: Vec<Partition<V>>,

    /// Edges in the order they were removed
    pub removed: Vec<Edge<V>>,
}
