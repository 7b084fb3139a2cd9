//! Partition scoring

use ndarray::{Array2, Axis};

use crate::cluster::Partition;
use crate::graph::{Graph, Vertex};

/// Scores a partition against a fixed base graph; higher is better.
///
/// Implemented for any `Fn(&Partition<V>, &Graph<V>) -> f64`, so ad-hoc
/// strategies can be passed as closures.
pub trait Scorer<V: Vertex> {
    fn score(&self, partition: &Partition<V>, base: &Graph<V>) -> f64;
}

impl<V, F> Scorer<V> for F
where
    V: Vertex,
    F: Fn(&Partition<V>, &Graph<V>) -> f64,
{
    fn score(&self, partition: &Partition<V>, base: &Graph<V>) -> f64 {
        self(partition, base)
    }
}

/// Newman–Girvan modularity
#[derive(Debug, Clone, Copy, Default)]
pub struct NewmanGirvan;

impl<V: Vertex> Scorer<V> for NewmanGirvan {
    fn score(&self, partition: &Partition<V>, base: &Graph<V>) -> f64 {
        modularity(partition, base)
    }
}

/// Newman–Girvan modularity `Q = Σ_i (e_ii - a_i²)`.
///
/// `e[i][j]` is the fraction of edge endpoints running from cluster `i` to
/// cluster `j`, so an internal edge counts twice toward `e[i][i]`. A base
/// graph without edges has no defined modularity and scores `0.0`.
pub fn modularity<V: Vertex>(partition: &Partition<V>, base: &Graph<V>) -> f64 {
    let m = base.edge_count();
    if m == 0 {
        return 0.0;
    }

    let k = partition.len();
    let membership = partition.membership();
    let mut e = Array2::<f64>::zeros((k, k));

    for (i, cluster) in partition.iter().enumerate() {
        for v in cluster {
            for n in base.neighbors(v) {
                if let Some(&j) = membership.get(n) {
                    e[[i, j]] += 1.0;
                }
            }
        }
    }
    e /= 2.0 * m as f64;

    let a = e.sum_axis(Axis(1));
    (0..k).map(|i| e[[i, i]] - a[i] * a[i]).sum()
}

/// Sum over clusters of internal edge endpoints per member.
///
/// Tends to favour large clusters; kept as an alternative strategy, not a
/// replacement for [`NewmanGirvan`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Density;

impl<V: Vertex> Scorer<V> for Density {
    fn score(&self, partition: &Partition<V>, base: &Graph<V>) -> f64 {
        partition
            .iter()
            .map(|cluster| {
                let internal = cluster
                    .iter()
                    .flat_map(|v| base.neighbors(v))
                    .filter(|n| cluster.contains(*n))
                    .count();
                internal as f64 / cluster.len() as f64
            })
            .sum()
    }
}
