//! Iterative edge-betweenness clustering (Girvan–Newman)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cluster::betweenness::EdgeBetweenness;
use crate::cluster::detection::components;
use crate::cluster::metrics::{NewmanGirvan, Scorer};
use crate::cluster::{ClusterOutcome, CutRecord};
use crate::config::Config;
use crate::error::{ClusterError, Result};
use crate::graph::{Edge, Graph, Vertex};

/// Cluster `graph` with the default configuration and Newman–Girvan scoring
pub fn cluster<V: Vertex>(graph: &Graph<V>) -> Result<ClusterOutcome<V>> {
    Clusterer::new(Config::default()).run(graph)
}

/// Highest-betweenness edge, or [`ClusterError::TrackerExhausted`] if the
/// tracker holds none.
fn take_max_edge<V: Vertex>(tracker: &EdgeBetweenness<V>, iteration: usize) -> Result<Edge<V>> {
    tracker
        .max_edge()
        .ok_or(ClusterError::TrackerExhausted { iteration })
}

/// Clustering engine.
///
/// Removes the highest-betweenness edge from a private copy of the input
/// until no edges remain, scoring the component partition after every
/// removal against the untouched input graph.
pub struct Clusterer<S = NewmanGirvan> {
    config: Config,
    scorer: S,
    cancel: Option<Arc<AtomicBool>>,
}

impl Clusterer<NewmanGirvan> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            scorer: NewmanGirvan,
            cancel: None,
        }
    }
}

impl<S> Clusterer<S> {
    /// Replace the scoring strategy
    pub fn with_scorer<T>(self, scorer: T) -> Clusterer<T> {
        Clusterer {
            config: self.config,
            scorer,
            cancel: self.cancel,
        }
    }

    /// Abort the run with [`ClusterError::Cancelled`] once `flag` is set.
    /// Checked before each edge removal.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn check_cancelled(&self, iteration: usize) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => {
                log::info!("Clustering cancelled before iteration {}", iteration);
                Err(ClusterError::Cancelled { iteration })
            }
            _ => Ok(()),
        }
    }

    /// Run the full removal sequence over `graph`.
    ///
    /// `graph` is only read. The outcome holds `edge_count + 1` cut records,
    /// the best-scoring partition (earliest on ties) and the hierarchy of
    /// partitions at which the cluster count grew.
    pub fn run<V: Vertex>(&self, graph: &Graph<V>) -> Result<ClusterOutcome<V>>
    where
        S: Scorer<V>,
    {
        let total = graph.edge_count();
        log::info!(
            "Clustering graph with {} vertices and {} edges",
            graph.vertex_count(),
            total
        );

        let mut working = graph.clone();

        let mut best = components(graph);
        let mut best_score = self.scorer.score(&best, graph);
        let mut hierarchy = vec![best.clone()];
        let mut cuts = Vec::with_capacity(total + 1);
        cuts.push(CutRecord {
            cluster_count: best.len(),
            modularity: best_score,
        });
        let mut removed = Vec::with_capacity(total);

        let mut tracker = EdgeBetweenness::new(&self.config);
        tracker.initialize(&working)?;

        for iteration in 0..total {
            self.check_cancelled(iteration)?;

            // The tracker holds one entry per remaining edge.
            let edge = take_max_edge(&tracker, iteration)?;
            working.remove_edge(edge.lo(), edge.hi())?;
            tracker.remove(&edge);

            let partition = components(&working);
            let previous = hierarchy.last().map_or(0, |p| p.len());
            if partition.len() > previous {
                log::info!(
                    "Split into {} clusters after {} removals",
                    partition.len(),
                    iteration + 1
                );
                hierarchy.push(partition.clone());
            }

            let score = self.scorer.score(&partition, graph);
            log::debug!(
                "Removed edge {:?}: {} clusters, score {:.6}",
                edge.endpoints(),
                partition.len(),
                score
            );

            let reevaluate = partition
                .iter()
                .filter(|c| c.contains(edge.lo()) || c.contains(edge.hi()))
                .flatten();
            tracker.update(reevaluate, &working)?;

            cuts.push(CutRecord {
                cluster_count: partition.len(),
                modularity: score,
            });
            if score > best_score {
                best = partition;
                best_score = score;
            }
            removed.push(edge);
        }

        log::info!(
            "Best partition has {} clusters with score {:.6}",
            best.len(),
            best_score
        );

        Ok(ClusterOutcome {
            best,
            best_score,
            cuts,
            hierarchy,
            removed,
        })
    }
}
