//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, to_string_pretty};

use crate::cluster::ClusterOutcome;
use crate::graph::{Graph, Vertex};

/// Save a clustering run to the specified directory
pub fn save_results<V>(
    outcome: &ClusterOutcome<V>,
    graph: &Graph<V>,
    output_dir: impl AsRef<Path>,
) -> Result<()>
where
    V: Vertex + Serialize,
{
    let output_dir = output_dir.as_ref();
    log::info!(
        "Saving {} cut records to {}",
        outcome.cuts.len(),
        output_dir.display()
    );

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(outcome, graph, output_dir)?;
    write_json(&output_dir.join("best_partition.json"), &outcome.best)?;
    write_json(&output_dir.join("cut_records.json"), &outcome.cuts)?;
    write_json(&output_dir.join("hierarchy.json"), &outcome.hierarchy)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary<V: Vertex + Serialize>(
    outcome: &ClusterOutcome<V>,
    graph: &Graph<V>,
    output_dir: &Path,
) -> Result<()> {
    let sizes: Vec<usize> = outcome.best.iter().map(|c| c.len()).collect();
    let avg_degree = if graph.is_empty() {
        0.0
    } else {
        2.0 * graph.edge_count() as f64 / graph.vertex_count() as f64
    };

    let summary = json!({
        "graph_stats": {
            "vertex_count": graph.vertex_count(),
            "edge_count": graph.edge_count(),
            "avg_degree": avg_degree,
        },
        "cluster_stats": {
            "best_score": outcome.best_score,
            "cluster_count": outcome.best.len(),
            "largest_cluster_size": sizes.iter().copied().max().unwrap_or(0),
            "smallest_cluster_size": sizes.iter().copied().min().unwrap_or(0),
            "hierarchy_levels": outcome.hierarchy.len(),
        },
        "removed_edges": outcome.removed,
    });

    write_json(&output_dir.join("summary.json"), &summary)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::cluster;

    #[test]
    fn writes_all_result_files() {
        let g = Graph::from_edges([(0u32, 1u32), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)])
            .unwrap();
        let outcome = cluster(&g).unwrap();
        let dir = tempfile::tempdir().unwrap();

        save_results(&outcome, &g, dir.path()).unwrap();

        for name in [
            "summary.json",
            "best_partition.json",
            "cut_records.json",
            "hierarchy.json",
        ] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["cluster_stats"]["cluster_count"], 2);
        assert_eq!(summary["graph_stats"]["edge_count"], 7);

        let cuts: Vec<crate::cluster::CutRecord> =
            serde_json::from_str(&fs::read_to_string(dir.path().join("cut_records.json")).unwrap())
                .unwrap();
        assert_eq!(cuts.len(), outcome.cuts.len());
        for (read, original) in cuts.iter().zip(&outcome.cuts) {
            assert_eq!(read.cluster_count, original.cluster_count);
            assert!((read.modularity - original.modularity).abs() < 1e-12);
        }
    }
}
