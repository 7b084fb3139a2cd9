use proptest::prelude::*;

use betweenness_cluster::cluster::components;
use betweenness_cluster::{cluster, Graph};

fn arb_graph() -> impl Strategy<Value = Graph<u8>> {
    (1u8..12, proptest::collection::vec((0u8..12, 0u8..12), 0..30)).prop_map(|(n, pairs)| {
        let mut g = Graph::new();
        for v in 0..n {
            g.add_vertex(v);
        }
        for (a, b) in pairs {
            if a != b {
                // endpoints outside 0..n are ignored by add_edge
                let _ = g.add_edge(a, b);
            }
        }
        g
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn trace_has_one_record_per_edge_plus_baseline(g in arb_graph()) {
        let out = cluster(&g).unwrap();
        prop_assert_eq!(out.cuts.len(), g.edge_count() + 1);
        prop_assert_eq!(out.removed.len(), g.edge_count());
    }

    #[test]
    fn cluster_count_never_decreases(g in arb_graph()) {
        let out = cluster(&g).unwrap();
        for pair in out.cuts.windows(2) {
            prop_assert!(pair[0].cluster_count <= pair[1].cluster_count);
        }
        prop_assert_eq!(
            out.cuts.last().map(|c| c.cluster_count),
            Some(g.vertex_count())
        );
    }

    #[test]
    fn every_intermediate_state_is_a_partition(g in arb_graph()) {
        let out = cluster(&g).unwrap();
        let mut working = g.clone();
        prop_assert!(components(&working).is_partition_of(&working));
        for edge in &out.removed {
            working.remove_edge(edge.lo(), edge.hi()).unwrap();
            let p = components(&working);
            prop_assert!(p.is_partition_of(&working));
        }
        prop_assert_eq!(working.edge_count(), 0);
    }

    #[test]
    fn best_is_a_recorded_partition(g in arb_graph()) {
        let out = cluster(&g).unwrap();
        let mut working = g.clone();
        let mut seen = vec![components(&working)];
        for edge in &out.removed {
            working.remove_edge(edge.lo(), edge.hi()).unwrap();
            seen.push(components(&working));
        }
        prop_assert!(seen.contains(&out.best));
        let best_recorded = out
            .cuts
            .iter()
            .map(|c| c.modularity)
            .fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(out.best_score, best_recorded);
    }

    #[test]
    fn hierarchy_counts_strictly_increase(g in arb_graph()) {
        let out = cluster(&g).unwrap();
        for pair in out.hierarchy.windows(2) {
            prop_assert!(pair[0].len() < pair[1].len());
        }
    }
}
