//! Community detection by iterative edge-betweenness removal (Girvan–Newman)

pub mod config;
pub mod error;
pub mod graph;
pub mod cluster;
pub mod data;
pub mod storage;

pub use cluster::{cluster, ClusterOutcome, Clusterer, CutRecord, Partition};
pub use config::Config;
pub use error::{ClusterError, GraphError};
pub use graph::{Edge, Graph, GraphBuilder, Vertex};
