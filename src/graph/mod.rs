//! Graph representation and algorithms module

pub mod store;
pub mod builder;
pub mod algorithms;
pub mod convert;

pub use store::{Edge, Graph, Vertex};
pub use builder::GraphBuilder;
pub use algorithms::{all_shortest_paths, all_shortest_paths_bounded};
