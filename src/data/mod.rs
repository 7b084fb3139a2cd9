//! Graph ingestion and preprocessing module

pub mod edgelist;
pub mod preprocessing;
