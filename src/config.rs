//! Configuration management for the clustering engine

/// Default number of vertex pairs at which betweenness updates go parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

/// Configuration for a clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Vertex pairs per betweenness update before work is spread over the
    /// rayon pool
    pub parallel_threshold: usize,

    /// Maximum number of shortest paths tracked for a single vertex pair
    pub max_paths_per_pair: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_paths_per_pair: None,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(parallel_threshold: usize, max_paths_per_pair: Option<usize>) -> Self {
        Self {
            parallel_threshold,
            max_paths_per_pair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_new() {
        let config = Config::default();
        assert_eq!(config, Config::new(DEFAULT_PARALLEL_THRESHOLD, None));
        assert_eq!(config.max_paths_per_pair, None);
    }
}
