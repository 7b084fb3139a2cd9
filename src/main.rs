use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use betweenness_cluster::config::{Config, DEFAULT_PARALLEL_THRESHOLD};
use betweenness_cluster::data::{edgelist, preprocessing};
use betweenness_cluster::{storage, Clusterer, Graph};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// One `u v` pair per line
    Edges,
    /// JSON object mapping vertex id to neighbor ids
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "betweenness-cluster",
    about = "Community detection by iterative edge-betweenness removal"
)]
struct Cli {
    /// Path to input graph file
    #[clap(long)]
    input: String,

    /// Input file format
    #[clap(long, value_enum, default_value = "edges")]
    format: InputFormat,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// Treat input as directed and keep only reciprocated relationships
    #[clap(long)]
    mutual: bool,

    /// Minimum vertex degree for a vertex to be included
    #[clap(long, default_value = "0")]
    min_degree: usize,

    /// Abort if any vertex pair has more than this many shortest paths
    #[clap(long)]
    max_paths: Option<usize>,

    /// Vertex pairs per betweenness update before work goes parallel
    #[clap(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn load_graph(args: &Cli) -> Result<Graph<String>> {
    let graph = match (args.format, args.mutual) {
        (InputFormat::Edges, false) => Graph::from_edges(edgelist::load_edge_list(&args.input)?)?,
        (InputFormat::Edges, true) => {
            let arcs = edgelist::load_edge_list(&args.input)?;
            Graph::from_edges(preprocessing::mutual_edges(&arcs))?
        }
        (InputFormat::Json, false) => {
            Graph::from_adjacency(edgelist::load_adjacency_json(&args.input)?)?
        }
        (InputFormat::Json, true) => {
            let adjacency = edgelist::load_adjacency_json(&args.input)?;
            let mut graph = Graph::from_edges(preprocessing::mutual_edges(
                &preprocessing::adjacency_arcs(adjacency.clone()),
            ))?;
            // vertices with no reciprocated neighbor still belong to the graph
            for v in adjacency.into_keys() {
                graph.add_vertex(v);
            }
            graph
        }
    };
    Ok(graph)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config::new(args.parallel_threshold, args.max_paths);

    log::info!("Starting edge-betweenness clustering");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load data
    let mut graph = load_graph(&args).with_context(|| format!("loading {}", args.input))?;
    log::info!(
        "Loaded graph with {} vertices and {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    // 2. Drop low-degree vertices
    if args.min_degree > 0 {
        graph = preprocessing::filter_by_degree(&graph, args.min_degree)?;
    }

    // 3. Cluster
    let outcome = Clusterer::new(config).run(&graph)?;
    log::info!(
        "Best partition: {} clusters, modularity {:.6}",
        outcome.best.len(),
        outcome.best_score
    );

    // 4. Save results
    storage::save_results(&outcome, &graph, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
