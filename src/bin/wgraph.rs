//! CLI entry point for the `wgraph` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use wgraph::cli::commands;
use wgraph::types::NodeKey;
use wgraph::GraphError;

#[derive(Parser)]
#[command(
    name = "wgraph",
    about = "wgraph CLI: undirected weighted graphs, connectivity and shortest paths"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new empty graph file (.wgr for binary, anything else for text)
    Create {
        /// Path to the graph file to create
        file: PathBuf,
        /// LZ4-compress the snapshot body (.wgr only)
        #[arg(long)]
        compress: bool,
    },
    /// Display information about a graph file
    Info {
        /// Path to the graph file
        file: PathBuf,
    },
    /// Add one or more nodes
    AddNode {
        /// Path to the graph file
        file: PathBuf,
        /// Node keys
        #[arg(required = true, allow_negative_numbers = true)]
        keys: Vec<NodeKey>,
    },
    /// Remove a node and all of its edges
    RemoveNode {
        /// Path to the graph file
        file: PathBuf,
        /// Node key
        #[arg(allow_negative_numbers = true)]
        key: NodeKey,
    },
    /// Connect two nodes, or change the weight of their edge
    Connect {
        /// Path to the graph file
        file: PathBuf,
        /// First node key
        #[arg(allow_negative_numbers = true)]
        a: NodeKey,
        /// Second node key
        #[arg(allow_negative_numbers = true)]
        b: NodeKey,
        /// Edge weight (non-negative)
        #[arg(allow_negative_numbers = true)]
        weight: f64,
    },
    /// Remove the edge between two nodes
    Disconnect {
        /// Path to the graph file
        file: PathBuf,
        /// First node key
        #[arg(allow_negative_numbers = true)]
        a: NodeKey,
        /// Second node key
        #[arg(allow_negative_numbers = true)]
        b: NodeKey,
    },
    /// Print the weight of the edge between two nodes
    Edge {
        /// Path to the graph file
        file: PathBuf,
        /// First node key
        #[arg(allow_negative_numbers = true)]
        a: NodeKey,
        /// Second node key
        #[arg(allow_negative_numbers = true)]
        b: NodeKey,
    },
    /// List the neighbors of a node
    Neighbors {
        /// Path to the graph file
        file: PathBuf,
        /// Node key
        #[arg(allow_negative_numbers = true)]
        key: NodeKey,
    },
    /// Check whether the graph is connected
    Connected {
        /// Path to the graph file
        file: PathBuf,
    },
    /// Shortest path between two nodes
    Path {
        /// Path to the graph file
        file: PathBuf,
        /// Source node key
        #[arg(allow_negative_numbers = true)]
        src: NodeKey,
        /// Destination node key
        #[arg(allow_negative_numbers = true)]
        dest: NodeKey,
    },
    /// Print the text export of a graph
    Export {
        /// Path to the graph file
        file: PathBuf,
    },
    /// Convert between text and binary formats (picked by extension)
    Convert {
        /// Input graph file
        input: PathBuf,
        /// Output graph file
        output: PathBuf,
        /// LZ4-compress the snapshot body (.wgr only)
        #[arg(long)]
        compress: bool,
    },
    /// Build the 11-node sample graph and run every query on it
    Demo {
        /// Also save the sample graph here
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let result = match cli.command {
        Commands::Create { file, compress } => commands::cmd_create(&file, compress),
        Commands::Info { file } => commands::cmd_info(&file, json),
        Commands::AddNode { file, keys } => commands::cmd_add_node(&file, &keys, json),
        Commands::RemoveNode { file, key } => commands::cmd_remove_node(&file, key, json),
        Commands::Connect { file, a, b, weight } => {
            commands::cmd_connect(&file, a, b, weight, json)
        }
        Commands::Disconnect { file, a, b } => commands::cmd_disconnect(&file, a, b, json),
        Commands::Edge { file, a, b } => commands::cmd_edge(&file, a, b, json),
        Commands::Neighbors { file, key } => commands::cmd_neighbors(&file, key, json),
        Commands::Connected { file } => commands::cmd_connected(&file, json),
        Commands::Path { file, src, dest } => commands::cmd_path(&file, src, dest, json),
        Commands::Export { file } => commands::cmd_export(&file),
        Commands::Convert {
            input,
            output,
            compress,
        } => commands::cmd_convert(&input, &output, compress),
        Commands::Demo { save } => commands::cmd_demo(save.as_deref(), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            GraphError::Io(_) => 1,
            GraphError::InvalidMagic
            | GraphError::UnsupportedVersion(_)
            | GraphError::Truncated
            | GraphError::Corrupt(_)
            | GraphError::Compression(_)
            | GraphError::Parse { .. } => 2,
            GraphError::InvalidWeight(_) => 3,
            GraphError::KeyNotFound(_) => 4,
        };
        process::exit(code);
    }
}
