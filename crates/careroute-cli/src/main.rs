use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod output;

use commands::WeightArg;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Facility routing utilities")]
struct Cli {
    /// Path to the node table CSV.
    #[arg(long)]
    nodes: PathBuf,

    /// Path to the edge table CSV.
    #[arg(long)]
    edges: PathBuf,

    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a priority-ordered route through multiple facilities.
    Route {
        /// Facility to visit; repeat for each waypoint.
        #[arg(long = "via", required = true)]
        via: Vec<String>,
        /// Edge attribute to minimise.
        #[arg(long, value_enum, default_value_t)]
        weight: WeightArg,
        /// Abort any leg after settling this many nodes.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Compute a single path between two facilities.
    Path {
        /// Starting facility name.
        #[arg(long)]
        from: String,
        /// Destination facility name.
        #[arg(long)]
        to: String,
        /// Edge attribute to minimise.
        #[arg(long, value_enum, default_value_t)]
        weight: WeightArg,
        /// Abort the search after settling this many nodes.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// List known facilities with their priority data.
    Facilities,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            via,
            weight,
            max_expansions,
        } => commands::route::run(&cli.nodes, &cli.edges, cli.format, via, weight, max_expansions),
        Command::Path {
            from,
            to,
            weight,
            max_expansions,
        } => commands::path::run(
            &cli.nodes,
            &cli.edges,
            cli.format,
            &from,
            &to,
            weight,
            max_expansions,
        ),
        Command::Facilities => commands::facilities::run(&cli.nodes, &cli.edges, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
