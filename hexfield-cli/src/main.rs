//! HEXFIELD CLI - generate and query hex map files
//!
//! Commands:
//! - generate: write a map JSON (flat field or random terrain scatter)
//! - info: print the cell table of a map
//! - path: shortest movement path between two cells
//! - reach: cells reachable within a movement budget
//! - los: line-of-sight check between two cells
//! - attack: attackable cells from a source cell

mod generate;
mod query;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hexfield")]
#[command(about = "Hex-grid tactical engine toolbox")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map file
    Generate(generate::GenerateArgs),
    /// Print the cell table of a map
    Info(query::InfoArgs),
    /// Shortest movement path between two cells
    Path(query::PathArgs),
    /// Cells reachable within a movement budget
    Reach(query::ReachArgs),
    /// Line-of-sight check between two cells
    Los(query::LosArgs),
    /// Attackable cells from a source cell
    Attack(query::AttackArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::Info(args) => query::info(args),
        Commands::Path(args) => query::path(args),
        Commands::Reach(args) => query::reach(args),
        Commands::Los(args) => query::los(args),
        Commands::Attack(args) => query::attack(args),
    }
}
