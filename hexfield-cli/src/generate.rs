//! Generate command - lay out map files for the engine to consume

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexfield_core::{GridMetrics, MapFile, TerrainProfile};

#[derive(Args)]
pub struct GenerateArgs {
    /// Columns in the generated field
    #[arg(long, default_value = "8")]
    pub width: usize,

    /// Rows in the generated field
    #[arg(long, default_value = "8")]
    pub height: usize,

    /// RNG seed for the terrain scatter
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Skip the terrain scatter and emit an all-open field
    #[arg(long)]
    pub flat: bool,

    /// Fraction of cells rolled as impassable
    #[arg(long, default_value = "0.06")]
    pub impassable: f32,

    /// Fraction of cells rolled as sight blockers
    #[arg(long, default_value = "0.05")]
    pub blockers: f32,

    /// Output map JSON file
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let metrics = GridMetrics::default();

    let map = if args.flat {
        MapFile::rectangle(args.width, args.height, metrics)
    } else {
        let profile = TerrainProfile {
            impassable: args.impassable,
            blockers: args.blockers,
            ..TerrainProfile::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        MapFile::random(&mut rng, args.width, args.height, metrics, &profile)
    };

    // Build the grid once to validate the layout before writing
    let grid = map.clone().into_grid()?;
    tracing::info!(
        cells = grid.len(),
        width = args.width,
        height = args.height,
        "map generated"
    );

    map.save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {} ({} cells)", args.output.display(), grid.len());
    Ok(())
}
