//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use worldsmith_terrain::PlanetKind;

use crate::Config;

/// Worldsmith command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "worldsmith", about = "Procedural terrain chunk builder")]
pub struct CliArgs {
    /// Planet generator family (terran, lunar, ocean, simple).
    #[arg(long)]
    pub kind: Option<PlanetKind>,

    /// World seed.
    #[arg(long)]
    pub seed: Option<String>,

    /// Planet radius in meters.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Grid cells per chunk edge.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Chunk edge length in meters.
    #[arg(long)]
    pub width: Option<f64>,

    /// Displace inward instead of outward.
    #[arg(long)]
    pub inverted: Option<bool>,

    /// Worker thread count (0 = auto).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(kind) = args.kind {
            self.planet.kind = kind;
        }
        if let Some(ref seed) = args.seed {
            self.planet.seed = seed.clone();
        }
        if let Some(radius) = args.radius {
            self.planet.radius_m = radius;
        }
        if let Some(resolution) = args.resolution {
            self.chunk.resolution = resolution;
        }
        if let Some(width) = args.width {
            self.chunk.width_m = width;
        }
        if let Some(inverted) = args.inverted {
            self.chunk.inverted = inverted;
        }
        if let Some(workers) = args.workers {
            self.pipeline.workers = workers;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
