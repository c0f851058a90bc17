//! Command-line flags for the terra demo.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Populates a block of chunks with roads and rivers and writes a map.
///
/// Flags override values loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "terra", about = "Road and river rasterizer demo")]
pub struct CliArgs {
    /// Config directory (defaults to the platform config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace) or a filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Chunk side length in voxels.
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// River half-width in voxels.
    #[arg(long)]
    pub river_half_width: Option<f64>,

    /// Road half-width per lane in voxels.
    #[arg(long)]
    pub lane_half_width: Option<f64>,

    /// Side of the square block of chunk columns to populate.
    #[arg(long, default_value_t = 4)]
    pub chunks: u32,

    /// Where to write the PNG surface map.
    #[arg(long, default_value = "terra-map.png")]
    pub output: PathBuf,

    /// Seed for terrain noise and feature layout.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl Default for CliArgs {
    /// Matches what clap produces for an empty command line.
    fn default() -> Self {
        Self {
            config: None,
            log_level: None,
            chunk_size: None,
            river_half_width: None,
            lane_half_width: None,
            chunks: 4,
            output: PathBuf::from("terra-map.png"),
            seed: 0,
        }
    }
}

impl Config {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(size) = args.chunk_size {
            self.world.chunk_size = size;
        }
        if let Some(r) = args.river_half_width {
            self.features.river_half_width = r;
        }
        if let Some(r) = args.lane_half_width {
            self.features.lane_half_width = r;
        }
    }
}
