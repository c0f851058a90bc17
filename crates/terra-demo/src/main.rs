//! Populates a block of chunks with generated roads and rivers over noise
//! terrain, then writes a top-down PNG of the result.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p terra-demo -- --chunks 8 --seed 3 --output map.png`.

mod terrain;

use std::path::PathBuf;

use clap::Parser;
use terra_config::{CliArgs, Config, default_config_dir};
use terra_roads::debug_viz::{SurfaceRegion, render_surface_map};
use terra_roads::{
    ChunkEdgeIndex, ChunkPopulator, Equirectangular, HalfWidths, MaterialPalette, NoiseHeightField,
    NoiseHeightParams, PaletteError, PaletteNames, PopulateReport, PopulateSettings,
};
use terra_voxel::{ChunkPos, VoxelTypeRegistry, VoxelWorld};
use thiserror::Error;
use tracing::{error, info};

/// Largest chunk side the demo accepts.
const MAX_CHUNK_SIZE: u32 = 256;

/// Stone is laid from this far below the lowest surface.
const GROUND_DEPTH: i32 = 8;

#[derive(Debug, Error)]
enum DemoError {
    #[error("chunk size must be in 1..={MAX_CHUNK_SIZE}, got {0}")]
    InvalidChunkSize(u32),
    #[error("voxel type {0:?} is not registered")]
    MissingVoxel(&'static str),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("no terrain could be sampled in the requested block")]
    NoTerrain,
    #[error("failed to write {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("surface map buffer does not match its dimensions")]
    ImageBuffer,
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config.debug.log_dir.clone().unwrap_or_else(|| config_dir.join("logs"));
    terra_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(err) = run(&args, &config) {
        error!(%err, "demo failed");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs, config: &Config) -> Result<(), DemoError> {
    let chunk_size = config.world.chunk_size;
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(DemoError::InvalidChunkSize(chunk_size));
    }
    let size = chunk_size as i32;
    let chunks = args.chunks.max(1) as i32;
    let extent = chunks * size;

    let registry = VoxelTypeRegistry::with_terrain_defaults();
    let names = PaletteNames {
        empty: &config.palette.empty,
        water_source: &config.palette.water_source,
        beach: &config.palette.beach,
        asphalt: &config.palette.asphalt,
    };
    let palette = MaterialPalette::from_registry(&registry, &names)?;
    let stone = registry.lookup_by_name("stone").ok_or(DemoError::MissingVoxel("stone"))?;

    let projection = Equirectangular::new(
        config.world.origin_lon,
        config.world.origin_lat,
        config.world.meters_per_degree,
    );
    // About one hill every 256 voxels regardless of the projection scale.
    let heights = NoiseHeightField::new(NoiseHeightParams {
        seed: args.seed,
        base_frequency: config.world.meters_per_degree / 256.0,
        ..NoiseHeightParams::default()
    });

    let mut world = VoxelWorld::new(chunk_size);
    let floor = (heights.params().base_elevation - heights.max_amplitude()).floor() as i32 - GROUND_DEPTH;
    let range = terrain::build_ground(&mut world, extent, floor, &heights, &projection, stone)
        .ok_or(DemoError::NoTerrain)?;
    info!(
        chunks,
        min_height = range.min,
        max_height = range.max,
        "ground built"
    );

    let widths = HalfWidths {
        river: config.features.river_half_width,
        per_lane: config.features.lane_half_width,
    };
    let features = terrain::random_features(args.seed, extent);
    let index = ChunkEdgeIndex::from_features(size, features, &widths);
    info!(
        features = index.feature_count(),
        buckets = index.bucket_count(),
        "edge index built"
    );

    let settings = PopulateSettings {
        chunk_size: size,
        widths,
        channel_half_width: config.features.channel_half_width,
    };
    let populator = ChunkPopulator::new(&index, &heights, &projection, &palette, settings);

    let first_cy = range.min.div_euclid(size);
    let last_cy = range.max.div_euclid(size);
    let mut total = PopulateReport::default();
    for cz in 0..chunks {
        for cx in 0..chunks {
            for cy in first_cy..=last_cy {
                let report = populator.populate(ChunkPos::new(cx, cy, cz), &mut world);
                total.rivers += report.rivers;
                total.roads += report.roads;
                total.ignored += report.ignored;
                total.stats += report.stats;
            }
        }
    }
    info!(
        painted = total.stats.painted,
        cleared = total.stats.cleared,
        columns_skipped = total.stats.columns_skipped,
        samples_skipped = total.stats.samples_skipped,
        "population finished"
    );

    let region = SurfaceRegion {
        min_x: 0,
        min_z: 0,
        width: extent as u32,
        depth: extent as u32,
        y_min: floor,
        y_max: range.max + size,
    };
    let map = render_surface_map(&world, &palette, region);
    let (width, height) = map.dimensions();
    let buffer = image::RgbaImage::from_raw(width, height, map.pixels).ok_or(DemoError::ImageBuffer)?;
    buffer.save(&args.output).map_err(|source| DemoError::Image {
        path: args.output.clone(),
        source,
    })?;
    info!(path = %args.output.display(), width, height, "surface map written");

    Ok(())
}
