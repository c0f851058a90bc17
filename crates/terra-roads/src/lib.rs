//! Rasterizes roads and rivers into voxel chunks.
//!
//! Features arrive as straight segments in a flat line space. For each chunk
//! the populator bounds every feature by a capsule, walks the voxel columns it
//! covers, drapes the result over the terrain surface, and paints water, banks,
//! or asphalt through a [`terra_voxel::VoxelGrid`].

mod capsule;
mod edges;
mod envelope;
mod feature;
mod geo;
mod heightmap;
mod painter;
mod palette;
mod populate;
mod raster;

pub mod debug_viz;

pub use capsule::{CapsuleBoundary, HORIZONTAL_EPSILON, Side, band_constants, capsule_bound, is_horizontal};
pub use edges::{ChunkEdgeIndex, EdgeSource};
pub use envelope::RasterEnvelope;
pub use feature::{FeatureError, FeatureKind, HalfWidths, LinearFeature};
pub use geo::{ConstantHeight, Equirectangular, GeoCoord, HeightField, IdentityProjection, Projection, ProjectionError};
pub use heightmap::{NoiseHeightField, NoiseHeightParams};
pub use painter::SurfacePainter;
pub use palette::{MaterialPalette, MaterialRole, PaletteError, PaletteNames};
pub use populate::{ChunkPopulator, PopulateReport, PopulateSettings};
pub use raster::{RasterContext, RasterStats, rasterize};
