//! Column rasterizer: paints one feature into one chunk.
//!
//! For every x column of the feature's envelope and every z row in that
//! column's span, the rasterizer finds the centerline point, looks up the
//! terrain surface there, asks the painter for a voxel, and clears the solid
//! voxels stacked on top of what it painted.

use std::ops::AddAssign;

use glam::DVec2;
use terra_voxel::{ChunkPos, VoxelGrid, VoxelPos};

use crate::envelope::RasterEnvelope;
use crate::feature::LinearFeature;
use crate::geo::{HeightField, Projection};
use crate::painter::SurfacePainter;
use crate::palette::MaterialPalette;

/// Collaborators and constants shared by every rasterization in a pass.
#[derive(Clone, Copy)]
pub struct RasterContext<'a> {
    pub height_field: &'a dyn HeightField,
    pub projection: &'a dyn Projection,
    pub palette: &'a MaterialPalette,
    /// Chunk side length in voxels.
    pub chunk_size: i32,
}

/// Counters collected while rasterizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Columns dropped because their boundary evaluated to NaN.
    pub columns_skipped: u32,
    /// Rows dropped because the projection or height field had no answer.
    pub samples_skipped: u32,
    /// Surface voxels written by the painter.
    pub painted: u32,
    /// Voxels above a painted surface reset to empty.
    pub cleared: u32,
}

impl AddAssign for RasterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.columns_skipped += rhs.columns_skipped;
        self.samples_skipped += rhs.samples_skipped;
        self.painted += rhs.painted;
        self.cleared += rhs.cleared;
    }
}

/// Paints `feature` with half-width `half_width` into `chunk`.
///
/// Only rows whose surface falls inside the chunk's own vertical slice are
/// written; other slices belong to the invocations for the chunks above and
/// below. Horizontally the end caps and the z span may reach into
/// neighbouring chunks by up to one chunk.
///
/// Never fails: an invalid half-width or a chunk whose origin does not fit
/// in voxel coordinates skips the feature, and missing
/// projection or height data skips the affected row.
pub fn rasterize<G: VoxelGrid + ?Sized>(
    ctx: &RasterContext<'_>,
    feature: &LinearFeature,
    half_width: f64,
    chunk: ChunkPos,
    grid: &mut G,
    painter: SurfacePainter,
) -> RasterStats {
    let mut stats = RasterStats::default();
    let size = ctx.chunk_size;

    let Some(envelope) = RasterEnvelope::new(feature, half_width, chunk, size) else {
        tracing::warn!(kind = ?feature.kind, half_width, "skipping feature with invalid geometry");
        return stats;
    };

    let Some(origin) = chunk.origin(size) else {
        tracing::warn!(?chunk, "skipping chunk outside the addressable world");
        return stats;
    };

    for x in envelope.columns() {
        let Some(rows) = envelope.column_span(x) else {
            tracing::trace!(x, "no feature in column");
            stats.columns_skipped += 1;
            continue;
        };

        for z in rows {
            let main = envelope.centerline_point(x, z);
            let distance = main.distance(DVec2::new(f64::from(x), f64::from(z)));

            let Some(y) = local_surface_y(ctx, envelope.to_absolute(main), origin.y) else {
                stats.samples_skipped += 1;
                continue;
            };
            if !(0.0..f64::from(size)).contains(&y) {
                continue;
            }
            let y = y as i32;

            let pos = VoxelPos::new(origin.x + x, origin.y + y, origin.z + z);
            let Some(voxel) = painter.paint(distance, pos, &*grid, ctx.palette) else {
                continue;
            };

            grid.set(pos, voxel);
            stats.painted += 1;
            stats.cleared += clear_overburden(grid, ctx.palette, pos, y, size);
        }
    }

    stats
}

/// Chunk-relative surface height under the absolute line-space `point`.
fn local_surface_y(ctx: &RasterContext<'_>, point: DVec2, origin_y: i32) -> Option<f64> {
    let geo = match ctx.projection.to_geographic(point.x, point.y) {
        Ok(geo) => geo,
        Err(err) => {
            tracing::trace!(%err, "projection failed");
            return None;
        }
    };
    let Some(elevation) = ctx.height_field.estimate(geo.lon, geo.lat).filter(|h| h.is_finite()) else {
        tracing::trace!(lon = geo.lon, lat = geo.lat, "no elevation estimate");
        return None;
    };
    Some(elevation.floor() - f64::from(origin_y))
}

/// Empties the voxels above `surface`, from local height `y + 1` up to but
/// not including `2 * size`, stopping at the first voxel that is already
/// the palette's empty voxel. Returns how many voxels were cleared.
fn clear_overburden<G: VoxelGrid + ?Sized>(
    grid: &mut G,
    palette: &MaterialPalette,
    surface: VoxelPos,
    y: i32,
    size: i32,
) -> u32 {
    let empty = palette.empty();
    let mut cleared = 0;
    for ay in (y + 1)..(2 * size) {
        let pos = surface.with_y(surface.y - y + ay);
        if grid.get(pos) == empty {
            break;
        }
        grid.set(pos, empty);
        cleared += 1;
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureKind;
    use crate::geo::{ConstantHeight, IdentityProjection};
    use terra_voxel::{VoxelTypeId, VoxelWorld};

    const AIR: VoxelTypeId = VoxelTypeId(0);
    const STONE: VoxelTypeId = VoxelTypeId(1);
    const WATER: VoxelTypeId = VoxelTypeId(2);
    const DIRT: VoxelTypeId = VoxelTypeId(3);
    const ASPHALT: VoxelTypeId = VoxelTypeId(4);

    fn palette() -> MaterialPalette {
        MaterialPalette::new(AIR, WATER, DIRT, ASPHALT)
    }

    fn road(start_x: f64, end_x: f64, slope: f64, offset: f64, lanes: f64) -> LinearFeature {
        LinearFeature::new(FeatureKind::MajorRoad, start_x, end_x, slope, offset, lanes)
    }

    #[test]
    fn test_surface_outside_vertical_slice_is_left_alone() {
        let palette = palette();
        let heights = ConstantHeight(64.0);
        let ctx = RasterContext {
            height_field: &heights,
            projection: &IdentityProjection,
            palette: &palette,
            chunk_size: 16,
        };
        let mut world = VoxelWorld::new(16);
        let feature = road(0.0, 16.0, 0.0, 8.0, 2.0);

        // Elevation 64 lives in vertical chunk 4 (64..80), not chunk 0 or 5.
        for cy in [0, 3, 5] {
            let stats = rasterize(&ctx, &feature, 3.0, ChunkPos::new(0, cy, 0), &mut world, SurfacePainter::Road);
            assert_eq!(stats.painted, 0, "chunk y={cy} painted");
        }
        assert_eq!(world.chunk_count(), 0);

        let stats = rasterize(&ctx, &feature, 3.0, ChunkPos::new(0, 4, 0), &mut world, SurfacePainter::Road);
        assert!(stats.painted > 0);
        assert_eq!(world.get(VoxelPos::new(8, 64, 8)), ASPHALT);
    }

    #[test]
    fn test_overburden_cleared_up_to_first_empty() {
        let palette = palette();
        let heights = ConstantHeight(64.0);
        let ctx = RasterContext {
            height_field: &heights,
            projection: &IdentityProjection,
            palette: &palette,
            chunk_size: 16,
        };
        let mut world = VoxelWorld::new(16);
        // A pillar on the road, with a floating block above a gap.
        world.fill_box(VoxelPos::new(4, 64, 8), VoxelPos::new(4, 70, 8), STONE);
        world.set_voxel(VoxelPos::new(4, 73, 8), STONE);

        let feature = road(0.0, 16.0, 0.0, 8.0, 1.0);
        let stats = rasterize(&ctx, &feature, 1.5, ChunkPos::new(0, 4, 0), &mut world, SurfacePainter::Road);

        assert_eq!(world.get(VoxelPos::new(4, 64, 8)), ASPHALT);
        for y in 65..=70 {
            assert_eq!(world.get(VoxelPos::new(4, y, 8)), AIR, "y={y} not cleared");
        }
        assert_eq!(world.get(VoxelPos::new(4, 73, 8)), STONE, "clearing must stop at the gap");
        assert_eq!(stats.cleared, 6);
    }

    #[test]
    fn test_overburden_ceiling_is_two_chunks_above_origin() {
        let palette = palette();
        let heights = ConstantHeight(70.0);
        let ctx = RasterContext {
            height_field: &heights,
            projection: &IdentityProjection,
            palette: &palette,
            chunk_size: 16,
        };
        let mut world = VoxelWorld::new(16);
        world.fill_box(VoxelPos::new(8, 70, 8), VoxelPos::new(8, 120, 8), STONE);

        let feature = road(0.0, 16.0, 0.0, 8.0, 1.0);
        rasterize(&ctx, &feature, 1.5, ChunkPos::new(0, 4, 0), &mut world, SurfacePainter::Road);

        // Local ceiling 2 * 16 = 32 from the chunk origin at y=64: clears 71..=95.
        assert_eq!(world.get(VoxelPos::new(8, 70, 8)), ASPHALT);
        assert_eq!(world.get(VoxelPos::new(8, 95, 8)), AIR);
        assert_eq!(world.get(VoxelPos::new(8, 96, 8)), STONE);
    }

    #[test]
    fn test_missing_height_skips_rows_without_aborting() {
        let palette = palette();
        // No data west of x = 8.
        let heights = |lon: f64, _lat: f64| (lon >= 8.0).then_some(64.0);
        let ctx = RasterContext {
            height_field: &heights,
            projection: &IdentityProjection,
            palette: &palette,
            chunk_size: 16,
        };
        let mut world = VoxelWorld::new(16);
        let feature = road(0.0, 16.0, 0.0, 8.0, 1.0);
        let stats = rasterize(&ctx, &feature, 1.5, ChunkPos::new(0, 4, 0), &mut world, SurfacePainter::Road);

        assert!(stats.samples_skipped > 0);
        assert_eq!(world.get(VoxelPos::new(3, 64, 8)), AIR);
        assert_eq!(world.get(VoxelPos::new(12, 64, 8)), ASPHALT);
    }

    #[test]
    fn test_invalid_half_width_paints_nothing() {
        let palette = palette();
        let heights = ConstantHeight(64.0);
        let ctx = RasterContext {
            height_field: &heights,
            projection: &IdentityProjection,
            palette: &palette,
            chunk_size: 16,
        };
        let mut world = VoxelWorld::new(16);
        let feature = road(0.0, 16.0, 0.0, 8.0, 0.0);
        let stats = rasterize(&ctx, &feature, 0.0, ChunkPos::new(0, 4, 0), &mut world, SurfacePainter::Road);
        assert_eq!(stats, RasterStats::default());
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_chunk_beyond_coordinate_range_is_skipped() {
        let palette = palette();
        let heights = ConstantHeight(64.0);
        let ctx = RasterContext {
            height_field: &heights,
            projection: &IdentityProjection,
            palette: &palette,
            chunk_size: 16,
        };
        let mut world = VoxelWorld::new(16);
        let feature = road(0.0, 16.0, 0.0, 8.0, 1.0);
        let far = ChunkPos::new(i32::MAX / 4, 4, i32::MIN / 4);
        let stats = rasterize(&ctx, &feature, 1.5, far, &mut world, SurfacePainter::Road);
        assert_eq!(stats, RasterStats::default());
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut total = RasterStats::default();
        total += RasterStats {
            columns_skipped: 1,
            samples_skipped: 2,
            painted: 3,
            cleared: 4,
        };
        total += RasterStats {
            columns_skipped: 1,
            samples_skipped: 0,
            painted: 10,
            cleared: 0,
        };
        assert_eq!(
            total,
            RasterStats {
                columns_skipped: 2,
                samples_skipped: 2,
                painted: 13,
                cleared: 4,
            }
        );
    }
}
