//! Per-chunk population: paints every river, then every road, touching a chunk.

use terra_voxel::{ChunkPos, VoxelGrid};

use crate::edges::EdgeSource;
use crate::feature::{FeatureKind, HalfWidths, LinearFeature};
use crate::geo::{HeightField, Projection};
use crate::painter::SurfacePainter;
use crate::palette::MaterialPalette;
use crate::raster::{RasterContext, RasterStats, rasterize};

/// Tunables for a population pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopulateSettings {
    /// Chunk side length in voxels.
    pub chunk_size: i32,
    pub widths: HalfWidths,
    /// Distance from a river's centerline within which it is water.
    pub channel_half_width: f64,
}

impl Default for PopulateSettings {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            widths: HalfWidths::default(),
            channel_half_width: 2.0,
        }
    }
}

/// What a single [`ChunkPopulator::populate`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub rivers: u32,
    pub roads: u32,
    /// Features of kinds that are never painted.
    pub ignored: u32,
    pub stats: RasterStats,
}

/// Paints linear features onto chunks.
///
/// Holds only shared references, so one populator can serve any number of
/// chunks in any order. Each call writes only the surfaces inside its own
/// vertical slice.
pub struct ChunkPopulator<'a> {
    edges: &'a dyn EdgeSource,
    context: RasterContext<'a>,
    widths: HalfWidths,
    river: SurfacePainter,
}

impl<'a> ChunkPopulator<'a> {
    pub fn new(
        edges: &'a dyn EdgeSource,
        height_field: &'a dyn HeightField,
        projection: &'a dyn Projection,
        palette: &'a MaterialPalette,
        settings: PopulateSettings,
    ) -> Self {
        Self {
            edges,
            context: RasterContext {
                height_field,
                projection,
                palette,
                chunk_size: settings.chunk_size,
            },
            widths: settings.widths,
            river: SurfacePainter::River {
                channel_half_width: settings.channel_half_width,
            },
        }
    }

    /// Paints every feature the edge source reports for `chunk` into `grid`.
    ///
    /// Rivers go first so that roads crossing them pave over both the banks
    /// and the channel.
    pub fn populate<G: VoxelGrid + ?Sized>(&self, chunk: ChunkPos, grid: &mut G) -> PopulateReport {
        let mut report = PopulateReport::default();

        let Some(features) = self.edges.features_in_chunk(chunk.x, chunk.z) else {
            return report;
        };

        for feature in features.iter().filter(|f| f.kind == FeatureKind::River) {
            report.stats += self.paint(feature, chunk, grid, self.river);
            report.rivers += 1;
        }

        for feature in features.iter().filter(|f| f.kind.is_paved_road()) {
            report.stats += self.paint(feature, chunk, grid, SurfacePainter::Road);
            report.roads += 1;
        }

        let total = u32::try_from(features.len()).unwrap_or(u32::MAX);
        report.ignored = total.saturating_sub(report.rivers + report.roads);

        if report.stats.painted > 0 {
            tracing::debug!(
                cx = chunk.x,
                cy = chunk.y,
                cz = chunk.z,
                rivers = report.rivers,
                roads = report.roads,
                painted = report.stats.painted,
                cleared = report.stats.cleared,
                "chunk populated"
            );
        }
        report
    }

    fn paint<G: VoxelGrid + ?Sized>(
        &self,
        feature: &LinearFeature,
        chunk: ChunkPos,
        grid: &mut G,
        painter: SurfacePainter,
    ) -> RasterStats {
        match self.widths.for_feature(feature) {
            Some(half_width) => rasterize(&self.context, feature, half_width, chunk, grid, painter),
            None => RasterStats::default(),
        }
    }
}
