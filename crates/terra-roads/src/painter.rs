//! Surface painters: decide what, if anything, goes into a candidate voxel.

use terra_voxel::{VoxelGrid, VoxelPos, VoxelTypeId};

use crate::palette::{MaterialPalette, MaterialRole};

/// Painting strategy for one family of features.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfacePainter {
    /// Water within `channel_half_width` of the centerline, dirt banks beyond.
    ///
    /// Banks only go into empty voxels that do not sit on a liquid; the
    /// channel always overwrites.
    River { channel_half_width: f64 },
    /// Asphalt across the whole envelope, regardless of distance.
    Road,
}

impl SurfacePainter {
    /// River painter with the standard two-voxel channel.
    pub const RIVER: Self = Self::River {
        channel_half_width: 2.0,
    };

    /// Returns the voxel to place at `pos`, `distance` away from the
    /// centerline, or `None` to leave it untouched.
    pub fn paint<G: VoxelGrid + ?Sized>(
        &self,
        distance: f64,
        pos: VoxelPos,
        grid: &G,
        palette: &MaterialPalette,
    ) -> Option<VoxelTypeId> {
        match *self {
            SurfacePainter::River { channel_half_width } => {
                if distance > channel_half_width {
                    if !palette.is_empty(grid.get(pos)) {
                        return None;
                    }
                    if palette.is_liquid(grid.get(pos.below())) {
                        return None;
                    }
                    Some(palette.voxel(MaterialRole::Beach))
                } else {
                    Some(palette.voxel(MaterialRole::WaterSource))
                }
            }
            SurfacePainter::Road => Some(palette.voxel(MaterialRole::Asphalt)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_voxel::VoxelWorld;

    const AIR: VoxelTypeId = VoxelTypeId(0);
    const STONE: VoxelTypeId = VoxelTypeId(1);
    const WATER: VoxelTypeId = VoxelTypeId(2);
    const DIRT: VoxelTypeId = VoxelTypeId(3);
    const ASPHALT: VoxelTypeId = VoxelTypeId(4);

    fn palette() -> MaterialPalette {
        MaterialPalette::new(AIR, WATER, DIRT, ASPHALT)
    }

    #[test]
    fn test_river_channel_always_wins() {
        let mut world = VoxelWorld::new(16);
        let pos = VoxelPos::new(0, 10, 0);
        world.set_voxel(pos, STONE);
        world.set_voxel(pos.below(), WATER);

        for distance in [0.0, 1.0, 2.0] {
            assert_eq!(
                SurfacePainter::RIVER.paint(distance, pos, &world, &palette()),
                Some(WATER),
                "distance {distance}"
            );
        }
    }

    #[test]
    fn test_river_bank_on_empty_solid_ground() {
        let mut world = VoxelWorld::new(16);
        let pos = VoxelPos::new(0, 10, 0);
        world.set_voxel(pos.below(), STONE);
        assert_eq!(SurfacePainter::RIVER.paint(2.5, pos, &world, &palette()), Some(DIRT));
    }

    #[test]
    fn test_river_bank_never_overwrites() {
        let mut world = VoxelWorld::new(16);
        let pos = VoxelPos::new(0, 10, 0);
        world.set_voxel(pos, STONE);
        assert_eq!(SurfacePainter::RIVER.paint(3.0, pos, &world, &palette()), None);
    }

    #[test]
    fn test_river_bank_skips_voxels_above_water() {
        let mut world = VoxelWorld::new(16);
        let pos = VoxelPos::new(0, 10, 0);
        world.set_voxel(pos.below(), WATER);
        assert_eq!(SurfacePainter::RIVER.paint(4.0, pos, &world, &palette()), None);
    }

    #[test]
    fn test_custom_channel_width() {
        let world = VoxelWorld::new(16);
        let wide = SurfacePainter::River {
            channel_half_width: 3.5,
        };
        let pos = VoxelPos::new(0, 10, 0);
        assert_eq!(wide.paint(3.0, pos, &world, &palette()), Some(WATER));
        assert_eq!(wide.paint(3.6, pos, &world, &palette()), Some(DIRT));
    }

    #[test]
    fn test_road_ignores_distance_and_contents() {
        let mut world = VoxelWorld::new(16);
        let pos = VoxelPos::new(0, 10, 0);
        world.set_voxel(pos, WATER);
        for distance in [0.0, 2.5, 100.0] {
            assert_eq!(SurfacePainter::Road.paint(distance, pos, &world, &palette()), Some(ASPHALT));
        }
    }
}
