//! Top-down debug maps of painted surfaces.
//!
//! [`render_surface_map`] looks down each column of a [`VoxelWorld`] and
//! colours the topmost voxel by the role it plays in the palette, so rivers,
//! banks, and roads stand out from untouched terrain.

mod image;

pub use self::image::DebugImage;

use terra_voxel::{VoxelTypeId, VoxelWorld};

use crate::palette::{MaterialPalette, MaterialRole};

/// The block of columns a surface map covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceRegion {
    pub min_x: i32,
    pub min_z: i32,
    pub width: u32,
    pub depth: u32,
    /// Lowest voxel height searched.
    pub y_min: i32,
    /// Highest voxel height searched.
    pub y_max: i32,
}

/// Colour for a voxel playing `role`.
pub fn role_color(role: MaterialRole) -> [u8; 4] {
    match role {
        MaterialRole::Empty => [0, 0, 0, 255],
        MaterialRole::WaterSource => [40, 90, 200, 255],
        MaterialRole::Beach => [194, 160, 110, 255],
        MaterialRole::Asphalt => [60, 60, 64, 255],
    }
}

/// Grey ramp for terrain that no feature touched, brighter when higher.
fn terrain_color(y: i32, region: &SurfaceRegion) -> [u8; 4] {
    let span = (region.y_max - region.y_min).max(1) as f64;
    let t = (f64::from(y - region.y_min) / span).clamp(0.0, 1.0);
    let g = (90.0 + t * 130.0) as u8;
    [g / 2, g, g / 2, 255]
}

/// Renders the topmost voxel of every column in `region`, one pixel each.
///
/// Pixel `(px, py)` is the column at `(min_x + px, min_z + py)`. Columns with
/// nothing in `[y_min, y_max]` stay transparent.
pub fn render_surface_map(world: &VoxelWorld, palette: &MaterialPalette, region: SurfaceRegion) -> DebugImage {
    let mut image = DebugImage::new(region.width, region.depth);

    for py in 0..region.depth {
        for px in 0..region.width {
            let x = region.min_x + px as i32;
            let z = region.min_z + py as i32;
            let Some((y, voxel)) = world.top_voxel(x, z, region.y_min, region.y_max) else {
                continue;
            };
            image.set_pixel(px, py, surface_color(voxel, y, palette, &region));
        }
    }

    image
}

fn surface_color(voxel: VoxelTypeId, y: i32, palette: &MaterialPalette, region: &SurfaceRegion) -> [u8; 4] {
    match palette.role_of(voxel) {
        Some(role) => role_color(role),
        None => terrain_color(y, region),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_voxel::VoxelPos;

    const AIR: VoxelTypeId = VoxelTypeId(0);
    const STONE: VoxelTypeId = VoxelTypeId(1);
    const WATER: VoxelTypeId = VoxelTypeId(2);
    const DIRT: VoxelTypeId = VoxelTypeId(3);
    const ASPHALT: VoxelTypeId = VoxelTypeId(4);

    fn region() -> SurfaceRegion {
        SurfaceRegion {
            min_x: 0,
            min_z: 0,
            width: 4,
            depth: 2,
            y_min: 0,
            y_max: 32,
        }
    }

    #[test]
    fn test_roles_get_their_colours() {
        let palette = MaterialPalette::new(AIR, WATER, DIRT, ASPHALT);
        let mut world = VoxelWorld::new(16);
        world.fill_box(VoxelPos::new(0, 0, 0), VoxelPos::new(3, 9, 1), STONE);
        world.set_voxel(VoxelPos::new(0, 10, 0), WATER);
        world.set_voxel(VoxelPos::new(1, 10, 0), DIRT);
        world.set_voxel(VoxelPos::new(2, 10, 0), ASPHALT);

        let image = render_surface_map(&world, &palette, region());
        assert_eq!(image.get_pixel(0, 0), role_color(MaterialRole::WaterSource));
        assert_eq!(image.get_pixel(1, 0), role_color(MaterialRole::Beach));
        assert_eq!(image.get_pixel(2, 0), role_color(MaterialRole::Asphalt));
        assert_eq!(image.get_pixel(3, 0), image.get_pixel(3, 1), "same stone height, same grey");
        assert_eq!(image.unique_color_count(), 4);
    }

    #[test]
    fn test_empty_columns_stay_transparent() {
        let palette = MaterialPalette::new(AIR, WATER, DIRT, ASPHALT);
        let world = VoxelWorld::new(16);
        let image = render_surface_map(&world, &palette, region());
        assert!(image.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_higher_terrain_is_brighter() {
        let r = region();
        assert!(terrain_color(30, &r)[1] > terrain_color(2, &r)[1]);
    }
}
