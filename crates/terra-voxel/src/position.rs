//! Integer voxel and chunk coordinates.
//!
//! Voxel coordinates are absolute world positions. Chunk coordinates index the
//! chunk grid; the chunk side length is supplied by the caller so the same
//! types work for any chunk size.

use serde::{Deserialize, Serialize};

/// Absolute position of a single voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    /// Creates a new voxel position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The voxel directly underneath.
    pub fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The voxel directly above.
    pub fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// Returns this position shifted by `(dx, dy, dz)`.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Returns the same column at a different height.
    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }
}

/// Position of a chunk in the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkPos {
    /// Creates a new chunk position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the chunk that contains `pos` for chunks of side `chunk_size`.
    ///
    /// Uses floored division so negative coordinates map to negative chunks.
    pub fn containing(pos: VoxelPos, chunk_size: i32) -> Self {
        Self {
            x: pos.x.div_euclid(chunk_size),
            y: pos.y.div_euclid(chunk_size),
            z: pos.z.div_euclid(chunk_size),
        }
    }

    /// Returns the absolute position of this chunk's minimum corner, or
    /// `None` if it does not fit in `i32` coordinates.
    pub fn origin(self, chunk_size: i32) -> Option<VoxelPos> {
        Some(VoxelPos {
            x: self.x.checked_mul(chunk_size)?,
            y: self.y.checked_mul(chunk_size)?,
            z: self.z.checked_mul(chunk_size)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_handles_negative_coordinates() {
        assert_eq!(
            ChunkPos::containing(VoxelPos::new(-1, 0, 15), 16),
            ChunkPos::new(-1, 0, 0)
        );
        assert_eq!(
            ChunkPos::containing(VoxelPos::new(-16, -17, 16), 16),
            ChunkPos::new(-1, -2, 1)
        );
    }

    #[test]
    fn test_origin_is_inverse_of_containing() {
        let chunk = ChunkPos::new(-3, 4, 7);
        let origin = chunk.origin(16).unwrap();
        assert_eq!(origin, VoxelPos::new(-48, 64, 112));
        assert_eq!(ChunkPos::containing(origin, 16), chunk);
        assert_eq!(ChunkPos::containing(origin.offset(15, 15, 15), 16), chunk);
    }

    #[test]
    fn test_origin_out_of_range_is_none() {
        assert_eq!(ChunkPos::new(i32::MAX / 8, 0, 0).origin(16), None);
        assert_eq!(ChunkPos::new(0, i32::MIN, 0).origin(2), None);
        assert!(ChunkPos::new(-(1 << 26), 0, 1 << 26).origin(16).is_some());
    }

    #[test]
    fn test_vertical_neighbours() {
        let pos = VoxelPos::new(1, 64, -2);
        assert_eq!(pos.below(), VoxelPos::new(1, 63, -2));
        assert_eq!(pos.above(), VoxelPos::new(1, 65, -2));
        assert_eq!(pos.with_y(10), VoxelPos::new(1, 10, -2));
    }
}
