//! The [`VoxelGrid`] access trait and [`VoxelWorld`], a sparse in-memory grid.
//!
//! [`VoxelWorld`] keeps one dense voxel array per touched chunk in an
//! [`FxHashMap`](rustc_hash::FxHashMap). Chunks that were never written read
//! back as air, so callers can treat the world as infinite.

use rustc_hash::FxHashMap;

use crate::position::{ChunkPos, VoxelPos};
use crate::registry::VoxelTypeId;

/// Read/write access to voxels by absolute position.
///
/// Implementations decide storage and chunk lifecycle. Writes to the same
/// chunk must be serialized by the implementation's owner.
pub trait VoxelGrid {
    /// Returns the voxel at `pos`.
    fn get(&self, pos: VoxelPos) -> VoxelTypeId;

    /// Replaces the voxel at `pos`.
    fn set(&mut self, pos: VoxelPos, voxel: VoxelTypeId);
}

/// Dense storage for one chunk, indexed `(y * size + z) * size + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ChunkVoxels {
    voxels: Box<[VoxelTypeId]>,
}

impl ChunkVoxels {
    fn new_air(chunk_size: usize) -> Self {
        Self {
            voxels: vec![VoxelTypeId::AIR; chunk_size * chunk_size * chunk_size].into_boxed_slice(),
        }
    }
}

/// A sparse voxel world made of lazily allocated cubic chunks.
///
/// Two worlds compare equal when they hold the same voxels; the
/// modification counter is not part of equality.
#[derive(Clone, Debug)]
pub struct VoxelWorld {
    chunk_size: i32,
    chunks: FxHashMap<ChunkPos, ChunkVoxels>,
    /// Number of writes that changed a voxel.
    modifications: u64,
}

impl PartialEq for VoxelWorld {
    fn eq(&self, other: &Self) -> bool {
        self.chunk_size == other.chunk_size && self.chunks == other.chunks
    }
}

impl Eq for VoxelWorld {}

impl VoxelWorld {
    /// Creates an empty world whose chunks have side `chunk_size`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero or does not fit in an `i32`.
    pub fn new(chunk_size: u32) -> Self {
        let chunk_size = match i32::try_from(chunk_size) {
            Ok(size) if size > 0 => size,
            _ => panic!("chunk size must be in 1..=i32::MAX, got {chunk_size}"),
        };
        Self {
            chunk_size,
            chunks: FxHashMap::default(),
            modifications: 0,
        }
    }

    /// Side length of each chunk in voxels.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of chunks that have been allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if the chunk at `chunk` holds storage.
    pub fn contains_chunk(&self, chunk: ChunkPos) -> bool {
        self.chunks.contains_key(&chunk)
    }

    /// Number of writes so far that actually changed a voxel.
    pub fn modification_count(&self) -> u64 {
        self.modifications
    }

    /// Fills the inclusive box `[min, max]` with `voxel`.
    pub fn fill_box(&mut self, min: VoxelPos, max: VoxelPos, voxel: VoxelTypeId) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set_voxel(VoxelPos::new(x, y, z), voxel);
                }
            }
        }
    }

    /// Returns the highest non-air voxel in the column at `(x, z)` within
    /// `[y_min, y_max]`, scanning downward.
    pub fn top_voxel(&self, x: i32, z: i32, y_min: i32, y_max: i32) -> Option<(i32, VoxelTypeId)> {
        (y_min..=y_max)
            .rev()
            .map(|y| (y, self.get_voxel(VoxelPos::new(x, y, z))))
            .find(|&(_, voxel)| voxel != VoxelTypeId::AIR)
    }

    /// Returns the voxel at `pos`, air if its chunk was never written.
    pub fn get_voxel(&self, pos: VoxelPos) -> VoxelTypeId {
        let (chunk, index) = self.locate(pos);
        self.chunks
            .get(&chunk)
            .map_or(VoxelTypeId::AIR, |voxels| voxels.voxels[index])
    }

    /// Writes `voxel` at `pos`, allocating the chunk on first non-air write.
    pub fn set_voxel(&mut self, pos: VoxelPos, voxel: VoxelTypeId) {
        let (chunk, index) = self.locate(pos);
        let size = self.chunk_size as usize;

        let voxels = match self.chunks.get_mut(&chunk) {
            Some(voxels) => voxels,
            // Writing air into an unallocated chunk changes nothing.
            None if voxel == VoxelTypeId::AIR => return,
            None => {
                tracing::trace!(?chunk, "allocating chunk");
                self.chunks.entry(chunk).or_insert_with(|| ChunkVoxels::new_air(size))
            }
        };

        if voxels.voxels[index] != voxel {
            voxels.voxels[index] = voxel;
            self.modifications += 1;
        }
    }

    fn locate(&self, pos: VoxelPos) -> (ChunkPos, usize) {
        let size = self.chunk_size;
        let chunk = ChunkPos::containing(pos, size);
        let lx = pos.x.rem_euclid(size) as usize;
        let ly = pos.y.rem_euclid(size) as usize;
        let lz = pos.z.rem_euclid(size) as usize;
        let size = size as usize;
        (chunk, (ly * size + lz) * size + lx)
    }
}

impl VoxelGrid for VoxelWorld {
    fn get(&self, pos: VoxelPos) -> VoxelTypeId {
        self.get_voxel(pos)
    }

    fn set(&mut self, pos: VoxelPos, voxel: VoxelTypeId) {
        self.set_voxel(pos, voxel);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
