//! Voxel identifiers, the voxel type registry, world positions, and the
//! [`VoxelGrid`] seam that terrain decorators write through.

pub mod position;
pub mod registry;
pub mod world;

pub use position::{ChunkPos, VoxelPos};
pub use registry::{RegistryError, VoxelTypeDef, VoxelTypeId, VoxelTypeRegistry};
pub use world::{VoxelGrid, VoxelWorld};
