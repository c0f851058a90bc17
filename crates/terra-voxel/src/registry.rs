//! Voxel type registry: maps compact [`VoxelTypeId`] values to [`VoxelTypeDef`] metadata.
//!
//! The registry is built once at startup. Air is always ID 0 so that a freshly
//! allocated chunk represents empty space.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact identifier stored in every voxel cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelTypeId(pub u16);

impl VoxelTypeId {
    /// The air voxel, always registered first.
    pub const AIR: Self = Self(0);
}

/// Descriptor for a voxel type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoxelTypeDef {
    /// Unique name, e.g. "stone", "water", "gray_concrete".
    pub name: String,
    /// Whether this voxel is a fluid. River banks are never placed on top of liquids.
    pub liquid: bool,
}

impl VoxelTypeDef {
    /// A non-liquid voxel type.
    pub fn solid(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            liquid: false,
        }
    }

    pub fn liquid(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            liquid: true,
        }
    }
}

/// Errors that can occur during voxel type registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A type with the same name has already been registered.
    #[error("duplicate voxel type name: {0}")]
    DuplicateName(String),
    /// Every `u16` slot has been consumed.
    #[error("voxel type registry is full (max 65536 types)")]
    RegistryFull,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`VoxelTypeId`] → [`VoxelTypeDef`] with O(1) lookup in both directions.
#[derive(Clone, Debug)]
pub struct VoxelTypeRegistry {
    /// Dense array where `index == VoxelTypeId.0`.
    types: Vec<VoxelTypeDef>,
    name_to_id: HashMap<String, VoxelTypeId>,
}

impl VoxelTypeRegistry {
    /// Creates a new registry with Air pre-registered as ID 0.
    pub fn new() -> Self {
        let air = VoxelTypeDef::solid("air");

        let mut name_to_id = HashMap::new();
        name_to_id.insert("air".to_string(), VoxelTypeId::AIR);

        Self {
            types: vec![air],
            name_to_id,
        }
    }

    /// Creates a registry holding the voxel types terrain decoration needs:
    /// stone, dirt, grass, sand, water and gray concrete.
    pub fn with_terrain_defaults() -> Self {
        let mut registry = Self::new();
        for def in [
            VoxelTypeDef::solid("stone"),
            VoxelTypeDef::solid("dirt"),
            VoxelTypeDef::solid("grass"),
            VoxelTypeDef::solid("sand"),
            VoxelTypeDef::liquid("water"),
            VoxelTypeDef::solid("gray_concrete"),
        ] {
            if let Err(err) = registry.register(def) {
                tracing::warn!(%err, "skipping default voxel type");
            }
        }
        registry
    }

    /// Registers a new voxel type and returns its assigned ID.
    ///
    /// IDs are assigned sequentially starting from 1 (0 is Air).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken, or
    /// [`RegistryError::RegistryFull`] once every slot is used.
    pub fn register(&mut self, def: VoxelTypeDef) -> Result<VoxelTypeId, RegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if self.types.len() > u16::MAX as usize {
            return Err(RegistryError::RegistryFull);
        }

        let id = VoxelTypeId(self.types.len() as u16);
        self.name_to_id.insert(def.name.clone(), id);
        self.types.push(def);
        Ok(id)
    }

    /// Returns the definition for a given ID, or `None` for unknown IDs.
    pub fn get(&self, id: VoxelTypeId) -> Option<&VoxelTypeDef> {
        self.types.get(id.0 as usize)
    }

    /// Returns the ID for a named voxel type.
    pub fn lookup_by_name(&self, name: &str) -> Option<VoxelTypeId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the total number of registered types (including Air).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if only Air is registered.
    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }

    /// Returns `true` if the given voxel type is registered as a liquid.
    ///
    /// Unknown IDs are not liquid.
    pub fn is_liquid(&self, id: VoxelTypeId) -> bool {
        self.get(id).is_some_and(|def| def.liquid)
    }

    /// Iterates over the IDs of all liquid voxel types.
    pub fn liquid_ids(&self) -> impl Iterator<Item = VoxelTypeId> + '_ {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, def)| def.liquid)
            .map(|(index, _)| VoxelTypeId(index as u16))
    }
}

impl Default for VoxelTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
