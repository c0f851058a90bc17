//! Semantic materials used by the painters, resolved to voxel IDs at startup.

use rustc_hash::FxHashSet;
use terra_voxel::{VoxelTypeId, VoxelTypeRegistry};
use thiserror::Error;

/// The semantic materials a painter can place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialRole {
    /// Nothing; also the value written when clearing overburden.
    Empty,
    /// River channel water.
    WaterSource,
    /// River bank.
    Beach,
    /// Road surface.
    Asphalt,
}

impl MaterialRole {
    pub const ALL: [MaterialRole; 4] = [
        MaterialRole::Empty,
        MaterialRole::WaterSource,
        MaterialRole::Beach,
        MaterialRole::Asphalt,
    ];
}

/// Voxel type names for each [`MaterialRole`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteNames<'a> {
    pub empty: &'a str,
    pub water_source: &'a str,
    pub beach: &'a str,
    pub asphalt: &'a str,
}

impl Default for PaletteNames<'static> {
    fn default() -> Self {
        Self {
            empty: "air",
            water_source: "water",
            beach: "dirt",
            asphalt: "gray_concrete",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// The registry has no voxel type with the configured name.
    #[error("no voxel type named {name:?} for {role:?}")]
    UnknownVoxel { role: MaterialRole, name: String },
}

/// Maps [`MaterialRole`]s to concrete voxel IDs and knows which IDs are liquid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialPalette {
    empty: VoxelTypeId,
    water_source: VoxelTypeId,
    beach: VoxelTypeId,
    asphalt: VoxelTypeId,
    liquids: FxHashSet<VoxelTypeId>,
}

impl MaterialPalette {
    /// Builds a palette from explicit IDs. The water source is always liquid.
    pub fn new(
        empty: VoxelTypeId,
        water_source: VoxelTypeId,
        beach: VoxelTypeId,
        asphalt: VoxelTypeId,
    ) -> Self {
        let mut liquids = FxHashSet::default();
        liquids.insert(water_source);
        Self {
            empty,
            water_source,
            beach,
            asphalt,
            liquids,
        }
    }

    /// Marks additional voxel IDs as liquid.
    pub fn with_liquids(mut self, liquids: impl IntoIterator<Item = VoxelTypeId>) -> Self {
        self.liquids.extend(liquids);
        self
    }

    /// Resolves every role by name and takes the liquid set from the registry.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::UnknownVoxel`] for the first name the registry
    /// does not know.
    pub fn from_registry(registry: &VoxelTypeRegistry, names: &PaletteNames<'_>) -> Result<Self, PaletteError> {
        let resolve = |role: MaterialRole, name: &str| {
            registry
                .lookup_by_name(name)
                .ok_or_else(|| PaletteError::UnknownVoxel {
                    role,
                    name: name.to_string(),
                })
        };

        let palette = Self::new(
            resolve(MaterialRole::Empty, names.empty)?,
            resolve(MaterialRole::WaterSource, names.water_source)?,
            resolve(MaterialRole::Beach, names.beach)?,
            resolve(MaterialRole::Asphalt, names.asphalt)?,
        )
        .with_liquids(registry.liquid_ids());

        tracing::debug!(
            empty = palette.empty.0,
            water = palette.water_source.0,
            beach = palette.beach.0,
            asphalt = palette.asphalt.0,
            liquids = palette.liquids.len(),
            "material palette resolved"
        );
        Ok(palette)
    }

    /// The voxel ID for `role`.
    pub fn voxel(&self, role: MaterialRole) -> VoxelTypeId {
        match role {
            MaterialRole::Empty => self.empty,
            MaterialRole::WaterSource => self.water_source,
            MaterialRole::Beach => self.beach,
            MaterialRole::Asphalt => self.asphalt,
        }
    }

    /// The role `voxel` plays in this palette, if any.
    pub fn role_of(&self, voxel: VoxelTypeId) -> Option<MaterialRole> {
        MaterialRole::ALL.into_iter().find(|&role| self.voxel(role) == voxel)
    }

    pub fn empty(&self) -> VoxelTypeId {
        self.empty
    }

    /// Exact comparison against the configured empty voxel.
    pub fn is_empty(&self, voxel: VoxelTypeId) -> bool {
        voxel == self.empty
    }

    pub fn is_liquid(&self, voxel: VoxelTypeId) -> bool {
        self.liquids.contains(&voxel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_voxel::VoxelTypeDef;

    #[test]
    fn test_default_names_resolve_against_default_registry() {
        let registry = VoxelTypeRegistry::with_terrain_defaults();
        let palette = MaterialPalette::from_registry(&registry, &PaletteNames::default()).unwrap();

        assert_eq!(palette.voxel(MaterialRole::Empty), VoxelTypeId::AIR);
        assert_eq!(Some(palette.voxel(MaterialRole::WaterSource)), registry.lookup_by_name("water"));
        assert_eq!(Some(palette.voxel(MaterialRole::Beach)), registry.lookup_by_name("dirt"));
        assert_eq!(Some(palette.voxel(MaterialRole::Asphalt)), registry.lookup_by_name("gray_concrete"));
    }

    #[test]
    fn test_unknown_name_is_reported_with_role() {
        let registry = VoxelTypeRegistry::with_terrain_defaults();
        let names = PaletteNames {
            asphalt: "tarmac",
            ..PaletteNames::default()
        };
        let err = MaterialPalette::from_registry(&registry, &names).unwrap_err();
        assert_eq!(
            err,
            PaletteError::UnknownVoxel {
                role: MaterialRole::Asphalt,
                name: "tarmac".to_string()
            }
        );
    }

    #[test]
    fn test_liquids_come_from_registry() {
        let mut registry = VoxelTypeRegistry::with_terrain_defaults();
        let lava = registry.register(VoxelTypeDef::liquid("lava")).unwrap();
        let palette = MaterialPalette::from_registry(&registry, &PaletteNames::default()).unwrap();

        assert!(palette.is_liquid(lava));
        assert!(palette.is_liquid(palette.voxel(MaterialRole::WaterSource)));
        assert!(!palette.is_liquid(palette.voxel(MaterialRole::Beach)));
        assert!(!palette.is_liquid(VoxelTypeId::AIR));
    }

    #[test]
    fn test_role_lookup() {
        let palette = MaterialPalette::new(VoxelTypeId(0), VoxelTypeId(5), VoxelTypeId(2), VoxelTypeId(6));
        assert_eq!(palette.role_of(VoxelTypeId(6)), Some(MaterialRole::Asphalt));
        assert_eq!(palette.role_of(VoxelTypeId(0)), Some(MaterialRole::Empty));
        assert_eq!(palette.role_of(VoxelTypeId(1)), None);
        assert!(palette.is_empty(VoxelTypeId(0)));
        assert!(!palette.is_empty(VoxelTypeId(1)));
    }
}
