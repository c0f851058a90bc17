//! Synthetic ground and feature layout for the demo.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use terra_roads::{FeatureKind, HeightField, LinearFeature, Projection};
use terra_voxel::{VoxelPos, VoxelTypeId, VoxelWorld};
use tracing::warn;

/// Inclusive range of surface heights found while building the ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightRange {
    pub min: i32,
    pub max: i32,
}

/// Fills every column of the `extent x extent` block at the origin with
/// `stone`, from `floor` up to just below the sampled surface.
///
/// Columns the projection or height field can't answer for stay empty.
pub fn build_ground(
    world: &mut VoxelWorld,
    extent: i32,
    floor: i32,
    heights: &dyn HeightField,
    projection: &dyn Projection,
    stone: VoxelTypeId,
) -> Option<HeightRange> {
    let mut range: Option<HeightRange> = None;
    for z in 0..extent {
        for x in 0..extent {
            let Some(surface) = projection
                .to_geographic(f64::from(x), f64::from(z))
                .ok()
                .and_then(|geo| heights.estimate(geo.lon, geo.lat))
            else {
                continue;
            };
            let surface = surface.floor() as i32;
            if surface > floor {
                world.fill_box(VoxelPos::new(x, floor, z), VoxelPos::new(x, surface - 1, z), stone);
            }
            range = Some(match range {
                Some(r) => HeightRange {
                    min: r.min.min(surface),
                    max: r.max.max(surface),
                },
                None => HeightRange {
                    min: surface,
                    max: surface,
                },
            });
        }
    }
    range
}

/// Scatters a few rivers and roads across the block, each running from the
/// west edge to the east edge.
pub fn random_features(seed: u64, extent: i32) -> Vec<LinearFeature> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let extent = f64::from(extent);
    let layout = [
        (FeatureKind::River, 0.0),
        (FeatureKind::River, 0.0),
        (FeatureKind::MajorRoad, 2.0),
        (FeatureKind::Highway, 4.0),
        (FeatureKind::MinorRoad, 1.0),
    ];

    let mut features = Vec::with_capacity(layout.len());
    for (kind, lanes) in layout {
        let start = (rng.gen_range(-8.0..0.0), rng.gen_range(0.0..extent));
        let end = (extent + rng.gen_range(0.0..8.0), rng.gen_range(0.0..extent));
        match LinearFeature::from_endpoints(kind, start, end, lanes) {
            Ok(feature) => features.push(feature),
            Err(err) => warn!(?kind, %err, "skipping generated feature"),
        }
    }
    features
}
