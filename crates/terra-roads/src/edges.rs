//! Edge lookup by chunk column.
//!
//! [`EdgeSource`] is what the populator queries. [`ChunkEdgeIndex`] is an
//! in-memory implementation that buckets each feature into every chunk
//! column its capsule can touch.

use hashbrown::HashMap;

use crate::feature::{HalfWidths, LinearFeature};

/// Yields the features that intersect a chunk column.
pub trait EdgeSource {
    /// Features touching chunk column `(chunk_x, chunk_z)`, or `None` if
    /// nothing is known there.
    fn features_in_chunk(&self, chunk_x: i32, chunk_z: i32) -> Option<&[LinearFeature]>;
}

/// Features bucketed by the chunk columns they reach.
#[derive(Clone, Debug)]
pub struct ChunkEdgeIndex {
    chunk_size: i32,
    buckets: HashMap<(i32, i32), Vec<LinearFeature>>,
    feature_count: usize,
}

impl ChunkEdgeIndex {
    /// Creates an empty index for chunks of side `chunk_size`.
    pub fn new(chunk_size: i32) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            buckets: HashMap::new(),
            feature_count: 0,
        }
    }

    /// Builds an index from `features`, reaching as far as `widths` paints them.
    ///
    /// Kinds that are not painted are still indexed along their centerline.
    pub fn from_features(
        chunk_size: i32,
        features: impl IntoIterator<Item = LinearFeature>,
        widths: &HalfWidths,
    ) -> Self {
        let mut index = Self::new(chunk_size);
        for feature in features {
            let reach = widths.for_feature(&feature).unwrap_or(0.0);
            index.insert(feature, reach);
        }
        index
    }

    /// Adds `feature` to every chunk column within `reach` of its segment.
    ///
    /// Non-finite features are dropped.
    pub fn insert(&mut self, feature: LinearFeature, reach: f64) {
        if !feature.is_finite() {
            tracing::warn!(kind = ?feature.kind, "dropping non-finite feature");
            return;
        }
        let reach = if reach.is_finite() { reach.max(0.0) } else { 0.0 };
        let size = f64::from(self.chunk_size);
        let (min_x, max_x) = feature.x_bounds();

        // The band edge sits at most r * sqrt(1 + slope^2) above or below the
        // centerline; end caps stay within r of the endpoints.
        let vertical_reach = reach * (1.0 + feature.slope * feature.slope).sqrt();

        let first_cx = ((min_x - reach) / size).floor() as i32;
        let last_cx = ((max_x + reach) / size).floor() as i32;

        for cx in first_cx..=last_cx {
            let chunk_min = f64::from(cx) * size;
            let xa = chunk_min.clamp(min_x, max_x);
            let xb = (chunk_min + size).clamp(min_x, max_x);
            let (za, zb) = (feature.centerline_z(xa), feature.centerline_z(xb));

            let first_cz = ((za.min(zb) - vertical_reach) / size).floor() as i32;
            let last_cz = ((za.max(zb) + vertical_reach) / size).floor() as i32;

            for cz in first_cz..=last_cz {
                self.buckets.entry((cx, cz)).or_default().push(feature);
            }
        }
        self.feature_count += 1;
    }

    /// Number of features inserted.
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Number of chunk columns holding at least one feature.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }
}

impl EdgeSource for ChunkEdgeIndex {
    fn features_in_chunk(&self, chunk_x: i32, chunk_z: i32) -> Option<&[LinearFeature]> {
        self.buckets.get(&(chunk_x, chunk_z)).map(Vec::as_slice)
    }
}
