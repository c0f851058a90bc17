//! Per-chunk raster envelope of a feature.
//!
//! Moves a feature into chunk-local coordinates and answers the questions the
//! column scan asks: which x columns to visit, which z rows each column
//! covers, and where the centerline point for a voxel lies.

use std::ops::RangeInclusive;

use glam::DVec2;
use terra_voxel::ChunkPos;

use crate::capsule::{CapsuleBoundary, Side, is_horizontal};
use crate::feature::LinearFeature;

/// A feature's footprint relative to one chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterEnvelope {
    /// Capsule evaluated with the clamped segment bounds.
    capsule: CapsuleBoundary,
    /// Unclamped scan bounds `j - r` and `k + r`.
    scan: (f64, f64),
    /// Chunk-local z-intercept of the centerline.
    off: f64,
    slope: f64,
    chunk_size: i32,
    /// Absolute line-space position of the chunk's minimum corner, `(x, z)`.
    origin: DVec2,
}

impl RasterEnvelope {
    /// Places `feature` with half-width `r` relative to `chunk`.
    ///
    /// Returns `None` if `r` is not a positive finite number or the feature's
    /// parameters are not finite.
    pub fn new(feature: &LinearFeature, r: f64, chunk: ChunkPos, chunk_size: i32) -> Option<Self> {
        if !(r.is_finite() && r > 0.0) || !feature.is_finite() {
            return None;
        }

        let origin_x = f64::from(chunk.x) * f64::from(chunk_size);
        let origin_z = f64::from(chunk.z) * f64::from(chunk_size);

        let mut j = feature.start_x - origin_x;
        let mut k = feature.end_x - origin_x;
        if j > k {
            std::mem::swap(&mut j, &mut k);
        }
        let off = feature.offset - origin_z + feature.slope * origin_x;

        // The scan keeps the full end caps, even beyond the chunk.
        let scan = (j - r, k + r);

        // The boundary formula only sees the part of the segment inside the chunk.
        let size = f64::from(chunk_size);
        if j <= 0.0 {
            j = 0.0;
        }
        if k >= size {
            k = size;
        }

        Some(Self {
            capsule: CapsuleBoundary::new(feature.slope, j, k, r),
            scan,
            off,
            slope: feature.slope,
            chunk_size,
            origin: DVec2::new(origin_x, origin_z),
        })
    }

    /// Chunk-local x columns to scan, `floor(j - r)..=floor(k + r)`.
    pub fn columns(&self) -> RangeInclusive<i32> {
        (self.scan.0.floor() as i32)..=(self.scan.1.floor() as i32)
    }

    /// Chunk-local z rows covered by column `x`, or `None` if the column
    /// holds no part of the feature.
    ///
    /// The span bounds the capsule at both edges of the column. Any NaN
    /// corner means the column falls outside an end cap. The result is
    /// clamped to `[1 - size, 2 * size - 1]`.
    pub fn column_span(&self, x: i32) -> Option<RangeInclusive<i32>> {
        let left = f64::from(x);
        let right = left + 1.0;
        let corners = [
            self.capsule.bound(left, Side::Upper) + self.off,
            self.capsule.bound(right, Side::Upper) + self.off,
            self.capsule.bound(left, Side::Lower) + self.off,
            self.capsule.bound(right, Side::Lower) + self.off,
        ];

        // NaN: no feature in this column.
        if corners.iter().any(|c| c.is_nan()) {
            return None;
        }

        let from = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let to = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let size = self.chunk_size;
        let mut z_from = from.floor() as i32;
        let mut z_to = to.floor() as i32;
        if z_from <= -size {
            z_from = 1 - size;
        }
        if z_to >= 2 * size {
            z_to = 2 * size - 1;
        }
        Some(z_from..=z_to)
    }

    /// Chunk-local centerline point associated with voxel `(x, z)`.
    ///
    /// Uses the same sheared metric as the boundary rather than a true
    /// perpendicular projection. For horizontal features it is the point
    /// directly above or below.
    pub fn centerline_point(&self, x: i32, z: i32) -> DVec2 {
        let x = f64::from(x);
        let z = f64::from(z);
        let main_x = if is_horizontal(self.slope) {
            x
        } else {
            (z + x / self.slope - self.off) / (self.slope + 1.0 / self.slope)
        };
        DVec2::new(main_x, self.slope * main_x + self.off)
    }

    /// Distance from voxel `(x, z)` to its centerline point.
    pub fn distance_to_centerline(&self, x: i32, z: i32) -> f64 {
        self.centerline_point(x, z)
            .distance(DVec2::new(f64::from(x), f64::from(z)))
    }

    /// Converts a chunk-local line-space point to absolute line space.
    pub fn to_absolute(&self, local: DVec2) -> DVec2 {
        local + self.origin
    }

    pub fn capsule(&self) -> &CapsuleBoundary {
        &self.capsule
    }

    /// Chunk-local z-intercept of the centerline.
    pub fn intercept(&self) -> f64 {
        self.off
    }

    /// Unclamped scan bounds `(j - r, k + r)`.
    pub fn scan_bounds(&self) -> (f64, f64) {
        self.scan
    }
}
