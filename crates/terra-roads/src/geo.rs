//! Geographic collaborators: the projection from line space to lon/lat and
//! the height field that estimates terrain elevation at a lon/lat.

use thiserror::Error;

/// A longitude/latitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoord {
    pub lon: f64,
    pub lat: f64,
}

impl GeoCoord {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// The point maps outside the valid longitude/latitude range.
    #[error("point ({x}, {z}) is outside the projection domain")]
    OutOfDomain { x: f64, z: f64 },
}

/// Converts line-space `(x, z)` into geographic coordinates.
///
/// Must use the same frame that produced the features' line parameters.
pub trait Projection {
    fn to_geographic(&self, x: f64, z: f64) -> Result<GeoCoord, ProjectionError>;
}

/// Estimates the terrain surface elevation at a geographic coordinate.
///
/// Returns `None` where no estimate is available.
pub trait HeightField {
    fn estimate(&self, lon: f64, lat: f64) -> Option<f64>;
}

impl<F> HeightField for F
where
    F: Fn(f64, f64) -> Option<f64>,
{
    fn estimate(&self, lon: f64, lat: f64) -> Option<f64> {
        self(lon, lat)
    }
}

/// Passes line-space coordinates through unchanged (`lon = x`, `lat = z`).
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityProjection;

impl Projection for IdentityProjection {
    fn to_geographic(&self, x: f64, z: f64) -> Result<GeoCoord, ProjectionError> {
        Ok(GeoCoord::new(x, z))
    }
}

/// Plate carrée projection centered on an origin, with a fixed scale.
///
/// Line-space z grows southward, so latitude decreases with z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Equirectangular {
    pub origin_lon: f64,
    pub origin_lat: f64,
    /// Line-space units per degree of arc.
    pub units_per_degree: f64,
}

impl Equirectangular {
    pub fn new(origin_lon: f64, origin_lat: f64, units_per_degree: f64) -> Self {
        Self {
            origin_lon,
            origin_lat,
            units_per_degree,
        }
    }

    /// Inverse of [`Projection::to_geographic`]: line-space `(x, z)` for a lon/lat.
    pub fn from_geographic(&self, coord: GeoCoord) -> (f64, f64) {
        (
            (coord.lon - self.origin_lon) * self.units_per_degree,
            (self.origin_lat - coord.lat) * self.units_per_degree,
        )
    }
}

impl Projection for Equirectangular {
    fn to_geographic(&self, x: f64, z: f64) -> Result<GeoCoord, ProjectionError> {
        let lon = self.origin_lon + x / self.units_per_degree;
        let lat = self.origin_lat - z / self.units_per_degree;
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(ProjectionError::OutOfDomain { x, z });
        }
        Ok(GeoCoord::new(lon, lat))
    }
}

/// The same elevation everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantHeight(pub f64);

impl HeightField for ConstantHeight {
    fn estimate(&self, _lon: f64, _lat: f64) -> Option<f64> {
        Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_identity_passes_through() {
        let coord = IdentityProjection.to_geographic(-3.5, 12.25).unwrap();
        assert_eq!(coord, GeoCoord::new(-3.5, 12.25));
    }

    #[test]
    fn test_equirectangular_roundtrip() {
        let proj = Equirectangular::new(-122.4, 37.8, 100_000.0);
        let coord = proj.to_geographic(2500.0, -1300.0).unwrap();
        assert!((coord.lon - (-122.375)).abs() < EPSILON);
        assert!((coord.lat - 37.813).abs() < EPSILON);

        let (x, z) = proj.from_geographic(coord);
        assert!((x - 2500.0).abs() < 1e-6 && (z + 1300.0).abs() < 1e-6);
    }

    #[test]
    fn test_equirectangular_rejects_points_past_the_pole() {
        let proj = Equirectangular::new(0.0, 89.0, 10.0);
        assert!(proj.to_geographic(0.0, -5.0).is_ok());
        assert_eq!(
            proj.to_geographic(0.0, -20.0),
            Err(ProjectionError::OutOfDomain { x: 0.0, z: -20.0 })
        );
    }

    #[test]
    fn test_closure_height_field() {
        let ramp = |lon: f64, _lat: f64| (lon >= 0.0).then_some(lon * 2.0);
        assert_eq!(ramp.estimate(3.0, 0.0), Some(6.0));
        assert_eq!(ramp.estimate(-1.0, 0.0), None);
        assert_eq!(ConstantHeight(64.0).estimate(1e6, -1e6), Some(64.0));
    }
}
