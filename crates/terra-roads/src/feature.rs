//! Linear features: road and river segments expressed in line space.

use thiserror::Error;

/// Classification of a linear feature, as tagged by the edge dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// A river channel, painted as water with dirt banks.
    River,
    /// A small watercourse. Carried by the dataset but not painted.
    Stream,
    /// A residential or service road. Carried by the dataset but not painted.
    MinorRoad,
    /// A primary or secondary road.
    MajorRoad,
    /// A motorway or trunk road.
    Highway,
}

impl FeatureKind {
    /// Returns `true` for kinds that are paved with asphalt.
    pub fn is_paved_road(self) -> bool {
        matches!(self, FeatureKind::MajorRoad | FeatureKind::Highway)
    }
}

/// Errors raised when deriving a feature from its endpoints.
#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    /// An endpoint coordinate is NaN or infinite.
    #[error("endpoint ({x}, {z}) is not finite")]
    NonFinite { x: f64, z: f64 },
    /// Both endpoints share the same x, so the centerline has no slope.
    #[error("segment at x={x} is vertical in line space")]
    Vertical { x: f64 },
    /// The lane count is negative or not finite.
    #[error("invalid lane count {0}")]
    InvalidLanes(f64),
}

/// One segment of a road or river.
///
/// The centerline is `z = slope * x + offset` for `x` between `start_x` and
/// `end_x`, in the projected line-space frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFeature {
    pub kind: FeatureKind,
    pub start_x: f64,
    pub end_x: f64,
    /// dz/dx of the centerline.
    pub slope: f64,
    /// z-intercept of the centerline.
    pub offset: f64,
    /// Number of lanes. Only roads use it, to derive their half-width.
    pub lanes: f64,
}

impl LinearFeature {
    /// Builds a feature from explicit line parameters.
    pub fn new(kind: FeatureKind, start_x: f64, end_x: f64, slope: f64, offset: f64, lanes: f64) -> Self {
        Self {
            kind,
            start_x,
            end_x,
            slope,
            offset,
            lanes,
        }
    }

    /// Builds a feature running from `start` to `end`, both `(x, z)` in line space.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::NonFinite`] for NaN/infinite coordinates,
    /// [`FeatureError::Vertical`] when both ends share an x coordinate, and
    /// [`FeatureError::InvalidLanes`] for a negative or non-finite lane count.
    pub fn from_endpoints(
        kind: FeatureKind,
        start: (f64, f64),
        end: (f64, f64),
        lanes: f64,
    ) -> Result<Self, FeatureError> {
        for (x, z) in [start, end] {
            if !x.is_finite() || !z.is_finite() {
                return Err(FeatureError::NonFinite { x, z });
            }
        }
        if !lanes.is_finite() || lanes < 0.0 {
            return Err(FeatureError::InvalidLanes(lanes));
        }

        let dx = end.0 - start.0;
        if dx == 0.0 {
            return Err(FeatureError::Vertical { x: start.0 });
        }
        let slope = (end.1 - start.1) / dx;
        if !slope.is_finite() {
            return Err(FeatureError::Vertical { x: start.0 });
        }
        let offset = start.1 - slope * start.0;

        Ok(Self::new(kind, start.0, end.0, slope, offset, lanes))
    }

    /// The segment's x extent as `(min, max)`.
    pub fn x_bounds(&self) -> (f64, f64) {
        if self.start_x <= self.end_x {
            (self.start_x, self.end_x)
        } else {
            (self.end_x, self.start_x)
        }
    }

    /// Centerline z at `x`.
    pub fn centerline_z(&self, x: f64) -> f64 {
        self.slope * x + self.offset
    }

    /// Returns `true` if every parameter is finite.
    pub fn is_finite(&self) -> bool {
        self.start_x.is_finite()
            && self.end_x.is_finite()
            && self.slope.is_finite()
            && self.offset.is_finite()
    }
}

/// Half-widths used to paint each kind of feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfWidths {
    /// Half-width of every river.
    pub river: f64,
    /// Half-width contributed by each road lane.
    pub per_lane: f64,
}

impl Default for HalfWidths {
    fn default() -> Self {
        Self {
            river: 5.0,
            per_lane: 1.5,
        }
    }
}

impl HalfWidths {
    /// Half-width for `feature`, or `None` if its kind is not painted.
    pub fn for_feature(&self, feature: &LinearFeature) -> Option<f64> {
        match feature.kind {
            FeatureKind::River => Some(self.river),
            FeatureKind::MajorRoad | FeatureKind::Highway => Some(self.per_lane * feature.lanes),
            FeatureKind::Stream | FeatureKind::MinorRoad => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_from_endpoints_derives_line() {
        let f = LinearFeature::from_endpoints(FeatureKind::MajorRoad, (2.0, 5.0), (6.0, 13.0), 2.0).unwrap();
        assert!((f.slope - 2.0).abs() < EPSILON);
        assert!((f.offset - 1.0).abs() < EPSILON);
        assert!((f.centerline_z(6.0) - 13.0).abs() < EPSILON);
        assert_eq!(f.x_bounds(), (2.0, 6.0));
    }

    #[test]
    fn test_reversed_endpoints_keep_the_same_line() {
        let forward = LinearFeature::from_endpoints(FeatureKind::River, (0.0, 0.0), (10.0, -5.0), 0.0).unwrap();
        let reverse = LinearFeature::from_endpoints(FeatureKind::River, (10.0, -5.0), (0.0, 0.0), 0.0).unwrap();
        assert!((forward.slope - reverse.slope).abs() < EPSILON);
        assert!((forward.offset - reverse.offset).abs() < EPSILON);
        assert_eq!(reverse.start_x, 10.0);
        assert_eq!(reverse.x_bounds(), (0.0, 10.0));
    }

    #[test]
    fn test_vertical_segment_rejected() {
        let err = LinearFeature::from_endpoints(FeatureKind::Highway, (4.0, 0.0), (4.0, 9.0), 4.0).unwrap_err();
        assert_eq!(err, FeatureError::Vertical { x: 4.0 });
    }

    #[test]
    fn test_non_finite_and_bad_lanes_rejected() {
        assert!(matches!(
            LinearFeature::from_endpoints(FeatureKind::River, (f64::NAN, 0.0), (1.0, 1.0), 0.0),
            Err(FeatureError::NonFinite { .. })
        ));
        assert!(matches!(
            LinearFeature::from_endpoints(FeatureKind::MajorRoad, (0.0, 0.0), (1.0, 1.0), -2.0),
            Err(FeatureError::InvalidLanes(_))
        ));
    }

    #[test]
    fn test_half_widths_per_kind() {
        let widths = HalfWidths::default();
        let river = LinearFeature::new(FeatureKind::River, 0.0, 16.0, 0.0, 8.0, 0.0);
        let road = LinearFeature::new(FeatureKind::MajorRoad, 0.0, 16.0, 1.0, 0.0, 2.0);
        let highway = LinearFeature::new(FeatureKind::Highway, 0.0, 16.0, 1.0, 0.0, 4.0);
        let lane = LinearFeature::new(FeatureKind::MinorRoad, 0.0, 16.0, 1.0, 0.0, 1.0);

        assert_eq!(widths.for_feature(&river), Some(5.0));
        assert_eq!(widths.for_feature(&road), Some(3.0));
        assert_eq!(widths.for_feature(&highway), Some(6.0));
        assert_eq!(widths.for_feature(&lane), None);
    }

    #[test]
    fn test_paved_kinds() {
        assert!(FeatureKind::MajorRoad.is_paved_road());
        assert!(FeatureKind::Highway.is_paved_road());
        assert!(!FeatureKind::MinorRoad.is_paved_road());
        assert!(!FeatureKind::River.is_paved_road());
    }
}
