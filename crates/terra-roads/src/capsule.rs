//! Capsule (stadium) boundary of a capped line segment, as a function of x.
//!
//! A feature's footprint is a band of half-width `r` around the centerline
//! `z = slope * x`, capped at both ends by circular arcs of radius `r`. Columns
//! are scanned along x, so each boundary is expressed as `z = f(x)`: the flat
//! part becomes a parallel line shifted by `b` along z, and the caps become
//! arcs that take over past the tangent points at `j ∓ x0` and `k ∓ x0`.
//!
//! Outside an arc's domain the radicand is negative and the result is NaN.
//! NaN is passed through to the caller, which treats it as
//! "no feature in this column".

/// Slopes with a smaller magnitude are treated as exactly horizontal.
pub const HORIZONTAL_EPSILON: f64 = 1e-6;

/// Returns `true` when `slope` is close enough to zero to be treated as flat.
#[inline]
pub fn is_horizontal(slope: f64) -> bool {
    slope.abs() < HORIZONTAL_EPSILON
}

/// `-1.0` for negative slopes, `+1.0` otherwise (including zero).
#[inline]
fn slope_sign(slope: f64) -> f64 {
    if slope < 0.0 { -1.0 } else { 1.0 }
}

/// Which of the two boundaries to evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The boundary with the larger z.
    Upper,
    /// The boundary with the smaller z.
    Lower,
}

impl Side {
    /// Both sides, upper first.
    pub const BOTH: [Side; 2] = [Side::Upper, Side::Lower];

    /// `+1.0` for [`Side::Upper`], `-1.0` for [`Side::Lower`].
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::Upper => 1.0,
            Side::Lower => -1.0,
        }
    }
}

/// Computes the band constants `(x0, b)` for a given slope and half-width.
///
/// `x0` is the x distance between an endpoint and the tangent point where the
/// end-cap arc meets the flat band. `b` is the z offset of the band's edge
/// from the centerline when measured vertically.
pub fn band_constants(slope: f64, r: f64) -> (f64, f64) {
    if is_horizontal(slope) {
        return (0.0, r);
    }
    let x0 = r / libm::sqrt(1.0 + 1.0 / (slope * slope));
    let b = slope_sign(slope) * x0 * (slope + 1.0 / slope);
    (x0, b)
}

/// Evaluates one capsule boundary at `x`.
///
/// `j <= k` are the segment's end x-coordinates, `r` its half-width and
/// `(x0, b)` the constants from [`band_constants`]. The centerline passes
/// through the origin; callers add their own intercept.
#[allow(clippy::too_many_arguments)]
pub fn capsule_bound(x: f64, slope: f64, j: f64, k: f64, r: f64, x0: f64, b: f64, side: Side) -> f64 {
    let sign = side.sign();
    let slopesign = sign * slope_sign(slope);

    if x < j - slopesign * x0 {
        return end_cap(x, slope, j, r, sign);
    }
    if x > k - slopesign * x0 {
        return end_cap(x, slope, k, r, sign);
    }
    flat_band(x, slope, b, sign)
}

/// Arc of radius `r` centered on the centerline point at `center_x`.
#[inline]
fn end_cap(x: f64, slope: f64, center_x: f64, r: f64, sign: f64) -> f64 {
    let dx = x - center_x;
    slope * center_x + sign * libm::sqrt(r * r - dx * dx)
}

#[inline]
fn flat_band(x: f64, slope: f64, b: f64, sign: f64) -> f64 {
    slope * x + sign * b
}

/// A capsule with its band constants precomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleBoundary {
    slope: f64,
    j: f64,
    k: f64,
    r: f64,
    x0: f64,
    b: f64,
}

impl CapsuleBoundary {
    /// Builds the boundary for a segment spanning `[j, k]` with half-width `r`.
    ///
    /// `j` and `k` are used as given; callers normalize their order.
    pub fn new(slope: f64, j: f64, k: f64, r: f64) -> Self {
        let (x0, b) = band_constants(slope, r);
        Self {
            slope,
            j,
            k,
            r,
            x0,
            b,
        }
    }

    /// Evaluates the boundary on `side` at `x`. May return NaN.
    #[inline]
    pub fn bound(&self, x: f64, side: Side) -> f64 {
        capsule_bound(x, self.slope, self.j, self.k, self.r, self.x0, self.b, side)
    }

    /// The x-coordinates where `side` switches from the left arc to the
    /// band and from the band to the right arc.
    pub fn transitions(&self, side: Side) -> (f64, f64) {
        let slopesign = side.sign() * slope_sign(self.slope);
        (self.j - slopesign * self.x0, self.k - slopesign * self.x0)
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Segment bounds `(j, k)` the boundary was built with.
    pub fn segment(&self) -> (f64, f64) {
        (self.j, self.k)
    }
}
