//! Multi-octave fractal Brownian motion (fBm) height field over lon/lat.
//!
//! Stands in for a real elevation dataset when running the demo or benches:
//! smooth, deterministic, and cheap to sample.

use noise::{NoiseFn, Simplex};

use crate::geo::HeightField;

/// Configuration for the fBm noise height field.
#[derive(Clone, Debug)]
pub struct NoiseHeightParams {
    /// Seed for deterministic generation.
    pub seed: u64,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first octave in cycles per degree. Default: 20.0.
    pub base_frequency: f64,
    /// Amplitude of the first octave in voxels. Default: 12.0.
    pub amplitude: f64,
    /// Elevation the noise oscillates around. Default: 64.0.
    pub base_elevation: f64,
}

impl Default for NoiseHeightParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 20.0,
            amplitude: 12.0,
            base_elevation: 64.0,
        }
    }
}

/// Terrain elevation from fBm simplex noise sampled at `(lon, lat)`.
pub struct NoiseHeightField {
    noise: Simplex,
    params: NoiseHeightParams,
}

impl NoiseHeightField {
    pub fn new(params: NoiseHeightParams) -> Self {
        let noise = Simplex::new(params.seed as u32);
        Self { noise, params }
    }

    /// Sums every octave at `(lon, lat)`, without the base elevation.
    fn fbm(&self, lon: f64, lat: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            total += self.noise.get([lon * frequency, lat * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Largest possible deviation from the base elevation (geometric series sum).
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    pub fn params(&self) -> &NoiseHeightParams {
        &self.params
    }
}

impl HeightField for NoiseHeightField {
    fn estimate(&self, lon: f64, lat: f64) -> Option<f64> {
        let height = self.params.base_elevation + self.fbm(lon, lat);
        height.is_finite().then_some(height)
    }
}
