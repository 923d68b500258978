//! Coherent noise sources feeding the heightfield.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Seed used by the scene when none is configured.
pub const DEFAULT_NOISE_SEED: u32 = 42069;

/// Number of octaves composited by [`PerlinNoise`].
pub const NOISE_OCTAVES: usize = 5;

/// Deterministic 2D noise sampled on integer grid coordinates.
///
/// Implementations must be pure: the same `(x, z, scale)` always returns the
/// same value in `[0, 1]`.
pub trait NoiseSource {
    fn sample(&self, x: u32, z: u32, scale: f32) -> f32;
}

/// Five-octave fractal Perlin noise normalized to `[0, 1]`.
pub struct PerlinNoise {
    fbm: Fbm<Perlin>,
    seed: u32,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        let fbm = Fbm::<Perlin>::new(seed).set_octaves(NOISE_OCTAVES);
        Self { fbm, seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: u32, z: u32, scale: f32) -> f32 {
        let scale = scale as f64;
        let raw = self.fbm.get([x as f64 * scale, z as f64 * scale]);
        // Fbm output is scaled into [-1, 1]
        ((raw * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}

/// Noise source returning the same value everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _x: u32, _z: u32, _scale: f32) -> f32 {
        self.0.clamp(0.0, 1.0)
    }
}
