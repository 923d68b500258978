//! Heightfield grid construction.

use std::ops::Index;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::noise::NoiseSource;
use crate::error::GeometryError;
use crate::vertex::SurfaceVertex;

/// Integer grid coordinate used to key terrain vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey {
    pub x: u32,
    pub z: u32,
}

impl GridKey {
    pub const fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }
}

/// Terrain vertices for every integer coordinate in `[0, size_x] x [0, size_z]`.
///
/// Storage is dense and row-major (`z` outer, `x` inner), so a built grid is
/// always total: every key in range has exactly one vertex.
#[derive(Debug, Clone)]
pub struct HeightFieldGrid {
    size_x: u32,
    size_z: u32,
    vertices: Vec<SurfaceVertex>,
}

impl HeightFieldGrid {
    /// Number of cells along X (the grid has `size_x + 1` columns of vertices).
    pub fn size_x(&self) -> u32 {
        self.size_x
    }

    /// Number of cells along Z.
    pub fn size_z(&self) -> u32 {
        self.size_z
    }

    /// Total vertex count, `(size_x + 1) * (size_z + 1)`.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains_key(&self, key: GridKey) -> bool {
        key.x <= self.size_x && key.z <= self.size_z
    }

    fn index_of(&self, key: GridKey) -> Option<usize> {
        if !self.contains_key(key) {
            return None;
        }
        let row = self.size_x as usize + 1;
        Some(key.z as usize * row + key.x as usize)
    }

    pub fn get(&self, key: GridKey) -> Option<&SurfaceVertex> {
        self.index_of(key).map(|i| &self.vertices[i])
    }

    pub(crate) fn get_mut(&mut self, key: GridKey) -> Option<&mut SurfaceVertex> {
        self.index_of(key).map(|i| &mut self.vertices[i])
    }

    /// Vertex lookup that reports a missing key as an error.
    pub fn vertex(&self, x: u32, z: u32) -> Result<&SurfaceVertex, GeometryError> {
        self.get(GridKey::new(x, z))
            .ok_or(GeometryError::MissingVertex { x, z })
    }

    /// Stored terrain height at a grid vertex.
    pub fn height(&self, x: u32, z: u32) -> Result<f32, GeometryError> {
        self.vertex(x, z).map(|v| v.position[1])
    }

    /// Vertices in row-major order; index `z * (size_x + 1) + x`.
    pub fn vertices(&self) -> &[SurfaceVertex] {
        &self.vertices
    }

    /// Iterate over `(key, vertex)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridKey, &SurfaceVertex)> + '_ {
        let row = self.size_x + 1;
        self.vertices.iter().enumerate().map(move |(i, v)| {
            let i = i as u32;
            (GridKey::new(i % row, i / row), v)
        })
    }

    /// Returns the minimum and maximum terrain heights.
    pub fn height_bounds(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|v| v.position[1])
            .fold((f32::MAX, f32::MIN), |(min, max), h| (min.min(h), max.max(h)))
    }
}

impl Index<GridKey> for HeightFieldGrid {
    type Output = SurfaceVertex;

    /// Panics if `key` is outside the grid, like `HashMap` indexing.
    fn index(&self, key: GridKey) -> &SurfaceVertex {
        match self.get(key) {
            Some(v) => v,
            None => panic!("grid key ({}, {}) out of range", key.x, key.z),
        }
    }
}

/// Source of the small random term added on top of the noise height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variation {
    /// Noise only.
    Disabled,
    /// Reproducible variation from a caller-chosen seed.
    Seeded(u64),
    /// A fresh seed per build, drawn from the OS and logged.
    #[default]
    Entropy,
}

/// Tunables for height generation.
#[derive(Debug, Clone, Copy)]
pub struct HeightParams {
    /// Multiplier applied to grid coordinates before sampling noise
    pub noise_scale: f32,
    /// Multiplier applied to the `[0, 1]` noise sample
    pub noise_amplitude: f32,
    pub variation: Variation,
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            noise_scale: 0.05,
            noise_amplitude: 5.0,
            variation: Variation::default(),
        }
    }
}

/// UV for a grid vertex; the texture repeats every `uv_tiling` cells.
pub fn generate_uv(x: u32, z: u32, uv_tiling: f32) -> [f32; 2] {
    if uv_tiling == 1.0 {
        [x as f32, z as f32]
    } else {
        [x as f32 / uv_tiling, z as f32 / uv_tiling]
    }
}

/// Builds [`HeightFieldGrid`]s from a noise source.
pub struct HeightField<'a, N: NoiseSource> {
    noise: &'a N,
    params: HeightParams,
}

impl<'a, N: NoiseSource> HeightField<'a, N> {
    pub fn new(noise: &'a N, params: HeightParams) -> Self {
        Self { noise, params }
    }

    /// Generate one vertex per integer coordinate in `[0, size_x] x [0, size_z]`.
    ///
    /// Normals start pointing straight up and color is white; run
    /// [`smooth_normals`](super::normals::smooth_normals) afterwards.
    pub fn build(
        &self,
        size_x: u32,
        size_z: u32,
        uv_tiling: f32,
    ) -> Result<HeightFieldGrid, GeometryError> {
        if size_x == 0 || size_z == 0 {
            return Err(GeometryError::EmptyGrid { size_x, size_z });
        }
        if !uv_tiling.is_finite() || uv_tiling < 1.0 {
            return Err(GeometryError::InvalidUvTiling(uv_tiling));
        }
        if !self.params.noise_scale.is_finite() || !self.params.noise_amplitude.is_finite() {
            return Err(GeometryError::InvalidParameter(format!(
                "noise scale {} and amplitude {} must be finite",
                self.params.noise_scale, self.params.noise_amplitude
            )));
        }

        let mut rng = match self.params.variation {
            Variation::Disabled => None,
            Variation::Seeded(seed) => Some(ChaCha8Rng::seed_from_u64(seed)),
            Variation::Entropy => {
                let seed: u64 = rand::random();
                log::debug!("Height variation seed: {seed}");
                Some(ChaCha8Rng::seed_from_u64(seed))
            }
        };

        let count = (size_x as usize + 1) * (size_z as usize + 1);
        let mut vertices = Vec::with_capacity(count);

        for z in 0..=size_z {
            for x in 0..=size_x {
                let mut y = self.noise.sample(x, z, self.params.noise_scale)
                    * self.params.noise_amplitude;

                if let Some(rng) = rng.as_mut() {
                    let jitter = rng.random_range(1..=12u32) as f32;
                    y += ((x as f32).sin() / 2.0 + jitter) / 20.0;
                }

                vertices.push(SurfaceVertex::new(
                    [x as f32, y, z as f32],
                    SurfaceVertex::WHITE,
                    generate_uv(x, z, uv_tiling),
                    SurfaceVertex::UP,
                ));
            }
        }

        log::debug!(
            "Built {}x{} heightfield ({} vertices)",
            size_x,
            size_z,
            vertices.len()
        );

        Ok(HeightFieldGrid {
            size_x,
            size_z,
            vertices,
        })
    }
}

#[cfg(test)]
pub(crate) fn flat_grid(size_x: u32, size_z: u32) -> HeightFieldGrid {
    let noise = super::noise::ConstantNoise(0.0);
    let params = HeightParams {
        variation: Variation::Disabled,
        ..Default::default()
    };
    HeightField::new(&noise, params)
        .build(size_x, size_z, 1.0)
        .unwrap()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::terrain::noise::{ConstantNoise, PerlinNoise};

    fn seeded(seed: u64) -> HeightParams {
        HeightParams {
            variation: Variation::Seeded(seed),
            ..Default::default()
        }
    }

    // ==================== Shape of the grid ====================

    #[test]
    fn test_grid_entry_count() {
        let noise = PerlinNoise::default();
        for (sx, sz) in [(1, 1), (2, 2), (4, 4), (7, 3), (1, 10), (50, 50)] {
            let grid = HeightField::new(&noise, seeded(1)).build(sx, sz, 1.0).unwrap();
            assert_eq!(grid.len(), ((sx + 1) * (sz + 1)) as usize, "{sx}x{sz}");
        }
    }

    #[test]
    fn test_every_key_present_once() {
        let noise = PerlinNoise::default();
        let grid = HeightField::new(&noise, seeded(3)).build(6, 4, 1.0).unwrap();

        let keys: HashSet<GridKey> = grid.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), grid.len(), "duplicate keys in grid");

        for z in 0..=4 {
            for x in 0..=6 {
                assert!(keys.contains(&GridKey::new(x, z)), "hole at ({x}, {z})");
            }
        }
    }

    #[test]
    fn test_positions_match_keys() {
        let noise = PerlinNoise::default();
        let grid = HeightField::new(&noise, seeded(3)).build(5, 3, 1.0).unwrap();

        for (key, vertex) in grid.iter() {
            assert_eq!(vertex.position[0], key.x as f32);
            assert_eq!(vertex.position[2], key.z as f32);
            assert_eq!(vertex.normal, SurfaceVertex::UP);
            assert_eq!(vertex.color, SurfaceVertex::WHITE);
        }
    }

    #[test]
    fn test_out_of_range_lookup() {
        let grid = flat_grid(2, 2);
        assert!(grid.get(GridKey::new(3, 0)).is_none());
        assert!(matches!(
            grid.vertex(0, 3),
            Err(GeometryError::MissingVertex { x: 0, z: 3 })
        ));
    }

    // ==================== Heights ====================

    #[test]
    fn test_flat_noise_without_variation() {
        let grid = flat_grid(2, 2);
        assert_eq!(grid.len(), 9);
        assert!(grid.iter().all(|(_, v)| v.position[1] == 0.0));
    }

    #[test]
    fn test_variation_bounds() {
        let noise = ConstantNoise(0.0);
        let grid = HeightField::new(&noise, seeded(11)).build(20, 20, 1.0).unwrap();

        // (sin(x) / 2 + [1, 12]) / 20
        for (key, v) in grid.iter() {
            let h = v.position[1];
            assert!(
                (0.025 - 1e-6..=0.625 + 1e-6).contains(&h),
                "variation {h} at ({}, {}) out of bounds",
                key.x,
                key.z
            );
        }
    }

    #[test]
    fn test_seeded_variation_is_reproducible() {
        let noise = PerlinNoise::default();
        let a = HeightField::new(&noise, seeded(99)).build(8, 8, 1.0).unwrap();
        let b = HeightField::new(&noise, seeded(99)).build(8, 8, 1.0).unwrap();

        for ((_, va), (_, vb)) in a.iter().zip(b.iter()) {
            assert_eq!(va.position[1].to_bits(), vb.position[1].to_bits());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let noise = PerlinNoise::default();
        let a = HeightField::new(&noise, seeded(1)).build(8, 8, 1.0).unwrap();
        let b = HeightField::new(&noise, seeded(2)).build(8, 8, 1.0).unwrap();

        let differs = a
            .iter()
            .zip(b.iter())
            .any(|((_, va), (_, vb))| va.position[1] != vb.position[1]);
        assert!(differs, "different variation seeds should change heights");
    }

    #[test]
    fn test_noise_amplitude() {
        let noise = ConstantNoise(0.5);
        let params = HeightParams {
            variation: Variation::Disabled,
            ..Default::default()
        };
        let grid = HeightField::new(&noise, params).build(2, 2, 1.0).unwrap();
        assert_eq!(grid.height(1, 1).unwrap(), 2.5);
        assert_eq!(grid.height_bounds(), (2.5, 2.5));
    }

    // ==================== UVs ====================

    #[test]
    fn test_uv_untiled_uses_grid_coords() {
        assert_eq!(generate_uv(3, 7, 1.0), [3.0, 7.0]);
    }

    #[test]
    fn test_uv_tiling_divides() {
        assert_eq!(generate_uv(5, 20, 10.0), [0.5, 2.0]);

        let grid = flat_grid(2, 2);
        assert_eq!(grid[GridKey::new(2, 1)].uv, [2.0, 1.0]);
    }

    // ==================== Validation ====================

    #[test]
    fn test_zero_size_rejected() {
        let noise = ConstantNoise(0.0);
        let result = HeightField::new(&noise, HeightParams::default()).build(0, 4, 1.0);
        assert!(matches!(
            result,
            Err(GeometryError::EmptyGrid { size_x: 0, size_z: 4 })
        ));
    }

    #[test]
    fn test_bad_uv_tiling_rejected() {
        let noise = ConstantNoise(0.0);
        let field = HeightField::new(&noise, HeightParams::default());
        assert!(matches!(
            field.build(2, 2, 0.5),
            Err(GeometryError::InvalidUvTiling(_))
        ));
        assert!(matches!(
            field.build(2, 2, f32::NAN),
            Err(GeometryError::InvalidUvTiling(_))
        ));
    }

    #[test]
    fn test_non_finite_amplitude_rejected() {
        let noise = ConstantNoise(0.0);
        let params = HeightParams {
            noise_amplitude: f32::INFINITY,
            ..Default::default()
        };
        let result = HeightField::new(&noise, params).build(2, 2, 1.0);
        assert!(matches!(result, Err(GeometryError::InvalidParameter(_))));
    }
}
