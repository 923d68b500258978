//! Procedural terrain: heightfield generation, normals, triangulation and
//! height queries.
//!
//! This module provides:
//! - [`NoiseSource`] - deterministic coherent noise ([`PerlinNoise`])
//! - [`HeightField`] - builds the [`HeightFieldGrid`] of terrain vertices
//! - [`smooth_normals`] - per-vertex normal averaging
//! - [`triangulate`] - GPU-ready [`TriangleStream`]
//! - [`HeightSampler`] - interpolated ground height
//! - [`Terrain`] - owns one grid and runs the whole pipeline

pub mod grid;
pub mod mesh;
pub mod noise;
pub mod normals;
pub mod sampler;

use std::time::Instant;

use glam::Vec2;

pub use grid::{generate_uv, GridKey, HeightField, HeightFieldGrid, HeightParams, Variation};
pub use mesh::{triangulate, wireframe_indices, TriangleStream};
pub use noise::{ConstantNoise, NoiseSource, PerlinNoise, DEFAULT_NOISE_SEED};
pub use normals::{smooth_normals, NormalBoundary};
pub use sampler::HeightSampler;

use crate::error::GeometryError;
use crate::vertex::SurfaceVertex;

/// Construction parameters for a [`Terrain`].
#[derive(Debug, Clone, Copy)]
pub struct TerrainConfig {
    /// Cells along X
    pub size_x: u32,
    /// Cells along Z
    pub size_z: u32,
    /// Cells a texture spans before repeating
    pub uv_tiling: f32,
    /// Seed of the Perlin field
    pub noise_seed: u32,
    pub height: HeightParams,
    pub boundary: NormalBoundary,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size_x: 50,
            size_z: 50,
            uv_tiling: 10.0,
            noise_seed: DEFAULT_NOISE_SEED,
            height: HeightParams::default(),
            boundary: NormalBoundary::default(),
        }
    }
}

/// Ground mesh with its heightfield.
///
/// The grid is indexed from `(0, 0)` but the terrain is drawn centered on the
/// world origin, so world-space queries go through [`Terrain::ground_height`],
/// which shifts them by [`Terrain::origin_offset`].
pub struct Terrain {
    grid: HeightFieldGrid,
    stream: Option<TriangleStream>,
    vertex_count: usize,
}

impl Terrain {
    /// Build a terrain over seeded Perlin noise.
    ///
    /// # Example
    ///
    /// ```
    /// use terrascene::terrain::{Terrain, TerrainConfig, Variation};
    ///
    /// let mut config = TerrainConfig::default();
    /// config.size_x = 4;
    /// config.size_z = 4;
    /// config.height.variation = Variation::Seeded(7);
    ///
    /// let terrain = Terrain::new(&config).unwrap();
    /// assert_eq!(terrain.vertex_count(), 6 * 4 * 4);
    /// assert_eq!(terrain.height_at(2.0, 3.0).unwrap(), terrain.grid().height(2, 3).unwrap());
    /// ```
    pub fn new(config: &TerrainConfig) -> Result<Self, GeometryError> {
        let noise = PerlinNoise::new(config.noise_seed);
        Self::with_noise(config, &noise)
    }

    /// Build a terrain over any noise source.
    ///
    /// Runs grid generation, then normal smoothing, then triangulation. Each
    /// phase finishes before the next starts.
    pub fn with_noise<N: NoiseSource>(
        config: &TerrainConfig,
        noise: &N,
    ) -> Result<Self, GeometryError> {
        let started = Instant::now();

        let mut grid =
            HeightField::new(noise, config.height).build(config.size_x, config.size_z, config.uv_tiling)?;
        let smoothed = smooth_normals(&mut grid, config.boundary);
        let stream = triangulate(&grid, config.size_x, config.size_z)?;

        let (min_h, max_h) = grid.height_bounds();
        log::info!(
            "Generated {}x{} terrain: {} grid vertices, {} smoothed normals, {} stream vertices, heights {:.3}..{:.3} ({:.1?})",
            config.size_x,
            config.size_z,
            grid.len(),
            smoothed,
            stream.len(),
            min_h,
            max_h,
            started.elapsed()
        );

        Ok(Self {
            vertex_count: stream.len(),
            grid,
            stream: Some(stream),
        })
    }

    pub fn grid(&self) -> &HeightFieldGrid {
        &self.grid
    }

    pub fn size_x(&self) -> u32 {
        self.grid.size_x()
    }

    pub fn size_z(&self) -> u32 {
        self.grid.size_z()
    }

    /// Vertices to draw, `6 * size_x * size_z`. Still valid after
    /// [`take_stream`](Self::take_stream).
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Draw-ready vertices, unless they were already taken.
    pub fn stream(&self) -> Option<&[SurfaceVertex]> {
        self.stream.as_deref()
    }

    /// Hand the triangle stream to the caller, typically for upload.
    ///
    /// The terrain keeps its grid, so height queries keep working.
    pub fn take_stream(&mut self) -> Option<TriangleStream> {
        self.stream.take()
    }

    /// Line-list indices over [`HeightFieldGrid::vertices`].
    pub fn wireframe_indices(&self) -> Vec<u32> {
        wireframe_indices(self.size_x(), self.size_z())
    }

    /// Translation from world space to grid space: `(size_x / 2, size_z / 2)`.
    pub fn origin_offset(&self) -> Vec2 {
        Vec2::new(self.size_x() as f32 / 2.0, self.size_z() as f32 / 2.0)
    }

    /// Height at grid-space `(x, z)`.
    pub fn height_at(&self, x: f32, z: f32) -> Result<f32, GeometryError> {
        HeightSampler::new(&self.grid).height_at(x, z)
    }

    /// Height under world-space `(x, z)`.
    pub fn ground_height(&self, world_x: f32, world_z: f32) -> Result<f32, GeometryError> {
        let grid = Vec2::new(world_x, world_z) + self.origin_offset();
        self.height_at(grid.x, grid.y)
    }

    /// Whether world-space `(x, z)` lies over the terrain.
    pub fn contains(&self, world_x: f32, world_z: f32) -> bool {
        let grid = Vec2::new(world_x, world_z) + self.origin_offset();
        grid.x >= 0.0
            && grid.y >= 0.0
            && grid.x <= self.size_x() as f32
            && grid.y <= self.size_z() as f32
    }
}
