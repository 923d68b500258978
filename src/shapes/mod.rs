//! Mesh generators for every drawable shape kind.
//!
//! [`Shape`] is the closed set of kinds a scene can hold. Call sites match on
//! it, or use [`Shape::as_sphere`] when only spheres need special handling.

pub mod cube;
pub mod flat;
pub mod sphere;

use glam::Vec3;

pub use cube::{cube_vertices, CUBE_VERTEX_COUNT};
pub use flat::{plane_vertices, quad_vertices, FLAT_VERTEX_COUNT};
pub use sphere::{sphere_vertices, SphereParams};

use crate::error::GeometryError;
use crate::terrain::{Terrain, TerrainConfig};
use crate::vertex::SurfaceVertex;

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Cube { size: Vec3 },
    Sphere(SphereParams),
    Quad,
    Plane,
    Ground(TerrainConfig),
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Cube { .. } => "cube",
            Shape::Sphere(_) => "sphere",
            Shape::Quad => "quad",
            Shape::Plane => "plane",
            Shape::Ground(_) => "ground",
        }
    }

    pub fn as_sphere(&self) -> Option<&SphereParams> {
        match self {
            Shape::Sphere(params) => Some(params),
            _ => None,
        }
    }

    /// Number of vertices a draw call for this shape must cover.
    pub fn vertex_count(&self) -> usize {
        match self {
            Shape::Cube { .. } => CUBE_VERTEX_COUNT,
            Shape::Sphere(params) => params.vertex_count(),
            Shape::Quad | Shape::Plane => FLAT_VERTEX_COUNT,
            Shape::Ground(config) => 6 * config.size_x as usize * config.size_z as usize,
        }
    }

    /// Build the triangle list for this shape in model space.
    ///
    /// A ground shape generates a full [`Terrain`] and keeps only its stream;
    /// use [`Terrain`] directly when height queries are needed too.
    pub fn vertices(&self) -> Result<Vec<SurfaceVertex>, GeometryError> {
        match self {
            Shape::Cube { size } => {
                if !size.is_finite() || size.min_element() <= 0.0 {
                    return Err(GeometryError::InvalidParameter(format!(
                        "cube size must be positive and finite, got {size}"
                    )));
                }
                Ok(cube_vertices(*size))
            }
            Shape::Sphere(params) => sphere_vertices(params),
            Shape::Quad => Ok(quad_vertices()),
            Shape::Plane => Ok(plane_vertices()),
            Shape::Ground(config) => {
                let mut terrain = Terrain::new(config)?;
                Ok(terrain.take_stream().unwrap_or_default())
            }
        }
    }
}
