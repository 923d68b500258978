//! UV sphere built from two polar fans and a stack of latitude bands.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::error::GeometryError;
use crate::vertex::SurfaceVertex;

/// Parameters of a generated sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    /// Added to every vertex's Y after its normal is computed
    pub height_offset: f32,
    /// Longitude steps around the Y axis
    pub radial_subdivisions: u32,
    /// Latitude steps from pole to pole
    pub vertical_subdivisions: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height_offset: 0.5,
            radial_subdivisions: 16,
            vertical_subdivisions: 16,
        }
    }
}

impl SphereParams {
    pub const MIN_SUBDIVISIONS: u32 = 3;

    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GeometryError::InvalidParameter(format!(
                "sphere radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if !self.height_offset.is_finite() {
            return Err(GeometryError::InvalidParameter(format!(
                "sphere height offset must be finite, got {}",
                self.height_offset
            )));
        }
        if self.radial_subdivisions < Self::MIN_SUBDIVISIONS
            || self.vertical_subdivisions < Self::MIN_SUBDIVISIONS
        {
            return Err(GeometryError::InvalidParameter(format!(
                "sphere needs at least {} subdivisions per axis, got {}x{}",
                Self::MIN_SUBDIVISIONS,
                self.radial_subdivisions,
                self.vertical_subdivisions
            )));
        }
        Ok(())
    }

    /// Vertices emitted by [`sphere_vertices`]: `6N + 6N(M - 2)`.
    pub fn vertex_count(&self) -> usize {
        let n = self.radial_subdivisions as usize;
        let m = self.vertical_subdivisions as usize;
        6 * n + 6 * n * m.saturating_sub(2)
    }
}

/// Emit the sphere as a triangle list, counter-clockwise seen from outside.
///
/// Order: top cap, bottom cap, then bands from the top down. The normal is
/// the unit direction from the sphere's center and doubles as the vertex
/// color; the height offset moves positions only.
pub fn sphere_vertices(params: &SphereParams) -> Result<Vec<SurfaceVertex>, GeometryError> {
    params.validate()?;

    let n = params.radial_subdivisions;
    let m = params.vertical_subdivisions;
    let radial_step = 2.0 * PI / n as f32;
    let vertical_step = PI / m as f32;

    let vertex = |radial: u32, ring: u32, uv: Vec2| -> SurfaceVertex {
        let direction = ring_direction(radial as f32 * radial_step, ring as f32 * vertical_step);
        surface_vertex(params, direction, uv)
    };
    let pole = |direction: Vec3, uv: Vec2| surface_vertex(params, direction, uv);

    let mut vertices = Vec::with_capacity(params.vertex_count());
    let (nf, mf) = (n as f32, m as f32);

    for i in 0..n {
        let fi = i as f32;
        let pole_u = fi / nf + 1.0 / (2.0 * nf);

        // Top cap: pole, then the first ring walking backwards
        vertices.push(pole(Vec3::Y, Vec2::new(pole_u, 0.0)));
        vertices.push(vertex(i + 1, 1, Vec2::new((fi + 1.0) / nf, 1.0 / mf)));
        vertices.push(vertex(i, 1, Vec2::new(fi / nf, 1.0 / mf)));
    }

    for i in 0..n {
        let fi = i as f32;
        let pole_u = fi / nf + 1.0 / (2.0 * nf);

        vertices.push(pole(Vec3::NEG_Y, Vec2::new(pole_u, 1.0)));
        vertices.push(vertex(i, m - 1, Vec2::new(fi / nf, 1.0 - 1.0 / mf)));
        vertices.push(vertex(i + 1, m - 1, Vec2::new((fi + 1.0) / nf, 1.0 - 1.0 / mf)));
    }

    for ring in 1..m - 1 {
        let v_top = ring as f32 / mf;
        let v_bottom = (ring + 1) as f32 / mf;
        for j in 0..n {
            let u_left = j as f32 / nf;
            let u_right = (j + 1) as f32 / nf;

            let top_left = vertex(j, ring, Vec2::new(u_left, v_top));
            let top_right = vertex(j + 1, ring, Vec2::new(u_right, v_top));
            let bottom_left = vertex(j, ring + 1, Vec2::new(u_left, v_bottom));
            let bottom_right = vertex(j + 1, ring + 1, Vec2::new(u_right, v_bottom));

            vertices.extend_from_slice(&[top_left, bottom_right, bottom_left]);
            vertices.extend_from_slice(&[top_left, top_right, bottom_right]);
        }
    }

    log::debug!(
        "Built sphere r={} ({}x{}): {} vertices",
        params.radius,
        n,
        m,
        vertices.len()
    );

    Ok(vertices)
}

/// Unit direction at a longitude (around Y) and polar angle (from +Y).
fn ring_direction(radial: f32, polar: f32) -> Vec3 {
    Vec3::new(radial.cos() * polar.sin(), polar.cos(), radial.sin() * polar.sin())
}

fn surface_vertex(params: &SphereParams, direction: Vec3, uv: Vec2) -> SurfaceVertex {
    let mut position = direction * params.radius;
    position.y += params.height_offset;
    let normal = direction.to_array();

    SurfaceVertex::new(position.to_array(), normal, uv.to_array(), normal)
}
