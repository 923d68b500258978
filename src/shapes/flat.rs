//! Single-square primitives: the billboard quad and the debug plane.

use crate::vertex::SurfaceVertex;

pub const FLAT_VERTEX_COUNT: usize = 6;

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];

/// Unit square in the XY plane, centered, facing `-Z`.
///
/// UVs are mirrored horizontally so a billboard turned toward the camera
/// shows its texture the right way round.
pub fn quad_vertices() -> Vec<SurfaceVertex> {
    let normal = [0.0, 0.0, -1.0];
    let corners: [([f32; 2], [f32; 2]); 6] = [
        ([-0.5, 0.5], [1.0, 0.0]),
        ([0.5, 0.5], [0.0, 0.0]),
        ([-0.5, -0.5], [1.0, 1.0]),
        ([-0.5, -0.5], [1.0, 1.0]),
        ([0.5, 0.5], [0.0, 0.0]),
        ([0.5, -0.5], [0.0, 1.0]),
    ];

    corners
        .iter()
        .map(|&([x, y], uv)| SurfaceVertex::new([x, y, 0.0], RED, uv, normal))
        .collect()
}

/// Unit square in the XZ plane from the origin to `(1, 0, 1)`, facing `+Y`,
/// with per-corner colors for orientation checks.
pub fn plane_vertices() -> Vec<SurfaceVertex> {
    let grey = [0.5, 0.5, 0.5];
    let dark_grey = [0.1, 0.1, 0.1];
    let corners: [([f32; 2], [f32; 3]); 6] = [
        ([0.0, 0.0], grey),
        ([0.0, 1.0], BLUE),
        ([1.0, 0.0], RED),
        ([1.0, 0.0], RED),
        ([0.0, 1.0], BLUE),
        ([1.0, 1.0], dark_grey),
    ];

    corners
        .iter()
        .map(|&([x, z], color)| SurfaceVertex::new([x, 0.0, z], color, [x, z], SurfaceVertex::UP))
        .collect()
}
