use glam::Vec3;

use crate::vertex::SurfaceVertex;

pub const CUBE_VERTEX_COUNT: usize = 36;

/// One cube face: outward normal, the face's in-plane U and V axes
/// (`u x v == normal`) and its debug color.
struct Face {
    normal: Vec3,
    u: Vec3,
    v: Vec3,
    color: [f32; 3],
}

const FACES: [Face; 6] = [
    // Front
    Face {
        normal: Vec3::Z,
        u: Vec3::X,
        v: Vec3::Y,
        color: [1.0, 0.0, 0.0],
    },
    // Top
    Face {
        normal: Vec3::Y,
        u: Vec3::X,
        v: Vec3::NEG_Z,
        color: [1.0, 1.0, 0.0],
    },
    // Back
    Face {
        normal: Vec3::NEG_Z,
        u: Vec3::NEG_X,
        v: Vec3::Y,
        color: [0.0, 1.0, 0.0],
    },
    // Bottom
    Face {
        normal: Vec3::NEG_Y,
        u: Vec3::X,
        v: Vec3::Z,
        color: [0.0, 1.0, 1.0],
    },
    // Right
    Face {
        normal: Vec3::X,
        u: Vec3::NEG_Z,
        v: Vec3::Y,
        color: [0.0, 0.0, 1.0],
    },
    // Left
    Face {
        normal: Vec3::NEG_X,
        u: Vec3::Z,
        v: Vec3::Y,
        color: [1.0, 0.0, 1.0],
    },
];

/// Face corners in UV space, two counter-clockwise triangles.
const FACE_CORNERS: [(f32, f32); 6] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
];

/// Box centered on the origin spanning `±size / 2`.
pub fn cube_vertices(size: Vec3) -> Vec<SurfaceVertex> {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(CUBE_VERTEX_COUNT);

    for face in &FACES {
        for (s, t) in FACE_CORNERS {
            let unit = face.normal + face.u * (2.0 * s - 1.0) + face.v * (2.0 * t - 1.0);
            vertices.push(SurfaceVertex::new(
                (unit * half).to_array(),
                face.color,
                [s, t],
                face.normal.to_array(),
            ));
        }
    }

    vertices
}
