use super::grid::{GridKey, HeightFieldGrid};
use crate::error::GeometryError;
use crate::vertex::SurfaceVertex;

/// Draw-ready terrain vertices, three per triangle, in draw order.
pub type TriangleStream = Vec<SurfaceVertex>;

/// Corner offsets of the two triangles emitted per cell.
///
/// Both share the `(x + 1, z)` - `(x, z + 1)` diagonal.
const CELL_CORNERS: [(u32, u32); 6] = [
    // Lower triangle
    (0, 0),
    (0, 1),
    (1, 0),
    // Upper triangle
    (1, 0),
    (0, 1),
    (1, 1),
];

/// Generate the triangle stream for the first `size_x` x `size_z` cells of a grid.
///
/// Vertices are copied from the grid, so the stream can be uploaded and
/// dropped independently of the grid.
pub fn triangulate(
    grid: &HeightFieldGrid,
    size_x: u32,
    size_z: u32,
) -> Result<TriangleStream, GeometryError> {
    if size_x > grid.size_x() || size_z > grid.size_z() {
        return Err(GeometryError::SizeMismatch {
            requested_x: size_x,
            requested_z: size_z,
            size_x: grid.size_x(),
            size_z: grid.size_z(),
        });
    }

    let mut stream = Vec::with_capacity(6 * size_x as usize * size_z as usize);

    for z in 0..size_z {
        for x in 0..size_x {
            for (dx, dz) in CELL_CORNERS {
                let key = GridKey::new(x + dx, z + dz);
                let vertex = grid.get(key).ok_or(GeometryError::MissingVertex {
                    x: key.x,
                    z: key.z,
                })?;
                stream.push(*vertex);
            }
        }
    }

    Ok(stream)
}

/// Edge list for wireframe display: each grid line segment once.
pub fn wireframe_indices(size_x: u32, size_z: u32) -> Vec<u32> {
    let width = size_x + 1;
    let mut indices = Vec::new();

    // Lines along X
    for z in 0..=size_z {
        for x in 0..size_x {
            let i = z * width + x;
            indices.push(i);
            indices.push(i + 1);
        }
    }

    // Lines along Z
    for z in 0..size_z {
        for x in 0..=size_x {
            let i = z * width + x;
            indices.push(i);
            indices.push(i + width);
        }
    }

    indices
}
