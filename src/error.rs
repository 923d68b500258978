use thiserror::Error;

/// Precondition violations raised while building or querying geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Grid size must be at least 1x1, got {size_x}x{size_z}")]
    EmptyGrid { size_x: u32, size_z: u32 },
    #[error("UV tiling must be a finite value >= 1, got {0}")]
    InvalidUvTiling(f32),
    #[error("Point ({x}, {z}) is outside the terrain [0, {size_x}] x [0, {size_z}]")]
    OutOfRange {
        x: f32,
        z: f32,
        size_x: u32,
        size_z: u32,
    },
    #[error("No grid vertex at ({x}, {z})")]
    MissingVertex { x: u32, z: u32 },
    #[error("Requested {requested_x}x{requested_z} cells from a {size_x}x{size_z} grid")]
    SizeMismatch {
        requested_x: u32,
        requested_z: u32,
        size_x: u32,
        size_z: u32,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
