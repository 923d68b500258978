//! Vertex layout shared by the terrain stream and every primitive mesh.

use std::fs;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

const VEC3_SIZE: wgpu::BufferAddress = std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;
const VEC2_SIZE: wgpu::BufferAddress = std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress;

/// Vertex data for GPU: position, color, uv, normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl SurfaceVertex {
    pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
    pub const UP: [f32; 3] = [0.0, 1.0, 0.0];

    pub fn new(position: [f32; 3], color: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            color,
            uv,
            normal,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SurfaceVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: VEC3_SIZE,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 2 * VEC3_SIZE,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 2 * VEC3_SIZE + VEC2_SIZE,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot write vertex dump to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Refusing to write an empty vertex stream")]
    EmptyStream,
}

/// Write the raw vertex bytes of a stream, exactly as they would be uploaded.
pub fn write_vertex_dump<P: AsRef<Path>>(
    path: P,
    vertices: &[SurfaceVertex],
) -> Result<usize, ExportError> {
    if vertices.is_empty() {
        return Err(ExportError::EmptyStream);
    }

    let path = path.as_ref();
    let bytes: &[u8] = bytemuck::cast_slice(vertices);
    fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;

    log::debug!("Wrote {} vertices ({} bytes) to {}", vertices.len(), bytes.len(), path.display());
    Ok(bytes.len())
}
