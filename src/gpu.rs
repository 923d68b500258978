//! Vertex buffer upload for generated meshes.
//!
//! Meshes are built on the CPU, uploaded once, and drawn with a fixed vertex
//! count. The CPU copy can be dropped as soon as [`GpuMesh::upload`] returns.

use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::scene::PrimitiveMode;
use crate::vertex::SurfaceVertex;

#[derive(Error, Debug)]
pub enum GpuError {
    #[error("No compatible GPU adapter found")]
    NoAdapter,
    #[error("Failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// Open a device without a surface, for uploads and offscreen work.
pub async fn headless_device() -> Result<(wgpu::Device, wgpu::Queue), GpuError> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .ok_or(GpuError::NoAdapter)?;

    log::info!("Using adapter: {}", adapter.get_info().name);

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                label: Some("terrascene device"),
                memory_hints: Default::default(),
            },
            None,
        )
        .await?;

    Ok((device, queue))
}

/// A vertex buffer with the count and primitive mode needed to draw it.
///
/// Dropping the mesh releases the buffer.
pub struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
    mode: PrimitiveMode,
    wireframe: Option<(wgpu::Buffer, u32)>,
}

impl GpuMesh {
    /// Upload a triangle list. Returns `None` for an empty stream.
    pub fn upload(device: &wgpu::Device, label: &str, vertices: &[SurfaceVertex]) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!(
            "Uploaded {label}: {} vertices, {} bytes",
            vertices.len(),
            std::mem::size_of_val(vertices)
        );

        Some(Self {
            buffer,
            vertex_count: vertices.len() as u32,
            mode: PrimitiveMode::Triangles,
            wireframe: None,
        })
    }

    /// Upload grid vertices together with a line-list index buffer.
    ///
    /// Used for terrain wireframes, where each grid vertex is stored once and
    /// the edges are indexed.
    pub fn upload_wireframe(
        device: &wgpu::Device,
        label: &str,
        vertices: &[SurfaceVertex],
        indices: &[u32],
    ) -> Option<Self> {
        let mut mesh = Self::upload(device, label, vertices)?;
        if indices.is_empty() {
            return Some(mesh);
        }

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        mesh.wireframe = Some((index_buffer, indices.len() as u32));
        mesh.mode = PrimitiveMode::Lines;
        Some(mesh)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    /// Size of the vertex buffer in bytes.
    pub fn size(&self) -> wgpu::BufferAddress {
        self.buffer.size()
    }

    /// Number of line-list indices, for meshes uploaded as a wireframe.
    pub fn index_count(&self) -> Option<u32> {
        self.wireframe.as_ref().map(|(_, count)| *count)
    }
}
