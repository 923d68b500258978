//! Procedural terrain and primitive mesh generation for a small scene viewer.
//!
//! - [`terrain`] - noise-driven heightfield, normal smoothing, triangulation
//!   and ground height queries
//! - [`shapes`] - cube, sphere, quad and plane vertex lists
//! - [`scene`] - object placement and ground collision on top of a terrain
//! - [`gpu`] - vertex buffer upload for the renderer

pub mod config;
pub mod error;
pub mod gpu;
pub mod scene;
pub mod shapes;
pub mod terrain;
pub mod vertex;

pub use config::SceneConfig;
pub use error::GeometryError;
pub use vertex::SurfaceVertex;
