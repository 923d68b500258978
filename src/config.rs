//! Scene configuration.

use glam::{EulerRot, Quat, Vec3};

use crate::scene::SceneObject;
use crate::shapes::{Shape, SphereParams};
use crate::terrain::TerrainConfig;

/// An object to add to the scene at startup.
#[derive(Debug, Clone, Copy)]
pub struct ObjectConfig {
    pub object: SceneObject,
    /// Drop the object onto the terrain, keeping its `x` and `z`
    pub on_ground: bool,
}

/// Everything needed to build a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub terrain: TerrainConfig,
    /// Mesh used for every sphere in the scene
    pub sphere: SphereParams,
    /// Radius of the viewer's bounding sphere for ground collision
    pub camera_radius: f32,
    pub objects: Vec<ObjectConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let sphere = SphereParams::default();
        Self {
            terrain: TerrainConfig::default(),
            sphere,
            camera_radius: 1.0,
            objects: default_objects(sphere),
        }
    }
}

fn euler_degrees(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, x.to_radians(), y.to_radians(), z.to_radians())
}

fn default_objects(sphere: SphereParams) -> Vec<ObjectConfig> {
    let cube = Shape::Cube { size: Vec3::ONE };
    let floating = |object| ObjectConfig {
        object,
        on_ground: false,
    };
    let grounded = |object| ObjectConfig {
        object,
        on_ground: true,
    };

    vec![
        floating(
            SceneObject::new(Shape::Quad)
                .with_position(Vec3::new(2.0, 0.7, 2.0))
                .with_scale(Vec3::splat(0.3)),
        ),
        floating(
            SceneObject::new(cube)
                .with_position(Vec3::new(0.0, 5.0, 0.0))
                .with_rotation(euler_degrees(0.0, 45.0, 45.0))
                .with_scale(Vec3::splat(2.0)),
        ),
        grounded(
            SceneObject::new(cube)
                .with_position(Vec3::new(3.0, 0.0, -3.0))
                .with_scale(Vec3::splat(1.5)),
        ),
        grounded(SceneObject::new(cube).with_position(Vec3::new(2.0, 0.0, 2.0))),
        grounded(
            SceneObject::new(cube)
                .with_position(Vec3::new(-3.0, 0.0, 3.0))
                .with_scale(Vec3::splat(2.0)),
        ),
        floating(
            SceneObject::new(Shape::Sphere(sphere))
                .with_position(Vec3::new(20.0, 15.0, 20.0))
                .with_scale(Vec3::splat(2.5)),
        ),
    ]
}
