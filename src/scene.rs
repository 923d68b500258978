//! Placing objects in the world and keeping them above the ground.

use glam::{Mat4, Quat, Vec3};

use crate::config::SceneConfig;
use crate::error::GeometryError;
use crate::shapes::Shape;
use crate::terrain::Terrain;

/// How a vertex stream is assembled into primitives at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveMode {
    /// One point per vertex
    Points,
    /// Independent segments, two vertices each
    Lines,
    /// Connected segments through every vertex
    LineStrip,
    /// Filled triangles, three vertices each
    #[default]
    Triangles,
}

impl PrimitiveMode {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            PrimitiveMode::Points => wgpu::PrimitiveTopology::PointList,
            PrimitiveMode::Lines => wgpu::PrimitiveTopology::LineList,
            PrimitiveMode::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            PrimitiveMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    /// Cycle to the next mode (points, lines, line strip, triangles).
    pub fn next(self) -> Self {
        match self {
            PrimitiveMode::Points => PrimitiveMode::Lines,
            PrimitiveMode::Lines => PrimitiveMode::LineStrip,
            PrimitiveMode::LineStrip => PrimitiveMode::Triangles,
            PrimitiveMode::Triangles => PrimitiveMode::Points,
        }
    }
}

/// A shape placed in the world.
#[derive(Debug, Clone, Copy)]
pub struct SceneObject {
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl SceneObject {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Model-to-world transform: translate * rotate * scale.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Whether a world-space point lies inside the object.
    ///
    /// Spheres assume uniform scale and use `scale.x` as their radius. Cubes
    /// and quads test the unit box in model space. The ground contains
    /// everything and a plane contains nothing.
    pub fn contains_point(&self, point: Vec3) -> bool {
        match self.shape {
            Shape::Sphere(_) => self.position.distance(point) <= self.scale.x,
            Shape::Cube { .. } | Shape::Quad => {
                let local = self.world_matrix().inverse().transform_point3(point);
                local.abs().max_element() <= 0.5
            }
            Shape::Ground(_) => true,
            Shape::Plane => false,
        }
    }

    /// Whether the object crosses the plane through `plane_point` with unit
    /// normal `plane_normal`. Only spheres and the ground answer.
    pub fn intersects_plane(&self, plane_point: Vec3, plane_normal: Vec3) -> bool {
        match self.shape {
            Shape::Sphere(_) => plane_normal.dot(self.position - plane_point) < self.scale.x,
            Shape::Ground(_) => true,
            _ => false,
        }
    }
}

/// Rest `object` on the ground under its world `(x, z)`.
///
/// The base of the object is taken to be `scale.y / 2` below its position,
/// which holds for the centered cube and quad and for spheres built with no
/// height offset.
pub fn place_on_terrain(terrain: &Terrain, object: &mut SceneObject) -> Result<(), GeometryError> {
    let ground = terrain.ground_height(object.position.x, object.position.z)?;
    object.position.y = ground + object.scale.y / 2.0;
    log::debug!(
        "Placed {} at ({:.2}, {:.2}, {:.2})",
        object.shape.name(),
        object.position.x,
        object.position.y,
        object.position.z
    );
    Ok(())
}

/// Push a bounding sphere at `position` up out of the ground.
///
/// Returns the corrected position, with `y >= ground + radius`. Positions
/// outside the terrain come back unchanged.
pub fn resolve_ground_collision(terrain: &Terrain, position: Vec3, radius: f32) -> Vec3 {
    if !terrain.contains(position.x, position.z) {
        return position;
    }

    match terrain.ground_height(position.x, position.z) {
        Ok(ground) if position.y < ground + radius => Vec3::new(position.x, ground + radius, position.z),
        Ok(_) => position,
        Err(e) => {
            log::warn!("Ground query failed at ({}, {}): {}", position.x, position.z, e);
            position
        }
    }
}

/// The terrain and the objects standing on it.
pub struct Scene {
    terrain: Terrain,
    objects: Vec<SceneObject>,
    camera_radius: f32,
}

impl Scene {
    /// Build the terrain, then place every configured object.
    ///
    /// Every sphere in the scene takes its mesh parameters from
    /// `config.sphere`, which is validated before anything is built.
    pub fn new(config: &SceneConfig) -> Result<Self, GeometryError> {
        config.sphere.validate()?;
        if !config.camera_radius.is_finite() || config.camera_radius < 0.0 {
            return Err(GeometryError::InvalidParameter(format!(
                "camera radius must be finite and non-negative, got {}",
                config.camera_radius
            )));
        }

        let terrain = Terrain::new(&config.terrain)?;

        let mut objects = Vec::with_capacity(config.objects.len());
        for spec in &config.objects {
            let mut object = spec.object;
            if let Some(params) = object.shape.as_sphere() {
                if params != &config.sphere {
                    log::debug!("Sphere mesh {params:?} replaced by scene sphere config");
                }
                object.shape = Shape::Sphere(config.sphere);
            }
            if spec.on_ground {
                place_on_terrain(&terrain, &mut object)?;
            }
            objects.push(object);
        }

        log::info!("Scene ready: {} objects", objects.len());

        Ok(Self {
            terrain,
            objects,
            camera_radius: config.camera_radius,
        })
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn terrain_mut(&mut self) -> &mut Terrain {
        &mut self.terrain
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Keep the viewer's bounding sphere above the ground.
    pub fn resolve_camera(&self, position: Vec3) -> Vec3 {
        resolve_ground_collision(&self.terrain, position, self.camera_radius)
    }

    /// Objects whose volume contains `point`.
    pub fn objects_containing(&self, point: Vec3) -> impl Iterator<Item = &SceneObject> + '_ {
        self.objects.iter().filter(move |o| o.contains_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectConfig;
    use crate::shapes::SphereParams;
    use crate::terrain::{ConstantNoise, HeightParams, TerrainConfig, Variation};

    /// 10x10 terrain flat at height 2.
    fn flat_terrain() -> Terrain {
        let config = TerrainConfig {
            size_x: 10,
            size_z: 10,
            height: HeightParams {
                noise_amplitude: 4.0,
                variation: Variation::Disabled,
                ..Default::default()
            },
            ..Default::default()
        };
        Terrain::with_noise(&config, &ConstantNoise(0.5)).unwrap()
    }

    // ==================== Ground collision ====================

    #[test]
    fn test_collision_pushes_up() {
        let terrain = flat_terrain();
        let resolved = resolve_ground_collision(&terrain, Vec3::new(1.0, 0.5, -2.0), 1.0);
        assert_eq!(resolved, Vec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn test_collision_leaves_airborne_position() {
        let terrain = flat_terrain();
        let position = Vec3::new(0.0, 10.0, 0.0);
        assert_eq!(resolve_ground_collision(&terrain, position, 1.0), position);
    }

    #[test]
    fn test_collision_ignores_points_off_terrain() {
        let terrain = flat_terrain();
        let position = Vec3::new(40.0, -5.0, 0.0);
        assert_eq!(resolve_ground_collision(&terrain, position, 1.0), position);
    }

    #[test]
    fn test_place_on_terrain() {
        let terrain = flat_terrain();
        let mut cube = SceneObject::new(Shape::Cube { size: Vec3::ONE })
            .with_position(Vec3::new(3.0, 100.0, 3.0))
            .with_scale(Vec3::splat(2.0));

        place_on_terrain(&terrain, &mut cube).unwrap();
        assert_eq!(cube.position.y, 3.0);
    }

    #[test]
    fn test_place_off_terrain_fails() {
        let terrain = flat_terrain();
        let mut quad = SceneObject::new(Shape::Quad).with_position(Vec3::new(20.0, 0.0, 0.0));
        assert!(matches!(
            place_on_terrain(&terrain, &mut quad),
            Err(GeometryError::OutOfRange { .. })
        ));
    }

    // ==================== Containment ====================

    #[test]
    fn test_sphere_contains_point() {
        let sphere = SceneObject::new(Shape::Sphere(SphereParams::default()))
            .with_position(Vec3::new(1.0, 1.0, 1.0))
            .with_scale(Vec3::splat(2.0));

        assert!(sphere.contains_point(Vec3::new(2.5, 1.0, 1.0)));
        assert!(sphere.contains_point(Vec3::new(1.0, 3.0, 1.0)));
        assert!(!sphere.contains_point(Vec3::new(3.1, 1.0, 1.0)));
    }

    #[test]
    fn test_cube_contains_point() {
        let cube = SceneObject::new(Shape::Cube { size: Vec3::ONE })
            .with_position(Vec3::new(5.0, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 4.0, 2.0));

        assert!(cube.contains_point(Vec3::new(5.0, 0.0, 0.0)));
        assert!(cube.contains_point(Vec3::new(5.9, 1.9, -0.9)));
        assert!(!cube.contains_point(Vec3::new(6.1, 0.0, 0.0)));
        assert!(!cube.contains_point(Vec3::new(5.0, 2.1, 0.0)));
    }

    #[test]
    fn test_rotated_cube_contains_point() {
        let cube = SceneObject::new(Shape::Cube { size: Vec3::ONE })
            .with_scale(Vec3::new(4.0, 1.0, 1.0))
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        // Long axis now runs along Z
        assert!(cube.contains_point(Vec3::new(0.0, 0.0, 1.8)));
        assert!(!cube.contains_point(Vec3::new(1.8, 0.0, 0.0)));
    }

    #[test]
    fn test_plane_and_ground_containment() {
        let plane = SceneObject::new(Shape::Plane);
        let ground = SceneObject::new(Shape::Ground(TerrainConfig::default()));
        assert!(!plane.contains_point(Vec3::ZERO));
        assert!(ground.contains_point(Vec3::new(1e6, 0.0, 0.0)));
    }

    #[test]
    fn test_sphere_intersects_plane() {
        let sphere = SceneObject::new(Shape::Sphere(SphereParams::default()))
            .with_position(Vec3::new(0.0, 0.5, 0.0));

        assert!(sphere.intersects_plane(Vec3::ZERO, Vec3::Y));
        assert!(!sphere.intersects_plane(Vec3::new(0.0, -2.0, 0.0), Vec3::Y));
        assert!(!SceneObject::new(Shape::Quad).intersects_plane(Vec3::ZERO, Vec3::Y));
    }

    // ==================== Scene ====================

    fn small_scene_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.terrain.size_x = 16;
        config.terrain.size_z = 16;
        config.terrain.height.variation = Variation::Seeded(21);
        config
    }

    #[test]
    fn test_scene_grounds_objects() {
        let config = small_scene_config();
        let scene = Scene::new(&config).unwrap();

        assert_eq!(scene.objects().len(), config.objects.len());
        for (spec, object) in config.objects.iter().zip(scene.objects()) {
            if spec.on_ground {
                let ground = scene
                    .terrain()
                    .ground_height(object.position.x, object.position.z)
                    .unwrap();
                assert_eq!(object.position.y, ground + object.scale.y / 2.0);
            } else {
                assert_eq!(object.position, spec.object.position);
            }
        }
    }

    #[test]
    fn test_scene_rejects_grounded_object_off_terrain() {
        let mut config = small_scene_config();
        config.objects.push(ObjectConfig {
            object: SceneObject::new(Shape::Quad).with_position(Vec3::new(100.0, 0.0, 0.0)),
            on_ground: true,
        });
        assert!(Scene::new(&config).is_err());
    }

    #[test]
    fn test_scene_rejects_bad_sphere() {
        let mut config = small_scene_config();
        config.sphere.vertical_subdivisions = 1;
        assert!(matches!(
            Scene::new(&config),
            Err(GeometryError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_scene_applies_sphere_config() {
        let mut config = small_scene_config();
        config.sphere.radial_subdivisions = 4;
        config.objects.push(ObjectConfig {
            object: SceneObject::new(Shape::Sphere(SphereParams {
                radial_subdivisions: 1,
                ..Default::default()
            })),
            on_ground: false,
        });
        let scene = Scene::new(&config).unwrap();

        let spheres: Vec<&SphereParams> = scene
            .objects()
            .iter()
            .filter_map(|o| o.shape.as_sphere())
            .collect();
        assert_eq!(spheres.len(), 2);
        for params in spheres {
            assert_eq!(params, &config.sphere);
            assert!(params.validate().is_ok());
        }

        let sphere = scene.objects().iter().find(|o| o.shape.as_sphere().is_some()).unwrap();
        assert_eq!(sphere.shape.vertices().unwrap().len(), 6 * 4 + 6 * 4 * 14);
    }

    #[test]
    fn test_scene_camera_and_containment() {
        let mut config = small_scene_config();
        config.objects = vec![ObjectConfig {
            object: SceneObject::new(Shape::Cube { size: Vec3::ONE })
                .with_position(Vec3::new(2.0, 0.0, 2.0)),
            on_ground: true,
        }];
        let scene = Scene::new(&config).unwrap();

        let cube = scene.objects()[0];
        assert_eq!(scene.objects_containing(cube.position).count(), 1);
        assert_eq!(scene.objects_containing(cube.position + Vec3::X).count(), 0);

        let camera = scene.resolve_camera(Vec3::new(0.0, -50.0, 0.0));
        let ground = scene.terrain().ground_height(0.0, 0.0).unwrap();
        assert_eq!(camera.y, ground + config.camera_radius);
    }

    // ==================== Primitive modes ====================

    #[test]
    fn test_primitive_topology() {
        assert_eq!(PrimitiveMode::default().topology(), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(PrimitiveMode::Lines.topology(), wgpu::PrimitiveTopology::LineList);
        assert_eq!(PrimitiveMode::LineStrip.topology(), wgpu::PrimitiveTopology::LineStrip);
        assert_eq!(PrimitiveMode::Points.topology(), wgpu::PrimitiveTopology::PointList);
    }

    #[test]
    fn test_primitive_mode_cycles() {
        let mut mode = PrimitiveMode::Points;
        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, PrimitiveMode::Points);
    }
}
