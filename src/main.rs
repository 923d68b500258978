use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec3;

use terrascene::gpu::{self, GpuMesh};
use terrascene::scene::Scene;
use terrascene::terrain::{NormalBoundary, Variation};
use terrascene::vertex::write_vertex_dump;
use terrascene::SceneConfig;

#[derive(Parser, Debug)]
#[command(name = "terrascene")]
#[command(about = "Procedural terrain and primitive mesh generator")]
struct Args {
    /// Terrain cells along X
    #[arg(long, default_value = "50")]
    size_x: u32,

    /// Terrain cells along Z
    #[arg(long, default_value = "50")]
    size_z: u32,

    /// Cells a texture spans before repeating
    #[arg(long, default_value = "10.0")]
    uv_tiling: f32,

    /// Perlin noise seed
    #[arg(long, default_value = "42069")]
    seed: u32,

    /// Seed for the random height variation (fresh each run if omitted)
    #[arg(long, conflicts_with = "no_variation")]
    variation_seed: Option<u64>,

    /// Use noise heights only
    #[arg(long)]
    no_variation: bool,

    /// Which vertices get smoothed normals
    #[arg(long, value_enum, default_value_t = Boundary::Asymmetric)]
    boundary: Boundary,

    #[arg(long, default_value = "1.0")]
    sphere_radius: f32,

    #[arg(long, default_value = "0.5")]
    sphere_offset: f32,

    #[arg(long, default_value = "16")]
    sphere_radial: u32,

    #[arg(long, default_value = "16")]
    sphere_vertical: u32,

    /// World-space point to report the ground height at, as `x,z`
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    probe: Vec<(f32, f32)>,

    /// Write the raw terrain vertex stream to this file
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Upload every mesh to a headless GPU device
    #[arg(long)]
    upload: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Boundary {
    Asymmetric,
    Interior,
    Clamp,
}

impl From<Boundary> for NormalBoundary {
    fn from(b: Boundary) -> Self {
        match b {
            Boundary::Asymmetric => NormalBoundary::Asymmetric,
            Boundary::Interior => NormalBoundary::Interior,
            Boundary::Clamp => NormalBoundary::ClampToEdge,
        }
    }
}

fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, z) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,z but got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let z = z.trim().parse().map_err(|e| format!("bad z in '{s}': {e}"))?;
    Ok((x, z))
}

impl Args {
    fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig::default();

        config.terrain.size_x = self.size_x;
        config.terrain.size_z = self.size_z;
        config.terrain.uv_tiling = self.uv_tiling;
        config.terrain.noise_seed = self.seed;
        config.terrain.boundary = self.boundary.into();
        config.terrain.height.variation = match (self.no_variation, self.variation_seed) {
            (true, _) => Variation::Disabled,
            (false, Some(seed)) => Variation::Seeded(seed),
            (false, None) => Variation::Entropy,
        };

        config.sphere.radius = self.sphere_radius;
        config.sphere.height_offset = self.sphere_offset;
        config.sphere.radial_subdivisions = self.sphere_radial;
        config.sphere.vertical_subdivisions = self.sphere_vertical;

        config
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.scene_config();

    let mut scene = Scene::new(&config).context("Failed to build scene")?;

    let terrain = scene.terrain();
    println!(
        "Generated terrain: {}x{}, {} grid vertices, height range: {:?}",
        terrain.size_x(),
        terrain.size_z(),
        terrain.grid().len(),
        terrain.grid().height_bounds()
    );
    println!("Terrain mesh: {} vertices", terrain.vertex_count());

    for object in scene.objects() {
        println!(
            "  {:<6} at ({:.2}, {:.2}, {:.2}): {} vertices",
            object.shape.name(),
            object.position.x,
            object.position.y,
            object.position.z,
            object.shape.vertex_count()
        );
    }

    for &(x, z) in &args.probe {
        match terrain.ground_height(x, z) {
            Ok(h) => {
                let camera = scene.resolve_camera(Vec3::new(x, h, z));
                println!("Ground at ({x}, {z}): {h:.4}, camera rests at y = {:.4}", camera.y);
            }
            Err(e) => println!("Ground at ({x}, {z}): {e}"),
        }
    }

    if let Some(path) = &args.dump {
        let stream = terrain.stream().context("Terrain stream already released")?;
        let bytes = write_vertex_dump(path, stream)?;
        println!("Wrote {} bytes to {}", bytes, path.display());
    }

    if args.upload {
        upload_scene(&mut scene)?;
    }

    Ok(())
}

fn upload_scene(scene: &mut Scene) -> Result<()> {
    let (device, _queue) = pollster::block_on(gpu::headless_device())?;

    let mut meshes = Vec::new();

    // Wireframe indexes the grid before the triangle stream is released
    let terrain = scene.terrain();
    meshes.extend(GpuMesh::upload_wireframe(
        &device,
        "Terrain Wireframe",
        terrain.grid().vertices(),
        &terrain.wireframe_indices(),
    ));

    let stream = scene.terrain_mut().take_stream().unwrap_or_default();
    meshes.extend(GpuMesh::upload(&device, "Terrain", &stream));
    drop(stream);

    for object in scene.objects() {
        let vertices = object.shape.vertices()?;
        meshes.extend(GpuMesh::upload(&device, object.shape.name(), &vertices));
    }

    let total: u64 = meshes.iter().map(|m| m.size()).sum();
    println!("Uploaded {} meshes, {} bytes", meshes.len(), total);
    for mesh in &meshes {
        log::debug!(
            "{:?}: {} vertices, {:?} indices",
            mesh.mode().topology(),
            mesh.vertex_count(),
            mesh.index_count()
        );
    }

    Ok(())
}
