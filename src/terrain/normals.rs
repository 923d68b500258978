//! Per-vertex normal smoothing over the heightfield.
//!
//! Each smoothed vertex takes the average of six face normals built from its
//! neighbors. Face normals are raw cross products (not normalized) and the
//! sum is divided by six without renormalizing, so on sloped terrain the
//! result is longer than one unit.

use glam::Vec3;

use super::grid::{GridKey, HeightFieldGrid};

/// Which vertices get a smoothed normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalBoundary {
    /// `1 <= x < size_x - 1`, `1 <= z < size_z - 1`. The last interior row
    /// and column are skipped, so the unsmoothed seam is wider on the far
    /// edges than on the near ones.
    #[default]
    Asymmetric,
    /// Every vertex that has all eight neighbors.
    Interior,
    /// Every vertex; neighbors are clamped into the grid and faces that
    /// collapse are left out of the average.
    ClampToEdge,
}

/// Neighbor offsets `(B, C)` of the six faces around a vertex `A`, all wound
/// the same way so that flat terrain yields `+Y`.
const FACES: [((i64, i64), (i64, i64)); 6] = [
    ((0, 1), (1, 0)),
    ((-1, 1), (0, 1)),
    ((-1, -1), (-1, 0)),
    ((1, 0), (1, -1)),
    ((1, -1), (0, -1)),
    ((0, -1), (-1, 0)),
];

/// Unnormalized face normal of triangle `a, b, c`.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Overwrite vertex normals in place. Returns how many vertices were smoothed.
///
/// Neighbor positions are read from a snapshot taken before any normal is
/// written, so the pass only depends on the fully built grid.
pub fn smooth_normals(grid: &mut HeightFieldGrid, boundary: NormalBoundary) -> usize {
    let size_x = grid.size_x();
    let size_z = grid.size_z();
    let row = size_x as usize + 1;
    let positions: Vec<Vec3> = grid
        .iter()
        .map(|(_, v)| Vec3::from_array(v.position))
        .collect();
    let position = |x: i64, z: i64| -> Vec3 {
        let x = x.clamp(0, size_x as i64) as usize;
        let z = z.clamp(0, size_z as i64) as usize;
        positions[z * row + x]
    };

    let (xs, zs) = match boundary {
        NormalBoundary::Asymmetric => (1..size_x.saturating_sub(1), 1..size_z.saturating_sub(1)),
        NormalBoundary::Interior => (1..size_x, 1..size_z),
        NormalBoundary::ClampToEdge => (0..size_x + 1, 0..size_z + 1),
    };

    let mut smoothed = 0;
    for z in zs {
        for x in xs.clone() {
            let (xi, zi) = (x as i64, z as i64);
            let a = position(xi, zi);

            let mut sum = Vec3::ZERO;
            let mut faces = 0;
            for ((bx, bz), (cx, cz)) in FACES {
                let n = face_normal(a, position(xi + bx, zi + bz), position(xi + cx, zi + cz));
                if n != Vec3::ZERO {
                    sum += n;
                    faces += 1;
                }
            }

            let normal = match boundary {
                NormalBoundary::ClampToEdge if faces == 0 => continue,
                NormalBoundary::ClampToEdge => sum / faces as f32,
                _ => sum / 6.0,
            };

            if let Some(vertex) = grid.get_mut(GridKey::new(x, z)) {
                vertex.normal = normal.to_array();
                smoothed += 1;
            }
        }
    }

    log::debug!("Smoothed {smoothed} normals ({boundary:?})");
    smoothed
}
