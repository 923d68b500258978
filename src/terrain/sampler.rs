//! Continuous height queries against a built heightfield.

use super::grid::HeightFieldGrid;
use crate::error::GeometryError;

/// Read-only height lookup in grid space.
///
/// The query point is located in its cell, then interpolated linearly over
/// whichever of the cell's two triangles contains it. The triangles match
/// the ones produced by [`triangulate`](super::mesh::triangulate), so the
/// returned height lies on the rendered surface.
#[derive(Debug, Clone, Copy)]
pub struct HeightSampler<'a> {
    grid: &'a HeightFieldGrid,
}

impl<'a> HeightSampler<'a> {
    pub fn new(grid: &'a HeightFieldGrid) -> Self {
        Self { grid }
    }

    /// Surface height at grid-space `(x, z)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] when the point is not finite or
    /// lies outside `[0, size_x] x [0, size_z]`.
    pub fn height_at(&self, x: f32, z: f32) -> Result<f32, GeometryError> {
        let size_x = self.grid.size_x();
        let size_z = self.grid.size_z();
        let out_of_range = GeometryError::OutOfRange {
            x,
            z,
            size_x,
            size_z,
        };

        if !x.is_finite() || !z.is_finite() {
            return Err(out_of_range);
        }
        if x < 0.0 || z < 0.0 || x > size_x as f32 || z > size_z as f32 {
            return Err(out_of_range);
        }

        let (low_x, x_delta) = cell_axis(x, size_x);
        let (low_z, z_delta) = cell_axis(z, size_z);
        let high_x = low_x + 1;
        let high_z = low_z + 1;

        // Exactly on a vertex: no interpolation
        let on_low_x = x_delta == 0.0;
        let on_high_x = x_delta == 1.0;
        let on_low_z = z_delta == 0.0;
        let on_high_z = z_delta == 1.0;
        if on_low_x && on_low_z {
            return self.grid.height(low_x, low_z);
        }
        if on_high_x && on_low_z {
            return self.grid.height(high_x, low_z);
        }
        if on_low_x && on_high_z {
            return self.grid.height(low_x, high_z);
        }
        if on_high_x && on_high_z {
            return self.grid.height(high_x, high_z);
        }

        let low_low = self.grid.height(low_x, low_z)?;
        let high_low = self.grid.height(high_x, low_z)?;
        let low_high = self.grid.height(low_x, high_z)?;
        let high_high = self.grid.height(high_x, high_z)?;

        let height = if z_delta > 1.0 - x_delta {
            // Upper triangle, measured back from the (high, high) corner
            high_high
                + (1.0 - x_delta) * (low_high - high_high)
                + (1.0 - z_delta) * (high_low - high_high)
        } else {
            low_low + x_delta * (high_low - low_low) + z_delta * (low_high - low_low)
        };

        Ok(height)
    }
}

/// Lower cell index and fractional offset along one axis.
///
/// A coordinate sitting on the far edge is attributed to the last cell with
/// an offset of 1 so the cell's high corner stays inside the grid.
fn cell_axis(value: f32, size: u32) -> (u32, f32) {
    let low = value.floor();
    if low >= size as f32 {
        (size - 1, 1.0)
    } else {
        (low as u32, value - low)
    }
}
