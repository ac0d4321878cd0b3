//! Affine coordinate transforms between index space and physical
//! (world) space.

use crate::error::{Result, VolumeError};
use crate::volume::Volume;
use nalgebra::{Matrix3, Vector3};

/// A bidirectional map between voxel index coordinates and world
/// coordinates, derived from a volume's origin, spacing and direction.
///
/// The transform is stateless with respect to the volume's samples; it is
/// rebuilt whenever the volume is replaced. The forward map is
/// `world = origin + direction * (spacing .* index)`; the inverse applies
/// the inverted direction matrix, divides out the spacing per axis and
/// rounds each coordinate half away from zero for grid lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransform {
    origin: Vector3<f64>,
    spacing: Vector3<f64>,
    direction: Matrix3<f64>,
    inverse: Matrix3<f64>,
    dim: [u16; 3],
}

impl CoordinateTransform {
    /// Derive the transform for the given volume.
    ///
    /// # Errors
    ///
    /// - `VolumeError::NonOrthonormalDirection` if the volume's direction
    /// matrix is singular.
    pub fn new(volume: &Volume) -> Result<Self> {
        let direction = *volume.direction();
        let inverse = direction
            .try_inverse()
            .ok_or(VolumeError::NonOrthonormalDirection)?;
        Ok(CoordinateTransform {
            origin: Vector3::from(volume.origin()),
            spacing: Vector3::from(volume.spacing()),
            direction,
            inverse,
            dim: volume.dim(),
        })
    }

    /// Map index coordinates to the world coordinate of that grid point.
    /// This is the exact affine map, with no rounding involved.
    pub fn index_to_world(&self, index: [u16; 3]) -> [f64; 3] {
        let index = Vector3::new(
            f64::from(index[0]),
            f64::from(index[1]),
            f64::from(index[2]),
        );
        let world = self.origin + self.direction * index.component_mul(&self.spacing);
        [world.x, world.y, world.z]
    }

    /// Map a world point to the index coordinates of the nearest grid
    /// point.
    ///
    /// Each axis is rounded half away from zero. The transform never
    /// clamps: a point whose nearest grid coordinate falls outside
    /// `[0, dim - 1]` on any axis is rejected.
    ///
    /// # Errors
    ///
    /// - `VolumeError::OutOfBounds` if the resulting index is outside the
    /// volume.
    pub fn world_to_index(&self, point: [f64; 3]) -> Result<[u16; 3]> {
        let point = Vector3::from(point);
        let index = (self.inverse * (point - self.origin)).component_div(&self.spacing);
        let rounded = [
            index.x.round(),
            index.y.round(),
            index.z.round(),
        ];
        let in_range = rounded
            .iter()
            .zip(&self.dim)
            .all(|(c, d)| *c >= 0. && *c <= f64::from(*d - 1));
        if !in_range {
            return Err(VolumeError::OutOfBounds(
                rounded.iter().map(|c| *c as i64).collect(),
            ));
        }
        Ok([rounded[0] as u16, rounded[1] as u16, rounded[2] as u16])
    }
}
