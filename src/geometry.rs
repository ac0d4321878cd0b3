//! Derived geometry: per-axis linear strides and the minimum-corner
//! world origin computation.

use crate::affine::CoordinateTransform;
use crate::error::{Result, VolumeError};
use crate::volume::Axis;

/// Per-axis linear strides of a volume buffer, in elements.
///
/// The first axis varies fastest, so `stride[0] == 1` and
/// `stride[i] == stride[i - 1] * dim[i - 1]`. The table is recomputed
/// when a volume is loaded or normalized, never on plain voxel writes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct OffsetTable {
    strides: [usize; 3],
}

impl OffsetTable {
    /// Compute the offset table for a volume of the given dimensions.
    pub fn new(dim: [u16; 3]) -> Self {
        let mut strides = [1; 3];
        for i in 1..3 {
            strides[i] = strides[i - 1] * dim[i - 1] as usize;
        }
        OffsetTable { strides }
    }

    /// Retrieve all three strides, in axis order.
    pub fn strides(&self) -> [usize; 3] {
        self.strides
    }

    /// The number of buffer elements to advance to move one step along
    /// the given axis.
    pub fn stride(&self, axis: Axis) -> usize {
        self.strides[axis.index()]
    }

    /// The linear buffer offset of the given index coordinates. The
    /// coordinates are not bounds-checked; see [`coords_to_offset`] for
    /// the checked form.
    pub fn offset(&self, coords: [u16; 3]) -> usize {
        coords
            .iter()
            .zip(&self.strides)
            .map(|(c, s)| *c as usize * *s)
            .sum()
    }
}

/// Calculate the linear buffer offset of the given index coordinates,
/// checking them against the volume dimensions.
///
/// # Errors
///
/// - `VolumeError::OutOfBounds` if any coordinate reaches or surpasses
/// its dimension.
pub fn coords_to_offset(coords: [u16; 3], dim: [u16; 3]) -> Result<usize> {
    if !coords.iter().zip(&dim).all(|(c, d)| c < d) {
        return Err(VolumeError::OutOfBounds(
            coords.iter().map(|c| i64::from(*c)).collect(),
        ));
    }
    Ok(OffsetTable::new(dim).offset(coords))
}

/// Scan every voxel index of a volume with the given dimensions through
/// the given affine transform and return the componentwise minimum of the
/// visited world points.
///
/// A direction matrix with negative components can place the minimum
/// world corner at any of the volume's eight geometric corners, so the
/// full scan is used as the always-correct way to find it.
pub fn min_world_corner(dim: [u16; 3], transform: &CoordinateTransform) -> [f64; 3] {
    let mut min = transform.index_to_world([0, 0, 0]);
    for k in 0..dim[2] {
        for j in 0..dim[1] {
            for i in 0..dim[0] {
                let p = transform.index_to_world([i, j, k]);
                for a in 0..3 {
                    min[a] = min[a].min(p[a]);
                }
            }
        }
    }
    min
}
