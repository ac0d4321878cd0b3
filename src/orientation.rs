//! Orientation normalization: physically reordering a volume so that its
//! index axes line up with the canonical world axes.
//!
//! A freshly loaded volume may store its axes in any order and with either
//! sign. Downstream operations rely on linear-stride arithmetic over a
//! contiguous, canonically ordered buffer, so the normalizer copies the
//! samples into that order instead of merely re-viewing them.

use crate::affine::CoordinateTransform;
use crate::error::{Result, VolumeError};
use crate::geometry::OffsetTable;
use crate::volume::Volume;
use nalgebra::Matrix3;

const DIRECTION_TOLERANCE: f64 = 1e-6;

/// How each canonical axis is produced from the input volume: the source
/// index axis it comes from, and whether that axis must be reversed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct AxisMap {
    source: [usize; 3],
    flip: [bool; 3],
}

impl AxisMap {
    fn is_identity(&self) -> bool {
        self.source == [0, 1, 2] && self.flip == [false; 3]
    }
}

/// Determine, per index axis, the world axis it most nearly aligns to,
/// including sign. Fails when the direction matrix is not orthonormal or
/// when two index axes claim the same world axis.
fn axis_map(direction: &Matrix3<f64>) -> Result<AxisMap> {
    for j in 0..3 {
        let col = direction.column(j);
        if (col.norm() - 1.).abs() > DIRECTION_TOLERANCE {
            return Err(VolumeError::NonOrthonormalDirection);
        }
        for i in (j + 1)..3 {
            if col.dot(&direction.column(i)).abs() > DIRECTION_TOLERANCE {
                return Err(VolumeError::NonOrthonormalDirection);
            }
        }
    }

    let mut world_of = [0usize; 3];
    let mut negative = [false; 3];
    for j in 0..3 {
        let col = direction.column(j);
        let mut best = 0;
        for i in 1..3 {
            if col[i].abs() > col[best].abs() {
                best = i;
            }
        }
        world_of[j] = best;
        negative[j] = col[best] < 0.;
    }

    // each world axis must be claimed by exactly one index axis
    let mut claimed = [false; 3];
    for w in &world_of {
        if claimed[*w] {
            return Err(VolumeError::NonOrthonormalDirection);
        }
        claimed[*w] = true;
    }

    let mut source = [0usize; 3];
    let mut flip = [false; 3];
    for j in 0..3 {
        source[world_of[j]] = j;
        flip[world_of[j]] = negative[j];
    }
    Ok(AxisMap { source, flip })
}

/// Reorient a volume to the canonical axis ordering, physically copying
/// the sample buffer. The output volume's direction matrix is the
/// identity; its dimensions and spacing are permuted consistently, and
/// its origin is the world position of the voxel that lands at index
/// (0, 0, 0), under the input volume's affine.
///
/// Normalization is idempotent: a volume that is already canonical is
/// returned unchanged.
///
/// # Errors
///
/// - `VolumeError::NonOrthonormalDirection` if the direction matrix
/// cannot be mapped to a canonical axis assignment.
pub fn normalize(volume: Volume) -> Result<Volume> {
    let map = axis_map(volume.direction())?;
    if map.is_identity() && *volume.direction() == Matrix3::identity() {
        return Ok(volume);
    }

    let dim = volume.dim();
    let spacing = volume.spacing();
    let mut new_dim = [0u16; 3];
    let mut new_spacing = [0f64; 3];
    for a in 0..3 {
        new_dim[a] = dim[map.source[a]];
        new_spacing[a] = spacing[map.source[a]];
    }

    let transform = CoordinateTransform::new(&volume)?;
    let mut corner = [0u16; 3];
    for a in 0..3 {
        if map.flip[a] {
            corner[map.source[a]] = dim[map.source[a]] - 1;
        }
    }
    let origin = transform.index_to_world(corner);

    let strides = OffsetTable::new(dim);
    let src = volume.raw_data();
    let mut buffer = Vec::with_capacity(src.len());
    for k in 0..new_dim[2] {
        for j in 0..new_dim[1] {
            for i in 0..new_dim[0] {
                let new_idx = [i, j, k];
                let mut old = [0u16; 3];
                for a in 0..3 {
                    let s = map.source[a];
                    old[s] = if map.flip[a] {
                        dim[s] - 1 - new_idx[a]
                    } else {
                        new_idx[a]
                    };
                }
                buffer.push(src[strides.offset(old)]);
            }
        }
    }

    Volume::new(new_dim, new_spacing, origin, Matrix3::identity(), buffer)
}
