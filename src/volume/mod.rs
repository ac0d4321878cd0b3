//! This module defines the in-memory voxel volume and its geometric
//! metadata, along with the canonical axis enumeration used throughout
//! the engine. Slice extraction lives in the [`slice`] submodule.

pub mod slice;

#[cfg(feature = "ndarray_volumes")]
pub mod ndarray;

use crate::error::{Result, VolumeError};
use crate::geometry::coords_to_offset;
use crate::header::VolumeHeader;
use crate::typedef::{Pixel, ScalarType, PIXEL_TYPE};
use byteordered::ByteOrdered;
use nalgebra::Matrix3;
use std::io::Read;

/// One of the three canonical index axes of a normalized volume.
///
/// This replaces name-keyed axis lookup: axis names from callers are
/// resolved once through [`Axis::from_name`], and everything downstream
/// is indexed by the enum.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Axis {
    /// First (fastest-varying) index axis.
    X = 0,
    /// Second index axis.
    Y = 1,
    /// Third (slowest-varying) index axis.
    Z = 2,
}

impl Axis {
    /// All three axes, in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Resolve an axis from its conventional name. Accepts the single
    /// letter forms (`"x"`) as well as the `"xspace"` style names used
    /// by volume viewers.
    pub fn from_name(name: &str) -> Option<Axis> {
        match name {
            "x" | "X" | "xspace" => Some(Axis::X),
            "y" | "Y" | "yspace" => Some(Axis::Y),
            "z" | "Z" | "zspace" => Some(Axis::Z),
            _ => None,
        }
    }

    /// The position of this axis in dimension and stride arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The two remaining axes as `(column, row)`: the lower-numbered
    /// axis varies fastest within an extracted slice, the higher-numbered
    /// one advances between rows.
    pub fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// A 3-D scalar volume held in memory, with its geometric metadata.
///
/// The sample buffer is flat, with the first axis varying fastest.
/// Construction validates the buffer length against the dimensions and
/// requires strictly positive dimensions and spacing. Geometry fields do
/// not change after the volume is built, except for the origin update
/// performed during store initialization; voxel values may be modified
/// through the checked accessors.
#[derive(Debug, PartialEq, Clone)]
pub struct Volume {
    dim: [u16; 3],
    spacing: [f64; 3],
    origin: [f64; 3],
    direction: Matrix3<f64>,
    buffer: Vec<Pixel>,
}

impl Volume {
    /// Build a volume from raw parts, validating the data model
    /// invariants.
    ///
    /// # Errors
    ///
    /// - `VolumeError::InvalidFormat` if any dimension or spacing
    /// component is not strictly positive, or if the buffer length does
    /// not match the dimension product.
    pub fn new(
        dim: [u16; 3],
        spacing: [f64; 3],
        origin: [f64; 3],
        direction: Matrix3<f64>,
        buffer: Vec<Pixel>,
    ) -> Result<Self> {
        if dim.iter().any(|d| *d == 0) {
            return Err(VolumeError::InvalidFormat);
        }
        if spacing.iter().any(|s| !(*s > 0.)) {
            return Err(VolumeError::InvalidFormat);
        }
        let count = dim.iter().map(|d| *d as usize).product::<usize>();
        if buffer.len() != count {
            return Err(VolumeError::InvalidFormat);
        }
        Ok(Volume {
            dim,
            spacing,
            origin,
            direction,
            buffer,
        })
    }

    /// Read a volume's sample payload from a stream of data, using the
    /// already decoded header for the geometry and the expected sample
    /// count. It is expected that the stream is positioned at the first
    /// voxel.
    pub fn from_stream<R: Read>(source: R, header: &VolumeHeader) -> Result<Self> {
        header.validate()?;
        let count = header
            .dim
            .iter()
            .map(|d| *d as usize)
            .product::<usize>();
        let mut source = ByteOrdered::le(source);
        let mut buffer = Vec::with_capacity(count);
        for _ in 0..count {
            buffer.push(source.read_u16()?);
        }
        Volume::new(
            header.dim,
            header.spacing,
            header.origin,
            header.direction_matrix(),
            buffer,
        )
    }

    /// Get the dimensions of the volume.
    pub fn dim(&self) -> [u16; 3] {
        self.dim
    }

    /// Get the spacing of the volume, in world units per index step.
    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    /// Get the world coordinate of index (0, 0, 0).
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    pub(crate) fn set_origin(&mut self, origin: [f64; 3]) {
        self.origin = origin;
    }

    /// Get the direction matrix mapping index-axis unit vectors to
    /// world-axis unit vectors.
    pub fn direction(&self) -> &Matrix3<f64> {
        &self.direction
    }

    /// Get the direction matrix flattened to a row-major array.
    pub fn direction_rows(&self) -> [f64; 9] {
        let mut rows = [0f64; 9];
        for r in 0..3 {
            for c in 0..3 {
                rows[r * 3 + c] = self.direction[(r, c)];
            }
        }
        rows
    }

    /// Get this volume's scalar type code.
    pub fn data_type(&self) -> ScalarType {
        PIXEL_TYPE
    }

    /// The total number of voxels in the volume.
    pub fn element_count(&self) -> usize {
        self.buffer.len()
    }

    /// Retrieve a reference to the sample buffer.
    pub fn raw_data(&self) -> &[Pixel] {
        &self.buffer
    }

    /// Retrieve a mutable reference to the sample buffer.
    pub fn raw_data_mut(&mut self) -> &mut [Pixel] {
        &mut self.buffer
    }

    /// Fetch a single voxel's value at the given index coordinates.
    ///
    /// # Errors
    ///
    /// - `VolumeError::OutOfBounds` if the given coordinates surpass this
    /// volume's boundaries.
    pub fn voxel(&self, coords: [u16; 3]) -> Result<Pixel> {
        let offset = coords_to_offset(coords, self.dim)?;
        Ok(self.buffer[offset])
    }

    /// Write a single voxel's value at the given index coordinates.
    ///
    /// # Errors
    ///
    /// - `VolumeError::OutOfBounds` if the given coordinates surpass this
    /// volume's boundaries. The buffer is left unmodified in that case.
    pub fn set_voxel(&mut self, coords: [u16; 3], value: Pixel) -> Result<()> {
        let offset = coords_to_offset(coords, self.dim)?;
        self.buffer[offset] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, Volume};
    use nalgebra::Matrix3;

    fn small_volume() -> Volume {
        Volume::new(
            [2, 2, 2],
            [1., 1., 1.],
            [0., 0., 0.],
            Matrix3::identity(),
            (0..8).collect(),
        )
        .unwrap()
    }

    #[test]
    fn axis_names() {
        assert_eq!(Axis::from_name("xspace"), Some(Axis::X));
        assert_eq!(Axis::from_name("y"), Some(Axis::Y));
        assert_eq!(Axis::from_name("Z"), Some(Axis::Z));
        assert_eq!(Axis::from_name("tspace"), None);
    }

    #[test]
    fn axis_others_convention() {
        assert_eq!(Axis::X.others(), (Axis::Y, Axis::Z));
        assert_eq!(Axis::Y.others(), (Axis::X, Axis::Z));
        assert_eq!(Axis::Z.others(), (Axis::X, Axis::Y));
    }

    #[test]
    fn construction_invariants() {
        assert!(Volume::new(
            [2, 2, 2],
            [1., 1., 1.],
            [0., 0., 0.],
            Matrix3::identity(),
            vec![0; 7],
        )
        .is_err());
        assert!(Volume::new(
            [2, 0, 2],
            [1., 1., 1.],
            [0., 0., 0.],
            Matrix3::identity(),
            vec![0; 0],
        )
        .is_err());
        assert!(Volume::new(
            [2, 2, 2],
            [1., -1., 1.],
            [0., 0., 0.],
            Matrix3::identity(),
            vec![0; 8],
        )
        .is_err());
    }

    #[test]
    fn direction_row_major_flattening() {
        let direction = Matrix3::new(
            0., 0., 1., //
            -1., 0., 0., //
            0., -1., 0.,
        );
        let vol = Volume::new(
            [1, 1, 1],
            [1., 1., 1.],
            [0., 0., 0.],
            direction,
            vec![0],
        )
        .unwrap();
        assert_eq!(
            vol.direction_rows(),
            [0., 0., 1., -1., 0., 0., 0., -1., 0.]
        );
    }

    #[test]
    fn voxel_access() {
        let mut vol = small_volume();
        assert_eq!(vol.voxel([1, 0, 0]).unwrap(), 1);
        assert_eq!(vol.voxel([0, 1, 0]).unwrap(), 2);
        assert_eq!(vol.voxel([0, 0, 1]).unwrap(), 4);
        assert!(vol.voxel([2, 0, 0]).is_err());

        vol.set_voxel([1, 0, 0], 99).unwrap();
        assert_eq!(vol.voxel([1, 0, 0]).unwrap(), 99);
        assert!(vol.set_voxel([0, 0, 2], 1).is_err());
        assert_eq!(vol.voxel([0, 0, 1]).unwrap(), 4);
    }
}
