//! Integration with `ndarray`, enabled by the `ndarray_volumes` feature.
//! Volumes and extracted slices can be copied into owned arrays for
//! further processing.

use crate::error::Result;
use crate::object::VolumeStore;
use crate::typedef::Pixel;
use crate::volume::{Axis, Volume};
use ndarray::{Array2, Array3, ShapeBuilder};

impl Volume {
    /// Copy this volume's samples into a 3-D array of shape
    /// `(dim[0], dim[1], dim[2])`. The buffer is first-axis fastest, so
    /// the array is built in column-major (Fortran) layout.
    pub fn to_ndarray(&self) -> Array3<Pixel> {
        let [dx, dy, dz] = self.dim();
        Array3::from_shape_vec(
            (dx as usize, dy as usize, dz as usize).f(),
            self.raw_data().to_vec(),
        )
        .expect("Inconsistent raw data size")
    }
}

impl VolumeStore {
    /// Extract the cross-section at `slice_index` along `axis` and copy
    /// it into a 2-D array of shape `(rows, columns)`.
    pub fn slice_ndarray(&mut self, axis: Axis, slice_index: u16) -> Result<Array2<Pixel>> {
        let (cols, rows) = self.slice_dim(axis);
        let data = self.slice(axis, slice_index)?.to_vec();
        Ok(Array2::from_shape_vec((rows as usize, cols as usize), data)
            .expect("Inconsistent slice buffer size"))
    }
}
