//! Axis-aligned slice extraction into preallocated 2-D buffers.

use crate::error::{Result, VolumeError};
use crate::geometry::OffsetTable;
use crate::typedef::Pixel;
use crate::volume::{Axis, Volume};

/// One preallocated 2-D buffer per canonical axis.
///
/// Each plane is sized to the product of the two dimensions not selected
/// by its axis, allocated once when the store is initialized and
/// overwritten in place on every slice request. Repeated interactive
/// slicing therefore never allocates.
#[derive(Debug, PartialEq, Clone)]
pub struct SlicePlanes {
    planes: [Vec<Pixel>; 3],
}

impl SlicePlanes {
    /// Allocate the three slice buffers for a volume of the given
    /// dimensions.
    pub fn new(dim: [u16; 3]) -> Self {
        let mut planes: [Vec<Pixel>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for axis in &Axis::ALL {
            let (d0, d1) = Self::plane_dim(dim, *axis);
            planes[axis.index()] = vec![0; d0 as usize * d1 as usize];
        }
        SlicePlanes { planes }
    }

    /// The `(columns, rows)` shape of the plane for the given axis.
    pub fn plane_dim(dim: [u16; 3], axis: Axis) -> (u16, u16) {
        let (col, row) = axis.others();
        (dim[col.index()], dim[row.index()])
    }

    /// Borrow the plane buffer for the given axis, holding whatever the
    /// most recent extraction along that axis produced.
    pub fn plane(&self, axis: Axis) -> &[Pixel] {
        &self.planes[axis.index()]
    }

    /// Copy the cross-section of `volume` at `slice_index` along `axis`
    /// into this plane's buffer, and borrow the result.
    ///
    /// The copy uses only offset-table arithmetic: starting from
    /// `slice_index * stride[axis]`, the outer loop advances by the row
    /// axis stride and the inner loop by the column axis stride, filling
    /// the plane sequentially in row-major order.
    ///
    /// # Errors
    ///
    /// - `VolumeError::OutOfBounds` if `slice_index` is not below the
    /// volume's dimension along `axis`. The plane buffer is left
    /// untouched in that case.
    pub fn extract(
        &mut self,
        volume: &Volume,
        offsets: &OffsetTable,
        axis: Axis,
        slice_index: u16,
    ) -> Result<&[Pixel]> {
        let dim = volume.dim();
        if slice_index >= dim[axis.index()] {
            return Err(VolumeError::OutOfBounds(vec![i64::from(slice_index)]));
        }
        let (col, row) = axis.others();
        let col_size = dim[col.index()] as usize;
        let row_size = dim[row.index()] as usize;
        let col_stride = offsets.stride(col);
        let row_stride = offsets.stride(row);

        let src = volume.raw_data();
        let dest = &mut self.planes[axis.index()];
        debug_assert_eq!(dest.len(), col_size * row_size);

        let mut out = 0;
        let mut row_offset = slice_index as usize * offsets.stride(axis);
        for _ in 0..row_size {
            let mut offset = row_offset;
            for _ in 0..col_size {
                dest[out] = src[offset];
                out += 1;
                offset += col_stride;
            }
            row_offset += row_stride;
        }
        Ok(&self.planes[axis.index()])
    }
}
