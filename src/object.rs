//! Module for handling complete volume sessions: a volume together with
//! its derived geometry and preallocated slice buffers.

use crate::affine::CoordinateTransform;
use crate::error::Result;
use crate::geometry::{min_world_corner, OffsetTable};
use crate::header::VolumeHeader;
use crate::orientation;
use crate::typedef::{Pixel, ScalarType};
use crate::util::is_gz_file;
use crate::volume::slice::SlicePlanes;
use crate::volume::{Axis, Volume};
use crate::writer::write_volume;
use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A fully initialized volume session: the owner of the sample buffer,
/// its geometric metadata, the derived offset table and coordinate
/// transform, and the three reusable slice buffers.
///
/// A store is built whole, either from a file or from an in-memory
/// volume; loading normalizes the volume's orientation, computes the
/// minimum-corner world origin and allocates the slice buffers once.
/// Subsequent queries reuse those allocations. Replacing the volume
/// means building a new store; a failed load leaves any previously held
/// store untouched.
///
/// The store is single-threaded and synchronous: no operation suspends
/// or blocks, and at most one logical caller is assumed.
#[derive(Debug, Clone)]
pub struct VolumeStore {
    volume: Volume,
    offsets: OffsetTable,
    transform: CoordinateTransform,
    planes: SlicePlanes,
}

impl VolumeStore {
    /// Load a volume file and initialize the full session around it:
    /// orientation normalization, geometry derivation and slice buffer
    /// allocation. Files ending in ".gz" are decoded as Gzip streams.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<VolumeStore> {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            VolumeStore::from_stream(GzDecoder::new(file))
        } else {
            VolumeStore::from_stream(file)
        }
    }

    /// Read a volume from a stream of data and initialize the session.
    pub fn from_stream<R: Read>(mut source: R) -> Result<VolumeStore> {
        let header = VolumeHeader::from_stream(&mut source)?;
        let volume = Volume::from_stream(source, &header)?;
        VolumeStore::from_volume(volume)
    }

    /// Initialize a session from an in-memory volume.
    ///
    /// The volume is reoriented to the canonical axis ordering, its
    /// origin is set to the minimum world corner found by scanning every
    /// voxel through the input affine, and the offset table, coordinate
    /// transform and slice buffers are derived from the result.
    ///
    /// # Errors
    ///
    /// - `VolumeError::NonOrthonormalDirection` if the volume's direction
    /// matrix cannot be mapped to a canonical axis assignment.
    pub fn from_volume(volume: Volume) -> Result<VolumeStore> {
        let input_dim = volume.dim();
        let input_transform = CoordinateTransform::new(&volume)?;
        let mut volume = orientation::normalize(volume)?;
        volume.set_origin(min_world_corner(input_dim, &input_transform));

        let offsets = OffsetTable::new(volume.dim());
        let transform = CoordinateTransform::new(&volume)?;
        let planes = SlicePlanes::new(volume.dim());
        Ok(VolumeStore {
            volume,
            offsets,
            transform,
            planes,
        })
    }

    /// Write the volume to a file (".miv" or ".miv.gz").
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_volume(path, &self.volume)
    }

    /// Obtain a reference to the owned volume.
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Get the dimensions of the volume.
    pub fn dim(&self) -> [u16; 3] {
        self.volume.dim()
    }

    /// Get the spacing of the volume, in world units per index step.
    pub fn spacing(&self) -> [f64; 3] {
        self.volume.spacing()
    }

    /// Get the minimum-corner world origin of the volume.
    pub fn origin(&self) -> [f64; 3] {
        self.volume.origin()
    }

    /// Get the direction matrix as a row-major array.
    pub fn direction(&self) -> [f64; 9] {
        self.volume.direction_rows()
    }

    /// Get the scalar type code of the volume samples.
    pub fn data_type(&self) -> ScalarType {
        self.volume.data_type()
    }

    /// Get the per-axis linear strides of the volume buffer.
    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Fetch a single voxel's value at the given index coordinates.
    pub fn voxel(&self, coords: [u16; 3]) -> Result<Pixel> {
        self.volume.voxel(coords)
    }

    /// Write a single voxel's value at the given index coordinates.
    pub fn set_voxel(&mut self, coords: [u16; 3], value: Pixel) -> Result<()> {
        self.volume.set_voxel(coords, value)
    }

    /// Fetch the value of the grid point nearest to the given world
    /// point. This is the engine's only sampling mode; no interpolation
    /// kernel is applied.
    ///
    /// # Errors
    ///
    /// - `VolumeError::OutOfBounds` if the nearest grid point falls
    /// outside the volume, propagated unchanged from the transform.
    pub fn voxel_at_world(&self, point: [f64; 3]) -> Result<Pixel> {
        let coords = self.transform.world_to_index(point)?;
        self.volume.voxel(coords)
    }

    /// Write the value of the grid point nearest to the given world
    /// point. Exactly one grid point is written; the value is not
    /// distributed across neighboring voxels.
    ///
    /// # Errors
    ///
    /// - `VolumeError::OutOfBounds` if the nearest grid point falls
    /// outside the volume, propagated unchanged from the transform.
    pub fn set_voxel_at_world(&mut self, point: [f64; 3], value: Pixel) -> Result<()> {
        let coords = self.transform.world_to_index(point)?;
        self.volume.set_voxel(coords, value)
    }

    /// Extract the cross-section at `slice_index` along `axis` into the
    /// axis's preallocated buffer and borrow it. The buffer is reused
    /// across calls; the borrow is invalidated by the next extraction
    /// along the same axis.
    pub fn slice(&mut self, axis: Axis, slice_index: u16) -> Result<&[Pixel]> {
        self.planes
            .extract(&self.volume, &self.offsets, axis, slice_index)
    }

    /// The `(columns, rows)` shape of slices along the given axis.
    pub fn slice_dim(&self, axis: Axis) -> (u16, u16) {
        SlicePlanes::plane_dim(self.volume.dim(), axis)
    }

    /// Map index coordinates to the world coordinate of that grid point.
    pub fn index_to_world(&self, index: [u16; 3]) -> [f64; 3] {
        self.transform.index_to_world(index)
    }

    /// Map a world point to the index coordinates of the nearest grid
    /// point, failing with `VolumeError::OutOfBounds` if it falls outside
    /// the volume.
    pub fn world_to_index(&self, point: [f64; 3]) -> Result<[u16; 3]> {
        self.transform.world_to_index(point)
    }
}
