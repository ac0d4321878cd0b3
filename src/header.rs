//! This module defines the `VolumeHeader` struct, which carries the
//! geometric metadata of a volume file: scalar type code, dimensions,
//! spacing, origin and direction matrix. The header precedes the sample
//! payload on disk; all fields are stored little-endian.

use crate::error::{Result, VolumeError};
use crate::typedef::{ScalarType, PIXEL_TYPE};
use crate::util::is_gz_file;
use crate::volume::Volume;
use byteordered::ByteOrdered;
use flate2::bufread::GzDecoder;
use nalgebra::Matrix3;
use num_traits::FromPrimitive;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Magic code opening a volume file (extension ".miv[.gz]").
pub const MAGIC_CODE: &[u8; 4] = b"MIV\0";

/// The on-disk volume header.
///
/// # Examples
///
/// ```no_run
/// use volslice::VolumeHeader;
/// # use volslice::Result;
///
/// # fn run() -> Result<()> {
/// let hdr = VolumeHeader::from_file("t1.miv.gz")?;
/// assert_eq!(hdr.datatype, 512);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeHeader {
    /// Scalar type code of the samples (NIfTI-compatible assignment)
    pub datatype: i16,
    /// Volume dimensions, first axis fastest-varying
    pub dim: [u16; 3],
    /// Grid spacing, in world units per index step
    pub spacing: [f64; 3],
    /// World coordinate of index (0, 0, 0)
    pub origin: [f64; 3],
    /// Direction matrix, row-major
    pub direction: [f64; 9],
}

impl VolumeHeader {
    /// Retrieve a volume header from a file. If the file name ends with
    /// ".gz", the stream is decoded as a Gzip stream first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<VolumeHeader> {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            VolumeHeader::from_stream(GzDecoder::new(file))
        } else {
            VolumeHeader::from_stream(file)
        }
    }

    /// Read a volume header from a stream of data.
    ///
    /// # Errors
    ///
    /// - `VolumeError::InvalidFormat` if the magic code does not match.
    pub fn from_stream<R: Read>(mut source: R) -> Result<VolumeHeader> {
        let mut magic = [0u8; 4];
        source.read_exact(&mut magic)?;
        if &magic != MAGIC_CODE {
            return Err(VolumeError::InvalidFormat);
        }

        let mut source = ByteOrdered::le(source);
        let datatype = source.read_i16()?;
        let mut dim = [0u16; 3];
        for d in &mut dim {
            *d = source.read_u16()?;
        }
        let mut spacing = [0f64; 3];
        for s in &mut spacing {
            *s = source.read_f64()?;
        }
        let mut origin = [0f64; 3];
        for o in &mut origin {
            *o = source.read_f64()?;
        }
        let mut direction = [0f64; 9];
        for v in &mut direction {
            *v = source.read_f64()?;
        }

        Ok(VolumeHeader {
            datatype,
            dim,
            spacing,
            origin,
            direction,
        })
    }

    /// Build the header describing the given in-memory volume.
    pub fn from_volume(volume: &Volume) -> VolumeHeader {
        VolumeHeader {
            datatype: volume.data_type() as i16,
            dim: volume.dim(),
            spacing: volume.spacing(),
            origin: volume.origin(),
            direction: volume.direction_rows(),
        }
    }

    /// Decode this header's scalar type code.
    ///
    /// # Errors
    ///
    /// - `VolumeError::InvalidFormat` if the code is not a known scalar
    /// type.
    pub fn data_type(&self) -> Result<ScalarType> {
        ScalarType::from_i16(self.datatype).ok_or(VolumeError::InvalidFormat)
    }

    /// Check that this header describes a volume the engine can hold:
    /// positive dimensions and spacing, and the build's pixel type.
    ///
    /// # Errors
    ///
    /// - `VolumeError::InvalidFormat` on non-positive dimensions or
    /// spacing, or an unknown scalar code.
    /// - `VolumeError::UnsupportedDataType` if the scalar type is valid
    /// but not the one this build was configured for.
    pub fn validate(&self) -> Result<()> {
        if self.dim.iter().any(|d| *d == 0) {
            return Err(VolumeError::InvalidFormat);
        }
        if self.spacing.iter().any(|s| !(*s > 0.)) {
            return Err(VolumeError::InvalidFormat);
        }
        let datatype = self.data_type()?;
        if datatype != PIXEL_TYPE {
            return Err(VolumeError::UnsupportedDataType(datatype));
        }
        Ok(())
    }

    /// The direction matrix as a nalgebra matrix.
    pub fn direction_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_row_slice(&self.direction)
    }
}
