//! Crate-level error type and result alias.

use crate::typedef::ScalarType;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all operations of the slicing engine.
    ///
    /// Every variant is recoverable by the caller: a failed operation
    /// never leaves a volume or slice buffer partially overwritten.
    #[derive(Debug)]
    pub enum VolumeError {
        /// Read an invalid or corrupted volume file
        InvalidFormat {
            display("Invalid volume file")
        }
        /// The direction matrix could not be mapped to a canonical
        /// axis assignment
        NonOrthonormalDirection {
            display("Direction matrix is not orthonormal")
        }
        /// Attempted to access the volume outside its boundaries
        OutOfBounds(coords: Vec<i64>) {
            display("Out of bounds access to volume at {:?}", coords)
        }
        /// The file's scalar type is not the one this build supports
        UnsupportedDataType(t: ScalarType) {
            display("Unsupported scalar type {:?}", t)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("{}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, VolumeError>;
