//! Interactive access and slicing engine for 3-D medical image volumes.
//!
//! This crate provides allocation-light access into a scalar volume:
//! voxel reads and writes by index or by world coordinate, coordinate
//! transforms between index space and physical space, and axis-aligned
//! cross-section extraction into preallocated slice buffers. Volumes are
//! normalized to a canonical axis orientation on load, so that axis-indexed
//! operations have a fixed meaning regardless of how the source file stored
//! its axes.
//!
//! The usual entry point is [`VolumeStore`], which owns the volume together
//! with its derived geometry and slice buffers:
//!
//! ```no_run
//! use volslice::{Axis, VolumeStore};
//! # use volslice::Result;
//!
//! # fn run() -> Result<()> {
//! let mut store = VolumeStore::load_from("t1.miv.gz")?;
//! let axial = store.slice(Axis::Z, 42)?;
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate num_derive;

pub mod affine;
pub mod error;
pub mod geometry;
pub mod header;
pub mod object;
pub mod orientation;
pub mod typedef;
pub mod volume;
pub mod writer;
mod util;

pub use crate::affine::CoordinateTransform;
pub use crate::error::{Result, VolumeError};
pub use crate::geometry::OffsetTable;
pub use crate::header::VolumeHeader;
pub use crate::object::VolumeStore;
pub use crate::typedef::{Pixel, ScalarType, PIXEL_TYPE};
pub use crate::volume::slice::SlicePlanes;
pub use crate::volume::{Axis, Volume};
pub use crate::writer::write_volume;
