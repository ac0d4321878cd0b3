//! Utility functions to write volume files.

use crate::error::Result;
use crate::header::MAGIC_CODE;
use crate::util::is_gz_file;
use crate::volume::Volume;
use byteordered::ByteOrdered;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a volume file (".miv" or ".miv.gz"), header followed by the
/// sample payload, all little-endian. If the path ends with ".gz" the
/// whole stream is Gzip compressed.
pub fn write_volume<P: AsRef<Path>>(path: P, volume: &Volume) -> Result<()> {
    let file = BufWriter::new(File::create(&path)?);
    if is_gz_file(&path) {
        let mut e = GzEncoder::new(file, Compression::default());
        write_parts(&mut e, volume)?;
        let _ = e.finish()?;
    } else {
        let mut writer = file;
        write_parts(&mut writer, volume)?;
    }
    Ok(())
}

fn write_parts<W: Write>(mut writer: W, volume: &Volume) -> Result<()> {
    writer.write_all(MAGIC_CODE)?;
    let mut writer = ByteOrdered::le(writer);
    writer.write_i16(volume.data_type() as i16)?;
    for d in &volume.dim() {
        writer.write_u16(*d)?;
    }
    for s in &volume.spacing() {
        writer.write_f64(*s)?;
    }
    for o in &volume.origin() {
        writer.write_f64(*o)?;
    }
    let m = volume.direction();
    for r in 0..3 {
        for c in 0..3 {
            writer.write_f64(m[(r, c)])?;
        }
    }
    for v in volume.raw_data() {
        writer.write_u16(*v)?;
    }
    Ok(())
}
