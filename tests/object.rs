extern crate byteordered;
extern crate nalgebra;
extern crate tempfile;
extern crate volslice;
#[macro_use]
extern crate pretty_assertions;

use byteordered::ByteOrdered;
use nalgebra::Matrix3;
use std::io::Write;
use volslice::{Axis, ScalarType, Volume, VolumeError, VolumeStore};

fn cube_2x2x2() -> Volume {
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
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.miv");

    let store = VolumeStore::from_volume(cube_2x2x2()).unwrap();
    store.save_to(&path).unwrap();

    let mut loaded = VolumeStore::load_from(&path).unwrap();
    assert_eq!(loaded.dim(), [2, 2, 2]);
    assert_eq!(loaded.spacing(), [1., 1., 1.]);
    assert_eq!(loaded.origin(), [0., 0., 0.]);
    assert_eq!(loaded.data_type(), ScalarType::Uint16);
    assert_eq!(loaded.volume(), store.volume());
    assert_eq!(loaded.slice(Axis::Z, 0).unwrap(), &[0, 1, 2, 3]);
}

#[test]
fn gz_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.miv.gz");

    let store = VolumeStore::from_volume(cube_2x2x2()).unwrap();
    store.save_to(&path).unwrap();

    let loaded = VolumeStore::load_from(&path).unwrap();
    assert_eq!(loaded.volume(), store.volume());
}

#[test]
fn missing_file_is_io_error() {
    match VolumeStore::load_from("no-such-volume.miv") {
        Err(VolumeError::Io(_)) => (),
        e => panic!("unexpected outcome: {:?}", e),
    }
}

#[test]
fn undecodable_file_is_invalid_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.miv");
    std::fs::write(&path, b"definitely not a volume").unwrap();

    match VolumeStore::load_from(&path) {
        Err(VolumeError::InvalidFormat) => (),
        e => panic!("unexpected outcome: {:?}", e),
    }
}

#[test]
fn foreign_scalar_type_is_rejected() {
    // a float32 volume header followed by no payload
    let mut data = Vec::new();
    data.write_all(b"MIV\0").unwrap();
    let mut w = ByteOrdered::le(&mut data);
    w.write_i16(16).unwrap();
    for d in &[2u16, 2, 2] {
        w.write_u16(*d).unwrap();
    }
    for _ in 0..3 {
        w.write_f64(1.).unwrap();
    }
    for _ in 0..3 {
        w.write_f64(0.).unwrap();
    }
    for v in &[1., 0., 0., 0., 1., 0., 0., 0., 1.] {
        w.write_f64(*v).unwrap();
    }

    match VolumeStore::from_stream(&data[..]) {
        Err(VolumeError::UnsupportedDataType(ScalarType::Float32)) => (),
        e => panic!("unexpected outcome: {:?}", e),
    }
}

#[test]
fn concrete_transform_scenario() {
    let store = VolumeStore::from_volume(cube_2x2x2()).unwrap();
    assert_eq!(store.world_to_index([0., 0., 0.]).unwrap(), [0, 0, 0]);
    assert_eq!(store.index_to_world([1, 1, 1]), [1., 1., 1.]);
}

#[test]
fn voxel_update_shows_in_slice() {
    let mut store = VolumeStore::from_volume(cube_2x2x2()).unwrap();
    store.set_voxel([1, 0, 0], 99).unwrap();
    assert_eq!(store.voxel([1, 0, 0]).unwrap(), 99);
    assert_eq!(store.slice(Axis::Z, 0).unwrap(), &[0, 99, 2, 3]);
}

#[test]
fn world_voxel_access() {
    let vol = Volume::new(
        [2, 2, 2],
        [2., 2., 2.],
        [10., 10., 10.],
        Matrix3::identity(),
        (0..8).collect(),
    )
    .unwrap();
    let mut store = VolumeStore::from_volume(vol).unwrap();

    // nearest grid point to (12.4, 10., 10.) is index (1, 0, 0)
    assert_eq!(store.voxel_at_world([12.4, 10., 10.]).unwrap(), 1);
    store.set_voxel_at_world([12., 12., 12.], 42).unwrap();
    assert_eq!(store.voxel([1, 1, 1]).unwrap(), 42);

    match store.voxel_at_world([100., 10., 10.]) {
        Err(VolumeError::OutOfBounds(_)) => (),
        e => panic!("unexpected outcome: {:?}", e),
    }
}

#[test]
fn load_normalizes_orientation() {
    // index axis 0 runs along world -z, axis 2 along world x
    let direction = Matrix3::new(
        0., 0., 1., //
        0., 1., 0., //
        -1., 0., 0.,
    );
    let vol = Volume::new(
        [4, 3, 2],
        [1., 1., 1.],
        [0., 0., 0.],
        direction,
        (0..24).collect(),
    )
    .unwrap();
    let store = VolumeStore::from_volume(vol).unwrap();

    // dims permuted to world order, direction canonical
    assert_eq!(store.dim(), [2, 3, 4]);
    assert_eq!(
        store.direction(),
        [1., 0., 0., 0., 1., 0., 0., 0., 1.]
    );
    // the minimum world corner: old index (3, 0, 0) sits at world z = -3
    assert_eq!(store.origin(), [0., 0., -3.]);

    // old voxel (3, 0, 0) must now be at index (0, 0, 0)
    let old_index_3 = 3u16;
    assert_eq!(store.voxel([0, 0, 0]).unwrap(), old_index_3);
}

#[test]
fn reload_replaces_volume_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.miv");

    let mut store = VolumeStore::from_volume(cube_2x2x2()).unwrap();
    store.set_voxel([0, 0, 0], 77).unwrap();
    store.save_to(&path).unwrap();

    let reloaded = VolumeStore::load_from(&path).unwrap();
    assert_eq!(reloaded.voxel([0, 0, 0]).unwrap(), 77);
    assert_eq!(reloaded.volume().element_count(), 8);
}
