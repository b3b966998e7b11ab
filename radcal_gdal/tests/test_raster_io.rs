/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::path::Path;
use ndarray::{array, Array2};
use radcal_gdal::{
    gdal::spatial_ref::SpatialRef, create_dataset, get_create_options, load_first_band, write_calibrated, write_band,
    open_raster, read_profile, DnGrid, DriverManager, GeoTransform, RadcalGdalError, SampleType
};

// run with "cargo test test_xx -- --nocapture"

const GEO_TRANSFORM: GeoTransform = [ 500000.0, 60.0, 0.0, 4000000.0, 0.0, -60.0 ];

fn utm_wkt ()->String {
    SpatialRef::from_epsg( 32617).unwrap().to_wkt().unwrap()
}

/// create a GeoTIFF with the given u16 bands
fn create_dn_tiff (path: &Path, bands: &[Array2<u16>], no_data: Option<f64>) {
    let (rows,cols) = bands[0].dim();
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = create_dataset( &driver, path, cols, rows, bands.len(), SampleType::UInt16, None).unwrap();
    ds.set_geo_transform( &GEO_TRANSFORM).unwrap();
    ds.set_projection( &utm_wkt()).unwrap();

    for (i,grid) in bands.iter().enumerate() {
        write_band( &mut ds, i+1, grid).unwrap();
        if let Some(nd) = no_data {
            ds.rasterband(i+1).unwrap().set_no_data_value( Some(nd)).unwrap();
        }
    }
    ds.flush_cache().unwrap();
}

#[test]
fn test_load_nonexistent() {
    let dir = tempfile::tempdir().unwrap();
    let res = load_first_band( dir.path().join("p016r37.tif"));
    assert!( matches!( res, Err(RadcalGdalError::InputNotFound(_))));
}

#[test]
fn test_load_first_band() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dn.tif");
    let band1: Array2<u16> = array![[0,1,2],[3,4,5]];
    let band2: Array2<u16> = array![[10,11,12],[13,14,15]];
    create_dn_tiff( &path, &[band1.clone(), band2], Some(0.0));

    let (grid, profile) = load_first_band( &path).unwrap();
    assert_eq!( grid, DnGrid::UInt16(band1));
    assert_eq!( grid.shape(), (2,3));

    assert_eq!( profile.driver, "GTiff");
    assert_eq!( profile.width, 3);
    assert_eq!( profile.height, 2);
    assert_eq!( profile.count, 2);
    assert_eq!( profile.data_type, SampleType::UInt16);
    assert_eq!( profile.geo_transform, Some(GEO_TRANSFORM));
    assert_eq!( profile.no_data, Some(0.0));
    assert!( profile.crs_wkt.is_some());
}

#[test]
fn test_write_calibrated_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    let out_path = dir.path().join("radiance.tif");
    create_dn_tiff( &in_path, &[array![[0,1],[2,3]], array![[7,7],[7,7]]], Some(0.0));

    let (grid, profile) = load_first_band( &in_path).unwrap();
    let radiance = grid.map_to_f64( |x| 2.0 * x + 1.0);
    let out_profile = write_calibrated( &out_path, &radiance, &profile).unwrap();
    assert_eq!( out_profile.data_type, SampleType::Float32);
    assert_eq!( out_profile.count, 1);

    let (out_grid, reread_profile) = load_first_band( &out_path).unwrap();
    assert_eq!( out_grid, DnGrid::Float32( array![[1.0f32,3.0],[5.0,7.0]]));

    assert_eq!( reread_profile.data_type, SampleType::Float32);
    assert_eq!( reread_profile.count, 1);
    assert_eq!( reread_profile.no_data, profile.no_data);
    assert!( reread_profile.has_same_geolocation( &profile));
}

#[test]
fn test_write_overflow_to_infinity() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    let out_path = dir.path().join("radiance.tif");
    create_dn_tiff( &in_path, &[array![[u16::MAX, 1]]], None);

    let (grid, profile) = load_first_band( &in_path).unwrap();
    let radiance = grid.map_to_f64( |x| 1e300 * x);
    write_calibrated( &out_path, &radiance, &profile).unwrap();

    if let (DnGrid::Float32(a), _) = load_first_band( &out_path).unwrap() {
        assert_eq!( a[[0,0]], f32::INFINITY);
        assert_eq!( a[[0,1]], f32::INFINITY);
    } else {
        panic!("output is not Float32");
    }
}

#[test]
fn test_write_shape_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    let out_path = dir.path().join("radiance.tif");
    create_dn_tiff( &in_path, &[array![[0,1],[2,3]]], None);

    let (_, profile) = load_first_band( &in_path).unwrap();
    let res = write_calibrated( &out_path, &Array2::<f64>::zeros((3,2)), &profile);
    assert!( matches!( res, Err(RadcalGdalError::ShapeMismatch(_))));
    assert!( !out_path.exists());
}

#[test]
fn test_write_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    create_dn_tiff( &in_path, &[array![[0,1],[2,3]]], None);

    let (grid, profile) = load_first_band( &in_path).unwrap();
    let res = write_calibrated( dir.path().join("missing").join("radiance.tif"), &grid.to_f64(), &profile);
    assert!( matches!( res, Err(RadcalGdalError::OutputNotWritable(_))));
}

#[test]
fn test_write_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    let out_path = dir.path().join("radiance.tif");
    create_dn_tiff( &in_path, &[array![[4,8]]], None);
    std::fs::write( &out_path, b"stale").unwrap();

    let (grid, profile) = load_first_band( &in_path).unwrap();
    write_calibrated( &out_path, &grid.to_f64(), &profile).unwrap();

    let ds = open_raster( &out_path).unwrap();
    let out_profile = read_profile( &ds).unwrap();
    assert_eq!( out_profile.data_type, SampleType::Float32);
    assert_eq!( (out_profile.width, out_profile.height), (2,1));
}

#[test]
fn test_write_empty_profile() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    create_dn_tiff( &in_path, &[array![[1,2]]], None);

    let (_, mut profile) = load_first_band( &in_path).unwrap();
    profile.width = 0;
    let res = write_calibrated( dir.path().join("radiance.tif"), &Array2::<f64>::zeros((1,0)), &profile);
    assert!( matches!( res, Err(RadcalGdalError::InvalidProfile(_))));
}

#[test]
fn test_sample_types() {
    use radcal_gdal::GdalDataType;

    for st in [SampleType::UInt8, SampleType::Int8, SampleType::UInt16, SampleType::Int16, SampleType::UInt32,
               SampleType::Int32, SampleType::UInt64, SampleType::Int64, SampleType::Float32, SampleType::Float64] {
        assert_eq!( SampleType::try_from( st.gdal_type()).unwrap(), st);
    }
    assert!( matches!( SampleType::try_from( GdalDataType::Unknown), Err(RadcalGdalError::UnsupportedDataType(_))));
    assert_eq!( SampleType::Float32.to_string(), "Float32");
}

#[test]
fn test_driver_names() {
    use radcal_gdal::{get_driver_name_for_extension, get_driver_name_from_path, split_metadata_item};

    assert_eq!( get_driver_name_for_extension("tif"), Some("GTiff"));
    assert_eq!( get_driver_name_from_path("/data/scene.TIFF"), Some("GTiff"));
    assert_eq!( get_driver_name_from_path("scene"), None);
    assert_eq!( split_metadata_item("AREA_OR_POINT=Area"), Some(("AREA_OR_POINT".to_string(), "Area".to_string())));
}

#[test]
fn test_load_int64() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dn64.tif");
    let band: Array2<i64> = array![[-3, 0], [1 << 40, 7]];

    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = create_dataset( &driver, &path, 2, 2, 1, SampleType::Int64, None).unwrap();
    ds.set_geo_transform( &GEO_TRANSFORM).unwrap();
    write_band( &mut ds, 1, &band).unwrap();
    ds.flush_cache().unwrap();
    drop(ds);

    let (grid, profile) = load_first_band( &path).unwrap();
    assert_eq!( profile.data_type, SampleType::Int64);
    assert_eq!( grid, DnGrid::Int64( band));
    assert_eq!( grid.to_f64(), array![[-3.0, 0.0], [1099511627776.0, 7.0]]);
}

#[test]
fn test_load_virtual_path() {
    let path = "/vsimem/radcal_test_load_virtual_path.tif";
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = create_dataset( &driver, path, 2, 1, 1, SampleType::UInt16, None).unwrap();
    write_band( &mut ds, 1, &array![[5u16, 6]]).unwrap();
    ds.flush_cache().unwrap();
    drop(ds);

    let (grid, profile) = load_first_band( path).unwrap();
    assert_eq!( grid, DnGrid::UInt16( array![[5, 6]]));
    assert_eq!( (profile.width, profile.height), (2,1));

    // missing virtual files are reported by GDAL
    let res = load_first_band( "/vsimem/radcal_no_such_file.tif");
    assert!( matches!( res, Err(RadcalGdalError::GdalError(_))));
}

#[cfg(unix)]
#[test]
fn test_write_create_failure() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    let out_path = dir.path().join("radiance.tif");
    create_dn_tiff( &in_path, &[array![[0,1],[2,3]]], None);

    // passes the directory checks but can't be created
    std::os::unix::fs::symlink( dir.path().join("missing").join("radiance.tif"), &out_path).unwrap();

    let (grid, profile) = load_first_band( &in_path).unwrap();
    let res = write_calibrated( &out_path, &grid.to_f64(), &profile);
    assert!( matches!( res, Err(RadcalGdalError::OutputNotWritable(_))));
}

#[test]
fn test_create_options() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    create_dn_tiff( &in_path, &[array![[0,1],[2,3]]], None);
    let (grid, mut profile) = load_first_band( &in_path).unwrap();
    profile.interleave = None;

    for compression in ["CCITTFAX4", "CCITTRLE", "JPEG", "WEBP"] {
        profile.compression = Some(compression.to_string());
        assert!( get_create_options( &profile).unwrap().is_none());
    }

    profile.compression = Some("LZW".to_string());
    assert!( get_create_options( &profile).unwrap().is_some());

    profile.compression = None;
    profile.interleave = Some("BAND".to_string());
    assert!( get_create_options( &profile).unwrap().is_some());
}

#[test]
fn test_write_skips_ccitt_compression() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("dn.tif");
    let out_path = dir.path().join("radiance.tif");
    create_dn_tiff( &in_path, &[array![[0,1],[2,3]]], None);

    let (grid, mut profile) = load_first_band( &in_path).unwrap();
    profile.compression = Some("CCITTFAX3".to_string());
    write_calibrated( &out_path, &grid.to_f64(), &profile).unwrap();

    let (out_grid, out_profile) = load_first_band( &out_path).unwrap();
    assert_eq!( out_grid, DnGrid::Float32( array![[0.0f32, 1.0], [2.0, 3.0]]));
    assert_eq!( out_profile.compression, None);
}
