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

//! raster I/O for radiometric calibration: read band 1 of a GDAL dataset together with its
//! profile, and write calibrated Float32 grids with the profile of the source

pub mod errors;
mod profile;
mod grid;

use std::{collections::HashMap, path::Path};
use lazy_static::lazy_static;
use ndarray::Array2;
use tracing::{debug,info,warn};

// we re-export these so that other crates don't need a direct gdal dependency
pub use gdal::{self, Driver, DriverManager, Metadata, Dataset, GeoTransform, errors::GdalError};
pub use gdal::raster::{GdalType,GdalDataType,RasterBand,Buffer,RasterCreationOptions};

use radcal_common::fs::{ensure_writable_file_path, lowercase_extension, path_to_lossy_string};

pub use errors::{Result,RadcalGdalError};
use errors::{input_not_found, output_not_writable};

pub use profile::{SampleType, RasterProfile, read_profile, split_metadata_item};
pub use grid::{DnGrid, read_band, read_dn_grid, write_band};

/// the sample type of calibrated output rasters
pub const OUTPUT_SAMPLE_TYPE: SampleType = SampleType::Float32;

const DEFAULT_OUTPUT_DRIVER: &str = "GTiff";

lazy_static! {
    // note that we can't automatically populate this by iterating over DriverManager since some
    // drivers use the same file extension
    static ref EXT_MAP: HashMap<&'static str, &'static str> = HashMap::from( [ // file extension -> driver short name
        ("tif", "GTiff"),
        ("tiff", "GTiff"),
        ("img", "HFA"),
        ("nc", "netCDF"),
        ("envi", "ENVI"),
        ("vrt", "VRT"),
        ("png", "PNG"),
        ("jp2", "JP2OpenJPEG"),
    ]);
}

/// Note that filename extension has to be lowercase
pub fn get_driver_name_for_extension (ext: &str) -> Option<&'static str> {
    EXT_MAP.get( ext).map(|v| &**v)
}

pub fn get_driver_name_from_path (path: impl AsRef<Path>) -> Option<&'static str> {
    lowercase_extension( &path).and_then( |ext| get_driver_name_for_extension( &ext))
}

/// can this driver create new datasets from scratch (not all drivers support GDALCreate)
pub fn can_create (driver: &Driver)->bool {
    driver.metadata_item( "DCAP_CREATE", "").is_some()
}

/* #region loader ********************************************************************************************/

/// is this a path of one of GDAL's virtual file systems (/vsimem/, /vsizip/, /vsicurl/ etc.)
pub fn is_virtual_path (path: impl AsRef<Path>)->bool {
    path.as_ref().to_str().map( |s| s.starts_with("/vsi")).unwrap_or(false)
}

/// open a GDAL dataset. Local paths that do not exist are reported as `InputNotFound` without
/// calling GDAL. Virtual file system paths and dataset directories are passed to GDAL as is
pub fn open_raster (path: impl AsRef<Path>)->Result<Dataset> {
    let path = path.as_ref();
    if !is_virtual_path( path) && !path.exists() {
        return Err( input_not_found( path_to_lossy_string( path)))
    }
    Ok( Dataset::open( path)? )
}

/// read the first band of the raster at `path` in its native sample type, together with the profile
/// of the dataset. The dataset is closed when this function returns
pub fn load_first_band (path: impl AsRef<Path>)->Result<(DnGrid,RasterProfile)> {
    let path = path.as_ref();
    let ds = open_raster( path)?;
    let profile = read_profile( &ds)?;
    let grid = read_dn_grid( &ds, 1)?;
    profile.check_grid_shape( grid.shape())?;

    info!("loaded band 1 of {:?}: {}x{} {} ({} bands, driver {})",
          path, profile.width, profile.height, profile.data_type, profile.count, profile.driver);
    Ok( (grid, profile) )
}

/* #endregion loader */

/* #region writer ********************************************************************************************/

/// write a calibrated grid as band 1 of a new Float32 raster at `path`, using the profile of the source
/// raster. Any existing file at `path` is overwritten. Values outside of the f32 range are stored as
/// +/- infinity. Returns the profile of the output raster
pub fn write_calibrated (path: impl AsRef<Path>, grid: &Array2<f64>, profile: &RasterProfile)->Result<RasterProfile> {
    let path = path.as_ref();
    let mut out_profile = profile.for_output( OUTPUT_SAMPLE_TYPE);
    if out_profile.width == 0 || out_profile.height == 0 {
        return Err( RadcalGdalError::InvalidProfile( format!("empty raster {}x{}", out_profile.width, out_profile.height)))
    }
    out_profile.check_grid_shape( grid.dim())?;

    ensure_writable_file_path( path).map_err( |e| output_not_writable( e.to_string()))?;

    let driver = get_output_driver( &out_profile, path)?;
    out_profile.driver = driver.short_name();
    let co = get_create_options( &out_profile)?;

    let mut ds = create_dataset( &driver, path, out_profile.width, out_profile.height, 1, OUTPUT_SAMPLE_TYPE, co)
        .map_err( |e| output_not_writable( format!("{}: {}", path_to_lossy_string( path), e)))?;
    apply_profile( &mut ds, &out_profile)?;

    let data: Array2<f32> = grid.mapv( |v| v as f32);
    write_band( &mut ds, 1, &data)?;
    ds.flush_cache()?;

    info!("wrote {}x{} {} raster {:?} (driver {})", out_profile.width, out_profile.height, out_profile.data_type, path, out_profile.driver);
    Ok( out_profile )
}

/// the driver of the source if it can create datasets, otherwise the one for the output file extension
pub fn get_output_driver (profile: &RasterProfile, path: &Path)->Result<Driver> {
    if let Ok(driver) = DriverManager::get_driver_by_name( &profile.driver) {
        if can_create( &driver) { return Ok(driver) }
    }

    let name = get_driver_name_from_path( path).unwrap_or( DEFAULT_OUTPUT_DRIVER);
    debug!("source driver {} cannot create datasets, using {}", profile.driver, name);
    Ok( DriverManager::get_driver_by_name( name)? )
}

/// creation options that preserve compression and tiling of GeoTIFF sources where Float32 supports them
pub fn get_create_options (profile: &RasterProfile)->Result<Option<RasterCreationOptions>> {
    if profile.driver != "GTiff" { return Ok(None) }

    let mut co = RasterCreationOptions::new();
    let mut has_opts = false;

    if let Some(compression) = &profile.compression {
        let compression = compression.to_ascii_uppercase();
        if is_unsupported_float_compression( &compression) {
            warn!("{} compression not supported for Float32 output, writing uncompressed", compression);
        } else {
            co.add_name_value( "COMPRESS", &compression)?;
            has_opts = true;
        }
    }

    if let Some(interleave) = &profile.interleave {
        co.add_name_value( "INTERLEAVE", interleave)?;
        has_opts = true;
    }

    if profile.is_tiled() {
        let (bw,bh) = profile.block_size;
        if bw % 16 == 0 && bh % 16 == 0 {
            co.add_name_value( "TILED", "YES")?;
            co.add_name_value( "BLOCKXSIZE", &bw.to_string())?;
            co.add_name_value( "BLOCKYSIZE", &bh.to_string())?;
            has_opts = true;
        }
    }

    Ok( if has_opts { Some(co) } else { None } )
}

// lossy codecs and the 1bit CCITT codecs can't store Float32 samples
fn is_unsupported_float_compression (compression: &str)->bool {
    compression.contains("JPEG") || compression.contains("WEBP") || compression.starts_with("CCITT")
}

/// set the geolocation, no-data value and metadata items of a freshly created dataset
pub fn apply_profile (ds: &mut Dataset, profile: &RasterProfile)->Result<()> {
    if let Some(geo_transform) = &profile.geo_transform {
        ds.set_geo_transform( geo_transform)?;
    }
    if let Some(wkt) = &profile.crs_wkt {
        ds.set_projection( wkt.as_str())?;
    }

    for (key,value) in &profile.metadata {
        ds.set_metadata_item( key, value, "")?;
    }

    if let Some(no_data) = profile.no_data {
        let mut band = ds.rasterband(1)?;
        band.set_no_data_value( Some(no_data))?;
    }

    Ok(())
}

pub fn create_dataset<P> (driver: &Driver, path: P, width: usize, height: usize, n_bands: usize, sample_type: SampleType, co: Option<RasterCreationOptions>)->Result<Dataset>
    where P: AsRef<Path>
{
    use SampleType::*;
    if let Some(co) = co {
        match sample_type {
            UInt8   => Ok( driver.create_with_band_type_with_options::<u8,P>(path, width, height, n_bands, &co)? ),
            Int8    => Ok( driver.create_with_band_type_with_options::<i8,P>(path, width, height, n_bands, &co)? ),
            UInt16  => Ok( driver.create_with_band_type_with_options::<u16,P>(path, width, height, n_bands, &co)? ),
            Int16   => Ok( driver.create_with_band_type_with_options::<i16,P>(path, width, height, n_bands, &co)? ),
            UInt32  => Ok( driver.create_with_band_type_with_options::<u32,P>(path, width, height, n_bands, &co)? ),
            Int32   => Ok( driver.create_with_band_type_with_options::<i32,P>(path, width, height, n_bands, &co)? ),
            UInt64  => Ok( driver.create_with_band_type_with_options::<u64,P>(path, width, height, n_bands, &co)? ),
            Int64   => Ok( driver.create_with_band_type_with_options::<i64,P>(path, width, height, n_bands, &co)? ),
            Float32 => Ok( driver.create_with_band_type_with_options::<f32,P>(path, width, height, n_bands, &co)? ),
            Float64 => Ok( driver.create_with_band_type_with_options::<f64,P>(path, width, height, n_bands, &co)? ),
        }

    } else {
        match sample_type {
            UInt8   => Ok( driver.create_with_band_type::<u8,P>(path, width, height, n_bands)? ),
            Int8    => Ok( driver.create_with_band_type::<i8,P>(path, width, height, n_bands)? ),
            UInt16  => Ok( driver.create_with_band_type::<u16,P>(path, width, height, n_bands)? ),
            Int16   => Ok( driver.create_with_band_type::<i16,P>(path, width, height, n_bands)? ),
            UInt32  => Ok( driver.create_with_band_type::<u32,P>(path, width, height, n_bands)? ),
            Int32   => Ok( driver.create_with_band_type::<i32,P>(path, width, height, n_bands)? ),
            UInt64  => Ok( driver.create_with_band_type::<u64,P>(path, width, height, n_bands)? ),
            Int64   => Ok( driver.create_with_band_type::<i64,P>(path, width, height, n_bands)? ),
            Float32 => Ok( driver.create_with_band_type::<f32,P>(path, width, height, n_bands)? ),
            Float64 => Ok( driver.create_with_band_type::<f64,P>(path, width, height, n_bands)? ),
        }
    }
}

/* #endregion writer */
