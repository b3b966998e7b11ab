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

use std::fmt;
use serde::{Serialize,Deserialize};
use gdal::{Dataset,Metadata,GeoTransform};
use gdal::raster::GdalDataType;

use crate::errors::{Result,RadcalGdalError,shape_mismatch};

const IMAGE_STRUCTURE: &str = "IMAGE_STRUCTURE";

/// the real valued GDAL data types we can read and write. 64bit integers are converted into f64 with
/// the usual rounding above 2^53
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum SampleType {
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float32,
    Float64
}

impl SampleType {
    pub fn gdal_type (&self)->GdalDataType {
        use SampleType::*;
        match self {
            UInt8   => GdalDataType::UInt8,
            Int8    => GdalDataType::Int8,
            UInt16  => GdalDataType::UInt16,
            Int16   => GdalDataType::Int16,
            UInt32  => GdalDataType::UInt32,
            Int32   => GdalDataType::Int32,
            UInt64  => GdalDataType::UInt64,
            Int64   => GdalDataType::Int64,
            Float32 => GdalDataType::Float32,
            Float64 => GdalDataType::Float64,
        }
    }
}

impl TryFrom<GdalDataType> for SampleType {
    type Error = RadcalGdalError;

    fn try_from (gdt: GdalDataType)->Result<Self> {
        match gdt {
            GdalDataType::UInt8   => Ok( SampleType::UInt8 ),
            GdalDataType::Int8    => Ok( SampleType::Int8 ),
            GdalDataType::UInt16  => Ok( SampleType::UInt16 ),
            GdalDataType::Int16   => Ok( SampleType::Int16 ),
            GdalDataType::UInt32  => Ok( SampleType::UInt32 ),
            GdalDataType::Int32   => Ok( SampleType::Int32 ),
            GdalDataType::UInt64  => Ok( SampleType::UInt64 ),
            GdalDataType::Int64   => Ok( SampleType::Int64 ),
            GdalDataType::Float32 => Ok( SampleType::Float32 ),
            GdalDataType::Float64 => Ok( SampleType::Float64 ),
            other => Err( RadcalGdalError::UnsupportedDataType( format!("{other:?}")) )
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "{:?}", self)
    }
}

/// the metadata of a raster dataset that has to survive a calibration round trip.
/// Only `data_type` (and `count`, since we write a single band) is supposed to change between
/// input and output, everything else is passed through
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RasterProfile {
    pub driver: String,        // GDAL driver short name
    pub width: usize,
    pub height: usize,
    pub count: usize,
    pub data_type: SampleType,

    pub geo_transform: Option<GeoTransform>,
    pub crs_wkt: Option<String>,
    pub no_data: Option<f64>,

    pub block_size: (usize,usize),
    pub compression: Option<String>,
    pub interleave: Option<String>,

    /// (key,value) items of the default metadata domain
    pub metadata: Vec<(String,String)>,
}

impl RasterProfile {
    /// grid shape as (rows,cols)
    pub fn shape (&self)->(usize,usize) {
        (self.height, self.width)
    }

    /// a copy of this profile for a single band output raster of the given sample type
    pub fn for_output (&self, data_type: SampleType)->RasterProfile {
        RasterProfile { data_type, count: 1, ..self.clone() }
    }

    pub fn check_grid_shape (&self, shape: (usize,usize))->Result<()> {
        if shape == self.shape() {
            Ok(())
        } else {
            Err( shape_mismatch( format!("grid has {}x{} (rows x cols) but profile declares {}x{}",
                                         shape.0, shape.1, self.height, self.width)))
        }
    }

    /// do both profiles describe the same raster area (dimensions, geo transform and SRS)
    pub fn has_same_geolocation (&self, other: &RasterProfile)->bool {
        self.width == other.width && self.height == other.height &&
        self.geo_transform == other.geo_transform &&
        self.crs_wkt == other.crs_wkt
    }

    pub fn is_tiled (&self)->bool {
        self.block_size.0 < self.width && self.block_size.1 > 1
    }
}

/// capture the profile of a dataset, using the first band for band specific properties
pub fn read_profile (ds: &Dataset)->Result<RasterProfile> {
    if ds.raster_count() < 1 {
        return Err( RadcalGdalError::NoRasterBands( ds.description().unwrap_or_default()) )
    }

    let band = ds.rasterband(1)?;
    let (width,height) = ds.raster_size();
    let data_type = SampleType::try_from( band.band_type())?;

    let geo_transform = ds.geo_transform().ok();
    let wkt = ds.projection();
    let crs_wkt = if wkt.is_empty() { None } else { Some(wkt) };

    let metadata = ds.metadata_domain("")
        .map( |items| items.iter().filter_map( |item| split_metadata_item(item)).collect())
        .unwrap_or_default();

    Ok( RasterProfile {
        driver: ds.driver().short_name(),
        width,
        height,
        count: ds.raster_count(),
        data_type,
        geo_transform,
        crs_wkt,
        no_data: band.no_data_value(),
        block_size: band.block_size(),
        compression: ds.metadata_item( "COMPRESSION", IMAGE_STRUCTURE),
        interleave: ds.metadata_item( "INTERLEAVE", IMAGE_STRUCTURE),
        metadata
    })
}

/// GDAL reports metadata as "KEY=VALUE" strings
pub fn split_metadata_item (item: &str)->Option<(String,String)> {
    item.split_once('=').map( |(k,v)| (k.to_string(), v.to_string()))
}
