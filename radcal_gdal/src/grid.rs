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

use ndarray::Array2;
use num::traits::AsPrimitive;
use gdal::Dataset;
use gdal::raster::{Buffer,GdalType};

use crate::errors::Result;
use crate::profile::SampleType;

/// a band grid in its native sample type. Grids are (rows,cols) shaped, row-major
#[derive(Debug,Clone,PartialEq)]
pub enum DnGrid {
    UInt8(Array2<u8>),
    Int8(Array2<i8>),
    UInt16(Array2<u16>),
    Int16(Array2<i16>),
    UInt32(Array2<u32>),
    Int32(Array2<i32>),
    UInt64(Array2<u64>),
    Int64(Array2<i64>),
    Float32(Array2<f32>),
    Float64(Array2<f64>),
}

// expand $e for whatever array the grid holds
macro_rules! for_grid {
    ($grid:expr, $a:ident => $e:expr) => {
        match $grid {
            DnGrid::UInt8($a)   => $e,
            DnGrid::Int8($a)    => $e,
            DnGrid::UInt16($a)  => $e,
            DnGrid::Int16($a)   => $e,
            DnGrid::UInt32($a)  => $e,
            DnGrid::Int32($a)   => $e,
            DnGrid::UInt64($a)  => $e,
            DnGrid::Int64($a)   => $e,
            DnGrid::Float32($a) => $e,
            DnGrid::Float64($a) => $e,
        }
    }
}

impl DnGrid {
    pub fn sample_type (&self)->SampleType {
        match self {
            DnGrid::UInt8(_)   => SampleType::UInt8,
            DnGrid::Int8(_)    => SampleType::Int8,
            DnGrid::UInt16(_)  => SampleType::UInt16,
            DnGrid::Int16(_)   => SampleType::Int16,
            DnGrid::UInt32(_)  => SampleType::UInt32,
            DnGrid::Int32(_)   => SampleType::Int32,
            DnGrid::UInt64(_)  => SampleType::UInt64,
            DnGrid::Int64(_)   => SampleType::Int64,
            DnGrid::Float32(_) => SampleType::Float32,
            DnGrid::Float64(_) => SampleType::Float64,
        }
    }

    /// (rows,cols)
    pub fn shape (&self)->(usize,usize) {
        for_grid!( self, a => a.dim())
    }

    /// map every sample (promoted to f64) into a new f64 grid of the same shape
    pub fn map_to_f64<F> (&self, f: F)->Array2<f64> where F: Fn(f64)->f64 {
        for_grid!( self, a => a.mapv( |v| f( v.as_())))
    }

    pub fn to_f64 (&self)->Array2<f64> {
        self.map_to_f64( |v| v)
    }
}

/// read a whole band into a (rows,cols) array
pub fn read_band<T> (ds: &Dataset, band_index: usize)->Result<Array2<T>> where T: GdalType + Copy {
    let band = ds.rasterband(band_index)?;
    let (cols,rows) = band.size();
    let buf: Buffer<T> = band.read_as::<T>( (0,0), (cols,rows), (cols,rows), None)?;
    let (_, data) = buf.into_shape_and_vec();

    Ok( Array2::from_shape_vec( (rows,cols), data)? )
}

/// read a band in the sample type it is stored in
pub fn read_dn_grid (ds: &Dataset, band_index: usize)->Result<DnGrid> {
    let band_type = ds.rasterband(band_index)?.band_type();

    match SampleType::try_from( band_type)? {
        SampleType::UInt8   => Ok( DnGrid::UInt8( read_band::<u8>( ds, band_index)?)),
        SampleType::Int8    => Ok( DnGrid::Int8( read_band::<i8>( ds, band_index)?)),
        SampleType::UInt16  => Ok( DnGrid::UInt16( read_band::<u16>( ds, band_index)?)),
        SampleType::Int16   => Ok( DnGrid::Int16( read_band::<i16>( ds, band_index)?)),
        SampleType::UInt32  => Ok( DnGrid::UInt32( read_band::<u32>( ds, band_index)?)),
        SampleType::Int32   => Ok( DnGrid::Int32( read_band::<i32>( ds, band_index)?)),
        SampleType::UInt64  => Ok( DnGrid::UInt64( read_band::<u64>( ds, band_index)?)),
        SampleType::Int64   => Ok( DnGrid::Int64( read_band::<i64>( ds, band_index)?)),
        SampleType::Float32 => Ok( DnGrid::Float32( read_band::<f32>( ds, band_index)?)),
        SampleType::Float64 => Ok( DnGrid::Float64( read_band::<f64>( ds, band_index)?)),
    }
}

/// write a (rows,cols) array into a band of the same size, scanline by scanline
pub fn write_band<T> (ds: &mut Dataset, band_index: usize, grid: &Array2<T>)->Result<()> where T: GdalType + Copy + Default {
    let cols = grid.ncols();
    let mut band = ds.rasterband(band_index)?;
    let mut line: Buffer<T> = Buffer::new( (cols,1), vec![T::default(); cols]);

    for (j,row) in grid.rows().into_iter().enumerate() {
        for (dst,src) in line.data_mut().iter_mut().zip( row.iter()) {
            *dst = *src;
        }
        band.write( (0, j as isize), (cols,1), &mut line)?;
    }

    Ok(())
}
