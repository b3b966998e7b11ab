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
use serde::{Serialize,Deserialize};

use radcal_gdal::DnGrid;
use crate::errors::{Result,invalid_parameter};

/// linear sensor calibration `radiance = gain * DN + offset`
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct CalibrationParams {
    pub gain: f64,
    pub offset: f64,
}

impl CalibrationParams {
    /// parameters have to be finite
    pub fn new (gain: f64, offset: f64)->Result<Self> {
        if !gain.is_finite() { return Err( invalid_parameter( format!("gain {}", gain))) }
        if !offset.is_finite() { return Err( invalid_parameter( format!("offset {}", offset))) }
        Ok( CalibrationParams { gain, offset } )
    }

    pub fn identity ()->Self {
        CalibrationParams { gain: 1.0, offset: 0.0 }
    }

    #[inline]
    pub fn apply (&self, dn: f64)->f64 {
        self.gain * dn + self.offset
    }
}

/// apply the calibration to every element of a grid. The result has the same shape, values are not
/// clamped and NaN/inf propagate
pub fn calibrate<T> (grid: &Array2<T>, params: &CalibrationParams)->Array2<f64> where T: AsPrimitive<f64> {
    grid.mapv( |x| params.apply( x.as_()))
}

/// like [`calibrate`] but pixels equal to `no_data` keep their value
pub fn calibrate_masked<T> (grid: &Array2<T>, params: &CalibrationParams, no_data: Option<f64>)->Array2<f64> where T: AsPrimitive<f64> {
    match no_data {
        Some(nd) => grid.mapv( |x| {
            let v: f64 = x.as_();
            if is_no_data( v, nd) { v } else { params.apply( v) }
        }),
        None => calibrate( grid, params)
    }
}

fn is_no_data (v: f64, no_data: f64)->bool {
    v == no_data || (no_data.is_nan() && v.is_nan())
}

pub fn calibrate_dn (grid: &DnGrid, params: &CalibrationParams)->Array2<f64> {
    calibrate_dn_masked( grid, params, None)
}

pub fn calibrate_dn_masked (grid: &DnGrid, params: &CalibrationParams, no_data: Option<f64>)->Array2<f64> {
    match grid {
        DnGrid::UInt8(a)   => calibrate_masked( a, params, no_data),
        DnGrid::Int8(a)    => calibrate_masked( a, params, no_data),
        DnGrid::UInt16(a)  => calibrate_masked( a, params, no_data),
        DnGrid::Int16(a)   => calibrate_masked( a, params, no_data),
        DnGrid::UInt32(a)  => calibrate_masked( a, params, no_data),
        DnGrid::Int32(a)   => calibrate_masked( a, params, no_data),
        DnGrid::UInt64(a)  => calibrate_masked( a, params, no_data),
        DnGrid::Int64(a)   => calibrate_masked( a, params, no_data),
        DnGrid::Float32(a) => calibrate_masked( a, params, no_data),
        DnGrid::Float64(a) => calibrate_masked( a, params, no_data),
    }
}
