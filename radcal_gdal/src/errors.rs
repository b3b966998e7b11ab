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

use radcal_common::define_error;

pub type Result<T> = std::result::Result<T, RadcalGdalError>;

define_error!{ pub RadcalGdalError =
    InputNotFound(String) : "input raster not found: {0}",
    OutputNotWritable(String) : "output raster not writable: {0}",
    ShapeMismatch(String) : "grid does not match profile: {0}",
    UnsupportedDataType(String) : "unsupported sample data type: {0}",
    NoRasterBands(String) : "no raster bands in dataset: {0}",
    InvalidProfile(String) : "invalid raster profile: {0}",
    GdalError(#[from] gdal::errors::GdalError) : "GDAL error: {0}",
    ShapeError(#[from] ndarray::ShapeError) : "array shape error: {0}",
    IOError(#[from] std::io::Error) : "IO error: {0}"
}

pub fn input_not_found<S: ToString> (path: S)->RadcalGdalError {
    RadcalGdalError::InputNotFound(path.to_string())
}

pub fn output_not_writable<S: ToString> (msg: S)->RadcalGdalError {
    RadcalGdalError::OutputNotWritable(msg.to_string())
}

pub fn shape_mismatch<S: ToString> (msg: S)->RadcalGdalError {
    RadcalGdalError::ShapeMismatch(msg.to_string())
}
