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

use radcal_common::{define_error, RadcalCommonError};
use radcal_gdal::RadcalGdalError;
use radcal_image::RadcalImageError;

pub type Result<T> = std::result::Result<T, RadcalError>;

define_error!{ pub RadcalError =
    InvalidParameter(String) : "invalid calibration parameter: {0}",
    ConfigError(#[from] RadcalCommonError) : "config error: {0}",
    GdalError(#[from] RadcalGdalError) : "raster error: {0}",
    ImageError(#[from] RadcalImageError) : "visualization error: {0}"
}

pub fn invalid_parameter<S: ToString> (msg: S)->RadcalError {
    RadcalError::InvalidParameter( msg.to_string())
}
