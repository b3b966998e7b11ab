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

//! RON based config files. Config structs are plain serde types, there is no config registry

use std::path::Path;
use ron::ser::PrettyConfig;
use serde::{Serialize,Deserialize};

use crate::fs::filepath_contents_as_string;
use crate::errors::{Result,RadcalCommonError};

pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err( RadcalCommonError::ConfigNotFound( path.to_string_lossy().to_string()) )
    }

    let data = filepath_contents_as_string( &path)?;
    Ok( ron::from_str( data.as_str())? )
}

pub fn store_config_path<C,P> (config: &C, path: P) -> Result<()> where C: Serialize, P: AsRef<Path> {
    let s = ron::ser::to_string_pretty( config, PrettyConfig::new().struct_names(true))?;
    std::fs::write( path, s)?;
    Ok(())
}
