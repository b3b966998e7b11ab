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

use std::path::{Path,PathBuf};
use serde::{Serialize,Deserialize};

use radcal_common::load_config_path;
use crate::errors::Result;
use crate::calibrate::CalibrationParams;

pub const DEFAULT_INPUT: &str = "p016r37_1m19730918_01.tif";
pub const DEFAULT_OUTPUT: &str = "corrected.tif";
pub const DEFAULT_GAIN: f64 = 0.368;
pub const DEFAULT_OFFSET: f64 = 1.0;
pub const DEFAULT_PANEL: &str = "radiance_panel.png";

/// what to calibrate, where to store results and how to visualize them.
/// Missing fields in RON files are set to their defaults
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct RadcalConfig {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    #[serde(default = "default_gain")]
    pub gain: f64,

    #[serde(default = "default_offset")]
    pub offset: f64,

    /// pass no-data pixels of the input through without calibrating them
    #[serde(default)]
    pub preserve_no_data: bool,

    /// where to store the side-by-side visualization (None: no visualization)
    #[serde(default = "default_panel_path")]
    pub panel_path: Option<PathBuf>,

    /// open the stored panel in an image viewer
    #[serde(default = "default_show")]
    pub show: bool,

    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// viewer command to use instead of the platform default
    #[serde(default)]
    pub viewer: Option<String>,
}

// the "default_xx" functions are a serde quirk - no default_value, only functions allowed
fn default_input_path()->PathBuf { PathBuf::from( DEFAULT_INPUT) }
fn default_output_path()->PathBuf { PathBuf::from( DEFAULT_OUTPUT) }
fn default_gain()->f64 { DEFAULT_GAIN }
fn default_offset()->f64 { DEFAULT_OFFSET }
fn default_panel_path()->Option<PathBuf> { Some( PathBuf::from( DEFAULT_PANEL)) }
fn default_show()->bool { true }

impl Default for RadcalConfig {
    fn default()->Self {
        RadcalConfig {
            input_path: default_input_path(),
            output_path: default_output_path(),
            gain: default_gain(),
            offset: default_offset(),
            preserve_no_data: false,
            panel_path: default_panel_path(),
            show: default_show(),
            font_path: None,
            viewer: None,
        }
    }
}

impl RadcalConfig {
    pub fn new (input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>, gain: f64, offset: f64)->Self {
        RadcalConfig { input_path: input_path.into(), output_path: output_path.into(), gain, offset, ..RadcalConfig::default() }
    }

    /// validated calibration parameters of this config
    pub fn params (&self)->Result<CalibrationParams> {
        CalibrationParams::new( self.gain, self.offset)
    }
}

pub fn load_config<P: AsRef<Path>> (path: P)->Result<RadcalConfig> {
    Ok( load_config_path( path)? )
}
