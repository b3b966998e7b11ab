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

use std::path::PathBuf;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

use radcal_common::{define_cli, check_cli};
use radcal::{load_config, process_radiometric_correction, RadcalConfig};

define_cli! { ARGS [about="convert band 1 of a DN raster into radiance (gain * DN + offset)"] =
    config: Option<String> [help="pathname of RON config file", short, long],
    gain: Option<f64> [help="calibration gain (default 0.368)", long, allow_negative_numbers=true],
    offset: Option<f64> [help="calibration offset (default 1.0)", long, allow_negative_numbers=true],
    panel: Option<String> [help="pathname of side-by-side PNG panel", long],
    font: Option<String> [help="pathname of TTF font for panel titles", long],
    no_show: bool [help="do not open panel in image viewer", long],
    preserve_nodata: bool [help="do not calibrate no-data pixels", long],
    input: Option<String> [help="input DN raster"],
    output: Option<String> [help="output radiance raster"]
}

fn main () -> Result<()> {
    check_cli!(ARGS);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let mut config = if let Some(path) = &ARGS.config { load_config( path)? } else { RadcalConfig::default() };

    // command line options override config values
    if let Some(input) = &ARGS.input { config.input_path = PathBuf::from( input) }
    if let Some(output) = &ARGS.output { config.output_path = PathBuf::from( output) }
    if let Some(gain) = ARGS.gain { config.gain = gain }
    if let Some(offset) = ARGS.offset { config.offset = offset }
    if let Some(panel) = &ARGS.panel { config.panel_path = Some( PathBuf::from( panel)) }
    if let Some(font) = &ARGS.font { config.font_path = Some( PathBuf::from( font)) }
    if ARGS.no_show { config.show = false }
    if ARGS.preserve_nodata { config.preserve_no_data = true }

    let summary = process_radiometric_correction( &config)?;
    println!("{}", summary);

    Ok(())
}
