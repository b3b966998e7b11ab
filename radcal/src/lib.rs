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

//! linear radiometric calibration of band 1 of a raster: convert digital numbers (DN) into radiance,
//! store the result as a Float32 raster with the geolocation of the source, and render the original
//! and calibrated grids side by side

use std::{fmt, path::{Path,PathBuf}};
use ndarray::Array2;
use tracing::{info,warn};

use radcal_gdal::{load_first_band, write_calibrated, SampleType};
use radcal_image::{load_panel_font, render_side_by_side, save_panel, show_panel, PanelOptions, Stats};

mod errors;
pub use errors::{Result,RadcalError};

mod calibrate;
pub use calibrate::{CalibrationParams, calibrate, calibrate_masked, calibrate_dn, calibrate_dn_masked};

mod config;
pub use config::{RadcalConfig, load_config, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_GAIN, DEFAULT_OFFSET, DEFAULT_PANEL};

/// what a calibration run produced
#[derive(Debug,Clone)]
pub struct CalibrationSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub panel_path: Option<PathBuf>,
    pub shape: (usize,usize), // (rows,cols)
    pub input_type: SampleType,
    pub params: CalibrationParams,
    pub dn_range: Option<(f64,f64)>,
    pub radiance_range: Option<(f64,f64)>,
}

impl fmt::Display for CalibrationSummary {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        writeln!( f, "input:    {:?} ({}x{} {})", self.input_path, self.shape.1, self.shape.0, self.input_type)?;
        writeln!( f, "params:   gain={} offset={}", self.params.gain, self.params.offset)?;
        writeln!( f, "DN:       {}", format_range( self.dn_range))?;
        writeln!( f, "radiance: {}", format_range( self.radiance_range))?;
        write!( f, "output:   {:?}", self.output_path)?;
        if let Some(panel_path) = &self.panel_path {
            write!( f, "\npanel:    {:?}", panel_path)?;
        }
        Ok(())
    }
}

fn format_range (range: Option<(f64,f64)>)->String {
    match range {
        Some((min,max)) => format!("[{}, {}]", min, max),
        None => "no finite values".to_string()
    }
}

/// load band 1 of `config.input_path`, calibrate it, write the result to `config.output_path` and
/// (if configured) store and show the side-by-side visualization. Parameters are validated before
/// the input is read
pub fn process_radiometric_correction (config: &RadcalConfig)->Result<CalibrationSummary> {
    let params = config.params()?;

    let (dn, profile) = load_first_band( &config.input_path)?;
    let no_data = if config.preserve_no_data { profile.no_data } else { None };
    let radiance = calibrate_dn_masked( &dn, &params, no_data);

    write_calibrated( &config.output_path, &radiance, &profile)?;

    let dn = dn.to_f64();
    let dn_range = Stats::from_grid( &dn).range();
    let radiance_range = Stats::from_grid( &radiance).range();
    info!("calibrated {:?} with gain={} offset={}: DN {:?} -> radiance {:?}", config.input_path, params.gain, params.offset, dn_range, radiance_range);

    let panel_path = match &config.panel_path {
        Some(panel_path) => {
            visualize( &dn, &radiance, panel_path, config)?;
            Some( panel_path.clone())
        }
        None => None
    };

    Ok( CalibrationSummary {
        input_path: config.input_path.clone(),
        output_path: config.output_path.clone(),
        panel_path,
        shape: radiance.dim(),
        input_type: profile.data_type,
        params,
        dn_range,
        radiance_range,
    })
}

/// render and store the side-by-side panel. Failing to show it is not an error
fn visualize (dn: &Array2<f64>, radiance: &Array2<f64>, panel_path: &Path, config: &RadcalConfig)->Result<()> {
    let font = load_panel_font( config.font_path.as_deref());
    if font.is_none() {
        warn!("no font found, panel is rendered without titles");
    }

    let img = render_side_by_side( dn, radiance, font.as_ref(), &PanelOptions::default())?;
    save_panel( &img, panel_path)?;
    info!("saved panel {:?}", panel_path);

    if config.show {
        if let Err(e) = show_panel( panel_path, config.viewer.as_deref()) {
            warn!("could not show panel: {}", e);
        }
    }
    Ok(())
}
