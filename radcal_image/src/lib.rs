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

/// visualization of calibration results: grayscale renderings of f64 grids with color bars,
/// composed into side-by-side panels. This wraps the external 'image' and 'imageproc' crates

use std::{path::{Path,PathBuf}, process::Command};
use image::{imageops::{self, FilterType}, DynamicImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::{drawing::{draw_hollow_rect_mut, draw_text_mut, text_size}, rect::Rect};
use ab_glyph::{FontVec, PxScale};
use ndarray::Array2;
use tracing::{debug,warn};

use radcal_common::fs::{existing_file, filepath_contents};

mod errors;
pub use errors::{Result,RadcalImageError};

mod stats;
pub use stats::Stats;

pub type GrayImage8 = ImageBuffer<Luma<u8>, Vec<u8>>;

pub const ORIGINAL_TITLE: &str = "Original Image (DN)";
pub const CALIBRATED_TITLE: &str = "Radiance-Corrected Image";

const BACKGROUND: Rgb<u8> = Rgb([255,255,255]);
const FOREGROUND: Rgb<u8> = Rgb([0,0,0]);

/// layout parameters of rendered panels (all sizes in pixels)
#[derive(Debug,Clone)]
pub struct PanelOptions {
    pub max_image_size: u32,  // grids are scaled down so that neither width nor height exceeds this
    pub margin: u32,
    pub color_bar_width: u32,
    pub font_size: f32,
}

impl Default for PanelOptions {
    fn default()->Self {
        PanelOptions { max_image_size: 600, margin: 20, color_bar_width: 20, font_size: 16.0 }
    }
}

/// a titled grid to render
pub struct GridPanel<'a> {
    pub title: &'a str,
    pub grid: &'a Array2<f64>,
}

/* #region grayscale rendering *******************************************************************************/

/// linearly map grid values from [min,max] to [0,255]. Non-finite values are rendered black, as are
/// all values of constant grids
pub fn to_gray8 (grid: &Array2<f64>, range: Option<(f64,f64)>)->Result<GrayImage8> {
    let (rows,cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return Err( RadcalImageError::InvalidDimensions( format!("cannot render empty grid {}x{}", rows, cols)))
    }

    let (min,max) = range.unwrap_or( (0.0, 0.0));
    let d = max - min;
    let scale = if d > 0.0 && d.is_finite() { 255.0 / d } else { 0.0 };

    let mut img = GrayImage8::new( cols as u32, rows as u32);
    for ((j,i),v) in grid.indexed_iter() {
        let l = if v.is_finite() { ((v - min) * scale).round().clamp( 0.0, 255.0) as u8 } else { 0 };
        img.put_pixel( i as u32, j as u32, Luma([l]));
    }

    Ok(img)
}

/// a vertical gradient from white (top, max value) to black (bottom, min value)
pub fn color_bar (width: u32, height: u32)->GrayImage8 {
    let h = (height.max(2) - 1) as f32;
    GrayImage8::from_fn( width, height, |_,y| Luma([ (255.0 * (1.0 - y as f32 / h)).round() as u8 ]))
}

/// dimensions of (width,height) scaled down to fit into max_size x max_size, keeping the aspect ratio
pub fn fit_size (width: u32, height: u32, max_size: u32)->(u32,u32) {
    let longest = width.max(height);
    if longest <= max_size || longest == 0 {
        (width, height)
    } else {
        let s = max_size as f64 / longest as f64;
        (((width as f64 * s).round() as u32).max(1), ((height as f64 * s).round() as u32).max(1))
    }
}

pub fn format_value (v: f64)->String {
    let a = v.abs();
    if a != 0.0 && (a >= 1e5 || a < 1e-2) { format!("{:.3e}", v) } else { format!("{:.2}", v) }
}

/* #endregion grayscale rendering */

/* #region panel composition *********************************************************************************/

struct PanelCell {
    image: GrayImage8,
    range: Option<(f64,f64)>,
    labels: [String;3], // max, mid, min
    width: u32,
    height: u32,
}

/// render all panels next to each other, each with its own value range and color bar.
/// Titles and range labels are only drawn if there is a font
pub fn render_panels (panels: &[GridPanel], font: Option<&FontVec>, opts: &PanelOptions)->Result<RgbImage> {
    if panels.is_empty() {
        return Err( RadcalImageError::InvalidDimensions("no panels to render".into()))
    }

    let scale = PxScale::from( opts.font_size);
    let title_height = if font.is_some() { (opts.font_size * 1.5).ceil() as u32 } else { 0 };
    let gap = opts.margin / 2;

    let mut cells: Vec<PanelCell> = Vec::with_capacity( panels.len());
    for panel in panels {
        let range = Stats::from_grid( panel.grid).range();
        let gray = to_gray8( panel.grid, range)?;
        let (w,h) = fit_size( gray.width(), gray.height(), opts.max_image_size);
        let image = if (w,h) != gray.dimensions() { imageops::resize( &gray, w, h, FilterType::Triangle) } else { gray };

        let labels = match range {
            Some((min,max)) => [format_value(max), format_value( (min + max) / 2.0), format_value(min)],
            None => ["n/a".to_string(), String::new(), "n/a".to_string()]
        };
        let label_width = match font {
            Some(font) => labels.iter().map( |l| text_size( scale, font, l).0).max().unwrap_or(0) + gap,
            None => 0
        };

        let width = opts.margin + w + gap + opts.color_bar_width + gap + label_width + opts.margin;
        let height = opts.margin + title_height + h + opts.margin;
        cells.push( PanelCell { image, range, labels, width, height });
    }

    let total_width: u32 = cells.iter().map( |c| c.width).sum();
    let total_height: u32 = cells.iter().map( |c| c.height).max().unwrap_or(0);
    let mut canvas = RgbImage::from_pixel( total_width, total_height, BACKGROUND);

    let mut x0: u32 = 0;
    for (cell,panel) in cells.iter().zip( panels.iter()) {
        let (w,h) = cell.image.dimensions();
        let x_img = x0 + opts.margin;
        let y_img = opts.margin + title_height;

        let rgb = DynamicImage::ImageLuma8( cell.image.clone()).to_rgb8();
        imageops::overlay( &mut canvas, &rgb, x_img as i64, y_img as i64);

        let x_bar = x_img + w + gap;
        let bar = DynamicImage::ImageLuma8( color_bar( opts.color_bar_width, h)).to_rgb8();
        imageops::overlay( &mut canvas, &bar, x_bar as i64, y_img as i64);
        draw_hollow_rect_mut( &mut canvas, Rect::at( x_bar as i32, y_img as i32).of_size( opts.color_bar_width, h), FOREGROUND);

        if let Some(font) = font {
            let (tw,_) = text_size( scale, font, panel.title);
            let x_title = x_img as i32 + (w as i32 - tw as i32) / 2;
            draw_text_mut( &mut canvas, FOREGROUND, x_title.max(0), opts.margin as i32, scale, font, panel.title);

            let x_label = (x_bar + opts.color_bar_width + gap) as i32;
            let th = opts.font_size as i32;
            let ys = [ y_img as i32, (y_img + h / 2) as i32 - th / 2, (y_img + h) as i32 - th ];
            for (label,y) in cell.labels.iter().zip( ys.iter()) {
                draw_text_mut( &mut canvas, FOREGROUND, x_label, *y, scale, font, label);
            }
        }

        debug!("rendered panel '{}' {}x{} range {:?}", panel.title, w, h, cell.range);
        x0 += cell.width;
    }

    Ok(canvas)
}

/// the original DN grid and the calibrated grid side by side
pub fn render_side_by_side (original: &Array2<f64>, calibrated: &Array2<f64>, font: Option<&FontVec>, opts: &PanelOptions)->Result<RgbImage> {
    let panels = [
        GridPanel { title: ORIGINAL_TITLE, grid: original },
        GridPanel { title: CALIBRATED_TITLE, grid: calibrated },
    ];
    render_panels( &panels, font, opts)
}

pub fn save_panel<P> (img: &RgbImage, path: P)->Result<()> where P: AsRef<Path> {
    Ok( img.save( path.as_ref())? )
}

/* #endregion panel composition */

/* #region viewer ********************************************************************************************/

/// open the image at `path` with the given viewer command (or the platform default) and wait for the
/// command to terminate. Note that some launchers (e.g. xdg-open) return before the viewer window is closed
pub fn show_panel<P> (path: P, viewer: Option<&str>)->Result<()> where P: AsRef<Path> {
    let path = path.as_ref();
    let (cmd, args): (&str, &[&str]) = match viewer {
        Some(cmd) => (cmd, &[]),
        None => default_viewer_command()
    };

    let status = Command::new( cmd).args( args).arg( path).status()?;
    if status.success() {
        Ok(())
    } else {
        Err( RadcalImageError::ViewerFailed( format!("{} {:?} exited with {}", cmd, path, status)))
    }
}

fn default_viewer_command ()->(&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &["-W"])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", "/WAIT", ""])
    } else {
        ("xdg-open", &[])
    }
}

/* #endregion viewer */

/* #region font resources ************************************************************************************/

// well known locations of fonts we can use for titles and labels
const SYSTEM_FONT_PATHS: [&str;5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn find_system_font ()->Option<PathBuf> {
    SYSTEM_FONT_PATHS.iter().map( PathBuf::from).find( |p| p.is_file())
}

pub fn load_font<P: AsRef<Path>> (path: P)->Result<FontVec> {
    let path = existing_file( path).map_err( |e| RadcalImageError::NotFoundError( format!("font: {}", e)))?;
    let data = filepath_contents( &path)?;
    Ok( FontVec::try_from_vec( data)? )
}

/// the configured font, or a system font if none is configured. Panels are rendered without text if
/// this returns None
pub fn load_panel_font (font_path: Option<&Path>)->Option<FontVec> {
    let path = match font_path {
        Some(path) => path.to_path_buf(),
        None => find_system_font()?
    };

    match load_font( &path) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("no panel font, rendering without titles: {}", e);
            None
        }
    }
}

/* #endregion font resources */
