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

use anyhow::Result;
use ron::ser::PrettyConfig;
use radcal_common::{define_cli,check_cli};
use radcal_gdal::{open_raster, read_profile, Metadata};

define_cli! { ARGS [about="show_profile - show the raster profile and band metadata of a GDAL dataset"] =
    ron: bool [help="print the profile as RON", long],
    path: String [help="path to GDAL dataset to analyze"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);

    let ds = open_raster( &ARGS.path)?;
    let profile = read_profile( &ds)?;

    if ARGS.ron {
        println!("{}", ron::ser::to_string_pretty( &profile, PrettyConfig::new().struct_names(true))?);
        return Ok(())
    }

    println!("driver:        {}", profile.driver);
    println!("raster size:   {},{}", profile.width, profile.height);
    println!("bands:         {}", profile.count);
    println!("data type:     {}", profile.data_type);
    println!("no data:       {:?}", profile.no_data);
    println!("block size:    {:?}", profile.block_size);
    println!("compression:   {}", profile.compression.as_deref().unwrap_or("none"));
    println!("interleave:    {}", profile.interleave.as_deref().unwrap_or("none"));
    println!("geo transform: {:?}", profile.geo_transform);
    println!("crs:           {}", profile.crs_wkt.as_deref().unwrap_or("none"));
    show_meta( &ds, 0);

    for band_id in 1..=ds.raster_count() {
        println!("--- band {}", band_id);
        let band = ds.rasterband( band_id)?;
        show_meta( &band, 4);
    }

    Ok(())
}

fn show_meta<M> (meta: &M, level: usize) where M: Metadata {
    let indent = " ".repeat(level);

    if let Ok(descr) = meta.description() {
        if !descr.is_empty() { println!("{}description: {}", indent, descr); }
    }

    for domain in meta.metadata_domains() {
        if let Some(items) = meta.metadata_domain( &domain) {
            if !items.is_empty() {
                println!("{}domain: '{}'", indent, domain);
                for item in &items {
                    println!("{}    {}", indent, item);
                }
            }
        }
    }
}
