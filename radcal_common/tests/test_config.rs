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

use serde::{Serialize,Deserialize};
use radcal_common::{load_config_path, store_config_path, RadcalCommonError};

#[derive(Serialize,Deserialize,Debug,PartialEq)]
struct BandConfig {
    name: String,
    gain: f64,
    offset: f64
}

#[test]
fn test_config_store_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("band.ron");

    let config = BandConfig { name: "mss4".into(), gain: 0.368, offset: 1.0 };
    store_config_path( &config, &path).unwrap();

    let loaded: BandConfig = load_config_path( &path).unwrap();
    assert_eq!( loaded, config);
}

#[test]
fn test_config_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("band.ron");
    std::fs::write( &path, r#"BandConfig( name: "mss5", gain: 2.0, offset: -0.5 )"#).unwrap();

    let loaded: BandConfig = load_config_path( &path).unwrap();
    assert_eq!( loaded.gain, 2.0);
    assert_eq!( loaded.offset, -0.5);
}

#[test]
fn test_missing_config() {
    let res: Result<BandConfig,_> = load_config_path("does/not/exist.ron");
    assert!( matches!( res, Err(RadcalCommonError::ConfigNotFound(_))));
}
