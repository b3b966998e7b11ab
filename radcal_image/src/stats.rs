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

/// running min/max/mean/variance of grid values. Non-finite values (NaN, +/-inf) are counted
/// separately and do not contribute to the value range
#[derive(Debug,Clone,PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,

    pub s: f64,
    pub n: usize,
    pub n_non_finite: usize
}

impl Stats {
    pub fn new ()->Self {
        Stats { min: f64::MAX, max: f64::MIN, mean: 0.0, variance: 0.0, s: 0.0, n: 0, n_non_finite: 0 }
    }

    pub fn from_grid (grid: &Array2<f64>)->Self {
        let mut stats = Stats::new();
        for v in grid.iter() { stats.add( *v) }
        stats
    }

    pub fn add (&mut self, v: f64) {
        if !v.is_finite() {
            self.n_non_finite += 1;
            return
        }

        self.n += 1;

        if v < self.min { self.min = v }
        if v > self.max { self.max = v }

        let prev_mean = self.mean;
        let n = self.n as f64;

        self.mean = (v + (n * prev_mean) - prev_mean) / n;
        self.s = self.s + (v - prev_mean) * (v - self.mean);
        self.variance = self.s / n;
    }

    /// (min,max) of the finite values, None if there were none
    pub fn range (&self)->Option<(f64,f64)> {
        if self.n > 0 { Some( (self.min, self.max) ) } else { None }
    }
}
