// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{demand::DemandPreset, priority::PriorityRange};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Test-data generator configuration, usually read from a JSON file.
/// Invalid or missing values are repaired by [`GeneratorConfig::normalized`]
/// rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub flight_count: i64,
    pub flight_prefix: Option<String>,
    pub slot_count: i64,
    pub slot_start_time: Option<DateTime<Utc>>,
    pub slot_length_sec: i64,
    /// Width of the whole margin window in seconds; the wished time sits
    /// in its middle.
    pub margin_window_length: i64,
    pub distribution_setting: DemandPreset,
    pub optimization_framework: Option<String>,
    pub priority_settings: Vec<PriorityRange>,
    pub min_value: f64,
    pub max_value: f64,
    pub drop_value: f64,
    /// Maximum seconds per optimization session, forwarded into the
    /// framework parameter payloads.
    pub max_time: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            flight_count: 0,
            flight_prefix: None,
            slot_count: 0,
            slot_start_time: None,
            slot_length_sec: 0,
            margin_window_length: 0,
            distribution_setting: DemandPreset::Uniform,
            optimization_framework: None,
            priority_settings: Vec::new(),
            min_value: 0.0,
            max_value: 0.0,
            drop_value: 0.0,
            max_time: 0,
        }
    }
}

impl GeneratorConfig {
    /// Repairs invalid inputs to usable defaults, mirroring what the
    /// generator guarantees downstream: at least one flight, flight and
    /// slot counts equal, a positive slot length and margin window, and
    /// a non-empty priority table.
    pub fn normalized(mut self) -> Self {
        if self.flight_count < 1 {
            tracing::info!("Flight count must be at least one, using 1");
            self.flight_count = 1;
        }
        if self.slot_count < 1 {
            self.slot_count = 1;
        }
        if self.flight_count != self.slot_count {
            tracing::info!(
                "Aligning flight count {} to slot count {}",
                self.flight_count,
                self.slot_count
            );
            self.flight_count = self.slot_count;
        }
        if self.flight_prefix.as_deref().map_or(true, str::is_empty) {
            self.flight_prefix = Some("F".to_string());
        }
        if self.slot_start_time.is_none() {
            self.slot_start_time = Some(Utc::now());
        }
        if self.slot_length_sec < 1 {
            self.slot_length_sec = 60;
        }
        if self.margin_window_length < 1 {
            self.margin_window_length = 600;
        }
        if self.optimization_framework.is_none() {
            self.optimization_framework = Some("OPTAPLANNER".to_string());
        }
        if self.priority_settings.is_empty() {
            self.priority_settings = vec![PriorityRange::new(0.0, 100.0, 0.9, 1.1)];
        }
        if self.min_value > self.max_value {
            tracing::info!(
                "Swapping inverted weight bounds min {} / max {}",
                self.min_value,
                self.max_value
            );
            std::mem::swap(&mut self.min_value, &mut self.max_value);
        }
        if self.max_time < 1 {
            self.max_time = 60;
        }

        tracing::info!(
            "Generator configuration: {} flights over {} slots of {}s from {}, window {}s, \
             preset {}, framework {}, weights [{}, {}] drop {}, max session time {}s",
            self.flight_count,
            self.slot_count,
            self.slot_length_sec,
            self.slot_start_time.expect("start time was defaulted"),
            self.margin_window_length,
            self.distribution_setting,
            self.optimization_framework.as_deref().unwrap_or("-"),
            self.min_value,
            self.max_value,
            self.drop_value,
            self.max_time
        );
        self
    }
}
