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

use crate::{
    flight::{Flight, FlightId},
    margin::MarginEntry,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slot as it appears on the wire: time only, order carries the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    pub time: DateTime<Utc>,
}

impl SlotRecord {
    #[inline]
    pub fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

/// Margin summary embedded in the scenario document so the optimizer can
/// reason about the windows that produced the weight maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginRecord {
    pub flight_id: FlightId,
    pub scheduled_time: DateTime<Utc>,
    pub time_not_before: DateTime<Utc>,
    pub time_wished: DateTime<Utc>,
    pub time_not_after: DateTime<Utc>,
}

impl From<&MarginEntry> for MarginRecord {
    fn from(m: &MarginEntry) -> Self {
        Self {
            flight_id: m.flight_id().clone(),
            scheduled_time: m.scheduled_time(),
            time_not_before: m.time_not_before(),
            time_wished: m.time_wished(),
            time_not_after: m.time_not_after(),
        }
    }
}

/// The exact payload shape the downstream optimizer expects as input:
/// one optimization session with its slots, flights, and optional
/// framework-specific parameter map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDocument {
    pub opt_id: String,
    pub initial_flight_sequence: Vec<FlightId>,
    pub flights: Vec<Flight>,
    pub slots: Vec<SlotRecord>,
    pub optimization_framework: Option<String>,
    pub margins: Option<Vec<MarginRecord>>,
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ScenarioDocument {
    #[inline]
    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
