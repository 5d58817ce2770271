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

use crate::common::{Identifier, IdentifierMarkerName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightIdMarker;

impl IdentifierMarkerName for FlightIdMarker {
    const NAME: &'static str = "FlightId";
}

pub type FlightId = Identifier<String, FlightIdMarker>;

/// A flight with its per-slot preference scores, one integer per slot in
/// sequence order. This is the record the downstream optimizer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_id: FlightId,
    pub scheduled_time: DateTime<Utc>,
    pub weight_map: Vec<i64>,
}

impl Flight {
    #[inline]
    pub fn new(flight_id: FlightId, scheduled_time: DateTime<Utc>, weight_map: Vec<i64>) -> Self {
        Self {
            flight_id,
            scheduled_time,
            weight_map,
        }
    }
}

impl std::fmt::Display for Flight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flight: {} scheduled {}, {} weights",
            self.flight_id,
            self.scheduled_time,
            self.weight_map.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let flight = Flight::new(
            FlightId::from("F1"),
            Utc.with_ymd_and_hms(2021, 3, 1, 6, 0, 0).unwrap(),
            vec![-10, 20, 100],
        );
        let json = serde_json::to_value(&flight).unwrap();
        assert_eq!(json["flightId"], "F1");
        assert_eq!(json["weightMap"], serde_json::json!([-10, 20, 100]));
        assert!(json["scheduledTime"].is_string());
    }

    #[test]
    fn test_round_trip_preserves_weights_exactly() {
        let flight = Flight::new(
            FlightId::from("F2"),
            Utc.with_ymd_and_hms(2021, 3, 1, 6, 0, 0).unwrap(),
            vec![i64::MIN, -1, 0, 1, i64::MAX],
        );
        let json = serde_json::to_string(&flight).unwrap();
        let back: Flight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flight);
    }
}
