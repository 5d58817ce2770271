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

use crate::flight::FlightId;
use chrono::{DateTime, Utc};

/// Per-flight time-window constraints. The expected ordering
/// `time_not_before <= time_wished <= time_not_after` is not enforced;
/// consumers log a violation and proceed with whatever curve results.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginEntry {
    flight_id: FlightId,
    scheduled_time: DateTime<Utc>,
    time_not_before: DateTime<Utc>,
    time_wished: DateTime<Utc>,
    time_not_after: DateTime<Utc>,
    priority: f64,
}

impl MarginEntry {
    #[inline]
    pub fn new(
        flight_id: FlightId,
        scheduled_time: DateTime<Utc>,
        time_not_before: DateTime<Utc>,
        time_wished: DateTime<Utc>,
        time_not_after: DateTime<Utc>,
        priority: f64,
    ) -> Self {
        Self {
            flight_id,
            scheduled_time,
            time_not_before,
            time_wished,
            time_not_after,
            priority,
        }
    }

    #[inline]
    pub fn flight_id(&self) -> &FlightId {
        &self.flight_id
    }

    #[inline]
    pub fn scheduled_time(&self) -> DateTime<Utc> {
        self.scheduled_time
    }

    #[inline]
    pub fn time_not_before(&self) -> DateTime<Utc> {
        self.time_not_before
    }

    #[inline]
    pub fn time_wished(&self) -> DateTime<Utc> {
        self.time_wished
    }

    #[inline]
    pub fn time_not_after(&self) -> DateTime<Utc> {
        self.time_not_after
    }

    #[inline]
    pub fn priority(&self) -> f64 {
        self.priority
    }

    /// Whether the margin window is in the expected order.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.time_not_before <= self.time_wished && self.time_wished <= self.time_not_after
    }
}

impl std::fmt::Display for MarginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Margin: {} scheduled {}, window [{}, {}], wished {}, priority {}",
            self.flight_id,
            self.scheduled_time,
            self.time_not_before,
            self.time_not_after,
            self.time_wished,
            self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 6, 0, 0).unwrap()
    }

    fn margin(not_before: i64, wished: i64, not_after: i64) -> MarginEntry {
        MarginEntry::new(
            FlightId::from("F1"),
            t0(),
            t0() + Duration::seconds(not_before),
            t0() + Duration::seconds(wished),
            t0() + Duration::seconds(not_after),
            1.0,
        )
    }

    #[test]
    fn test_ordered_window() {
        assert!(margin(600, 1800, 3000).is_ordered());
        assert!(margin(600, 600, 600).is_ordered());
    }

    #[test]
    fn test_inverted_window_is_detected_but_constructible() {
        let m = margin(1800, 600, 3000);
        assert!(!m.is_ordered());
        assert_eq!(m.flight_id().as_str(), "F1");
    }
}
