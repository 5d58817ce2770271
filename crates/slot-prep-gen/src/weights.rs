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

//! Piecewise-linear weight curves.
//!
//! A flight's preference for each slot is a five-region curve over the
//! horizon: flat at `min_value` before the scheduled time, ramping up to
//! the margin window, peaking at the wished time, ramping down again,
//! and falling back to `min_value` after the window. Each ramp is a line
//! anchored at its two region boundaries.

use crate::err::GenerateError;
use slot_prep_model::{
    flight::Flight, horizon::SlotSequence, margin::MarginEntry, params::OptimizationParameters,
};

/// One linear piece of the curve: anchored at `(start, start_value)` and
/// `(end, end_value)`, offsets in seconds from the horizon start.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ramp {
    start: i64,
    start_value: f64,
    end: i64,
    end_value: f64,
}

impl Ramp {
    #[inline]
    fn new(start: i64, start_value: f64, end: i64, end_value: f64) -> Self {
        Self {
            start,
            start_value,
            end,
            end_value,
        }
    }

    /// Line value at offset `x`. A zero-width ramp collapses to its entry
    /// anchor instead of dividing by zero.
    fn value_at(&self, x: i64) -> f64 {
        if self.end == self.start {
            tracing::warn!(
                "Degenerate curve interval at offset {}s, using anchor value {}",
                self.start,
                self.start_value
            );
            return self.start_value;
        }
        let k = (self.end_value - self.start_value) / (self.end - self.start) as f64;
        k * (x - self.start) as f64 + self.start_value
    }
}

/// Ordered, mutually exclusive regions of the preference curve. Each
/// variant carries its two boundary anchors so evaluation is the same
/// line formula everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CurveRegion {
    /// Slot lies before the scheduled time: flat floor.
    BeforeSchedule,
    /// Scheduled time (or horizon start) up to the window: floor to zero.
    RampUp(Ramp),
    /// Window start up to the wished time: drop value to peak.
    RampToWish(Ramp),
    /// Wished time to window end: peak back down to the drop value.
    RampDown(Ramp),
    /// Past the window: zero down to the floor at the horizon end.
    AfterWindow(Ramp),
}

impl CurveRegion {
    fn evaluate(&self, x: i64, min_value: f64) -> f64 {
        match self {
            CurveRegion::BeforeSchedule => min_value,
            // The outer ramps never drop below the floor.
            CurveRegion::RampUp(r) | CurveRegion::AfterWindow(r) => r.value_at(x).max(min_value),
            CurveRegion::RampToWish(r) | CurveRegion::RampDown(r) => r.value_at(x),
        }
    }
}

/// The full curve for one margin entry against one horizon.
#[derive(Debug, Clone, PartialEq)]
struct WeightCurve<'a> {
    margin: &'a MarginEntry,
    ramp_up: Ramp,
    ramp_to_wish: Ramp,
    ramp_down: Ramp,
    after_window: Ramp,
}

impl<'a> WeightCurve<'a> {
    fn new(
        margin: &'a MarginEntry,
        sequence: &SlotSequence,
        params: &OptimizationParameters,
    ) -> Self {
        let start = sequence.start();
        let offset = |t: chrono::DateTime<chrono::Utc>| (t - start).num_seconds();

        // Negative offsets clamp to the horizon start; the ramp up is
        // anchored at the scheduled time only when that lies inside the
        // horizon.
        let scheduled = offset(margin.scheduled_time()).max(0);
        let not_before = offset(margin.time_not_before()).max(0);
        let wished = offset(margin.time_wished()).max(0);
        let not_after = offset(margin.time_not_after()).max(0);
        let horizon_end = offset(sequence.end());

        let min = params.min_value();
        let max = params.max_value();
        let drop = params.drop_value();

        Self {
            margin,
            ramp_up: Ramp::new(scheduled, min, not_before, 0.0),
            ramp_to_wish: Ramp::new(not_before, drop, wished, max),
            ramp_down: Ramp::new(wished, max, not_after, drop),
            after_window: Ramp::new(not_after, 0.0, horizon_end, min),
        }
    }

    fn region_at(&self, time: chrono::DateTime<chrono::Utc>) -> CurveRegion {
        if time < self.margin.scheduled_time() {
            CurveRegion::BeforeSchedule
        } else if time < self.margin.time_not_before() {
            CurveRegion::RampUp(self.ramp_up)
        } else if time < self.margin.time_wished() {
            CurveRegion::RampToWish(self.ramp_to_wish)
        } else if time < self.margin.time_not_after() {
            CurveRegion::RampDown(self.ramp_down)
        } else {
            CurveRegion::AfterWindow(self.after_window)
        }
    }
}

/// Computes the integer weight map for one margin entry, aligned to slot
/// order. An out-of-order margin window is logged and still produces a
/// full-length (possibly non-monotonic) map.
pub fn weight_map(
    margin: &MarginEntry,
    sequence: &SlotSequence,
    params: &OptimizationParameters,
) -> Vec<i64> {
    if !margin.is_ordered() {
        tracing::warn!(
            "Margin window for flight {} is out of order (not-before {}, wished {}, not-after {}); \
             the weight map may contain unexpected values",
            margin.flight_id(),
            margin.time_not_before(),
            margin.time_wished(),
            margin.time_not_after()
        );
    }

    let curve = WeightCurve::new(margin, sequence, params);
    let priority = margin.priority();

    sequence
        .iter()
        .map(|slot| {
            let x = sequence.offset_seconds(slot);
            let raw = curve.region_at(slot.time()).evaluate(x, params.min_value());
            let scaled = if priority != 1.0 { raw * priority } else { raw };
            scaled as i64
        })
        .collect()
}

/// Builds the slot sequence for `params` and computes one [`Flight`] per
/// margin entry.
pub fn generate_flights(
    margins: &[MarginEntry],
    params: &OptimizationParameters,
) -> Result<Vec<Flight>, GenerateError> {
    let sequence = SlotSequence::generate(
        params.start_time(),
        params.end_time(),
        params.interval_seconds(),
    )?;
    Ok(margins
        .iter()
        .map(|margin| {
            Flight::new(
                margin.flight_id().clone(),
                margin.scheduled_time(),
                weight_map(margin, &sequence, params),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use slot_prep_model::flight::FlightId;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 6, 0, 0).unwrap()
    }

    fn params(interval: i64) -> OptimizationParameters {
        OptimizationParameters::new(
            "opt-1",
            t0(),
            t0() + Duration::seconds(3600),
            interval,
            None,
            -10.0,
            100.0,
            20.0,
        )
    }

    fn margin(
        scheduled: i64,
        not_before: i64,
        wished: i64,
        not_after: i64,
        priority: f64,
    ) -> MarginEntry {
        MarginEntry::new(
            FlightId::from("F1"),
            t0() + Duration::seconds(scheduled),
            t0() + Duration::seconds(not_before),
            t0() + Duration::seconds(wished),
            t0() + Duration::seconds(not_after),
            priority,
        )
    }

    fn sequence(interval: i64) -> SlotSequence {
        SlotSequence::generate(t0(), t0() + Duration::seconds(3600), interval).unwrap()
    }

    #[test]
    fn test_curve_hits_all_anchors_exactly() {
        let m = margin(0, 600, 1800, 3000, 1.0);
        let weights = weight_map(&m, &sequence(600), &params(600));
        assert_eq!(weights, vec![-10, 20, 60, 100, 60, 0, -10]);
    }

    #[test]
    fn test_priority_scales_and_truncates_toward_zero() {
        let m = margin(0, 600, 1800, 3000, 2.0);
        let weights = weight_map(&m, &sequence(600), &params(600));
        assert_eq!(weights, vec![-20, 40, 120, 200, 120, 0, -20]);
    }

    #[test]
    fn test_truncation_is_toward_zero_for_negative_values() {
        // Ramp up from -10 at 0s to 0 at 600s: at 100s the raw value is
        // -8.33..., which must truncate to -8, not round down to -9.
        let m = margin(0, 600, 1800, 3000, 1.0);
        let weights = weight_map(&m, &sequence(100), &params(100));
        assert_eq!(weights[1], -8);
        assert_eq!(weights[2], -6);
    }

    #[test]
    fn test_slots_before_scheduled_time_sit_on_the_floor() {
        let m = margin(1200, 1800, 2400, 3000, 1.0);
        let weights = weight_map(&m, &sequence(600), &params(600));
        assert_eq!(weights[0], -10);
        assert_eq!(weights[1], -10);
        // At the scheduled time the ramp up starts at the floor.
        assert_eq!(weights[2], -10);
        // Wished time peaks.
        assert_eq!(weights[4], 100);
    }

    #[test]
    fn test_ramp_up_is_anchored_at_scheduled_time_inside_horizon() {
        // Scheduled at 600s, window opens at 1800s: the ramp runs from
        // -10 at 600s to 0 at 1800s, so 1200s sits at -5.
        let m = margin(600, 1800, 2400, 3000, 1.0);
        let weights = weight_map(&m, &sequence(600), &params(600));
        assert_eq!(weights[1], -10);
        assert_eq!(weights[2], -5);
    }

    #[test]
    fn test_scheduled_before_horizon_anchors_at_horizon_start() {
        // Scheduled 600s before the horizon: every slot is past the
        // scheduled time and the ramp is anchored at the horizon start.
        let m = margin(-600, 600, 1800, 3000, 1.0);
        let weights = weight_map(&m, &sequence(600), &params(600));
        assert_eq!(weights[0], -10);
        assert_eq!(weights[1], 20);
    }

    #[test]
    fn test_window_end_at_horizon_end_collapses_to_anchor() {
        // not_after == horizon end: the trailing ramp has zero width and
        // the final slot takes the boundary anchor value 0.
        let m = margin(0, 600, 1800, 3600, 1.0);
        let weights = weight_map(&m, &sequence(600), &params(600));
        assert_eq!(weights.len(), 7);
        assert_eq!(weights[6], 0);
    }

    #[test]
    fn test_inverted_margin_window_still_yields_full_map() {
        let m = margin(0, 1800, 600, 3000, 1.0);
        let weights = weight_map(&m, &sequence(600), &params(600));
        assert_eq!(weights.len(), 7);
    }

    #[test]
    fn test_outer_ramps_never_drop_below_the_floor() {
        // A window far outside the horizon pushes both outer ramps well
        // past the floor; every value must clamp at min_value.
        let m = margin(0, 60, 120, 180, 1.0);
        let weights = weight_map(&m, &sequence(600), &params(600));
        for w in &weights[1..] {
            assert!(*w >= -10, "weight {w} fell below the floor");
        }
    }

    #[test]
    fn test_generate_flights_one_per_margin() {
        let margins = vec![
            margin(0, 600, 1800, 3000, 1.0),
            MarginEntry::new(
                FlightId::from("F2"),
                t0(),
                t0() + Duration::seconds(1200),
                t0() + Duration::seconds(1800),
                t0() + Duration::seconds(2400),
                1.0,
            ),
        ];
        let flights = generate_flights(&margins, &params(600)).unwrap();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].flight_id.as_str(), "F1");
        assert_eq!(flights[1].flight_id.as_str(), "F2");
        for f in &flights {
            assert_eq!(f.weight_map.len(), 7);
        }
    }

    #[test]
    fn test_generate_flights_rejects_bad_interval() {
        let bad = OptimizationParameters::new(
            "opt-bad",
            t0(),
            t0() + Duration::seconds(3600),
            0,
            None,
            -10.0,
            100.0,
            20.0,
        );
        assert!(generate_flights(&[], &bad).is_err());
    }
}
