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

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One row of the priority table: flights whose percentile position falls
/// in `[percent_low, percent_high)` draw a priority uniformly from
/// `[value_low, value_high]`.
///
/// On the wire a range is the four-element array
/// `[percentLow, percentHigh, valueLow, valueHigh]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct PriorityRange {
    pub percent_low: f64,
    pub percent_high: f64,
    pub value_low: f64,
    pub value_high: f64,
}

impl PriorityRange {
    #[inline]
    pub fn new(percent_low: f64, percent_high: f64, value_low: f64, value_high: f64) -> Self {
        Self {
            percent_low,
            percent_high,
            value_low,
            value_high,
        }
    }

    #[inline]
    pub fn contains_percent(&self, position_percent: f64) -> bool {
        position_percent >= self.percent_low && position_percent < self.percent_high
    }
}

impl From<[f64; 4]> for PriorityRange {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<PriorityRange> for [f64; 4] {
    fn from(r: PriorityRange) -> Self {
        [r.percent_low, r.percent_high, r.value_low, r.value_high]
    }
}

/// Draws one priority multiplier for a flight at `position_percent` of
/// the horizon. The first matching range wins; unmatched positions get
/// the neutral multiplier 1.0. Every call is an independent draw from
/// the supplied generator.
pub fn sample_priority<R: Rng + ?Sized>(
    ranges: &[PriorityRange],
    position_percent: f64,
    rng: &mut R,
) -> f64 {
    for range in ranges {
        if range.contains_percent(position_percent) {
            if range.value_low >= range.value_high {
                return range.value_low;
            }
            return rng.random_range(range.value_low..=range.value_high);
        }
    }
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table() -> Vec<PriorityRange> {
        vec![
            PriorityRange::new(0.0, 20.0, 0.5, 1.0),
            PriorityRange::new(20.0, 80.0, 1.0, 2.0),
            PriorityRange::new(80.0, 100.0, 5.0, 10.0),
        ]
    }

    #[test]
    fn test_draw_stays_within_the_matching_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let p = sample_priority(&table(), 10.0, &mut rng);
            assert!((0.5..=1.0).contains(&p));
            let p = sample_priority(&table(), 50.0, &mut rng);
            assert!((1.0..=2.0).contains(&p));
            let p = sample_priority(&table(), 99.9, &mut rng);
            assert!((5.0..=10.0).contains(&p));
        }
    }

    #[test]
    fn test_unmatched_position_defaults_to_one() {
        let sparse = vec![PriorityRange::new(0.0, 10.0, 3.0, 4.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_priority(&sparse, 50.0, &mut rng), 1.0);
        assert_eq!(sample_priority(&[], 0.0, &mut rng), 1.0);
    }

    #[test]
    fn test_upper_percent_bound_is_exclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        // 20% falls into the second range, not the first.
        let p = sample_priority(&table(), 20.0, &mut rng);
        assert!((1.0..=2.0).contains(&p));
    }

    #[test]
    fn test_degenerate_value_range_returns_the_lower_value() {
        let fixed = vec![PriorityRange::new(0.0, 100.0, 2.0, 2.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(sample_priority(&fixed, 40.0, &mut rng), 2.0);
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let xs: Vec<f64> = (0..10)
            .map(|_| sample_priority(&table(), 50.0, &mut a))
            .collect();
        let ys: Vec<f64> = (0..10)
            .map(|_| sample_priority(&table(), 50.0, &mut b))
            .collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_wire_format_is_a_four_element_array() {
        let r = PriorityRange::new(0.0, 20.0, 0.8, 1.2);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "[0.0,20.0,0.8,1.2]");
        let back: PriorityRange = serde_json::from_str("[20, 80, 1.0, 1.0]").unwrap();
        assert_eq!(back, PriorityRange::new(20.0, 80.0, 1.0, 1.0));
    }
}
