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

//! Flight-count allocation.
//!
//! Turns a continuous demand shape into an integer count per slot bucket
//! that sums exactly to the flight count. Truncating the scaled demand
//! loses flights; the repair pass reinserts them into empty buckets
//! while keeping the shape's spatial bias, and whatever difference
//! remains afterwards lands on the current maximum bucket.

use crate::demand::{DemandPreset, RepairBias, percentile_bucket};
use crate::err::{AllocationError, CountMismatchError, NoFlightsError};

/// Computes the per-bucket flight counts for `flight_count` flights over
/// `slot_count` buckets. The two counts must match (the generator keeps
/// them equal by construction); the result always sums to
/// `flight_count` exactly.
pub fn flight_count_map(
    flight_count: usize,
    slot_count: usize,
    preset: DemandPreset,
) -> Result<Vec<u32>, AllocationError> {
    if flight_count == 0 {
        return Err(NoFlightsError)?;
    }
    if flight_count != slot_count {
        return Err(CountMismatchError::new(flight_count, slot_count))?;
    }
    if slot_count == 1 {
        return Ok(vec![flight_count as u32]);
    }

    let distribution = match preset.distribution() {
        Some(d) => d,
        // Uniform demand: one flight per slot, nothing to repair.
        None => return Ok(vec![1; slot_count]),
    };

    let adapted: Vec<f64> = (0..flight_count)
        .map(|i| distribution[percentile_bucket(i, flight_count)])
        .collect();
    let adapted_sum: f64 = adapted.iter().sum();
    let factor = if adapted_sum > 0.0 {
        flight_count as f64 / adapted_sum
    } else {
        0.0
    };
    tracing::debug!(
        "Allocating {} flights over {} buckets ({}): demand sum {}, factor {}",
        flight_count,
        slot_count,
        preset,
        adapted_sum,
        factor
    );

    let mut counts: Vec<i64> = adapted.iter().map(|a| (a * factor) as i64).collect();

    let total: i64 = counts.iter().sum();
    if total != flight_count as i64 {
        repair(&mut counts, preset.repair_bias(), flight_count as i64);
        let missing = flight_count as i64 - counts.iter().sum::<i64>();
        if missing != 0 {
            let peak = highest_position(&counts);
            counts[peak] += missing;
        }
    }

    debug_assert_eq!(counts.iter().sum::<i64>(), flight_count as i64);
    debug_assert!(counts.iter().all(|c| *c >= 0));
    Ok(counts.into_iter().map(|c| c as u32).collect())
}

/// Reinserts missing flights into zero buckets, following the spatial
/// bias of the preset: central shapes fill outward from the peak, edge
/// shapes fill inward from both ends. Two passes: a coarse stride of a
/// tenth of the array first, then unit stride.
fn repair(counts: &mut [i64], bias: Option<RepairBias>, flight_count: i64) {
    let mut difference = flight_count - counts.iter().sum::<i64>();
    if flight_count < 3 {
        let peak = highest_position(counts);
        counts[peak] += difference;
        return;
    }

    let coarse = (counts.len() / 10) as i64;
    let last = counts.len() as i64 - 1;
    match bias {
        Some(RepairBias::Central) => {
            let peak = highest_position(counts) as i64;
            if coarse >= 1 {
                sweep(counts, &mut difference, (peak, peak), (-coarse, coarse));
            }
            sweep(counts, &mut difference, (peak, peak), (-1, 1));
        }
        Some(RepairBias::Edges) => {
            if coarse >= 1 {
                sweep(counts, &mut difference, (0, last), (coarse, -coarse));
            }
            sweep(counts, &mut difference, (0, last), (1, -1));
        }
        None => {}
    }
}

/// Two-cursor fill pass. Both cursors advance by their step each round;
/// every zero bucket a cursor lands on receives one flight until the
/// difference is used up or a cursor leaves the array.
fn sweep(counts: &mut [i64], difference: &mut i64, starts: (i64, i64), steps: (i64, i64)) {
    let len = counts.len() as i64;
    let (mut a, mut b) = starts;
    while (0..len).contains(&a) && (0..len).contains(&b) && *difference > 0 {
        if counts[a as usize] == 0 {
            counts[a as usize] = 1;
            *difference -= 1;
        }
        if counts[b as usize] == 0 {
            counts[b as usize] = 1;
            *difference -= 1;
        }
        a += steps.0;
        b += steps.1;
    }
}

/// First index holding the maximum value.
fn highest_position(counts: &[i64]) -> usize {
    let mut max = i64::MIN;
    let mut pos = 0;
    for (i, c) in counts.iter().enumerate() {
        if *c > max {
            max = *c;
            pos = i;
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPED: [DemandPreset; 4] = [
        DemandPreset::CentralPeak,
        DemandPreset::EdgePeak,
        DemandPreset::ModerateCentral,
        DemandPreset::SteppedCentral,
    ];

    #[test]
    fn test_sum_matches_flight_count_for_every_preset_and_size() {
        for preset in SHAPED {
            for n in [1usize, 2, 3, 5, 7, 10, 17, 50, 99, 100, 250] {
                let map = flight_count_map(n, n, preset).unwrap();
                assert_eq!(map.len(), n);
                assert_eq!(
                    map.iter().map(|c| *c as usize).sum::<usize>(),
                    n,
                    "{preset} with {n} flights"
                );
            }
        }
    }

    #[test]
    fn test_single_slot_takes_all_flights() {
        let map = flight_count_map(1, 1, DemandPreset::CentralPeak).unwrap();
        assert_eq!(map, vec![1]);
    }

    #[test]
    fn test_two_flights_resolve_on_the_highest_bucket() {
        for preset in SHAPED {
            let map = flight_count_map(2, 2, preset).unwrap();
            assert_eq!(map.iter().sum::<u32>(), 2);
        }
        // Central peak with two flights samples buckets 0 and 50 (values
        // 1 and 9); truncation leaves a deficit that must land on the
        // peak bucket.
        let map = flight_count_map(2, 2, DemandPreset::CentralPeak).unwrap();
        assert!(map[1] >= 1);
    }

    #[test]
    fn test_uniform_is_one_per_slot() {
        let map = flight_count_map(12, 12, DemandPreset::Uniform).unwrap();
        assert_eq!(map, vec![1; 12]);
    }

    #[test]
    fn test_zero_flights_is_rejected() {
        let err = flight_count_map(0, 0, DemandPreset::CentralPeak).unwrap_err();
        assert!(matches!(err, AllocationError::NoFlights(_)));
    }

    #[test]
    fn test_mismatched_counts_are_rejected() {
        let err = flight_count_map(5, 6, DemandPreset::CentralPeak).unwrap_err();
        assert_eq!(
            err,
            AllocationError::CountMismatch(CountMismatchError::new(5, 6))
        );
    }

    #[test]
    fn test_central_repair_keeps_the_peak_centered() {
        let map = flight_count_map(100, 100, DemandPreset::CentralPeak).unwrap();
        let peak = map
            .iter()
            .enumerate()
            .max_by_key(|(_, c)| **c)
            .unwrap()
            .0;
        assert!((40..=60).contains(&peak), "peak drifted to bucket {peak}");
    }

    #[test]
    fn test_edge_repair_fills_from_the_ends() {
        let map = flight_count_map(100, 100, DemandPreset::EdgePeak).unwrap();
        assert!(map[0] >= 1);
        assert!(map[99] >= 1);
    }

    #[test]
    fn test_sweep_fills_zero_buckets_only() {
        let mut counts = vec![0, 2, 0, 1, 0];
        let mut difference = 2;
        sweep(&mut counts, &mut difference, (0, 4), (1, -1));
        // Both cursors fill in the first round: index 0 and index 4.
        assert_eq!(difference, 0);
        assert_eq!(counts, vec![1, 2, 0, 1, 1]);
    }

    #[test]
    fn test_sweep_stops_at_array_bounds() {
        let mut counts = vec![0, 0];
        let mut difference = 5;
        sweep(&mut counts, &mut difference, (0, 1), (1, -1));
        assert_eq!(counts, vec![1, 1]);
        assert_eq!(difference, 3);
    }

    #[test]
    fn test_highest_position_returns_first_maximum() {
        assert_eq!(highest_position(&[1, 3, 3, 2]), 1);
        assert_eq!(highest_position(&[0, 0, 0]), 0);
    }
}
