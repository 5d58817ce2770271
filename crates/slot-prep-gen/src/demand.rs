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

//! Demand-shape presets.
//!
//! Each shaped preset is a hand-authored, percentile-indexed table of
//! relative weights: bucket `p` says how much demand falls on flights
//! whose wished time sits at `p%` of the horizon. The tables are pure
//! data; the only computation is the percentile lookup.

use serde::{Deserialize, Serialize};

pub const DISTRIBUTION_BUCKETS: usize = 100;

/// Single bulge around the middle of the horizon.
#[rustfmt::skip]
static CENTRAL_PEAK: [f64; DISTRIBUTION_BUCKETS] = [
    1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0,
    0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0,
    0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0, 5.0,
    9.0, 5.0, 3.0, 3.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0,
    2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0,
    0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0,
    1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0,
];

/// Bimodal: heavy at both ends of the horizon, empty middle.
#[rustfmt::skip]
static EDGE_PEAK: [f64; DISTRIBUTION_BUCKETS] = [
    8.0, 4.0, 3.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 8.0,
];

/// Moderate central bulge with small side bumps.
#[rustfmt::skip]
static MODERATE_CENTRAL: [f64; DISTRIBUTION_BUCKETS] = [
    0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.2, 0.2, 0.2, 0.2, 0.2, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.6, 0.6, 0.6, 0.6, 0.6, 0.8, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 0.8, 0.6, 0.6, 0.6, 0.6, 0.6, 0.6,
    0.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.2, 0.2, 0.2, 0.2,
    0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.2, 0.2, 0.2, 0.2,
];

/// Stepped central plateau with gaps between the steps.
#[rustfmt::skip]
static STEPPED_CENTRAL: [f64; DISTRIBUTION_BUCKETS] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0,
    2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0,
    3.0, 3.0, 3.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0,
    2.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

/// Where the repair pass should place flights the rounding missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairBias {
    /// Walk outward from the peak bucket in both directions.
    Central,
    /// Walk inward from both array ends.
    Edges,
}

/// Named demand-shape preset. `Uniform` places exactly one flight per
/// slot and carries no distribution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemandPreset {
    #[serde(rename = "none", alias = "uniform")]
    Uniform,
    CentralPeak,
    EdgePeak,
    ModerateCentral,
    SteppedCentral,
}

impl DemandPreset {
    #[inline]
    pub fn distribution(&self) -> Option<&'static [f64; DISTRIBUTION_BUCKETS]> {
        match self {
            DemandPreset::Uniform => None,
            DemandPreset::CentralPeak => Some(&CENTRAL_PEAK),
            DemandPreset::EdgePeak => Some(&EDGE_PEAK),
            DemandPreset::ModerateCentral => Some(&MODERATE_CENTRAL),
            DemandPreset::SteppedCentral => Some(&STEPPED_CENTRAL),
        }
    }

    #[inline]
    pub fn repair_bias(&self) -> Option<RepairBias> {
        match self {
            DemandPreset::Uniform => None,
            DemandPreset::EdgePeak => Some(RepairBias::Edges),
            DemandPreset::CentralPeak
            | DemandPreset::ModerateCentral
            | DemandPreset::SteppedCentral => Some(RepairBias::Central),
        }
    }

    /// Demand weight for position `i` of `total`.
    #[inline]
    pub fn sample(&self, position: usize, total: usize) -> f64 {
        match self.distribution() {
            Some(table) => table[percentile_bucket(position, total)],
            None => 1.0,
        }
    }
}

impl std::fmt::Display for DemandPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DemandPreset::Uniform => "none",
            DemandPreset::CentralPeak => "central-peak",
            DemandPreset::EdgePeak => "edge-peak",
            DemandPreset::ModerateCentral => "moderate-central",
            DemandPreset::SteppedCentral => "stepped-central",
        };
        write!(f, "{name}")
    }
}

/// Percentile bucket of position `i` in a collection of `total`:
/// `floor(i / total * 100)`, clamped to `[0, 99]`.
#[inline]
pub fn percentile_bucket(position: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let perc = (position as f64 / total as f64 * 100.0) as usize;
    perc.min(DISTRIBUTION_BUCKETS - 1)
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
    fn test_tables_are_complete_and_non_negative() {
        for preset in SHAPED {
            let table = preset.distribution().unwrap();
            assert_eq!(table.len(), DISTRIBUTION_BUCKETS);
            assert!(table.iter().all(|v| *v >= 0.0), "{preset} has negative demand");
            assert!(table.iter().sum::<f64>() > 0.0, "{preset} is empty");
        }
    }

    #[test]
    fn test_uniform_has_no_table() {
        assert!(DemandPreset::Uniform.distribution().is_none());
        assert!(DemandPreset::Uniform.repair_bias().is_none());
        assert_eq!(DemandPreset::Uniform.sample(3, 10), 1.0);
    }

    #[test]
    fn test_central_peak_peaks_in_the_middle() {
        let table = DemandPreset::CentralPeak.distribution().unwrap();
        let peak = table
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(peak, 50);
    }

    #[test]
    fn test_edge_peak_is_heaviest_at_both_ends() {
        let table = DemandPreset::EdgePeak.distribution().unwrap();
        assert_eq!(table[0], 8.0);
        assert_eq!(table[99], 8.0);
        assert!(table[45] == 0.0 && table[55] == 0.0);
    }

    #[test]
    fn test_percentile_bucket_boundaries() {
        assert_eq!(percentile_bucket(0, 100), 0);
        assert_eq!(percentile_bucket(2, 100), 2);
        assert_eq!(percentile_bucket(99, 100), 99);
        // Clamped into the table even when position == total.
        assert_eq!(percentile_bucket(100, 100), 99);
        assert_eq!(percentile_bucket(0, 0), 0);
    }

    #[test]
    fn test_percentile_bucket_scales_with_total() {
        assert_eq!(percentile_bucket(1, 4), 25);
        assert_eq!(percentile_bucket(3, 4), 75);
        assert_eq!(percentile_bucket(1, 3), 33);
    }

    #[test]
    fn test_preset_names_round_trip_through_serde() {
        for preset in [
            DemandPreset::Uniform,
            DemandPreset::CentralPeak,
            DemandPreset::EdgePeak,
            DemandPreset::ModerateCentral,
            DemandPreset::SteppedCentral,
        ] {
            let json = serde_json::to_string(&preset).unwrap();
            let back: DemandPreset = serde_json::from_str(&json).unwrap();
            assert_eq!(back, preset);
        }
        let uniform: DemandPreset = serde_json::from_str("\"uniform\"").unwrap();
        assert_eq!(uniform, DemandPreset::Uniform);
    }
}
