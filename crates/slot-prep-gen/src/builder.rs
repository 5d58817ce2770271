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

//! Synthetic scenario assembly.
//!
//! Orchestrates the leaf components into one complete optimization
//! session: the slot sequence, demand-positioned margin entries with
//! sampled priorities, weight maps per flight, and the scenario document
//! the downstream optimizer consumes.

use crate::{
    allocate::flight_count_map, config::GeneratorConfig, demand::DemandPreset,
    err::GenerateError, priority::sample_priority, weights::weight_map,
};
use chrono::Duration;
use rand::Rng;
use slot_prep_model::{
    flight::{Flight, FlightId},
    horizon::SlotSequence,
    margin::MarginEntry,
    params::OptimizationParameters,
    scenario::{MarginRecord, ScenarioDocument, SlotRecord},
};
use uuid::Uuid;

/// Builds complete synthetic scenarios from a generator configuration.
/// Owns the random source used for priority sampling so repeated builds
/// from one seeded generator are reproducible.
#[derive(Debug)]
pub struct ScenarioBuilder<R> {
    rng: R,
}

impl<R: Rng> ScenarioBuilder<R> {
    #[inline]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Assembles one scenario. Callers normally pass a
    /// [`GeneratorConfig::normalized`] configuration; a structurally
    /// broken one (no slots, mismatched counts) fails instead of being
    /// silently repaired here.
    pub fn build(&mut self, config: &GeneratorConfig) -> Result<ScenarioDocument, GenerateError> {
        let slot_count = config.slot_count as usize;
        let start = config.slot_start_time.unwrap_or_else(chrono::Utc::now);
        let end = start + Duration::seconds((config.slot_count - 1) * config.slot_length_sec);
        let sequence = SlotSequence::generate(start, end, config.slot_length_sec)?;
        debug_assert_eq!(sequence.len(), slot_count);

        let opt_id = Uuid::new_v4();
        let params = OptimizationParameters::new(
            opt_id.to_string(),
            start,
            end,
            config.slot_length_sec,
            config.optimization_framework.clone(),
            config.min_value,
            config.max_value,
            config.drop_value,
        );

        let margins = self.generate_margins(config, &sequence)?;
        tracing::info!(
            "Built {} margin entries for scenario {}",
            margins.len(),
            opt_id
        );

        let flights: Vec<Flight> = margins
            .iter()
            .map(|margin| {
                Flight::new(
                    margin.flight_id().clone(),
                    margin.scheduled_time(),
                    weight_map(margin, &sequence, &params),
                )
            })
            .collect();

        Ok(ScenarioDocument {
            opt_id: opt_id.to_string(),
            initial_flight_sequence: flights.iter().map(|f| f.flight_id.clone()).collect(),
            slots: sequence.iter().map(|s| SlotRecord::new(s.time())).collect(),
            margins: Some(margins.iter().map(MarginRecord::from).collect()),
            flights,
            optimization_framework: config.optimization_framework.clone(),
            parameters: None,
        })
    }

    /// Positions one margin entry per flight. Uniform demand wishes one
    /// flight per slot; shaped demand wishes `counts[i]` flights into
    /// slot `i`. Scheduled times all sit at the horizon start.
    fn generate_margins(
        &mut self,
        config: &GeneratorConfig,
        sequence: &SlotSequence,
    ) -> Result<Vec<MarginEntry>, GenerateError> {
        let slot_count = sequence.len();
        let prefix = config.flight_prefix.as_deref().unwrap_or("F");

        let counts: Vec<u32> = match config.distribution_setting {
            DemandPreset::Uniform => vec![1; slot_count],
            preset => {
                if config.flight_count < 1 {
                    return Err(GenerateError::Allocation(crate::err::NoFlightsError.into()));
                }
                flight_count_map(config.flight_count as usize, slot_count, preset)?
            }
        };

        let mut margins = Vec::with_capacity(slot_count);
        for (slot_index, count) in counts.iter().enumerate() {
            let slot = sequence.get(slot_index).expect("count map is slot-aligned");
            let position_percent = slot_index as f64 / slot_count as f64 * 100.0;
            for _ in 0..*count {
                let ordinal = margins.len() + 1;
                let priority = sample_priority(
                    &config.priority_settings,
                    position_percent,
                    &mut self.rng,
                );
                tracing::debug!(
                    "Flight {}{}: wished slot {}, priority {}",
                    prefix,
                    ordinal,
                    slot_index,
                    priority
                );
                margins.push(margin_at(
                    flight_id(prefix, ordinal, slot_count),
                    sequence,
                    slot.time(),
                    config.margin_window_length,
                    priority,
                ));
            }
        }
        Ok(margins)
    }
}

fn margin_at(
    flight_id: FlightId,
    sequence: &SlotSequence,
    wished: chrono::DateTime<chrono::Utc>,
    window_seconds: i64,
    priority: f64,
) -> MarginEntry {
    let half = Duration::seconds(window_seconds / 2);
    MarginEntry::new(
        flight_id,
        sequence.start(),
        wished - half,
        wished,
        wished + half,
        priority,
    )
}

/// Flight id with the ordinal zero-padded to the decimal width of the
/// fleet size, so ids sort naturally (`F007` before `F070`). Fleets of
/// 10000 or more fall back to unpadded ordinals.
pub fn flight_id(prefix: &str, ordinal: usize, fleet_size: usize) -> FlightId {
    let width = match fleet_size {
        0..=9 => 1,
        10..=99 => 2,
        100..=999 => 3,
        1000..=9999 => 4,
        _ => 1,
    };
    FlightId::new(format!("{prefix}{ordinal:0width$}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 6, 0, 0).unwrap()
    }

    fn config(count: i64, preset: DemandPreset) -> GeneratorConfig {
        GeneratorConfig {
            flight_count: count,
            slot_count: count,
            flight_prefix: Some("F".to_string()),
            slot_start_time: Some(t0()),
            slot_length_sec: 60,
            margin_window_length: 600,
            distribution_setting: preset,
            optimization_framework: Some("OPTAPLANNER".to_string()),
            min_value: -10.0,
            max_value: 100.0,
            drop_value: 20.0,
            max_time: 60,
            ..GeneratorConfig::default()
        }
    }

    fn builder() -> ScenarioBuilder<ChaCha8Rng> {
        ScenarioBuilder::new(ChaCha8Rng::seed_from_u64(99))
    }

    #[test]
    fn test_uniform_scenario_has_one_flight_per_slot() {
        let doc = builder().build(&config(10, DemandPreset::Uniform)).unwrap();
        assert_eq!(doc.slot_count(), 10);
        assert_eq!(doc.flight_count(), 10);
        let margins = doc.margins.as_ref().unwrap();
        for (i, m) in margins.iter().enumerate() {
            assert_eq!(m.time_wished, t0() + Duration::seconds(60 * i as i64));
        }
    }

    #[test]
    fn test_flight_count_matches_slots_for_shaped_presets() {
        for preset in [
            DemandPreset::CentralPeak,
            DemandPreset::EdgePeak,
            DemandPreset::ModerateCentral,
            DemandPreset::SteppedCentral,
        ] {
            let doc = builder().build(&config(50, preset)).unwrap();
            assert_eq!(doc.slot_count(), 50);
            assert_eq!(doc.flight_count(), 50, "{preset}");
            for f in &doc.flights {
                assert_eq!(f.weight_map.len(), 50);
            }
        }
    }

    #[test]
    fn test_margin_windows_are_centered_on_the_wished_time() {
        let doc = builder().build(&config(5, DemandPreset::Uniform)).unwrap();
        for m in doc.margins.as_ref().unwrap() {
            assert_eq!(m.time_wished - m.time_not_before, Duration::seconds(300));
            assert_eq!(m.time_not_after - m.time_wished, Duration::seconds(300));
            assert_eq!(m.scheduled_time, t0());
        }
    }

    #[test]
    fn test_initial_sequence_mirrors_flight_construction_order() {
        let doc = builder().build(&config(12, DemandPreset::CentralPeak)).unwrap();
        let from_flights: Vec<&str> = doc.flights.iter().map(|f| f.flight_id.as_str()).collect();
        let from_sequence: Vec<&str> = doc
            .initial_flight_sequence
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(from_flights, from_sequence);
        assert_eq!(from_sequence[0], "F01");
        assert_eq!(from_sequence[11], "F12");
    }

    #[test]
    fn test_scenario_round_trips_bit_for_bit() {
        let doc = builder().build(&config(8, DemandPreset::EdgePeak)).unwrap();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let back: ScenarioDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_fresh_id_per_build() {
        let mut b = builder();
        let cfg = config(3, DemandPreset::Uniform);
        let a = b.build(&cfg).unwrap();
        let c = b.build(&cfg).unwrap();
        assert_ne!(a.opt_id, c.opt_id);
    }

    #[test]
    fn test_priorities_come_from_the_configured_ranges() {
        let mut cfg = config(10, DemandPreset::Uniform);
        cfg.priority_settings = vec![crate::priority::PriorityRange::new(0.0, 100.0, 2.0, 2.0)];
        let doc = builder().build(&cfg).unwrap();
        // Priority 2 doubles the peak weight: max_value 100 -> 200.
        let peak = doc
            .flights
            .iter()
            .flat_map(|f| f.weight_map.iter())
            .max()
            .copied()
            .unwrap();
        assert_eq!(peak, 200);
    }

    #[test]
    fn test_flight_id_padding_follows_fleet_size() {
        assert_eq!(flight_id("F", 3, 9).as_str(), "F3");
        assert_eq!(flight_id("F", 3, 10).as_str(), "F03");
        assert_eq!(flight_id("F", 12, 200).as_str(), "F012");
        assert_eq!(flight_id("F", 5, 2345).as_str(), "F0005");
        assert_eq!(flight_id("F", 5, 20000).as_str(), "F5");
    }
}
