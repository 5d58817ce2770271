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

//! Optimizer-framework benchmark expansion.
//!
//! One base scenario fans out into a batch of sessions, each with a
//! fresh id and a framework-specific parameter payload: a grid of
//! genetic-algorithm settings (emitted several times each, since GA runs
//! differ between repetitions of the same configuration), a set of named
//! local-search settings, and one Hungarian-algorithm session without
//! parameters.

use serde_json::{Map, Value, json};
use slot_prep_model::scenario::ScenarioDocument;
use uuid::Uuid;

const GENETIC_FRAMEWORK: &str = "JENETICS";
const LOCAL_SEARCH_FRAMEWORK: &str = "OPTAPLANNER";
const HUNGARIAN_FRAMEWORK: &str = "HUNGARIAN";

/// Repetitions per genetic configuration; one result per configuration
/// is not enough to judge a stochastic solver.
const GENETIC_RUNS: usize = 5;

const LOCAL_SEARCH_NAMES: [&str; 7] = [
    "HILL_CLIMBING",
    "TABU_SEARCH",
    "SIMULATED_ANNEALING",
    "LATE_ACCEPTANCE",
    "GREAT_DELUGE",
    "STEP_COUNTING_HILL_CLIMBING",
    "STRATEGIC_OSCILLATION",
];

/// One expanded session: the document plus the file tag used to name its
/// output (`<stem><file_tag>.json`).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDocument {
    pub file_tag: String,
    pub document: ScenarioDocument,
}

/// The 16-point genetic-algorithm grid: selector pressure and population
/// size paired, crossed with mutation and crossover probabilities.
pub fn genetic_configs(max_time: i64) -> Vec<Map<String, Value>> {
    let mut configs = Vec::with_capacity(16);
    for (selector_parameter, population_size) in [(50, 500), (10, 500), (3, 70), (10, 70)] {
        for mutator_probability in [0.15, 0.6] {
            for crossover_probability in [0.35, 0.9] {
                let config = json!({
                    "crossover": "PARTIALLY_MATCHED_CROSSOVER",
                    "mutator": "SWAP_MUTATOR",
                    "maximalPhenotypeAge": 80,
                    "offspringFraction": 0.7,
                    "offspringSelector": "TOURNAMENT_SELECTOR",
                    "survivorsSelector": "TOURNAMENT_SELECTOR",
                    "offspringSelectorParameter": selector_parameter,
                    "survivorsSelectorParameter": selector_parameter,
                    "populationSize": population_size,
                    "crossoverAlterProbability": crossover_probability,
                    "mutatorAlterProbability": mutator_probability,
                    "terminationConditions": { "BY_EXECUTION_TIME": max_time },
                });
                match config {
                    Value::Object(map) => configs.push(map),
                    _ => unreachable!("genetic config is always an object"),
                }
            }
        }
    }
    configs
}

/// The named local-search configurations, one per acceptor type.
pub fn local_search_configs(max_time: i64) -> Vec<Map<String, Value>> {
    LOCAL_SEARCH_NAMES
        .iter()
        .map(|name| {
            let config = json!({
                "configurationName": name,
                "secondsSpentLimit": max_time,
            });
            match config {
                Value::Object(map) => map,
                _ => unreachable!("local-search config is always an object"),
            }
        })
        .collect()
}

/// Expands one base scenario into the full benchmark batch: every
/// genetic configuration [`GENETIC_RUNS`] times, every local-search
/// configuration once, and one Hungarian session. Each emitted document
/// carries a fresh id.
pub fn expand_sessions(base: &ScenarioDocument, max_time: i64) -> Vec<SessionDocument> {
    let genetic = genetic_configs(max_time);
    let local_search = local_search_configs(max_time);
    let mut sessions = Vec::with_capacity(genetic.len() * GENETIC_RUNS + local_search.len() + 1);

    for (index, config) in genetic.iter().enumerate() {
        for run in 1..=GENETIC_RUNS {
            let opt_id = Uuid::new_v4().to_string();
            let mut document = base.clone();
            document.opt_id = opt_id.clone();
            document.optimization_framework = Some(GENETIC_FRAMEWORK.to_string());
            document.parameters = Some(config.clone());
            sessions.push(SessionDocument {
                file_tag: format!("-{index}-{run}--{opt_id}"),
                document,
            });
        }
    }

    let offset = genetic.len();
    for (index, config) in local_search.iter().enumerate() {
        let opt_id = Uuid::new_v4().to_string();
        let mut document = base.clone();
        document.opt_id = opt_id.clone();
        document.optimization_framework = Some(LOCAL_SEARCH_FRAMEWORK.to_string());
        document.parameters = Some(config.clone());
        sessions.push(SessionDocument {
            file_tag: format!("-{}--{}", offset + index, opt_id),
            document,
        });
    }

    let opt_id = Uuid::new_v4().to_string();
    let mut document = base.clone();
    document.opt_id = opt_id.clone();
    document.optimization_framework = Some(HUNGARIAN_FRAMEWORK.to_string());
    document.parameters = None;
    sessions.push(SessionDocument {
        file_tag: format!("-{}--{}", offset + local_search.len(), opt_id),
        document,
    });

    sessions
}
