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

//! Algorithmic core: piecewise-linear weight-map computation per flight,
//! demand-shaped synthetic scenario generation, and optimizer-framework
//! benchmark expansion.
//!
//! Everything here is a pure function of its inputs, except priority
//! sampling (which draws from a caller-supplied random generator) and
//! scenario-id generation.

pub mod allocate;
pub mod builder;
pub mod config;
pub mod demand;
pub mod err;
pub mod framework;
pub mod priority;
pub mod weights;

pub mod prelude {
    pub use crate::allocate::flight_count_map;
    pub use crate::builder::ScenarioBuilder;
    pub use crate::config::GeneratorConfig;
    pub use crate::demand::{DemandPreset, percentile_bucket};
    pub use crate::err::{AllocationError, GenerateError};
    pub use crate::framework::{SessionDocument, expand_sessions};
    pub use crate::priority::{PriorityRange, sample_priority};
    pub use crate::weights::{generate_flights, weight_map};
}
