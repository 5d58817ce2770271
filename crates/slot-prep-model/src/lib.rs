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

//! Domain model for slot-scheduling input preparation.
//!
//! Entities are value objects: each is created by one component and
//! consumed, never mutated, by the next. The algorithmic core lives in
//! `slot-prep-gen`; serialization shapes here match the payload the
//! downstream slot-assignment optimizer expects.

pub mod common;
pub mod err;
pub mod flight;
pub mod horizon;
pub mod loader;
pub mod margin;
pub mod params;
pub mod scenario;

pub mod prelude {
    pub use crate::err::{InvalidRangeError, MarginLoadError};
    pub use crate::flight::{Flight, FlightId};
    pub use crate::horizon::{Slot, SlotSequence};
    pub use crate::margin::MarginEntry;
    pub use crate::params::OptimizationParameters;
    pub use crate::scenario::{MarginRecord, ScenarioDocument, SlotRecord};
}
