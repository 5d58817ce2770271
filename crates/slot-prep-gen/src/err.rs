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

use slot_prep_model::err::InvalidRangeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoFlightsError;

impl std::fmt::Display for NoFlightsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Flight count must be at least 1")
    }
}

impl std::error::Error for NoFlightsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountMismatchError {
    flight_count: usize,
    slot_count: usize,
}

impl CountMismatchError {
    pub fn new(flight_count: usize, slot_count: usize) -> Self {
        Self {
            flight_count,
            slot_count,
        }
    }

    pub fn flight_count(&self) -> usize {
        self.flight_count
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }
}

impl std::fmt::Display for CountMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flight count {} does not match slot count {}",
            self.flight_count, self.slot_count
        )
    }
}

impl std::error::Error for CountMismatchError {}

/// Structural misuse of the flight-count allocator. Fatal; the allocator
/// never silently produces an unbalanced map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    NoFlights(NoFlightsError),
    CountMismatch(CountMismatchError),
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationError::NoFlights(e) => write!(f, "{}", e),
            AllocationError::CountMismatch(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AllocationError {}

impl From<NoFlightsError> for AllocationError {
    fn from(err: NoFlightsError) -> Self {
        AllocationError::NoFlights(err)
    }
}

impl From<CountMismatchError> for AllocationError {
    fn from(err: CountMismatchError) -> Self {
        AllocationError::CountMismatch(err)
    }
}

/// Any fatal failure while assembling a scenario.
#[derive(Debug)]
pub enum GenerateError {
    InvalidRange(InvalidRangeError),
    Allocation(AllocationError),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::InvalidRange(e) => write!(f, "{}", e),
            GenerateError::Allocation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<InvalidRangeError> for GenerateError {
    fn from(err: InvalidRangeError) -> Self {
        GenerateError::InvalidRange(err)
    }
}

impl From<AllocationError> for GenerateError {
    fn from(err: AllocationError) -> Self {
        GenerateError::Allocation(err)
    }
}
