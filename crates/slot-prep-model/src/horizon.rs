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

use crate::err::{InvalidRangeError, InvertedHorizonError, NonPositiveIntervalError};
use chrono::{DateTime, Duration, Utc};

/// One discrete point in the scheduling horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    sequence_number: u32,
    time: DateTime<Utc>,
}

impl Slot {
    #[inline]
    pub fn new(sequence_number: u32, time: DateTime<Utc>) -> Self {
        Self {
            sequence_number,
            time,
        }
    }

    #[inline]
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    #[inline]
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({}, {})", self.sequence_number, self.time)
    }
}

/// The ordered discretization of a horizon, slot `i` at
/// `start + i * interval`, inclusive of the last slot at or before the
/// horizon end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSequence {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval_seconds: i64,
    slots: Vec<Slot>,
}

impl SlotSequence {
    pub fn generate(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval_seconds: i64,
    ) -> Result<Self, InvalidRangeError> {
        if interval_seconds <= 0 {
            return Err(NonPositiveIntervalError::new(interval_seconds))?;
        }
        if end < start {
            return Err(InvertedHorizonError::new(start, end))?;
        }

        let total_seconds = (end - start).num_seconds();
        let mut slots = Vec::with_capacity((total_seconds / interval_seconds + 1) as usize);
        let mut i = 0u32;
        while i64::from(i) * interval_seconds <= total_seconds {
            let offset = Duration::seconds(i64::from(i) * interval_seconds);
            slots.push(Slot::new(i, start + offset));
            i += 1;
        }

        Ok(Self {
            start,
            end,
            interval_seconds,
            slots,
        })
    }

    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[inline]
    pub fn interval_seconds(&self) -> i64 {
        self.interval_seconds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Elapsed seconds from the horizon start to the given slot.
    #[inline]
    pub fn offset_seconds(&self, slot: &Slot) -> i64 {
        (slot.time() - self.start).num_seconds()
    }
}
