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

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonPositiveIntervalError {
    interval_seconds: i64,
}

impl NonPositiveIntervalError {
    pub fn new(interval_seconds: i64) -> Self {
        Self { interval_seconds }
    }

    pub fn interval_seconds(&self) -> i64 {
        self.interval_seconds
    }
}

impl std::fmt::Display for NonPositiveIntervalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot interval must be positive, got {} seconds",
            self.interval_seconds
        )
    }
}

impl std::error::Error for NonPositiveIntervalError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvertedHorizonError {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl InvertedHorizonError {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

impl std::fmt::Display for InvertedHorizonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Horizon end {} lies before horizon start {}",
            self.end, self.start
        )
    }
}

impl std::error::Error for InvertedHorizonError {}

/// Structural misconfiguration of the slot horizon. Fatal to the caller;
/// never recovered locally.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidRangeError {
    NonPositiveInterval(NonPositiveIntervalError),
    InvertedHorizon(InvertedHorizonError),
}

impl std::fmt::Display for InvalidRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidRangeError::NonPositiveInterval(e) => write!(f, "{}", e),
            InvalidRangeError::InvertedHorizon(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InvalidRangeError {}

impl From<NonPositiveIntervalError> for InvalidRangeError {
    fn from(err: NonPositiveIntervalError) -> Self {
        InvalidRangeError::NonPositiveInterval(err)
    }
}

impl From<InvertedHorizonError> for InvalidRangeError {
    fn from(err: InvertedHorizonError) -> Self {
        InvalidRangeError::InvertedHorizon(err)
    }
}

/// Failure while reading margin or parameter tables.
#[derive(Debug)]
pub enum MarginLoadError {
    Io(std::io::Error),
    MissingHeader(String),
    MissingField { line: usize, column: String },
    ParseNumber { line: usize, value: String },
    ParseTimestamp { line: usize, value: String },
    EmptyTable,
}

impl From<std::io::Error> for MarginLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for MarginLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use MarginLoadError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            MissingHeader(col) => write!(f, "missing column '{col}' in header row"),
            MissingField { line, column } => {
                write!(f, "row {line} has no value for column '{column}'")
            }
            ParseNumber { line, value } => {
                write!(f, "row {line}: cannot parse number from '{value}'")
            }
            ParseTimestamp { line, value } => {
                write!(f, "row {line}: cannot parse timestamp from '{value}'")
            }
            EmptyTable => write!(f, "table contains a header but no data rows"),
        }
    }
}

impl std::error::Error for MarginLoadError {}
