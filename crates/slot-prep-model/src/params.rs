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

/// Per-session parameters for weight-map generation.
///
/// `min_value` is the weight floor (typically negative), `max_value` the
/// weight at the wished time, and `drop_value` the weight exactly at the
/// margin-window boundaries. `min <= drop <= max` is not enforced; an
/// inverted configuration simply produces an inverted curve.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationParameters {
    opt_id: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    interval_seconds: i64,
    framework: Option<String>,
    min_value: f64,
    max_value: f64,
    drop_value: f64,
}

impl OptimizationParameters {
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        opt_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        interval_seconds: i64,
        framework: Option<String>,
        min_value: f64,
        max_value: f64,
        drop_value: f64,
    ) -> Self {
        Self {
            opt_id: opt_id.into(),
            start_time,
            end_time,
            interval_seconds,
            framework,
            min_value,
            max_value,
            drop_value,
        }
    }

    #[inline]
    pub fn opt_id(&self) -> &str {
        &self.opt_id
    }

    #[inline]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    #[inline]
    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    #[inline]
    pub fn interval_seconds(&self) -> i64 {
        self.interval_seconds
    }

    #[inline]
    pub fn framework(&self) -> Option<&str> {
        self.framework.as_deref()
    }

    #[inline]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    #[inline]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[inline]
    pub fn drop_value(&self) -> f64 {
        self.drop_value
    }
}
