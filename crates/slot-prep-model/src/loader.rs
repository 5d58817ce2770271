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

//! Tabular input adapter: one data row per flight for margins, one row
//! per optimization session for parameters. Columns are located by
//! header name, so column order does not matter; no further layout
//! validation is performed.

use crate::{
    err::MarginLoadError, flight::FlightId, margin::MarginEntry, params::OptimizationParameters,
};
use chrono::{DateTime, Utc};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLoader {
    delimiter: char,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl TableLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn margins_from_bufread<R: BufRead>(
        &self,
        br: R,
    ) -> Result<Vec<MarginEntry>, MarginLoadError> {
        let table = Table::parse(br, self.delimiter)?;
        let flight_id = table.column("FlightId")?;
        let scheduled = table.column("ScheduledTime")?;
        let not_before = table.column("TimeNotBefore")?;
        let wished = table.column("TimeWished")?;
        let not_after = table.column("TimeNotAfter")?;
        let priority = table.column("Priority")?;

        let mut margins = Vec::with_capacity(table.rows.len());
        for (line, row) in table.numbered_rows() {
            margins.push(MarginEntry::new(
                FlightId::from(row.field(line, flight_id)?),
                row.timestamp(line, scheduled)?,
                row.timestamp(line, not_before)?,
                row.timestamp(line, wished)?,
                row.timestamp(line, not_after)?,
                row.number(line, priority)?,
            ));
        }
        Ok(margins)
    }

    pub fn parameters_from_bufread<R: BufRead>(
        &self,
        br: R,
    ) -> Result<Vec<OptimizationParameters>, MarginLoadError> {
        let table = Table::parse(br, self.delimiter)?;
        let opt_id = table.column("OptId")?;
        let start = table.column("StartTime")?;
        let end = table.column("EndTime")?;
        let interval = table.column("IntervalSeconds")?;
        let framework = table.column("Framework")?;
        let min_value = table.column("MinValue")?;
        let max_value = table.column("MaxValue")?;
        let drop_value = table.column("DropValue")?;

        let mut entries = Vec::with_capacity(table.rows.len());
        for (line, row) in table.numbered_rows() {
            let fw = row.field(line, framework)?;
            entries.push(OptimizationParameters::new(
                row.field(line, opt_id)?,
                row.timestamp(line, start)?,
                row.timestamp(line, end)?,
                row.number::<i64>(line, interval)?,
                if fw.is_empty() {
                    None
                } else {
                    Some(fw.to_string())
                },
                row.number(line, min_value)?,
                row.number(line, max_value)?,
                row.number(line, drop_value)?,
            ));
        }
        Ok(entries)
    }

    #[inline]
    pub fn margins_from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<MarginEntry>, MarginLoadError> {
        tracing::info!("Reading margins from {}", path.as_ref().display());
        let file = File::open(path).map_err(MarginLoadError::Io)?;
        self.margins_from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn parameters_from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<OptimizationParameters>, MarginLoadError> {
        tracing::info!(
            "Reading optimization parameters from {}",
            path.as_ref().display()
        );
        let file = File::open(path).map_err(MarginLoadError::Io)?;
        self.parameters_from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn margins_from_reader<R: Read>(&self, r: R) -> Result<Vec<MarginEntry>, MarginLoadError> {
        self.margins_from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn parameters_from_reader<R: Read>(
        &self,
        r: R,
    ) -> Result<Vec<OptimizationParameters>, MarginLoadError> {
        self.parameters_from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn margins_from_str(&self, s: &str) -> Result<Vec<MarginEntry>, MarginLoadError> {
        self.margins_from_reader(s.as_bytes())
    }

    #[inline]
    pub fn parameters_from_str(
        &self,
        s: &str,
    ) -> Result<Vec<OptimizationParameters>, MarginLoadError> {
        self.parameters_from_reader(s.as_bytes())
    }
}

#[derive(Debug)]
struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug)]
struct Row(Vec<String>);

impl Table {
    fn parse<R: BufRead>(br: R, delimiter: char) -> Result<Self, MarginLoadError> {
        let mut lines = br.lines();
        let header_line = match lines.next() {
            Some(line) => line?,
            None => return Err(MarginLoadError::EmptyTable),
        };
        let header: Vec<String> = header_line
            .split(delimiter)
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(Row(line
                .split(delimiter)
                .map(|f| f.trim().to_string())
                .collect()));
        }
        if rows.is_empty() {
            return Err(MarginLoadError::EmptyTable);
        }
        Ok(Self { header, rows })
    }

    fn column(&self, name: &str) -> Result<usize, MarginLoadError> {
        self.header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| MarginLoadError::MissingHeader(name.to_string()))
    }

    /// Rows paired with their 1-based file line number (header is line 1).
    fn numbered_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate().map(|(i, r)| (i + 2, r))
    }
}

impl Row {
    fn field(&self, line: usize, index: usize) -> Result<&str, MarginLoadError> {
        self.0
            .get(index)
            .map(String::as_str)
            .ok_or(MarginLoadError::MissingField {
                line,
                column: format!("#{index}"),
            })
    }

    fn number<T: std::str::FromStr>(&self, line: usize, index: usize) -> Result<T, MarginLoadError> {
        let raw = self.field(line, index)?;
        raw.parse().map_err(|_| MarginLoadError::ParseNumber {
            line,
            value: raw.to_string(),
        })
    }

    fn timestamp(&self, line: usize, index: usize) -> Result<DateTime<Utc>, MarginLoadError> {
        let raw = self.field(line, index)?;
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| MarginLoadError::ParseTimestamp {
                line,
                value: raw.to_string(),
            })
    }
}
