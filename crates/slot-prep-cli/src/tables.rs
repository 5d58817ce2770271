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

//! Per-flight weight tables on disk.
//!
//! One directory per optimization session: an index table `flights.csv`
//! (same columns as the margins input) and one table per flight whose
//! rows are `(slot time, weight)`. The directory can be read back into
//! the flight records it was written from.

use chrono::{DateTime, SecondsFormat, Utc};
use slot_prep_model::{
    err::MarginLoadError,
    flight::Flight,
    horizon::SlotSequence,
    loader::TableLoader,
    margin::MarginEntry,
    params::OptimizationParameters,
};
use std::{
    fs,
    io::Write,
    path::Path,
};

const INDEX_FILE: &str = "flights.csv";

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Writes the session directory: index plus one weight table per flight.
/// Flights and margins must be aligned (one margin per flight, same
/// order), which is how the generation pipelines produce them.
pub fn write_weight_tables(
    dir: &Path,
    margins: &[MarginEntry],
    flights: &[Flight],
    params: &OptimizationParameters,
) -> Result<(), Box<dyn std::error::Error>> {
    let sequence = SlotSequence::generate(
        params.start_time(),
        params.end_time(),
        params.interval_seconds(),
    )?;
    fs::create_dir_all(dir)?;

    let mut index = fs::File::create(dir.join(INDEX_FILE))?;
    writeln!(
        index,
        "FlightId,ScheduledTime,TimeNotBefore,TimeWished,TimeNotAfter,Priority"
    )?;
    for m in margins {
        writeln!(
            index,
            "{},{},{},{},{},{}",
            m.flight_id().as_str(),
            rfc3339(m.scheduled_time()),
            rfc3339(m.time_not_before()),
            rfc3339(m.time_wished()),
            rfc3339(m.time_not_after()),
            m.priority()
        )?;
    }

    for flight in flights {
        let path = dir.join(format!("{}.csv", flight.flight_id.as_str()));
        let mut table = fs::File::create(&path)?;
        writeln!(table, "SlotTime,Weight")?;
        for (slot, weight) in sequence.iter().zip(&flight.weight_map) {
            writeln!(table, "{},{}", rfc3339(slot.time()), weight)?;
        }
        tracing::info!("Wrote weight table {}", path.display());
    }
    Ok(())
}

/// Reads a session directory back into flight records: flight ids and
/// scheduled times from the index, weight maps from the per-flight
/// tables.
pub fn read_weight_tables(dir: &Path) -> Result<Vec<Flight>, MarginLoadError> {
    let loader = TableLoader::new();
    let index = loader.margins_from_path(dir.join(INDEX_FILE))?;

    let mut flights = Vec::with_capacity(index.len());
    for margin in &index {
        let path = dir.join(format!("{}.csv", margin.flight_id().as_str()));
        let weight_map = read_weight_column(&path)?;
        flights.push(Flight::new(
            margin.flight_id().clone(),
            margin.scheduled_time(),
            weight_map,
        ));
    }
    Ok(flights)
}

fn read_weight_column(path: &Path) -> Result<Vec<i64>, MarginLoadError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().enumerate();
    // Header row.
    if lines.next().is_none() {
        return Err(MarginLoadError::EmptyTable);
    }

    let mut weights = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let raw = line
            .split(',')
            .nth(1)
            .ok_or(MarginLoadError::MissingField {
                line: index + 1,
                column: "Weight".to_string(),
            })?
            .trim();
        weights.push(raw.parse().map_err(|_| MarginLoadError::ParseNumber {
            line: index + 1,
            value: raw.to_string(),
        })?);
    }
    if weights.is_empty() {
        return Err(MarginLoadError::EmptyTable);
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use slot_prep_gen::weights::generate_flights;
    use slot_prep_model::flight::FlightId;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 6, 0, 0).unwrap()
    }

    fn params() -> OptimizationParameters {
        OptimizationParameters::new(
            "opt-1",
            t0(),
            t0() + Duration::seconds(3600),
            600,
            Some("OPTAPLANNER".to_string()),
            -10.0,
            100.0,
            20.0,
        )
    }

    fn margins() -> Vec<MarginEntry> {
        vec![
            MarginEntry::new(
                FlightId::from("F1"),
                t0(),
                t0() + Duration::seconds(600),
                t0() + Duration::seconds(1800),
                t0() + Duration::seconds(3000),
                1.0,
            ),
            MarginEntry::new(
                FlightId::from("F2"),
                t0(),
                t0() + Duration::seconds(1200),
                t0() + Duration::seconds(1800),
                t0() + Duration::seconds(2400),
                2.0,
            ),
        ]
    }

    #[test]
    fn test_weight_tables_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let margins = margins();
        let params = params();
        let flights = generate_flights(&margins, &params).unwrap();

        write_weight_tables(dir.path(), &margins, &flights, &params).unwrap();
        let back = read_weight_tables(dir.path()).unwrap();
        assert_eq!(back, flights);
    }

    #[test]
    fn test_written_table_has_one_row_per_slot() {
        let dir = tempfile::tempdir().unwrap();
        let margins = margins();
        let params = params();
        let flights = generate_flights(&margins, &params).unwrap();
        write_weight_tables(dir.path(), &margins, &flights, &params).unwrap();

        let table = fs::read_to_string(dir.path().join("F1.csv")).unwrap();
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows[0], "SlotTime,Weight");
        assert_eq!(rows.len(), 1 + 7);
        assert_eq!(rows[1], "2021-03-01T06:00:00Z,-10");
    }

    #[test]
    fn test_missing_flight_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let margins = margins();
        let params = params();
        let flights = generate_flights(&margins, &params).unwrap();
        write_weight_tables(dir.path(), &margins, &flights, &params).unwrap();
        fs::remove_file(dir.path().join("F2.csv")).unwrap();

        assert!(read_weight_tables(dir.path()).is_err());
    }
}
