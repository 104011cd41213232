//! CSV tables.
//!
//! Each writer takes any `io::Write`, emits a header row, then one row per
//! item. Quoting of commas, quotes and newlines inside messages is left to
//! the `csv` crate.

use anyhow::Result;
use std::io::Write;

use crate::ingest::{ExtractedRecord, StateCounter};
use crate::report::{format_percentage, state_table};

/// Columns of the error and warning tables.
pub const RECORD_HEADER: [&str; 6] = ["Fecha", "Estado", "Caja", "Modulo", "Flujo", "Mensaje"];

/// Columns of the per-state table.
pub const STATE_HEADER: [&str; 3] = ["Estado", "Cantidad", "Porcentaje"];

/// Columns of the errors-per-box table.
pub const BOX_COUNT_HEADER: [&str; 2] = ["Caja", "Cantidad"];

/// Columns of the distinct error locations table.
pub const LOCATION_HEADER: [&str; 3] = ["Caja", "Modulo", "Flujo"];

/// Write extracted records, one row each, always six columns.
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ExtractedRecord>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(RECORD_HEADER)?;
    for record in records {
        csv.write_record(record.columns())?;
    }
    csv.flush()?;
    Ok(())
}

/// Write per-state counts with their percentage of the total.
pub fn write_state_table<W: Write>(writer: W, states: &StateCounter) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(STATE_HEADER)?;
    for row in state_table(states) {
        csv.write_record([
            row.state,
            row.count.to_string(),
            format_percentage(row.percentage),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write error counts per box, already ranked by the caller.
pub fn write_box_counts<W: Write>(writer: W, ranked: &[(&str, u64)]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(BOX_COUNT_HEADER)?;
    for (box_id, count) in ranked {
        csv.write_record([box_id.to_string(), count.to_string()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write distinct (box, module, flow) triples.
pub fn write_error_locations<W: Write>(writer: W, locations: &[(&str, &str, &str)]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(LOCATION_HEADER)?;
    for (box_id, module, flow) in locations {
        csv.write_record([box_id, module, flow])?;
    }
    csv.flush()?;
    Ok(())
}
