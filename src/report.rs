//! Terminal report for a finished run.
//!
//! Pure formatting: everything here takes a [`RunSummary`] and returns
//! strings or rows, so the CLI decides where output goes.

use humansize::{format_size, BINARY};

use crate::ingest::{RunSummary, StateCounter};

/// One row of the per-state table.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRow {
    pub state: String,
    pub count: u64,
    pub percentage: f64,
}

/// States ranked by count, with their share of all classified records.
pub fn state_table(states: &StateCounter) -> Vec<StateRow> {
    states
        .ranked()
        .into_iter()
        .map(|(state, count)| StateRow {
            state: state.to_string(),
            count,
            percentage: states.percentage(state),
        })
        .collect()
}

/// Two-decimal percentage, as written to tables and the terminal.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}", percentage)
}

/// `ERR` records per hour of day, from their parsed timestamps.
///
/// Records whose timestamp does not parse are left out.
pub fn errors_by_hour(summary: &RunSummary) -> [u64; 24] {
    use chrono::Timelike;

    let mut hours = [0u64; 24];
    for record in summary.error_records() {
        if let Some(ts) = record.parsed_timestamp() {
            hours[ts.hour() as usize] += 1;
        }
    }
    hours
}

/// Render the full text report.
pub fn render(summary: &RunSummary) -> String {
    let mut out = render_states(&summary.states);
    out.push_str(&render_boxes(summary));
    out.push_str(&render_hours(summary));
    out.push_str(&render_files(summary));
    out
}

fn render_states(states: &StateCounter) -> String {
    let total = states.total();
    let mut out = format!(
        "--- State statistics ---\nTotal records with state: {}\n",
        total
    );
    if total == 0 {
        out.push_str("No records to analyze.\n");
        return out;
    }
    for row in state_table(states) {
        out.push_str(&format!(
            "{}: {} ({}%)\n",
            row.state,
            row.count,
            format_percentage(row.percentage)
        ));
    }
    if let Some((state, count)) = states.most_common() {
        out.push_str(&format!("Most frequent state: {} ({} times)\n", state, count));
    }
    out
}

fn render_boxes(summary: &RunSummary) -> String {
    let ranked = summary.errors_by_box_ranked();
    if ranked.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n--- Errors by box ---\n");
    for (box_id, count) in ranked {
        let label = if box_id.is_empty() { "(none)" } else { box_id };
        out.push_str(&format!("{}: {}\n", label, count));
    }
    out
}

fn render_hours(summary: &RunSummary) -> String {
    let hours = errors_by_hour(summary);
    if hours.iter().all(|&c| c == 0) {
        return String::new();
    }
    let mut out = String::from("\n--- Errors by hour ---\n");
    for (hour, count) in hours.iter().enumerate().filter(|(_, c)| **c > 0) {
        out.push_str(&format!("{:02}:00  {}\n", hour, count));
    }
    out
}

fn render_files(summary: &RunSummary) -> String {
    let mut out = format!(
        "\n--- Files ---\nProcessed {} of {} file(s) ({})\nLogical records: {}\n",
        summary.files.len(),
        summary.files_attempted(),
        format_size(summary.total_bytes(), BINARY),
        summary.total_records()
    );
    if summary.unclassified() > 0 {
        out.push_str(&format!("Records without state: {}\n", summary.unclassified()));
    }
    if summary.orphan_lines() > 0 {
        out.push_str(&format!(
            "Lines dropped before first record: {}\n",
            summary.orphan_lines()
        ));
    }
    for skipped in &summary.skipped {
        out.push_str(&format!("Skipped: {}\n", skipped.reason));
    }
    out
}
