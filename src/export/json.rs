//! JSON run summary.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::ingest::{FileReport, RunSummary, SkippedFile, StateCounter};

/// Serialized shape of `resumen.json`.
#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub generated_at: String,
    pub files_attempted: usize,
    pub files_processed: usize,
    pub total_records: usize,
    pub records_without_state: usize,
    pub orphan_lines: usize,
    pub errors: usize,
    pub warnings: usize,
    pub states: &'a StateCounter,
    pub errors_by_box: &'a BTreeMap<String, u64>,
    pub files: &'a [FileReport],
    pub skipped: &'a [SkippedFile],
}

impl<'a> SummaryDocument<'a> {
    pub fn new(summary: &'a RunSummary, generated_at: DateTime<Local>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339(),
            files_attempted: summary.files_attempted(),
            files_processed: summary.files.len(),
            total_records: summary.total_records(),
            records_without_state: summary.unclassified(),
            orphan_lines: summary.orphan_lines(),
            errors: summary.error_records().count(),
            warnings: summary.warning_records().count(),
            states: &summary.states,
            errors_by_box: &summary.errors_by_box,
            files: &summary.files,
            skipped: &summary.skipped,
        }
    }
}

/// Pretty-printed JSON for a run.
pub fn summary_json(
    summary: &RunSummary,
    generated_at: DateTime<Local>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SummaryDocument::new(summary, generated_at))
}
