//! The run accumulator.
//!
//! [`RunSummary`] is the single value handed to exporters and reports once
//! every file has been processed. It is built by folding per-file results in
//! caller order; nothing about it depends on global state.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

use super::counter::StateCounter;
use super::error::IngestError;
use super::extractor::{ExtractedRecord, STATE_ERROR, STATE_WARNING};
use super::processor::{FileAnalysis, FileStats};

/// A file that contributed to the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub stats: FileStats,
}

/// A file that could not be read; it contributes nothing to the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregated results of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Per-state totals across all files.
    pub states: StateCounter,
    /// Captured records, file by file, each file in line order.
    pub records: Vec<ExtractedRecord>,
    /// `ERR` records per box, counting only records with more than six fields.
    pub errors_by_box: BTreeMap<String, u64>,
    /// Files processed, in the order supplied.
    pub files: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's analysis into the run.
    pub fn absorb(&mut self, path: PathBuf, analysis: FileAnalysis) {
        self.states.merge(&analysis.states);
        for record in &analysis.records {
            if record.state == STATE_ERROR && record.has_box() {
                *self.errors_by_box.entry(record.box_id.clone()).or_insert(0) += 1;
            }
        }
        self.records.extend(analysis.records);
        self.files.push(FileReport {
            path,
            stats: analysis.stats,
        });
    }

    /// Record a file that failed to open or read.
    pub fn skip(&mut self, path: PathBuf, error: &IngestError) {
        self.skipped.push(SkippedFile {
            path,
            reason: error.to_string(),
        });
    }

    /// Files the run tried to process, readable or not.
    pub fn files_attempted(&self) -> usize {
        self.files.len() + self.skipped.len()
    }

    pub fn records_with_state<'a>(
        &'a self,
        state: &'a str,
    ) -> impl Iterator<Item = &'a ExtractedRecord> + 'a {
        self.records.iter().filter(move |r| r.state == state)
    }

    pub fn error_records(&self) -> impl Iterator<Item = &ExtractedRecord> {
        self.records_with_state(STATE_ERROR)
    }

    pub fn warning_records(&self) -> impl Iterator<Item = &ExtractedRecord> {
        self.records_with_state(STATE_WARNING)
    }

    /// Distinct (box, module, flow) triples that produced errors, sorted.
    ///
    /// Only records with more than eight fields carry a full location.
    pub fn error_locations(&self) -> Vec<(&str, &str, &str)> {
        self.error_records()
            .filter(|r| r.has_location())
            .map(|r| (r.box_id.as_str(), r.module.as_str(), r.flow.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Boxes by error count descending, ties broken by name.
    pub fn errors_by_box_ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .errors_by_box
            .iter()
            .map(|(b, c)| (b.as_str(), *c))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Logical records that carried no state, across all files.
    pub fn unclassified(&self) -> usize {
        self.files.iter().map(|f| f.stats.unclassified).sum()
    }

    /// Logical records seen across all files.
    pub fn total_records(&self) -> usize {
        self.files.iter().map(|f| f.stats.records).sum()
    }

    /// Continuation lines dropped before the first record of their file.
    pub fn orphan_lines(&self) -> usize {
        self.files.iter().map(|f| f.stats.orphan_lines).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.stats.bytes).sum()
    }
}
