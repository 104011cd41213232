//! Per-file analysis and run orchestration.
//!
//! [`analyze_reader`] drives one line source through the reassembler and the
//! extractor. [`LogAnalyzer`] applies it to a list of files, isolating
//! per-file I/O failures and folding results into a [`RunSummary`] in the
//! order the files were supplied.
//!
//! # Parallel runs
//!
//! With more than one worker, files are analyzed on a dedicated Rayon pool.
//! Each worker owns the reassembler of the file it is reading; results are
//! collected in input order and folded afterwards, so a parallel run yields
//! exactly the same summary as a sequential one.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use super::counter::StateCounter;
use super::error::IngestError;
use super::extractor::{Classification, ExtractedRecord, Extractor};
use super::reassembler::Records;
use super::summary::RunSummary;

/// Line and record tallies for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Physical lines read.
    pub lines: usize,
    /// Logical records after reassembly.
    pub records: usize,
    /// Continuation lines dropped before the first record.
    pub orphan_lines: usize,
    /// Records too short to carry a state.
    pub unclassified: usize,
    /// File size on disk; zero for in-memory sources.
    pub bytes: u64,
}

/// Everything learned from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    pub states: StateCounter,
    /// Captured records in file order.
    pub records: Vec<ExtractedRecord>,
    pub stats: FileStats,
}

impl FileAnalysis {
    fn absorb(&mut self, classification: Classification) {
        self.stats.records += 1;
        match classification {
            Classification::Classified { state, extracted } => {
                self.states.increment(&state);
                if let Some(record) = extracted {
                    self.records.push(record);
                }
            }
            Classification::Unclassifiable { .. } => {
                self.stats.unclassified += 1;
            }
        }
    }
}

/// Analyze every logical record readable from `reader`.
///
/// Any read error (including invalid UTF-8) aborts the source; the partial
/// analysis is discarded.
pub fn analyze_reader<R: BufRead>(reader: R, extractor: &Extractor) -> io::Result<FileAnalysis> {
    let mut analysis = FileAnalysis::default();
    let mut records = Records::new(reader.lines());

    for record in records.by_ref() {
        let record = record?;
        tracing::trace!(
            line = record.first_line(),
            spans = record.line_count(),
            "logical record"
        );
        analysis.absorb(extractor.classify(&record));
    }

    analysis.stats.lines = records.reassembler().lines_seen();
    analysis.stats.orphan_lines = records.reassembler().orphan_lines();
    Ok(analysis)
}

/// Open and analyze one log file.
///
/// The file handle lives only for the duration of this call.
pub fn analyze_file(path: &Path, extractor: &Extractor) -> Result<FileAnalysis, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let bytes = file.metadata().map(|m| m.len()).unwrap_or_default();

    let mut analysis =
        analyze_reader(BufReader::new(file), extractor).map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    analysis.stats.bytes = bytes;

    if analysis.stats.orphan_lines > 0 {
        tracing::debug!(
            path = %path.display(),
            orphan_lines = analysis.stats.orphan_lines,
            "dropped continuation lines before the first record"
        );
    }
    Ok(analysis)
}

/// Runs file analysis over a list of files.
#[derive(Debug, Clone)]
pub struct LogAnalyzer {
    extractor: Extractor,
    workers: usize,
}

impl LogAnalyzer {
    /// Sequential analyzer using the given extractor.
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            workers: 1,
        }
    }

    /// Set the number of worker threads (values below 1 mean 1).
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Analyze `files` in order and fold the results.
    ///
    /// Unreadable files are recorded as skipped; they never abort the run.
    pub fn run<P>(&self, files: &[P]) -> RunSummary
    where
        P: AsRef<Path> + Sync,
    {
        let results = if self.workers > 1 && files.len() > 1 {
            self.analyze_parallel(files)
        } else {
            self.analyze_sequential(files)
        };

        let mut summary = RunSummary::new();
        for (path, result) in results {
            match result {
                Ok(analysis) => summary.absorb(path, analysis),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping file");
                    summary.skip(path, &e);
                }
            }
        }
        summary
    }

    fn analyze_one(&self, path: &Path) -> (PathBuf, Result<FileAnalysis, IngestError>) {
        tracing::debug!(path = %path.display(), "processing file");
        let result = analyze_file(path, &self.extractor);
        if let Ok(ref analysis) = result {
            tracing::debug!(
                path = %path.display(),
                records = analysis.stats.records,
                captured = analysis.records.len(),
                "finished file"
            );
        }
        (path.to_path_buf(), result)
    }

    fn analyze_sequential<P: AsRef<Path>>(
        &self,
        files: &[P],
    ) -> Vec<(PathBuf, Result<FileAnalysis, IngestError>)> {
        files.iter().map(|f| self.analyze_one(f.as_ref())).collect()
    }

    fn analyze_parallel<P>(&self, files: &[P]) -> Vec<(PathBuf, Result<FileAnalysis, IngestError>)>
    where
        P: AsRef<Path> + Sync,
    {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("pipelog-{}", i))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "failed to create thread pool, processing sequentially"
                );
                return self.analyze_sequential(files);
            }
        };

        // Indexed collect keeps input order regardless of completion order.
        pool.install(|| {
            files
                .par_iter()
                .map(|f| self.analyze_one(f.as_ref()))
                .collect()
        })
    }
}
