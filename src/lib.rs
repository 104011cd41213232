//! pipelog Library
//!
//! Reassembles multi-line, pipe-delimited application logs into logical
//! records, classifies them by state and extracts error and warning details
//! for reporting and CSV export.

pub mod config;
pub mod discovery;
pub mod export;
pub mod ingest;
pub mod report;

pub use config::Config;
pub use discovery::discover_log_files;
pub use export::{write_all, ExportOptions};
pub use ingest::{
    analyze_file, analyze_reader, is_record_start, Classification, ExtractedRecord, Extractor,
    IngestError, LogAnalyzer, LogicalRecord, RecordReassembler, RunSummary, StateCounter,
    StatesOfInterest,
};
