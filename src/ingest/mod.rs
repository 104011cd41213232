//! Record reassembly and classification for pipe-delimited application logs.
//!
//! Log files in this format prefix every entry with a millisecond timestamp
//! (`MM/DD/YYYY HH:MM:SS.mmm`). An entry may continue over several physical
//! lines; continuation lines carry no timestamp. The pipeline here turns a
//! stream of physical lines into classified records in a single forward pass:
//!
//! ```text
//! lines ──▶ RecordReassembler ──▶ LogicalRecord ──▶ Extractor ──▶ Classification
//!                                                                  │
//!                                          RunSummary ◀── FileAnalysis
//! ```
//!
//! # Module Structure
//!
//! - [`classifier`] - timestamp prefix detection for record boundaries
//! - [`reassembler`] - joins continuation lines onto their owning record
//! - [`extractor`] - positional field parsing and state classification
//! - [`counter`] - per-state occurrence counts
//! - [`processor`] - per-file analysis and run orchestration
//! - [`summary`] - the run accumulator exposed to exporters and reports
//! - [`error`] - I/O and input-location failures

pub mod classifier;
pub mod counter;
pub mod error;
pub mod extractor;
pub mod processor;
pub mod reassembler;
pub mod summary;

pub use classifier::{is_record_start, TIMESTAMP_PREFIX_LEN};
pub use counter::StateCounter;
pub use error::IngestError;
pub use extractor::{
    Classification, ExtractedRecord, Extractor, FieldSet, StatesOfInterest, DELIMITER,
    STATE_ERROR, STATE_WARNING,
};
pub use processor::{analyze_file, analyze_reader, FileAnalysis, FileStats, LogAnalyzer};
pub use reassembler::{LogicalRecord, ReassemblerState, RecordReassembler, Records};
pub use summary::{FileReport, RunSummary, SkippedFile};
