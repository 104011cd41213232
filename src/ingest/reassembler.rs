//! Continuation-line reassembly.
//!
//! [`RecordReassembler`] is the per-file state machine. It holds at most one
//! record in progress and hands back a [`LogicalRecord`] each time a new
//! timestamped line closes the previous one. [`Records`] wraps a line
//! iterator so a whole file can be consumed as a lazy stream of records.

use std::io;

use super::classifier::is_record_start;

/// Separator placed between the physical lines of one logical record.
const LINE_JOINER: char = ' ';

/// One log entry, with its continuation lines joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRecord {
    text: String,
    first_line: usize,
    line_count: usize,
}

impl LogicalRecord {
    /// The joined record text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based line number of the timestamped line that opened the record.
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// Number of physical lines the record spans.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Consume the record, returning the joined text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Whether a record is currently being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReassemblerState {
    /// No record started yet, or the last one was flushed at end of input.
    Empty,
    /// A record is open and will absorb continuation lines.
    Buffering,
}

/// Joins continuation lines onto the timestamped line that precedes them.
///
/// Continuation lines seen before the first timestamped line cannot belong to
/// any record; they are dropped and tallied in [`orphan_lines`](Self::orphan_lines).
#[derive(Debug, Default)]
pub struct RecordReassembler {
    buffer: String,
    buffered_lines: usize,
    first_line: usize,
    lines_seen: usize,
    orphan_lines: usize,
}

impl RecordReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next physical line (terminator already stripped).
    ///
    /// Returns the previous record when `line` starts a new one.
    pub fn push_line(&mut self, line: &str) -> Option<LogicalRecord> {
        self.lines_seen += 1;

        if is_record_start(line) {
            let flushed = self.flush();
            self.buffer.push_str(line);
            self.buffered_lines = 1;
            self.first_line = self.lines_seen;
            return flushed;
        }

        if self.buffered_lines == 0 {
            self.orphan_lines += 1;
            tracing::debug!(
                line = self.lines_seen,
                "discarding continuation line before first record"
            );
        } else {
            self.buffer.push(LINE_JOINER);
            self.buffer.push_str(line);
            self.buffered_lines += 1;
        }
        None
    }

    /// Signal end of input, releasing the trailing record if one is open.
    ///
    /// Calling this again without new lines returns `None`.
    pub fn finish(&mut self) -> Option<LogicalRecord> {
        self.flush()
    }

    pub fn state(&self) -> ReassemblerState {
        if self.buffered_lines == 0 {
            ReassemblerState::Empty
        } else {
            ReassemblerState::Buffering
        }
    }

    /// Physical lines fed so far.
    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Continuation lines dropped because no record was open.
    pub fn orphan_lines(&self) -> usize {
        self.orphan_lines
    }

    fn flush(&mut self) -> Option<LogicalRecord> {
        if self.buffered_lines == 0 {
            return None;
        }

        let record = LogicalRecord {
            text: std::mem::take(&mut self.buffer),
            first_line: self.first_line,
            line_count: self.buffered_lines,
        };
        self.buffered_lines = 0;
        Some(record)
    }
}

/// Lazy stream of logical records over a line iterator.
///
/// The trailing record is emitted once the underlying lines run out. A read
/// error is yielded once and ends the stream.
pub struct Records<I> {
    lines: I,
    reassembler: RecordReassembler,
    done: bool,
}

impl<I> Records<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            reassembler: RecordReassembler::new(),
            done: false,
        }
    }

    /// The underlying reassembler, for line and orphan counts.
    pub fn reassembler(&self) -> &RecordReassembler {
        &self.reassembler
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<LogicalRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    if let Some(record) = self.reassembler.push_line(&line) {
                        return Some(Ok(record));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return self.reassembler.finish().map(Ok);
                }
            }
        }
    }
}
