//! Field extraction and state classification.
//!
//! A logical record is a `|`-separated list of fields with a fixed layout:
//!
//! | index | field      |
//! |-------|------------|
//! | 0     | timestamp  |
//! | 4     | state      |
//! | 5     | box (caja) |
//! | 6     | module     |
//! | 7     | flow       |
//! | 8..   | message    |
//!
//! Fields 1-3 carry nothing the reports use. The message may itself contain
//! the delimiter, so everything from index 8 on is joined back together.

use serde::{Deserialize, Serialize};

use super::reassembler::LogicalRecord;

/// Field separator within a logical record.
pub const DELIMITER: char = '|';

const DELIMITER_STR: &str = "|";

/// State code of error records.
pub const STATE_ERROR: &str = "ERR";

/// State code of warning records.
pub const STATE_WARNING: &str = "WRN";

const TIMESTAMP: usize = 0;
const STATE: usize = 4;
const BOX: usize = 5;
const MODULE: usize = 6;
const FLOW: usize = 7;
const MESSAGE: usize = 8;

/// Records with this many fields or fewer carry no usable state.
const MIN_FIELDS_EXCLUSIVE: usize = 5;

/// Records with this many fields or fewer are left out of per-box counts.
const BOX_MIN_FIELDS_EXCLUSIVE: usize = 6;

/// Records with this many fields or fewer are left out of error locations.
const LOCATION_MIN_FIELDS_EXCLUSIVE: usize = 8;

/// A record split on [`DELIMITER`] with every field trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet<'a> {
    fields: Vec<&'a str>,
}

impl<'a> FieldSet<'a> {
    pub fn parse(text: &'a str) -> Self {
        Self {
            fields: text.split(DELIMITER).map(str::trim).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false: splitting yields at least one (possibly empty) field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// True when the record is long enough to carry a state code.
    pub fn has_state(&self) -> bool {
        self.fields.len() > MIN_FIELDS_EXCLUSIVE
    }

    pub fn timestamp(&self) -> &'a str {
        self.field_or_empty(TIMESTAMP)
    }

    pub fn state(&self) -> Option<&'a str> {
        if self.has_state() {
            self.get(STATE)
        } else {
            None
        }
    }

    pub fn box_id(&self) -> &'a str {
        self.field_or_empty(BOX)
    }

    pub fn module(&self) -> &'a str {
        self.field_or_empty(MODULE)
    }

    pub fn flow(&self) -> &'a str {
        self.field_or_empty(FLOW)
    }

    /// Message fields rejoined with the delimiter, or empty when absent.
    pub fn message(&self) -> String {
        match self.fields.get(MESSAGE..) {
            Some(rest) => rest.join(DELIMITER_STR),
            None => String::new(),
        }
    }

    fn field_or_empty(&self, index: usize) -> &'a str {
        self.get(index).unwrap_or("")
    }
}

/// The structured row kept for records whose state is of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub timestamp: String,
    pub state: String,
    #[serde(rename = "box")]
    pub box_id: String,
    pub module: String,
    pub flow: String,
    pub message: String,
    /// Fields in the source record, before padding.
    #[serde(skip)]
    pub field_count: usize,
}

impl ExtractedRecord {
    fn from_fields(fields: &FieldSet<'_>, state: &str) -> Self {
        Self {
            timestamp: fields.timestamp().to_string(),
            state: state.to_string(),
            box_id: fields.box_id().to_string(),
            module: fields.module().to_string(),
            flow: fields.flow().to_string(),
            message: fields.message(),
            field_count: fields.len(),
        }
    }

    /// True when the source record is long enough to count toward its box.
    pub fn has_box(&self) -> bool {
        self.field_count > BOX_MIN_FIELDS_EXCLUSIVE
    }

    /// True when the source record carried box, module, flow and a message.
    pub fn has_location(&self) -> bool {
        self.field_count > LOCATION_MIN_FIELDS_EXCLUSIVE
    }

    /// Parse the timestamp column (`MM/DD/YYYY HH:MM:SS.mmm`).
    ///
    /// Returns `None` for prefixes that only look like timestamps, such as
    /// `13/40/2024 ...`.
    pub fn parsed_timestamp(&self) -> Option<chrono::NaiveDateTime> {
        let prefix = self.timestamp.get(..super::TIMESTAMP_PREFIX_LEN)?;
        chrono::NaiveDateTime::parse_from_str(prefix, "%m/%d/%Y %H:%M:%S%.3f").ok()
    }

    /// Cells in export column order: timestamp, state, box, module, flow, message.
    pub fn columns(&self) -> [&str; 6] {
        [
            self.timestamp.as_str(),
            self.state.as_str(),
            self.box_id.as_str(),
            self.module.as_str(),
            self.flow.as_str(),
            self.message.as_str(),
        ]
    }
}

/// Outcome of classifying one logical record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The record carried a state code.
    Classified {
        state: String,
        /// Present only when the state is one the caller asked to capture.
        extracted: Option<ExtractedRecord>,
    },
    /// Too few fields to locate the state.
    Unclassifiable { field_count: usize },
}

impl Classification {
    pub fn state(&self) -> Option<&str> {
        match self {
            Classification::Classified { state, .. } => Some(state.as_str()),
            Classification::Unclassifiable { .. } => None,
        }
    }

    pub fn extracted(&self) -> Option<&ExtractedRecord> {
        match self {
            Classification::Classified { extracted, .. } => extracted.as_ref(),
            Classification::Unclassifiable { .. } => None,
        }
    }
}

/// The set of state codes whose records are captured in full.
///
/// `ERR` is always a member; configured states add to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatesOfInterest {
    states: Vec<String>,
}

impl StatesOfInterest {
    pub fn new<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = vec![STATE_ERROR.to_string()];
        for state in states {
            let state = state.into().trim().to_string();
            if !state.is_empty() && !unique.contains(&state) {
                unique.push(state);
            }
        }
        Self { states: unique }
    }

    /// Only `ERR` records.
    pub fn errors_only() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    pub fn contains(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.states
    }
}

impl Default for StatesOfInterest {
    fn default() -> Self {
        Self::new([STATE_ERROR, STATE_WARNING])
    }
}

/// Stateless record classifier.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    interest: StatesOfInterest,
}

impl Extractor {
    pub fn new(interest: StatesOfInterest) -> Self {
        Self { interest }
    }

    pub fn states_of_interest(&self) -> &StatesOfInterest {
        &self.interest
    }

    pub fn classify(&self, record: &LogicalRecord) -> Classification {
        self.classify_text(record.text())
    }

    pub fn classify_text(&self, text: &str) -> Classification {
        let fields = FieldSet::parse(text);

        let Some(state) = fields.state() else {
            tracing::trace!(field_count = fields.len(), "record has no state field");
            return Classification::Unclassifiable {
                field_count: fields.len(),
            };
        };

        let extracted = self
            .interest
            .contains(state)
            .then(|| ExtractedRecord::from_fields(&fields, state));

        Classification::Classified {
            state: state.to_string(),
            extracted,
        }
    }
}
