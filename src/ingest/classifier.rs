//! Record boundary detection.
//!
//! A physical line opens a new logical record when it begins with a
//! `MM/DD/YYYY HH:MM:SS.mmm` timestamp. The check is purely lexical: digits
//! in the right places are enough, so `13/40/9999 99:99:99.999` still counts.

/// Length in bytes of the timestamp prefix (`01/31/2024 23:59:59.999`).
pub const TIMESTAMP_PREFIX_LEN: usize = 23;

/// Byte shape of the prefix: `d` is any ASCII digit, anything else is literal.
const PREFIX_SHAPE: &[u8; TIMESTAMP_PREFIX_LEN] = b"dd/dd/dddd dd:dd:dd.ddd";

/// Returns true if `line` starts a new logical record.
pub fn is_record_start(line: &str) -> bool {
    let bytes = line.as_bytes();
    if bytes.len() < TIMESTAMP_PREFIX_LEN {
        return false;
    }

    PREFIX_SHAPE
        .iter()
        .zip(bytes)
        .all(|(&shape, &byte)| match shape {
            b'd' => byte.is_ascii_digit(),
            literal => byte == literal,
        })
}
