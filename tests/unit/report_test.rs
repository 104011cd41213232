//! Tests for the text report

use pipelog::report;

use crate::helpers::{load_fixture, summarize};

#[test]
fn report_for_multiline_fixture() {
    let summary = summarize("multiline.log", &load_fixture("multiline.log"));
    let text = report::render(&summary);

    insta::assert_snapshot!(text, @r"
    --- State statistics ---
    Total records with state: 5
    ERR: 2 (40.00%)
    INF: 2 (40.00%)
    WRN: 1 (20.00%)
    Most frequent state: ERR (2 times)

    --- Errors by box ---
    CAJA01: 1
    CAJA02: 1

    --- Errors by hour ---
    08:00  1
    09:00  1

    --- Files ---
    Processed 1 of 1 file(s) (0 B)
    Logical records: 6
    Records without state: 1
    Lines dropped before first record: 1
    ");
}

#[test]
fn report_for_empty_run() {
    let summary = summarize("empty.log", "");
    let text = report::render(&summary);

    assert!(text.contains("No records to analyze."));
    assert!(!text.contains("Errors by box"));
}
