//! Tests for the reassembly, classification and aggregation pipeline

use std::io::Cursor;
use std::path::PathBuf;

use pipelog::ingest::{Classification, FieldSet, STATE_ERROR};
use pipelog::{analyze_reader, Extractor, RecordReassembler, RunSummary, StatesOfInterest};

use crate::helpers::{load_fixture, record_line, summarize};

#[test]
fn single_error_line_is_counted_and_extracted() {
    let summary = summarize(
        "app.log",
        "01/01/2024 12:00:00.000 | a | b | c | ERR | CAJA1 | MOD1 | FLUJO1 | Mensaje de error\n",
    );

    assert_eq!(summary.states.get("ERR"), 1);
    let errors: Vec<_> = summary.error_records().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].state, "ERR");
    assert_eq!(errors[0].box_id, "CAJA1");
    assert_eq!(errors[0].module, "MOD1");
    assert_eq!(errors[0].flow, "FLUJO1");
    assert_eq!(errors[0].message, "Mensaje de error");
}

#[test]
fn continuation_joins_info_record_without_extraction() {
    let summary = summarize(
        "app.log",
        "01/01/2024 12:00:00.000 | a | b | c | INF | CAJA1 | MOD1 | FLUJO1 | ok\ncontinued text\n",
    );

    assert_eq!(summary.total_records(), 1);
    assert_eq!(summary.states.get("INF"), 1);
    assert!(summary.records.is_empty());
}

#[test]
fn four_field_record_is_unclassifiable() {
    let summary = summarize("app.log", "01/01/2024 12:00:00.000|a|b|c\n");

    assert_eq!(summary.total_records(), 1);
    assert_eq!(summary.unclassified(), 1);
    assert!(summary.states.is_empty());
    assert!(summary.records.is_empty());
}

#[test]
fn empty_file_is_processed_with_zero_totals() {
    let summary = summarize("empty.log", "");

    assert_eq!(summary.states.total(), 0);
    assert!(summary.records.is_empty());
    assert_eq!(summary.files_attempted(), 1);
    assert_eq!(summary.files[0].stats.lines, 0);
}

#[test]
fn multiline_fixture_is_reassembled() {
    let summary = summarize("multiline.log", &load_fixture("multiline.log"));
    let stats = summary.files[0].stats;

    assert_eq!(stats.lines, 9);
    assert_eq!(stats.records, 6);
    assert_eq!(stats.orphan_lines, 1);
    assert_eq!(stats.unclassified, 1);

    assert_eq!(summary.states.get("INF"), 2);
    assert_eq!(summary.states.get("ERR"), 2);
    assert_eq!(summary.states.get("WRN"), 1);

    let errors: Vec<_> = summary.error_records().collect();
    assert_eq!(
        errors[0].message,
        "Timeout al contactar al banco    at Banco.Conectar()    at Ventas.Cobrar()"
    );
    assert_eq!(errors[1].message, "Respuesta invalida|codigo=17");
    assert_eq!(summary.warning_records().count(), 1);
}

#[test]
fn only_continuation_lines_yield_nothing() {
    let summary = summarize("no_records.log", &load_fixture("no_records.log"));

    assert_eq!(summary.total_records(), 0);
    assert_eq!(summary.orphan_lines(), 2);
    assert!(summary.states.is_empty());
}

#[test]
fn flush_count_equals_record_start_count() {
    let text = load_fixture("multiline.log");
    let starts = text
        .lines()
        .filter(|l| pipelog::is_record_start(l))
        .count();

    let mut reassembler = RecordReassembler::new();
    let mut flushed = text
        .lines()
        .filter_map(|l| reassembler.push_line(l))
        .count();
    flushed += reassembler.finish().into_iter().count();

    assert_eq!(flushed, starts);
}

#[test]
fn splitting_is_lossless_modulo_trimming() {
    let text = record_line("12:00:00.000", "ERR", "CAJA1 | M | F | a | b");
    let untrimmed: Vec<&str> = text.split('|').collect();
    let fields = FieldSet::parse(&text);

    assert_eq!(fields.len(), untrimmed.len());
    let total: usize = untrimmed.iter().map(|f| f.len()).sum::<usize>() + untrimmed.len() - 1;
    assert_eq!(total, text.len());
}

#[test]
fn reprocessing_is_idempotent() {
    let text = load_fixture("multiline.log");
    let first = analyze_reader(Cursor::new(text.clone()), &Extractor::default()).unwrap();
    let second = analyze_reader(Cursor::new(text), &Extractor::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn records_keep_file_order() {
    let text = [
        record_line("10:00:00.000", "ERR", "B | M | F | first"),
        record_line("09:00:00.000", "ERR", "A | M | F | second"),
        record_line("11:00:00.000", "ERR", "C | M | F | third"),
    ]
    .join("\n");
    let summary = summarize("app.log", &text);

    let messages: Vec<&str> = summary
        .error_records()
        .map(|r| r.message.as_str())
        .collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
}

#[test]
fn custom_states_of_interest_capture_other_codes() {
    let extractor = Extractor::new(StatesOfInterest::new(["CRT"]));
    let text = record_line("10:00:00.000", "CRT", "CAJA9 | M | F | caida");

    match extractor.classify_text(&text) {
        Classification::Classified { state, extracted } => {
            assert_eq!(state, "CRT");
            assert_eq!(extracted.unwrap().box_id, "CAJA9");
        }
        other => panic!("expected classified, got {:?}", other),
    }
    assert!(extractor
        .classify_text(&record_line("10:00:00.000", "WRN", "B | M | F | x"))
        .extracted()
        .is_none());
}

#[test]
fn errors_are_captured_whatever_states_are_configured() {
    let extractor = Extractor::new(StatesOfInterest::new(["WRN"]));
    let text = [
        record_line("10:00:00.000", STATE_ERROR, "CAJA1 | M | F | fallo"),
        record_line("10:00:01.000", "WRN", "CAJA2 | M | F | lento"),
    ]
    .join("\n");

    let analysis = analyze_reader(Cursor::new(text), &extractor).unwrap();
    let mut summary = RunSummary::new();
    summary.absorb(PathBuf::from("app.log"), analysis);

    assert_eq!(summary.states.get("ERR"), 1);
    assert_eq!(summary.error_records().count(), 1);
    assert_eq!(summary.warning_records().count(), 1);
    assert_eq!(summary.errors_by_box.get("CAJA1"), Some(&1));
    assert_eq!(summary.error_locations(), vec![("CAJA1", "M", "F")]);
}

#[test]
fn short_error_records_are_kept_but_not_located() {
    let summary = summarize(
        "app.log",
        "01/01/2024 12:00:00.000|a|b|c|ERR|CAJA1\n\
         01/01/2024 12:00:01.000|a|b|c|ERR|CAJA2|MOD2\n\
         01/01/2024 12:00:02.000|a|b|c|ERR|CAJA3|MOD3|FLUJO3|mensaje\n",
    );

    assert_eq!(summary.states.get("ERR"), 3);
    assert_eq!(summary.error_records().count(), 3);
    assert_eq!(
        summary.errors_by_box_ranked(),
        vec![("CAJA2", 1), ("CAJA3", 1)]
    );
    assert_eq!(summary.error_locations(), vec![("CAJA3", "MOD3", "FLUJO3")]);
}

#[test]
fn six_field_error_leaves_box_tables_empty() {
    let summary = summarize(
        "app.log",
        "01/01/2024 12:00:00.000|a|b|c|ERR|CAJA1\n01/01/2024 12:00:01.000|a|b|c|ERR\n",
    );

    assert_eq!(summary.states.get("ERR"), 1);
    assert_eq!(summary.unclassified(), 1);
    assert!(summary.errors_by_box.is_empty());
    assert!(summary.error_locations().is_empty());
}
