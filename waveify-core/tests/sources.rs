// Multi-source parsing against real files
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use waveify_core::{
    synthesize_outcome, Event, MalformedLinePolicy, Parser, ParserConfig, RecordingBackend,
    WaveifyError,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn sources_are_concatenated_in_order() {
    init_logging();
    let first = write_temp("1 bar\n3 foo p1\n");
    let second = write_temp("2 bar p2\n6 baz\n");

    let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];
    let outcome = Parser::default().parse_sources(&paths).unwrap();

    assert_eq!(outcome.max_time, 6);
    assert_eq!(outcome.lines_read, 4);
    let names: Vec<_> = outcome
        .database
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["bar", "foo", "baz"]);
    assert_eq!(
        outcome.database.get("bar").unwrap().events,
        vec![Event::new(1, ""), Event::new(2, "p2")]
    );

    let plot = synthesize_outcome(&outcome).unwrap();
    let mut backend = RecordingBackend::new();
    plot.render(&mut backend).unwrap();
    assert_eq!(backend.step_lines(), 3);
    assert_eq!(plot.vertical_bounds, (-1.0, 6.0));
}

#[test]
fn halt_in_first_source_never_opens_the_next() {
    init_logging();
    let first = write_temp("1 bar\nbadline\n");
    let missing = PathBuf::from("/nonexistent/waveify/second.log");

    let paths = vec![first.path().to_path_buf(), missing];
    let outcome = Parser::default().parse_sources(&paths).unwrap();

    assert!(outcome.halted);
    let bad = outcome.halted_at().unwrap();
    assert_eq!(bad.text, "badline");
    assert_eq!(bad.line_number, 2);
    assert_eq!(bad.source, first.path().display().to_string());
}

#[test]
fn skip_policy_reads_every_source() {
    init_logging();
    let first = write_temp("1 bar\nbadline\n");
    let second = write_temp("\n4 foo\n");

    let parser = Parser::new(ParserConfig::new().with_malformed_policy(MalformedLinePolicy::Skip));
    let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];
    let outcome = parser.parse_sources(&paths).unwrap();

    assert!(!outcome.halted);
    assert_eq!(outcome.malformed.len(), 2);
    assert_eq!(outcome.malformed[1].line_number, 1);
    assert_eq!(outcome.database.len(), 2);
    assert_eq!(outcome.max_time, 4);
}

#[test]
fn missing_source_is_an_error() {
    init_logging();
    let paths = vec![PathBuf::from("/nonexistent/waveify/input.log")];
    let err = Parser::default().parse_sources(&paths).unwrap_err();

    match err {
        WaveifyError::SourceIo { source_name, .. } => {
            assert_eq!(source_name, "/nonexistent/waveify/input.log")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parsing_twice_is_identical() {
    init_logging();
    let file = write_temp("5 x a\n5 x b\n2 y\n");
    let paths = vec![file.path().to_path_buf()];
    let parser = Parser::default();

    let a = parser.parse_sources(&paths).unwrap();
    let b = parser.parse_sources(&paths).unwrap();
    assert_eq!(a, b);
    assert_eq!(synthesize_outcome(&a).unwrap(), synthesize_outcome(&b).unwrap());
}
