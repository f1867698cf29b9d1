use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn waveify() -> Command {
    Command::cargo_bin("waveify").unwrap()
}

#[test]
fn renders_file_input() {
    let input = write_temp("1 bar\n3 foo p1\n2 bar p2\n");

    waveify()
        .arg("-q")
        .arg("--files")
        .arg(input.path())
        .assert()
        .success()
        .stdout(contains("bar"))
        .stdout(contains("foo"))
        .stdout(contains("p1"))
        .stdout(contains("p2"))
        .stdout(contains("┌"));
}

fn stdout_lines(assert: &assert_cmd::assert::Assert) -> Vec<String> {
    String::from_utf8(assert.get_output().stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn reads_stdin_without_files() {
    let assert = waveify()
        .arg("-q")
        .write_stdin("5 x a\n5 x b\n")
        .assert()
        .success();

    // Bounds [-1, 2] at two rows per unit, four columns per time unit.
    // Both labels anchor one column right of t=5, so the later one shows.
    let pad = " ".repeat(20);
    let expected = vec![
        String::new(),
        String::new(),
        format!("{pad}┌───"),
        format!("{pad}│b"),
        format!("{}┘···", "─".repeat(20)),
        " x".to_string(),
        String::new(),
    ];
    assert_eq!(stdout_lines(&assert), expected);
}

#[test]
fn dash_reads_stdin() {
    let assert = waveify()
        .args(["-q", "--files", "-"])
        .write_stdin("1 bar\n")
        .assert()
        .success();

    assert!(stdout_lines(&assert).iter().any(|l| l == " bar"));
}

#[test]
fn bare_files_flag_reads_stdin() {
    let assert = waveify()
        .args(["-q", "-f"])
        .write_stdin("1 bar\n")
        .assert()
        .success();

    assert!(stdout_lines(&assert).iter().any(|l| l == " bar"));
}

#[test]
fn file_then_stdin_keeps_source_order() {
    let input = write_temp("1 first\n");

    let assert = waveify()
        .arg("-q")
        .arg("--files")
        .arg(input.path())
        .arg("-")
        .write_stdin("2 second\n")
        .assert()
        .success();

    // The first category sits on the bottom baseline, the second above it
    let lines = stdout_lines(&assert);
    let first = lines.iter().position(|l| l == " first").unwrap();
    let second = lines.iter().position(|l| l == " second").unwrap();
    assert!(second < first);
}

#[test]
fn halt_in_file_skips_stdin() {
    let input = write_temp("1 first\nbadline\n");

    waveify()
        .arg("-q")
        .arg("--files")
        .arg(input.path())
        .arg("-")
        .write_stdin("2 second\n")
        .assert()
        .success()
        .stdout(contains("error parsing line: badline"))
        .stdout(contains("first"))
        .stdout(contains("second").not());
}

#[test]
fn max_time_above_limit_fails() {
    waveify()
        .args(["-q", "--columns-per-unit", "2"])
        .write_stdin("10000001 x\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(contains("Failed to build waveforms"))
        .stderr(contains("exceeds the supported limit of 10000000"));
}

#[test]
fn malformed_line_reports_and_still_succeeds() {
    waveify()
        .arg("-q")
        .write_stdin("1 bar\nbadline\n3 foo\n")
        .assert()
        .success()
        .stdout(contains("error parsing line: badline"))
        .stdout(contains("bar"))
        .stdout(contains("foo").not());
}

#[test]
fn skip_malformed_keeps_going() {
    waveify()
        .args(["-q", "--skip-malformed"])
        .write_stdin("1 bar\nbadline\n3 foo\n")
        .assert()
        .success()
        .stdout(contains("error parsing line: badline"))
        .stdout(contains("foo"));
}

#[test]
fn empty_input_renders_empty_chart() {
    waveify()
        .arg("-q")
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("no events to display"));
}

#[test]
fn missing_file_fails() {
    waveify()
        .args(["-q", "--files", "/nonexistent/waveify/input.log"])
        .assert()
        .failure()
        .stderr(contains("Failed to read input"));
}

#[test]
fn config_file_sets_policy() {
    let config = write_temp("[parse]\non_malformed = \"skip\"\n");

    waveify()
        .arg("-q")
        .arg("--config")
        .arg(config.path())
        .write_stdin("badline\n2 late\n")
        .assert()
        .success()
        .stdout(contains("error parsing line: badline"))
        .stdout(contains("late"));
}

#[test]
fn rejects_low_resolution() {
    waveify()
        .args(["-q", "--columns-per-unit", "1"])
        .write_stdin("1 bar\n")
        .assert()
        .failure()
        .stderr(contains("columns_per_unit"));
}
