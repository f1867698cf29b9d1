//! Line parser
//!
//! Reads records from one or more sources into an [`EventDatabase`]. The
//! parser owns all of its state and hands back an immutable
//! [`ParseOutcome`], so parsing the same input twice gives equal results.

use crate::config::ParserConfig;
use crate::database::EventDatabase;
use crate::record::parse_record;
use crate::types::{Event, MalformedLine, Result, Time, WaveifyError, STDIN_SOURCE};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// The result of one parser run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Events grouped by category
    pub database: EventDatabase,
    /// Largest time seen (0 when nothing was parsed)
    pub max_time: Time,
    /// Lines that did not match, in input order
    pub malformed: Vec<MalformedLine>,
    /// True if parsing stopped early at a malformed line
    pub halted: bool,
    /// Number of lines consumed, including malformed ones
    pub lines_read: usize,
}

impl ParseOutcome {
    /// The line that halted parsing, if any
    pub fn halted_at(&self) -> Option<&MalformedLine> {
        if self.halted {
            self.malformed.last()
        } else {
            None
        }
    }

    fn record(&mut self, category: &str, time: Time, label: &str) {
        self.database.push(category, Event::new(time, label));
        if time > self.max_time {
            self.max_time = time;
        }
    }
}

/// The line parser
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse an in-memory string, reported as coming from `<stdin>`
    pub fn parse_str(&self, input: &str) -> Result<ParseOutcome> {
        self.parse_reader(STDIN_SOURCE, input.as_bytes())
    }

    /// Parse every line of a single reader
    pub fn parse_reader<R: BufRead>(&self, source_name: &str, reader: R) -> Result<ParseOutcome> {
        let mut outcome = ParseOutcome::default();
        self.feed(&mut outcome, source_name, reader)?;
        Ok(outcome)
    }

    /// Parse the standard input stream until end of input
    pub fn parse_stdin(&self) -> Result<ParseOutcome> {
        let stdin = io::stdin();
        self.parse_reader(STDIN_SOURCE, stdin.lock())
    }

    /// Parse a list of sources in order, as one concatenated stream
    ///
    /// An empty list reads standard input, and so does the path `-`. Files are
    /// opened only when reached, so sources after a halting line are never
    /// touched.
    pub fn parse_sources(&self, paths: &[PathBuf]) -> Result<ParseOutcome> {
        if paths.is_empty() {
            return self.parse_stdin();
        }

        let mut outcome = ParseOutcome::default();
        for path in paths {
            if outcome.halted {
                log::debug!("Skipping {:?}: parsing already halted", path);
                break;
            }

            if path == Path::new("-") {
                let stdin = io::stdin();
                self.feed(&mut outcome, STDIN_SOURCE, stdin.lock())?;
                continue;
            }

            let source_name = path.display().to_string();
            log::debug!("Reading input file: {}", source_name);
            let file = File::open(path).map_err(|error| WaveifyError::SourceIo {
                source_name: source_name.clone(),
                error,
            })?;
            self.feed(&mut outcome, &source_name, BufReader::new(file))?;
        }

        Ok(outcome)
    }

    /// Consume lines from `reader` into `outcome` until end of input or halt
    fn feed<R: BufRead>(
        &self,
        outcome: &mut ParseOutcome,
        source_name: &str,
        mut reader: R,
    ) -> Result<()> {
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|error| WaveifyError::SourceIo {
                    source_name: source_name.to_string(),
                    error,
                })?;
            if n == 0 {
                break;
            }
            line_number += 1;
            outcome.lines_read += 1;

            let raw = strip_line_terminator(&buf);
            let parsed = std::str::from_utf8(raw).ok().and_then(parse_record);

            match parsed {
                Some(rec) => {
                    log::trace!("{}:{}: {:?}", source_name, line_number, rec);
                    outcome.record(rec.category, rec.time, rec.label);
                }
                None => {
                    let malformed = MalformedLine {
                        source: source_name.to_string(),
                        line_number,
                        text: String::from_utf8_lossy(raw).into_owned(),
                    };
                    log::warn!("Malformed line at {}", malformed);
                    outcome.malformed.push(malformed);

                    if self.config.stops_on_malformed() {
                        outcome.halted = true;
                        break;
                    }
                }
            }
        }

        log::debug!(
            "Finished {}: {} lines, {} categories so far, max time {}",
            source_name,
            line_number,
            outcome.database.len(),
            outcome.max_time
        );
        Ok(())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
