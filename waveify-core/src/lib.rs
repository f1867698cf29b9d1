//! Waveify Library
//!
//! Turns a line-oriented event log into stacked step waveforms, one per
//! event category.
//!
//! # Architecture
//!
//! The library is a two-stage pipeline:
//! - [`Parser`] reads `<time> <category> [<label>]` records from one or more
//!   sources into an [`EventDatabase`], tracking the largest time seen
//! - [`synthesize`] builds a dense 0/1 waveform per category on a shared time
//!   axis and emits the drawing instructions for the chart
//!
//! Drawing is delegated to a [`ChartBackend`]. The library ships a
//! [`RecordingBackend`] that keeps the instructions for inspection; the
//! application layer (waveify-cli) provides a terminal renderer.
//!
//! # Example Usage
//!
//! ```
//! use waveify_core::{synthesize_outcome, Parser, ParserConfig, RecordingBackend};
//!
//! let parser = Parser::new(ParserConfig::new());
//! let outcome = parser.parse_str("1 bar\n3 foo p1\n2 bar p2\n").unwrap();
//! assert_eq!(outcome.max_time, 3);
//!
//! let plot = synthesize_outcome(&outcome).unwrap();
//! let mut backend = RecordingBackend::new();
//! plot.render(&mut backend).unwrap();
//! assert_eq!(backend.step_lines(), 2);
//! ```

// Public modules
pub mod chart;
pub mod config;
pub mod database;
pub mod parser;
pub mod record;
pub mod synth;
pub mod types;

// Re-export main types for convenience
pub use chart::{ChartBackend, DrawInstruction, RecordingBackend};
pub use config::{MalformedLinePolicy, ParserConfig};
pub use database::{DatabaseStats, EventDatabase};
pub use parser::{ParseOutcome, Parser};
pub use synth::{synthesize, synthesize_outcome, Plot, Trace};
pub use types::{Category, Event, MalformedLine, Result, Time, WaveifyError, STDIN_SOURCE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
