//! Core types for the waveify library
//!
//! This module defines the records the parser produces and the error type
//! shared by every stage of the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event time, in the integer units used by the log
pub type Time = u64;

/// Result type for waveify operations
pub type Result<T> = std::result::Result<T, WaveifyError>;

/// Name reported for the standard input stream
pub const STDIN_SOURCE: &str = "<stdin>";

/// A single occurrence belonging to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Time of the occurrence
    pub time: Time,
    /// Optional name shown next to the pulse (empty when absent)
    pub label: String,
}

impl Event {
    /// Create a new event
    pub fn new(time: Time, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }

    /// True if the event carries a label worth annotating
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

/// A category and its events, in the order they were read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category name (the token after the time)
    pub name: String,
    /// Events in insertion order (not sorted by time)
    pub events: Vec<Event>,
}

impl Category {
    /// Create an empty category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
        }
    }

    /// True if at least one event happened at `time`
    pub fn fires_at(&self, time: Time) -> bool {
        self.events.iter().any(|e| e.time == time)
    }
}

/// A line that did not match the record grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// File path the line came from, or `<stdin>`
    pub source: String,
    /// 1-based line number within the source
    pub line_number: usize,
    /// The raw line, without its line terminator
    pub text: String,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {:?}", self.source, self.line_number, self.text)
    }
}

/// Errors that can occur while reading or rendering
#[derive(Debug, thiserror::Error)]
pub enum WaveifyError {
    #[error("Failed to read input {source_name}: {error}")]
    SourceIo {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Max time {max_time} exceeds the supported limit of {limit}")]
    TimeOutOfRange { max_time: Time, limit: Time },

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
