//! Parser configuration types
//!
//! The parser only needs to know what to do with lines that do not match the
//! record grammar. Everything presentation-related lives in the application.

use serde::{Deserialize, Serialize};

/// What the parser does when a line does not match the record grammar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Report the line and stop reading all further input
    #[default]
    Stop,
    /// Report the line and continue with the next one
    Skip,
}

/// Configuration for the line parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Policy for lines that fail to parse (default: stop)
    #[serde(default)]
    pub on_malformed: MalformedLinePolicy,
}

impl ParserConfig {
    /// Create a new parser configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the malformed line policy
    pub fn with_malformed_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    /// True if parsing halts at the first malformed line
    pub fn stops_on_malformed(&self) -> bool {
        self.on_malformed == MalformedLinePolicy::Stop
    }
}
