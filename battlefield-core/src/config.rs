//! Comparator configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default expected-event file name
pub const DEFAULT_EXPECTED_PATH: &str = "expected.jsonl";

/// Default trace document file name
pub const DEFAULT_TRACE_PATH: &str = "dm.log.json";

/// How the report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Diagnostic lines and a tally
    #[default]
    Text,
    /// The full report as pretty JSON
    Json,
}

/// Comparator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Newline-delimited expected events
    pub expected_path: PathBuf,
    /// JSON array of block records
    pub trace_path: PathBuf,
    #[serde(default)]
    pub output: OutputFormat,
}

impl CompareConfig {
    /// Create a new configuration builder
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder::default()
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            expected_path: PathBuf::from(DEFAULT_EXPECTED_PATH),
            trace_path: PathBuf::from(DEFAULT_TRACE_PATH),
            output: OutputFormat::Text,
        }
    }
}

/// Builder for CompareConfig
#[derive(Debug, Default)]
pub struct CompareConfigBuilder {
    expected_path: Option<PathBuf>,
    trace_path: Option<PathBuf>,
    output: Option<OutputFormat>,
}

impl CompareConfigBuilder {
    /// Set the expected-event file
    pub fn expected_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.expected_path = Some(path.into());
        self
    }

    /// Set the trace document file
    pub fn trace_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.trace_path = Some(path.into());
        self
    }

    /// Set the report format
    pub fn output(mut self, output: OutputFormat) -> Self {
        self.output = Some(output);
        self
    }

    /// Build the configuration
    pub fn build(self) -> CompareConfig {
        CompareConfig {
            expected_path: self
                .expected_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPECTED_PATH)),
            trace_path: self
                .trace_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRACE_PATH)),
            output: self.output.unwrap_or_default(),
        }
    }
}
