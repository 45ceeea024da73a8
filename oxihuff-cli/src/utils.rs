//! Utility functions for the CLI.

use serde::Serialize;
use std::path::Path;

/// How a finished run is reported on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Print nothing.
    #[default]
    Quiet,
    /// One human-readable line.
    Human,
    /// One JSON object.
    Json,
}

impl ReportMode {
    /// Pick the mode from the `--verbose` and `--json` flags; JSON wins.
    pub fn from_flags(verbose: bool, json: bool) -> Self {
        if json {
            Self::Json
        } else if verbose {
            Self::Human
        } else {
            Self::Quiet
        }
    }
}

/// Summary of one encode or decode run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// `encode` or `decode`.
    pub action: &'static str,
    /// Input path.
    pub input: String,
    /// Output path, absent when nothing was written.
    pub output: Option<String>,
    /// Bytes read.
    pub input_bytes: u64,
    /// Bytes written.
    pub output_bytes: u64,
    /// Code table size, for encodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_symbols: Option<usize>,
}

impl Summary {
    /// Create a summary for a run between two files.
    pub fn new(action: &'static str, input: &Path, output: Option<&Path>) -> Self {
        Self {
            action,
            input: input.display().to_string(),
            output: output.map(|p| p.display().to_string()),
            input_bytes: 0,
            output_bytes: 0,
            distinct_symbols: None,
        }
    }

    /// Space saved by the container relative to the original, in percent.
    pub fn space_savings(&self) -> f64 {
        let (original, packed) = match self.action {
            "decode" => (self.output_bytes, self.input_bytes),
            _ => (self.input_bytes, self.output_bytes),
        };
        if original == 0 {
            0.0
        } else {
            (1.0 - packed as f64 / original as f64) * 100.0
        }
    }

    /// One-line human-readable form.
    pub fn to_line(&self) -> String {
        match &self.output {
            Some(output) => format!(
                "{}: {} ({} bytes) -> {} ({} bytes), {:.1}% saved",
                self.action,
                self.input,
                self.input_bytes,
                output,
                self.output_bytes,
                self.space_savings()
            ),
            None => format!("{}: {} is empty, nothing written", self.action, self.input),
        }
    }
}

/// Print a summary in the requested mode.
pub fn print_summary(summary: &Summary, mode: ReportMode) -> Result<(), serde_json::Error> {
    match mode {
        ReportMode::Quiet => {}
        ReportMode::Human => println!("{}", summary.to_line()),
        ReportMode::Json => println!("{}", serde_json::to_string(summary)?),
    }
    Ok(())
}
