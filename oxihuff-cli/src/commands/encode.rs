//! Encode command implementation.

use crate::utils::{ReportMode, Summary, print_summary};
use oxihuff::{HuffmanConfig, encode_file};
use std::path::Path;
use tracing::info;

/// Encode `input` into a container at `output`.
pub fn cmd_encode(
    input: &Path,
    output: &Path,
    config: &HuffmanConfig,
    mode: ReportMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = match encode_file(input, output, config)? {
        Some(stats) => {
            info!(
                input = %input.display(),
                output = %output.display(),
                ratio = stats.ratio(),
                "encode finished"
            );
            let mut summary = Summary::new("encode", input, Some(output));
            summary.input_bytes = stats.input_bytes;
            summary.output_bytes = stats.output_bytes;
            summary.distinct_symbols = Some(stats.distinct_symbols);
            summary
        }
        None => Summary::new("encode", input, None),
    };

    print_summary(&summary, mode)?;
    Ok(())
}
