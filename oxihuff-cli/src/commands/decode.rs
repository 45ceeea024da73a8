//! Decode command implementation.

use crate::utils::{ReportMode, Summary, print_summary};
use oxihuff::decode_file;
use std::path::Path;
use tracing::info;

/// Decode the container at `input` into `output`.
pub fn cmd_decode(
    input: &Path,
    output: &Path,
    mode: ReportMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = decode_file(input, output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = stats.output_bytes,
        "decode finished"
    );

    let mut summary = Summary::new("decode", input, Some(output));
    summary.input_bytes = stats.input_bytes;
    summary.output_bytes = stats.output_bytes;
    print_summary(&summary, mode)?;
    Ok(())
}
