//! `fixtree presets` command.

use std::io::Write;

use crate::fixtures::preset;

/// Execute the `presets` command.
///
/// # Errors
///
/// Returns an error string if the output cannot be written.
pub fn run(out: &mut impl Write) -> Result<(), String> {
    for preset in preset::all() {
        writeln!(out, "{:<10} {}", preset.name, preset.description)
            .map_err(|e| format!("Failed to write output: {e}"))?;
    }
    Ok(())
}
