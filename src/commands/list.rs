//! `fixtree list` command.

use std::io::Write;

use crate::cli::SourceArgs;
use crate::context::ServiceContext;
use crate::fixtures;

/// Execute the `list` command: one `<group>/<suite>/<task>` line per task.
///
/// # Errors
///
/// Returns an error string if the tree cannot be built or written.
pub fn run_with_context(
    ctx: &ServiceContext,
    source: &SourceArgs,
    out: &mut impl Write,
) -> Result<(), String> {
    let options = super::resolve_options(ctx, source)?;
    let tree = fixtures::build(ctx, &source.root, &options).map_err(|e| e.to_string())?;

    for (group, suites) in &tree {
        for suite in suites {
            for task in &suite.tests {
                let marker = if task.disabled { " [disabled]" } else { "" };
                writeln!(out, "{group}/{}/{}{marker}", suite.title, task.title)
                    .map_err(|e| format!("Failed to write output: {e}"))?;
            }
        }
    }
    Ok(())
}
