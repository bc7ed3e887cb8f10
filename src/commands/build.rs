//! `fixtree build` command.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{Format, SourceArgs};
use crate::context::ServiceContext;
use crate::fixtures::{self, FixtureTree};

/// Execute the `build` command against `ctx`, writing the tree to `out`.
///
/// # Errors
///
/// Returns an error string if options cannot be resolved, the tree cannot be
/// built, or the output cannot be written.
pub fn run_with_context(
    ctx: &ServiceContext,
    source: &SourceArgs,
    format: Format,
    absolute: bool,
    out: &mut impl Write,
) -> Result<(), String> {
    let options = super::resolve_options(ctx, source)?;
    let mut tree = fixtures::build(ctx, &source.root, &options).map_err(|e| e.to_string())?;
    if !absolute {
        relativize(&mut tree, &source.root);
    }

    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(&tree).map_err(|e| e.to_string())? + "\n",
        Format::Yaml => serde_yaml::to_string(&tree).map_err(|e| e.to_string())?,
    };
    out.write_all(rendered.as_bytes()).map_err(|e| format!("Failed to write output: {e}"))
}

/// Rewrites every path in `tree` relative to `root`.
pub fn relativize(tree: &mut FixtureTree, root: &Path) {
    let strip = |path: &mut PathBuf| {
        if let Ok(relative) = path.strip_prefix(root) {
            *path = relative.to_path_buf();
        }
    };
    for suite in tree.values_mut().flatten() {
        strip(&mut suite.filename);
        for task in &mut suite.tests {
            strip(&mut task.filename);
            for fixture in task.fixtures.values_mut() {
                strip(&mut fixture.loc);
            }
        }
    }
}
