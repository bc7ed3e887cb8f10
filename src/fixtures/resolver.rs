//! Fixture resolution for a single task.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::model::Fixture;
use super::options::BuildOptions;
use super::spec::FixtureSpec;
use crate::ports::filesystem::FileSystem;

/// Where a task lives and how its fixtures are aliased.
#[derive(Debug, Clone)]
pub struct TaskLocation {
    /// Entry name of the task (file or directory name).
    pub name: String,
    /// Task directory, or the task file itself.
    pub path: PathBuf,
    /// Relative alias of `path`, e.g. `<suite>/<task>`.
    pub alias: String,
    /// `true` when the task is a single file rather than a directory.
    pub is_file: bool,
}

/// Why a task was dropped during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The task is a file whose extension the fixture does not accept.
    UnsupportedTaskFile {
        /// Fixture key that rejected the file.
        key: String,
    },
    /// The fixture's content matched its skip rule.
    ContentMatched {
        /// Fixture key whose content matched.
        key: String,
    },
}

/// Outcome of resolving every fixture of a task.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// All fixtures resolved, keyed by fixture key.
    Resolved(BTreeMap<String, Fixture>),
    /// The task must not appear in its suite.
    Skip(SkipReason),
}

/// Resolves every fixture spec for `task`, in declaration order.
///
/// Stops at the first spec that vetoes the task.
#[must_use]
pub fn resolve(fs: &dyn FileSystem, task: &TaskLocation, options: &BuildOptions) -> Resolution {
    let mut fixtures = BTreeMap::new();
    for spec in &options.fixtures {
        match resolve_one(fs, task, spec, options) {
            Ok(fixture) => {
                fixtures.insert(spec.key.clone(), fixture);
            }
            Err(reason) => return Resolution::Skip(reason),
        }
    }
    Resolution::Resolved(fixtures)
}

fn resolve_one(
    fs: &dyn FileSystem,
    task: &TaskLocation,
    spec: &FixtureSpec,
    options: &BuildOptions,
) -> Result<Fixture, SkipReason> {
    let mut chosen = spec.default_candidate();
    for candidate in spec.candidates.iter().skip(1) {
        if fs.exists(&task.path.join(candidate)) {
            chosen = candidate.as_str();
        }
    }

    let (loc, filename) = match &spec.task_file {
        Some(rule) if task.is_file => {
            if !rule.accepts(&task.name) {
                return Err(SkipReason::UnsupportedTaskFile { key: spec.key.clone() });
            }
            (task.path.clone(), task.alias.clone())
        }
        _ => (task.path.join(chosen), join_alias(&task.alias, chosen)),
    };
    debug!(key = %spec.key, loc = %loc.display(), "resolved fixture");

    let code = read_code(fs, &loc, options);
    if let Some(rule) = &spec.skip_when {
        if rule.matches(code.as_deref().unwrap_or("")) {
            return Err(SkipReason::ContentMatched { key: spec.key.clone() });
        }
    }

    Ok(Fixture { loc, filename, code })
}

fn join_alias(prefix: &str, candidate: &str) -> String {
    match (prefix.is_empty(), candidate.is_empty()) {
        (true, _) => candidate.to_string(),
        (_, true) => prefix.to_string(),
        _ => format!("{prefix}/{candidate}"),
    }
}

/// Reads fixture content, falling back to the configured default.
fn read_code(fs: &dyn FileSystem, loc: &Path, options: &BuildOptions) -> Option<String> {
    let mut code = fs.read_to_string(loc).ok().or_else(|| options.default_code.clone())?;
    if options.trim {
        code.truncate(code.trim_end().len());
    }
    if options.normalize_line_endings {
        code = code.replace("\r\n", "\n");
    }
    Some(code)
}
