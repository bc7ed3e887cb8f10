//! Output records: suites, tasks and their fixtures.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

/// Group name → suites, in listing order.
pub type FixtureTree = BTreeMap<String, Vec<Suite>>;

/// One resolved fixture file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fixture {
    /// Full path the content was read from.
    pub loc: PathBuf,
    /// `<suite>/<task>/<candidate>` alias, independent of where the tree lives.
    pub filename: String,
    /// File content, or the configured default when the file is missing.
    pub code: Option<String>,
}

/// One test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    /// Task name with the extension stripped and hyphens turned into spaces.
    pub title: String,
    /// Set for tasks marked disabled (by default, a leading `.`).
    pub disabled: bool,
    /// Final merged options.
    pub options: Map<String, Value>,
    /// Task directory, or the task file itself.
    pub filename: PathBuf,
    /// Resolved fixtures by key.
    #[serde(flatten)]
    pub fixtures: BTreeMap<String, Fixture>,
    /// Parsed JSON sidecars by key.
    #[serde(flatten)]
    pub data: BTreeMap<String, Value>,
}

impl Task {
    /// Returns the fixture registered under `key`.
    #[must_use]
    pub fn fixture(&self, key: &str) -> Option<&Fixture> {
        self.fixtures.get(key)
    }
}

/// A named group of tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suite {
    /// Directory name with hyphens turned into spaces.
    pub title: String,
    /// Suite options: the suite-local config, or the group's when absent.
    pub options: Map<String, Value>,
    /// Tasks that survived every skip rule.
    pub tests: Vec<Task>,
    /// Suite directory (or file, for single-task suites).
    pub filename: PathBuf,
}

/// Turns an entry name into a human-readable title.
pub(crate) fn humanize(name: &str, strip_extension: bool) -> String {
    let base = if strip_extension {
        Path::new(name).file_stem().and_then(|stem| stem.to_str()).unwrap_or(name)
    } else {
        name
    };
    base.replace('-', " ")
}
