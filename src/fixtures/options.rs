//! Per-call build options.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::error::FixtureError;
use super::model::{Suite, Task};
use super::spec::FixtureSpec;

/// Default base name of `options` config files.
pub const DEFAULT_OPTIONS_BASENAME: &str = "options";

/// Task fields that fixture and data keys may not use.
pub const RESERVED_TASK_FIELDS: [&str; 4] = ["title", "disabled", "options", "filename"];

/// Predicate over a directory entry name.
pub type NamePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Predicate over a task name and its location.
pub type TaskPredicate = Arc<dyn Fn(&str, &Path) -> bool + Send + Sync>;

/// Computes options derived from a suite and an in-progress task.
pub type DeriveOptions = Arc<dyn Fn(&Suite, &Task) -> Map<String, Value> + Send + Sync>;

/// Everything that controls how a fixture tree is walked and resolved.
#[derive(Clone)]
pub struct BuildOptions {
    /// Base name of config files (`<basename>.json` and friends).
    pub options_basename: String,
    /// Entry filter for suites and tasks; `None` uses [`default_ignore`].
    pub ignore: Option<NamePredicate>,
    /// Drops a task entirely when it returns `true`.
    pub skip: Option<TaskPredicate>,
    /// Overrides the disabled marker; `None` means "name starts with `.`".
    pub disabled: Option<TaskPredicate>,
    /// Fixture keys to resolve, in declaration order.
    pub fixtures: Vec<FixtureSpec>,
    /// JSON sidecars as `(key, file name)` pairs.
    pub data: Vec<(String, String)>,
    /// Source of derived task options, lowest merge precedence.
    pub derive_task_options: Option<DeriveOptions>,
    /// Trim trailing whitespace from fixture content.
    pub trim: bool,
    /// Convert CRLF line endings to LF in fixture content.
    pub normalize_line_endings: bool,
    /// Content used when a fixture file is missing.
    pub default_code: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            options_basename: DEFAULT_OPTIONS_BASENAME.to_string(),
            ignore: None,
            skip: None,
            disabled: None,
            fixtures: Vec::new(),
            data: Vec::new(),
            derive_task_options: None,
            trim: false,
            normalize_line_endings: false,
            default_code: None,
        }
    }
}

impl fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("options_basename", &self.options_basename)
            .field("ignore", &self.ignore.as_ref().map(|_| ".."))
            .field("skip", &self.skip.as_ref().map(|_| ".."))
            .field("disabled", &self.disabled.as_ref().map(|_| ".."))
            .field("fixtures", &self.fixtures)
            .field("data", &self.data)
            .field("derive_task_options", &self.derive_task_options.as_ref().map(|_| ".."))
            .field("trim", &self.trim)
            .field("normalize_line_endings", &self.normalize_line_endings)
            .field("default_code", &self.default_code)
            .finish()
    }
}

impl BuildOptions {
    /// Returns `true` if a suite or task entry should not be visited.
    #[must_use]
    pub fn should_ignore(&self, name: &str) -> bool {
        match &self.ignore {
            Some(ignore) => ignore(name),
            None => default_ignore(name, &self.options_basename),
        }
    }

    /// Returns `true` if a task is excluded before fixture resolution.
    #[must_use]
    pub fn should_skip(&self, name: &str, path: &Path) -> bool {
        self.skip.as_ref().is_some_and(|skip| skip(name, path))
    }

    /// Returns `true` if a task is kept but marked disabled.
    #[must_use]
    pub fn is_disabled(&self, name: &str, path: &Path) -> bool {
        match &self.disabled {
            Some(disabled) => disabled(name, path),
            None => name.starts_with('.'),
        }
    }

    /// Checks that fixture and data keys are unique and leave the fixed task
    /// fields alone, since both are flattened into the task record.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ReservedKey`] or [`FixtureError::DuplicateKey`].
    pub fn validate(&self) -> Result<(), FixtureError> {
        let keys = self.fixtures.iter().map(|f| f.key.as_str());
        let keys = keys.chain(self.data.iter().map(|(key, _)| key.as_str()));
        let mut seen = BTreeSet::new();
        for key in keys {
            if RESERVED_TASK_FIELDS.contains(&key) {
                return Err(FixtureError::ReservedKey(key.to_string()));
            }
            if !seen.insert(key) {
                return Err(FixtureError::DuplicateKey(key.to_string()));
            }
        }
        Ok(())
    }

    /// Skips tasks whose name contains `marker`.
    #[must_use]
    pub fn skip_names_containing(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        let skip: TaskPredicate =
            Arc::new(move |name: &str, _: &Path| name.contains(marker.as_str()));
        self.skip = Some(skip);
        self
    }

    /// Installs a derived-options function.
    #[must_use]
    pub fn derive_with(
        mut self,
        derive: impl Fn(&Suite, &Task) -> Map<String, Value> + Send + Sync + 'static,
    ) -> Self {
        let derive: DeriveOptions = Arc::new(derive);
        self.derive_task_options = Some(derive);
        self
    }
}

/// Default entry filter: dotfiles, Markdown files, `LICENSE`, and the
/// config files themselves.
#[must_use]
pub fn default_ignore(name: &str, options_basename: &str) -> bool {
    if name.starts_with('.') {
        return true;
    }
    let path = Path::new(name);
    if path.extension().is_some_and(|ext| ext == "md") {
        return true;
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    stem == "LICENSE" || stem == options_basename
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ignore_rules() {
        assert!(default_ignore(".git", "options"));
        assert!(default_ignore("README.md", "options"));
        assert!(default_ignore("LICENSE", "options"));
        assert!(default_ignore("LICENSE.txt", "options"));
        assert!(default_ignore("options.json", "options"));
        assert!(default_ignore("settings.yaml", "settings"));
        assert!(!default_ignore("options.json", "settings"));
        assert!(!default_ignore("arrow-functions", "options"));
        assert!(!default_ignore("task.js", "options"));
    }

    #[test]
    fn custom_ignore_replaces_default() {
        let options = BuildOptions {
            ignore: Some(Arc::new(|name: &str| name.starts_with("wip"))),
            ..BuildOptions::default()
        };
        assert!(options.should_ignore("wip-task"));
        assert!(!options.should_ignore("README.md"));
    }

    #[test]
    fn skip_and_disabled_defaults() {
        let options = BuildOptions::default();
        assert!(!options.should_skip("Error_thing", Path::new("/x")));
        assert!(options.is_disabled(".pending", Path::new("/x")));
        assert!(!options.is_disabled("pending", Path::new("/x")));

        let options = options.skip_names_containing("Error_");
        assert!(options.should_skip("Error_thing", Path::new("/x")));
        assert!(!options.should_skip("thing", Path::new("/x")));
    }

    #[test]
    fn validate_rejects_colliding_keys() {
        let options = BuildOptions {
            fixtures: vec![FixtureSpec::new("options", ["options.js"])],
            ..BuildOptions::default()
        };
        assert!(matches!(options.validate(), Err(FixtureError::ReservedKey(k)) if k == "options"));

        let options = BuildOptions {
            fixtures: vec![FixtureSpec::new("actual", ["actual.js"])],
            data: vec![("actual".into(), "actual.json".into())],
            ..BuildOptions::default()
        };
        assert!(matches!(options.validate(), Err(FixtureError::DuplicateKey(k)) if k == "actual"));

        let options = BuildOptions {
            data: vec![("title".into(), "title.json".into())],
            ..BuildOptions::default()
        };
        assert!(matches!(options.validate(), Err(FixtureError::ReservedKey(_))));
    }

    #[test]
    fn validate_accepts_presets() {
        assert!(crate::fixtures::preset::lookup("babel").unwrap().validate().is_ok());
        assert!(BuildOptions::default().validate().is_ok());
    }

    #[test]
    fn debug_elides_functions() {
        let options = BuildOptions::default().skip_names_containing("x");
        let rendered = format!("{options:?}");
        assert!(rendered.contains("skip: Some(\"..\")"));
    }
}
