//! Tree walk: groups → suites → tasks.
//!
//! Layout on disk:
//!
//! ```text
//! <root>/
//!   └── <group>/
//!         ├── options.json          (group options, optional)
//!         └── <suite>/
//!               ├── options.json    (replaces group options, optional)
//!               └── <task>/         (or a single <task>.js file)
//!                     ├── options.json
//!                     └── <fixture files>
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::data;
use super::error::FixtureError;
use super::merge;
use super::model::{humanize, FixtureTree, Suite, Task};
use super::options::BuildOptions;
use super::resolver::{self, Resolution, TaskLocation};
use crate::context::ServiceContext;

/// Builds the fixture tree rooted at `root`.
///
/// Dot-prefixed and non-directory entries of `root` are skipped; every
/// other entry is a group.
///
/// # Errors
///
/// Returns an error if a fixture or data key collides with a task field or
/// another key, if a required directory cannot be listed, or if a config or
/// sidecar file exists but is malformed. No partial tree is returned.
pub fn build(
    ctx: &ServiceContext,
    root: &Path,
    options: &BuildOptions,
) -> Result<FixtureTree, FixtureError> {
    options.validate()?;
    let walker = Walker { ctx, options };
    let mut tree = BTreeMap::new();
    for name in walker.list(root)? {
        if name.starts_with('.') {
            continue;
        }
        let path = root.join(&name);
        if !ctx.fs.is_dir(&path) {
            continue;
        }
        let suites = walker.build_group(&path)?;
        tree.insert(name, suites);
    }
    let tasks: usize = tree.values().flatten().map(|suite| suite.tests.len()).sum();
    info!(root = %root.display(), groups = tree.len(), tasks, "built fixture tree");
    Ok(tree)
}

/// Builds the suites of a single group directory.
///
/// # Errors
///
/// Same conditions as [`build`].
pub fn build_group(
    ctx: &ServiceContext,
    group: &Path,
    options: &BuildOptions,
) -> Result<Vec<Suite>, FixtureError> {
    options.validate()?;
    Walker { ctx, options }.build_group(group)
}

struct Walker<'a> {
    ctx: &'a ServiceContext,
    options: &'a BuildOptions,
}

impl Walker<'_> {
    fn build_group(&self, group: &Path) -> Result<Vec<Suite>, FixtureError> {
        let root_options = self.load_config(group)?.unwrap_or_default();
        let mut suites = Vec::new();
        for name in self.list(group)? {
            if self.options.should_ignore(&name) {
                continue;
            }
            suites.push(self.build_suite(group, &name, &root_options)?);
        }
        Ok(suites)
    }

    fn build_suite(
        &self,
        group: &Path,
        name: &str,
        root_options: &Map<String, Value>,
    ) -> Result<Suite, FixtureError> {
        let path = group.join(name);
        // Suite-local options replace the group's; they are not merged.
        let options = match self.load_config(&path)? {
            Some(suite_options) => suite_options,
            None => root_options.clone(),
        };
        let mut suite =
            Suite { title: humanize(name, false), options, tests: Vec::new(), filename: path };

        if !self.ctx.fs.is_dir(&suite.filename) {
            let task = TaskLocation {
                name: name.to_string(),
                path: suite.filename.clone(),
                alias: name.to_string(),
                is_file: true,
            };
            if let Some(task) = self.build_task(&suite, &task)? {
                suite.tests.push(task);
            }
            return Ok(suite);
        }

        for task_name in self.list(&suite.filename)? {
            let task_path = suite.filename.join(&task_name);
            let is_dir = self.ctx.fs.is_dir(&task_path);
            // Under the default filter, dot-prefixed task directories are
            // kept (and disabled by default). A custom filter decides alone.
            let hidden_dir =
                self.options.ignore.is_none() && is_dir && task_name.starts_with('.');
            if !hidden_dir && self.options.should_ignore(&task_name) {
                continue;
            }
            let task = TaskLocation {
                alias: format!("{name}/{task_name}"),
                name: task_name,
                path: task_path,
                is_file: !is_dir,
            };
            if let Some(task) = self.build_task(&suite, &task)? {
                suite.tests.push(task);
            }
        }
        Ok(suite)
    }

    fn build_task(&self, suite: &Suite, location: &TaskLocation) -> Result<Option<Task>, FixtureError> {
        if self.options.should_skip(&location.name, &location.path) {
            debug!(task = %location.alias, "skipped by name");
            return Ok(None);
        }

        let fixtures = match resolver::resolve(self.ctx.fs.as_ref(), location, self.options) {
            Resolution::Resolved(fixtures) => fixtures,
            Resolution::Skip(reason) => {
                debug!(task = %location.alias, ?reason, "skipped during resolution");
                return Ok(None);
            }
        };

        let mut task = Task {
            title: humanize(&location.name, true),
            disabled: self.options.is_disabled(&location.name, &location.path),
            options: Map::new(),
            filename: location.path.clone(),
            fixtures,
            data: BTreeMap::new(),
        };

        let derived = self
            .options
            .derive_task_options
            .as_ref()
            .map_or_else(Map::new, |derive| derive(suite, &task));
        let task_config = self.load_config(&location.path)?;
        task.options = merge::task_options(derived, &suite.options, task_config);
        task.data = data::load_sidecars(self.ctx.fs.as_ref(), &location.path, &self.options.data)?;

        Ok(Some(task))
    }

    fn list(&self, dir: &Path) -> Result<Vec<String>, FixtureError> {
        self.ctx
            .fs
            .list_dir(dir)
            .map_err(|e| FixtureError::Io { path: dir.to_path_buf(), message: e.to_string() })
    }

    fn load_config(&self, dir: &Path) -> Result<Option<Map<String, Value>>, FixtureError> {
        let base = dir.join(&self.options.options_basename);
        self.ctx
            .config
            .load(self.ctx.fs.as_ref(), &base)
            .map_err(|e| FixtureError::Config { path: base, message: e.to_string() })
    }
}
