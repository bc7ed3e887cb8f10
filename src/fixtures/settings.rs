//! Data-only build settings, loadable from JSON or YAML.
//!
//! Settings name a preset and override parts of it. Layers stack: the
//! preset supplies defaults, a settings file overrides them, and CLI flags
//! override both (see [`BuildSettings::overlay`]).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::FixtureError;
use super::options::{BuildOptions, TaskPredicate};
use super::preset;
use super::spec::{ContentRule, FixtureSpec, TaskFileRule};
use crate::ports::filesystem::FileSystem;

/// Overrides for one fixture key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FixtureSettings {
    /// Fixture key.
    pub key: String,
    /// Candidate file names; empty keeps the preset's.
    #[serde(default)]
    pub loc: Vec<String>,
    /// Suffixes accepted when the task is a single file; empty disables the rule.
    #[serde(default)]
    pub task_file: Option<Vec<String>>,
    /// Content markers that skip the task; empty disables the rule.
    #[serde(default)]
    pub skip_markers: Option<Vec<String>>,
}

/// Serializable subset of [`BuildOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildSettings {
    /// Preset to start from.
    pub preset: Option<String>,
    /// Base name of config files.
    #[serde(alias = "optionsPath")]
    pub options_basename: Option<String>,
    /// Trim trailing whitespace from fixture content.
    pub trim: Option<bool>,
    /// Convert CRLF to LF in fixture content.
    pub normalize_line_endings: Option<bool>,
    /// Content used when a fixture file is missing.
    pub default_code: Option<String>,
    /// Task-name markers that skip a task; empty disables name skipping.
    pub skip_containing: Option<Vec<String>>,
    /// Per-key fixture overrides, in declaration order.
    pub fixtures: Vec<FixtureSettings>,
    /// Sidecars as key → file name.
    pub data: BTreeMap<String, String>,
}

impl BuildSettings {
    /// Reads settings from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Settings`] if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, FixtureError> {
        let settings_error =
            |message: String| FixtureError::Settings { path: PathBuf::from(path), message };
        let content = fs.read_to_string(path).map_err(|e| settings_error(e.to_string()))?;
        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| settings_error(e.to_string()))
        } else {
            serde_yaml::from_str(&content).map_err(|e| settings_error(e.to_string()))
        }
    }

    /// Layers `other` on top of `self`: every field `other` sets wins.
    pub fn overlay(&mut self, other: BuildSettings) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.preset, other.preset);
        take(&mut self.options_basename, other.options_basename);
        take(&mut self.trim, other.trim);
        take(&mut self.normalize_line_endings, other.normalize_line_endings);
        take(&mut self.default_code, other.default_code);
        take(&mut self.skip_containing, other.skip_containing);
        for fixture in other.fixtures {
            match self.fixtures.iter_mut().find(|f| f.key == fixture.key) {
                Some(existing) => {
                    if !fixture.loc.is_empty() {
                        existing.loc = fixture.loc;
                    }
                    take(&mut existing.task_file, fixture.task_file);
                    take(&mut existing.skip_markers, fixture.skip_markers);
                }
                None => self.fixtures.push(fixture),
            }
        }
        self.data.extend(other.data);
    }

    /// Resolves the named preset (if any) and applies these settings to it.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownPreset`] for an unregistered preset.
    pub fn resolve(&self) -> Result<BuildOptions, FixtureError> {
        let mut options = match &self.preset {
            Some(name) => preset::lookup(name)?,
            None => BuildOptions::default(),
        };
        self.apply(&mut options);
        Ok(options)
    }

    /// Applies every field that is set onto `options`.
    pub fn apply(&self, options: &mut BuildOptions) {
        if let Some(basename) = &self.options_basename {
            options.options_basename.clone_from(basename);
        }
        if let Some(trim) = self.trim {
            options.trim = trim;
        }
        if let Some(normalize) = self.normalize_line_endings {
            options.normalize_line_endings = normalize;
        }
        if let Some(default_code) = &self.default_code {
            options.default_code = Some(default_code.clone());
        }
        if let Some(markers) = &self.skip_containing {
            options.skip = if markers.is_empty() {
                None
            } else {
                let markers = markers.clone();
                let skip: TaskPredicate = Arc::new(move |name: &str, _: &Path| {
                    markers.iter().any(|m| name.contains(m.as_str()))
                });
                Some(skip)
            };
        }
        for fixture in &self.fixtures {
            apply_fixture(options, fixture);
        }
        for (key, filename) in &self.data {
            match options.data.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1.clone_from(filename),
                None => options.data.push((key.clone(), filename.clone())),
            }
        }
    }
}

fn apply_fixture(options: &mut BuildOptions, settings: &FixtureSettings) {
    let index = match options.fixtures.iter().position(|f| f.key == settings.key) {
        Some(index) => index,
        None => {
            options.fixtures.push(FixtureSpec::new(settings.key.clone(), Vec::<String>::new()));
            options.fixtures.len() - 1
        }
    };
    let spec = &mut options.fixtures[index];
    if !settings.loc.is_empty() {
        spec.candidates.clone_from(&settings.loc);
    }
    if let Some(extensions) = &settings.task_file {
        spec.task_file = (!extensions.is_empty())
            .then(|| TaskFileRule { extensions: extensions.clone() });
    }
    if let Some(markers) = &settings.skip_markers {
        spec.skip_when =
            (!markers.is_empty()).then(|| ContentRule::contains_any(markers.iter().cloned()));
    }
}
