//! Structured-data config loader.
//!
//! Resolves `<base>.json`, then `<base>.yaml`, then `<base>.yml`; the first
//! existing file is parsed. Executable config modules are not supported.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::ports::config::ConfigLoader;
use crate::ports::filesystem::FileSystem;

/// Extensions tried, in order, when resolving a config base path.
pub const CONFIG_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Loads `options` fragments from JSON or YAML files through the `FileSystem` port.
pub struct StructuredConfigLoader;

impl StructuredConfigLoader {
    /// Returns the first existing config file for `base`, if any.
    #[must_use]
    pub fn resolve(fs: &dyn FileSystem, base: &Path) -> Option<PathBuf> {
        CONFIG_EXTENSIONS.iter().map(|ext| with_suffix(base, ext)).find(|candidate| {
            fs.exists(candidate) && !fs.is_dir(candidate)
        })
    }
}

fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

impl ConfigLoader for StructuredConfigLoader {
    fn load(
        &self,
        fs: &dyn FileSystem,
        base: &Path,
    ) -> Result<Option<Map<String, Value>>, Box<dyn std::error::Error + Send + Sync>> {
        let Some(path) = Self::resolve(fs, base) else {
            return Ok(None);
        };
        let content = fs.read_to_string(&path)?;
        let value: Value = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        match value {
            Value::Object(map) => Ok(Some(map)),
            // An empty YAML document parses as null.
            Value::Null => Ok(Some(Map::new())),
            other => Err(format!("{}: expected a mapping, found {other}", path.display()).into()),
        }
    }
}
