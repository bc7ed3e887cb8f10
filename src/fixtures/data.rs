//! JSON sidecar loading.
//!
//! A sidecar that does not exist is omitted from the task. One that exists
//! but is empty (or unreadable) becomes `{}`. Anything else must be valid
//! JSON, so whitespace-only content is fatal like any other malformed file.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};

use super::error::FixtureError;
use crate::ports::filesystem::FileSystem;

/// Loads the configured `(key, file name)` sidecars found under `task_path`.
///
/// # Errors
///
/// Returns [`FixtureError::Sidecar`] when a sidecar is not valid JSON.
pub fn load_sidecars(
    fs: &dyn FileSystem,
    task_path: &Path,
    sidecars: &[(String, String)],
) -> Result<BTreeMap<String, Value>, FixtureError> {
    let mut data = BTreeMap::new();
    for (key, filename) in sidecars {
        let loc = task_path.join(filename);
        if !fs.exists(&loc) {
            continue;
        }
        let content = fs.read_to_string(&loc).unwrap_or_default();
        let value = if content.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(&content)
                .map_err(|source| FixtureError::Sidecar { path: loc.clone(), source })?
        };
        data.insert(key.clone(), value);
    }
    Ok(data)
}
