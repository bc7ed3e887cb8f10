//! Config-loading port for `options` files.

use std::path::Path;

use serde_json::{Map, Value};

use super::filesystem::FileSystem;

/// Resolves and loads a config fragment given its extension-less base path.
///
/// `base` is e.g. `<suite>/options`; the loader decides which concrete
/// files (`options.json`, `options.yaml`, ...) are candidates.
pub trait ConfigLoader: Send + Sync {
    /// Loads the config at `base`, or `Ok(None)` when no candidate file exists.
    ///
    /// # Errors
    ///
    /// Returns an error when a candidate exists but cannot be read or parsed.
    fn load(
        &self,
        fs: &dyn FileSystem,
        base: &Path,
    ) -> Result<Option<Map<String, Value>>, Box<dyn std::error::Error + Send + Sync>>;
}
