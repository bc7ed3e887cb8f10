//! Replaying adapter for the `FileSystem` port.

use std::path::Path;

use crate::cassette::format::FsMethod;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
///
/// A call that was never recorded behaves like a path that does not exist:
/// boolean queries answer `false` and fallible reads return an error.
pub struct ReplayingFileSystem {
    replayer: CassetteReplayer,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer }
    }

    fn replay_result<T: serde::de::DeserializeOwned>(
        &self,
        method: FsMethod,
        path: &Path,
    ) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        let key = path.display().to_string();
        let Some(output) = self.replayer.lookup(method, &key) else {
            return Err(format!("fs::{}: no interaction recorded for {key}", method.as_str()).into());
        };
        extract_result(output, method)
    }

    fn replay_bool(&self, method: FsMethod, path: &Path) -> bool {
        self.replayer
            .lookup(method, &path.display().to_string())
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
fn extract_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    method: FsMethod,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("fs::{}: failed to deserialize: {e}", method.as_str()).into())
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.replay_result(FsMethod::ReadToString, path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.replay_bool(FsMethod::Exists, path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.replay_bool(FsMethod::IsDir, path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        self.replay_result(FsMethod::ListDir, path)
    }
}
