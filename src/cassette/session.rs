//! Recording session owning the shared cassette recorder.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Owns the recorder shared with a `RecordingFileSystem` for one command.
///
/// The adapter holds a clone of `recorder`; the session writes the cassette
/// once the adapter (and its context) have been dropped.
pub struct RecordingSession {
    /// Recorder for filesystem interactions.
    pub recorder: Arc<Mutex<CassetteRecorder>>,
    output: PathBuf,
}

impl RecordingSession {
    /// Create a session that will write its cassette to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette already exists at `output`.
    pub fn new(output: &Path, root: &Path) -> Result<Self, String> {
        if output.exists() {
            return Err(format!("Cassette file already exists: {}", output.display()));
        }
        let name = format!("fixtree-{}", Utc::now().format("%Y-%m-%dT%H-%M-%S"));
        let recorder = CassetteRecorder::new(output, name, root.display().to_string());
        Ok(Self { recorder: Arc::new(Mutex::new(recorder)), output: output.to_path_buf() })
    }

    /// Path the cassette will be written to.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Finish the recorder and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording adapter is still alive or the
    /// cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording filesystem still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, FsMethod};
    use serde_json::json;

    #[test]
    fn session_writes_cassette_on_finish() {
        let dir = std::env::temp_dir().join("fixtree_session_test");
        let _ = std::fs::remove_dir_all(&dir);
        let output = dir.join("run.cassette.yaml");

        let session = RecordingSession::new(&output, Path::new("/fixtures")).unwrap();
        session.recorder.lock().unwrap().record(FsMethod::Exists, "/fixtures", json!(true));
        let written = session.finish().unwrap();
        assert_eq!(written, output);

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(cassette.root, "/fixtures");
        assert_eq!(cassette.interactions.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn session_refuses_to_overwrite() {
        let dir = std::env::temp_dir().join("fixtree_session_overwrite_test");
        std::fs::create_dir_all(&dir).unwrap();
        let output = dir.join("existing.cassette.yaml");
        std::fs::write(&output, "name: x").unwrap();

        let result = RecordingSession::new(&output, Path::new("/fixtures"));
        assert!(result.is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn finish_fails_while_adapter_holds_recorder() {
        let dir = std::env::temp_dir().join("fixtree_session_busy_test");
        let _ = std::fs::remove_dir_all(&dir);
        let output = dir.join("busy.cassette.yaml");

        let session = RecordingSession::new(&output, Path::new("/fixtures")).unwrap();
        let _held = Arc::clone(&session.recorder);
        assert!(session.finish().is_err());
    }
}
