//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{record_interaction, record_result};
use crate::cassette::format::FsMethod;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.read_to_string(path);
        record_result(&self.recorder, FsMethod::ReadToString, &path.display().to_string(), &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        record_interaction(&self.recorder, FsMethod::Exists, &path.display().to_string(), &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        record_interaction(&self.recorder, FsMethod::IsDir, &path.display().to_string(), &result);
        result
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.list_dir(path);
        record_result(&self.recorder, FsMethod::ListDir, &path.display().to_string(), &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use serde_json::json;

    #[test]
    fn records_each_method_with_its_path() {
        let dir = std::env::temp_dir().join("fixtree_rec_fs_test");
        std::fs::create_dir_all(&dir).unwrap();
        let cassette_path = dir.join("fs.cassette.yaml");

        let memory = MemoryFileSystem::new();
        memory.add_file("/fx/g/s/t/actual.js", "var a;");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "/fx")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let fs = RecordingFileSystem::new(Box::new(memory), Arc::clone(&recorder));
            assert!(fs.is_dir(Path::new("/fx/g")));
            assert!(!fs.exists(Path::new("/fx/g/s/t/expected.js")));
            assert_eq!(fs.read_to_string(Path::new("/fx/g/s/t/actual.js")).unwrap(), "var a;");
            assert!(fs.read_to_string(Path::new("/fx/missing")).is_err());
            assert_eq!(fs.list_dir(Path::new("/fx")).unwrap(), vec!["g"]);
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        assert_eq!(recorder.len(), 5);
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.interactions[0].method, FsMethod::IsDir);
        assert_eq!(cassette.interactions[0].output, json!(true));
        assert_eq!(cassette.interactions[2].output, json!({"ok": "var a;"}));
        assert!(cassette.interactions[3].output.get("err").is_some());
        assert_eq!(cassette.interactions[4].output, json!({"ok": ["g"]}));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
