//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
///
/// Directory listings are sorted by name so that repeated builds of an
/// unchanged tree produce identical output on every platform. A listing
/// fails on an entry whose name is not valid UTF-8.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let name = entry?.file_name().into_string().map_err(|name| {
                format!("Entry name is not valid UTF-8: {}", path.join(name).display())
            })?;
            entries.push(name);
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_sorted_and_reports_kinds() {
        let dir = std::env::temp_dir().join("fixtree_live_fs_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("b-dir")).unwrap();
        std::fs::write(dir.join("c.js"), "c").unwrap();
        std::fs::write(dir.join("a.js"), "a").unwrap();

        let fs = LiveFileSystem;
        assert_eq!(fs.list_dir(&dir).unwrap(), vec!["a.js", "b-dir", "c.js"]);
        assert!(fs.is_dir(&dir.join("b-dir")));
        assert!(!fs.is_dir(&dir.join("a.js")));
        assert!(fs.exists(&dir.join("a.js")));
        assert_eq!(fs.read_to_string(&dir.join("c.js")).unwrap(), "c");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn listing_fails_on_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = std::env::temp_dir().join("fixtree_live_fs_non_utf8");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("ok.js"), "").unwrap();
        std::fs::write(dir.join(OsStr::from_bytes(b"bad-\xff.js")), "").unwrap();

        let err = LiveFileSystem.list_dir(&dir).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn listing_missing_directory_fails() {
        let fs = LiveFileSystem;
        assert!(fs.list_dir(Path::new("/definitely/not/a/fixture/root")).is_err());
    }
}
