//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filesystem port method an interaction was captured from.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FsMethod {
    /// `FileSystem::read_to_string`.
    ReadToString,
    /// `FileSystem::exists`.
    Exists,
    /// `FileSystem::is_dir`.
    IsDir,
    /// `FileSystem::list_dir`.
    ListDir,
}

impl FsMethod {
    /// Name used in diagnostics, e.g. `fs::list_dir`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadToString => "read_to_string",
            Self::Exists => "exists",
            Self::IsDir => "is_dir",
            Self::ListDir => "list_dir",
        }
    }
}

/// A single recorded filesystem call.
///
/// Fallible methods store `{"ok": value}` or `{"err": "message"}` as output;
/// boolean methods store the bare boolean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port method invoked.
    pub method: FsMethod,
    /// Path argument, as displayed on the recording machine.
    pub path: String,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing the filesystem view of one fixture build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Fixture root the recording was made against.
    pub root: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn methods_serialize_as_snake_case() {
        let interaction = Interaction {
            seq: 3,
            method: FsMethod::ReadToString,
            path: "/fixtures/a/b/actual.js".into(),
            output: json!({"ok": "var a;"}),
        };
        let yaml = serde_yaml::to_string(&interaction).expect("serialize");
        assert!(yaml.contains("method: read_to_string"));
    }

    #[test]
    fn cassette_parses_from_yaml() {
        let yaml = r"
name: sample
recorded_at: 2025-03-15T14:30:00Z
root: /fixtures
interactions:
  - seq: 0
    method: list_dir
    path: /fixtures
    output:
      ok: [group1]
  - seq: 1
    method: is_dir
    path: /fixtures/group1
    output: true
";
        let cassette: Cassette = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(cassette.root, "/fixtures");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[1].method, FsMethod::IsDir);
        assert_eq!(cassette.interactions[1].output, json!(true));
    }
}
