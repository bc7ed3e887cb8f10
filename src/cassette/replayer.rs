//! Serves recorded interactions back by method and path.

use std::collections::HashMap;

use super::format::{Cassette, FsMethod};

/// Replays interactions from a loaded cassette.
///
/// Lookups are keyed by `(method, path)` rather than by call order, so a
/// build that visits the tree in a different order still replays. When the
/// same call was recorded more than once, the first output is served.
#[derive(Debug)]
pub struct CassetteReplayer {
    outputs: HashMap<(FsMethod, String), serde_json::Value>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut outputs = HashMap::new();
        for interaction in &cassette.interactions {
            outputs
                .entry((interaction.method, interaction.path.clone()))
                .or_insert_with(|| interaction.output.clone());
        }
        Self { outputs }
    }

    /// Loads a cassette YAML file and builds a replayer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Returns the recorded output for a call, if one was captured.
    #[must_use]
    pub fn lookup(&self, method: FsMethod, path: &str) -> Option<&serde_json::Value> {
        self.outputs.get(&(method, path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            root: "/fixtures".into(),
            interactions,
        }
    }

    #[test]
    fn lookup_ignores_call_order() {
        let cassette = make_cassette(vec![
            Interaction {
                seq: 0,
                method: FsMethod::Exists,
                path: "/a".into(),
                output: json!(true),
            },
            Interaction {
                seq: 1,
                method: FsMethod::Exists,
                path: "/b".into(),
                output: json!(false),
            },
        ]);

        let replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.lookup(FsMethod::Exists, "/b"), Some(&json!(false)));
        assert_eq!(replayer.lookup(FsMethod::Exists, "/a"), Some(&json!(true)));
        assert_eq!(replayer.lookup(FsMethod::Exists, "/a"), Some(&json!(true)));
    }

    #[test]
    fn same_path_different_methods_are_distinct() {
        let cassette = make_cassette(vec![
            Interaction {
                seq: 0,
                method: FsMethod::Exists,
                path: "/a".into(),
                output: json!(true),
            },
            Interaction {
                seq: 1,
                method: FsMethod::IsDir,
                path: "/a".into(),
                output: json!(false),
            },
        ]);

        let replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.lookup(FsMethod::IsDir, "/a"), Some(&json!(false)));
        assert!(replayer.lookup(FsMethod::ListDir, "/a").is_none());
    }

    #[test]
    fn first_recording_wins_for_repeated_calls() {
        let cassette = make_cassette(vec![
            Interaction {
                seq: 0,
                method: FsMethod::ReadToString,
                path: "/a".into(),
                output: json!({"ok": "first"}),
            },
            Interaction {
                seq: 1,
                method: FsMethod::ReadToString,
                path: "/a".into(),
                output: json!({"ok": "second"}),
            },
        ]);

        let replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.lookup(FsMethod::ReadToString, "/a"), Some(&json!({"ok": "first"})));
    }
}
