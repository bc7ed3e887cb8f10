//! Fatal errors raised while building a fixture tree.

use std::path::PathBuf;

use thiserror::Error;

/// A failure that aborts the whole build.
///
/// Absent optional files and policy skips are not errors and never surface here.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A directory that must exist could not be listed.
    #[error("failed to list {}: {message}", path.display())]
    Io {
        /// Directory that was being listed.
        path: PathBuf,
        /// Underlying port error.
        message: String,
    },
    /// An `options` file exists but could not be read or parsed.
    #[error("invalid options file {}: {message}", path.display())]
    Config {
        /// Extension-less base path the loader resolved from.
        path: PathBuf,
        /// Underlying loader error.
        message: String,
    },
    /// A data sidecar exists but is not valid JSON.
    #[error("invalid data file {}: {source}", path.display())]
    Sidecar {
        /// Sidecar location.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// No preset is registered under the requested name.
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    /// A fixture or data key would overwrite a fixed task field.
    #[error("key `{0}` is reserved for a task field")]
    ReservedKey(String),
    /// Two fixture or data keys share a name.
    #[error("key `{0}` is declared more than once")]
    DuplicateKey(String),
    /// A build settings file could not be read or parsed.
    #[error("invalid settings file {}: {message}", path.display())]
    Settings {
        /// Settings file location.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },
}
