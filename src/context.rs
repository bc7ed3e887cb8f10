//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveFileSystem, StructuredConfigLoader};
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::config::ConfigLoader;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, in-memory,
/// replaying, recording).
pub struct ServiceContext {
    /// Filesystem the fixture tree is read from.
    pub fs: Box<dyn FileSystem>,
    /// Loader for `options` config fragments.
    pub config: Box<dyn ConfigLoader>,
}

impl ServiceContext {
    /// Creates a live context reading from the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self::with_fs(Box::new(LiveFileSystem))
    }

    /// Creates a context over the given filesystem with the default config loader.
    #[must_use]
    pub fn with_fs(fs: Box<dyn FileSystem>) -> Self {
        Self { fs, config: Box::new(StructuredConfigLoader) }
    }

    /// Creates a recording context that captures every filesystem call.
    ///
    /// Uses the live filesystem for actual reads. The returned session must be
    /// finished after the context has been dropped to write the cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette already exists at `output`.
    pub fn recording(output: &Path, root: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(output, root)?;
        let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.recorder));
        Ok((Self::with_fs(Box::new(fs)), session))
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let replayer = CassetteReplayer::from_file(path)?;
        Ok(Self::with_fs(Box::new(ReplayingFileSystem::new(replayer))))
    }
}
