//! Command dispatch and handlers.

pub mod build;
pub mod list;
pub mod presets;

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::{Command, SourceArgs};
use crate::context::ServiceContext;
use crate::fixtures::{BuildOptions, BuildSettings};

/// Environment variable naming the cassette file to record into.
pub const RECORD_ENV: &str = "FIXTREE_RECORD";

/// Dispatch a parsed command to its handler.
///
/// `--replay` reads the tree from a cassette. Otherwise, when
/// `FIXTREE_RECORD` is set to a file path, every filesystem interaction is
/// recorded to that cassette.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let Some(source) = source_of(command) else {
        return dispatch_with_context(command, &ServiceContext::live());
    };

    let (ctx, session) = if let Some(cassette) = &source.replay {
        (ServiceContext::replaying(cassette)?, None)
    } else if let Ok(path) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording(Path::new(&path), &source.root)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(command, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context, writing to stdout.
///
/// # Errors
///
/// Returns an error string if the handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    let mut out = io::stdout().lock();
    match command {
        Command::Build { source, format, absolute } => {
            build::run_with_context(ctx, source, *format, *absolute, &mut out)
        }
        Command::List { source } => list::run_with_context(ctx, source, &mut out),
        Command::Presets => presets::run(&mut out),
    }
}

/// Resolves the effective build options for `source`.
///
/// The settings file (read through the context so it is recorded and
/// replayed with the tree) is layered under the command-line flags.
///
/// # Errors
///
/// Returns an error string if the settings file is malformed or names an
/// unknown preset.
pub fn resolve_options(ctx: &ServiceContext, source: &SourceArgs) -> Result<BuildOptions, String> {
    let mut settings = match &source.settings {
        Some(path) => BuildSettings::load(ctx.fs.as_ref(), path).map_err(|e| e.to_string())?,
        None => BuildSettings::default(),
    };
    settings.overlay(source.overrides());
    settings.resolve().map_err(|e| e.to_string())
}

fn source_of(command: &Command) -> Option<&SourceArgs> {
    match command {
        Command::Build { source, .. } | Command::List { source } => Some(source),
        Command::Presets => None,
    }
}

/// Finish a recording session and print the cassette path.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output: PathBuf = session.finish()?;
    eprintln!("Recording saved to: {}", output.display());
    Ok(())
}
