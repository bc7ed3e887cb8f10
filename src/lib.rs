//! Core library entry for the `fixtree` CLI.
//!
//! The [`fixtures`] module walks a `<root>/<group>/<suite>/<task>` tree of
//! test fixtures through the [`ports`] defined here, so the same build can run
//! against the disk, an in-memory tree, or a recorded [`cassette`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod context;
pub mod fixtures;
pub mod ports;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_executes_presets() {
        let result = run(["fixtree", "presets"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["fixtree", "unknown"]);
        assert!(result.is_err());
    }
}
