//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::fixtures::BuildSettings;

/// Top-level CLI parser for `fixtree`.
#[derive(Debug, Parser)]
#[command(name = "fixtree", version, about = "Discover and print test-fixture trees")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the fixture tree and print it.
    Build {
        /// Where the tree comes from and how it is resolved.
        #[command(flatten)]
        source: SourceArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Keep absolute paths instead of rewriting them relative to the root.
        #[arg(long)]
        absolute: bool,
    },
    /// Print one line per task.
    List {
        /// Where the tree comes from and how it is resolved.
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List the registered presets.
    Presets,
}

/// Output format for `fixtree build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Arguments shared by commands that build a tree.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Fixture root containing group directories.
    pub root: PathBuf,
    /// Preset to start from.
    #[arg(long)]
    pub preset: Option<String>,
    /// JSON or YAML settings file layered over the preset.
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
    /// Base name of per-directory options files.
    #[arg(long, value_name = "NAME")]
    pub options_basename: Option<String>,
    /// Trim trailing whitespace from fixture content.
    #[arg(long)]
    pub trim: bool,
    /// Convert CRLF line endings to LF in fixture content.
    #[arg(long)]
    pub normalize_line_endings: bool,
    /// Content used for missing fixture files.
    #[arg(long, value_name = "TEXT")]
    pub default_code: Option<String>,
    /// Read the tree from a recorded cassette instead of the disk.
    #[arg(long, value_name = "CASSETTE")]
    pub replay: Option<PathBuf>,
}

impl SourceArgs {
    /// The settings expressed by command-line flags alone.
    #[must_use]
    pub fn overrides(&self) -> BuildSettings {
        BuildSettings {
            preset: self.preset.clone(),
            options_basename: self.options_basename.clone(),
            trim: self.trim.then_some(true),
            normalize_line_endings: self.normalize_line_endings.then_some(true),
            default_code: self.default_code.clone(),
            ..BuildSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, Format};
    use clap::Parser;

    #[test]
    fn parses_build_subcommand() {
        let cli = Cli::parse_from(["fixtree", "build", "fixtures", "--preset", "babel"]);
        let Command::Build { source, format, absolute } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(source.root.to_str(), Some("fixtures"));
        assert_eq!(source.preset.as_deref(), Some("babel"));
        assert_eq!(format, Format::Json);
        assert!(!absolute);
    }

    #[test]
    fn parses_yaml_format_and_flags() {
        let cli = Cli::parse_from([
            "fixtree",
            "build",
            "fx",
            "--format",
            "yaml",
            "--trim",
            "--default-code",
            "",
        ]);
        let Command::Build { source, format, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(format, Format::Yaml);
        let overrides = source.overrides();
        assert_eq!(overrides.trim, Some(true));
        assert_eq!(overrides.normalize_line_endings, None);
        assert_eq!(overrides.default_code.as_deref(), Some(""));
    }

    #[test]
    fn parses_list_and_presets() {
        let cli = Cli::parse_from(["fixtree", "list", "fx", "--replay", "tree.cassette.yaml"]);
        assert!(matches!(cli.command, Command::List { ref source } if source.replay.is_some()));
        let cli = Cli::parse_from(["fixtree", "presets"]);
        assert!(matches!(cli.command, Command::Presets));
    }
}
