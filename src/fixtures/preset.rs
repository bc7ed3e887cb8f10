//! Named default option bundles.

use super::error::FixtureError;
use super::options::BuildOptions;
use super::spec::{ContentRule, FixtureSpec};

/// A registered preset.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Lookup name.
    pub name: &'static str,
    /// One-line summary shown by `fixtree presets`.
    pub description: &'static str,
    build: fn() -> BuildOptions,
}

impl Preset {
    /// Returns a fresh copy of this preset's options.
    #[must_use]
    pub fn options(&self) -> BuildOptions {
        (self.build)()
    }
}

static PRESETS: &[Preset] = &[Preset {
    name: "babel",
    description: "exec/actual/expect JavaScript fixtures with source-map sidecars",
    build: babel,
}];

/// All registered presets, in registration order.
#[must_use]
pub fn all() -> &'static [Preset] {
    PRESETS
}

/// Returns the options of the preset named `name`.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownPreset`] if no preset has that name.
pub fn lookup(name: &str) -> Result<BuildOptions, FixtureError> {
    PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .map(Preset::options)
        .ok_or_else(|| FixtureError::UnknownPreset(name.to_string()))
}

fn babel() -> BuildOptions {
    let options = BuildOptions {
        trim: true,
        normalize_line_endings: true,
        default_code: Some(String::new()),
        data: vec![
            ("sourceMappings".to_string(), "source-mappings.json".to_string()),
            ("sourceMap".to_string(), "source-map.json".to_string()),
        ],
        fixtures: vec![
            FixtureSpec::new("exec", ["exec.js"])
                .with_task_file([".js", ".module.js"])
                .skip_when(ContentRule::contains_any(["// Error:", "// Skip.", "// Async."])),
            FixtureSpec::new("actual", ["actual.js"])
                .skip_when(ContentRule::contains_any(["// Error:", "// Skip."])),
            FixtureSpec::new("expect", ["expected.js", "expected.json"]),
        ],
        ..BuildOptions::default()
    };
    // Upstream error-recovery cases.
    options.skip_names_containing("Error_")
}
